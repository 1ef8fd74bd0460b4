use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use vectorlink_core::VectorStoreError;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "VECTORLINK_CONFIG";

const EXTENSIONS: &[&str] = &["toml", "json", "yaml", "yml"];

/// Syntax of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from a file extension (`toml`, `json`, `yaml`, `yml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    pub(crate) fn deserialize<T: DeserializeOwned>(self, content: &str) -> Result<T, String> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|e| format!("TOML parse error: {e}")),
            Self::Json => {
                serde_json::from_str(content).map_err(|e| format!("JSON parse error: {e}"))
            }
            Self::Yaml => {
                serde_yml::from_str(content).map_err(|e| format!("YAML parse error: {e}"))
            }
        }
    }
}

/// Find the configuration file to load.
///
/// Search order:
/// 1. Explicit `path` (if provided)
/// 2. The file named by `$VECTORLINK_CONFIG`
/// 3. `./vectorlink.{toml,json,yaml,yml}` in the current directory
/// 4. `~/.vectorlink/config.{toml,json,yaml,yml}` in the home directory
///
/// An explicit or environment-named path must exist; it is never skipped in
/// favour of a discovered file.
pub fn locate(path: Option<&Path>) -> Result<PathBuf, VectorStoreError> {
    let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    if let Some(p) = path.or(from_env.as_deref()) {
        if p.exists() {
            return Ok(p.to_path_buf());
        }
        return Err(VectorStoreError::Config(format!(
            "config file not found: {}",
            p.display()
        )));
    }

    let local = EXTENSIONS
        .iter()
        .map(|ext| PathBuf::from(format!("./vectorlink.{ext}")));
    let home = dirs::home_dir().into_iter().flat_map(|home| {
        EXTENSIONS
            .iter()
            .map(move |ext| home.join(".vectorlink").join(format!("config.{ext}")))
    });

    local.chain(home).find(|p| p.exists()).ok_or_else(|| {
        VectorStoreError::Config(
            "no config file found: tried $VECTORLINK_CONFIG, ./vectorlink.* and ~/.vectorlink/config.*"
                .to_string(),
        )
    })
}

/// Read and deserialize a file, prefixing any error with its path.
pub(crate) fn read<T: DeserializeOwned>(path: &Path) -> Result<T, VectorStoreError> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| {
        VectorStoreError::Config(format!(
            "cannot detect config format from extension: {}",
            path.display()
        ))
    })?;
    let content = std::fs::read_to_string(path).map_err(|e| {
        VectorStoreError::Config(format!("failed to read {}: {e}", path.display()))
    })?;
    format
        .deserialize(&content)
        .map_err(|e| VectorStoreError::Config(format!("{}: {e}", path.display())))
}
