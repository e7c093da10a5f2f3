//! Configuration file loading
//!
//! Reads a node configuration record from disk. `.toml` files are parsed as
//! TOML and converted to the JSON shape; everything else is read as JSON.
//! The SHA-256 of the raw bytes is kept so callers can tell which file
//! revision a result came from.

use change_label_node::ChangeLabelConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::debug;

/// File format of a configuration source
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    /// File path as given
    pub path: String,

    /// SHA-256 digest of raw file bytes
    pub digest: String,

    pub format: ConfigFormat,
}

/// A configuration record with its provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedConfig {
    pub config: ChangeLabelConfig,
    pub source: ConfigSource,
}

/// Load a configuration record from `path`.
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let bytes = fs::read(path).map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let contents = String::from_utf8(bytes)
        .map_err(|e| ConfigError::ParseError(format!("Invalid UTF-8: {}", e)))?;

    let format = ConfigFormat::from_path(path);
    let value = match format {
        ConfigFormat::Toml => {
            let toml_value: toml::Value = toml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;
            toml_to_json(toml_value)
        }
        ConfigFormat::Json => serde_json::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))?,
    };

    if !value.is_object() {
        return Err(ConfigError::ParseError(
            "configuration must be an object".to_string(),
        ));
    }

    let config = ChangeLabelConfig::from_value(value)
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    debug!("loaded {} ({:?}, sha256 {})", path.display(), format, digest);

    Ok(LoadedConfig {
        config,
        source: ConfigSource {
            path: path.to_string_lossy().to_string(),
            digest,
            format,
        },
    })
}

/// Convert TOML Value to JSON Value
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            Value::Object(table.into_iter().map(|(k, v)| (k, toml_to_json(v))).collect())
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use change_label_node::LabelSource;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut temp = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(temp, "{}", contents).unwrap();
        temp
    }

    #[test]
    fn test_load_json() {
        let temp = temp_file(
            ".json",
            r#"{"labelSource": "MESSAGE_METADATA", "labelNameOrPattern": "deviceName"}"#,
        );

        let loaded = load_config(temp.path()).unwrap();

        assert_eq!(loaded.config.label_source, Some(LabelSource::MessageMetadata));
        assert_eq!(loaded.config.label_name_or_pattern.as_deref(), Some("deviceName"));
        assert_eq!(loaded.source.format, ConfigFormat::Json);
        assert_eq!(loaded.source.digest.len(), 64);
    }

    #[test]
    fn test_load_toml() {
        let temp = temp_file(
            ".toml",
            "labelSource = \"STATIC\"\nstaticLabelValue = \"Boiler\"\nretries = 3\n",
        );

        let loaded = load_config(temp.path()).unwrap();

        assert_eq!(loaded.config.label_source, Some(LabelSource::Static));
        assert_eq!(loaded.config.static_label_value.as_deref(), Some("Boiler"));
        assert_eq!(loaded.config.extra["retries"], 3);
        assert_eq!(loaded.source.format, ConfigFormat::Toml);
    }

    #[test]
    fn test_digest_tracks_content() {
        let a = temp_file(".json", r#"{"labelSource": "STATIC"}"#);
        let b = temp_file(".json", r#"{"labelSource": "MESSAGE_DATA"}"#);

        let digest_a = load_config(a.path()).unwrap().source.digest;
        let digest_b = load_config(b.path()).unwrap().source.digest;
        assert_ne!(digest_a, digest_b);
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Path::new("/nonexistent/change-label.json"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_invalid_json() {
        let temp = temp_file(".json", "{not json");
        let err = load_config(temp.path()).unwrap_err();
        assert!(err.to_string().contains("JSON parse error"));
    }

    #[test]
    fn test_non_object_rejected() {
        let temp = temp_file(".json", "[1, 2]");
        assert!(matches!(load_config(temp.path()), Err(ConfigError::ParseError(_))));
    }
}
