//! Format-agnostic settings loading and saving

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// Serialization formats recognised by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsFormat {
    Toml,
    Json,
    Yaml,
}

impl SettingsFormat {
    fn detect(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("");
        match extension.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Loads and saves whole serde types, picking the format from the file
/// extension (`.toml`, `.json`, `.yaml`/`.yml`).
///
/// Used for host-level settings such as the base directory and sync options,
/// not for field-by-field synchronization.
#[derive(Debug, Default, Clone, Copy)]
pub struct SettingsStore;

impl SettingsStore {
    pub fn new() -> Self {
        Self
    }

    /// Load settings from a file.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let format = SettingsFormat::detect(path)?;
        let content = io::read_text(path)?;

        let parse_error = |message: String| Error::ConfigParse {
            path: path.to_native(),
            format: format.name().into(),
            message,
        };

        match format {
            SettingsFormat::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
            SettingsFormat::Json => {
                serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))
            }
            SettingsFormat::Yaml => {
                serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))
            }
        }
    }

    /// Save settings to a file with an atomic write.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let format = SettingsFormat::detect(path)?;

        let serialize_error = |message: String| Error::ConfigSerialize {
            path: path.to_native(),
            format: format.name().into(),
            message,
        };

        let content = match format {
            SettingsFormat::Toml => {
                toml::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))?
            }
            SettingsFormat::Json => {
                serde_json::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))?
            }
            SettingsFormat::Yaml => {
                serde_yaml::to_string(value).map_err(|e| serialize_error(e.to_string()))?
            }
        };

        io::write_atomic(path, content.as_bytes())
    }
}
