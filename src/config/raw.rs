//! Raw config input, before shape validation.
//!
//! Scalars are typed here so that the parser reports type errors with its
//! own location info. `head` and `nav` stay loosely typed: their shapes
//! are checked by the section parsers, which report every problem with a
//! field path.

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use super::ConfigError;
use super::section::SidebarMode;

/// Source format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
        match ext.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSiteConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub head: Option<Value>,
    pub theme_config: RawThemeConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawThemeConfig {
    pub nav: Option<Value>,
    pub sidebar: Option<SidebarMode>,
    pub docs_repo: Option<String>,
    pub docs_branch: Option<String>,
    pub docs_dir: Option<String>,
    pub edit_links: Option<bool>,
    pub edit_link_text: Option<String>,
}

/// Parsed raw config plus the paths of keys outside the schema.
pub type Parsed = (RawSiteConfig, Vec<String>);

impl RawSiteConfig {
    /// Parse config text, collecting any unknown fields.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Parsed, ConfigError> {
        let mut ignored = Vec::new();
        let raw = match format {
            ConfigFormat::Toml => {
                let deserializer = toml::Deserializer::new(content);
                serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
                    ignored.push(path.to_string());
                })?
            }
            ConfigFormat::Json => {
                let mut deserializer = serde_json::Deserializer::from_str(content);
                let raw =
                    serde_ignored::deserialize(&mut deserializer, |path: serde_ignored::Path| {
                        ignored.push(path.to_string());
                    })?;
                deserializer.end()?;
                raw
            }
        };
        Ok((raw, ignored))
    }

    /// Interpret an in-memory value, collecting any unknown fields.
    pub fn from_value(value: &Value) -> Result<Parsed, ConfigError> {
        let mut ignored = Vec::new();
        let raw = serde_ignored::deserialize(value, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((raw, ignored))
    }

    /// Read and parse a config file, format chosen by extension.
    pub fn read(path: &Path) -> Result<Parsed, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::parse(&content, format)
    }
}
