//! Formatter settings, loaded from a YAML file and overridden by CLI flags.
//!
//! The whole document is also handed to the backend's `initialize` as an
//! opaque value, so keys this module does not know about are ignored.

use crate::error::ConfigError;
use crate::formatters::line::DEFAULT_LABEL;
use crate::output_format::OutputFormat;
use crate::record_formatter::STARTUP_MARKER;
use crate::resolver::{
    DnsResolver, HostResolver, RawResolver, StaticResolver, DEFAULT_RESOLVE_TIMEOUT,
};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub label: String,
    pub format: OutputFormat,
    /// Reverse-resolve IP literals to host names
    pub resolve: bool,
    #[serde(deserialize_with = "deserialize_duration")]
    pub resolve_timeout: Duration,
    /// Fixed names for specific hosts, checked before DNS
    pub hosts: IndexMap<String, String>,
    pub startup_marker: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            label: DEFAULT_LABEL.to_string(),
            format: OutputFormat::default(),
            resolve: true,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
            hosts: IndexMap::new(),
            startup_marker: Some(STARTUP_MARKER.to_string()),
        }
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_duration(&text).map_err(serde::de::Error::custom)
}

/// Parse a human duration such as `250ms` or `2s`
pub fn parse_duration(text: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(text.trim()).map_err(|source| ConfigError::Duration {
        value: text.to_string(),
        source,
    })
}

impl Settings {
    /// Parse settings from YAML text, returning them with the raw document
    pub fn from_yaml(text: &str) -> Result<(Settings, serde_yaml::Value), ConfigError> {
        let document: serde_yaml::Value = serde_yaml::from_str(text)?;
        let settings = if document.is_null() {
            Settings::default()
        } else {
            serde_yaml::from_value(document.clone())?
        };
        Ok((settings, document))
    }

    pub fn load(path: &Path) -> Result<(Settings, serde_yaml::Value), ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn build_resolver(&self) -> Box<dyn HostResolver> {
        let base: Box<dyn HostResolver> = if self.resolve {
            Box::new(DnsResolver::new(self.resolve_timeout))
        } else {
            Box::new(RawResolver)
        };

        if self.hosts.is_empty() {
            base
        } else {
            Box::new(StaticResolver::new(self.hosts.clone()).with_fallback(base))
        }
    }
}
