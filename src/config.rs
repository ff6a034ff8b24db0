//! Menu configuration

use serde::{Deserialize, Serialize};

use crate::error::MenuResult;

/// Title shown when an inventory is opened without one
pub const DEFAULT_TITLE: &str = "Inventory";

/// Settings a registry hands to every inventory it creates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Title used when `open` is called without a title
    pub default_title: String,

    /// Re-render for every open viewer after contents or buttons change
    pub refresh_on_change: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            refresh_on_change: false,
        }
    }
}

impl MenuConfig {
    /// Parse a configuration from TOML, filling missing keys with defaults
    pub fn from_toml_str(source: &str) -> MenuResult<Self> {
        let config = toml::from_str(source)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config = MenuConfig::from_toml_str("refresh_on_change = true").unwrap();
        assert!(config.refresh_on_change);
        assert_eq!(config.default_title, DEFAULT_TITLE);

        let empty = MenuConfig::from_toml_str("").unwrap();
        assert_eq!(empty, MenuConfig::default());
    }

    #[test]
    fn test_bad_toml_is_rejected() {
        assert!(MenuConfig::from_toml_str("default_title = 5").is_err());
    }
}
