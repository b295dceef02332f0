use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Origin + prefix of the REST service; empty means `<window origin>/api`
    pub base_url: String,
    /// localStorage key holding the bearer token
    pub token_key: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UiConfig {
    pub notification_ttl_ms: u32,
    /// Height budget of the multi-select panel used for above/below placement
    pub dropdown_panel_height: f64,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
token_key = "adminToken"

[ui]
notification_ttl_ms = 3000
dropdown_panel_height = 250.0
"#;

impl AppConfig {
    /// Load configuration.
    ///
    /// Order:
    /// 1. Embedded defaults
    /// 2. `ADMIN_API_BASE` set at build time overrides `api.base_url`
    pub fn load() -> Self {
        let mut config = Self::from_toml(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::warn!("Embedded config is invalid ({}), using built-in values", e);
            Self::fallback()
        });

        if let Some(base) = option_env!("ADMIN_API_BASE") {
            log::info!("API base overridden at build time: {}", base);
            config.api.base_url = base.trim_end_matches('/').to_string();
        }

        config
    }

    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    fn fallback() -> Self {
        Self {
            api: ApiConfig {
                base_url: String::new(),
                token_key: "adminToken".to_string(),
            },
            ui: UiConfig {
                notification_ttl_ms: 3000,
                dropdown_panel_height: 250.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.token_key, "adminToken");
        assert_eq!(config.api.base_url, "");
        assert_eq!(config.ui.notification_ttl_ms, 3000);
        assert_eq!(config.ui.dropdown_panel_height, 250.0);
        assert_eq!(config, AppConfig::fallback());
    }

    #[test]
    fn test_partial_config_is_rejected() {
        assert!(AppConfig::from_toml("[api]\nbase_url = \"x\"").is_err());
    }
}
