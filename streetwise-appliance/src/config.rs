//! Configuration loading
//!
//! TOML deserialized through serde into [`ApplianceConfig`]. Falls back to
//! the embedded `appliance.toml`, and from there to compiled-in defaults.

use streetwise_core::config::ApplianceConfig;

/// Embedded default configuration (compiled into the runtime)
/// Edit appliance.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../appliance.toml");

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML parsing failed, or a value had the wrong type
    TomlParse,
}

/// Parse a TOML configuration
///
/// Missing sections and keys take their defaults.
pub fn parse_config(input: &str) -> Result<ApplianceConfig, ConfigError> {
    toml::from_str(input).map_err(|_e| {
        #[cfg(feature = "defmt")]
        warn!("TOML parse error: {}", defmt::Display2Format(&_e));
        ConfigError::TomlParse
    })
}

/// Load configuration
///
/// Uses `text` if given and valid, otherwise the embedded defaults.
/// Never fails.
pub fn load_config(text: Option<&str>) -> ApplianceConfig {
    if let Some(text) = text {
        match parse_config(text) {
            Ok(config) => {
                info!("Loaded configuration");
                log_config_summary(&config);
                return config;
            }
            Err(e) => {
                warn!("Invalid configuration ({:?}), using embedded defaults", e);
            }
        }
    }

    default_config()
}

/// Parse the embedded appliance.toml
fn default_config() -> ApplianceConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            debug!("Parsed embedded configuration");
            config
        }
        Err(e) => {
            // Only reachable if appliance.toml was edited without a rebuild check
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using built-in defaults");
            ApplianceConfig::default()
        }
    }
}

fn log_config_summary(config: &ApplianceConfig) {
    debug!("  entry timeout {} ms", config.entry.timeout_ms);
    debug!("  fade window {} ms", config.fade.window_ms);
    debug!("  scope interval {} ms", config.scope.interval_ms);
    debug!("  spinner frame {} ms", config.progress.frame_ms);
}

#[cfg(test)]
mod tests {
    use super::*;
    use streetwise_core::keypad::KeypadLayout;

    #[test]
    fn test_embedded_matches_defaults() {
        assert_eq!(parse_config(EMBEDDED_CONFIG), Ok(ApplianceConfig::default()));
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            r#"
            [entry]
            timeout_ms = 5000

            [keypad]
            layout = "numpad"
            "#,
        )
        .unwrap();

        assert_eq!(config.entry.timeout_ms, 5000);
        assert_eq!(config.keypad.layout, KeypadLayout::Numpad);
        assert_eq!(config.fade.window_ms, 10_000);
        assert_eq!(config.scope.stride, 8);
    }

    #[test]
    fn test_invalid_rejected() {
        assert_eq!(
            parse_config("[entry]\ntimeout_ms = \"soon\""),
            Err(ConfigError::TomlParse)
        );
        assert_eq!(parse_config("[keypad]\nlayout = \"qwerty\""), Err(ConfigError::TomlParse));
        assert_eq!(parse_config("this is not toml"), Err(ConfigError::TomlParse));
    }

    #[test]
    fn test_load_falls_back() {
        assert_eq!(load_config(None), ApplianceConfig::default());
        assert_eq!(load_config(Some("[[[")), ApplianceConfig::default());

        let config = load_config(Some("[fade]\nwindow_ms = 500"));
        assert_eq!(config.fade.window_ms, 500);
    }
}
