//! Cookie setter configuration.
//!
//! ```rust
//! use samesite_cookie::config::{ModeSetting, SameSiteConfig};
//!
//! let config = SameSiteConfig::from_json(r#"{ "mode": "legacy" }"#).unwrap();
//! assert_eq!(config.mode, ModeSetting::Legacy);
//! assert!(config.cache_verdicts);
//! ```

#[cfg(feature = "json")]
use crate::base::cookieerror::CookieError;
use serde::{Deserialize, Serialize};

/// How cookies reach the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmissionMode {
    /// The environment primitive takes `secure`, `http_only` and `same_site`.
    Native,
    /// The primitive takes expiry/path/domain only; the remaining flags are
    /// appended by rewriting the staged `Set-Cookie` header.
    Legacy,
}

/// Configured emission mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    /// Use native emission when the environment supports SameSite.
    #[default]
    Auto,
    Native,
    Legacy,
}

impl ModeSetting {
    pub fn resolve(self, supports_native_same_site: bool) -> EmissionMode {
        match self {
            ModeSetting::Auto if supports_native_same_site => EmissionMode::Native,
            ModeSetting::Auto => EmissionMode::Legacy,
            ModeSetting::Native => EmissionMode::Native,
            ModeSetting::Legacy => EmissionMode::Legacy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SameSiteConfig {
    pub mode: ModeSetting,
    /// Memoize compatibility verdicts per user agent.
    pub cache_verdicts: bool,
}

impl Default for SameSiteConfig {
    fn default() -> Self {
        Self {
            mode: ModeSetting::Auto,
            cache_verdicts: true,
        }
    }
}

impl SameSiteConfig {
    /// Create new builder.
    pub fn builder() -> SameSiteConfigBuilder {
        SameSiteConfigBuilder::default()
    }

    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, CookieError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, CookieError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for SameSiteConfig.
#[derive(Debug, Clone, Default)]
pub struct SameSiteConfigBuilder {
    config: SameSiteConfig,
}

impl SameSiteConfigBuilder {
    pub fn mode(mut self, mode: ModeSetting) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn cache_verdicts(mut self, enabled: bool) -> Self {
        self.config.cache_verdicts = enabled;
        self
    }

    pub fn build(self) -> SameSiteConfig {
        self.config
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(ModeSetting::Auto.resolve(true), EmissionMode::Native);
        assert_eq!(ModeSetting::Auto.resolve(false), EmissionMode::Legacy);
        assert_eq!(ModeSetting::Legacy.resolve(true), EmissionMode::Legacy);
        assert_eq!(ModeSetting::Native.resolve(false), EmissionMode::Native);
    }

    #[test]
    fn test_defaults() {
        let config = SameSiteConfig::default();
        assert_eq!(config.mode, ModeSetting::Auto);
        assert!(config.cache_verdicts);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = SameSiteConfig::from_json(r#"{ "cache_verdicts": false }"#).unwrap();
        assert_eq!(config.mode, ModeSetting::Auto);
        assert!(!config.cache_verdicts);

        let empty = SameSiteConfig::from_json("{}").unwrap();
        assert_eq!(empty, SameSiteConfig::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_mode() {
        let err = SameSiteConfig::from_json(r#"{ "mode": "sometimes" }"#).unwrap_err();
        assert!(matches!(err, CookieError::Config { .. }));
    }

    #[test]
    fn test_json_roundtrip_through_builder() {
        let config = SameSiteConfig::builder()
            .mode(ModeSetting::Native)
            .cache_verdicts(false)
            .build();
        let json = config.to_json().unwrap();
        assert!(json.contains("\"native\""));
        assert_eq!(SameSiteConfig::from_json(&json).unwrap(), config);
    }
}
