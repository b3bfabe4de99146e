//! Client settings.
//!
//! ```
//! use rpsg::Settings;
//!
//! let settings = Settings::from_toml("api_key = \"abc\"").unwrap();
//! assert_eq!(settings.url, rpsg::settings::DEFAULT_URL);
//! assert_eq!(settings.api_key.as_deref(), Some("abc"));
//! ```

use rpsg_core::{RPSGError, RPSGResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_URL: &str = "https://psg.gsfc.nasa.gov/api.php";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Where and how to reach the PSG API. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn from_toml(text: &str) -> RPSGResult<Self> {
        let settings: Self = toml::from_str(text).map_err(|e| RPSGError::Settings(e.to_string()))?;
        if settings.url.trim().is_empty() {
            return Err(RPSGError::Settings("url may not be empty".to_string()));
        }
        Ok(settings)
    }

    pub fn to_toml(&self) -> RPSGResult<String> {
        toml::to_string(self).map_err(|e| RPSGError::Settings(e.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_round_trip() {
        let settings = Settings {
            url: "http://localhost:3000/api.php".to_string(),
            api_key: Some("secret".to_string()),
            timeout_secs: 30,
        };
        let text = settings.to_toml().unwrap();
        assert_eq!(
            text,
            "url = \"http://localhost:3000/api.php\"\napi_key = \"secret\"\ntimeout_secs = 30\n"
        );
        assert_eq!(Settings::from_toml(&text).unwrap(), settings);
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            Settings::from_toml("timeout_secs = \"soon\""),
            Err(RPSGError::Settings(_))
        ));
        assert!(Settings::from_toml("url = \"\"").is_err());
    }
}
