//! # Client configuration: `waypoint.toml`
//!
//! Defines the TOML file that tells the client where its backend lives and how
//! the map and feedback messages behave.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000"
//!
//! [map]
//! default_lat = 40.7685
//! default_long = -73.9822
//! zoom = 12
//!
//! [feedback]
//! timeout_secs = 2
//! ```
//!
//! Every section derives `Default`, so a missing or empty file is equivalent to
//! the default configuration.

use serde::{Deserialize, Serialize};

use crate::models::Viewport;

/// Top-level configuration stored in `waypoint.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Map defaults used before geolocation answers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_lat")]
    pub default_lat: f64,
    #[serde(default = "default_long")]
    pub default_long: f64,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

fn default_lat() -> f64 {
    Viewport::default().lat
}

fn default_long() -> f64 {
    Viewport::default().long
}

fn default_zoom() -> u8 {
    12
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_lat: default_lat(),
            default_long: default_long(),
            zoom: default_zoom(),
        }
    }
}

impl MapConfig {
    pub fn default_viewport(&self) -> Viewport {
        Viewport::new(self.default_lat, self.default_long)
    }
}

/// Feedback message behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Seconds before a feedback message clears itself.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,
}

fn default_timeout_secs() -> u32 {
    2
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into().trim_end_matches('/').to_string(),
            },
            ..Self::default()
        }
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "waypoint.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
