use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
}

/// What the Escape key (or the window close button) does on the removal dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EscapeBehavior {
    /// Closing the dialog keeps the place.
    #[default]
    Cancel,
    /// Closing the dialog removes the place, as if "Yes" had been pressed.
    Confirm,
}

/// Where the current position comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LocationSource {
    /// A fixed position, e.g. the user's home.
    Fixed { latitude: f64, longitude: f64 },
    /// Ask an IP geolocation endpoint returning `lat`/`lon` JSON.
    IpLookup { url: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_location_source")]
    pub location_source: LocationSource,

    /// Give up on the location fix after this long and show catalog order.
    #[serde(default = "default_location_timeout_secs")]
    pub location_timeout_secs: u64,

    #[serde(default)]
    pub escape_behavior: EscapeBehavior,

    #[serde(default = "default_theme_mode")]
    pub theme_mode: ThemeMode,
}

fn default_server_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_location_source() -> LocationSource {
    LocationSource::IpLookup {
        url: "http://ip-api.com/json".to_string(),
    }
}

fn default_location_timeout_secs() -> u64 {
    8
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::Light
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout_secs(),
            location_source: default_location_source(),
            location_timeout_secs: default_location_timeout_secs(),
            escape_behavior: EscapeBehavior::default(),
            theme_mode: default_theme_mode(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults and save them for next time
                let default = Self::default();
                if let Err(e) = default.save_to(config_path) {
                    tracing::debug!("Could not write default settings: {}", e);
                }
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(config_path, json)?;

        Ok(())
    }

    /// Reject values the rest of the app can't work with.
    pub fn validate(&self) -> Result<()> {
        let url = self.server_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Settings(format!(
                "server url must start with http:// or https://, got \"{}\"",
                self.server_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::Settings("request timeout must be at least 1 second".into()));
        }
        if self.location_timeout_secs == 0 {
            return Err(AppError::Settings("location timeout must be at least 1 second".into()));
        }
        if let LocationSource::Fixed { latitude, longitude } = self.location_source {
            if !crate::app::domain::Coordinates::new(latitude, longitude).is_valid() {
                return Err(AppError::Settings(format!(
                    "fixed location ({}, {}) is out of range",
                    latitude, longitude
                )));
            }
        }
        Ok(())
    }

    pub fn is_dark(&self) -> bool {
        self.theme_mode == ThemeMode::Dark
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("placepicker");
        path.push("settings.json");
        path
    }
}
