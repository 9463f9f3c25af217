// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for Panogallery

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Directory holding the `sphere/` and `panorama/` folders
    #[serde(default = "default_images_root")]
    pub images_root: PathBuf,

    /// Web server settings
    #[serde(default)]
    pub web: WebConfig,

    /// Gallery presentation settings
    #[serde(default)]
    pub gallery: GalleryConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebConfig {
    #[serde(default = "default_web_host")]
    pub host: String,
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// Public base URL used for share links (e.g. `https://gallery.example.com`).
    /// Falls back to the request `Host` header when unset.
    #[serde(default)]
    pub public_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GalleryConfig {
    #[serde(default = "default_site_title")]
    pub site_title: String,
    /// Cards shown per category on the home page
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
}

// Default value functions
fn default_images_root() -> PathBuf { PathBuf::from("public/images") }
fn default_web_host() -> String { "127.0.0.1".to_string() }
fn default_web_port() -> u16 { 3000 }
fn default_site_title() -> String { "Drone Gallery".to_string() }
fn default_preview_limit() -> usize { 10 }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            images_root: default_images_root(),
            web: WebConfig::default(),
            gallery: GalleryConfig::default(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            public_url: None,
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            site_title: default_site_title(),
            preview_limit: default_preview_limit(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| crate::GalleryError::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Address the web server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web.host, self.web.port)
    }
}
