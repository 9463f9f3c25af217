// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Error types for Panogallery

use thiserror::Error;

/// Result type alias for Panogallery operations
pub type Result<T> = std::result::Result<T, GalleryError>;

/// Panogallery error types
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Server error: {0}")]
    Server(String),
}
