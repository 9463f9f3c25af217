// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Panogallery: 360° Sphere & Panorama Gallery
//!
//! Lists the photographs stored under an images root, one folder per
//! category, and serves them as a browsable web gallery with a
//! single-image viewer, downloads and share links.

pub mod catalog;
pub mod config;
pub mod error;
pub mod navigator;
pub mod share;
pub mod web;

pub use catalog::{Catalog, CatalogProvider, Category, ImageDescriptor};
pub use config::AppConfig;
pub use error::{GalleryError, Result};
