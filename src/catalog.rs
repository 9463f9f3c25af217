// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Image catalog: discovers the photographs stored for each category

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::{GalleryError, Result};

/// Extensions (lowercase, without the dot) that qualify as gallery images
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// The two fixed image collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// 360° spherical photographs
    Sphere,
    /// Wide-angle flat panoramas
    Panorama,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Sphere, Category::Panorama];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sphere => "sphere",
            Category::Panorama => "panorama",
        }
    }

    /// Short label used in titles
    pub fn label(&self) -> &'static str {
        match self {
            Category::Sphere => "360° Sphere",
            Category::Panorama => "Panorama",
        }
    }

    /// Heading of the category listing
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Sphere => "360° Sphere Images",
            Category::Panorama => "Panorama Images",
        }
    }

    pub fn blurb(&self) -> &'static str {
        match self {
            Category::Sphere => "Immersive 360° sphere photos",
            Category::Panorama => "Wide-angle panoramic views",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sphere" => Ok(Category::Sphere),
            "panorama" => Ok(Category::Panorama),
            other => Err(GalleryError::InvalidCategory(other.to_string())),
        }
    }
}

/// One discoverable image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// `<category>-<filename>`
    pub id: String,
    pub filename: String,
    /// Public address, `/images/<category>/<filename>`
    #[serde(rename = "path")]
    pub relative_path: String,
    #[serde(rename = "type")]
    pub category: Category,
}

impl ImageDescriptor {
    pub fn new(category: Category, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            id: format!("{}-{}", category, filename),
            relative_path: format!("/images/{}/{}", category, filename),
            filename,
            category,
        }
    }

    /// MIME type derived from the file extension
    pub fn mime_type(&self) -> &'static str {
        let ext = Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            _ => "application/octet-stream",
        }
    }
}

/// Check whether a path carries one of the supported image extensions
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Ordered, read-only sequence of descriptors for a single category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    #[serde(skip)]
    category: Category,
    images: Vec<ImageDescriptor>,
}

impl Catalog {
    pub fn empty(category: Category) -> Self {
        Self { category, images: Vec::new() }
    }

    /// Build a catalog from filenames, in the order given
    pub fn from_filenames<I, S>(category: Category, filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category,
            images: filenames
                .into_iter()
                .map(|f| ImageDescriptor::new(category, f))
                .collect(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageDescriptor> {
        self.images.iter()
    }

    pub fn into_vec(self) -> Vec<ImageDescriptor> {
        self.images
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ImageDescriptor;
    type IntoIter = std::slice::Iter<'a, ImageDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}

/// Reads category folders under an images root
#[derive(Debug, Clone)]
pub struct CatalogProvider {
    root: PathBuf,
}

impl CatalogProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Storage location of a category
    pub fn location(&self, category: Category) -> PathBuf {
        self.root.join(category.as_str())
    }

    /// Scan a category folder.
    ///
    /// A missing folder is an empty catalog, not an error. Only entries that
    /// are not directories and carry a supported extension are kept, in the
    /// order the filesystem lists them.
    pub fn scan(&self, category: Category) -> Result<Catalog> {
        let dir = self.location(category);
        if !dir.exists() {
            debug!("No image folder at {:?}", dir);
            return Ok(Catalog::empty(category));
        }

        let mut images = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() || !is_supported_image(&path) {
                continue;
            }

            match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => images.push(ImageDescriptor::new(category, name)),
                None => debug!("Skipping non UTF-8 filename: {:?}", path),
            }
        }

        debug!("Found {} {} images in {:?}", images.len(), category, dir);
        Ok(Catalog { category, images })
    }

    /// Scan a category, degrading any read failure to an empty catalog
    pub fn images(&self, category: Category) -> Catalog {
        match self.scan(category) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("Error reading {} images: {}", category, e);
                Catalog::empty(category)
            }
        }
    }

    /// Every image, sphere catalog first
    pub fn all_images(&self) -> Vec<ImageDescriptor> {
        Category::ALL
            .iter()
            .flat_map(|c| self.images(*c).into_vec())
            .collect()
    }
}
