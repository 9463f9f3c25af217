// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Gallery navigation over a catalog
//!
//! Position is never stored: every request resolves it again from the
//! filename in its address.

use serde::Serialize;

use crate::catalog::ImageDescriptor;

/// Index of the descriptor whose filename matches exactly, or `None`
pub fn locate(catalog: &[ImageDescriptor], filename: &str) -> Option<usize> {
    catalog.iter().position(|d| d.filename == filename)
}

pub fn has_previous(catalog: &[ImageDescriptor], index: usize) -> bool {
    !catalog.is_empty() && index > 0
}

pub fn has_next(catalog: &[ImageDescriptor], index: usize) -> bool {
    index < catalog.len().saturating_sub(1)
}

/// Descriptor before `index`.
///
/// # Panics
///
/// Panics unless `has_previous(catalog, index)` holds.
pub fn previous(catalog: &[ImageDescriptor], index: usize) -> &ImageDescriptor {
    assert!(has_previous(catalog, index), "no image before index {}", index);
    &catalog[index - 1]
}

/// Descriptor after `index`.
///
/// # Panics
///
/// Panics unless `has_next(catalog, index)` holds.
pub fn next(catalog: &[ImageDescriptor], index: usize) -> &ImageDescriptor {
    assert!(has_next(catalog, index), "no image after index {}", index);
    &catalog[index + 1]
}

/// Where an image sits in its catalog, with its neighbours
#[derive(Debug, Clone, Serialize)]
pub struct Position<'a> {
    pub index: usize,
    pub total: usize,
    pub current: &'a ImageDescriptor,
    pub previous: Option<&'a ImageDescriptor>,
    pub next: Option<&'a ImageDescriptor>,
}

impl<'a> Position<'a> {
    /// Locate `filename` and collect its neighbours
    pub fn resolve(catalog: &'a [ImageDescriptor], filename: &str) -> Option<Self> {
        let index = locate(catalog, filename)?;
        Some(Self {
            index,
            total: catalog.len(),
            current: &catalog[index],
            previous: has_previous(catalog, index).then(|| previous(catalog, index)),
            next: has_next(catalog, index).then(|| next(catalog, index)),
        })
    }
}
