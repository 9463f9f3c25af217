// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Addressing and social share links for single images

use serde::Serialize;

use crate::catalog::{Category, ImageDescriptor};

/// Percent-encode a URL component, leaving `!'()*` and `~` as they are
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
        .replace("%7E", "~")
}

/// Deep link to the single-image viewer
pub fn view_url(descriptor: &ImageDescriptor) -> String {
    format!(
        "/view/{}/{}",
        descriptor.category,
        encode_component(&descriptor.filename)
    )
}

/// `relative_path` with the filename percent-encoded, safe for `src` attributes
pub fn image_url(descriptor: &ImageDescriptor) -> String {
    format!(
        "/images/{}/{}",
        descriptor.category,
        encode_component(&descriptor.filename)
    )
}

/// Deep link to the attachment download
pub fn download_url(descriptor: &ImageDescriptor) -> String {
    format!(
        "/download/{}/{}",
        descriptor.category,
        encode_component(&descriptor.filename)
    )
}

pub fn share_text(title: &str) -> String {
    format!("Check out this {}!", title)
}

/// Document title of the viewer page
pub fn page_title(category: Category, filename: &str) -> String {
    format!("{} - {}", category.label(), filename)
}

pub fn page_description(category: Category) -> &'static str {
    match category {
        Category::Sphere => "View interactive 360° sphere image captured by drone",
        Category::Panorama => "View panoramic image captured by drone",
    }
}

/// Join a base such as `https://host` with an absolute path
pub fn absolute_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Third-party share targets for one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub url: String,
    pub text: String,
    pub facebook: String,
    pub whatsapp: String,
    pub telegram: String,
}

impl ShareLinks {
    pub fn new(url: &str, title: &str) -> Self {
        let text = share_text(title);
        let enc_url = encode_component(url);

        Self {
            facebook: format!("https://www.facebook.com/sharer/sharer.php?u={}", enc_url),
            whatsapp: format!(
                "https://wa.me/?text={}",
                encode_component(&format!("{} {}", text, url))
            ),
            telegram: format!(
                "https://t.me/share/url?url={}&text={}",
                enc_url,
                encode_component(&text)
            ),
            url: url.to_string(),
            text,
        }
    }
}
