//! JSON inputs: the image library and the affiliate link list

use pagesmith::page::enhancing::{ImageLibrary, ImageRecord, LinkRecord};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum InputError {
    Io(PathBuf, std::io::Error),
    Json(PathBuf, serde_json::Error),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Io(path, err) => write!(f, "cannot read {}: {}", path.display(), err),
            InputError::Json(path, err) => write!(f, "invalid JSON in {}: {}", path.display(), err),
        }
    }
}

impl std::error::Error for InputError {}

#[derive(Deserialize)]
struct AttachmentsFile {
    attachments: Vec<ImageRecord>,
}

#[derive(Deserialize)]
struct AffiliateLinksFile {
    affiliate_links: Vec<LinkRecord>,
}

pub fn read_text(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|e| InputError::Io(path.to_path_buf(), e))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, InputError> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|e| InputError::Json(path.to_path_buf(), e))
}

/// `{"attachments": [{"title": .., "url": .., "keywords": [..]}]}`
pub fn load_images(path: &Path) -> Result<ImageLibrary, InputError> {
    let file: AttachmentsFile = read_json(path)?;
    tracing::debug!(
        images = file.attachments.len(),
        path = %path.display(),
        "loaded image library"
    );
    Ok(ImageLibrary::new(file.attachments))
}

/// `{"affiliate_links": [{"title": .., "target_url": ..}]}`
pub fn load_links(path: &Path) -> Result<Vec<LinkRecord>, InputError> {
    let file: AffiliateLinksFile = read_json(path)?;
    tracing::debug!(
        links = file.affiliate_links.len(),
        path = %path.display(),
        "loaded affiliate links"
    );
    Ok(file.affiliate_links)
}
