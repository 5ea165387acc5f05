use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
const MAGAZINE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "pdf"];
const PDF_EXTENSIONS: [&str; 1] = ["pdf"];

/// Kind of entity a media file belongs to. Each kind has its own upload
/// directory under `media/uploads/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Articles,
    Authors,
    Gallery,
    Magazines,
    MagazinesPdf,
    Publications,
    Billboards,
}

impl EntityKind {
    pub fn dir_name(self) -> &'static str {
        match self {
            EntityKind::Articles => "articles",
            EntityKind::Authors => "authors",
            EntityKind::Gallery => "gallery",
            EntityKind::Magazines => "magazines",
            EntityKind::MagazinesPdf => "magazinesPdf",
            EntityKind::Publications => "publications",
            EntityKind::Billboards => "billboards",
        }
    }

    fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            EntityKind::Magazines => &MAGAZINE_EXTENSIONS,
            EntityKind::MagazinesPdf => &PDF_EXTENSIONS,
            _ => &IMAGE_EXTENSIONS,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "articles" | "article" => Ok(EntityKind::Articles),
            "authors" | "author" => Ok(EntityKind::Authors),
            "gallery" => Ok(EntityKind::Gallery),
            "magazines" | "magazine" => Ok(EntityKind::Magazines),
            "magazinespdf" | "magazine-pdf" => Ok(EntityKind::MagazinesPdf),
            "publications" | "publication" => Ok(EntityKind::Publications),
            "billboards" | "billboard" => Ok(EntityKind::Billboards),
            other => Err(Error::InvalidConfig(format!("Unknown entity type: {}", other))),
        }
    }
}

/// Public URL of a stored media file.
///
/// Values that already contain a path are served from the site root as-is.
pub fn media_url(base_url: &str, filename: &str, kind: EntityKind) -> Option<String> {
    if filename.is_empty() {
        return None;
    }
    if filename.contains('/') {
        return Some(format!("/{}", filename));
    }
    Some(format!(
        "{}/media/uploads/{}/{}",
        base_url.trim_end_matches('/'),
        kind.dir_name(),
        filename
    ))
}

pub fn magazine_pdf_url(base_url: &str, filename: &str) -> Option<String> {
    media_url(base_url, filename, EntityKind::MagazinesPdf)
}

/// Billboards may point at an external image host; those URLs pass through.
pub fn billboard_image_url(base_url: &str, image: &str) -> Option<String> {
    if image.starts_with("http") {
        return Some(image.to_string());
    }
    media_url(base_url, image, EntityKind::Billboards)
}

/// Name a file is stored under: `{entity_id}.{extension}`.
///
/// The extension is taken from `original_name`, lower-cased, and must be one
/// the entity kind accepts.
pub fn upload_filename(original_name: &str, kind: EntityKind, entity_id: &str) -> Result<String> {
    let extension = original_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    if !kind.allowed_extensions().contains(&extension.as_str()) {
        let message = match kind {
            EntityKind::Magazines => {
                "Invalid file type. Magazines support: .jpg, .jpeg, .png, .pdf"
            }
            EntityKind::MagazinesPdf => "Invalid file type. Magazine documents must be .pdf",
            _ => "Invalid file type. Only .jpg, .jpeg, .png are supported",
        };
        return Err(Error::InvalidFile(message.to_string()));
    }

    Ok(format!("{}.{}", entity_id, extension))
}

/// A file on its way to the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub kind: EntityKind,
    pub entity_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.example.org/";

    #[test]
    fn test_media_url() {
        assert_eq!(
            media_url(BASE, "12.jpg", EntityKind::Articles).as_deref(),
            Some("https://api.example.org/media/uploads/articles/12.jpg")
        );
        assert_eq!(
            media_url(BASE, "media/legacy/12.jpg", EntityKind::Articles).as_deref(),
            Some("/media/legacy/12.jpg")
        );
        assert_eq!(media_url(BASE, "", EntityKind::Authors), None);
        assert_eq!(
            magazine_pdf_url(BASE, "7.pdf").as_deref(),
            Some("https://api.example.org/media/uploads/magazinesPdf/7.pdf")
        );
    }

    #[test]
    fn test_billboard_url_passes_external_hosts_through() {
        assert_eq!(
            billboard_image_url(BASE, "https://cdn.example.com/b.png").as_deref(),
            Some("https://cdn.example.com/b.png")
        );
        assert_eq!(
            billboard_image_url(BASE, "b.png").as_deref(),
            Some("https://api.example.org/media/uploads/billboards/b.png")
        );
    }

    #[test]
    fn test_upload_filename_validation() {
        assert_eq!(
            upload_filename("Cover.JPG", EntityKind::Articles, "42").unwrap(),
            "42.jpg"
        );
        assert_eq!(
            upload_filename("issue.pdf", EntityKind::Magazines, "3").unwrap(),
            "3.pdf"
        );
        assert!(matches!(
            upload_filename("issue.pdf", EntityKind::Authors, "3"),
            Err(Error::InvalidFile(_))
        ));
        assert!(matches!(
            upload_filename("noextension", EntityKind::Gallery, "3"),
            Err(Error::InvalidFile(_))
        ));
        assert!(upload_filename("scan.png", EntityKind::MagazinesPdf, "3").is_err());
    }

    #[test]
    fn test_entity_kind_from_str() {
        assert_eq!("Articles".parse::<EntityKind>().unwrap(), EntityKind::Articles);
        assert_eq!("magazinesPdf".parse::<EntityKind>().unwrap(), EntityKind::MagazinesPdf);
        assert!("videos".parse::<EntityKind>().is_err());
    }
}
