//! Photo model: identity and extension-derived category.

use std::path::PathBuf;

/// Image category recognized by the synchronizer, derived from the file
/// extension. Determines the MIME type used when attaching the photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoCategory {
    Jpeg,
    Png,
    Gif,
    Heic,
}

impl PhotoCategory {
    /// Maps a file extension (without the dot) to a category.
    ///
    /// Matching is ASCII case-insensitive; the extension is normalized to
    /// lowercase before lookup. Returns `None` for unrecognized extensions.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "heic" => Some(Self::Heic),
            _ => None,
        }
    }

    /// MIME type used for the mail attachment.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Heic => "image/heic",
        }
    }
}

impl std::fmt::Display for PhotoCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Heic => "heic",
        };
        write!(f, "{}", name)
    }
}

/// A candidate photo discovered in the source directory.
///
/// `file_name` is the idempotency key: case-sensitive, no path component.
/// The ledger keys on it alone, so two photos with the same name but
/// different bytes are treated as the same photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// File name including extension; the delivery identity
    pub file_name: String,

    /// Absolute path to the source file
    pub path: PathBuf,

    /// Category inferred from the extension
    pub category: PhotoCategory,
}

impl Photo {
    /// Builds a photo from a path, inferring the category from the
    /// extension. Returns `None` when the path has no file name or an
    /// unrecognized extension.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_string();
        let extension = path.extension()?.to_str()?;
        let category = PhotoCategory::from_extension(extension)?;

        Some(Self {
            file_name,
            path,
            category,
        })
    }
}
