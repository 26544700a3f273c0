//! DocumentId value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// A type-safe wrapper for deed document IDs.
///
/// The ID is derived once from the source image file name and is the only key
/// used for both the extraction output file and the search index document.
///
/// # Example
///
/// ```
/// use deed_archive::domain::DocumentId;
///
/// let id = DocumentId::from_path("scans/1/B-1042.TIF").unwrap();
/// assert_eq!(id.as_str(), "B-1042");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a new DocumentId, validating that it's not empty.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` if the provided ID is empty, and
    /// `ValidationError::InvalidId` if it contains `/` or `\`.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if id.contains(['/', '\\']) {
            return Err(ValidationError::InvalidId(id));
        }
        Ok(Self(id))
    }

    /// Derive the ID from an image path: the file name up to its first `.`.
    ///
    /// No other canonicalization happens, so `deed.001.TIF` and `deed.002.TIF`
    /// both map to `deed`. Callers keep file names unique.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ValidationError::MissingFileName(path.display().to_string()))?;

        let stem = file_name.split('.').next().unwrap_or_default();
        Self::new(stem)
    }

    /// File name of the extraction output for this document.
    pub fn json_file_name(&self) -> String {
        format!("{}.json", self.0)
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Serde support - serialize as string
impl Serialize for DocumentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DocumentId::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
