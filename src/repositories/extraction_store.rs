use crate::domain::DocumentId;
use crate::error::StoreResult;
use crate::metrics::Metrics;
use crate::models::ExtractionOutcome;
use crate::repositories::traits::DeedExtractor;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Image extensions picked up when a directory is passed for extraction.
pub const IMAGE_EXTENSIONS: &[&str] = &["tif", "tiff", "png", "jpg", "jpeg"];

/// What [`ExtractionStore::process`] did with an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// `<id>.json` already existed; nothing was called or written.
    Skipped(DocumentId),
    /// The extractor ran and its outcome was written to `path`.
    Stored {
        id: DocumentId,
        path: PathBuf,
        parse_failed: bool,
    },
}

/// File-backed store of extraction results, one `<id>.json` per document.
///
/// The presence of the file is the only processed marker. There is no locking,
/// so concurrent runs over the same directory are last-write-wins.
#[derive(Debug, Clone)]
pub struct ExtractionStore {
    output_dir: PathBuf,
    metrics: Metrics,
}

impl ExtractionStore {
    pub fn new(output_dir: impl Into<PathBuf>, metrics: Metrics) -> Self {
        Self {
            output_dir: output_dir.into(),
            metrics,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Document id of an image: its file name up to the first `.`.
    pub fn derive_id(image_path: &Path) -> StoreResult<DocumentId> {
        Ok(DocumentId::from_path(image_path)?)
    }

    pub fn record_path(&self, id: &DocumentId) -> PathBuf {
        self.output_dir.join(id.json_file_name())
    }

    /// True iff `<output_dir>/<id>.json` exists.
    pub fn is_processed(&self, id: &DocumentId) -> bool {
        self.record_path(id).is_file()
    }

    /// Write an outcome to `<output_dir>/<id>.json`, overwriting any existing
    /// record.
    ///
    /// The record is written to `<id>.json.tmp` and renamed into place, so a
    /// failed write never leaves a partial `<id>.json` behind.
    pub fn store(&self, id: &DocumentId, outcome: &ExtractionOutcome) -> StoreResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let path = self.record_path(id);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, to_pretty_json(outcome)?)?;
        fs::rename(&tmp_path, &path)?;

        tracing::info!("JSON saved in: {}", path.display());
        Ok(path)
    }

    /// Extract and store one image unless it has already been processed.
    ///
    /// Extractor errors propagate unchanged. A reply the parser could not use is
    /// stored as a failure record like any other outcome.
    pub fn process(
        &self,
        image_path: &Path,
        extractor: &dyn DeedExtractor,
    ) -> StoreResult<ProcessOutcome> {
        let id = Self::derive_id(image_path)?;

        if self.is_processed(&id) {
            tracing::info!("Skipping {}: already processed", id);
            self.metrics.record_skip();
            return Ok(ProcessOutcome::Skipped(id));
        }

        tracing::debug!("Extracting {} from {}", id, image_path.display());
        let outcome = extractor.extract_components(image_path)?;
        let parse_failed = outcome.is_failure();
        self.metrics.record_extraction(parse_failed);

        let path = self.store(&id, &outcome)?;
        Ok(ProcessOutcome::Stored {
            id,
            path,
            parse_failed,
        })
    }

    /// Run [`process`](Self::process) over every image in order, stopping at the
    /// first error.
    pub fn process_all(
        &self,
        image_paths: &[PathBuf],
        extractor: &dyn DeedExtractor,
    ) -> StoreResult<Vec<ProcessOutcome>> {
        image_paths
            .iter()
            .map(|path| self.process(path, extractor))
            .collect()
    }

    /// Read a stored record back, or `None` if the document was never processed.
    pub fn load(&self, id: &DocumentId) -> StoreResult<Option<ExtractionOutcome>> {
        let path = self.record_path(id);
        if !path.is_file() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
        Ok(Some(ExtractionOutcome::from_value(value)))
    }
}

/// Expand the given paths into the list of images to extract.
///
/// Files are kept as given. Directories contribute their image files (by
/// extension, case-insensitive, not recursive) sorted by name.
pub fn image_paths(inputs: &[PathBuf]) -> StoreResult<Vec<PathBuf>> {
    let mut images = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            images.push(input.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in fs::read_dir(input)? {
            let path = entry?.path();
            if path.is_file() && has_image_extension(&path) {
                found.push(path);
            }
        }
        found.sort();
        images.extend(found);
    }

    Ok(images)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

// Four-space indentation, non-ASCII kept as-is
fn to_pretty_json(outcome: &ExtractionOutcome) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    outcome.serialize(&mut serializer)?;
    Ok(buf)
}
