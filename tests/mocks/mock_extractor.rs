use deed_archive::error::{ApiError, ExtractionResult};
use deed_archive::extraction::parse_response;
use deed_archive::models::ExtractionOutcome;
use deed_archive::repositories::DeedExtractor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Extractor that answers every image with a scripted model reply.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockExtractor {
    reply: String,
    fail: bool,
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

#[allow(dead_code)]
impl MockExtractor {
    /// Reply text is run through the real response parser.
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every call fails as if the model API were down.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::replying("")
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl DeedExtractor for MockExtractor {
    fn extract_components(&self, image_path: &Path) -> ExtractionResult<ExtractionOutcome> {
        self.calls.lock().unwrap().push(image_path.to_path_buf());

        if self.fail {
            return Err(ApiError::RateLimitExceeded.into());
        }
        Ok(parse_response(&self.reply))
    }
}
