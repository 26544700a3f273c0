mod extraction_store;
mod traits;

pub use extraction_store::{image_paths, ExtractionStore, ProcessOutcome, IMAGE_EXTENSIONS};
pub use traits::{DeedExtractor, SearchIndex};
