//! Test doubles for the crate's extractor and search index traits.

pub mod mock_extractor;
pub mod mock_search_index;

#[allow(unused_imports)]
pub use mock_extractor::MockExtractor;
#[allow(unused_imports)]
pub use mock_search_index::MockSearchIndex;
