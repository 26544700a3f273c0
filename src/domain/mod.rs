//! Domain value objects and types.
//!
//! Type-safe wrappers for the document identifier and deed dates. These value
//! objects validate at construction time so invalid keys never reach the
//! filesystem or the index.

pub mod deed_date;
pub mod document_id;
pub mod errors;

pub use deed_date::DeedDate;
pub use document_id::DocumentId;
pub use errors::ValidationError;
