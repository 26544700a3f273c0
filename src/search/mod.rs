//! Deed search: query construction and result rendering.

pub mod query_builder;
pub mod results;

pub use query_builder::{build_query, date_filter_field};
pub use results::{image_path, render_hit, render_hits};
