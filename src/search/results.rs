//! Plain-text rendering of search hits.

use crate::models::DeedHit;
use std::path::Path;

const MISSING: &str = "N/A";

/// Labelled fields shown for each hit, in display order.
const DISPLAY_FIELDS: [(&str, &str); 10] = [
    ("Document Type", "document_type"),
    ("Grantors", "grantors"),
    ("Grantees", "grantees"),
    ("Legal Authorities", "legal_authorities"),
    ("Acreage", "acreage"),
    ("Lot Information", "lot_info"),
    ("City", "city"),
    ("County", "county"),
    ("Execution Date", "execution_date"),
    ("Recording Date", "recording_date"),
];

/// Path of the scan displayed next to a hit: `<image_dir>/<id>.TIF`.
pub fn image_path(image_dir: &Path, document_id: &str) -> String {
    image_dir
        .join(format!("{}.TIF", document_id))
        .display()
        .to_string()
}

/// Render one hit with its image path, every display field and the full text.
pub fn render_hit(hit: &DeedHit, image_dir: &Path) -> String {
    let id = hit.document_id();
    let field_or_missing = |field: &str| hit.field(field).unwrap_or_else(|| MISSING.to_string());

    let mut out = format!(
        "Document ID: {}\nImage: {}\n",
        id,
        image_path(image_dir, id)
    );
    for (label, field) in DISPLAY_FIELDS {
        out.push_str(&format!("{}: {}\n", label, field_or_missing(field)));
    }
    out.push_str(&format!(
        "Document Text:\n{}\n",
        field_or_missing("document_text")
    ));

    out
}

/// Render a whole result list, or "No results found." when it is empty.
pub fn render_hits(hits: &[DeedHit], image_dir: &Path) -> String {
    if hits.is_empty() {
        return "No results found.\n".to_string();
    }

    let mut out = format!("{} Results Found:\n", hits.len());
    for hit in hits {
        out.push('\n');
        out.push_str(&render_hit(hit, image_dir));
    }
    out
}
