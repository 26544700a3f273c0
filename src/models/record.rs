//! Flat deed records: the reviewed CSV row and the document stored in the index.

use crate::domain::DeedDate;
use serde::{Deserialize, Serialize};

/// One row of the reviewed deed dataset, keyed by its CSV column headers.
///
/// Every cell is optional; blanks and missing columns come through as `None`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct DeedRow {
    #[serde(rename = "Document ID")]
    pub document_id: Option<String>,
    #[serde(rename = "Document Text")]
    pub document_text: Option<String>,
    #[serde(rename = "Document Type")]
    pub document_type: Option<String>,
    #[serde(rename = "Grantors")]
    pub grantors: Option<String>,
    #[serde(rename = "Grantees")]
    pub grantees: Option<String>,
    #[serde(rename = "Legal Authorities")]
    pub legal_authorities: Option<String>,
    #[serde(rename = "Acreage")]
    pub acreage: Option<String>,
    #[serde(rename = "Boundaries")]
    pub boundaries: Option<String>,
    #[serde(rename = "Lot Info")]
    pub lot_info: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "County")]
    pub county: Option<String>,
    #[serde(rename = "Province/Colony")]
    pub province_colony: Option<String>,
    #[serde(rename = "Execution Date")]
    pub execution_date: Option<String>,
    #[serde(rename = "Recording Date")]
    pub recording_date: Option<String>,
}

/// A deed as stored in the search index.
///
/// Text fields are never absent (blank cells become `""`); dates are `null`
/// when the transcription could not be normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IndexedDeed {
    pub document_id: String,
    pub document_text: String,
    pub document_type: String,
    pub grantors: String,
    pub grantees: String,
    pub legal_authorities: String,
    pub acreage: String,
    pub boundaries: String,
    pub lot_info: String,
    pub city: String,
    pub county: String,
    pub province_colony: String,
    pub execution_date: Option<String>,
    pub recording_date: Option<String>,
}

impl From<DeedRow> for IndexedDeed {
    fn from(row: DeedRow) -> Self {
        let normalize = |cell: Option<String>| {
            cell.as_deref()
                .and_then(DeedDate::normalize)
                .map(|date| date.to_string())
        };

        Self {
            document_id: row.document_id.unwrap_or_default(),
            document_text: row.document_text.unwrap_or_default(),
            document_type: row.document_type.unwrap_or_default(),
            grantors: row.grantors.unwrap_or_default(),
            grantees: row.grantees.unwrap_or_default(),
            legal_authorities: row.legal_authorities.unwrap_or_default(),
            acreage: row.acreage.unwrap_or_default(),
            boundaries: row.boundaries.unwrap_or_default(),
            lot_info: row.lot_info.unwrap_or_default(),
            city: row.city.unwrap_or_default(),
            county: row.county.unwrap_or_default(),
            province_colony: row.province_colony.unwrap_or_default(),
            execution_date: normalize(row.execution_date),
            recording_date: normalize(row.recording_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_normalizes_dates_and_blanks() {
        let row = DeedRow {
            document_id: Some("B-12".to_string()),
            grantors: Some("William Allen".to_string()),
            execution_date: Some("March 3, 1755".to_string()),
            recording_date: Some("Not specified".to_string()),
            ..Default::default()
        };

        let deed = IndexedDeed::from(row);
        assert_eq!(deed.document_id, "B-12");
        assert_eq!(deed.grantors, "William Allen");
        assert_eq!(deed.grantees, "");
        assert_eq!(deed.execution_date.as_deref(), Some("1755-03-03"));
        assert_eq!(deed.recording_date, None);
    }

    #[test]
    fn test_indexed_deed_serializes_missing_dates_as_null() {
        let deed = IndexedDeed {
            document_id: "B-1".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&deed).unwrap();
        assert_eq!(value["execution_date"], json!(null));
        assert_eq!(value["province_colony"], json!(""));
    }
}
