//! Extraction schema and the tagged result of parsing a model response.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};

/// Error message stored when a model response holds no usable JSON.
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse response";

/// Structured fields the model is asked to extract from a deed image.
///
/// The default value doubles as the JSON template embedded in the prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ExtractedDeed {
    pub document_text: String,
    pub document_type: String,
    pub grantors: Vec<String>,
    pub grantees: Vec<String>,
    pub legal_authorities: Vec<String>,
    pub property_description: PropertyDescription,
    pub geographical_references: GeographicalReferences,
    pub transaction_dates: TransactionDates,
}

/// Acreage, boundaries and lot details of the conveyed land.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PropertyDescription {
    pub acreage: String,
    pub boundaries: Vec<String>,
    pub lot_info: String,
}

/// Place names mentioned in the deed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GeographicalReferences {
    pub city: String,
    pub county: String,
    pub streets: Vec<String>,
}

/// Dates of the transaction as written in the deed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TransactionDates {
    pub execution_date: String,
    pub recording_date: String,
    pub other_dates: Vec<String>,
}

impl ExtractedDeed {
    /// Pretty JSON template of the schema, with every field empty.
    pub fn template() -> String {
        serde_json::to_string_pretty(&Self::default()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Result of parsing one model response.
///
/// A failed parse is data, not an error: it is persisted like a success, and
/// readers tell the two apart by the `error` key.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// JSON payload found in the response; not validated against the schema.
    Parsed(Value),

    /// No parseable JSON; the raw response is kept for later review.
    Failed { error: String, raw_response: String },
}

impl ExtractionOutcome {
    /// Failure record for an unparseable response.
    pub fn parse_failure(raw_response: impl Into<String>) -> Self {
        Self::Failed {
            error: PARSE_FAILURE_MESSAGE.to_string(),
            raw_response: raw_response.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The JSON document written to the output file.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Parsed(value) => value.clone(),
            Self::Failed {
                error,
                raw_response,
            } => json!({
                "error": error,
                "raw_response": raw_response,
            }),
        }
    }

    /// Rebuild an outcome from a stored JSON document.
    pub fn from_value(value: Value) -> Self {
        let error = value.get("error").and_then(Value::as_str);
        let raw = value.get("raw_response").and_then(Value::as_str);
        match (error, raw) {
            (Some(error), Some(raw)) => Self::Failed {
                error: error.to_string(),
                raw_response: raw.to_string(),
            },
            _ => Self::Parsed(value),
        }
    }

    /// Best-effort typed view of a parsed payload.
    ///
    /// Returns `None` for failures and for payloads that do not fit the schema.
    pub fn deed(&self) -> Option<ExtractedDeed> {
        match self {
            Self::Parsed(value) => serde_json::from_value(value.clone()).ok(),
            Self::Failed { .. } => None,
        }
    }
}

impl Serialize for ExtractionOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_lists_every_field() {
        let template: Value = serde_json::from_str(&ExtractedDeed::template()).unwrap();
        assert_eq!(template["grantors"], json!([]));
        assert_eq!(template["property_description"]["lot_info"], json!(""));
        assert_eq!(template["geographical_references"]["streets"], json!([]));
        assert_eq!(
            template["transaction_dates"]["other_dates"],
            json!([])
        );
    }

    #[test]
    fn test_failure_serializes_as_error_record() {
        let outcome = ExtractionOutcome::parse_failure("no json here");
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"error": "Failed to parse response", "raw_response": "no json here"})
        );
        assert!(outcome.is_failure());
        assert!(outcome.deed().is_none());
    }

    #[test]
    fn test_parsed_serializes_payload_unchanged() {
        let payload = json!({"document_type": "Deed", "extra": 1});
        let outcome = ExtractionOutcome::Parsed(payload.clone());
        assert_eq!(serde_json::to_value(&outcome).unwrap(), payload);
    }

    #[test]
    fn test_from_value_round_trips_failure() {
        let outcome = ExtractionOutcome::parse_failure("raw");
        assert_eq!(ExtractionOutcome::from_value(outcome.to_value()), outcome);
    }

    #[test]
    fn test_deed_view_tolerates_partial_payload() {
        let outcome = ExtractionOutcome::Parsed(json!({
            "document_type": "Deed of Sale",
            "grantors": ["John Penn"],
            "transaction_dates": {"execution_date": "March 3, 1755"}
        }));

        let deed = outcome.deed().unwrap();
        assert_eq!(deed.document_type, "Deed of Sale");
        assert_eq!(deed.grantors, vec!["John Penn".to_string()]);
        assert_eq!(deed.transaction_dates.execution_date, "March 3, 1755");
        assert!(deed.grantees.is_empty());
    }
}
