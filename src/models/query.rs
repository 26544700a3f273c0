//! Search query specification: the fields a user may search and how.

use crate::domain::DeedDate;
use std::fmt;
use std::str::FromStr;

/// Searchable fields offered by the search surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchField {
    #[default]
    FullText,
    Grantors,
    Grantees,
    DocumentType,
    City,
    County,
    ExecutionDate,
    RecordingDate,
}

impl SearchField {
    /// Every field, in the order the search surface lists them.
    pub const ALL: [SearchField; 8] = [
        SearchField::FullText,
        SearchField::Grantors,
        SearchField::Grantees,
        SearchField::DocumentType,
        SearchField::City,
        SearchField::County,
        SearchField::ExecutionDate,
        SearchField::RecordingDate,
    ];

    /// Label shown to users.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FullText => "Full Text",
            Self::Grantors => "Grantors",
            Self::Grantees => "Grantees",
            Self::DocumentType => "Document Type",
            Self::City => "City",
            Self::County => "County",
            Self::ExecutionDate => "Execution Date",
            Self::RecordingDate => "Recording Date",
        }
    }

    /// Name of the underlying index field.
    pub fn index_field(&self) -> &'static str {
        match self {
            Self::FullText => "document_text",
            Self::Grantors => "grantors",
            Self::Grantees => "grantees",
            Self::DocumentType => "document_type",
            Self::City => "city",
            Self::County => "county",
            Self::ExecutionDate => "execution_date",
            Self::RecordingDate => "recording_date",
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Self::ExecutionDate | Self::RecordingDate)
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accepts either the display label ("Execution Date") or the index field
/// name ("execution_date"), case-insensitively. Hyphens count as spaces.
impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|field| {
                field.display_name().to_lowercase() == wanted
                    || field.index_field().replace('_', " ") == wanted
            })
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|f| f.display_name()).collect();
                format!("Unknown search field '{}'; expected one of: {}", s, names.join(", "))
            })
    }
}

/// How the search term is matched against the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Analyzed full-text match.
    #[default]
    Exact,
    /// Edit-distance tolerant match.
    Fuzzy,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" | "match" => Ok(Self::Exact),
            "fuzzy" | "fuzzy match" => Ok(Self::Fuzzy),
            other => Err(format!(
                "Unknown match mode '{}'; expected 'exact' or 'fuzzy'",
                other
            )),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Fuzzy => f.write_str("fuzzy"),
        }
    }
}

/// One search action. Rebuilt for every search; never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuerySpec {
    pub term: String,
    pub field: SearchField,
    pub start_date: Option<DeedDate>,
    pub end_date: Option<DeedDate>,
    pub mode: MatchMode,
}

impl QuerySpec {
    pub fn new(term: impl Into<String>, field: SearchField, mode: MatchMode) -> Self {
        Self {
            term: term.into(),
            field,
            mode,
            ..Default::default()
        }
    }

    pub fn with_dates(mut self, start_date: Option<DeedDate>, end_date: Option<DeedDate>) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    pub fn has_date_filter(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}
