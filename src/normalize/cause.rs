//! Accident-cause translation lookup file.

use crate::normalize::text;
use crate::parser::RawRecord;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RawCauseTranslation {
    pub cause: Option<String>,
    pub translated_cause: Option<String>,
}

impl RawRecord for RawCauseTranslation {
    const COLUMNS: &'static [&'static str] = &["cause", "translated_cause"];
}

/// Raw PRF cause string and its readable label.
#[derive(Debug, Clone, PartialEq)]
pub struct CauseTranslation {
    pub cause: String,
    pub translated_cause: String,
}

/// Keeps only complete lookup rows. Keys are compared verbatim (after trimming)
/// against the highway `cause` column.
pub fn normalize_causes(raw: &[RawCauseTranslation]) -> Vec<CauseTranslation> {
    raw.iter()
        .filter_map(|r| {
            Some(CauseTranslation {
                cause: text(r.cause.as_deref())?,
                translated_cause: text(r.translated_cause.as_deref())?,
            })
        })
        .collect()
}
