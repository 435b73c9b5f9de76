//! Row predicates applied between normalization and enrichment.
//!
//! Every filter consumes the table and returns the surviving rows in their
//! original order, so the row index stays contiguous from zero.

use crate::normalize::city::CityLocation;
use crate::normalize::fatal::FatalAccident;
use crate::normalize::highway::HighwayAccident;
use anyhow::Result;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Latitude bounds, exclusive.
pub const LATITUDE_RANGE: (f64, f64) = (-34.0, 6.0);
/// Longitude bounds, exclusive.
pub const LONGITUDE_RANGE: (f64, f64) = (-74.0, -34.0);

/// Rows that declare which of their columns must be present.
pub trait Complete {
    /// Name of the first required column that is missing, if any.
    fn missing_required(&self) -> Option<&'static str>;
}

impl Complete for FatalAccident {
    fn missing_required(&self) -> Option<&'static str> {
        if self.city.is_none() {
            Some("city")
        } else if self.date.is_none() {
            Some("date")
        } else if self.date_birth.is_none() {
            Some("date_birth")
        } else if self.sex.is_none() {
            Some("sex")
        } else {
            None
        }
    }
}

impl Complete for HighwayAccident {
    fn missing_required(&self) -> Option<&'static str> {
        if self.date.is_none() {
            Some("date")
        } else if self.city.is_none() {
            Some("city")
        } else if self.state.is_none() {
            Some("state")
        } else {
            None
        }
    }
}

/// Rows with a coordinate pair to sanity-check.
pub trait Located {
    fn coordinates(&self) -> Option<(f64, f64)>;
}

impl Located for HighwayAccident {
    fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

impl Located for CityLocation {
    fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.city_latitude?, self.city_longitude?))
    }
}

fn log_removed(filter: &str, before: usize, after: usize) {
    debug!(filter, removed = before - after, remaining = after, "Filter applied");
}

/// Drops rows missing any required column.
pub fn drop_incomplete<T: Complete>(rows: Vec<T>) -> Vec<T> {
    restrict(rows, "drop_incomplete", |r| r.missing_required().is_none())
}

/// Keeps rows whose coordinates fall strictly inside the national bounds.
/// Rows without coordinates are dropped.
pub fn within_bounds<T: Located>(rows: Vec<T>) -> Vec<T> {
    restrict(rows, "within_bounds", |r| {
        r.coordinates().is_some_and(|(lat, lon)| {
            lat > LATITUDE_RANGE.0
                && lat < LATITUDE_RANGE.1
                && lon > LONGITUDE_RANGE.0
                && lon < LONGITUDE_RANGE.1
        })
    })
}

/// Keeps rows matching `keep`.
pub fn restrict<T>(rows: Vec<T>, filter: &str, keep: impl Fn(&T) -> bool) -> Vec<T> {
    let before = rows.len();
    let kept: Vec<T> = rows.into_iter().filter(|r| keep(r)).collect();
    log_removed(filter, before, kept.len());
    kept
}

/// Removes identical rows, keeping the first occurrence of each.
///
/// Rows are compared by their serialized form, so two rows are duplicates
/// exactly when they would be written out identically.
pub fn dedup_rows<T: Serialize>(rows: Vec<T>) -> Result<Vec<T>> {
    let before = rows.len();
    let mut seen = HashSet::with_capacity(before);
    let mut kept = Vec::with_capacity(before);

    for row in rows {
        if seen.insert(serde_json::to_string(&row)?) {
            kept.push(row);
        }
    }

    log_removed("dedup_rows", before, kept.len());
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::highway::{HighwayAccident, tests::raw_record};

    fn highway(lat: Option<f64>, lon: Option<f64>) -> HighwayAccident {
        let mut a = HighwayAccident::from_raw(&raw_record(), 1).unwrap();
        a.latitude = lat;
        a.longitude = lon;
        a
    }

    fn fatal(city: Option<&str>, sex: Option<&str>) -> FatalAccident {
        FatalAccident {
            date: chrono::NaiveDate::from_ymd_opt(2020, 1, 1),
            year: Some(2020),
            month: Some("January".into()),
            date_birth: chrono::NaiveDate::from_ymd_opt(1990, 1, 1),
            age: Some(30),
            sex: sex.map(Into::into),
            city: city.map(Into::into),
            accident_occurred: 1,
            id_accident_cause: None,
            desc_accident_cause: None,
        }
    }

    #[test]
    fn test_drop_incomplete_fatal() {
        let rows = vec![
            fatal(Some("Contagem"), Some("Male")),
            fatal(None, Some("Male")),
            fatal(Some("Betim"), None),
        ];
        let kept = drop_incomplete(rows);

        assert_eq!(kept.len(), 1);
        assert!(kept.iter().all(|r| r.city.is_some() && r.date_birth.is_some() && r.sex.is_some()));
    }

    #[test]
    fn test_missing_required_names_column() {
        let mut row = fatal(Some("Contagem"), Some("Male"));
        row.date_birth = None;
        assert_eq!(row.missing_required(), Some("date_birth"));
    }

    #[test]
    fn test_within_bounds_is_exclusive() {
        let rows = vec![
            highway(Some(-19.9), Some(-43.9)),
            highway(Some(-34.0), Some(-43.9)),
            highway(Some(-19.9), Some(-34.0)),
            highway(Some(6.0), Some(-50.0)),
            highway(Some(-19.9), Some(-74.5)),
            highway(None, Some(-43.9)),
        ];
        let kept = within_bounds(rows);

        assert_eq!(kept.len(), 1);
        for r in &kept {
            let (lat, lon) = r.coordinates().unwrap();
            assert!(lat > -34.0 && lat < 6.0);
            assert!(lon > -74.0 && lon < -34.0);
        }
    }

    #[test]
    fn test_restrict_keeps_order() {
        let rows = vec![1, 2, 3, 4, 5, 6];
        assert_eq!(restrict(rows, "even", |n| n % 2 == 0), vec![2, 4, 6]);
    }

    #[test]
    fn test_dedup_rows_keeps_first_occurrence() {
        let rows = vec![
            fatal(Some("Contagem"), Some("Male")),
            fatal(Some("Betim"), Some("Male")),
            fatal(Some("Contagem"), Some("Male")),
        ];
        let kept = dedup_rows(rows).unwrap();

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].city.as_deref(), Some("Contagem"));
        assert_eq!(kept[1].city.as_deref(), Some("Betim"));
    }
}
