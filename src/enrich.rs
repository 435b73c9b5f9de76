//! Joins between the accident tables and their reference tables, and the
//! city/year summary view built on top of the joined rows.

use crate::filter::dedup_rows;
use crate::normalize::cause::CauseTranslation;
use crate::normalize::city::CityLocation;
use crate::normalize::fatal::FatalAccident;
use crate::normalize::highway::HighwayAccident;
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// A fatal accident joined with the geolocation of its city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedFatalAccident {
    pub date: Option<NaiveDate>,
    pub year: Option<i32>,
    pub month: Option<String>,
    pub date_birth: Option<NaiveDate>,
    pub age: Option<u32>,
    pub sex: Option<String>,
    pub city: String,
    pub accident_occurred: u32,
    pub id_accident_cause: Option<String>,
    pub desc_accident_cause: Option<String>,
    pub city_code: Option<u32>,
    pub city_latitude: Option<f64>,
    pub city_longitude: Option<f64>,
}

impl LocatedFatalAccident {
    fn new(accident: &FatalAccident, city: String, location: &CityLocation) -> Self {
        Self {
            date: accident.date,
            year: accident.year,
            month: accident.month.clone(),
            date_birth: accident.date_birth,
            age: accident.age,
            sex: accident.sex.clone(),
            city,
            accident_occurred: accident.accident_occurred,
            id_accident_cause: accident.id_accident_cause.clone(),
            desc_accident_cause: accident.desc_accident_cause.clone(),
            city_code: location.city_code,
            city_latitude: location.city_latitude,
            city_longitude: location.city_longitude,
        }
    }
}

/// Number of accidents for one city in one year, with the city's coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityYearSummary {
    pub city: String,
    pub year: i32,
    pub total_traffic_accidents: usize,
    pub city_code: Option<u32>,
    pub city_latitude: Option<f64>,
    pub city_longitude: Option<f64>,
}

/// Inner join on `city`. Accidents whose city has no reference row are dropped;
/// a city listed more than once yields one output row per reference row.
pub fn join_cities(
    accidents: &[FatalAccident],
    cities: &[CityLocation],
) -> Result<Vec<LocatedFatalAccident>> {
    let mut index: HashMap<&str, Vec<&CityLocation>> = HashMap::new();
    for location in cities {
        if let Some(name) = location.city.as_deref() {
            index.entry(name).or_default().push(location);
        }
    }

    let mut joined = Vec::with_capacity(accidents.len());
    let mut unmatched = 0usize;
    for accident in accidents {
        let matches = accident.city.as_deref().and_then(|c| index.get(c));
        match matches {
            Some(locations) => {
                for location in locations {
                    let city = accident.city.clone().unwrap_or_default();
                    joined.push(LocatedFatalAccident::new(accident, city, location));
                }
            }
            None => unmatched += 1,
        }
    }

    info!(joined = joined.len(), unmatched, "Joined accidents with city locations");
    dedup_rows(joined)
}

/// Left join on `cause`. Accidents without a translation are kept with
/// `translated_cause = None`.
pub fn translate_causes(
    accidents: Vec<HighwayAccident>,
    translations: &[CauseTranslation],
) -> Result<Vec<HighwayAccident>> {
    let mut index: HashMap<&str, Vec<&str>> = HashMap::new();
    for t in translations {
        index
            .entry(t.cause.as_str())
            .or_default()
            .push(t.translated_cause.as_str());
    }

    let mut joined = Vec::with_capacity(accidents.len());
    let mut untranslated = 0usize;
    for accident in accidents {
        let matches = accident.cause.as_deref().and_then(|c| index.get(c));
        match matches {
            Some(labels) => {
                for label in labels {
                    let mut row = accident.clone();
                    row.translated_cause = Some((*label).to_string());
                    joined.push(row);
                }
            }
            None => {
                untranslated += 1;
                joined.push(accident);
            }
        }
    }

    info!(rows = joined.len(), untranslated, "Joined accidents with cause translations");
    dedup_rows(joined)
}

/// Counts accidents per `(city, year)` and attaches each city's coordinates.
///
/// Rows without a year are not counted. Output is ordered by city, then year.
pub fn city_year_summary(rows: &[LocatedFatalAccident]) -> Result<Vec<CityYearSummary>> {
    let mut counts: BTreeMap<(&str, i32), usize> = BTreeMap::new();
    let mut locations: HashMap<&str, Vec<(Option<u32>, Option<f64>, Option<f64>)>> = HashMap::new();

    for row in rows {
        if let Some(year) = row.year {
            *counts.entry((row.city.as_str(), year)).or_default() += 1;
        }
        let attrs = (row.city_code, row.city_latitude, row.city_longitude);
        let known = locations.entry(row.city.as_str()).or_default();
        if !known.contains(&attrs) {
            known.push(attrs);
        }
    }

    let mut summary = Vec::with_capacity(counts.len());
    for ((city, year), total) in counts {
        for (city_code, city_latitude, city_longitude) in locations.get(city).into_iter().flatten() {
            summary.push(CityYearSummary {
                city: city.to_string(),
                year,
                total_traffic_accidents: total,
                city_code: *city_code,
                city_latitude: *city_latitude,
                city_longitude: *city_longitude,
            });
        }
    }

    dedup_rows(summary)
}

/// Highway variant of [`city_year_summary`]: there is no city reference table,
/// so the coordinates are the mean of the accident coordinates for that city.
pub fn highway_city_year_summary(rows: &[HighwayAccident]) -> Result<Vec<CityYearSummary>> {
    let mut counts: BTreeMap<(&str, i32), usize> = BTreeMap::new();
    let mut coords: HashMap<&str, (f64, f64, usize)> = HashMap::new();

    for row in rows {
        let Some(city) = row.city.as_deref() else {
            continue;
        };
        if let Some(year) = row.year {
            *counts.entry((city, year)).or_default() += 1;
        }
        if let (Some(lat), Some(lon)) = (row.latitude, row.longitude) {
            let acc = coords.entry(city).or_insert((0.0, 0.0, 0));
            acc.0 += lat;
            acc.1 += lon;
            acc.2 += 1;
        }
    }

    let summary = counts
        .into_iter()
        .map(|((city, year), total)| {
            let mean = coords
                .get(city)
                .map(|(lat, lon, n)| (*lat / *n as f64, *lon / *n as f64));
            CityYearSummary {
                city: city.to_string(),
                year,
                total_traffic_accidents: total,
                city_code: None,
                city_latitude: mean.map(|m| m.0),
                city_longitude: mean.map(|m| m.1),
            }
        })
        .collect();

    dedup_rows(summary)
}
