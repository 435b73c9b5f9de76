//! City geolocation reference table (`latitude-longitude-cidades.csv`).

use crate::error::FieldError;
use crate::normalize::{parse_decimal, parse_integer, text};
use crate::parser::RawRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RawCityLocation {
    pub municipio: Option<String>,
    pub id_municipio: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub uf: Option<String>,
}

impl RawRecord for RawCityLocation {
    const COLUMNS: &'static [&'static str] =
        &["municipio", "id_municipio", "latitude", "longitude", "uf"];
}

/// Normalized city reference row. `state` is only used for filtering and is
/// not written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityLocation {
    pub city: Option<String>,
    pub city_code: Option<u32>,
    pub city_latitude: Option<f64>,
    pub city_longitude: Option<f64>,
    #[serde(skip)]
    pub state: Option<String>,
}

impl CityLocation {
    pub fn from_raw(raw: &RawCityLocation, row: usize) -> Result<Self, FieldError> {
        Ok(Self {
            city: text(raw.municipio.as_deref()),
            city_code: parse_integer("id_municipio", row, raw.id_municipio.as_deref())?,
            city_latitude: parse_decimal("latitude", row, raw.latitude.as_deref())?,
            city_longitude: parse_decimal("longitude", row, raw.longitude.as_deref())?,
            state: text(raw.uf.as_deref()),
        })
    }
}

pub fn normalize_cities(raw: &[RawCityLocation]) -> Result<Vec<CityLocation>, FieldError> {
    raw.iter()
        .enumerate()
        .map(|(i, r)| CityLocation::from_raw(r, i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_belo_horizonte_row() {
        let raw = RawCityLocation {
            municipio: Some("Belo Horizonte".into()),
            id_municipio: Some("3106200".into()),
            latitude: Some("-19,92".into()),
            longitude: Some("-43,94".into()),
            uf: Some("MG".into()),
        };

        let city = CityLocation::from_raw(&raw, 1).unwrap();
        assert_eq!(city.city.as_deref(), Some("Belo Horizonte"));
        assert_eq!(city.city_code, Some(3106200));
        assert_eq!(city.city_latitude, Some(-19.92));
        assert_eq!(city.city_longitude, Some(-43.94));
        assert_eq!(city.state.as_deref(), Some("MG"));
    }

    #[test]
    fn test_bad_code_names_column() {
        let raw = RawCityLocation {
            municipio: Some("Contagem".into()),
            id_municipio: Some("31x".into()),
            latitude: None,
            longitude: None,
            uf: Some("MG".into()),
        };
        let err = normalize_cities(&[raw]).unwrap_err();
        assert!(err.to_string().contains("id_municipio"));
    }
}
