//! Federal highway police (PRF) `datatran<YEAR>.csv` accident rows.

use crate::error::FieldError;
use crate::normalize::{
    VICTIM_TYPE_TRANSLATIONS, month_name, parse_date, parse_decimal, parse_integer, text,
    translate,
};
use crate::parser::RawRecord;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// `data_inversa` is ISO in recent years; older exports use day-first dates.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

#[derive(Debug, Deserialize)]
pub struct RawHighwayRecord {
    pub data_inversa: Option<String>,
    pub uf: Option<String>,
    pub km: Option<String>,
    pub municipio: Option<String>,
    pub causa_acidente: Option<String>,
    pub tipo_acidente: Option<String>,
    pub classificacao_acidente: Option<String>,
    pub fase_dia: Option<String>,
    pub sentido_via: Option<String>,
    pub condicao_metereologica: Option<String>,
    pub tipo_pista: Option<String>,
    pub tracado_via: Option<String>,
    pub uso_solo: Option<String>,
    pub pessoas: Option<String>,
    pub mortos: Option<String>,
    pub feridos_leves: Option<String>,
    pub feridos_graves: Option<String>,
    pub ilesos: Option<String>,
    pub ignorados: Option<String>,
    pub feridos: Option<String>,
    pub veiculos: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl RawRecord for RawHighwayRecord {
    const COLUMNS: &'static [&'static str] = &[
        "data_inversa",
        "uf",
        "km",
        "municipio",
        "causa_acidente",
        "tipo_acidente",
        "classificacao_acidente",
        "fase_dia",
        "sentido_via",
        "condicao_metereologica",
        "tipo_pista",
        "tracado_via",
        "uso_solo",
        "pessoas",
        "mortos",
        "feridos_leves",
        "feridos_graves",
        "ilesos",
        "ignorados",
        "feridos",
        "veiculos",
        "latitude",
        "longitude",
    ];
}

/// One highway accident after normalization.
///
/// `translated_cause` stays `None` until the cause lookup is joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighwayAccident {
    pub date: Option<NaiveDate>,
    pub year: Option<i32>,
    pub month: Option<String>,
    pub state: Option<String>,
    pub km: Option<f64>,
    pub city: Option<String>,
    pub cause: Option<String>,
    pub translated_cause: Option<String>,
    #[serde(rename = "type")]
    pub accident_type: Option<String>,
    pub victim_type: Option<String>,
    pub day_part: Option<String>,
    pub road_slope: Option<String>,
    pub weather: Option<String>,
    pub track_type: Option<String>,
    pub road_type: Option<String>,
    pub area: Option<String>,
    pub people_involved: Option<u32>,
    pub dead: Option<u32>,
    pub slightly_injured: Option<u32>,
    pub seriously_injured: Option<u32>,
    pub uninjured: Option<u32>,
    pub injured: Option<u32>,
    pub ignored_individuals: Option<u32>,
    pub vehicles: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accident_occurred: u32,
}

impl HighwayAccident {
    pub fn from_raw(raw: &RawHighwayRecord, row: usize) -> Result<Self, FieldError> {
        let date = parse_date("data_inversa", row, raw.data_inversa.as_deref(), DATE_FORMATS)?;

        Ok(Self {
            date,
            year: date.map(|d| d.year()),
            month: date.map(month_name),
            state: text(raw.uf.as_deref()),
            km: parse_decimal("km", row, raw.km.as_deref())?,
            city: text(raw.municipio.as_deref()),
            cause: text(raw.causa_acidente.as_deref()),
            translated_cause: None,
            accident_type: text(raw.tipo_acidente.as_deref()),
            victim_type: text(raw.classificacao_acidente.as_deref())
                .map(|v| translate(VICTIM_TYPE_TRANSLATIONS, v)),
            day_part: text(raw.fase_dia.as_deref()),
            road_slope: text(raw.sentido_via.as_deref()),
            weather: text(raw.condicao_metereologica.as_deref()),
            track_type: text(raw.tipo_pista.as_deref()),
            road_type: text(raw.tracado_via.as_deref()),
            area: text(raw.uso_solo.as_deref()),
            people_involved: parse_integer("pessoas", row, raw.pessoas.as_deref())?,
            dead: parse_integer("mortos", row, raw.mortos.as_deref())?,
            slightly_injured: parse_integer("feridos_leves", row, raw.feridos_leves.as_deref())?,
            seriously_injured: parse_integer("feridos_graves", row, raw.feridos_graves.as_deref())?,
            uninjured: parse_integer("ilesos", row, raw.ilesos.as_deref())?,
            injured: parse_integer("feridos", row, raw.feridos.as_deref())?,
            ignored_individuals: parse_integer("ignorados", row, raw.ignorados.as_deref())?,
            vehicles: parse_integer("veiculos", row, raw.veiculos.as_deref())?,
            latitude: parse_decimal("latitude", row, raw.latitude.as_deref())?,
            longitude: parse_decimal("longitude", row, raw.longitude.as_deref())?,
            accident_occurred: 1,
        })
    }
}

pub fn normalize_highway(raw: &[RawHighwayRecord]) -> Result<Vec<HighwayAccident>, FieldError> {
    raw.iter()
        .enumerate()
        .map(|(i, r)| HighwayAccident::from_raw(r, i + 1))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn raw_record() -> RawHighwayRecord {
        RawHighwayRecord {
            data_inversa: Some("2018-12-24".into()),
            uf: Some("MG".into()),
            km: Some("532,8".into()),
            municipio: Some("BETIM".into()),
            causa_acidente: Some("Falta de Atenção à Condução".into()),
            tipo_acidente: Some("Colisão traseira".into()),
            classificacao_acidente: Some("Com Vítimas Feridas".into()),
            fase_dia: Some("Pleno dia".into()),
            sentido_via: Some("Crescente".into()),
            condicao_metereologica: Some("Céu Claro".into()),
            tipo_pista: Some("Dupla".into()),
            tracado_via: Some("Reta".into()),
            uso_solo: Some("Sim".into()),
            pessoas: Some("3".into()),
            mortos: Some("0".into()),
            feridos_leves: Some("1".into()),
            feridos_graves: Some("0".into()),
            ilesos: Some("2".into()),
            ignorados: Some("0".into()),
            feridos: Some("1".into()),
            veiculos: Some("2".into()),
            latitude: Some("-19,96".into()),
            longitude: Some("-44,19".into()),
        }
    }

    #[test]
    fn test_from_raw_maps_columns() {
        let a = HighwayAccident::from_raw(&raw_record(), 1).unwrap();

        assert_eq!(a.date, NaiveDate::from_ymd_opt(2018, 12, 24));
        assert_eq!(a.year, Some(2018));
        assert_eq!(a.month.as_deref(), Some("December"));
        assert_eq!(a.km, Some(532.8));
        assert_eq!(a.victim_type.as_deref(), Some("Injured victims"));
        assert_eq!(a.people_involved, Some(3));
        assert_eq!(a.uninjured, Some(2));
        assert_eq!(a.injured, Some(1));
        assert_eq!(a.latitude, Some(-19.96));
        assert_eq!(a.longitude, Some(-44.19));
        assert_eq!(a.translated_cause, None);
    }

    #[test]
    fn test_day_first_date_is_accepted() {
        let mut raw = raw_record();
        raw.data_inversa = Some("24/12/2018".into());
        let a = HighwayAccident::from_raw(&raw, 1).unwrap();
        assert_eq!(a.date, NaiveDate::from_ymd_opt(2018, 12, 24));
    }

    #[test]
    fn test_unknown_victim_type_passes_through() {
        let mut raw = raw_record();
        raw.classificacao_acidente = Some("Ignorado".into());
        let a = HighwayAccident::from_raw(&raw, 1).unwrap();
        assert_eq!(a.victim_type.as_deref(), Some("Ignorado"));
    }

    #[test]
    fn test_malformed_count_is_error() {
        let mut raw = raw_record();
        raw.mortos = Some("um".into());
        let err = normalize_highway(&[raw]).unwrap_err();
        assert_eq!(
            err,
            FieldError::InvalidNumber {
                column: "mortos",
                row: 1,
                value: "um".into()
            }
        );
    }
}
