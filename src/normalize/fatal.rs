//! Deaths in land-transport accidents, as published by the MG open-data portal.

use crate::error::FieldError;
use crate::normalize::{SEX_TRANSLATIONS, month_name, parse_date, parse_integer, text, translate};
use crate::parser::RawRecord;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%d/%m/%Y";

/// A row of `dados_acidentes_terrestres.csv` restricted to the columns we read.
#[derive(Debug, Deserialize)]
pub struct RawDeathRecord {
    pub dt_obito: Option<String>,
    pub dt_nascimento: Option<String>,
    pub nu_idade: Option<String>,
    pub sg_sexo: Option<String>,
    pub co_municipio_ibge_ocorrencia: Option<String>,
    pub co_cid_causa_basica: Option<String>,
    pub desc_cid_causa_basica: Option<String>,
}

impl RawRecord for RawDeathRecord {
    const COLUMNS: &'static [&'static str] = &[
        "dt_obito",
        "dt_nascimento",
        "nu_idade",
        "sg_sexo",
        "co_municipio_ibge_ocorrencia",
        "co_cid_causa_basica",
        "desc_cid_causa_basica",
    ];
}

/// One accident-linked death after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatalAccident {
    pub date: Option<NaiveDate>,
    pub year: Option<i32>,
    pub month: Option<String>,
    pub date_birth: Option<NaiveDate>,
    pub age: Option<u32>,
    pub sex: Option<String>,
    pub city: Option<String>,
    pub accident_occurred: u32,
    pub id_accident_cause: Option<String>,
    pub desc_accident_cause: Option<String>,
}

impl FatalAccident {
    /// Converts a raw row; `row` is its 1-based position in the source.
    pub fn from_raw(raw: &RawDeathRecord, row: usize) -> Result<Self, FieldError> {
        let date = parse_date("dt_obito", row, raw.dt_obito.as_deref(), &[DATE_FORMAT])?;
        let date_birth = parse_date("dt_nascimento", row, raw.dt_nascimento.as_deref(), &[DATE_FORMAT])?;

        Ok(Self {
            date,
            year: date.map(|d| d.year()),
            month: date.map(month_name),
            date_birth,
            age: parse_integer("nu_idade", row, raw.nu_idade.as_deref())?,
            sex: text(raw.sg_sexo.as_deref()).map(|s| translate(SEX_TRANSLATIONS, s)),
            city: text(raw.co_municipio_ibge_ocorrencia.as_deref()),
            accident_occurred: 1,
            id_accident_cause: text(raw.co_cid_causa_basica.as_deref()),
            desc_accident_cause: text(raw.desc_cid_causa_basica.as_deref()),
        })
    }
}

/// Normalizes every raw death row, failing on the first malformed cell.
pub fn normalize_deaths(raw: &[RawDeathRecord]) -> Result<Vec<FatalAccident>, FieldError> {
    raw.iter()
        .enumerate()
        .map(|(i, r)| FatalAccident::from_raw(r, i + 1))
        .collect()
}
