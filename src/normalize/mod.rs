//! Column renaming, type coercion and categorical translation.
//!
//! Each submodule pairs the raw row shape of one source with the normalized
//! row it becomes. The helpers here are shared cell conversions: empty cells
//! become `None`, malformed non-empty cells become a [`FieldError`].

pub mod cause;
pub mod city;
pub mod fatal;
pub mod highway;

use crate::error::FieldError;
use chrono::NaiveDate;
use std::str::FromStr;

/// Portuguese sex labels as published by the MG open-data portal.
pub static SEX_TRANSLATIONS: &[(&str, &str)] = &[("Masculino", "Male"), ("Feminino", "Female")];

/// PRF `classificacao_acidente` values.
pub static VICTIM_TYPE_TRANSLATIONS: &[(&str, &str)] = &[
    ("Com Vítimas Feridas", "Injured victims"),
    ("Sem Vítimas", "No victims"),
    ("Com Vítimas Fatais", "Fatal injured victims"),
];

/// Treats empty or whitespace-only cells as missing.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Looks `value` up in `table`; values without an entry pass through unchanged.
pub fn translate(table: &[(&str, &str)], value: String) -> String {
    table
        .iter()
        .find(|(from, _)| *from == value)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or(value)
}

/// Parses a date trying each format in order.
pub fn parse_date(
    column: &'static str,
    row: usize,
    value: Option<&str>,
    formats: &[&str],
) -> Result<Option<NaiveDate>, FieldError> {
    let Some(value) = present(value) else {
        return Ok(None);
    };

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .map(Some)
        .ok_or_else(|| FieldError::InvalidDate {
            column,
            row,
            value: value.to_string(),
        })
}

/// Parses a number written with a decimal comma (`"-19,92"`).
///
/// `NaN` and infinities are rejected even though `f64::from_str` accepts them.
pub fn parse_decimal(
    column: &'static str,
    row: usize,
    value: Option<&str>,
) -> Result<Option<f64>, FieldError> {
    let Some(value) = present(value) else {
        return Ok(None);
    };

    value
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| FieldError::InvalidNumber {
            column,
            row,
            value: value.to_string(),
        })
}

/// Parses an integer cell such as a person count or an IBGE city code.
pub fn parse_integer<T: FromStr>(
    column: &'static str,
    row: usize,
    value: Option<&str>,
) -> Result<Option<T>, FieldError> {
    let Some(value) = present(value) else {
        return Ok(None);
    };

    value
        .parse::<T>()
        .map(Some)
        .map_err(|_| FieldError::InvalidNumber {
            column,
            row,
            value: value.to_string(),
        })
}

/// Trimmed, non-empty copy of a text cell.
pub fn text(value: Option<&str>) -> Option<String> {
    present(value).map(str::to_string)
}

/// English month name, e.g. `"January"`.
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}
