//! Cell-level conversion errors raised while normalizing raw rows.

use thiserror::Error;

/// A single cell that could not be converted into its target type.
///
/// `row` is the 1-based data row within its source, header excluded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("column `{column}` row {row}: `{value}` is not a valid date")]
    InvalidDate {
        column: &'static str,
        row: usize,
        value: String,
    },

    #[error("column `{column}` row {row}: `{value}` is not a valid number")]
    InvalidNumber {
        column: &'static str,
        row: usize,
        value: String,
    },
}
