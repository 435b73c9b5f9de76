//! Delimited-text decoding for the raw accident and reference sources.

use anyhow::{Context, Result, bail};
use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Field delimiter and text encoding of one source file.
#[derive(Debug, Clone, Copy)]
pub struct SourceFormat {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
}

impl SourceFormat {
    /// `;`-separated UTF-8, used by the MG open-data portal and the city table.
    pub fn semicolon_utf8() -> Self {
        Self {
            delimiter: b';',
            encoding: encoding_rs::UTF_8,
        }
    }

    /// `;`-separated Latin-1, used by the PRF `datatran` yearly files.
    pub fn semicolon_latin1() -> Self {
        Self {
            delimiter: b';',
            encoding: encoding_rs::WINDOWS_1252,
        }
    }

    /// Plain comma-separated UTF-8.
    pub fn comma_utf8() -> Self {
        Self {
            delimiter: b',',
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// A raw row shape deserialized straight from a source header.
///
/// `COLUMNS` lists every header the row reads; a source missing one of them
/// is rejected before any row is deserialized.
pub trait RawRecord: DeserializeOwned {
    const COLUMNS: &'static [&'static str];
}

/// Decodes `bytes` into raw records.
///
/// `name` identifies the source in error messages.
///
/// # Errors
///
/// Returns an error if a required column is missing from the header or any
/// row fails to parse.
pub fn read_records<T: RawRecord>(bytes: &[u8], format: SourceFormat, name: &str) -> Result<Vec<T>> {
    let transcoded = DecodeReaderBytesBuilder::new()
        .encoding(Some(format.encoding))
        .build(bytes);

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(format.delimiter)
        .has_headers(true)
        .from_reader(transcoded);

    let headers = rdr
        .headers()
        .with_context(|| format!("{name}: unreadable header row"))?
        .clone();
    for column in T::COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            bail!("{name}: missing column `{column}`");
        }
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: T = result.with_context(|| format!("{name}: malformed row"))?;
        rows.push(record);
    }

    debug!(source = name, rows = rows.len(), "Decoded source");
    Ok(rows)
}
