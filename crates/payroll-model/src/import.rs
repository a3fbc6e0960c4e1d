//! Per-format adapters feeding the normalization pipeline.
//!
//! Each adapter turns one upstream payload (spreadsheet CSV export, webhook
//! JSON, URL query parameter) into an ordered sequence of rows. An element
//! that is not a row at all (e.g. a number inside a JSON array) is kept as
//! `None` so the classifier can drop it in place.

use std::borrow::Cow;
use std::io::Read;

use csv::ByteRecord;
use encoding_rs::WINDOWS_1252;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::RawRow;

/// Key of the array inside a webhook envelope (`{"data": [...]}`).
pub const ENVELOPE_DATA_KEY: &str = "data";

#[derive(Clone, Debug)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// How to decode raw CSV bytes into text fields.
    pub encoding: CsvTextEncoding,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            encoding: CsvTextEncoding::Auto,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CsvTextEncoding {
    /// UTF-8 per cell, with Windows-1252 for cells that are not valid UTF-8.
    Auto,
    /// Strict UTF-8; a bad cell fails the import.
    Utf8,
    /// Every cell is Windows-1252.
    Windows1252,
}

#[derive(Debug, Error)]
pub enum CsvImportError {
    #[error("payroll csv has no header record")]
    EmptyInput,
    #[error("payroll csv row {row}, column {column}: {reason}")]
    Parse { row: u64, column: u64, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Structural failures: the payload is not tabular data at all.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("expected an array or object of rows, found {found}")]
    NotTabular { found: &'static str },
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] CsvImportError),
    #[error("url payload is not valid percent-encoded UTF-8: {0}")]
    UrlDecode(#[from] std::string::FromUtf8Error),
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Rows from a decoded JSON payload.
///
/// Accepts a bare array, a `{"data": [...]}` envelope, or a single row object.
pub fn rows_from_json_value(value: &Value) -> Result<Vec<Option<RawRow>>, IngestError> {
    let items: Cow<'_, [Value]> = match value {
        Value::Array(items) => Cow::Borrowed(items.as_slice()),
        Value::Object(obj) => match obj.get(ENVELOPE_DATA_KEY) {
            Some(Value::Array(items)) => Cow::Borrowed(items.as_slice()),
            _ => Cow::Owned(vec![value.clone()]),
        },
        other => {
            return Err(IngestError::NotTabular {
                found: json_kind(other),
            })
        }
    };

    Ok(items
        .iter()
        .map(|item| item.as_object().map(row_from_json_object))
        .collect())
}

pub fn rows_from_json_str(json: &str) -> Result<Vec<Option<RawRow>>, IngestError> {
    let value: Value = serde_json::from_str(json)?;
    rows_from_json_value(&value)
}

/// Rows from the percent-encoded JSON carried in a `?data=` URL parameter.
pub fn rows_from_url_param(encoded: &str) -> Result<Vec<Option<RawRow>>, IngestError> {
    let decoded = urlencoding::decode(encoded)?;
    rows_from_json_str(&decoded)
}

fn row_from_json_object(obj: &Map<String, Value>) -> RawRow {
    let mut row = RawRow::new();
    for (key, value) in obj {
        let cell = match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        };
        row.push(key.clone(), cell);
    }
    row
}

/// Rows from a CSV stream whose first record is the header.
///
/// Header names are trimmed. Short records leave trailing columns absent,
/// long records get `ColumnN` keys, and records with no non-empty cell are
/// skipped.
pub fn rows_from_csv_reader<R: Read>(
    reader: R,
    options: &CsvOptions,
) -> Result<Vec<Option<RawRow>>, CsvImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        // Headers are handled here so the BOM and row numbers stay consistent.
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut record = ByteRecord::new();
    let mut record_index: u64 = 0;

    let has_first = csv_reader
        .read_byte_record(&mut record)
        .map_err(|e| map_csv_error(e, record_index + 1))?;
    if !has_first {
        return Err(CsvImportError::EmptyInput);
    }
    record_index += 1;

    let mut headers: Vec<String> = Vec::with_capacity(record.len());
    for (idx, field) in record.iter().enumerate() {
        let name = decode_field(field, record_index, idx as u64 + 1, options.encoding)?;
        headers.push(name.trim().to_string());
    }

    let mut rows = Vec::new();
    loop {
        record.clear();
        match csv_reader.read_byte_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                record_index += 1;
                if record.iter().all(|f| f.iter().all(u8::is_ascii_whitespace)) {
                    continue;
                }

                let mut row = RawRow::new();
                for (idx, field) in record.iter().enumerate() {
                    let value = decode_field(field, record_index, idx as u64 + 1, options.encoding)?;
                    let key = match headers.get(idx) {
                        Some(name) => name.clone(),
                        None => format!("Column{}", idx + 1),
                    };
                    row.push(key, Some(value.into_owned()));
                }
                rows.push(Some(row));
            }
            Err(e) => return Err(map_csv_error(e, record_index + 1)),
        }
    }

    log::debug!("read {} csv rows under {} headers", rows.len(), headers.len());
    Ok(rows)
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode one CSV cell. `row` and `column` are 1-based and only feed the error.
fn decode_field<'a>(
    field: &'a [u8],
    row: u64,
    column: u64,
    encoding: CsvTextEncoding,
) -> Result<Cow<'a, str>, CsvImportError> {
    let bytes = if row == 1 && column == 1 {
        field.strip_prefix(UTF8_BOM).unwrap_or(field)
    } else {
        field
    };

    let cp1252 = |bytes: &'a [u8]| WINDOWS_1252.decode(bytes).0;
    match (encoding, std::str::from_utf8(bytes)) {
        (CsvTextEncoding::Windows1252, _) => Ok(cp1252(bytes)),
        (_, Ok(text)) => Ok(Cow::Borrowed(text)),
        (CsvTextEncoding::Auto, Err(_)) => Ok(cp1252(bytes)),
        (CsvTextEncoding::Utf8, Err(err)) => Err(CsvImportError::Parse {
            row,
            column,
            reason: format!("cell is not UTF-8: {err}"),
        }),
    }
}

/// I/O failures keep their kind; anything else becomes a row-level parse error.
fn map_csv_error(err: csv::Error, fallback_row: u64) -> CsvImportError {
    let row = match err.position() {
        Some(pos) if pos.record() > 0 => pos.record(),
        _ => fallback_row,
    };
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => CsvImportError::Io(io),
        _ => CsvImportError::Parse {
            row,
            column: 0,
            reason,
        },
    }
}
