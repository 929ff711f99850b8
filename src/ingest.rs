//! File ingestion: extension dispatch, delimiter sniffing and workbook reads.
//!
//! [`parse`] turns an uploaded file name plus its bytes into a [`Table`] or a
//! typed [`IngestError`]. The file type comes from the extension alone:
//!
//! - `.csv` is decoded and read with each of [`CANDIDATE_DELIMITERS`]; the
//!   structurally valid candidate with the most columns wins, ties going to
//!   the earlier separator.
//! - `.xls` / `.xlsx` are opened with `calamine` and the first sheet is read.
//!
//! In both cases the first row holds the headers. Blank headers become
//! `Unnamed: <position>` and repeated headers get `.1`, `.2`, ... suffixes.

use std::{collections::HashSet, io::Cursor, path::Path};

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use encoding_rs::{Encoding, UTF_8};
use itertools::Itertools;
use log::{debug, info};

use crate::{
    data::{Cell, is_missing_token, parse_raw_cell, parse_temporal},
    error::IngestError,
    frame::{Column, Table},
    io_utils::{self, CANDIDATE_DELIMITERS},
};

#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Text encoding applied to CSV uploads.
    pub encoding: &'static Encoding,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { encoding: UTF_8 }
    }
}

/// Lower-cased extension including its dot, or empty when there is none.
pub fn extension_of(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match base.rfind('.') {
        Some(idx) if idx > 0 => base[idx..].to_lowercase(),
        _ => String::new(),
    }
}

pub fn parse(file_name: &str, bytes: &[u8], options: &IngestOptions) -> Result<Table, IngestError> {
    let extension = extension_of(file_name);
    let table = match extension.as_str() {
        ".csv" => parse_csv(bytes, options.encoding)?,
        ".xls" | ".xlsx" => parse_workbook(bytes)?,
        _ => return Err(IngestError::UnsupportedFormat(extension)),
    };
    info!(
        "Loaded '{}' with {} row(s) and {} column(s)",
        file_name,
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

pub fn parse_path(path: &Path, options: &IngestOptions) -> Result<Table, IngestError> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse(&file_name, &bytes, options)
}

fn parse_csv(bytes: &[u8], encoding: &'static Encoding) -> Result<Table, IngestError> {
    let text = io_utils::decode_bytes(bytes, encoding).map_err(IngestError::unsupported_feature)?;

    let mut best: Option<(u8, Vec<String>, Vec<Vec<String>>)> = None;
    for delimiter in CANDIDATE_DELIMITERS {
        match read_delimited(&text, delimiter) {
            Ok((headers, rows)) if !headers.is_empty() => {
                let wider = best
                    .as_ref()
                    .is_none_or(|(_, current, _)| headers.len() > current.len());
                if wider {
                    best = Some((delimiter, headers, rows));
                }
            }
            Ok(_) => debug!(
                "Delimiter '{}' produced no columns",
                io_utils::printable_delimiter(delimiter)
            ),
            Err(err) => debug!(
                "Delimiter '{}' rejected: {err}",
                io_utils::printable_delimiter(delimiter)
            ),
        }
    }

    let (delimiter, headers, rows) = best.ok_or_else(|| IngestError::DelimiterDetectionFailed {
        tried: CANDIDATE_DELIMITERS
            .iter()
            .map(|d| format!("'{}'", io_utils::printable_delimiter(*d)))
            .join(", "),
    })?;
    info!(
        "Detected delimiter '{}'",
        io_utils::printable_delimiter(delimiter)
    );

    let width = headers.len();
    let mut values: Vec<Vec<Option<Cell>>> = vec![Vec::with_capacity(rows.len()); width];
    for row in &rows {
        for (idx, cell) in row.iter().enumerate().take(width) {
            values[idx].push(parse_raw_cell(cell));
        }
    }
    build_table(headers, values)
}

fn read_delimited(
    text: &str,
    delimiter: u8,
) -> Result<(Vec<String>, Vec<Vec<String>>), csv::Error> {
    let mut reader = io_utils::open_csv_reader(text.as_bytes(), delimiter);
    let headers = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok((headers, rows))
}

fn parse_workbook(bytes: &[u8]) -> Result<Table, IngestError> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(IngestError::unsupported_feature)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::unsupported_feature("workbook has no worksheets"))?
        .map_err(IngestError::unsupported_feature)?;

    let width = range.width();
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => (0..width)
            .map(|idx| header_row.get(idx).map(header_text).unwrap_or_default())
            .collect::<Vec<_>>(),
        None => Vec::new(),
    };

    let mut values: Vec<Vec<Option<Cell>>> = vec![Vec::new(); width];
    for row in rows {
        for (idx, column) in values.iter_mut().enumerate() {
            column.push(row.get(idx).and_then(cell_value));
        }
    }
    build_table(headers, values)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

fn cell_value(cell: &Data) -> Option<Cell> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if is_missing_token(s) => None,
        Data::String(s) => Some(Cell::text(s.clone())),
        Data::Float(f) => Some(Cell::number(*f)),
        Data::Int(i) => Some(Cell::number(*i as f64)),
        Data::Bool(b) => Some(Cell::text(b.to_string())),
        Data::DateTime(dt) => Some(
            dt.as_datetime()
                .map_or_else(|| Cell::number(dt.as_f64()), Cell::datetime),
        ),
        Data::DateTimeIso(s) => Some(
            parse_temporal(s).map_or_else(|| Cell::text(s.clone()), Cell::datetime),
        ),
        Data::DurationIso(s) => Some(Cell::text(s.clone())),
    }
}

fn build_table(
    headers: Vec<String>,
    values: Vec<Vec<Option<Cell>>>,
) -> Result<Table, IngestError> {
    let columns = normalize_headers(headers)
        .into_iter()
        .zip(values)
        .map(|(name, cells)| Column::from_cells(name, cells))
        .collect();
    Table::new(columns).map_err(IngestError::unsupported_feature)
}

pub fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(headers.len());
    let mut normalized = Vec::with_capacity(headers.len());
    for (idx, raw) in headers.into_iter().enumerate() {
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            raw
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while !seen.insert(name.clone()) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        normalized.push(name);
    }
    normalized
}
