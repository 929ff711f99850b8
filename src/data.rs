use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Tokens read as a missing cell, matched after trimming.
pub const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "#N/A", "<NA>",
];

/// Typed reading of a present cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f64),
    DateTime(NaiveDateTime),
    Text,
}

/// A present cell prior to column type resolution: the text it was read
/// from plus its typed reading. Columns that fall back to text keep `text`
/// verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub value: Value,
}

impl Cell {
    pub fn number(value: f64) -> Self {
        Self {
            text: format_number(value),
            value: Value::Number(value),
        }
    }

    pub fn datetime(value: NaiveDateTime) -> Self {
        Self {
            text: format_datetime(&value),
            value: Value::DateTime(value),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: Value::Text,
        }
    }
}

pub fn is_missing_token(raw: &str) -> bool {
    MISSING_TOKENS.contains(&raw.trim())
}

pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    // Rust accepts "inf"/"infinity" spellings that spreadsheets never emit.
    if trimmed.chars().any(|c| c.is_ascii_digit()) {
        trimmed.parse::<f64>().ok()
    } else {
        None
    }
}

pub fn parse_naive_date(value: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

pub fn parse_naive_datetime(value: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%d/%m/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Reads a date or datetime, promoting plain dates to midnight.
pub fn parse_temporal(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    parse_naive_datetime(trimmed)
        .or_else(|| parse_naive_date(trimmed).map(|d| d.and_time(NaiveTime::MIN)))
}

/// Classifies a raw text cell; `None` means missing.
pub fn parse_raw_cell(raw: &str) -> Option<Cell> {
    if is_missing_token(raw) {
        return None;
    }
    let value = if let Some(number) = parse_number(raw) {
        Value::Number(number)
    } else if let Some(datetime) = parse_temporal(raw) {
        Value::DateTime(datetime)
    } else {
        Value::Text
    };
    Some(Cell {
        text: raw.to_string(),
        value,
    })
}

pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

pub fn format_datetime(value: &NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
