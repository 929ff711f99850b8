//! The immutable in-memory table produced by ingestion.
//!
//! A [`Table`] owns an ordered list of uniquely named [`Column`]s that all
//! share one row count. Each column stores a single resolved type; missing
//! cells are `None`. Nothing mutates a table once [`Table::new`] returns.

use std::{fmt, mem::size_of};

use anyhow::{Result, ensure};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::data::{Cell, Value, format_datetime, format_number};

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    DateTime(Vec<Option<NaiveDateTime>>),
}

/// Which profiling branch a column takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Categorical,
    Numeric,
    Unsupported,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Categorical => write!(f, "categorical"),
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnData::Numeric(values))
    }

    pub fn text<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        let values = values.into_iter().map(|v| v.map(Into::into)).collect();
        Self::new(name, ColumnData::Text(values))
    }

    pub fn datetime(name: impl Into<String>, values: Vec<Option<NaiveDateTime>>) -> Self {
        Self::new(name, ColumnData::DateTime(values))
    }

    /// Resolves a column type from individually parsed cells.
    ///
    /// All-numeric cells make a numeric column, all-temporal cells a date/time
    /// column; anything mixed falls back to text, keeping each cell's source
    /// text. A column with no values at all is numeric.
    pub fn from_cells(name: impl Into<String>, cells: Vec<Option<Cell>>) -> Self {
        let present = cells.iter().flatten();
        let all_numeric = present.clone().all(|c| matches!(c.value, Value::Number(_)));
        let all_temporal = present.clone().all(|c| matches!(c.value, Value::DateTime(_)));
        let data = if all_numeric {
            ColumnData::Numeric(
                cells
                    .iter()
                    .map(|c| match c.as_ref().map(|c| c.value) {
                        Some(Value::Number(n)) => Some(n),
                        _ => None,
                    })
                    .collect(),
            )
        } else if all_temporal {
            ColumnData::DateTime(
                cells
                    .iter()
                    .map(|c| match c.as_ref().map(|c| c.value) {
                        Some(Value::DateTime(dt)) => Some(dt),
                        _ => None,
                    })
                    .collect(),
            )
        } else {
            ColumnData::Text(cells.into_iter().map(|c| c.map(|c| c.text)).collect())
        };
        Self::new(name, data)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn kind(&self) -> ColumnKind {
        match self.data {
            ColumnData::Text(_) => ColumnKind::Categorical,
            ColumnData::Numeric(_) => ColumnKind::Numeric,
            ColumnData::DateTime(_) => ColumnKind::Unsupported,
        }
    }

    /// Storage type label shown next to profiles.
    pub fn dtype(&self) -> &'static str {
        match self.data {
            ColumnData::Numeric(_) => "float64",
            ColumnData::Text(_) => "object",
            ColumnData::DateTime(_) => "datetime64",
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::DateTime(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self, row: usize) -> bool {
        match &self.data {
            ColumnData::Numeric(v) => v.get(row).is_none_or(|c| c.is_none_or(f64::is_nan)),
            ColumnData::Text(v) => v.get(row).is_none_or(Option::is_none),
            ColumnData::DateTime(v) => v.get(row).is_none_or(Option::is_none),
        }
    }

    pub fn missing_count(&self) -> usize {
        (0..self.len()).filter(|&row| self.is_missing(row)).count()
    }

    /// Non-missing numeric values in row order; empty for other kinds.
    pub fn numeric_values(&self) -> Vec<f64> {
        match &self.data {
            ColumnData::Numeric(v) => v.iter().flatten().copied().filter(|n| !n.is_nan()).collect(),
            _ => Vec::new(),
        }
    }

    /// Textual form of a cell, `None` when missing.
    pub fn display(&self, row: usize) -> Option<String> {
        if self.is_missing(row) {
            return None;
        }
        match &self.data {
            ColumnData::Numeric(v) => v.get(row).copied().flatten().map(format_number),
            ColumnData::Text(v) => v.get(row).cloned().flatten(),
            ColumnData::DateTime(v) => v.get(row).and_then(|c| c.as_ref()).map(format_datetime),
        }
    }

    /// Approximate bytes held by the column's values.
    pub fn memory_usage(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.len() * size_of::<Option<f64>>(),
            ColumnData::DateTime(v) => v.len() * size_of::<Option<NaiveDateTime>>(),
            ColumnData::Text(v) => {
                v.len() * size_of::<Option<String>>()
                    + v.iter().flatten().map(String::capacity).sum::<usize>()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.len();
            for column in &columns {
                ensure!(
                    column.len() == rows,
                    "Column '{}' has {} row(s), expected {rows}",
                    column.name(),
                    column.len()
                );
            }
        }
        for (idx, column) in columns.iter().enumerate() {
            ensure!(
                !columns[..idx].iter().any(|c| c.name() == column.name()),
                "Duplicate column name '{}'",
                column.name()
            );
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0 || self.column_count() == 0
    }

    /// One row as display strings; missing cells are `None`.
    pub fn row(&self, row: usize) -> Vec<Option<String>> {
        self.columns.iter().map(|c| c.display(row)).collect()
    }

    /// The first `limit` rows with missing cells rendered empty.
    pub fn head(&self, limit: usize) -> Vec<Vec<String>> {
        (0..self.row_count().min(limit))
            .map(|row| {
                self.row(row)
                    .into_iter()
                    .map(Option::unwrap_or_default)
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_raw_cell;

    #[test]
    fn from_cells_resolves_column_kinds() {
        let numeric = Column::from_cells("n", vec![Some(Cell::number(1.0)), None]);
        assert_eq!(numeric.kind(), ColumnKind::Numeric);

        let mixed = Column::from_cells("m", vec![Some(Cell::number(1.0)), Some(Cell::text("x"))]);
        assert_eq!(mixed.kind(), ColumnKind::Categorical);
        assert_eq!(mixed.display(0).as_deref(), Some("1"));

        let empty = Column::from_cells("e", vec![None, None]);
        assert_eq!(empty.kind(), ColumnKind::Numeric);
        assert_eq!(empty.missing_count(), 2);
    }

    #[test]
    fn text_fallback_keeps_number_and_date_spellings() {
        let cells = ["01", "abc", "1", "1.50", "06/05/2024"]
            .into_iter()
            .map(parse_raw_cell)
            .collect::<Vec<_>>();
        let column = Column::from_cells("code", cells);
        assert_eq!(column.kind(), ColumnKind::Categorical);
        let shown = (0..column.len())
            .map(|row| column.display(row).unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(shown, vec!["01", "abc", "1", "1.50", "06/05/2024"]);
    }

    #[test]
    fn table_rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::numeric("a", vec![Some(1.0)]),
            Column::numeric("b", vec![Some(1.0), Some(2.0)]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("'b'"));
    }

    #[test]
    fn table_rejects_duplicate_names() {
        assert!(
            Table::new(vec![
                Column::numeric("a", vec![Some(1.0)]),
                Column::numeric("a", vec![Some(2.0)]),
            ])
            .is_err()
        );
    }

    #[test]
    fn head_renders_missing_as_empty() {
        let table = Table::new(vec![
            Column::numeric("a", vec![Some(1.0), None, Some(3.5)]),
            Column::text("b", vec![Some("x"), Some("y"), None]),
        ])
        .expect("table");
        assert_eq!(
            table.head(2),
            vec![
                vec!["1".to_string(), "x".to_string()],
                vec![String::new(), "y".to_string()],
            ]
        );
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn nan_numeric_cells_count_as_missing() {
        let column = Column::numeric("a", vec![Some(f64::NAN), Some(1.0), None]);
        assert_eq!(column.missing_count(), 2);
        assert_eq!(column.numeric_values(), vec![1.0]);
    }
}
