use std::collections::HashSet;

use serde::Serialize;

use crate::frame::Table;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub row_count: usize,
    pub col_count: usize,
    pub missing_total: usize,
    pub missing_pct: f64,
    pub duplicate_count: usize,
    pub duplicate_pct: f64,
    /// Column name and missing count, in table column order.
    pub missing_per_column: Vec<(String, usize)>,
}

pub fn summarize(table: &Table) -> TableSummary {
    let row_count = table.row_count();
    let col_count = table.column_count();
    let missing_per_column = table
        .columns()
        .iter()
        .map(|c| (c.name().to_string(), c.missing_count()))
        .collect::<Vec<_>>();
    let missing_total = missing_per_column.iter().map(|(_, n)| n).sum::<usize>();
    let cells = row_count * col_count;
    let duplicate_count = count_duplicate_rows(table);

    TableSummary {
        row_count,
        col_count,
        missing_total,
        missing_pct: percentage(missing_total, cells),
        duplicate_count,
        duplicate_pct: percentage(duplicate_count, row_count),
        missing_per_column,
    }
}

/// Rows equal (cell by cell, missing matching missing) to an earlier row.
/// The first occurrence is not a duplicate.
pub fn count_duplicate_rows(table: &Table) -> usize {
    let mut seen = HashSet::with_capacity(table.row_count());
    (0..table.row_count())
        .filter(|&row| !seen.insert(table.row(row)))
        .count()
}

pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
