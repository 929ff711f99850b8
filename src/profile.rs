//! Per-column profiling.
//!
//! [`profile`] branches on [`ColumnKind`]: text columns get string-length and
//! frequency statistics, numeric columns get descriptive statistics and a
//! histogram, date/time columns are reported as unsupported without any
//! statistics. Every call is a pure function of the column and options.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{
    config::ProfileOptions,
    frame::{Column, ColumnKind, Table},
    stats::{self, Distribution, HistogramBin},
    summary::percentage,
};

/// One entry of a frequency table; `value` is `None` for the missing bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValueCount {
    pub value: Option<String>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCategory {
    pub value: Option<String>,
    pub count: usize,
    /// Share of all rows, missing included.
    pub proportion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub name: String,
    pub dtype: &'static str,
    pub count: usize,
    pub missing_count: usize,
    pub missing_pct: f64,
    pub distinct_count: usize,
    pub memory_bytes: usize,
    pub string_lengths: Distribution,
    pub value_counts: Vec<ValueCount>,
    pub top_n: usize,
    pub top_values: Vec<ValueCount>,
    pub top_category: Option<TopCategory>,
    pub rare_threshold: usize,
    pub rare_values: Vec<ValueCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub name: String,
    pub dtype: &'static str,
    pub count: usize,
    /// Present values; the statistics below are computed over these.
    pub non_missing: usize,
    pub missing_count: usize,
    pub missing_pct: f64,
    pub distinct_count: usize,
    pub memory_bytes: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub sum: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    pub histogram: Vec<HistogramBin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnSummary {
    Categorical(CategoricalSummary),
    Numeric(NumericSummary),
    Unsupported { name: String, dtype: &'static str },
}

impl ColumnSummary {
    pub fn name(&self) -> &str {
        match self {
            ColumnSummary::Categorical(s) => &s.name,
            ColumnSummary::Numeric(s) => &s.name,
            ColumnSummary::Unsupported { name, .. } => name,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnSummary::Categorical(_) => ColumnKind::Categorical,
            ColumnSummary::Numeric(_) => ColumnKind::Numeric,
            ColumnSummary::Unsupported { .. } => ColumnKind::Unsupported,
        }
    }
}

pub fn profile(column: &Column, options: &ProfileOptions) -> ColumnSummary {
    match column.kind() {
        ColumnKind::Categorical => ColumnSummary::Categorical(profile_categorical(column, options)),
        ColumnKind::Numeric => ColumnSummary::Numeric(profile_numeric(column, options)),
        ColumnKind::Unsupported => ColumnSummary::Unsupported {
            name: column.name().to_string(),
            dtype: column.dtype(),
        },
    }
}

pub fn profile_table(table: &Table, options: &ProfileOptions) -> Vec<ColumnSummary> {
    table
        .columns()
        .iter()
        .map(|column| profile(column, options))
        .collect()
}

fn profile_categorical(column: &Column, options: &ProfileOptions) -> CategoricalSummary {
    let count = column.len();
    let missing_count = column.missing_count();
    let lengths = (0..count)
        .filter_map(|row| column.display(row))
        .map(|text| text.chars().count() as f64)
        .collect::<Vec<_>>();

    let value_counts = value_counts(column);
    let distinct_count = value_counts.iter().filter(|vc| vc.value.is_some()).count();
    let top_values = value_counts
        .iter()
        .take(options.top_n)
        .cloned()
        .collect::<Vec<_>>();
    let top_category = top_values.first().map(|top| TopCategory {
        value: top.value.clone(),
        count: top.count,
        proportion: top.count as f64 / count as f64,
    });
    let rare_values = value_counts
        .iter()
        .filter(|vc| vc.value.is_some() && vc.count < options.rare_threshold)
        .cloned()
        .collect();

    CategoricalSummary {
        name: column.name().to_string(),
        dtype: column.dtype(),
        count,
        missing_count,
        missing_pct: percentage(missing_count, count),
        distinct_count,
        memory_bytes: column.memory_usage(),
        string_lengths: Distribution::describe(&lengths),
        value_counts,
        top_n: options.top_n,
        top_values,
        top_category,
        rare_threshold: options.rare_threshold,
        rare_values,
    }
}

/// Frequency table over every cell, missing included, by descending count.
/// Equal counts keep the order in which values were first seen.
pub fn value_counts(column: &Column) -> Vec<ValueCount> {
    let mut positions: HashMap<Option<String>, usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();
    for row in 0..column.len() {
        let value = column.display(row);
        match positions.get(&value) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                positions.insert(value.clone(), counts.len());
                counts.push(ValueCount { value, count: 1 });
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

fn profile_numeric(column: &Column, options: &ProfileOptions) -> NumericSummary {
    let count = column.len();
    let missing_count = column.missing_count();
    let values = column.numeric_values();
    let distribution = Distribution::describe(&values);
    let distinct_count = values
        .iter()
        .map(|v| if *v == 0.0 { 0f64.to_bits() } else { v.to_bits() })
        .collect::<HashSet<_>>()
        .len();

    NumericSummary {
        name: column.name().to_string(),
        dtype: column.dtype(),
        count,
        non_missing: values.len(),
        missing_count,
        missing_pct: percentage(missing_count, count),
        distinct_count,
        memory_bytes: column.memory_usage(),
        mean: distribution.mean,
        median: distribution.median,
        std: distribution.std,
        min: distribution.min,
        max: distribution.max,
        q1: distribution.q1,
        q3: distribution.q3,
        sum: values.iter().sum(),
        skewness: stats::skewness(&values),
        kurtosis: stats::kurtosis(&values),
        histogram: stats::histogram(&values, options.histogram_bins),
    }
}
