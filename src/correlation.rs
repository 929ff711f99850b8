//! Pairwise Pearson correlation between numeric feature columns.

use log::debug;
use serde::Serialize;

use crate::{
    frame::{Column, ColumnData, Table},
    stats,
};

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major coefficients; `values[i][j]` pairs `columns[i]` with `columns[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == row)?;
        let j = self.columns.iter().position(|c| c == column)?;
        self.values.get(i)?.get(j).copied()
    }
}

/// Correlates the numeric columns among `features`, leaving out `target`.
///
/// Unknown, repeated and non-numeric feature names are dropped without error.
/// Each pair only uses rows where both cells are present.
pub fn correlate<S: AsRef<str>>(table: &Table, target: &str, features: &[S]) -> CorrelationMatrix {
    let mut selected: Vec<&Column> = Vec::new();
    for name in features.iter().map(AsRef::as_ref) {
        if name == target || selected.iter().any(|c| c.name() == name) {
            continue;
        }
        match table.column(name) {
            Some(column) if matches!(column.data(), ColumnData::Numeric(_)) => {
                selected.push(column)
            }
            Some(column) => debug!(
                "Dropping non-numeric column '{}' from correlation",
                column.name()
            ),
            None => debug!("Dropping unknown column '{name}' from correlation"),
        }
    }

    let size = selected.len();
    let mut values = vec![vec![1.0; size]; size];
    for i in 0..size {
        for j in (i + 1)..size {
            let coefficient = pairwise_pearson(selected[i], selected[j]);
            values[i][j] = coefficient;
            values[j][i] = coefficient;
        }
    }

    CorrelationMatrix {
        columns: selected.iter().map(|c| c.name().to_string()).collect(),
        values,
    }
}

fn pairwise_pearson(left: &Column, right: &Column) -> f64 {
    let (ColumnData::Numeric(xs), ColumnData::Numeric(ys)) = (left.data(), right.data()) else {
        return f64::NAN;
    };
    let (paired_x, paired_y): (Vec<f64>, Vec<f64>) = xs
        .iter()
        .zip(ys)
        .filter_map(|pair| match pair {
            (Some(x), Some(y)) if !x.is_nan() && !y.is_nan() => Some((*x, *y)),
            _ => None,
        })
        .unzip();
    stats::pearson(&paired_x, &paired_y)
}
