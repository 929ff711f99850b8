//! Text rendering of summaries, profiles and correlation matrices.
//!
//! Undefined statistics (`NaN`) print as `n/a` so that degraded results stay
//! visible instead of looking like zeros.

use std::fmt::Write as _;

use crate::{
    correlation::CorrelationMatrix,
    frame::Table,
    profile::{CategoricalSummary, ColumnSummary, NumericSummary, ValueCount},
    stats::HistogramBin,
    summary::TableSummary,
    table::{self, Align},
};

pub const NO_RARE_CATEGORIES: &str = "No rare categories found";
const BAR_WIDTH: usize = 40;
const MISSING_LABEL: &str = "<missing>";

pub fn format_metric(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}

fn format_pct(value: f64) -> String {
    format!("{value:.2} %")
}

fn format_kib(bytes: usize) -> String {
    format!("{:.2} kB", bytes as f64 / 1024.0)
}

fn label(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| MISSING_LABEL.to_string())
}

pub fn render_preview(table: &Table, rows: usize) -> String {
    table::render_table(&table.headers(), &table.head(rows))
}

pub fn render_summary(summary: &TableSummary) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Dataset shape");
    output.push_str(&table::render_key_values(&[
        ("Number of observations (rows)", summary.row_count.to_string()),
        ("Number of variables (columns)", summary.col_count.to_string()),
        ("Number of missing values", summary.missing_total.to_string()),
        ("% of missing values", format_pct(summary.missing_pct)),
        ("Number of duplicates", summary.duplicate_count.to_string()),
        ("% of duplicate rows", format_pct(summary.duplicate_pct)),
    ]));
    let _ = writeln!(output);
    let _ = writeln!(output, "Missing values per column");
    let rows = summary
        .missing_per_column
        .iter()
        .map(|(name, count)| vec![name.clone(), count.to_string()])
        .collect::<Vec<_>>();
    output.push_str(&table::render_aligned_table(
        &["column".to_string(), "missing".to_string()],
        &rows,
        &[Align::Left, Align::Right],
    ));
    output
}

pub fn render_profile(summary: &ColumnSummary) -> String {
    match summary {
        ColumnSummary::Categorical(s) => render_categorical(s),
        ColumnSummary::Numeric(s) => render_numeric(s),
        ColumnSummary::Unsupported { name, dtype } => format!(
            "{name}\nData type: {dtype}\nProfiling is not supported for this column type.\n"
        ),
    }
}

fn render_categorical(s: &CategoricalSummary) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", s.name);
    output.push_str(&table::render_key_values(&[
        ("Data type", s.dtype.to_string()),
        ("Number of unique values", s.distinct_count.to_string()),
        ("Missing values", s.missing_count.to_string()),
        ("Missing values %", format_pct(s.missing_pct)),
        ("Memory usage", format_kib(s.memory_bytes)),
        ("Min. length", format_metric(s.string_lengths.min)),
        ("Max. length", format_metric(s.string_lengths.max)),
        ("Average length", format_metric(s.string_lengths.mean)),
        ("Median length", format_metric(s.string_lengths.median)),
        ("Length std", format_metric(s.string_lengths.std)),
        ("Length 25%", format_metric(s.string_lengths.q1)),
        ("Length 75%", format_metric(s.string_lengths.q3)),
    ]));
    if let Some(top) = &s.top_category {
        output.push_str(&table::render_key_values(&[
            ("Top category", label(&top.value)),
            ("Top category occurrences", top.count.to_string()),
            ("Top category proportion", format!("{:.2}", top.proportion)),
        ]));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Top {} categories", s.top_n);
    output.push_str(&render_counts(&s.top_values, true));

    let _ = writeln!(output);
    let _ = writeln!(output, "Rare categories (<{} appearances)", s.rare_threshold);
    if s.rare_values.is_empty() {
        let _ = writeln!(output, "{NO_RARE_CATEGORIES}");
    } else {
        output.push_str(&render_counts(&s.rare_values, false));
    }
    output
}

fn render_counts(counts: &[ValueCount], with_bars: bool) -> String {
    let max = counts.iter().map(|vc| vc.count).max().unwrap_or_default();
    let rows = counts
        .iter()
        .map(|vc| {
            let mut row = vec![label(&vc.value), vc.count.to_string()];
            if with_bars {
                row.push(table::render_bar(vc.count, max, BAR_WIDTH));
            }
            row
        })
        .collect::<Vec<_>>();
    let mut headers = vec!["category".to_string(), "count".to_string()];
    if with_bars {
        headers.push(String::new());
    }
    table::render_aligned_table(&headers, &rows, &[Align::Left, Align::Right])
}

fn render_numeric(s: &NumericSummary) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", s.name);
    output.push_str(&table::render_key_values(&[
        ("Data type", s.dtype.to_string()),
        ("Count", s.count.to_string()),
        ("Non-missing values", s.non_missing.to_string()),
        ("Missing values", s.missing_count.to_string()),
        ("Missing values %", format_pct(s.missing_pct)),
        ("Number of unique values", s.distinct_count.to_string()),
        ("Memory usage", format_kib(s.memory_bytes)),
        ("Mean", format_metric(s.mean)),
        ("Median", format_metric(s.median)),
        ("Standard deviation", format_metric(s.std)),
        ("Min", format_metric(s.min)),
        ("25%", format_metric(s.q1)),
        ("75%", format_metric(s.q3)),
        ("Max", format_metric(s.max)),
        ("Sum", format_metric(s.sum)),
        ("Skewness", format_metric(s.skewness)),
        ("Kurtosis", format_metric(s.kurtosis)),
    ]));
    let _ = writeln!(output);
    let _ = writeln!(output, "Histogram");
    output.push_str(&render_histogram(&s.histogram));
    output
}

fn render_histogram(bins: &[HistogramBin]) -> String {
    if bins.is_empty() {
        return "No data\n".to_string();
    }
    let max = bins.iter().map(|b| b.count).max().unwrap_or_default();
    let rows = bins
        .iter()
        .map(|bin| {
            vec![
                format_metric(bin.lower),
                format_metric(bin.upper),
                bin.count.to_string(),
                table::render_bar(bin.count, max, BAR_WIDTH),
            ]
        })
        .collect::<Vec<_>>();
    table::render_aligned_table(
        &[
            "from".to_string(),
            "to".to_string(),
            "count".to_string(),
            String::new(),
        ],
        &rows,
        &[Align::Right, Align::Right, Align::Right],
    )
}

pub fn render_correlation(matrix: &CorrelationMatrix) -> String {
    if matrix.is_empty() {
        return "No numeric features selected for correlation\n".to_string();
    }
    let mut headers = vec![String::new()];
    headers.extend(matrix.columns.iter().cloned());
    let rows = matrix
        .columns
        .iter()
        .zip(&matrix.values)
        .map(|(name, coefficients)| {
            let mut row = vec![name.clone()];
            row.extend(coefficients.iter().map(|c| {
                if c.is_nan() {
                    "n/a".to_string()
                } else {
                    format!("{c:.2}")
                }
            }));
            row
        })
        .collect::<Vec<_>>();
    let mut aligns = vec![Align::Left];
    aligns.extend(std::iter::repeat_n(Align::Right, matrix.columns.len()));
    table::render_aligned_table(&headers, &rows, &aligns)
}
