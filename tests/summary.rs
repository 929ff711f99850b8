mod common;

use common::parse_csv;
use proptest::prelude::*;
use quick_eda::{
    frame::{Column, Table},
    report,
    summary::summarize,
};

#[test]
fn duplicate_sample_reports_one_duplicate_row() {
    let summary = summarize(&parse_csv("a,b\n1,2\n1,2\n3,4\n"));
    assert_eq!(summary.row_count, 3);
    assert_eq!(summary.col_count, 2);
    assert_eq!(summary.missing_total, 0);
    assert_eq!(summary.missing_pct, 0.0);
    assert_eq!(summary.duplicate_count, 1);
    assert!((summary.duplicate_pct - 33.333_333).abs() < 1e-3);
}

#[test]
fn missing_cells_are_counted_per_column_in_order() {
    let summary = summarize(&parse_csv(common::ORDERS_CSV));
    assert_eq!(summary.row_count, 6);
    assert_eq!(summary.col_count, 5);
    assert_eq!(summary.missing_total, 2);
    assert!((summary.missing_pct - 2.0 / 30.0 * 100.0).abs() < 1e-9);
    let names = summary
        .missing_per_column
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["id", "status", "amount", "quantity", "returned"]);
    assert_eq!(summary.missing_per_column[1].1, 1);
    assert_eq!(summary.missing_per_column[2].1, 1);
}

#[test]
fn rows_with_matching_missing_cells_are_duplicates() {
    let summary = summarize(&parse_csv("a,b\n1,\n1,NA\n2,\n"));
    assert_eq!(summary.duplicate_count, 1);
}

#[test]
fn differently_spelled_text_rows_are_not_duplicates() {
    let summary = summarize(&parse_csv("code,tag\n01,x\n1,x\nabc,x\n1,x\n"));
    assert_eq!(summary.duplicate_count, 1);
}

#[test]
fn empty_table_has_zero_percentages() {
    let summary = summarize(&Table::default());
    assert_eq!(summary.row_count, 0);
    assert_eq!(summary.missing_pct, 0.0);
    assert_eq!(summary.duplicate_pct, 0.0);
}

#[test]
fn text_rendering_lists_shape_and_missing_columns() {
    let rendered = report::render_summary(&summarize(&parse_csv(common::ORDERS_CSV)));
    assert!(rendered.contains("Number of observations (rows):"));
    assert!(rendered.contains("Missing values per column"));
    assert!(rendered.lines().any(|line| line.starts_with("amount")));
}

proptest! {
    #[test]
    fn shape_matches_table_and_unique_rows_have_no_duplicates(
        rows in prop::collection::vec(
            prop::collection::vec(prop::option::of(-1000i32..1000), 3),
            0..40,
        ),
    ) {
        let mut columns = vec![Column::numeric(
            "row_id",
            (0..rows.len()).map(|idx| Some(idx as f64)).collect(),
        )];
        for col in 0..3 {
            columns.push(Column::numeric(
                format!("c{col}"),
                rows.iter().map(|row| row[col].map(f64::from)).collect(),
            ));
        }
        let table = Table::new(columns).expect("table");
        let summary = summarize(&table);
        prop_assert_eq!(summary.row_count, table.row_count());
        prop_assert_eq!(summary.col_count, table.column_count());
        prop_assert_eq!(summary.duplicate_count, 0);
        prop_assert_eq!(summary.duplicate_pct, 0.0);
        let expected_missing = rows.iter().flatten().filter(|cell| cell.is_none()).count();
        prop_assert_eq!(summary.missing_total, expected_missing);
    }
}
