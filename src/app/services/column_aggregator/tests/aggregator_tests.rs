//! Tests for header resolution and per-column ingestion

use super::*;
use crate::Error;
use crate::app::models::ColumnOutcome;
use crate::app::services::column_aggregator::RowOutcome;

#[test]
fn test_headerless_file_aggregates_by_index() {
    let stats = aggregate_lines(&StatsConfig::default(), &["1,2", "3,4", "5,6"]);

    assert_eq!(stats.columns.len(), 2);

    let first = stats.record_at(0).unwrap();
    assert_eq!(first.count, 3);
    assert_eq!(first.sum, 9);
    assert_eq!(first.mean, 3);

    let second = stats.record_at(1).unwrap();
    assert_eq!(second.count, 3);
    assert_eq!(second.sum, 12);
    assert_eq!(second.mean, 4);

    assert_eq!(stats.columns[0].label, "Column 1");
    assert_eq!(stats.columns[1].label, "Column 2");
}

#[test]
fn test_blank_cells_are_missing_not_zero() {
    let config = StatsConfig::default().with_header(true);
    let stats = aggregate_lines(&config, &["a,b", "1, ", ",3"]);

    let a = stats.record("a").unwrap();
    assert_eq!(a.count, 1);
    assert_eq!(a.sum, 1);

    let b = stats.record("b").unwrap();
    assert_eq!(b.count, 1);
    assert_eq!(b.sum, 3);

    assert_eq!(stats.ingest.missing_values, 2);
    assert_eq!(stats.ingest.invalid_values, 0);
}

#[test]
fn test_skipped_rows_do_not_take_header_slot() {
    let config = StatsConfig::default().with_header(true);
    let stats = aggregate_lines(&config, &["# generated", "", ",,", "  # indented", "x,y", "1,2"]);

    assert_eq!(stats.columns[0].label, "x");
    assert_eq!(stats.columns[1].label, "y");
    assert_eq!(stats.record("x").unwrap().count, 1);
    assert_eq!(stats.ingest.rows_skipped, 4);
    assert_eq!(stats.ingest.data_rows, 1);
    assert_eq!(stats.ingest.rows_read, 6);
}

#[test]
fn test_comment_rows_between_data_are_ignored() {
    let stats = aggregate_lines(&StatsConfig::default(), &["1", "# 100", "3"]);
    let record = stats.record_at(0).unwrap();
    assert_eq!(record.count, 2);
    assert_eq!(record.sum, 4);
}

#[test]
fn test_short_rows_keep_column_positions() {
    let config = StatsConfig::default().with_header(true);
    let stats = aggregate_lines(&config, &["a,b,c", "1,2,3", "4", "5,6"]);

    assert_eq!(stats.record("a").unwrap().count, 3);
    assert_eq!(stats.record("b").unwrap().count, 2);
    assert_eq!(stats.record("c").unwrap().count, 1);
    assert_eq!(stats.record("a").unwrap().sum, 10);
    assert_eq!(stats.record("b").unwrap().sum, 8);
}

#[test]
fn test_rows_wider_than_header_get_synthetic_labels() {
    let config = StatsConfig::default().with_header(true);
    let stats = aggregate_lines(&config, &["a", "1,2", "3,4,5"]);

    assert_eq!(stats.columns.len(), 3);
    assert_eq!(stats.columns[0].label, "a");
    assert_eq!(stats.columns[1].label, "Column 2");
    assert_eq!(stats.columns[2].label, "Column 3");
    assert_eq!(stats.record("Column 2").unwrap().sum, 6);
}

#[test]
fn test_header_labels_are_trimmed_and_blank_labels_fall_back() {
    let config = StatsConfig::default().with_header(true);
    let stats = aggregate_lines(&config, &[" left , , right ", "1,2,3"]);

    assert_eq!(stats.columns[0].label, "left");
    assert_eq!(stats.columns[1].label, "Column 2");
    assert_eq!(stats.columns[2].label, "right");
}

#[test]
fn test_invalid_value_is_skipped_and_reported() {
    let stats = aggregate_lines(&StatsConfig::default(), &["1,x", "2,3"]);

    assert_eq!(stats.record_at(0).unwrap().count, 2);
    assert_eq!(stats.record_at(1).unwrap().count, 1);
    assert_eq!(stats.ingest.invalid_values, 1);
    assert_eq!(stats.ingest.values_parsed, 3);

    let issue = &stats.ingest.issues[0];
    assert!(issue.contains("'x'"), "{issue}");
    assert!(issue.contains("row 1"), "{issue}");
    assert!(issue.contains("column 2"), "{issue}");
    assert!(issue.contains("test.csv"), "{issue}");
}

#[test]
fn test_column_without_values_is_no_data() {
    let config = StatsConfig::default().with_header(true);
    let stats = aggregate_lines(&config, &["a,b,c", "1,,", "2,n/a,"]);

    assert_eq!(stats.columns.len(), 3);
    assert!(matches!(stats.columns[1].outcome, ColumnOutcome::NoData));
    assert!(matches!(stats.columns[2].outcome, ColumnOutcome::NoData));
    assert!(matches!(stats.record("b"), Err(Error::EmptyColumn { .. })));
    assert_eq!(stats.columns_with_data(), 1);
}

#[test]
fn test_gap_columns_are_reported_without_fabricated_values() {
    let stats = aggregate_lines(&StatsConfig::default(), &["1,,5", "2,,6"]);

    assert_eq!(stats.columns.len(), 3);
    assert_eq!(stats.columns[1].index, 1);
    assert!(stats.columns[1].record().is_none());
    assert_eq!(stats.record_at(2).unwrap().sum, 11);
}

#[test]
fn test_header_only_file_yields_no_data_for_each_label() {
    let config = StatsConfig::default().with_header(true);
    let stats = aggregate_lines(&config, &["a,b"]);

    assert_eq!(stats.columns.len(), 2);
    assert!(stats.columns.iter().all(|c| c.record().is_none()));
}

#[test]
fn test_empty_input_has_no_columns() {
    let stats = aggregate_lines(&StatsConfig::default(), &[]);
    assert!(stats.columns.is_empty());
    assert_eq!(stats.ingest.rows_read, 0);
}

#[test]
fn test_push_row_outcomes() {
    let config = StatsConfig::default().with_header(true);
    let mut aggregator = ColumnAggregator::new("outcomes.csv", &config);

    assert!(aggregator.awaiting_header());
    assert_eq!(aggregator.push_row(&["#", "x"], 1), RowOutcome::Skipped);
    assert!(aggregator.awaiting_header());
    assert_eq!(aggregator.push_row(&["p", "q"], 2), RowOutcome::Header);
    assert!(!aggregator.awaiting_header());
    assert_eq!(aggregator.header_labels(), ["p".to_string(), "q".to_string()]);
    assert_eq!(aggregator.push_row(&["1", "2"], 3), RowOutcome::Data);
    assert_eq!(aggregator.stats().data_rows, 1);
    assert_eq!(aggregator.file_name(), "outcomes.csv");
}

#[test]
fn test_without_header_first_row_is_data() {
    let mut aggregator = ColumnAggregator::new("no_header.csv", &StatsConfig::default());
    assert!(!aggregator.awaiting_header());
    assert_eq!(aggregator.push_row(&["a", "b"], 1), RowOutcome::Data);
    assert_eq!(aggregator.stats().invalid_values, 2);
}

#[test]
fn test_series_use_configured_precision() {
    let config = StatsConfig::default().with_precision(128);
    let mut aggregator = ColumnAggregator::new("p.csv", &config);
    aggregator.push_row(&["1.5"], 1);

    let series = aggregator.series(0).unwrap();
    assert_eq!(series.precision(), 128);
    assert_eq!(series.values()[0].prec(), 128);
}

#[test]
fn test_label_is_fixed_at_first_occurrence() {
    let config = StatsConfig::default().with_header(true);
    let mut aggregator = ColumnAggregator::new("labels.csv", &config);
    aggregator.push_row(&["a"], 1);
    aggregator.push_row(&["1", "2"], 2);
    aggregator.push_row(&["3", "4"], 3);

    assert_eq!(aggregator.series(1).unwrap().label(), "Column 2");
    assert_eq!(aggregator.series(1).unwrap().len(), 2);
}

#[test]
fn test_separate_aggregators_share_nothing() {
    let config = StatsConfig::default().with_header(true);
    let first = aggregate_lines(&config, &["a,b", "1,2", "3,4"]);
    let second = aggregate_lines(&config, &["z", "100"]);

    assert_eq!(first.columns.len(), 2);
    assert_eq!(second.columns.len(), 1);
    assert_eq!(second.columns[0].label, "z");
    assert_eq!(second.record("z").unwrap().count, 1);
    assert_eq!(second.record("z").unwrap().sum, 100);
    assert!(second.record("a").is_err());
}

#[test]
fn test_unreadable_rows_are_counted() {
    let mut aggregator = ColumnAggregator::new("bad.csv", &StatsConfig::default());
    aggregator.note_unreadable_row(4, "invalid UTF-8");
    aggregator.push_row(&["1"], 5);

    let stats = aggregator.finalize();
    assert_eq!(stats.ingest.unreadable_rows, 1);
    assert_eq!(stats.record_at(0).unwrap().count, 1);
}

#[test]
fn test_cells_with_interior_spaces_are_invalid() {
    let stats = aggregate_lines(&StatsConfig::default(), &["10,12 34", "20,1_000", "30,5"]);

    let second = stats.record_at(1).unwrap();
    assert_eq!(second.count, 1);
    assert_eq!(second.sum, 5);
    assert_eq!(stats.ingest.invalid_values, 2);
    assert!(stats.ingest.issues[0].contains("'12 34'"));
    assert_eq!(stats.record_at(0).unwrap().sum, 60);
}

#[test]
fn test_tokenizer_dropped_rows_count_as_skipped() {
    let mut aggregator = ColumnAggregator::new("gaps.csv", &StatsConfig::default());
    aggregator.note_dropped_rows(2);
    aggregator.push_row(&["1"], 3);
    aggregator.note_dropped_rows(0);

    let stats = aggregator.finalize();
    assert_eq!(stats.ingest.rows_read, 3);
    assert_eq!(stats.ingest.rows_skipped, 2);
    assert_eq!(stats.ingest.data_rows, 1);
}
