use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use paleo_bins_core::{
    age_column, bin_ages, bin_column, bin_columns, bin_index, render_summary_table,
    summarize_batch, summarize_with_config, summary_to_json, with_midpoint_column, BinScheme, Config, LabelMode,
};
use std::sync::Arc;

fn occurrences() -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("genus", DataType::Utf8, true),
        Field::new("max_ma", DataType::Float64, false),
        Field::new("min_ma", DataType::Float64, false),
    ]));
    let genus = Arc::new(StringArray::from(vec![
        Some("Mammuthus"),
        Some("Mammuthus"),
        Some("Equus"),
        Some("Smilodon"),
        None,
        Some("Equus"),
    ]));
    let max_ma = Arc::new(Float64Array::from(vec![2.6, 1.8, 4.0, 2.5, 11.6, 9.0]));
    let min_ma = Arc::new(Float64Array::from(vec![0.8, 0.2, 2.0, 0.01, 5.3, 7.0]));
    RecordBatch::try_new(schema, vec![genus, max_ma, min_ma]).unwrap()
}

// --- scenarios for the flat binning call ---

#[test]
fn scenario_width_max_in_last_bin() {
    let out = bin_ages(&[1.0, 3.0, 5.0, 7.0, 9.0], Some(2.0), None, LabelMode::Index).unwrap();
    assert_eq!(out, vec![1.0, 2.0, 3.0, 4.0, 4.0]);
}

#[test]
fn scenario_count_thirds() {
    let out = bin_ages(&[0.2, 0.5, 0.9], None, Some(3.0), LabelMode::Index).unwrap();
    assert_eq!(out, vec![1.0, 2.0, 3.0]);
}

#[test]
fn scenario_identical_non_integer_ages() {
    let out = bin_ages(&[10.1, 10.1, 10.1], Some(2.0), None, LabelMode::Index).unwrap();
    assert_eq!(out, vec![1.0, 1.0, 1.0]);
}

#[test]
fn scenario_count_midpoints() {
    let out = bin_ages(&[2.0, 4.0], None, Some(2.0), LabelMode::Age).unwrap();
    assert_eq!(out, vec![2.5, 3.5]);
}

#[test]
fn scenario_width_and_count_conflict() {
    let err = bin_ages(&[1.0, 2.0, 3.0], Some(2.0), Some(2.0), LabelMode::Index).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn scenario_empty_ages() {
    let err = bin_ages(&[], Some(2.0), None, LabelMode::Index).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn zero_width_and_zero_count_are_config_errors() {
    assert!(bin_ages(&[1.0], Some(0.0), None, LabelMode::Index).unwrap_err().is_configuration());
    assert!(bin_ages(&[1.0], None, Some(0.0), LabelMode::Index).unwrap_err().is_configuration());
    assert!(bin_ages(&[1.0], None, None, LabelMode::Age).unwrap_err().is_configuration());
}

#[test]
fn integer_degenerate_sample_falls_back_to_one_bin() {
    assert_eq!(bin_index(&[3.0, 3.0], BinScheme::ByWidth(1.0)).unwrap(), vec![1, 1]);
    assert_eq!(bin_index(&[3.0, 3.0], BinScheme::ByCount(3)).unwrap(), vec![1, 1]);
}

// --- tables ---

#[test]
fn midpoint_then_bin_appends_columns() {
    let batch = with_midpoint_column(&occurrences(), "max_ma", "min_ma", "mid_ma").unwrap();
    let batch = bin_column(&batch, "mid_ma", BinScheme::ByWidth(2.0), LabelMode::Index, "mid_ma_bin").unwrap();
    assert_eq!(batch.num_columns(), 5);
    assert_eq!(batch.num_rows(), 6);
    // midpoints: 1.7, 1.0, 3.0, 1.255, 8.45, 8.0 over [1, 9] in 2 Myr steps
    let labels = batch
        .column_by_name("mid_ma_bin")
        .unwrap()
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(labels.values().to_vec(), vec![1, 1, 2, 1, 4, 4]);
}

#[test]
fn several_columns_binned_in_input_order() {
    let cfg = Config::default();
    let out = bin_columns(
        &occurrences(),
        &["max_ma", "min_ma"],
        BinScheme::ByCount(4),
        LabelMode::Age,
        &cfg.binning.label_suffix,
    )
    .unwrap();
    let names: Vec<String> = out.schema().fields().iter().map(|f| f.name().clone()).collect();
    assert_eq!(names, vec!["genus", "max_ma", "min_ma", "max_ma_bin", "min_ma_bin"]);
    // max_ma spans [1, 12] -> width 2.75, first bin midpoint 2.375
    let max_bins = age_column(&out, "max_ma_bin").unwrap();
    assert!((max_bins[0] - 2.375).abs() < 1e-9);
    assert_eq!(out.column_by_name("min_ma_bin").unwrap().data_type(), &DataType::Float64);
}

#[test]
fn missing_column_in_batch_fails_whole_call() {
    let r = bin_columns(&occurrences(), &["max_ma", "nope"], BinScheme::ByWidth(1.0), LabelMode::Index, "_bin");
    assert!(r.unwrap_err().is_invalid_input());
}

#[test]
fn distinct_taxa_per_bin() {
    let batch = with_midpoint_column(&occurrences(), "max_ma", "min_ma", "mid_ma").unwrap();
    let summary = summarize_batch(&batch, "mid_ma", Some("genus"), BinScheme::ByWidth(2.0)).unwrap();
    assert_eq!(summary.len(), 4);
    assert_eq!(summary[0].occurrences, 3);
    assert_eq!(summary[0].distinct_taxa, Some(2)); // Mammuthus, Smilodon
    assert_eq!(summary[1].distinct_taxa, Some(1));
    assert_eq!(summary[2].occurrences, 0);
    assert_eq!(summary[3].occurrences, 2);
    assert_eq!(summary[3].distinct_taxa, Some(1)); // null genus skipped
    let table = render_summary_table(&summary);
    assert_eq!(table.lines().count(), 5);
    let json: serde_json::Value = serde_json::from_str(&summary_to_json(&summary).unwrap()).unwrap();
    assert_eq!(json["total_occurrences"], 6);
}

#[test]
fn config_driven_summary_derives_midpoints() {
    let mut cfg = Config::default();
    let summary = summarize_with_config(&occurrences(), &cfg).unwrap();
    // midpoints over [1, 9] in 5 Myr steps -> [1, 6), [6, 11]
    assert_eq!(summary.len(), 2);
    assert_eq!((summary[0].occurrences, summary[0].distinct_taxa), (4, Some(3)));
    assert_eq!((summary[1].occurrences, summary[1].distinct_taxa), (2, Some(1)));

    cfg.columns.taxon = "family".into();
    let summary = summarize_with_config(&occurrences(), &cfg).unwrap();
    assert!(summary.iter().all(|b| b.distinct_taxa.is_none()));
}

#[test]
fn extreme_magnitudes_keep_max_in_last_bin() {
    assert_eq!(bin_index(&[0.0, 1e308], BinScheme::ByCount(3)).unwrap(), vec![1, 3]);
    assert!(bin_index(&[-1e308, 1e308], BinScheme::ByCount(1)).unwrap_err().is_invalid_input());
    assert!(bin_index(&[1e16, 1e16 + 4.0], BinScheme::ByWidth(0.5)).unwrap_err().is_configuration());
}
