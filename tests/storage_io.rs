use std::fs;
use tempfile::TempDir;
use trendplot::dataset;
use trendplot::stats::{FitPolicy, fit_groups, group_by_label, summarize};
use trendplot::storage;

fn builtin_summary() -> Vec<trendplot::stats::FitSummary> {
    let records = dataset::builtin_records().unwrap();
    let groups = group_by_label(&records);
    let fits = fit_groups(&groups, FitPolicy::Skip).unwrap();
    summarize(&groups, &fits).unwrap()
}

#[test]
fn save_csv_and_json() {
    let rows = builtin_summary();
    let dir = TempDir::new().unwrap();

    let csv_path = dir.path().join("fits.csv");
    storage::save_summary(&rows, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("label,count,"));
    assert_eq!(csv_txt.lines().count(), 1 + rows.len());

    let json_path = dir.path().join("fits.JSON");
    storage::save_summary(&rows, &json_path).unwrap();
    let json_txt = fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json_txt).unwrap();
    assert_eq!(v.as_array().unwrap().len(), rows.len());
    assert_eq!(v[0]["label"], "walk");
    assert_eq!(v[0]["count"], 4);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no/such/dir/fits.csv");
    assert!(storage::save_csv(&builtin_summary(), path).is_err());
}
