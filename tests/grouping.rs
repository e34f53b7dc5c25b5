use std::collections::HashSet;
use trendplot::PlotError;
use trendplot::dataset::{self, ACTIONS, X_COORDS, Y_COORDS};
use trendplot::models::{Record, records_from_columns};
use trendplot::stats::group_by_label;

fn rec(label: &str, x: f64, y: f64) -> Record {
    Record::new(label, x, y)
}

#[test]
fn every_record_lands_in_exactly_one_group() {
    let records = vec![
        rec("b", 1.0, 1.0),
        rec("a", 2.0, 2.0),
        rec("b", 3.0, 3.0),
        rec("c", 4.0, 4.0),
        rec("a", 5.0, 5.0),
        rec("b", 6.0, 6.0),
    ];
    let groups = group_by_label(&records);

    let total: usize = groups.iter().map(|g| g.len()).sum();
    assert_eq!(total, records.len());

    let labels: HashSet<&str> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels.len(), groups.len(), "labels are unique across groups");

    for g in &groups {
        assert!(g.records.iter().all(|r| r.label == g.label));
    }
    for r in &records {
        let hits = groups
            .iter()
            .filter(|g| g.records.iter().any(|m| m == r))
            .count();
        assert_eq!(hits, 1, "{r:?} appears in exactly one group");
    }
}

#[test]
fn groups_follow_first_seen_order_and_keep_inner_order() {
    let records = vec![
        rec("b", 1.0, 0.0),
        rec("a", 2.0, 0.0),
        rec("b", 3.0, 0.0),
        rec("a", 4.0, 0.0),
    ];
    let groups = group_by_label(&records);
    let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, ["b", "a"]);
    assert_eq!(groups[0].xs(), vec![1.0, 3.0]);
    assert_eq!(groups[1].xs(), vec![2.0, 4.0]);
}

#[test]
fn labels_match_on_exact_string_equality() {
    let records = vec![rec("walk", 0.0, 0.0), rec("walk ", 1.0, 0.0), rec("Walk", 2.0, 0.0)];
    assert_eq!(group_by_label(&records).len(), 3);
}

#[test]
fn empty_input_gives_no_groups() {
    assert!(group_by_label(&[]).is_empty());
}

#[test]
fn builtin_dataset_has_three_groups() {
    let records = dataset::builtin_records().unwrap();
    assert_eq!(records.len(), 11);

    let groups = group_by_label(&records);
    let shape: Vec<(&str, usize)> = groups.iter().map(|g| (g.label.as_str(), g.len())).collect();
    assert_eq!(shape, [("walk", 4), ("walk, jump", 4), ("jump", 3)]);
}

#[test]
fn builtin_columns_are_aligned() {
    assert_eq!(ACTIONS.len(), X_COORDS.len());
    assert_eq!(X_COORDS.len(), Y_COORDS.len());
}

#[test]
fn mismatched_columns_fail_fast() {
    let err = records_from_columns(&ACTIONS, &X_COORDS[..10], &Y_COORDS).unwrap_err();
    assert_eq!(
        err,
        PlotError::ShapeMismatch {
            labels: 11,
            xs: 10,
            ys: 11
        }
    );
}
