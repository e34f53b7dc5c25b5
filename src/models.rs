use crate::error::PlotError;
use serde::{Deserialize, Serialize};

/// One observation: an action label and its (x, y) coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

impl Record {
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
        }
    }
}

/// All records sharing one label, in their original relative order.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub label: String,
    pub records: Vec<Record>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.y).collect()
    }

    /// Points as `(x, y)` pairs, ready for a plotters series.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.records.iter().map(|r| (r.x, r.y)).collect()
    }
}

/// Zip three parallel columns into records.
///
/// ### Errors
/// `PlotError::ShapeMismatch` when the columns differ in length.
pub fn records_from_columns<S: AsRef<str>>(
    labels: &[S],
    xs: &[f64],
    ys: &[f64],
) -> Result<Vec<Record>, PlotError> {
    if labels.len() != xs.len() || xs.len() != ys.len() {
        return Err(PlotError::ShapeMismatch {
            labels: labels.len(),
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    Ok(labels
        .iter()
        .zip(xs.iter().zip(ys))
        .map(|(label, (x, y))| Record::new(label.as_ref(), *x, *y))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_zip_in_index_order() {
        let recs = records_from_columns(&["a", "b"], &[1.0, 2.0], &[3.0, 4.0]).unwrap();
        assert_eq!(recs, vec![Record::new("a", 1.0, 3.0), Record::new("b", 2.0, 4.0)]);
    }

    #[test]
    fn uneven_columns_are_rejected() {
        let err = records_from_columns(&["a", "b"], &[1.0], &[3.0, 4.0]).unwrap_err();
        assert_eq!(
            err,
            PlotError::ShapeMismatch {
                labels: 2,
                xs: 1,
                ys: 2
            }
        );
    }
}
