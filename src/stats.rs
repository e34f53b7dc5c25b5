use crate::error::PlotError;
use crate::models::{Group, Record};
use ahash::AHashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Partition records by label.
///
/// Groups come back in the order their label is first seen, and records keep
/// their relative order inside each group.
pub fn group_by_label(records: &[Record]) -> Vec<Group> {
    let mut index: AHashMap<&str, usize> = AHashMap::new();
    let mut groups: Vec<Group> = Vec::new();
    for r in records {
        let slot = *index.entry(r.label.as_str()).or_insert_with(|| {
            groups.push(Group {
                label: r.label.clone(),
                records: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].records.push(r.clone());
    }
    groups
}

/// Result of an ordinary least-squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination; 1.0 when every y is identical.
    pub r_squared: f64,
    pub n: usize,
}

impl LinearFit {
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least-squares fit of `ys` on `xs`.
///
/// Uses centered sums, so two points give exactly the line through them.
///
/// ### Errors
/// - `LengthMismatch` if the slices differ in length
/// - `TooFewPoints` for fewer than two points
/// - `ConstantX` when all x-values are equal
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Result<LinearFit, PlotError> {
    if xs.len() != ys.len() {
        return Err(PlotError::LengthMismatch {
            what: "y-values",
            expected: xs.len(),
            found: ys.len(),
        });
    }
    let n = xs.len();
    if n < 2 {
        return Err(PlotError::TooFewPoints { n });
    }

    let nf = n as f64;
    let mean_x = xs.iter().sum::<f64>() / nf;
    let mean_y = ys.iter().sum::<f64>() / nf;

    let (mut sxx, mut sxy, mut syy) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let constant_x = xs.iter().all(|x| *x == xs[0]);
    if constant_x || !sxx.is_finite() || sxx <= 0.0 {
        return Err(PlotError::ConstantX);
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let r_squared = if syy > 0.0 {
        (sxy * sxy) / (sxx * syy)
    } else {
        1.0
    };

    Ok(LinearFit {
        slope,
        intercept,
        r_squared,
        n,
    })
}

/// What to do with a group whose x-values are all identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitPolicy {
    /// Keep the scatter points, omit the trendline.
    #[default]
    Skip,
    /// Abort with `PlotError::DegenerateFit`.
    Fail,
}

/// Fit every group that has at least two points.
///
/// Single-point groups yield `None` and never raise. Constant-x groups follow
/// `policy`; under `FitPolicy::Fail` they raise `DegenerateFit` with the group label.
pub fn fit_groups(
    groups: &[Group],
    policy: FitPolicy,
) -> Result<Vec<Option<LinearFit>>, PlotError> {
    let mut fits = Vec::with_capacity(groups.len());
    for g in groups {
        if g.len() < 2 {
            debug!("group '{}' has {} point(s), no trendline", g.label, g.len());
            fits.push(None);
            continue;
        }
        match linear_fit(&g.xs(), &g.ys()) {
            Ok(fit) => {
                debug!(
                    "group '{}': slope={:.6} intercept={:.6} r2={:.4}",
                    g.label, fit.slope, fit.intercept, fit.r_squared
                );
                fits.push(Some(fit));
            }
            Err(PlotError::ConstantX) => match policy {
                FitPolicy::Skip => {
                    warn!("skipping trendline for '{}': constant x-values", g.label);
                    fits.push(None);
                }
                FitPolicy::Fail => {
                    return Err(PlotError::DegenerateFit {
                        label: g.label.clone(),
                    });
                }
            },
            Err(e) => return Err(e),
        }
    }
    Ok(fits)
}

/// Per-group summary of the points and their trendline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FitSummary {
    pub label: String,
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub slope: Option<f64>,
    pub intercept: Option<f64>,
    pub r_squared: Option<f64>,
}

/// Pair each group with its fit. `fits` must be aligned with `groups`.
pub fn summarize(
    groups: &[Group],
    fits: &[Option<LinearFit>],
) -> Result<Vec<FitSummary>, PlotError> {
    if groups.len() != fits.len() {
        return Err(PlotError::LengthMismatch {
            what: "fits",
            expected: groups.len(),
            found: fits.len(),
        });
    }
    Ok(groups
        .iter()
        .zip(fits)
        .map(|(g, fit)| {
            let xs = g.xs();
            FitSummary {
                label: g.label.clone(),
                count: g.len(),
                x_min: xs.iter().cloned().fold(f64::INFINITY, f64::min),
                x_max: xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
                slope: fit.map(|f| f.slope),
                intercept: fit.map(|f| f.intercept),
                r_squared: fit.map(|f| f.r_squared),
            }
        })
        .collect())
}
