use thiserror::Error;

/// Errors raised while preparing the dataset or fitting trendlines.
///
/// Drawing and file I/O failures are not part of this enum; they surface as
/// `anyhow::Error` from the `viz` and `storage` functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotError {
    /// The parallel input columns do not have the same length.
    #[error("column length mismatch: {labels} labels, {xs} x-values, {ys} y-values")]
    ShapeMismatch { labels: usize, xs: usize, ys: usize },

    /// A per-item slice (y-values, colors, fits) is not aligned with the items it belongs to.
    #[error("{what}: expected {expected} entries, got {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// All x-values passed to a fit are identical, so the slope is undefined.
    #[error("all x-values are identical, the slope is undefined")]
    ConstantX,

    /// Every x-value in the group is identical, so its trendline cannot be drawn.
    #[error("cannot fit a trendline for '{label}': all x-values are identical")]
    DegenerateFit { label: String },

    /// A least-squares line needs at least two points.
    #[error("linear fit needs at least 2 points, got {n}")]
    TooFewPoints { n: usize },

    #[error("no data to plot")]
    EmptyDataset,

    #[error("figure size {width}x{height} is outside 1..={max} pixels per side")]
    InvalidSize { width: u32, height: u32, max: u32 },
}
