//! trendplot
//!
//! Scatter plot of labeled (x, y) records with one dashed least-squares
//! trendline per label. Pairs with the `trendplot` CLI.
//!
//! ### Features
//! - Group records by label in first-seen order (stable colors and legend)
//! - Ordinary least-squares fit per group, with a policy for constant-x groups
//! - Render to SVG, PNG, an RGB buffer, or an on-screen window
//! - Export per-group fit summaries as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use trendplot::viz::{Figure, RenderOptions};
//!
//! let records = trendplot::dataset::builtin_records()?;
//! let figure = Figure::from_records(&records, &RenderOptions::default())?;
//! figure.save("actions.svg", 1000, 600)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod dataset;
pub mod display;
pub mod error;
pub mod models;
pub mod stats;
pub mod storage;
pub mod viz;

pub use display::show;
pub use error::PlotError;
pub use models::{Group, Record};
pub use stats::{FitPolicy, LinearFit, group_by_label, linear_fit};
pub use viz::{Figure, render};
