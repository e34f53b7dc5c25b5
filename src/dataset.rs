//! The embedded action dataset.

use crate::error::PlotError;
use crate::models::{Record, records_from_columns};

pub const ACTIONS: [&str; 11] = [
    "walk",
    "walk",
    "walk",
    "walk",
    "walk, jump",
    "walk, jump",
    "walk, jump",
    "walk, jump",
    "jump",
    "jump",
    "jump",
];

pub const X_COORDS: [f64; 11] = [
    -1.32017946243286,
    -0.772716284,
    1.495050554,
    -0.854718328,
    -0.394048899,
    1.930614471,
    -0.236513079,
    -1.136059761,
    -1.857286215,
    -0.813261318,
    -0.372564405,
];

pub const Y_COORDS: [f64; 11] = [
    -0.962910592555999,
    -2.306731701,
    -2.139530659,
    -0.974266708,
    -1.257809162,
    -1.644743434,
    -1.698970318,
    -1.424935818,
    0.481309354,
    0.708792029,
    -0.137964159,
];

/// The 11 built-in records, in index order.
pub fn builtin_records() -> Result<Vec<Record>, PlotError> {
    records_from_columns(&ACTIONS, &X_COORDS, &Y_COORDS)
}
