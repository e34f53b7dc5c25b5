//! Public types and constants for the visualization module.

/// Legend placement options. All placements are drawn in a separate panel that
/// never overlaps the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendMode {
    /// Single-column panel on the right side.
    #[default]
    Right,
    /// Horizontal band above the chart.
    Top,
    /// Horizontal band below the chart.
    Bottom,
}

/// Qualitative palettes for group colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteKind {
    /// Matplotlib/Tableau "tab10".
    #[default]
    Tab10,
    /// Microsoft Office (2013+) chart series palette.
    Office,
}

pub const DEFAULT_TITLE: &str = "Scatter Plot with Trendlines Grouped by Action";
pub const DEFAULT_X_LABEL: &str = "X-coordinate";
pub const DEFAULT_Y_LABEL: &str = "Y-coordinate";
pub const DEFAULT_LEGEND_TITLE: &str = "Action";

/// 10 x 6 inches at 100 dpi.
pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Largest accepted width or height in pixels.
pub const MAX_DIMENSION: u32 = 8192;
