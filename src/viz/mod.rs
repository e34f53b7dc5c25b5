//! Visualization: build a scatter-with-trendlines [`Figure`] and render it to
//! **SVG**, **PNG**, or an in-memory RGB buffer.
//!
//! - One scatter layer per group, colored from a qualitative palette
//! - Dashed least-squares trendline per group, sampled at the group's own x-values
//! - Titled legend in a separate panel (`Right`, `Top`, `Bottom`)
//! - Grid, axis descriptions, and a chart title

pub mod legend;
pub mod types;
pub mod util;

pub use types::{
    DEFAULT_HEIGHT, DEFAULT_LEGEND_TITLE, DEFAULT_TITLE, DEFAULT_WIDTH, DEFAULT_X_LABEL,
    DEFAULT_Y_LABEL, LegendMode, MAX_DIMENSION, PaletteKind,
};
pub use util::{color_for, colors_for};

use crate::error::PlotError;
use crate::models::{Group, Record};
use crate::stats::{FitPolicy, LinearFit, fit_groups, group_by_label};
use anyhow::Result;
use log::{debug, info};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use legend::{draw_legend_panel, estimate_top_bottom_legend_height_px};
use util::{compute_left_label_area_px, padded_range, tick_label};

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        if plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        )
        .is_err()
        {
            log::error!("embedded sans-serif font could not be registered");
        }
    });
}

/// Fraction of the data span added on each side of both axes.
const AXIS_MARGIN: f64 = 0.05;
const MARKER_PX: i32 = 4;

/// On/off lengths of a dashed stroke, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashPattern {
    pub on_px: u32,
    pub off_px: u32,
}

impl DashPattern {
    pub const TRENDLINE: DashPattern = DashPattern {
        on_px: 8,
        off_px: 5,
    };

    pub fn is_dashed(&self) -> bool {
        self.on_px > 0 && self.off_px > 0
    }
}

/// Fitted line for one group, as drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Trendline {
    pub fit: LinearFit,
    /// `(x_i, slope * x_i + intercept)` for each x_i of the group, in group order.
    pub path: Vec<(f64, f64)>,
    pub dash: DashPattern,
}

/// Scatter points of one group plus its optional trendline.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterLayer {
    /// Legend entry.
    pub label: String,
    pub color: RGBColor,
    pub points: Vec<(f64, f64)>,
    /// Dashed, same color, no legend entry.
    pub trendline: Option<Trendline>,
}

/// Backend-independent description of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub legend: LegendMode,
    pub grid: bool,
    pub layers: Vec<ScatterLayer>,
}

fn check_size(width: u32, height: u32) -> Result<(), PlotError> {
    let ok = |v: u32| (1..=MAX_DIMENSION).contains(&v);
    if ok(width) && ok(height) {
        Ok(())
    } else {
        Err(PlotError::InvalidSize {
            width,
            height,
            max: MAX_DIMENSION,
        })
    }
}

/// Knobs for the records → figure pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub palette: PaletteKind,
    pub policy: FitPolicy,
    pub legend: LegendMode,
}

/// Assemble the figure from aligned `groups`, `colors`, and `fits`.
///
/// ### Errors
/// - `EmptyDataset` when there are no groups
/// - `LengthMismatch` when `colors` or `fits` are not aligned with `groups`
pub fn render(
    groups: &[Group],
    colors: &[RGBColor],
    fits: &[Option<LinearFit>],
) -> Result<Figure, PlotError> {
    if groups.is_empty() {
        return Err(PlotError::EmptyDataset);
    }
    if colors.len() != groups.len() {
        return Err(PlotError::LengthMismatch {
            what: "colors",
            expected: groups.len(),
            found: colors.len(),
        });
    }
    if fits.len() != groups.len() {
        return Err(PlotError::LengthMismatch {
            what: "fits",
            expected: groups.len(),
            found: fits.len(),
        });
    }

    let layers = groups
        .iter()
        .zip(colors)
        .zip(fits)
        .map(|((g, color), fit)| ScatterLayer {
            label: g.label.clone(),
            color: *color,
            points: g.points(),
            trendline: fit.map(|fit| Trendline {
                fit,
                path: g.records.iter().map(|r| (r.x, fit.predict(r.x))).collect(),
                dash: DashPattern::TRENDLINE,
            }),
        })
        .collect();

    Ok(Figure {
        title: DEFAULT_TITLE.to_string(),
        x_label: DEFAULT_X_LABEL.to_string(),
        y_label: DEFAULT_Y_LABEL.to_string(),
        legend_title: DEFAULT_LEGEND_TITLE.to_string(),
        legend: LegendMode::default(),
        grid: true,
        layers,
    })
}

impl Figure {
    /// Group, fit, color, and render `records` in one go.
    pub fn from_records(records: &[Record], opts: &RenderOptions) -> Result<Self, PlotError> {
        let groups = group_by_label(records);
        let fits = fit_groups(&groups, opts.policy)?;
        let colors = colors_for(opts.palette, groups.len());
        let mut fig = render(&groups, &colors, &fits)?;
        fig.legend = opts.legend;
        Ok(fig)
    }

    pub fn with_legend(mut self, legend: LegendMode) -> Self {
        self.legend = legend;
        self
    }

    pub fn series_count(&self) -> usize {
        self.layers.len()
    }

    pub fn trendline_count(&self) -> usize {
        self.layers.iter().filter(|l| l.trendline.is_some()).count()
    }

    /// Padded `((x_min, x_max), (y_min, y_max))` covering points and trendlines.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let all = || {
            self.layers.iter().flat_map(|l| {
                l.points
                    .iter()
                    .chain(l.trendline.iter().flat_map(|t| t.path.iter()))
                    .copied()
            })
        };
        let xr = padded_range(all().map(|(x, _)| x), AXIS_MARGIN)?;
        let yr = padded_range(all().map(|(_, y)| y), AXIS_MARGIN)?;
        Some((xr, yr))
    }

    /// Write the figure to `out_path`.
    ///
    /// `.svg` uses the SVG backend, anything else the bitmap backend.
    pub fn save<P: AsRef<Path>>(&self, out_path: P, width: u32, height: u32) -> Result<()> {
        check_size(width, height)?;
        ensure_fonts_registered();
        let out_path = out_path.as_ref();
        let path_string = out_path.to_string_lossy().into_owned();

        let is_svg = out_path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        if is_svg {
            let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
            self.draw(root)?;
        } else {
            let root =
                BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
            self.draw(root)?;
        }
        info!("wrote figure to {}", out_path.display());
        Ok(())
    }

    /// Render into a packed RGB8 buffer of `width * height * 3` bytes.
    pub fn to_rgb(&self, width: u32, height: u32) -> Result<Vec<u8>> {
        check_size(width, height)?;
        ensure_fonts_registered();
        let mut buf = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            self.draw(root)?;
        }
        Ok(buf)
    }

    /// Draw onto any plotters drawing area.
    pub fn draw<DB>(&self, root: DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
    {
        const MARGIN: i32 = 16;
        const Y_TICKS: usize = 10;
        const X_TICKS: usize = 10;

        let ((x_min, x_max), (y_min, y_max)) = self.bounds().ok_or(PlotError::EmptyDataset)?;
        let (x_span, y_span) = (x_max - x_min, y_max - y_min);

        let left_label_width_px = compute_left_label_area_px(y_min, y_max, Y_TICKS, 12);
        let axis_x_start_px = MARGIN + left_label_width_px as i32;

        let legend_items: Vec<(String, RGBColor)> = self
            .layers
            .iter()
            .map(|l| (l.label.clone(), l.color))
            .collect();

        root.fill(&WHITE).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let (root_w, root_h) = root.dim_in_pixel();

        let band_h = || {
            let labels: Vec<&str> = legend_items.iter().map(|(l, _)| l.as_str()).collect();
            estimate_top_bottom_legend_height_px(
                &labels,
                axis_x_start_px,
                root_w as i32,
                !self.legend_title.trim().is_empty(),
            )
            .max(40)
        };

        let (plot_area, legend_area) = match self.legend {
            LegendMode::Right => root.split_horizontally((85).percent_width()),
            LegendMode::Top => {
                let (legend, plot) = root.split_vertically(band_h());
                (plot, legend)
            }
            LegendMode::Bottom => {
                // keep at least 40px for plot area
                root.split_vertically((root_h as i32 - band_h()).max(40))
            }
        };

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(MARGIN as u32)
            .caption(self.title.as_str(), (FontFamily::SansSerif, 22))
            .set_label_area_size(LabelAreaPosition::Left, left_label_width_px)
            .set_label_area_size(LabelAreaPosition::Bottom, 56)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let x_label_fmt = |v: &f64| tick_label(*v, x_span);
        let y_label_fmt = |v: &f64| tick_label(*v, y_span);

        {
            let mut mesh = chart.configure_mesh();
            mesh.x_desc(self.x_label.as_str())
                .y_desc(self.y_label.as_str())
                .x_labels(X_TICKS)
                .y_labels(Y_TICKS)
                .x_label_formatter(&x_label_fmt)
                .y_label_formatter(&y_label_fmt)
                .label_style((FontFamily::SansSerif, 12))
                .axis_desc_style((FontFamily::SansSerif, 16))
                .bold_line_style(RGBColor(200, 200, 200))
                .light_line_style(RGBColor(235, 235, 235));
            if !self.grid {
                mesh.disable_mesh();
            }
            mesh.draw().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }

        for layer in &self.layers {
            let color = layer.color;
            debug!(
                "drawing '{}' ({} points, trendline: {})",
                layer.label,
                layer.points.len(),
                layer.trendline.is_some()
            );
            chart
                .draw_series(
                    layer
                        .points
                        .iter()
                        .map(|(x, y)| Circle::new((*x, *y), MARKER_PX, color.filled())),
                )
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;

            if let Some(trend) = &layer.trendline {
                let style = color.stroke_width(2);
                let drawn = if trend.dash.is_dashed() {
                    chart.draw_series(DashedLineSeries::new(
                        trend.path.clone(),
                        trend.dash.on_px,
                        trend.dash.off_px,
                        style,
                    ))
                } else {
                    chart.draw_series(LineSeries::new(trend.path.clone(), style))
                };
                drawn.map_err(|e| anyhow::anyhow!("{:?}", e))?;
            }
        }

        draw_legend_panel(
            &legend_area,
            &legend_items,
            &self.legend_title,
            self.legend,
            axis_x_start_px,
        )?;

        root.present().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(())
    }
}
