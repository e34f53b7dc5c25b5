//! Legend layout and drawing for the external legend panel.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::types::LegendMode;
use super::util::{estimate_text_width_px, truncate_to_width};

// Shared by the estimator and the drawing code.
const FONT_PX: u32 = 14;
const TITLE_FONT_PX: u32 = 16;
const LINE_H: i32 = FONT_PX as i32 + 4;
const PAD: i32 = 8;
const MARKER_RADIUS: i32 = 4;
const MARKER_TO_TEXT_GAP: i32 = 12;
const TRAILING_GAP: i32 = 16;

fn block_width(label: &str) -> i32 {
    MARKER_TO_TEXT_GAP
        + MARKER_RADIUS
        + estimate_text_width_px(label, FONT_PX) as i32
        + TRAILING_GAP
}

/// Greedy row packing for the Top/Bottom band. Returns item indices per row.
fn pack_rows(labels: &[&str], start_x: i32, total_w: i32) -> Vec<Vec<usize>> {
    let usable = total_w - PAD;
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut cur: Vec<usize> = Vec::new();
    let mut x = start_x;
    for (i, label) in labels.iter().enumerate() {
        let w = block_width(label);
        if x + w > usable && !cur.is_empty() {
            rows.push(std::mem::take(&mut cur));
            x = start_x;
        }
        x += w;
        cur.push(i);
    }
    if !cur.is_empty() {
        rows.push(cur);
    }
    rows
}

/// Height in pixels the Top/Bottom legend band needs for `labels`.
pub fn estimate_top_bottom_legend_height_px(
    labels: &[&str],
    start_x: i32,
    total_w: i32,
    has_title: bool,
) -> i32 {
    let rows = pack_rows(labels, start_x, total_w).len().max(1) as i32;
    let title_h = if has_title {
        TITLE_FONT_PX as i32 + 6
    } else {
        0
    };
    PAD + title_h + rows * LINE_H + PAD
}

/// Draw the legend panel.
///
/// - `Right`: title, then one entry per line; long labels are truncated.
/// - `Top` / `Bottom`: title, then entries flowing left to right starting at
///   `axis_x_start_px` so the band lines up with the plot's Y axis.
pub fn draw_legend_panel<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    items: &[(String, RGBColor)],
    title: &str,
    placement: LegendMode,
    axis_x_start_px: i32,
) -> Result<()> {
    legend_area
        .fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let (w_u32, _) = legend_area.dim_in_pixel();
    let w = w_u32 as i32;

    let has_title = !title.trim().is_empty();
    let title_style: TextStyle = TextStyle::from((FontFamily::SansSerif, TITLE_FONT_PX))
        .pos(Pos::new(HPos::Left, VPos::Top));
    let label_style: TextStyle =
        TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));

    let (start_x, mut y) = match placement {
        LegendMode::Right => (PAD, PAD + 24),
        LegendMode::Top | LegendMode::Bottom => (axis_x_start_px, PAD),
    };

    if has_title {
        legend_area
            .draw(&Text::new(title, (start_x, y), title_style))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        y += TITLE_FONT_PX as i32 + 6;
    }

    match placement {
        LegendMode::Right => {
            let text_x = start_x + MARKER_RADIUS * 2 + MARKER_TO_TEXT_GAP;
            let max_text_w = (w - text_x - PAD).max(24) as u32;
            for (label, color) in items {
                let center_y = y + LINE_H / 2;
                legend_area
                    .draw(&Circle::new(
                        (start_x + MARKER_RADIUS, center_y),
                        MARKER_RADIUS,
                        color.filled(),
                    ))
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                let text = truncate_to_width(label, FONT_PX, max_text_w);
                legend_area
                    .draw(&Text::new(text, (text_x, center_y), label_style.clone()))
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                y += LINE_H;
            }
        }
        LegendMode::Top | LegendMode::Bottom => {
            let labels: Vec<&str> = items.iter().map(|(l, _)| l.as_str()).collect();
            for row in pack_rows(&labels, start_x, w) {
                let center_y = y + LINE_H / 2;
                let mut x = start_x;
                for i in row {
                    let (label, color) = &items[i];
                    legend_area
                        .draw(&Circle::new(
                            (x + MARKER_RADIUS, center_y),
                            MARKER_RADIUS,
                            color.filled(),
                        ))
                        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                    legend_area
                        .draw(&Text::new(
                            label.as_str(),
                            (x + MARKER_RADIUS + MARKER_TO_TEXT_GAP, center_y),
                            label_style.clone(),
                        ))
                        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                    x += block_width(label);
                }
                y += LINE_H;
            }
        }
    }

    Ok(())
}
