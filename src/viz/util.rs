//! Utility functions for visualization: palettes, axis ranges, text measurement.

use plotters::prelude::*;

use super::types::PaletteKind;

/// Matplotlib "tab10" qualitative palette.
const TAB10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),  // blue   (#1F77B4)
    RGBColor(255, 127, 14),  // orange (#FF7F0E)
    RGBColor(44, 160, 44),   // green  (#2CA02C)
    RGBColor(214, 39, 40),   // red    (#D62728)
    RGBColor(148, 103, 189), // purple (#9467BD)
    RGBColor(140, 86, 75),   // brown  (#8C564B)
    RGBColor(227, 119, 194), // pink   (#E377C2)
    RGBColor(127, 127, 127), // gray   (#7F7F7F)
    RGBColor(188, 189, 34),  // olive  (#BCBD22)
    RGBColor(23, 190, 207),  // cyan   (#17BECF)
];

/// Microsoft Office (2013+) chart series palette.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

pub fn palette(kind: PaletteKind) -> &'static [RGBColor; 10] {
    match kind {
        PaletteKind::Tab10 => &TAB10,
        PaletteKind::Office => &OFFICE10,
    }
}

/// Color for the label at `label_index` in group order. Wraps after 10 labels.
#[inline]
pub fn color_for(kind: PaletteKind, label_index: usize) -> RGBColor {
    let p = palette(kind);
    p[label_index % p.len()]
}

/// One color per group, in group order.
pub fn colors_for(kind: PaletteKind, count: usize) -> Vec<RGBColor> {
    (0..count).map(|i| color_for(kind, i)).collect()
}

/// Min/max of `values` padded by `margin` (fraction of the span) on both sides.
/// A zero span is widened to ±1 so plotters gets a usable range.
pub fn padded_range(values: impl IntoIterator<Item = f64>, margin: f64) -> Option<(f64, f64)> {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values.into_iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo > hi {
        return None;
    }
    if (hi - lo).abs() < f64::EPSILON {
        return Some((lo - 1.0, hi + 1.0));
    }
    let pad = (hi - lo) * margin;
    Some((lo - pad, hi + pad))
}

/// Tick label with precision chosen from the axis span.
pub fn tick_label(v: f64, span: f64) -> String {
    let prec = if span >= 100.0 {
        0
    } else if span >= 10.0 {
        1
    } else {
        2
    };
    format!("{:.*}", prec, v)
}

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Cut `text` so it fits `max_px`, ending with an ellipsis when shortened.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out: String = String::new();
    for ch in text.chars() {
        let candidate = format!("{out}{ch}…");
        if estimate_text_width_px(&candidate, font_px) > max_px {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

/// Left label area width (px) that fits the widest Y tick label.
/// The formatter must match the one passed to `configure_mesh`.
pub fn compute_left_label_area_px(ymin: f64, ymax: f64, ticks: usize, font_px: u32) -> u32 {
    let span = ymax - ymin;
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let s = tick_label(ymin + span * t, span);
        max_px = max_px.max(estimate_text_width_px(&s, font_px));
    }
    // room for the tick marks and the rotated axis description
    max_px.saturating_add(36).clamp(56, 140)
}
