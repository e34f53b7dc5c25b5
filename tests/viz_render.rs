use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use trendplot::PlotError;
use trendplot::dataset;
use trendplot::viz::{Figure, LegendMode, MAX_DIMENSION, PaletteKind, RenderOptions};

fn figure(legend: LegendMode) -> Figure {
    let records = dataset::builtin_records().unwrap();
    let opts = RenderOptions {
        legend,
        ..Default::default()
    };
    Figure::from_records(&records, &opts).unwrap()
}

fn write_and_check<F: Fn(&Path)>(maker: F, dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    maker(&path);
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "{name} has content");
    path
}

#[test]
fn legend_modes_produce_svg_files() {
    let dir = TempDir::new().unwrap();
    let modes = [LegendMode::Right, LegendMode::Top, LegendMode::Bottom];
    for (i, mode) in modes.iter().enumerate() {
        write_and_check(
            |p| figure(*mode).save(p, 800, 480).unwrap(),
            &dir,
            &format!("legend{i}.svg"),
        );
    }
}

fn svg_text(legend: LegendMode, dir: &TempDir, name: &str) -> String {
    let path = write_and_check(|p| figure(legend).save(p, 1000, 600).unwrap(), dir, name);
    fs::read_to_string(path).unwrap()
}

/// Lines of the SVG whose trimmed content is exactly `text`.
fn exact_lines(svg: &str, text: &str) -> usize {
    svg.lines().filter(|l| l.trim() == text).count()
}

#[test]
fn svg_contains_annotations_and_labels() {
    let dir = TempDir::new().unwrap();
    let svg = svg_text(LegendMode::Right, &dir, "annotated.svg");
    for text in [
        "Scatter Plot with Trendlines Grouped by Action",
        "X-coordinate",
        "Y-coordinate",
    ] {
        assert_eq!(exact_lines(&svg, text), 1, "svg draws {text:?} once");
    }
}

#[test]
fn legend_has_title_and_one_entry_per_group() {
    let dir = TempDir::new().unwrap();
    for (i, mode) in [LegendMode::Right, LegendMode::Top, LegendMode::Bottom]
        .into_iter()
        .enumerate()
    {
        let svg = svg_text(mode, &dir, &format!("legend_text{i}.svg"));
        for text in ["Action", "walk", "walk, jump", "jump"] {
            assert_eq!(exact_lines(&svg, text), 1, "{mode:?} legend shows {text:?}");
        }
    }
}

#[test]
fn trendlines_are_drawn_as_dash_segments() {
    let dir = TempDir::new().unwrap();
    let fig = figure(LegendMode::Right);
    let path = write_and_check(|p| fig.save(p, 1000, 600).unwrap(), &dir, "dashed.svg");
    let svg = fs::read_to_string(path).unwrap();

    for layer in &fig.layers {
        let c = layer.color;
        let stroke = format!("stroke=\"#{:02X}{:02X}{:02X}\"", c.0, c.1, c.2);
        let segments: Vec<&str> = svg
            .lines()
            .filter(|l| l.contains("<polyline") && l.contains(&stroke))
            .collect();
        assert!(
            segments.len() >= 5,
            "'{}' trendline has {} segments",
            layer.label,
            segments.len()
        );
        for seg in segments {
            let start = seg.find("points=\"").unwrap() + "points=\"".len();
            let end = start + seg[start..].find('"').unwrap();
            let n = seg[start..end].split_whitespace().count();
            assert!(n <= 3, "dash segment with {n} points: {seg}");
        }
    }
}

#[test]
fn png_output_is_written() {
    let dir = TempDir::new().unwrap();
    let path = write_and_check(
        |p| figure(LegendMode::Bottom).save(p, 640, 400).unwrap(),
        &dir,
        "chart.png",
    );
    let bytes = fs::read(path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn rgb_buffer_has_expected_size_and_is_not_blank() {
    let buf = figure(LegendMode::Right).to_rgb(320, 200).unwrap();
    assert_eq!(buf.len(), 320 * 200 * 3);
    assert!(buf.iter().any(|b| *b != 255), "something besides the white background");
}

#[test]
fn zero_or_oversized_dimensions_are_rejected() {
    let fig = figure(LegendMode::Right);
    let err = fig.to_rgb(0, 10).unwrap_err();
    assert_eq!(
        err.downcast_ref::<PlotError>(),
        Some(&PlotError::InvalidSize {
            width: 0,
            height: 10,
            max: MAX_DIMENSION,
        })
    );
    assert!(fig.to_rgb(10, MAX_DIMENSION + 1).is_err());

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.svg");
    assert!(fig.save(&path, 100, 0).is_err());
    assert!(!path.exists());
}

#[test]
fn office_palette_and_no_grid_still_render() {
    let dir = TempDir::new().unwrap();
    let records = dataset::builtin_records().unwrap();
    let opts = RenderOptions {
        palette: PaletteKind::Office,
        ..Default::default()
    };
    let mut fig = Figure::from_records(&records, &opts).unwrap();
    fig.grid = false;
    write_and_check(|p| fig.save(p, 800, 480).unwrap(), &dir, "plain.svg");
}
