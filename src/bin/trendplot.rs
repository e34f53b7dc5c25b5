use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use trendplot::stats::{self, FitPolicy};
use trendplot::viz::{self, LegendMode, PaletteKind};
use trendplot::{dataset, display, storage};

#[derive(Parser, Debug)]
#[command(
    name = "trendplot",
    version,
    about = "Scatter plot with per-action trendlines from the built-in dataset"
)]
struct Cli {
    /// Write the chart to this path (.svg or .png) instead of opening a window.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Open the window even when --out is given.
    #[arg(long, default_value_t = false)]
    show: bool,
    /// Width of the plot in pixels (1 to 8192).
    #[arg(
        long,
        default_value_t = viz::DEFAULT_WIDTH,
        value_parser = clap::value_parser!(u32).range(1..=viz::MAX_DIMENSION as i64),
    )]
    width: u32,
    /// Height of the plot in pixels (1 to 8192).
    #[arg(
        long,
        default_value_t = viz::DEFAULT_HEIGHT,
        value_parser = clap::value_parser!(u32).range(1..=viz::MAX_DIMENSION as i64),
    )]
    height: u32,
    /// Legend placement.
    #[arg(long, value_enum, default_value_t = LegendArg::Right)]
    legend: LegendArg,
    /// Color palette for the groups.
    #[arg(long, value_enum, default_value_t = PaletteArg::Tab10)]
    palette: PaletteArg,
    /// What to do when a group's x-values are all identical.
    #[arg(long, value_enum, default_value_t = DegenerateArg::Skip)]
    on_degenerate: DegenerateArg,
    /// Print per-group fit statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
    /// Save per-group fit statistics (.csv or .json).
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LegendArg {
    Right,
    Top,
    Bottom,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PaletteArg {
    Tab10,
    Office,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DegenerateArg {
    Skip,
    Fail,
}

impl From<LegendArg> for LegendMode {
    fn from(v: LegendArg) -> Self {
        match v {
            LegendArg::Right => LegendMode::Right,
            LegendArg::Top => LegendMode::Top,
            LegendArg::Bottom => LegendMode::Bottom,
        }
    }
}

impl From<PaletteArg> for PaletteKind {
    fn from(v: PaletteArg) -> Self {
        match v {
            PaletteArg::Tab10 => PaletteKind::Tab10,
            PaletteArg::Office => PaletteKind::Office,
        }
    }
}

impl From<DegenerateArg> for FitPolicy {
    fn from(v: DegenerateArg) -> Self {
        match v {
            DegenerateArg::Skip => FitPolicy::Skip,
            DegenerateArg::Fail => FitPolicy::Fail,
        }
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let records = dataset::builtin_records()?;
    let groups = stats::group_by_label(&records);
    let fits = stats::fit_groups(&groups, cli.on_degenerate.into())?;
    let colors = viz::colors_for(cli.palette.into(), groups.len());
    let figure = viz::render(&groups, &colors, &fits)?.with_legend(cli.legend.into());

    if cli.stats || cli.export.is_some() {
        let summaries = stats::summarize(&groups, &fits)?;
        if cli.stats {
            for s in &summaries {
                println!(
                    "{}  count={}  x=[{}, {}]  slope={} intercept={} r2={}",
                    s.label,
                    s.count,
                    fmt_opt(Some(s.x_min)),
                    fmt_opt(Some(s.x_max)),
                    fmt_opt(s.slope),
                    fmt_opt(s.intercept),
                    fmt_opt(s.r_squared)
                );
            }
        }
        if let Some(path) = cli.export.as_ref() {
            storage::save_summary(&summaries, path)?;
            eprintln!("Saved {} groups to {}", summaries.len(), path.display());
        }
    }

    if let Some(plot_path) = cli.out.as_ref() {
        figure.save(plot_path, cli.width, cli.height)?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }

    if cli.out.is_none() || cli.show {
        display::show(&figure, cli.width, cli.height)?;
    }

    Ok(())
}
