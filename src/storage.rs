use crate::stats::FitSummary;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save per-group fit summaries as CSV with header. Missing fits are empty cells.
pub fn save_csv<P: AsRef<Path>>(rows: &[FitSummary], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.serialize(("label", "count", "x_min", "x_max", "slope", "intercept", "r_squared"))?;
    for r in rows {
        wtr.serialize((
            &r.label,
            r.count,
            r.x_min,
            r.x_max,
            r.slope,
            r.intercept,
            r.r_squared,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save per-group fit summaries as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(rows: &[FitSummary], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Dispatch on the file extension (`json`, otherwise CSV).
pub fn save_summary<P: AsRef<Path>>(rows: &[FitSummary], path: P) -> Result<()> {
    let path = path.as_ref();
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => save_json(rows, path),
        Some("csv") | None => save_csv(rows, path),
        Some(other) => anyhow::bail!("unsupported export format: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rows() -> Vec<FitSummary> {
        vec![
            FitSummary {
                label: "walk, jump".into(),
                count: 2,
                x_min: 0.0,
                x_max: 1.0,
                slope: Some(2.0),
                intercept: Some(1.0),
                r_squared: Some(1.0),
            },
            FitSummary {
                label: "solo".into(),
                count: 1,
                x_min: 3.0,
                x_max: 3.0,
                slope: None,
                intercept: None,
                r_squared: None,
            },
        ]
    }

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("fits.csv");
        let jsonp = dir.path().join("fits.json");
        save_csv(&rows(), &csvp).unwrap();
        save_json(&rows(), &jsonp).unwrap();

        let txt = std::fs::read_to_string(&csvp).unwrap();
        assert!(txt.starts_with("label,count,x_min,x_max,slope,intercept,r_squared"));
        // label containing a comma is quoted
        assert!(txt.contains("\"walk, jump\",2,"));
        assert!(txt.contains("solo,1,3.0,3.0,,,"));
        assert!(jsonp.exists());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempdir().unwrap();
        assert!(save_summary(&rows(), dir.path().join("fits.xlsx")).is_err());
    }
}
