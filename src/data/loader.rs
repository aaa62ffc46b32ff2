use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::Trace;
use crate::error::AnalysisResult;

/// Header written in front of exported traces.
pub const HEADER: [&str; 2] = ["Wavelength (nm)", "Power (dBm)"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load one trace from a comma-separated file.
pub fn load_trace(path: &Path) -> Result<Trace> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let trace = parse_trace(file).with_context(|| format!("reading {}", path.display()))?;
    log::debug!("{}: {} samples", path.display(), trace.len());
    Ok(trace)
}

/// Build a trace from already-parsed `(wavelength, power)` rows.
pub fn import_trace<I>(rows: I) -> AnalysisResult<Trace>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    Trace::from_samples(rows)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: the first row is a header and is skipped whatever it holds.
/// Column 0 is wavelength in nm, column 1 is power in dBm, any further
/// columns are ignored. Blank lines are skipped.
pub fn parse_trace<R: Read>(reader: R) -> Result<Trace> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(row_no as u64 + 2);

        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() < 2 {
            bail!(
                "line {line}: expected wavelength and power columns, found {} column(s)",
                record.len()
            );
        }

        let wavelength = parse_cell(&record[0], line, "wavelength")?;
        let power = parse_cell(&record[1], line, "power")?;
        rows.push((wavelength, power));
    }

    if rows.is_empty() {
        bail!("no data rows after the header");
    }

    let trace = import_trace(rows)?;
    if !trace.is_increasing() {
        log::warn!("wavelengths are not strictly increasing");
    }
    Ok(trace)
}

fn parse_cell(s: &str, line: u64, col: &str) -> Result<f64> {
    s.parse::<f64>()
        .with_context(|| format!("line {line}, {col}: '{s}' is not a number"))
}

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

/// Write `trace` in the layout [`parse_trace`] reads.
pub fn write_trace(path: &Path, trace: &Trace) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(HEADER)?;
    for (wavelength, power) in trace.samples() {
        writer.write_record(&[wavelength.to_string(), power.to_string()])?;
    }
    writer.flush().context("flushing CSV writer")?;
    Ok(())
}
