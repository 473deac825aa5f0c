//! Trace text format.
//!
//! A trace is a header row followed by one row per sample:
//!
//! ```text
//! t,pos_x,pos_y,force
//! 0,0.25,0.5,0.42
//! ```
//!
//! Export divides canvas coordinates by the canvas edge length so traces are
//! resolution independent. Import maps the columns back according to a
//! [`CoordinateMapping`].

use crate::config::CoordinateMapping;
use crate::sample::PointSample;
use thiserror::Error;

/// Header row written on export and skipped on import.
pub const HEADER: &str = "t,pos_x,pos_y,force";

const COLUMNS: [&str; 4] = ["t", "pos_x", "pos_y", "force"];

/// Codec errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("There are no points to export")]
    EmptyExport,
    #[error("There is no data to import ({skipped} malformed rows)")]
    NothingToImport { skipped: usize },
    #[error("Invalid canvas size: {0}")]
    InvalidTotalSize(f64),
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// A row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRow {
    /// 1-based line number, the header being line 1.
    pub line: usize,
    pub reason: String,
}

/// Outcome of a successful import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub malformed: Vec<MalformedRow>,
}

/// Points parsed from a trace together with the rows that were dropped.
#[derive(Debug, Clone, Default)]
pub struct ParsedTrace {
    pub points: Vec<PointSample>,
    pub malformed: Vec<MalformedRow>,
}

impl ParsedTrace {
    pub fn report(&self) -> ImportReport {
        ImportReport {
            imported: self.points.len(),
            skipped: self.malformed.len(),
            malformed: self.malformed.clone(),
        }
    }
}

fn check_total_size(total_size: f64) -> CodecResult<()> {
    if total_size.is_finite() && total_size > 0.0 {
        Ok(())
    } else {
        Err(CodecError::InvalidTotalSize(total_size))
    }
}

/// Render points as trace text.
pub fn export_points(points: &[PointSample], total_size: f64) -> CodecResult<String> {
    check_total_size(total_size)?;
    if points.is_empty() {
        return Err(CodecError::EmptyExport);
    }

    let mut rows = Vec::with_capacity(points.len() + 1);
    rows.push(HEADER.to_string());
    rows.extend(points.iter().map(|p| {
        format!(
            "{},{},{},{}",
            p.t(),
            p.x() / total_size,
            p.y() / total_size,
            p.force()
        )
    }));
    Ok(rows.join("\n"))
}

/// Parse trace text into canvas-space points.
///
/// Malformed rows are collected rather than failing the whole parse.
pub fn parse_trace(text: &str, total_size: f64, mapping: CoordinateMapping) -> CodecResult<ParsedTrace> {
    check_total_size(total_size)?;

    let mut parsed = ParsedTrace::default();
    for (index, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Ok([t, x, y, force]) => {
                let (x, y) = map_position(x, y, total_size, mapping);
                parsed.points.push(PointSample::new(x, y, force, t as i64));
            }
            Err(reason) => {
                log::warn!("Skipping trace line {}: {}", index + 1, reason);
                parsed.malformed.push(MalformedRow {
                    line: index + 1,
                    reason,
                });
            }
        }
    }
    Ok(parsed)
}

fn parse_row(line: &str) -> Result<[f64; 4], String> {
    let fields: Vec<&str> = line.split(',').take(5).collect();
    if fields.len() < COLUMNS.len() {
        return Err(format!("expected {} fields, found {}", COLUMNS.len(), fields.len()));
    }

    let mut values = [0.0; 4];
    for (slot, (field, column)) in values.iter_mut().zip(fields.iter().zip(COLUMNS)) {
        let field = field.trim();
        *slot = match field.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => return Err(format!("invalid {} value '{}'", column, field)),
        };
    }

    // `t` becomes an integer millisecond offset and must fit in one.
    let t = values[0].round();
    if !(i64::MIN as f64..i64::MAX as f64).contains(&t) {
        return Err(format!("t value '{}' out of range", fields[0].trim()));
    }
    values[0] = t;
    Ok(values)
}

fn map_position(x: f64, y: f64, total_size: f64, mapping: CoordinateMapping) -> (f64, f64) {
    match mapping {
        CoordinateMapping::Signed => (
            (x + 1.0) / 2.0 * total_size,
            total_size - (y + 1.0) / 2.0 * total_size,
        ),
        CoordinateMapping::Ratio => (x * total_size, y * total_size),
    }
}
