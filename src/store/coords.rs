//! Plain-text coordinate files.
//!
//! ```text
//! x,y
//! 16.000000,5.000000
//! ...
//! ```
//!
//! One point per line, comma-delimited, header always written and optional on read.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    foundation::core::Point2D,
    foundation::error::{HeartError, HeartResult},
};

/// Field delimiter.
pub const DELIMITER: char = ',';
/// Header line written ahead of the rows.
pub const HEADER: &str = "x,y";

/// How coordinates are formatted as decimal text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Precision {
    /// Fixed number of digits after the decimal point (`%.Nf`).
    Fixed(u8),
    /// Shortest text that parses back to the identical `f64`.
    Shortest,
}

impl Default for Precision {
    fn default() -> Self {
        Self::Fixed(6)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub precision: Precision,
    /// Repeat the first point after the last one.
    pub close_loop: bool,
}

/// Write `points` to `path` with default options.
pub fn write(path: impl AsRef<Path>, points: &[Point2D]) -> HeartResult<()> {
    write_with(path, points, &WriteOptions::default())
}

#[tracing::instrument(skip_all, fields(path = %path.as_ref().display(), rows = points.len()))]
pub fn write_with(
    path: impl AsRef<Path>,
    points: &[Point2D],
    opts: &WriteOptions,
) -> HeartResult<()> {
    let path = path.as_ref();
    if let Some(idx) = points.iter().position(|p| !p.is_finite()) {
        return Err(HeartError::invalid_argument(format!(
            "point {idx} is not finite: {:?}",
            points[idx]
        )));
    }

    let file = File::create(path).map_err(|e| HeartError::io(path, e))?;
    let mut w = BufWriter::new(file);
    write_to(&mut w, points, opts).map_err(|e| HeartError::io(path, e))?;
    w.flush().map_err(|e| HeartError::io(path, e))?;

    tracing::info!(path = %path.display(), rows = points.len(), "wrote coordinates");
    Ok(())
}

/// Serialize `points` (header included) into any writer.
pub fn write_to<W: Write>(w: &mut W, points: &[Point2D], opts: &WriteOptions) -> std::io::Result<()> {
    writeln!(w, "{HEADER}")?;
    for p in points {
        write_row(w, *p, opts.precision)?;
    }
    if opts.close_loop
        && let Some(&first) = points.first()
    {
        write_row(w, first, opts.precision)?;
    }
    Ok(())
}

fn write_row<W: Write>(w: &mut W, p: Point2D, precision: Precision) -> std::io::Result<()> {
    match precision {
        Precision::Fixed(digits) => {
            let d = usize::from(digits);
            writeln!(w, "{:.d$}{DELIMITER}{:.d$}", p.x, p.y)
        }
        Precision::Shortest => writeln!(w, "{}{DELIMITER}{}", p.x, p.y),
    }
}

/// Read every point from `path`; any malformed row fails the whole read.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read(path: impl AsRef<Path>) -> HeartResult<Vec<Point2D>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| HeartError::io(path, e))?;
    let points = read_from(BufReader::new(file), path)?;
    tracing::info!(path = %path.display(), rows = points.len(), "read coordinates");
    Ok(points)
}

/// Parse coordinates from any buffered reader; `source` labels errors.
///
/// Input without a single data row is a parse error.
pub fn read_from<R: BufRead>(reader: R, source: impl Into<PathBuf>) -> HeartResult<Vec<Point2D>> {
    let source = source.into();
    let mut points = Vec::new();
    let mut seen_first = false;
    let mut last_line = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = line.map_err(|e| HeartError::io(&source, e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let is_first = !seen_first;
        seen_first = true;
        if is_first && is_header(line) {
            tracing::debug!(line = line_no, header = line, "skipping header");
            continue;
        }

        let p = parse_row(line).map_err(|msg| HeartError::parse(&source, line_no, msg))?;
        points.push(p);
    }

    if points.is_empty() {
        return Err(HeartError::parse(
            &source,
            last_line.max(1),
            "no coordinate rows (expected two columns x,y)",
        ));
    }
    Ok(points)
}

/// A header is a row in which no field reads as a number.
fn is_header(line: &str) -> bool {
    line.split(DELIMITER)
        .all(|f| f.trim().parse::<f64>().is_err())
}

fn parse_row(line: &str) -> Result<Point2D, String> {
    let fields: Vec<&str> = line.split(DELIMITER).map(str::trim).collect();
    let [xs, ys] = fields.as_slice() else {
        return Err(format!(
            "expected 2 fields separated by '{DELIMITER}', found {}",
            fields.len()
        ));
    };
    Ok(Point2D::new(parse_field(xs, "x")?, parse_field(ys, "y")?))
}

fn parse_field(text: &str, name: &str) -> Result<f64, String> {
    let v: f64 = text
        .parse()
        .map_err(|_| format!("{name} field '{text}' is not a number"))?;
    if !v.is_finite() {
        return Err(format!("{name} field '{text}' is not finite"));
    }
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/store/coords.rs"]
mod tests;
