//! Fixture file formats: polygons, edge descriptors, signatures.
//!
//! Layouts (one polygon per line, tab-separated on write, any whitespace
//! accepted on read; existing fixtures use both):
//! - polygon files: `x_0 y_0 x_1 y_1 ... x_{n-1} y_{n-1}`;
//! - descriptor files: `l_0 ... l_{n-1} phi_1 ... phi_{n-1} phi_0`. The angle
//!   of vertex 0 goes LAST, after the angles of vertices 1..n; readers and
//!   writers here preserve that layout exactly for round-trip compatibility;
//! - signature files: the n length singular values followed by the n angle
//!   singular values.
//!
//! A token that fails to parse aborts the file operation with an error; a
//! partially written output is not guaranteed well-formed.

use std::fmt;
use std::io::{self, BufRead, Write};

use crate::geom::{EdgeDescriptors, Polygon};

/// Decimal places written for fixture values.
const PREC: usize = 8;

/// Error reading or writing fixture files.
#[derive(Debug)]
pub enum FixtureError {
    Io(io::Error),
    Parse { line: usize, token: String },
    UnexpectedEof { line: usize },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "fixture i/o failed: {e}"),
            Self::Parse { line, token } => {
                write!(f, "line {line}: cannot parse {token:?} as a number")
            }
            Self::UnexpectedEof { line } => {
                write!(f, "line {line}: fewer values than expected")
            }
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FixtureError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

fn write_row<W: Write>(w: &mut W, values: impl IntoIterator<Item = f64>) -> io::Result<()> {
    let mut first = true;
    for v in values {
        if first {
            write!(w, "{v:.prec$}", prec = PREC)?;
            first = false;
        } else {
            write!(w, "\t{v:.prec$}", prec = PREC)?;
        }
    }
    writeln!(w)
}

/// Read `count` rows of `width` whitespace-separated numbers.
///
/// Values may spill across physical lines; the reported line number is
/// where the offending token (or the end of input) was found.
fn read_rows<R: BufRead>(r: &mut R, count: usize, width: usize) -> Result<Vec<Vec<f64>>, FixtureError> {
    let mut rows = Vec::with_capacity(count);
    let mut current: Vec<f64> = Vec::with_capacity(width);
    let mut line_no = 0usize;
    for line in r.lines() {
        let line = line?;
        line_no += 1;
        for token in line.split_whitespace() {
            let v: f64 = token.parse().map_err(|_| FixtureError::Parse {
                line: line_no,
                token: token.to_string(),
            })?;
            current.push(v);
            if current.len() == width {
                rows.push(std::mem::take(&mut current));
                if rows.len() == count {
                    return Ok(rows);
                }
            }
        }
    }
    Err(FixtureError::UnexpectedEof { line: line_no })
}

/// Write polygons one per line in flat coordinate order.
pub fn write_polygons<W: Write>(w: &mut W, polys: &[Polygon]) -> io::Result<()> {
    for p in polys {
        write_row(w, p.to_flat())?;
    }
    Ok(())
}

/// Read `count` polygons of `n` vertices each.
pub fn read_polygons<R: BufRead>(
    r: &mut R,
    count: usize,
    n: usize,
) -> Result<Vec<Polygon>, FixtureError> {
    let rows = read_rows(r, count, 2 * n)?;
    Ok(rows.iter().map(|row| Polygon::from_flat(row)).collect())
}

/// Write one descriptor line: lengths, then angles with vertex 0's last.
pub fn write_descriptors<W: Write>(w: &mut W, d: &EdgeDescriptors) -> io::Result<()> {
    let n = d.len();
    let values = d
        .l
        .iter()
        .copied()
        .chain((0..n).map(|i| d.phi[(i + 1) % n]));
    write_row(w, values)
}

/// Lengths and angles of one polygon, as read back from a descriptor file
/// (angles restored to vertex order 0..n).
#[derive(Clone, Debug, PartialEq)]
pub struct DescriptorRow {
    pub l: Vec<f64>,
    pub phi: Vec<f64>,
}

/// Read `count` descriptor lines for n-gons, undoing the rotated angle
/// layout.
pub fn read_descriptors<R: BufRead>(
    r: &mut R,
    count: usize,
    n: usize,
) -> Result<Vec<DescriptorRow>, FixtureError> {
    let rows = read_rows(r, count, 2 * n)?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let l = row[..n].to_vec();
            let mut phi = vec![0.0; n];
            for i in 0..n {
                phi[(i + 1) % n] = row[n + i];
            }
            DescriptorRow { l, phi }
        })
        .collect())
}

/// Write one signature line: length spectrum, then angle spectrum.
pub fn write_signature<W: Write>(w: &mut W, s_l: &[f64], s_phi: &[f64]) -> io::Result<()> {
    write_row(w, s_l.iter().chain(s_phi).copied())
}
