//! Enumeration-independent shape signatures from singular values.
//!
//! Model
//! - A length-n descriptor sequence (edge lengths or turning angles) is
//!   expanded into a 2n×n matrix holding every cyclic rotation and, for
//!   each, its reversal. As a multiset of rows the matrix does not depend on
//!   which element was "first" or on traversal direction, so any
//!   row-permutation-invariant functional of it is a true shape invariant.
//! - The singular-value spectrum is that functional here: it is cheap to
//!   compare, stable under small perturbations, and identical (up to
//!   numerical tolerance) for congruent polygons however they were
//!   enumerated.
//!
//! The matrix is staged in a column-major buffer whose leading dimension is
//! rounded up to 64 entries, the layout dense solvers want; the padding is a
//! storage detail, not part of the logical 2n×n shape.

use std::fmt;

use nalgebra::DMatrix;

/// Alignment unit for the leading dimension of staged matrices.
const LD_ALIGN: usize = 64;

/// Iteration cap handed to the SVD before declaring non-convergence.
const SVD_MAX_NITER: usize = 1024;

/// Error surfaced by the singular-value computation.
///
/// Distinguishable from an all-zero spectrum on purpose: a failed
/// computation must never masquerade as a zero signature.
#[derive(Debug)]
pub enum SvdError {
    NonConvergence { rows: usize, cols: usize },
}

impl fmt::Display for SvdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonConvergence { rows, cols } => {
                write!(f, "svd did not converge on a {rows}x{cols} matrix")
            }
        }
    }
}

impl std::error::Error for SvdError {}

/// Leading dimension for a matrix with `rows` rows: rounded up to the
/// alignment unit, minimum 1.
#[inline]
pub fn ld_for(rows: usize) -> usize {
    if rows == 0 {
        1
    } else {
        rows.div_ceil(LD_ALIGN) * LD_ALIGN
    }
}

/// Column-major staged matrix with a padded leading dimension.
///
/// Entry (i, j) lives at `data[j * ld + i]`; rows `rows..ld` of each column
/// are padding zeros.
#[derive(Clone, Debug, PartialEq)]
pub struct ReprMatrix {
    pub rows: usize,
    pub cols: usize,
    pub ld: usize,
    pub data: Vec<f64>,
}

impl ReprMatrix {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[j * self.ld + i]
    }
}

/// Build the unoriented representation matrix of a cyclic sequence.
///
/// Row 2i is `a` rotated to start at index i; row 2i+1 is that rotation
/// reversed. An empty input yields the empty matrix rather than faulting;
/// callers must check for n > 0 themselves.
pub fn build_repr_matrix(a: &[f64]) -> ReprMatrix {
    let n = a.len();
    let rows = 2 * n;
    let ld = ld_for(rows);
    let mut m = ReprMatrix {
        rows,
        cols: n,
        ld,
        data: vec![0.0; ld * n],
    };
    for i in 0..n {
        for j in 0..n {
            m.data[j * ld + 2 * i] = a[(i + j) % n];
            m.data[j * ld + 2 * i + 1] = a[(i + n - 1 - j) % n];
        }
    }
    m
}

/// Singular values of a staged matrix, descending.
///
/// Strips the padding, hands the dense matrix to the solver with singular
/// vectors disabled, and reports non-convergence as an error instead of a
/// zero spectrum.
pub fn singular_values(m: &ReprMatrix) -> Result<Vec<f64>, SvdError> {
    if m.is_empty() {
        return Ok(Vec::new());
    }
    let dense = DMatrix::from_fn(m.rows, m.cols, |i, j| m.get(i, j));
    let svd = nalgebra::SVD::try_new(dense, false, false, f64::EPSILON, SVD_MAX_NITER).ok_or(
        SvdError::NonConvergence {
            rows: m.rows,
            cols: m.cols,
        },
    )?;
    let mut s: Vec<f64> = svd.singular_values.iter().copied().collect();
    s.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    Ok(s)
}

/// Canonical fingerprint of a descriptor sequence: the descending
/// singular-value spectrum of its unoriented representation.
pub fn fingerprint(a: &[f64]) -> Result<Vec<f64>, SvdError> {
    singular_values(&build_repr_matrix(a))
}
