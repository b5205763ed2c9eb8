//! The tridiagonal carrier of Lanczos recursion coefficients.
//!
//! A symmetric Lanczos-type iteration reduces a large Hermitian operator to
//! a small real symmetric tridiagonal matrix described by two scalar
//! sequences: the diagonal entries `a_0, ..., a_{d-1}` and the off-diagonal
//! entries `b_0, ..., b_{d-2}`:
//!
//! ```text
//! T = | a_0 b_0  0  ... |
//!     | b_0 a_1 b_1 ... |
//!     |  0  b_1 a_2 ... |
//!     | ... ... ... ... |
//! ```
//!
//! This module does not run the iteration itself; it only owns the
//! coefficient sequences it produced, materializes them as a dense
//! [`faer::Mat`] when an eigendecomposition is needed, and persists them in
//! the labeled text format.

use crate::error::SpectralError;
use crate::textio::{TextIoError, TextReader, TextWriter};
use faer::Mat;
use std::io::{BufRead, Write};

/// Label of the persisted diagonal coefficient vector.
const DIAGONAL_LABEL: &str = "#Avector";
/// Label of the persisted off-diagonal coefficient vector.
const OFF_DIAGONAL_LABEL: &str = "#Bvector";

/// Recursion coefficients of a symmetric tridiagonal matrix.
///
/// Invariant: `off_diagonal.len() + 1 == diagonal.len()`, or both sequences
/// are empty (the dimension-0 recursion).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TridiagonalMatrix {
    diagonal: Vec<f64>,
    off_diagonal: Vec<f64>,
}

impl TridiagonalMatrix {
    /// Builds a recursion from its coefficient sequences.
    ///
    /// # Errors
    /// Returns [`SpectralError::RecursionShape`] when the sequences cannot
    /// describe a square tridiagonal matrix.
    pub fn new(diagonal: Vec<f64>, off_diagonal: Vec<f64>) -> Result<Self, SpectralError> {
        let valid = (diagonal.is_empty() && off_diagonal.is_empty())
            || off_diagonal.len() + 1 == diagonal.len();
        if !valid {
            return Err(SpectralError::RecursionShape {
                diagonal: diagonal.len(),
                off_diagonal: off_diagonal.len(),
            });
        }
        Ok(Self {
            diagonal,
            off_diagonal,
        })
    }

    /// Order of the implied square matrix.
    pub fn dimension(&self) -> usize {
        self.diagonal.len()
    }

    /// The diagonal coefficients `a_i`.
    pub fn diagonal(&self) -> &[f64] {
        &self.diagonal
    }

    /// The off-diagonal coefficients `b_i`.
    pub fn off_diagonal(&self) -> &[f64] {
        &self.off_diagonal
    }

    /// Assembles the dense symmetric matrix the coefficients describe.
    ///
    /// Dense storage is what the eigen-solver consumes; for the small
    /// dimensions a truncated recursion produces, the `O(d^2)` memory is
    /// irrelevant next to the `O(d^3)` decomposition that follows.
    pub fn to_dense(&self) -> Mat<f64> {
        let d = self.dimension();
        let mut dense = Mat::zeros(d, d);
        for (i, &a) in self.diagonal.iter().enumerate() {
            dense[(i, i)] = a;
        }
        for (i, &b) in self.off_diagonal.iter().enumerate() {
            dense[(i, i + 1)] = b;
            dense[(i + 1, i)] = b;
        }
        dense
    }

    /// Appends both coefficient vectors to the sink, diagonal first.
    pub fn save<W: Write>(&self, writer: &mut TextWriter<W>) -> Result<(), TextIoError> {
        writer.vector(DIAGONAL_LABEL, &self.diagonal)?;
        writer.vector(OFF_DIAGONAL_LABEL, &self.off_diagonal)?;
        Ok(())
    }

    /// Reads both coefficient vectors back, validating the shape invariant.
    pub fn load<R: BufRead>(reader: &mut TextReader<R>) -> Result<Self, SpectralError> {
        let diagonal = reader.vector(DIAGONAL_LABEL)?;
        let off_diagonal = reader.vector(OFF_DIAGONAL_LABEL)?;
        Self::new(diagonal, off_diagonal)
    }
}
