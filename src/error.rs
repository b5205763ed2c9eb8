//! Custom error types for the spectral-function library.
//!
//! All failure modes of the pole-expansion pipeline are centralized in a
//! single enum, [`SpectralError`]. Using the [`thiserror`] crate keeps the
//! error definitions free of boilerplate. Note that
//! [`faer::linalg::evd::EvdError`] does not implement the standard
//! [`std::error::Error`] trait, so we wrap it manually instead of deriving
//! `#[from]` for it.

use crate::textio::TextIoError;
use thiserror::Error;

/// Represents all possible errors that can occur while building, loading,
/// or saving a pole expansion.
#[derive(Error, Debug)]
pub enum SpectralError {
    /// The recursion coefficient sequences have incompatible lengths. A
    /// dimension-`d` tridiagonal matrix carries `d` diagonal entries and
    /// `d - 1` off-diagonal entries.
    #[error(
        "Recursion shape mismatch: {diagonal} diagonal entries cannot pair with {off_diagonal} off-diagonal entries."
    )]
    RecursionShape { diagonal: usize, off_diagonal: usize },

    /// Wraps an error originating from [`faer`]'s eigendecomposition module.
    #[error(
        "A numerical error occurred during the eigendecomposition of the recursion matrix: {0:?}"
    )]
    Eigensolver(faer::linalg::evd::EvdError),

    /// Wraps a failure of the line-oriented persistence layer.
    #[error(transparent)]
    TextIo(#[from] TextIoError),
}

// Unit tests to ensure error messages are formatted correctly.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recursion_shape_error_message() {
        let error = SpectralError::RecursionShape {
            diagonal: 4,
            off_diagonal: 7,
        };
        let expected_message =
            "Recursion shape mismatch: 4 diagonal entries cannot pair with 7 off-diagonal entries.";
        assert_eq!(error.to_string(), expected_message);
    }

    #[test]
    fn test_eigensolver_error_message() {
        let evd_error = faer::linalg::evd::EvdError::NoConvergence;
        let error = SpectralError::Eigensolver(evd_error);
        // The message uses the `Debug` format for the inner error.
        let expected_message =
            "A numerical error occurred during the eigendecomposition of the recursion matrix: NoConvergence";
        assert_eq!(error.to_string(), expected_message);
    }

    #[test]
    fn test_text_io_error_message() {
        let error = SpectralError::from(TextIoError::MissingLabel("#CFWeight=".to_string()));
        let expected_message = "Format error: No line labeled '#CFWeight=' was found.";
        assert_eq!(error.to_string(), expected_message);
    }
}
