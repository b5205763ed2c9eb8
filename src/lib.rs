//! Sum-over-poles spectral functions from Lanczos recursion coefficients.
//!
//! A Krylov-subspace (Lanczos-type) iteration reduces the resolvent matrix
//! element of a large Hermitian operator to a continued fraction whose
//! coefficients form a small real symmetric tridiagonal matrix. This crate
//! takes those coefficients and converts the continued fraction into its
//! exact closed form: a full dense eigendecomposition of the tridiagonal
//! matrix yields one simple pole per eigenvalue, weighted by the squared
//! overlap of the Lanczos seed vector with the matching eigenvector.
//!
//! The crate does **not** run the Krylov iteration; it consumes the
//! coefficients as an opaque input ([`TridiagonalMatrix`]) and owns
//! everything downstream of them:
//!
//! - [`PoleExpansion`]: diagonalization into poles and residues, stable
//!   pointwise evaluation at complex frequencies, and uniform grid sampling
//!   with a fixed imaginary broadening ([`FrequencyGrid`]).
//! - [`textio`]: the labeled line-oriented text format both types persist
//!   themselves in.
//!
//! The dense eigen-solve is delegated to [`faer`]'s self-adjoint
//! eigendecomposition; evaluation values are [`num_complex::Complex64`].
//!
//! ## Example Usage
//!
//! ```rust
//! use num_complex::Complex64;
//! use spectral_poles::{FrequencyGrid, PoleExpansion, TridiagonalMatrix};
//!
//! // Recursion coefficients produced by some external Lanczos iteration.
//! let recursion = TridiagonalMatrix::new(vec![0.5, -0.5], vec![0.25])?;
//! let expansion = PoleExpansion::new(recursion, 0.0, 1.0, 1)?;
//!
//! // The residues of an orthogonal diagonalization sum to one.
//! let total: f64 = expansion.residues().iter().sum();
//! assert!((total - 1.0).abs() < 1e-12);
//!
//! // Evaluate just above the real axis; the imaginary part carries the
//! // spectral density.
//! let g = expansion.evaluate(Complex64::new(0.1, 0.01), 0.0, 1);
//! assert!(g.im < 0.0);
//!
//! // Sample a uniform grid with a fixed broadening.
//! let grid = FrequencyGrid {
//!     start: -1.0,
//!     stop: 1.0,
//!     step: 0.5,
//!     broadening: 0.01,
//! };
//! let mut samples = Vec::new();
//! expansion.sample(&grid, &mut samples);
//! assert_eq!(samples.len(), 4);
//! # Ok::<(), spectral_poles::error::SpectralError>(())
//! ```
//!
//! ## Numerical contract
//!
//! The recursion coefficients are trusted to describe a symmetric matrix;
//! no symmetry check runs here, and a failure inside the eigen-solver
//! propagates to the caller unrecovered. Evaluation expects frequencies
//! strictly off the real axis (a positive broadening) so that no shifted
//! pole is ever hit exactly.

// Declare the modules that form the crate's API structure.
pub mod bits;
pub mod error;
pub mod expansion;
pub mod textio;
pub mod tridiagonal;

// Re-export the main API for convenient access.
pub use expansion::{FrequencyGrid, PoleExpansion};
pub use tridiagonal::TridiagonalMatrix;
