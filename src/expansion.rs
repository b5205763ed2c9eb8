//! Sum-over-poles representation of a dynamical response function.
//!
//! A Lanczos-type recursion reduces a response function (a Green's-function
//! matrix element) to a continued fraction whose coefficients live in a
//! [`TridiagonalMatrix`]. Fully diagonalizing that small matrix converts
//! the continued fraction into its exact closed form: a sum of simple
//! poles. Each eigenvalue of the recursion matrix is a pole location, and
//! the squared first component of the matching eigenvector is its spectral
//! weight, since the Lanczos seed vector is the first basis vector of the
//! reduced space.
//!
//! [`PoleExpansion`] owns that representation for its whole lifecycle:
//! diagonalization at construction, pointwise evaluation, grid sampling,
//! and text persistence. Evaluation after construction is read-only, so a
//! host that wants to scan many frequencies concurrently can share the
//! expansion behind an immutable reference.

use crate::error::SpectralError;
use crate::textio::{TextIoError, TextReader, TextWriter};
use crate::tridiagonal::TridiagonalMatrix;
use faer::Side;
use num_complex::Complex64;
use std::io::{BufRead, Write};

const WEIGHT_LABEL: &str = "#CFWeight=";
const ENERGY_LABEL: &str = "#CFEnergy=";
const SIGN_LABEL: &str = "#CFIsign=";
const POLES_LABEL: &str = "#CFEigs";
const RESIDUES_LABEL: &str = "#CFIntensities";

/// A uniform frequency grid with a fixed imaginary broadening.
///
/// `broadening` is the small positive imaginary shift that regularizes the
/// pole sum into a smooth function of the real frequency.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyGrid {
    /// First frequency of the grid.
    pub start: f64,
    /// Exclusive upper edge of the grid.
    pub stop: f64,
    /// Spacing between consecutive frequencies.
    pub step: f64,
    /// Imaginary part added to every evaluation frequency.
    pub broadening: f64,
}

/// A response function held as weighted simple poles.
///
/// Constructed from a recursion plus three scalars: `reference_energy`
/// (the energy offset subtracted from each pole), `weight` (the overall
/// prefactor, where exactly `0.0` marks an inert expansion and skips
/// diagonalization entirely), and `sign` (`+1` or `-1`, selecting the
/// retarded or advanced shift convention).
#[derive(Debug, Clone)]
pub struct PoleExpansion {
    recursion: TridiagonalMatrix,
    reference_energy: f64,
    weight: f64,
    sign: i32,
    poles: Vec<f64>,
    residues: Vec<f64>,
}

impl Default for PoleExpansion {
    /// The inert expansion: zero weight, empty recursion. Evaluates to
    /// complex zero everywhere.
    fn default() -> Self {
        Self {
            recursion: TridiagonalMatrix::default(),
            reference_energy: 0.0,
            weight: 0.0,
            sign: 1,
            poles: Vec::new(),
            residues: Vec::new(),
        }
    }
}

impl PoleExpansion {
    /// Builds the expansion and diagonalizes immediately.
    ///
    /// With `weight == 0.0` the poles and residues stay empty and no
    /// eigendecomposition runs.
    ///
    /// The recursion coefficients are trusted to describe a symmetric
    /// matrix; no symmetry validation is performed here.
    ///
    /// # Errors
    /// Propagates the eigen-solver failure, should the decomposition not
    /// converge.
    pub fn new(
        recursion: TridiagonalMatrix,
        reference_energy: f64,
        weight: f64,
        sign: i32,
    ) -> Result<Self, SpectralError> {
        let mut expansion = Self {
            recursion,
            reference_energy,
            weight,
            sign,
            poles: Vec::new(),
            residues: Vec::new(),
        };
        expansion.diagonalize()?;
        Ok(expansion)
    }

    /// Replaces every field and re-diagonalizes.
    ///
    /// There is no partial mutation: any change to the recursion or the
    /// scalars invalidates the stored poles and residues, so the whole
    /// state is swapped at once.
    pub fn set(
        &mut self,
        recursion: TridiagonalMatrix,
        reference_energy: f64,
        weight: f64,
        sign: i32,
    ) -> Result<(), SpectralError> {
        self.recursion = recursion;
        self.reference_energy = reference_energy;
        self.weight = weight;
        self.sign = sign;
        self.diagonalize()
    }

    /// Evaluates the pole sum at the complex frequency `z`:
    ///
    /// `weight * Σ_i residues[i] / (z − sign·(offset − poles[i]))`
    ///
    /// `offset` and `sign` are call-time arguments, independent of the
    /// stored `reference_energy` and `sign` fields, so the same
    /// decomposition serves both shift conventions of an off-diagonal
    /// response. A zero-weight expansion evaluates to complex zero without
    /// touching the pole data.
    ///
    /// Callers are expected to keep `z` strictly off the real axis (a
    /// positive broadening); a real `z` landing exactly on a shifted pole
    /// divides by zero.
    pub fn evaluate(&self, z: Complex64, offset: f64, sign: i32) -> Complex64 {
        if self.weight == 0.0 {
            return Complex64::new(0.0, 0.0);
        }

        let mut sum = Complex64::new(0.0, 0.0);
        for (&pole, &residue) in self.poles.iter().zip(self.residues.iter()) {
            sum += residue / (z - f64::from(sign) * (offset - pole));
        }
        sum * self.weight
    }

    /// Samples the expansion over a uniform grid, producing
    /// `(ω, evaluate(ω + i·broadening, reference_energy, sign))` pairs with
    /// the stored scalars.
    ///
    /// The pair count is fixed up front as `floor((stop − start) / step)`.
    /// An empty `result` is sized to that count; a pre-sized `result` is
    /// overwritten in place and caps the iteration at its own length. ω
    /// advances by repeated addition, so the `ω < stop` test may admit one
    /// extra iteration under floating-point drift; the length cap drops it.
    pub fn sample(&self, grid: &FrequencyGrid, result: &mut Vec<(f64, Complex64)>) {
        let count = ((grid.stop - grid.start) / grid.step) as usize;
        if result.is_empty() {
            result.resize(count, (0.0, Complex64::new(0.0, 0.0)));
        }
        if result.is_empty() {
            return;
        }

        let mut counter = 0;
        let mut omega = grid.start;
        while omega < grid.stop {
            let z = Complex64::new(omega, grid.broadening);
            result[counter] = (omega, self.evaluate(z, self.reference_energy, self.sign));
            counter += 1;
            if counter >= result.len() {
                break;
            }
            omega += grid.step;
        }
    }

    /// Appends the expansion to the sink: the recursion's own fields first,
    /// then the three scalars, then the pole and residue vectors.
    pub fn save<W: Write>(&self, writer: &mut TextWriter<W>) -> Result<(), TextIoError> {
        self.recursion.save(writer)?;
        writer.scalar(WEIGHT_LABEL, self.weight)?;
        writer.scalar(ENERGY_LABEL, self.reference_energy)?;
        writer.scalar(SIGN_LABEL, self.sign)?;
        writer.vector(POLES_LABEL, &self.poles)?;
        writer.vector(RESIDUES_LABEL, &self.residues)?;
        Ok(())
    }

    /// Reconstructs an expansion from its persisted form, reading fields in
    /// the exact order [`save`](Self::save) wrote them.
    ///
    /// The persisted pole and residue vectors are read to keep the cursor
    /// in step, but whenever `weight != 0` the decomposition is re-run from
    /// the recursion coefficients and overwrites them: the stored
    /// eigen-decomposition is never trusted.
    pub fn load<R: BufRead>(reader: &mut TextReader<R>) -> Result<Self, SpectralError> {
        let recursion = TridiagonalMatrix::load(reader)?;
        let weight = reader.scalar(WEIGHT_LABEL)?;
        let reference_energy = reader.scalar(ENERGY_LABEL)?;
        let sign = reader.scalar(SIGN_LABEL)?;
        let poles = reader.vector(POLES_LABEL)?;
        let residues = reader.vector(RESIDUES_LABEL)?;

        let mut expansion = Self {
            recursion,
            reference_energy,
            weight,
            sign,
            poles,
            residues,
        };
        expansion.diagonalize()?;
        Ok(expansion)
    }

    /// The recursion the poles were computed from.
    pub fn recursion(&self) -> &TridiagonalMatrix {
        &self.recursion
    }

    /// The energy offset subtracted from each pole location.
    pub fn reference_energy(&self) -> f64 {
        self.reference_energy
    }

    /// The overall prefactor of the expansion.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The stored shift convention, `+1` or `-1`.
    pub fn sign(&self) -> i32 {
        self.sign
    }

    /// Pole locations, one per recursion dimension.
    pub fn poles(&self) -> &[f64] {
        &self.poles
    }

    /// Spectral weights, index-matched to [`poles`](Self::poles).
    pub fn residues(&self) -> &[f64] {
        &self.residues
    }

    /// Converts the recursion into poles and residues via a full dense
    /// eigendecomposition.
    ///
    /// A zero weight skips the decomposition and leaves the pole data
    /// untouched; evaluation short-circuits on the weight, so stale
    /// vectors are never observable.
    fn diagonalize(&mut self) -> Result<(), SpectralError> {
        if self.weight == 0.0 {
            return Ok(());
        }

        let dense = self.recursion.to_dense();
        let dimension = dense.nrows();
        let evd = dense
            .as_ref()
            .self_adjoint_eigen(Side::Upper)
            .map_err(SpectralError::Eigensolver)?;
        let eigenvalues = evd.S().column_vector();
        let eigenvectors = evd.U();

        self.poles.clear();
        self.residues.clear();
        self.poles.extend((0..dimension).map(|i| eigenvalues[i]));
        // Row 0 of the eigenvector matrix holds each eigenvector's overlap
        // with the Lanczos seed vector.
        self.residues
            .extend((0..dimension).map(|i| eigenvectors[(0, i)] * eigenvectors[(0, i)]));

        log::debug!(
            "diagonalized a dimension-{dimension} recursion into {} poles",
            self.poles.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tridiagonal::TridiagonalMatrix;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_default_expansion_is_inert() {
        let expansion = PoleExpansion::default();
        assert_eq!(expansion.weight(), 0.0);
        assert_eq!(expansion.sign(), 1);
        assert!(expansion.poles().is_empty());
        assert!(expansion.residues().is_empty());
        let value = expansion.evaluate(Complex64::new(0.3, 0.1), 2.0, -1);
        assert_eq!(value, Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_zero_weight_skips_diagonalization() {
        let recursion = TridiagonalMatrix::new(vec![1.0, 2.0], vec![0.5]).unwrap();
        let expansion = PoleExpansion::new(recursion, 0.0, 0.0, 1).unwrap();
        assert!(expansion.poles().is_empty());
        assert!(expansion.residues().is_empty());
    }

    #[test]
    fn test_set_replaces_state_and_rediagonalizes() {
        let mut expansion = PoleExpansion::default();
        assert!(expansion.poles().is_empty());

        let recursion = TridiagonalMatrix::new(vec![-3.0], vec![]).unwrap();
        expansion.set(recursion, 0.5, 2.0, -1).unwrap();

        assert_eq!(expansion.reference_energy(), 0.5);
        assert_eq!(expansion.weight(), 2.0);
        assert_eq!(expansion.sign(), -1);
        assert_eq!(expansion.poles(), &[-3.0]);
        assert!((expansion.residues()[0] - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_two_level_recursion_has_known_poles() {
        // T = [[0, b], [b, 0]] has eigenvalues -b and +b, and the seed
        // vector overlaps each eigenvector with weight 1/2.
        let b = 0.75;
        let recursion = TridiagonalMatrix::new(vec![0.0, 0.0], vec![b]).unwrap();
        let expansion = PoleExpansion::new(recursion, 0.0, 1.0, 1).unwrap();

        let mut poles = expansion.poles().to_vec();
        poles.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert!((poles[0] + b).abs() < TOLERANCE);
        assert!((poles[1] - b).abs() < TOLERANCE);
        assert!((expansion.residues()[0] - 0.5).abs() < TOLERANCE);
        assert!((expansion.residues()[1] - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_call_time_sign_flips_the_imaginary_response() {
        let recursion = TridiagonalMatrix::new(vec![0.25], vec![]).unwrap();
        let expansion = PoleExpansion::new(recursion, 0.0, 1.0, 1).unwrap();

        let z = Complex64::new(0.1, 0.05);
        let retarded = expansion.evaluate(z, 0.0, 1);
        let advanced = expansion.evaluate(z, 0.0, -1);
        // 1/(z + p) vs 1/(z - p): distinct values, same broadening sign.
        assert!((retarded - advanced).norm() > TOLERANCE);
        assert!(retarded.im < 0.0);
        assert!(advanced.im < 0.0);
    }
}
