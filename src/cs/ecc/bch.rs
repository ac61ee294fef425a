//! BCH (Bose-Chaudhuri-Hocquenghem) code construction.
//!
//! BCH codes are a class of cyclic error-correcting codes constructed using polynomials over finite fields.
//! Named after their inventors Raj Bose, Dwijendra Kumar Chaudhuri, and Alexis Hocquenghem, a binary BCH
//! code of length n = 2^m - 1 and designed distance d has as generator polynomial the least common multiple
//! of the minimal polynomials of α, α^2, ..., α^(d-1), where α is a primitive element of GF(2^m).
//!
//! This module derives, for a given (n, d):
//! - the generator polynomial g(x) and the parity polynomial h(x) = (x^n + 1) / g(x)
//! - a raw parity-check matrix built from the bit-planes of the field powers α^(i·e)
//! - a reduced parity-check matrix and a generator matrix spanning its null space
//!
//! Polynomials live in 128-bit registers, so code lengths are limited to
//! [`MAX_CODE_LENGTH`]. Longer codes are rejected with `InputTooLarge`.
//!
//! # Examples
//!
//! ```
//! use bch_matrices::cs::ecc::bch::BchCode;
//!
//! let code = BchCode::new(15, 5).unwrap();
//! assert_eq!(code.dimension(), 7);
//!
//! let matrices = code.build_matrices().unwrap();
//! assert_eq!(matrices.generator.rows(), 7);
//! assert_eq!(matrices.parity_check.rows(), 8);
//! assert!(matrices.generator.is_orthogonal_to(&matrices.parity_check));
//! ```

use crate::cs::ecc::Result;
use crate::cs::error::Error;
use crate::math::binary_poly::{BinaryPoly, MAX_DEGREE};
use crate::math::galois_field::{GaloisField, MIN_FIELD_DEGREE};
use crate::math::gf2_matrix::{null_space_basis, BitMatrix, NullSpace};
use log::debug;
use rayon::prelude::*;
use std::fmt::{Display, Formatter};

/// Maximum supported code length: x^n + 1 must fit in one polynomial register
pub const MAX_CODE_LENGTH: usize = MAX_DEGREE;

/// Parameters of a BCH construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BchParams {
    /// Code length n (must be 2^m - 1)
    pub length: usize,
    /// Designed minimum distance d
    pub designed_distance: usize,
}

impl BchParams {
    pub fn new(length: usize, designed_distance: usize) -> Self {
        BchParams {
            length,
            designed_distance,
        }
    }

    /// Field degree m with 2^m - 1 = n
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if n + 1 is not a power of two or
    /// m < 2, and `InputTooLarge` if n exceeds [`MAX_CODE_LENGTH`].
    pub fn field_degree(&self) -> Result<usize> {
        let n = self.length;
        let size = n
            .checked_add(1)
            .filter(|size| size.is_power_of_two())
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "Code length must be 2^m - 1 for some m, got {}",
                    n
                ))
            })?;

        let degree = size.trailing_zeros() as usize;
        if degree < MIN_FIELD_DEGREE {
            return Err(Error::Configuration(format!(
                "Code length must be at least {}, got {}",
                (1 << MIN_FIELD_DEGREE) - 1,
                n
            )));
        }

        if n > MAX_CODE_LENGTH {
            return Err(Error::InputTooLarge {
                length: n,
                max_length: MAX_CODE_LENGTH,
            });
        }

        Ok(degree)
    }

    /// Check the parameters without building anything
    pub fn validate(&self) -> Result<()> {
        self.field_degree().map(|_| ())
    }
}

/// A binary BCH code described by its generator and parity polynomials
#[derive(Debug, Clone)]
pub struct BchCode {
    params: BchParams,
    /// GF(2^m) the code is defined over
    field: GaloisField,
    /// g(x), lcm of the minimal polynomials of α^1..α^(d-1)
    generator_poly: BinaryPoly,
    /// h(x) = (x^n + 1) / g(x)
    parity_poly: BinaryPoly,
    /// Exponents i whose minimal polynomial grew g(x), in increasing order
    distinguished_exponents: Vec<usize>,
    /// Number of message bits k = n - deg g
    dimension: usize,
}

impl BchCode {
    /// Derive the BCH code of length `length` and designed distance
    /// `designed_distance`.
    ///
    /// A designed distance of 0 or 1 gives the trivial code g = 1, k = n.
    /// A designed distance above n gives g = x^n + 1, k = 0.
    ///
    /// # Errors
    ///
    /// Fails if the length is invalid (see [`BchParams::field_degree`]) or if
    /// g(x) does not divide x^n + 1.
    pub fn new(length: usize, designed_distance: usize) -> Result<Self> {
        Self::from_params(BchParams::new(length, designed_distance))
    }

    pub fn from_params(params: BchParams) -> Result<Self> {
        let degree = params.field_degree()?;
        let field = GaloisField::new(degree)?;
        let alpha = field.generator();
        let n = params.length;

        // α^i and α^(i mod n) share a minimal polynomial, so powers past n add nothing
        let last_power = params.designed_distance.saturating_sub(1).min(n);

        let mut generator_poly = BinaryPoly::one();
        let mut distinguished_exponents = Vec::new();
        for i in 1..=last_power {
            let root = field.pow(alpha, i as u64)?;
            let minimal = field.minimal_polynomial(root)?;
            let next = generator_poly.lcm(minimal)?;
            if next != generator_poly {
                distinguished_exponents.push(i);
                generator_poly = next;
            }
        }

        let x_n_plus_1 = BinaryPoly::monomial(n)? + BinaryPoly::one();
        let parity_poly = x_n_plus_1.exact_div(generator_poly)?;

        // g divides x^n + 1, so its degree is at most n
        let dimension = n - generator_poly.degree().unwrap_or(0);

        debug!(
            "BCH({}, {}) over GF(2^{}): g(x) = {}, h(x) = {}, distinguished exponents {:?}",
            n, dimension, degree, generator_poly, parity_poly, distinguished_exponents
        );

        Ok(BchCode {
            params,
            field,
            generator_poly,
            parity_poly,
            distinguished_exponents,
            dimension,
        })
    }

    /// Get the code length (n)
    pub fn length(&self) -> usize {
        self.params.length
    }

    /// Get the data length (k)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of parity bits (n - k)
    pub fn redundancy(&self) -> usize {
        self.params.length - self.dimension
    }

    pub fn designed_distance(&self) -> usize {
        self.params.designed_distance
    }

    pub fn params(&self) -> BchParams {
        self.params
    }

    /// Field degree m
    pub fn field_degree(&self) -> usize {
        self.field.degree()
    }

    pub fn field(&self) -> &GaloisField {
        &self.field
    }

    pub fn generator_polynomial(&self) -> BinaryPoly {
        self.generator_poly
    }

    pub fn parity_polynomial(&self) -> BinaryPoly {
        self.parity_poly
    }

    pub fn distinguished_exponents(&self) -> &[usize] {
        &self.distinguished_exponents
    }

    /// Parity-check matrix built from field powers.
    ///
    /// For the j-th distinguished exponent e and bit-plane b, row j·m + b
    /// holds bit b of α^(i·e) in column i. The matrix has
    /// `distinguished_exponents().len() * m` rows and n columns; its rank is
    /// n - k.
    pub fn raw_parity_check_matrix(&self) -> Result<BitMatrix> {
        let m = self.field.degree();
        let n = self.params.length;
        let mut matrix = BitMatrix::new(self.distinguished_exponents.len() * m, n);

        for (j, &exponent) in self.distinguished_exponents.iter().enumerate() {
            for i in 0..n {
                let element = self.field.exp(i * exponent);
                for plane in 0..m {
                    if (element >> plane) & 1 == 1 {
                        matrix.set(j * m + plane, i, true)?;
                    }
                }
            }
        }

        Ok(matrix)
    }

    /// Reduce the raw parity-check matrix and extract the generator matrix.
    ///
    /// # Errors
    ///
    /// Returns `RankMismatch` if the raw matrix does not have rank n - k and
    /// `NotOrthogonal` if the resulting pair fails the orthogonality check.
    pub fn build_matrices(&self) -> Result<BchMatrices> {
        let raw = self.raw_parity_check_matrix()?;
        let NullSpace {
            rank,
            echelon,
            basis,
        } = null_space_basis(&raw);

        if rank != self.redundancy() {
            return Err(Error::RankMismatch {
                expected: self.redundancy(),
                actual: rank,
            });
        }

        debug!(
            "Reduced {}x{} parity-check matrix to rank {}, generator matrix is {}x{}",
            raw.rows(),
            raw.cols(),
            rank,
            basis.rows(),
            basis.cols()
        );

        let matrices = BchMatrices {
            length: self.params.length,
            dimension: self.dimension,
            rank,
            generator: basis,
            parity_check: echelon,
        };
        matrices.verify()?;
        Ok(matrices)
    }
}

impl Display for BchCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BCH({},{},{}) over GF(2^{})",
            self.params.length,
            self.dimension,
            self.params.designed_distance,
            self.field.degree()
        )
    }
}

/// Generator and parity-check matrices of a BCH code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BchMatrices {
    /// Code length n
    pub length: usize,
    /// Code dimension k
    pub dimension: usize,
    /// Rank of the raw parity-check matrix (n - k)
    pub rank: usize,
    /// k x n generator matrix
    pub generator: BitMatrix,
    /// (n - k) x n parity-check matrix in upper echelon form
    pub parity_check: BitMatrix,
}

impl BchMatrices {
    /// Check that every generator row is orthogonal to every parity-check row
    pub fn verify(&self) -> Result<()> {
        if let Some((generator_row, parity_row)) =
            self.generator.first_non_orthogonal(&self.parity_check)
        {
            return Err(Error::NotOrthogonal {
                generator_row,
                parity_row,
            });
        }
        Ok(())
    }
}

impl Display for BchMatrices {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "EBCH({}, {})", self.length, self.dimension)?;
        writeln!(f)?;
        writeln!(f, "{} {}", self.length, self.dimension)?;
        writeln!(f)?;
        write!(f, "{}", self.generator)?;
        write!(f, "{}", self.parity_check)
    }
}

/// Build the generator and parity-check matrices of the BCH code (n, d)
pub fn build_bch_matrices(length: usize, designed_distance: usize) -> Result<BchMatrices> {
    BchCode::new(length, designed_distance)?.build_matrices()
}

/// Build several independent codes in parallel. Results are in request order.
pub fn build_bch_matrices_batch(requests: &[BchParams]) -> Vec<Result<BchMatrices>> {
    requests
        .par_iter()
        .map(|&params| BchCode::from_params(params).and_then(|code| code.build_matrices()))
        .collect()
}
