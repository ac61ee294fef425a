//! Error correction code construction.
//!
//! This module derives the algebraic description of binary BCH codes:
//! generator and parity polynomials, and the generator / parity-check
//! matrix pair an encoder or decoder would use at runtime.
//!
//! # Examples
//!
//! ```rust
//! use bch_matrices::cs::ecc::build_bch_matrices;
//!
//! let matrices = build_bch_matrices(7, 3).unwrap();
//! assert_eq!((matrices.length, matrices.dimension), (7, 4));
//! ```

/// Result type for code construction
pub use crate::cs::error::Result;

/// BCH code construction
pub mod bch;
pub use bch::{
    build_bch_matrices, build_bch_matrices_batch, BchCode, BchMatrices, BchParams,
    MAX_CODE_LENGTH,
};
