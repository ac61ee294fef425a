pub mod cs;
pub mod math;

pub use cs::ecc::{
    build_bch_matrices, build_bch_matrices_batch, BchCode, BchMatrices, BchParams,
};
pub use cs::error::{Error, ErrorKind, Result};
