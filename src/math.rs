pub mod binary_poly;
pub mod galois_field;
pub mod gf2_matrix;

pub use binary_poly::BinaryPoly;
pub use galois_field::{GaloisField, MAX_FIELD_DEGREE, MIN_FIELD_DEGREE, PRIMITIVE_POLYNOMIALS};
pub use gf2_matrix::{null_space_basis, upper_echelon_form, BitMatrix, NullSpace};
