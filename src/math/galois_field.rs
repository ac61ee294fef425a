//! Finite field GF(2^m) arithmetic driven by discrete-log tables.
//!
//! Elements are integers in `[0, 2^m)`, read as polynomials in the root α of
//! a primitive polynomial of degree m. The field is built by walking the
//! powers α^0, α^1, ..., α^(2^m - 2); because the polynomial is primitive
//! this visits every nonzero element exactly once, giving an antilog table
//! (exponent → element) and its inverse log table (element → exponent).
//! Zero has no logarithm and is special-cased by every operation.
//!
//! All operations validate their operands and fail with `OutOfRange` rather
//! than producing garbage for values outside the field.

use crate::cs::error::{Error, Result};
use crate::math::binary_poly::BinaryPoly;
use log::debug;
use std::fmt::{Display, Formatter};

/// Smallest supported field degree m
pub const MIN_FIELD_DEGREE: usize = 2;

/// Largest supported field degree m
pub const MAX_FIELD_DEGREE: usize = 16;

/// Primitive polynomials over GF(2), indexed by degree. Entries 0 and 1 are unused.
pub const PRIMITIVE_POLYNOMIALS: [u32; MAX_FIELD_DEGREE + 1] = [
    0,
    0,
    0b111,
    0b1011,
    0b10011,
    0b100101,
    0b1000011,
    0b10001001,
    0b100011101,
    0b1000010001,
    0b10000001001,
    0b100000000101,
    0b1000001010011,
    0b10000000011011,
    0b100010001000011,
    0b1000000000000011,
    0b10001000000001011,
];

/// The field GF(2^m) with precomputed log/antilog tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaloisField {
    /// Extension degree m
    degree: usize,
    /// Primitive polynomial defining the field, bit-packed
    primitive_poly: u32,
    /// exp_table[e] = α^e for e in [0, 2^m - 1)
    exp_table: Vec<usize>,
    /// log_table[a] = e with α^e = a, for nonzero a. Entry 0 is unused.
    log_table: Vec<usize>,
}

impl GaloisField {
    /// Build GF(2^m) using the built-in primitive polynomial for `degree`.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if `degree` is outside
    /// [`MIN_FIELD_DEGREE`]..=[`MAX_FIELD_DEGREE`].
    pub fn new(degree: usize) -> Result<Self> {
        check_degree(degree)?;
        Self::build(degree, PRIMITIVE_POLYNOMIALS[degree])
    }

    /// Build GF(2^m) from a caller-supplied primitive polynomial.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the degree is unsupported, if the
    /// polynomial's degree is not `degree`, or if it is not primitive (the
    /// powers of its root do not cover every nonzero element).
    pub fn with_primitive_poly(degree: usize, primitive_poly: u32) -> Result<Self> {
        check_degree(degree)?;
        let poly_degree = BinaryPoly::from_bits(primitive_poly as u128).degree();
        if poly_degree != Some(degree) {
            return Err(Error::Configuration(format!(
                "Primitive polynomial {:#b} does not have degree {}",
                primitive_poly, degree
            )));
        }
        Self::build(degree, primitive_poly)
    }

    fn build(degree: usize, primitive_poly: u32) -> Result<Self> {
        let size = 1usize << degree;
        let order = size - 1;

        let mut exp_table = Vec::with_capacity(order);
        let mut log_table = vec![0; size];
        let mut seen = vec![false; size];

        let mut element = 1usize;
        for exponent in 0..order {
            if element == 0 || seen[element] {
                return Err(Error::Configuration(format!(
                    "Polynomial {:#b} is not primitive: alpha^{} repeats an earlier power",
                    primitive_poly, exponent
                )));
            }
            seen[element] = true;
            exp_table.push(element);
            log_table[element] = exponent;

            // Multiply by α, reducing once the degree-m bit appears
            element <<= 1;
            if element & size != 0 {
                element ^= primitive_poly as usize;
            }
        }

        debug!(
            "Built GF(2^{}) from primitive polynomial {:#b}",
            degree, primitive_poly
        );

        Ok(GaloisField {
            degree,
            primitive_poly,
            exp_table,
            log_table,
        })
    }

    /// Extension degree m
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Primitive polynomial defining the field
    pub fn primitive_poly(&self) -> u32 {
        self.primitive_poly
    }

    /// Number of field elements, 2^m
    pub fn size(&self) -> usize {
        1 << self.degree
    }

    /// Order of the multiplicative group, 2^m - 1
    pub fn order(&self) -> usize {
        self.exp_table.len()
    }

    /// The canonical generator α (the element with logarithm 1)
    pub fn generator(&self) -> usize {
        self.exp_table[1]
    }

    /// Whether `a` is a valid element of this field
    pub fn contains(&self, a: usize) -> bool {
        a < self.size()
    }

    fn check(&self, a: usize) -> Result<()> {
        if !self.contains(a) {
            return Err(Error::OutOfRange {
                value: a,
                limit: self.size(),
            });
        }
        Ok(())
    }

    /// Addition (and subtraction): bitwise XOR
    pub fn add(&self, a: usize, b: usize) -> Result<usize> {
        self.check(a)?;
        self.check(b)?;
        Ok(a ^ b)
    }

    /// Multiplication via the log tables
    pub fn mul(&self, a: usize, b: usize) -> Result<usize> {
        self.check(a)?;
        self.check(b)?;
        if a == 0 || b == 0 {
            return Ok(0);
        }
        let exponent = (self.log_table[a] + self.log_table[b]) % self.order();
        Ok(self.exp_table[exponent])
    }

    /// Multiplicative inverse, α^(2^m - 1 - log a)
    pub fn inv(&self, a: usize) -> Result<usize> {
        let log_a = self.log(a)?;
        Ok(self.exp_table[(self.order() - log_a) % self.order()])
    }

    /// Division `a / b`
    pub fn div(&self, a: usize, b: usize) -> Result<usize> {
        let b_inv = self.inv(b)?;
        self.mul(a, b_inv)
    }

    /// `a` raised to the power `exponent`. `0^0` is 1.
    pub fn pow(&self, a: usize, exponent: u64) -> Result<usize> {
        self.check(a)?;
        if exponent == 0 {
            return Ok(1);
        }
        if a == 0 {
            return Ok(0);
        }
        let order = self.order() as u64;
        let e = (self.log_table[a] as u64 * (exponent % order)) % order;
        Ok(self.exp_table[e as usize])
    }

    /// Discrete logarithm of a nonzero element
    pub fn log(&self, a: usize) -> Result<usize> {
        self.check(a)?;
        if a == 0 {
            return Err(Error::ZeroElement);
        }
        Ok(self.log_table[a])
    }

    /// α^exponent, with the exponent reduced modulo 2^m - 1
    pub fn exp(&self, exponent: usize) -> usize {
        self.exp_table[exponent % self.order()]
    }

    /// The Frobenius orbit {a, a^2, a^4, ...} of `a`, in squaring order
    pub fn conjugates(&self, a: usize) -> Result<Vec<usize>> {
        self.check(a)?;
        let mut orbit = vec![a];
        let mut next = self.mul(a, a)?;
        while next != a {
            orbit.push(next);
            next = self.mul(next, next)?;
        }
        Ok(orbit)
    }

    /// Minimal polynomial of `a` over GF(2): the product of (x - c) over the
    /// conjugates c of `a`.
    ///
    /// The product is formed with GF(2^m) coefficients; every coefficient
    /// must collapse to 0 or 1, otherwise `NonBinaryCoefficient` is returned.
    pub fn minimal_polynomial(&self, a: usize) -> Result<BinaryPoly> {
        let roots = self.conjugates(a)?;

        // coeffs[i] is the coefficient of x^i
        let mut coeffs = vec![1usize];
        for &root in &roots {
            let mut next = vec![0usize; coeffs.len() + 1];
            for (i, &c) in coeffs.iter().enumerate() {
                next[i + 1] ^= c;
                next[i] ^= self.mul(root, c)?;
            }
            coeffs = next;
        }

        let mut bits = 0u128;
        for (degree, &value) in coeffs.iter().enumerate() {
            match value {
                0 => {}
                1 => bits |= 1u128 << degree,
                _ => return Err(Error::NonBinaryCoefficient { degree, value }),
            }
        }

        Ok(BinaryPoly::from_bits(bits))
    }

    /// Evaluate a binary polynomial at a field element (Horner's rule)
    pub fn eval(&self, poly: BinaryPoly, x: usize) -> Result<usize> {
        self.check(x)?;
        let Some(degree) = poly.degree() else {
            return Ok(0);
        };
        let mut acc = 0;
        for i in (0..=degree).rev() {
            acc = self.mul(acc, x)?;
            if poly.coefficient(i) {
                acc ^= 1;
            }
        }
        Ok(acc)
    }
}

fn check_degree(degree: usize) -> Result<()> {
    if !(MIN_FIELD_DEGREE..=MAX_FIELD_DEGREE).contains(&degree) {
        return Err(Error::Configuration(format!(
            "Field degree must be between {} and {}, got {}",
            MIN_FIELD_DEGREE, MAX_FIELD_DEGREE, degree
        )));
    }
    Ok(())
}

impl Display for GaloisField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GF(2^{}) mod {}",
            self.degree,
            BinaryPoly::from_bits(self.primitive_poly as u128)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::error::ErrorKind;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_field_creation() {
        let field = GaloisField::new(3).unwrap();
        assert_eq!(field.degree(), 3);
        assert_eq!(field.size(), 8);
        assert_eq!(field.order(), 7);
        assert_eq!(field.generator(), 2);
        assert_eq!(field.primitive_poly(), 0b1011);
        assert_eq!(field.to_string(), "GF(2^3) mod x^3 + x + 1");
    }

    #[test]
    fn test_invalid_degree() {
        for degree in [0, 1, 17, 64] {
            let err = GaloisField::new(degree).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration);
        }
    }

    #[test]
    fn test_log_table_is_permutation() {
        for degree in MIN_FIELD_DEGREE..=MAX_FIELD_DEGREE {
            let field = GaloisField::new(degree).unwrap();
            let mut elements = field.exp_table.clone();
            elements.sort_unstable();
            let expected: Vec<usize> = (1..field.size()).collect();
            assert_eq!(elements, expected, "degree {}", degree);

            for e in 0..field.order() {
                assert_eq!(field.log(field.exp(e)).unwrap(), e);
            }
        }
    }

    #[test]
    fn test_inverse_axiom_exhaustive() {
        for degree in 2..=10 {
            let field = GaloisField::new(degree).unwrap();
            for a in 1..field.size() {
                let a_inv = field.inv(a).unwrap();
                assert_eq!(field.mul(a, a_inv).unwrap(), 1);
            }
        }
    }

    #[test]
    fn test_inverse_axiom_sampled_large_fields() {
        let mut rng = StdRng::seed_from_u64(16);
        for degree in 11..=MAX_FIELD_DEGREE {
            let field = GaloisField::new(degree).unwrap();
            for _ in 0..1000 {
                let a = rng.gen_range(1..field.size());
                assert_eq!(field.mul(a, field.inv(a).unwrap()).unwrap(), 1);
                assert_eq!(field.div(a, a).unwrap(), 1);
            }
        }
    }

    #[test]
    fn test_addition_laws() {
        let field = GaloisField::new(4).unwrap();
        for a in 0..field.size() {
            assert_eq!(field.add(a, a).unwrap(), 0);
            for b in 0..field.size() {
                assert_eq!(field.add(a, b).unwrap(), field.add(b, a).unwrap());
                for c in 0..field.size() {
                    let left = field.add(field.add(a, b).unwrap(), c).unwrap();
                    let right = field.add(a, field.add(b, c).unwrap()).unwrap();
                    assert_eq!(left, right);
                }
            }
        }
    }

    #[test]
    fn test_multiplication_distributes() {
        let field = GaloisField::new(5).unwrap();
        for a in 0..field.size() {
            for b in 0..field.size() {
                let c = (a * 7 + b) % field.size();
                let left = field.mul(a, field.add(b, c).unwrap()).unwrap();
                let right = field
                    .add(field.mul(a, b).unwrap(), field.mul(a, c).unwrap())
                    .unwrap();
                assert_eq!(left, right);
            }
        }
    }

    #[test]
    fn test_out_of_range() {
        let field = GaloisField::new(3).unwrap();
        assert_eq!(
            field.mul(8, 1),
            Err(Error::OutOfRange { value: 8, limit: 8 })
        );
        assert_eq!(
            field.add(1, 9),
            Err(Error::OutOfRange { value: 9, limit: 8 })
        );
        assert!(field.minimal_polynomial(100).is_err());
        assert!(field.eval(BinaryPoly::one(), 8).is_err());
        assert_eq!(field.inv(0), Err(Error::ZeroElement));
        assert_eq!(field.log(0), Err(Error::ZeroElement));
        assert_eq!(field.inv(0).unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_pow() {
        let field = GaloisField::new(3).unwrap();
        let alpha = field.generator();
        assert_eq!(field.pow(alpha, 7).unwrap(), 1);
        assert_eq!(field.pow(alpha, 3).unwrap(), 0b011);
        assert_eq!(field.pow(0, 0).unwrap(), 1);
        assert_eq!(field.pow(0, 5).unwrap(), 0);
        for a in 1..field.size() {
            assert_eq!(field.pow(a, 8).unwrap(), a);
            assert_eq!(
                field.pow(a, 2).unwrap(),
                field.mul(a, a).unwrap()
            );
        }
    }

    #[test]
    fn test_known_minimal_polynomials() {
        let gf8 = GaloisField::new(3).unwrap();
        assert_eq!(gf8.minimal_polynomial(0).unwrap().bits(), 0b10);
        assert_eq!(gf8.minimal_polynomial(1).unwrap().bits(), 0b11);
        assert_eq!(gf8.minimal_polynomial(gf8.exp(1)).unwrap().bits(), 0b1011);
        assert_eq!(gf8.minimal_polynomial(gf8.exp(3)).unwrap().bits(), 0b1101);

        let gf16 = GaloisField::new(4).unwrap();
        assert_eq!(gf16.minimal_polynomial(gf16.exp(1)).unwrap().bits(), 0b10011);
        assert_eq!(gf16.minimal_polynomial(gf16.exp(3)).unwrap().bits(), 0b11111);
        assert_eq!(gf16.minimal_polynomial(gf16.exp(5)).unwrap().bits(), 0b111);
        assert_eq!(gf16.conjugates(gf16.exp(5)).unwrap().len(), 2);
    }

    #[test]
    fn test_minimal_polynomial_has_root() {
        for degree in 2..=8 {
            let field = GaloisField::new(degree).unwrap();
            for a in 0..field.size() {
                let poly = field.minimal_polynomial(a).unwrap();
                assert_eq!(field.eval(poly, a).unwrap(), 0, "degree {}, a = {}", degree, a);
                assert!(poly.degree().unwrap() <= degree);
            }
        }
    }

    #[test]
    fn test_custom_primitive_poly() {
        // x^4 + x^3 + 1 is primitive
        let field = GaloisField::with_primitive_poly(4, 0b11001).unwrap();
        assert_eq!(field.order(), 15);

        // x^4 + x^3 + x^2 + x + 1 is irreducible but its root has order 5
        let err = GaloisField::with_primitive_poly(4, 0b11111).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        // wrong degree
        assert!(GaloisField::with_primitive_poly(4, 0b1011).is_err());

        // x^4 has no constant term and collapses to zero
        assert!(GaloisField::with_primitive_poly(4, 0b10000).is_err());
    }
}
