//! Polynomials over GF(2) packed into a single machine register.
//!
//! Bit `i` of the register holds the coefficient of x^i, so `0b1011` is
//! x^3 + x + 1. Addition and subtraction are both XOR, multiplication is
//! carry-less shift-and-XOR, and division is binary long division.
//!
//! The register is 128 bits wide, which caps the degree at 127. Operations
//! whose result would need more room fail with
//! [`Error::PolynomialOverflow`](crate::cs::error::Error::PolynomialOverflow)
//! rather than silently dropping high coefficients.
//!
//! # Examples
//!
//! ```
//! use bch_matrices::math::binary_poly::BinaryPoly;
//!
//! let g = BinaryPoly::from_bits(0b1011); // x^3 + x + 1
//! let x7_plus_1 = BinaryPoly::from_bits((1 << 7) | 1);
//! let (q, r) = x7_plus_1.divide(g).unwrap();
//! assert!(r.is_zero());
//! assert_eq!(q.multiply(g).unwrap(), x7_plus_1);
//! ```

use crate::cs::error::{Error, Result};
use std::fmt::{self, Binary, Display, Formatter};
use std::ops::{Add, BitXor};

/// Largest degree a [`BinaryPoly`] can hold
pub const MAX_DEGREE: usize = u128::BITS as usize - 1;

/// A polynomial with GF(2) coefficients, bit-packed into a `u128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BinaryPoly(u128);

impl BinaryPoly {
    /// Wrap a raw bit pattern (bit `i` = coefficient of x^i)
    pub const fn from_bits(bits: u128) -> Self {
        BinaryPoly(bits)
    }

    /// The zero polynomial
    pub const fn zero() -> Self {
        BinaryPoly(0)
    }

    /// The constant polynomial 1
    pub const fn one() -> Self {
        BinaryPoly(1)
    }

    /// The monomial x^degree
    pub fn monomial(degree: usize) -> Result<Self> {
        if degree > MAX_DEGREE {
            return Err(Error::PolynomialOverflow {
                degree,
                max_degree: MAX_DEGREE,
            });
        }
        Ok(BinaryPoly(1u128 << degree))
    }

    /// Raw bit pattern
    pub const fn bits(self) -> u128 {
        self.0
    }

    /// Index of the highest set coefficient, `None` for the zero polynomial
    pub fn degree(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(MAX_DEGREE - self.0.leading_zeros() as usize)
        }
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_one(self) -> bool {
        self.0 == 1
    }

    /// Coefficient of x^i
    pub fn coefficient(self, i: usize) -> bool {
        i <= MAX_DEGREE && (self.0 >> i) & 1 == 1
    }

    /// Number of nonzero coefficients
    pub fn weight(self) -> u32 {
        self.0.count_ones()
    }

    /// Carry-less product of two polynomials.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialOverflow` if the product's degree exceeds [`MAX_DEGREE`].
    pub fn multiply(self, other: Self) -> Result<Self> {
        let (Some(a_deg), Some(b_deg)) = (self.degree(), other.degree()) else {
            return Ok(BinaryPoly::zero());
        };

        if a_deg + b_deg > MAX_DEGREE {
            return Err(Error::PolynomialOverflow {
                degree: a_deg + b_deg,
                max_degree: MAX_DEGREE,
            });
        }

        let mut product = 0u128;
        let mut b = other.0;
        let mut shift = 0;
        while b != 0 {
            if b & 1 == 1 {
                product ^= self.0 << shift;
            }
            b >>= 1;
            shift += 1;
        }

        Ok(BinaryPoly(product))
    }

    /// Long division, returning `(quotient, remainder)`.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if `divisor` is the zero polynomial.
    pub fn divide(self, divisor: Self) -> Result<(Self, Self)> {
        let divisor_degree = divisor.degree().ok_or(Error::DivisionByZero)?;
        Ok(long_division(self, divisor, divisor_degree))
    }

    /// Division that must leave no remainder.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` for a zero divisor and `InexactDivision` if
    /// `divisor` does not divide `self`.
    pub fn exact_div(self, divisor: Self) -> Result<Self> {
        let (quotient, remainder) = self.divide(divisor)?;
        if !remainder.is_zero() {
            return Err(Error::InexactDivision {
                dividend: self.0,
                divisor: divisor.0,
                remainder: remainder.0,
            });
        }
        Ok(quotient)
    }

    /// Greatest common divisor (Euclid). `gcd(0, 0)` is 0.
    pub fn gcd(self, other: Self) -> Self {
        let mut a = self;
        let mut b = other;
        while let Some(b_deg) = b.degree() {
            let (_, r) = long_division(a, b, b_deg);
            a = b;
            b = r;
        }
        a
    }

    /// Least common multiple, `a * b / gcd(a, b)`. Zero if either operand is zero.
    ///
    /// The division happens before the multiplication, so the only way this
    /// overflows is when the lcm itself does not fit.
    pub fn lcm(self, other: Self) -> Result<Self> {
        if self.is_zero() || other.is_zero() {
            return Ok(BinaryPoly::zero());
        }
        let gcd = self.gcd(other);
        // gcd is nonzero here, so the degree exists
        let gcd_degree = gcd.degree().unwrap_or(0);
        let (cofactor, _) = long_division(self, gcd, gcd_degree);
        cofactor.multiply(other)
    }
}

fn long_division(
    dividend: BinaryPoly,
    divisor: BinaryPoly,
    divisor_degree: usize,
) -> (BinaryPoly, BinaryPoly) {
    let mut quotient = 0u128;
    let mut remainder = dividend.0;

    while let Some(r_deg) = BinaryPoly(remainder).degree() {
        if r_deg < divisor_degree {
            break;
        }
        let shift = r_deg - divisor_degree;
        quotient |= 1u128 << shift;
        remainder ^= divisor.0 << shift;
    }

    (BinaryPoly(quotient), BinaryPoly(remainder))
}

impl From<u128> for BinaryPoly {
    fn from(bits: u128) -> Self {
        BinaryPoly(bits)
    }
}

impl Add for BinaryPoly {
    type Output = BinaryPoly;

    fn add(self, rhs: Self) -> Self::Output {
        BinaryPoly(self.0 ^ rhs.0)
    }
}

impl BitXor for BinaryPoly {
    type Output = BinaryPoly;

    fn bitxor(self, rhs: Self) -> Self::Output {
        BinaryPoly(self.0 ^ rhs.0)
    }
}

impl Binary for BinaryPoly {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Binary::fmt(&self.0, f)
    }
}

impl Display for BinaryPoly {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Some(degree) = self.degree() else {
            return write!(f, "0");
        };

        let mut first = true;
        for i in (0..=degree).rev() {
            if !self.coefficient(i) {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            match i {
                0 => write!(f, "1")?,
                1 => write!(f, "x")?,
                _ => write!(f, "x^{}", i)?,
            }
            first = false;
        }
        Ok(())
    }
}
