//! Dense matrices over GF(2) and Gaussian elimination.
//!
//! Rows are stored as [`BitVec`]s, so a matrix is an owned, bounds-checked
//! two-dimensional container whose dimensions are fixed at construction.
//! Arithmetic is mod 2 throughout: row subtraction is XOR.
//!
//! The two elimination entry points are:
//! - [`upper_echelon_form`]: in-place forward elimination, returns the rank
//! - [`null_space_basis`]: the echelon form together with a basis of the
//!   vectors orthogonal to every row, expressed in the original column order
//!
//! # Examples
//!
//! ```
//! use bch_matrices::math::gf2_matrix::{null_space_basis, BitMatrix};
//!
//! let h = BitMatrix::from_rows(vec![
//!     vec![true, true, false],
//!     vec![false, true, true],
//! ])
//! .unwrap();
//! let null_space = null_space_basis(&h);
//! assert_eq!(null_space.rank, 2);
//! assert_eq!(null_space.basis.rows(), 1);
//! assert!(null_space.basis.is_orthogonal_to(&h));
//! ```

use crate::cs::error::{Error, Result};
use bitvec::prelude::*;
use log::trace;
use std::fmt::{Display, Formatter};

/// One matrix row
pub type BitRow = BitVec<u64, Lsb0>;

/// A `rows x cols` matrix with entries in GF(2).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    rows: usize,
    cols: usize,
    data: Vec<BitRow>,
}

impl BitMatrix {
    /// The all-zero `rows x cols` matrix
    pub fn new(rows: usize, cols: usize) -> Self {
        BitMatrix {
            rows,
            cols,
            data: vec![bitvec![u64, Lsb0; 0; cols]; rows],
        }
    }

    /// The `n x n` identity matrix
    pub fn identity(n: usize) -> Self {
        let mut matrix = Self::new(n, n);
        for (i, row) in matrix.data.iter_mut().enumerate() {
            row.set(i, true);
        }
        matrix
    }

    /// Build a matrix from boolean rows.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the rows do not all have the same length.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(Error::InvalidInput(format!(
                "Row {} has {} columns, expected {}",
                i,
                row.len(),
                cols
            )));
        }

        Ok(BitMatrix {
            rows: rows.len(),
            cols,
            data: rows
                .into_iter()
                .map(|row| row.into_iter().collect::<BitRow>())
                .collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry at (`row`, `col`), or `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.data.get(row)?.get(col).map(|bit| *bit)
    }

    /// Set the entry at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if either index is outside the matrix.
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<()> {
        if col >= self.cols {
            return Err(Error::OutOfRange {
                value: col,
                limit: self.cols,
            });
        }
        let limit = self.rows;
        let r = self.data.get_mut(row).ok_or(Error::OutOfRange {
            value: row,
            limit,
        })?;
        r.set(col, value);
        Ok(())
    }

    /// A single row, or `None` if out of bounds
    pub fn row(&self, row: usize) -> Option<&BitSlice<u64, Lsb0>> {
        self.data.get(row).map(BitVec::as_bitslice)
    }

    /// Iterate over the rows
    pub fn iter_rows(&self) -> impl Iterator<Item = &BitSlice<u64, Lsb0>> {
        self.data.iter().map(BitVec::as_bitslice)
    }

    /// Exchange two rows. Panics if either index is out of bounds.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
    }

    /// Exchange two columns. Panics if either index is out of bounds.
    pub fn swap_columns(&mut self, a: usize, b: usize) {
        assert!(a < self.cols && b < self.cols, "column index out of bounds");
        if a == b {
            return;
        }
        for row in &mut self.data {
            row.swap(a, b);
        }
    }

    /// XOR row `src` into row `dst`, touching only columns `from_col..`.
    ///
    /// Entries of `src` left of `from_col` are assumed zero by callers that
    /// pass a nonzero `from_col`.
    pub fn add_row(&mut self, src: usize, dst: usize, from_col: usize) {
        assert_ne!(src, dst, "cannot add a row to itself");
        let (src_row, dst_row) = if src < dst {
            let (head, tail) = self.data.split_at_mut(dst);
            (&head[src], &mut tail[0])
        } else {
            let (head, tail) = self.data.split_at_mut(src);
            (&tail[0], &mut head[dst])
        };

        for col in src_row[from_col..].iter_ones() {
            let col = col + from_col;
            let bit = dst_row[col];
            dst_row.set(col, !bit);
        }
    }

    /// Drop every row from index `rows` on
    pub fn truncate_rows(&mut self, rows: usize) {
        self.data.truncate(rows);
        self.rows = self.data.len();
    }

    pub fn transpose(&self) -> Self {
        let mut result = Self::new(self.cols, self.rows);
        for (i, row) in self.data.iter().enumerate() {
            for j in row.iter_ones() {
                result.data[j].set(i, true);
            }
        }
        result
    }

    /// The product `self * other^T`; entry (i, j) is the dot product of row
    /// i of `self` with row j of `other`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the column counts differ.
    pub fn mul_transpose(&self, other: &BitMatrix) -> Result<Self> {
        if self.cols != other.cols {
            return Err(Error::InvalidInput(format!(
                "Column counts differ: {} vs {}",
                self.cols, other.cols
            )));
        }
        let mut result = Self::new(self.rows, other.rows);
        for (i, a) in self.data.iter().enumerate() {
            for (j, b) in other.data.iter().enumerate() {
                if dot(a, b) {
                    result.data[i].set(j, true);
                }
            }
        }
        Ok(result)
    }

    /// Whether both matrices have the same width and every row of `self` is
    /// orthogonal to every row of `other`
    pub fn is_orthogonal_to(&self, other: &BitMatrix) -> bool {
        self.cols == other.cols && self.first_non_orthogonal(other).is_none()
    }

    /// The first (row of `self`, row of `other`) pair with dot product 1
    pub fn first_non_orthogonal(&self, other: &BitMatrix) -> Option<(usize, usize)> {
        for (i, a) in self.data.iter().enumerate() {
            for (j, b) in other.data.iter().enumerate() {
                if dot(a, b) {
                    return Some((i, j));
                }
            }
        }
        None
    }

    /// Rank over GF(2); does not modify `self`
    pub fn rank(&self) -> usize {
        let mut copy = self.clone();
        upper_echelon_form(&mut copy)
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|row| row.not_any())
    }

    /// Stack `other` below `self`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the column counts differ.
    pub fn vstack(&self, other: &BitMatrix) -> Result<Self> {
        if self.cols != other.cols {
            return Err(Error::InvalidInput(format!(
                "Column counts differ: {} vs {}",
                self.cols, other.cols
            )));
        }
        let mut data = self.data.clone();
        data.extend(other.data.iter().cloned());
        Ok(BitMatrix {
            rows: data.len(),
            cols: self.cols,
            data,
        })
    }
}

/// Dot product of two rows over GF(2)
pub fn dot(a: &BitSlice<u64, Lsb0>, b: &BitSlice<u64, Lsb0>) -> bool {
    a.iter_ones().filter(|&i| b.get(i).is_some_and(|bit| *bit)).count() % 2 == 1
}

impl Display for BitMatrix {
    /// One row per line, entries as space-separated 0/1
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in &self.data {
            let line = row
                .iter()
                .map(|bit| if *bit { "1" } else { "0" })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Transform `matrix` in place into upper echelon form and return its rank.
///
/// Columns are scanned left to right. For each column the first row at or
/// below the current pivot row with a 1 there becomes the pivot; it is
/// swapped into place and XORed into every lower row with a 1 in the pivot
/// column. Columns without a candidate are skipped. No back-substitution is
/// performed, and running this on its own output leaves it unchanged.
pub fn upper_echelon_form(matrix: &mut BitMatrix) -> usize {
    let mut pivot_row = 0;
    let mut col = 0;

    while pivot_row < matrix.rows && col < matrix.cols {
        let Some(found) = (pivot_row..matrix.rows).find(|&r| matrix.data[r][col]) else {
            col += 1;
            continue;
        };

        if found != pivot_row {
            matrix.swap_rows(found, pivot_row);
        }
        for r in pivot_row + 1..matrix.rows {
            if matrix.data[r][col] {
                matrix.add_row(pivot_row, r, col);
            }
        }

        pivot_row += 1;
        col += 1;
    }

    trace!(
        "Echelon form of {}x{} matrix has rank {}",
        matrix.rows,
        matrix.cols,
        pivot_row
    );
    pivot_row
}

/// Output of [`null_space_basis`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullSpace {
    /// Rank of the input matrix
    pub rank: usize,
    /// Upper echelon form of the input, dependent rows removed
    /// (`rank x cols`, original column order)
    pub echelon: BitMatrix,
    /// `(cols - rank) x cols` basis of the null space, original column order
    pub basis: BitMatrix,
}

/// Compute the echelon form of `matrix` and a basis of its null space.
///
/// After elimination the columns are permuted so that each of the first
/// `rank` rows has its pivot on the diagonal. Each basis vector starts as a
/// unit vector on one of the free columns `rank..cols`, the pivot entries
/// are filled in by back-substitution from the last pivot row upwards, and
/// finally the column permutation is undone so the basis lines up with the
/// columns of `matrix`.
pub fn null_space_basis(matrix: &BitMatrix) -> NullSpace {
    let cols = matrix.cols;
    let mut reduced = matrix.clone();
    let rank = upper_echelon_form(&mut reduced);
    reduced.truncate_rows(rank);
    let echelon = reduced.clone();

    // order[p] is the original index of the column now at position p
    let mut order: Vec<usize> = (0..cols).collect();
    for i in 0..rank {
        if reduced.data[i][i] {
            continue;
        }
        if let Some(j) = (i + 1..cols).find(|&j| reduced.data[i][j]) {
            order.swap(i, j);
            reduced.swap_columns(i, j);
        }
    }

    let mut basis = BitMatrix::new(cols - rank, cols);
    for (j, vector) in basis.data.iter_mut().enumerate() {
        vector.set(rank + j, true);
    }

    for i in (0..rank).rev() {
        let pivot_row = &reduced.data[i];
        for vector in &mut basis.data {
            let value = dot(&pivot_row[i + 1..], &vector[i + 1..]);
            vector.set(i, value);
        }
    }

    // Cycle-following inverse permutation: send each column home
    for i in 0..cols {
        while order[i] != i {
            let target = order[i];
            basis.swap_columns(i, target);
            order.swap(i, target);
        }
    }

    NullSpace {
        rank,
        echelon,
        basis,
    }
}
