//! Slicing: linear-index gathers and scatters, two-dimensional range
//! views, mask selection and whole row/column transfer.
//!
//! Row and column transfer is one strided kernel call each: a row is a
//! stride `rows` walk starting at the row index, a column is a contiguous
//! run starting at `column * rows`. Range-based access drives two
//! [`Range`] cursors, re-initializing the row cursor once per selected
//! column.

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::kernels;
use crate::matrix::Matrix;
use crate::ranges::Range;

// ============================================================================
// Linear-index and mask selection
// ============================================================================

impl<T: Element> Matrix<T> {
    /// Gather elements at the given linear indices into a column vector.
    ///
    /// # Panics
    ///
    /// Panics when an index is out of bounds.
    pub fn get_indices(&self, indices: &[usize]) -> Matrix<T> {
        let mut out = Matrix::new(indices.len(), 1);
        for (k, &i) in indices.iter().enumerate() {
            out.as_mut_slice()[k] = self.as_slice()[i];
        }
        out
    }

    /// Scatter the elements of `x` to the given linear indices. A `1 x 1`
    /// `x` broadcasts; otherwise its length must match the index count.
    ///
    /// # Panics
    ///
    /// Panics when an index is out of bounds.
    pub fn put_indices(&mut self, indices: &[usize], x: &Matrix<T>) -> Result<&mut Self> {
        if let Some(v) = x.scalar_value() {
            return Ok(self.put_indices_value(indices, v));
        }
        if x.len() != indices.len() {
            return Err(Error::SizeMismatch {
                op: "put_indices",
                expected: indices.len(),
                got: x.len(),
            });
        }
        for (k, &i) in indices.iter().enumerate() {
            self.as_mut_slice()[i] = x.as_slice()[k];
        }
        Ok(self)
    }

    /// Store `value` at each of the given linear indices.
    ///
    /// # Panics
    ///
    /// Panics when an index is out of bounds.
    pub fn put_indices_value(&mut self, indices: &[usize], value: T) -> &mut Self {
        for &i in indices {
            self.as_mut_slice()[i] = value;
        }
        self
    }

    /// Gather the elements where `mask` is non-zero, in linear order.
    pub fn get_mask(&self, mask: &Matrix<T>) -> Matrix<T> {
        self.get_indices(&mask.find_indices())
    }

    /// Scatter `x` to the positions where `mask` is non-zero.
    pub fn put_mask(&mut self, mask: &Matrix<T>, x: &Matrix<T>) -> Result<&mut Self> {
        self.put_indices(&mask.find_indices(), x)
    }

    /// Store `value` wherever `mask` is non-zero.
    pub fn put_mask_value(&mut self, mask: &Matrix<T>, value: T) -> &mut Self {
        self.put_indices_value(&mask.find_indices(), value)
    }
}

// ============================================================================
// Range-based two-dimensional slicing
// ============================================================================

impl<T: Element> Matrix<T> {
    /// Copy the submatrix selected by a row range and a column range.
    ///
    /// The cursors are initialized here against the matrix extents, so a
    /// freshly constructed or previously exhausted range works directly.
    pub fn get_ranges(&self, rs: &mut Range, cs: &mut Range) -> Result<Matrix<T>> {
        rs.init(0, self.rows())?;
        cs.init(0, self.columns())?;
        let mut out = Matrix::new(rs.len(), cs.len());
        while cs.has_more() {
            rs.init(0, self.rows())?;
            while rs.has_more() {
                let v = self.get(rs.value(), cs.value());
                out.put(rs.index(), cs.index(), v);
                rs.next();
            }
            cs.next();
        }
        Ok(out)
    }

    /// Write `x` into the submatrix selected by a row range and a column
    /// range. A `1 x 1` `x` broadcasts; otherwise its shape must match the
    /// selection.
    pub fn put_ranges(&mut self, rs: &mut Range, cs: &mut Range, x: &Matrix<T>) -> Result<&mut Self> {
        if let Some(v) = x.scalar_value() {
            return self.put_ranges_value(rs, cs, v);
        }
        rs.init(0, self.rows())?;
        cs.init(0, self.columns())?;
        if x.rows() != rs.len() {
            return Err(Error::SizeMismatch {
                op: "put_ranges: rows",
                expected: rs.len(),
                got: x.rows(),
            });
        }
        if x.columns() != cs.len() {
            return Err(Error::SizeMismatch {
                op: "put_ranges: columns",
                expected: cs.len(),
                got: x.columns(),
            });
        }
        while cs.has_more() {
            rs.init(0, self.rows())?;
            while rs.has_more() {
                let v = x.get(rs.index(), cs.index());
                self.put(rs.value(), cs.value(), v);
                rs.next();
            }
            cs.next();
        }
        Ok(self)
    }

    /// Store `value` across the submatrix selected by the two ranges.
    pub fn put_ranges_value(
        &mut self,
        rs: &mut Range,
        cs: &mut Range,
        value: T,
    ) -> Result<&mut Self> {
        cs.init(0, self.columns())?;
        while cs.has_more() {
            rs.init(0, self.rows())?;
            while rs.has_more() {
                self.put(rs.value(), cs.value(), value);
                rs.next();
            }
            cs.next();
        }
        Ok(self)
    }
}

// ============================================================================
// Whole row and column transfer
// ============================================================================

impl<T: Element> Matrix<T> {
    /// Copy row `r` out as a `1 x columns` row vector.
    pub fn get_row(&self, r: usize) -> Result<Matrix<T>> {
        let mut out = Matrix::new(1, self.columns());
        self.get_row_into(r, &mut out)?;
        Ok(out)
    }

    /// Copy row `r` into an existing buffer of matching length.
    pub fn get_row_into(&self, r: usize, dest: &mut Matrix<T>) -> Result<()> {
        if dest.len() != self.columns() {
            return Err(Error::SizeMismatch {
                op: "get_row",
                expected: self.columns(),
                got: dest.len(),
            });
        }
        let rows = self.rows();
        kernels::copy(
            self.columns(),
            self.as_slice(),
            r,
            rows,
            dest.as_mut_slice(),
            0,
            1,
        )
    }

    /// Overwrite row `r` with the elements of `x` (any shape of length
    /// `columns`).
    pub fn put_row(&mut self, r: usize, x: &Matrix<T>) -> Result<&mut Self> {
        if x.len() != self.columns() {
            return Err(Error::SizeMismatch {
                op: "put_row",
                expected: self.columns(),
                got: x.len(),
            });
        }
        let (rows, columns) = (self.rows(), self.columns());
        kernels::copy(columns, x.as_slice(), 0, 1, self.as_mut_slice(), r, rows)?;
        Ok(self)
    }

    /// Copy column `c` out as a `rows x 1` column vector.
    pub fn get_column(&self, c: usize) -> Result<Matrix<T>> {
        let mut out = Matrix::new(self.rows(), 1);
        self.get_column_into(c, &mut out)?;
        Ok(out)
    }

    /// Copy column `c` into an existing buffer of matching length.
    pub fn get_column_into(&self, c: usize, dest: &mut Matrix<T>) -> Result<()> {
        if dest.len() != self.rows() {
            return Err(Error::SizeMismatch {
                op: "get_column",
                expected: self.rows(),
                got: dest.len(),
            });
        }
        let rows = self.rows();
        kernels::copy(
            rows,
            self.as_slice(),
            c * rows,
            1,
            dest.as_mut_slice(),
            0,
            1,
        )
    }

    /// Overwrite column `c` with the elements of `x` (any shape of length
    /// `rows`).
    pub fn put_column(&mut self, c: usize, x: &Matrix<T>) -> Result<&mut Self> {
        if x.len() != self.rows() {
            return Err(Error::SizeMismatch {
                op: "put_column",
                expected: self.rows(),
                got: x.len(),
            });
        }
        let rows = self.rows();
        kernels::copy(rows, x.as_slice(), 0, 1, self.as_mut_slice(), c * rows, 1)?;
        Ok(self)
    }

    /// Copy the given rows, in order, into a new matrix.
    ///
    /// # Panics
    ///
    /// Panics when a row index is out of bounds.
    pub fn get_rows(&self, indices: &[usize]) -> Matrix<T> {
        let mut out = Matrix::new(indices.len(), self.columns());
        for (k, &r) in indices.iter().enumerate() {
            for j in 0..self.columns() {
                let v = self.get(r, j);
                out.put(k, j, v);
            }
        }
        out
    }

    /// Copy the given columns, in order, into a new matrix.
    ///
    /// # Panics
    ///
    /// Panics when a column index is out of bounds.
    pub fn get_columns(&self, indices: &[usize]) -> Matrix<T> {
        let mut out = Matrix::new(self.rows(), indices.len());
        for (k, &c) in indices.iter().enumerate() {
            for i in 0..self.rows() {
                let v = self.get(i, c);
                out.put(i, k, v);
            }
        }
        out
    }
}
