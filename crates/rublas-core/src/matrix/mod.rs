//! The dense matrix container and its element-level API.
//!
//! A [`Matrix`] is a rectangular block of `f32` or `f64` values in a single
//! contiguous column-major buffer: element `(i, j)` of an `m x n` matrix
//! lives at linear index `i + m * j`. Shape is metadata over that buffer;
//! [`Matrix::reshape`] reinterprets it in place and vectors are just
//! matrices with one row or one column. A `1 x 1` matrix acts as a scalar
//! in arithmetic.
//!
//! This file holds the container itself, element access, shape surgery and
//! reductions. Construction helpers live in `create`, slicing in
//! `indexing`, arithmetic in `ops` and formatting in `display`.

use crate::dispatch;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::kernels;

mod create;
mod display;
mod indexing;
mod ops;

pub use ops::Operand;

/// A dense column-major matrix of `f32` or `f64` elements.
///
/// ```
/// use rublas_core::Matrix;
///
/// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// assert_eq!(m.get(1, 0), 3.0);
/// assert_eq!(m.sum(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: Element> {
    rows: usize,
    columns: usize,
    data: Vec<T>,
}

// ============================================================================
// Construction and raw access
// ============================================================================

impl<T: Element> Matrix<T> {
    /// A `rows x columns` matrix of zeros.
    pub fn new(rows: usize, columns: usize) -> Self {
        Matrix {
            rows,
            columns,
            data: vec![T::zero(); rows * columns],
        }
    }

    /// Wrap a column-major buffer as a `rows x columns` matrix.
    ///
    /// Fails with [`Error::InvalidShape`] unless `data.len() == rows * columns`.
    pub fn from_vec(rows: usize, columns: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * columns {
            return Err(Error::InvalidShape {
                rows,
                columns,
                len: data.len(),
            });
        }
        Ok(Matrix {
            rows,
            columns,
            data,
        })
    }

    /// Build a matrix from row slices, all of equal length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let m = rows.len();
        if m == 0 {
            return Ok(Matrix::empty());
        }
        let n = rows[0].as_ref().len();
        let mut out = Matrix::new(m, n);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(Error::SizeMismatch {
                    op: "from_rows",
                    expected: n,
                    got: row.len(),
                });
            }
            for (j, &v) in row.iter().enumerate() {
                out.data[i + m * j] = v;
            }
        }
        Ok(out)
    }

    /// A column vector (`n x 1`).
    pub fn vector(data: Vec<T>) -> Self {
        Matrix {
            rows: data.len(),
            columns: 1,
            data,
        }
    }

    /// A row vector (`1 x n`).
    pub fn row_vector(data: Vec<T>) -> Self {
        Matrix {
            rows: 1,
            columns: data.len(),
            data,
        }
    }

    /// A `1 x 1` matrix holding a single value.
    pub fn scalar(value: T) -> Self {
        Matrix {
            rows: 1,
            columns: 1,
            data: vec![value],
        }
    }

    /// The `0 x 0` matrix.
    pub fn empty() -> Self {
        Matrix {
            rows: 0,
            columns: 0,
            data: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total element count (`rows * columns`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the matrix holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The column-major backing buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable view of the column-major backing buffer.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the matrix and return its backing buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

// ============================================================================
// Shape predicates and element access
// ============================================================================

impl<T: Element> Matrix<T> {
    /// Whether this is a `1 x 1` matrix; such a matrix broadcasts as a
    /// scalar in arithmetic.
    pub fn is_scalar(&self) -> bool {
        self.data.len() == 1
    }

    /// The single value of a `1 x 1` matrix, or `None` otherwise.
    pub fn scalar_value(&self) -> Option<T> {
        if self.is_scalar() {
            Some(self.data[0])
        } else {
            None
        }
    }

    /// Whether the matrix has a single row or a single column.
    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.columns == 1
    }

    /// Whether the matrix has exactly one row.
    pub fn is_row_vector(&self) -> bool {
        self.rows == 1
    }

    /// Whether the matrix has exactly one column.
    pub fn is_column_vector(&self) -> bool {
        self.columns == 1
    }

    /// Whether the matrix is square.
    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    /// Whether `other` has the same rows and columns.
    pub fn same_size(&self, other: &Self) -> bool {
        self.rows == other.rows && self.columns == other.columns
    }

    /// Whether `other` holds the same number of elements, regardless of
    /// shape. Element-wise arithmetic only requires this.
    pub fn same_length(&self, other: &Self) -> bool {
        self.data.len() == other.data.len()
    }

    /// Linear index of element `(row, column)` in the backing buffer.
    #[inline]
    pub fn index(&self, row: usize, column: usize) -> usize {
        row + self.rows * column
    }

    /// Element at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics when the position is outside the matrix.
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> T {
        assert!(
            row < self.rows && column < self.columns,
            "position ({}, {}) outside {}x{} matrix",
            row,
            column,
            self.rows,
            self.columns
        );
        self.data[row + self.rows * column]
    }

    /// Store `value` at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics when the position is outside the matrix.
    #[inline]
    pub fn put(&mut self, row: usize, column: usize, value: T) -> &mut Self {
        assert!(
            row < self.rows && column < self.columns,
            "position ({}, {}) outside {}x{} matrix",
            row,
            column,
            self.rows,
            self.columns
        );
        self.data[row + self.rows * column] = value;
        self
    }

    /// Element at a linear (column-major) index.
    ///
    /// # Panics
    ///
    /// Panics when `i >= len()`.
    #[inline]
    pub fn get_linear(&self, i: usize) -> T {
        self.data[i]
    }

    /// Store `value` at a linear (column-major) index.
    ///
    /// # Panics
    ///
    /// Panics when `i >= len()`.
    #[inline]
    pub fn put_linear(&mut self, i: usize, value: T) -> &mut Self {
        self.data[i] = value;
        self
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) -> &mut Self {
        for v in &mut self.data {
            *v = value;
        }
        self
    }

    /// An independent copy.
    pub fn dup(&self) -> Self {
        self.clone()
    }
}

// ============================================================================
// Shape surgery
// ============================================================================

impl<T: Element> Matrix<T> {
    /// Discard the contents and reallocate as a `rows x columns` zero matrix.
    pub fn resize(&mut self, rows: usize, columns: usize) {
        log::trace!(
            "resizing {}x{} matrix to {}x{}",
            self.rows,
            self.columns,
            rows,
            columns
        );
        self.rows = rows;
        self.columns = columns;
        self.data.clear();
        self.data.resize(rows * columns, T::zero());
    }

    /// Reinterpret the buffer under a new shape with the same element count.
    ///
    /// Elements keep their linear (column-major) order.
    pub fn reshape(&mut self, rows: usize, columns: usize) -> Result<&mut Self> {
        if rows * columns != self.data.len() {
            return Err(Error::SizeMismatch {
                op: "reshape",
                expected: self.data.len(),
                got: rows * columns,
            });
        }
        self.rows = rows;
        self.columns = columns;
        Ok(self)
    }

    /// The transposed matrix, as a new allocation.
    pub fn transpose(&self) -> Matrix<T> {
        let mut out = Matrix::new(self.columns, self.rows);
        for j in 0..self.columns {
            for i in 0..self.rows {
                out.data[j + self.columns * i] = self.data[i + self.rows * j];
            }
        }
        out
    }

    /// The main diagonal of a square matrix, as a column vector.
    pub fn diag(&self) -> Result<Matrix<T>> {
        if self.rows != self.columns {
            return Err(Error::SizeMismatch {
                op: "diag",
                expected: self.rows,
                got: self.columns,
            });
        }
        let mut out = Matrix::new(self.rows, 1);
        // The diagonal is a stride rows+1 walk through the buffer.
        kernels::copy(
            self.rows,
            &self.data,
            0,
            self.rows + 1,
            &mut out.data,
            0,
            1,
        )?;
        Ok(out)
    }

    /// Exchange two rows in place.
    ///
    /// # Panics
    ///
    /// Panics when either row index is out of bounds.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> &mut Self {
        assert!(a < self.rows && b < self.rows, "row index out of bounds");
        for j in 0..self.columns {
            self.data.swap(a + self.rows * j, b + self.rows * j);
        }
        self
    }

    /// Exchange two columns in place.
    ///
    /// # Panics
    ///
    /// Panics when either column index is out of bounds.
    pub fn swap_columns(&mut self, a: usize, b: usize) -> &mut Self {
        assert!(
            a < self.columns && b < self.columns,
            "column index out of bounds"
        );
        for i in 0..self.rows {
            self.data.swap(i + self.rows * a, i + self.rows * b);
        }
        self
    }
}

// ============================================================================
// Reductions, norms and distances
// ============================================================================

impl<T: Element> Matrix<T> {
    /// Sum of all elements.
    pub fn sum(&self) -> T {
        let mut s = T::zero();
        for &v in &self.data {
            s += v;
        }
        s
    }

    /// Product of all elements (1 for an empty matrix).
    pub fn prod(&self) -> T {
        let mut p = T::one();
        for &v in &self.data {
            p *= v;
        }
        p
    }

    /// Arithmetic mean of all elements.
    pub fn mean(&self) -> T {
        self.sum() / T::from_usize(self.data.len())
    }

    /// Smallest element, skipping NaNs. Positive infinity when there is no
    /// comparable element.
    pub fn min(&self) -> T {
        let mut m = T::infinity();
        for &v in &self.data {
            if !v.is_nan() && v < m {
                m = v;
            }
        }
        m
    }

    /// Largest element, skipping NaNs. Negative infinity when there is no
    /// comparable element.
    pub fn max(&self) -> T {
        let mut m = T::neg_infinity();
        for &v in &self.data {
            if !v.is_nan() && v > m {
                m = v;
            }
        }
        m
    }

    /// Linear index of the smallest element, skipping NaNs.
    pub fn argmin(&self) -> Option<usize> {
        let mut best: Option<(usize, T)> = None;
        for (i, &v) in self.data.iter().enumerate() {
            if v.is_nan() {
                continue;
            }
            match best {
                Some((_, b)) if b <= v => {}
                _ => best = Some((i, v)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Linear index of the largest element, skipping NaNs.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, T)> = None;
        for (i, &v) in self.data.iter().enumerate() {
            if v.is_nan() {
                continue;
            }
            match best {
                Some((_, b)) if b >= v => {}
                _ => best = Some((i, v)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// The 1-norm (sum of absolute values).
    pub fn norm1(&self) -> T {
        let mut s = T::zero();
        for &v in &self.data {
            s += v.abs();
        }
        s
    }

    /// The Euclidean norm.
    pub fn norm2(&self) -> T {
        let mut s = T::zero();
        for &v in &self.data {
            s += v * v;
        }
        s.sqrt()
    }

    /// The max-norm (largest absolute value).
    pub fn norm_max(&self) -> T {
        let mut m = T::zero();
        for &v in &self.data {
            let a = v.abs();
            if a > m {
                m = a;
            }
        }
        m
    }

    /// Dot product with an equally long matrix, shape-agnostic.
    pub fn dot(&self, other: &Self) -> Result<T> {
        self.check_same_length(other, "dot")?;
        dispatch::dot(self, other)
    }

    /// Squared Euclidean distance to `other`.
    pub fn squared_distance(&self, other: &Self) -> Result<T> {
        self.check_same_length(other, "squared_distance")?;
        let mut s = T::zero();
        for (&a, &b) in self.data.iter().zip(other.data.iter()) {
            let d = a - b;
            s += d * d;
        }
        Ok(s)
    }

    /// Euclidean distance to `other`.
    pub fn distance2(&self, other: &Self) -> Result<T> {
        Ok(self.squared_distance(other)?.sqrt())
    }

    /// Manhattan distance to `other`.
    pub fn distance1(&self, other: &Self) -> Result<T> {
        self.check_same_length(other, "distance1")?;
        let mut s = T::zero();
        for (&a, &b) in self.data.iter().zip(other.data.iter()) {
            s += (a - b).abs();
        }
        Ok(s)
    }

    /// Column sums, as a `1 x columns` row vector.
    pub fn column_sums(&self) -> Matrix<T> {
        let mut out = Matrix::new(1, self.columns);
        for j in 0..self.columns {
            let mut s = T::zero();
            for i in 0..self.rows {
                s += self.data[i + self.rows * j];
            }
            out.data[j] = s;
        }
        out
    }

    /// Column means, as a `1 x columns` row vector.
    pub fn column_means(&self) -> Matrix<T> {
        let mut out = self.column_sums();
        let d = T::from_usize(self.rows);
        for v in &mut out.data {
            *v /= d;
        }
        out
    }

    /// Row sums, as a `rows x 1` column vector.
    pub fn row_sums(&self) -> Matrix<T> {
        let mut out = Matrix::new(self.rows, 1);
        for j in 0..self.columns {
            for i in 0..self.rows {
                out.data[i] += self.data[i + self.rows * j];
            }
        }
        out
    }

    /// Row means, as a `rows x 1` column vector.
    pub fn row_means(&self) -> Matrix<T> {
        let mut out = self.row_sums();
        let d = T::from_usize(self.columns);
        for v in &mut out.data {
            *v /= d;
        }
        out
    }

    /// Linear indices of all non-zero elements.
    pub fn find_indices(&self) -> Vec<usize> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != T::zero())
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether `other` has the same shape and every element agrees within
    /// `tolerance`.
    pub fn eq_approx(&self, other: &Self, tolerance: T) -> bool {
        if !self.same_size(other) {
            return false;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(&a, &b)| (a - b).abs() <= tolerance)
    }
}

// ============================================================================
// Internal shape checks shared by the arithmetic and indexing layers
// ============================================================================

impl<T: Element> Matrix<T> {
    pub(crate) fn check_same_length(&self, other: &Self, op: &'static str) -> Result<()> {
        if self.data.len() != other.data.len() {
            return Err(Error::SizeMismatch {
                op,
                expected: self.data.len(),
                got: other.data.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_multipliable(&self, other: &Self, op: &'static str) -> Result<()> {
        if self.columns != other.rows {
            return Err(Error::SizeMismatch {
                op,
                expected: self.columns,
                got: other.rows,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn m22() -> Matrix<f64> {
        Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap()
    }

    #[test]
    fn test_storage_is_column_major() {
        let m = m22();
        assert_eq!(m.as_slice(), [1.0, 3.0, 2.0, 4.0]);
        assert_eq!(m.index(1, 1), 3);
        assert_eq!(m.get(0, 1), 2.0);
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        let err = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidShape {
                rows: 2,
                columns: 2,
                len: 3
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, Error::SizeMismatch { op: "from_rows", .. }));
    }

    #[test]
    fn test_vector_shapes() {
        let c = Matrix::vector(vec![1.0, 2.0, 3.0]);
        assert!(c.is_column_vector() && c.is_vector());
        let r = Matrix::<f64>::row_vector(vec![1.0, 2.0]);
        assert!(r.is_row_vector());
        assert!(Matrix::scalar(5.0_f64).is_scalar());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_get_checks_row_not_just_linear_index() {
        // (2, 0) maps to linear index 2, which exists; the position does not.
        let m = m22();
        m.get(2, 0);
    }

    #[test]
    fn test_put_chains() {
        let mut m = Matrix::new(2, 2);
        m.put(0, 0, 1.0).put(1, 1, 2.0);
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(1, 1), 2.0);
    }

    #[test]
    fn test_reshape_keeps_linear_order() {
        let mut m = m22();
        m.reshape(1, 4).unwrap();
        assert_eq!(m.rows(), 1);
        assert_eq!(m.as_slice(), [1.0, 3.0, 2.0, 4.0]);
        assert!(m.reshape(3, 2).is_err());
    }

    #[test]
    fn test_resize_zeroes() {
        let mut m = m22();
        m.resize(3, 1);
        assert_eq!(m.as_slice(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_transpose() {
        let t = m22().transpose();
        assert_eq!(t.get(0, 1), 3.0);
        assert_eq!(t.get(1, 0), 2.0);
    }

    #[test]
    fn test_diag() {
        let d = m22().diag().unwrap();
        assert_eq!(d.as_slice(), [1.0, 4.0]);
        let rect = Matrix::<f64>::new(2, 3);
        assert!(rect.diag().is_err());
    }

    #[test]
    fn test_swap_rows_and_columns() {
        let mut m = m22();
        m.swap_rows(0, 1);
        assert_eq!(m.get(0, 0), 3.0);
        m.swap_columns(0, 1);
        assert_eq!(m.get(0, 0), 4.0);
    }

    #[test]
    fn test_reductions() {
        let m = m22();
        assert_eq!(m.sum(), 10.0);
        assert_eq!(m.prod(), 24.0);
        assert_eq!(m.mean(), 2.5);
        assert_eq!(m.min(), 1.0);
        assert_eq!(m.max(), 4.0);
        assert_eq!(m.argmin(), Some(0));
        assert_eq!(m.argmax(), Some(3));
    }

    #[test]
    fn test_min_max_skip_nan() {
        let m = Matrix::from_vec(1, 3, vec![f64::NAN, 2.0, 1.0]).unwrap();
        assert_eq!(m.min(), 1.0);
        assert_eq!(m.max(), 2.0);
        assert_eq!(m.argmin(), Some(2));
        let all_nan = Matrix::from_vec(1, 2, vec![f64::NAN, f64::NAN]).unwrap();
        assert_eq!(all_nan.min(), f64::INFINITY);
        assert_eq!(all_nan.argmax(), None);
    }

    #[test]
    fn test_norms() {
        let m = Matrix::vector(vec![3.0, -4.0]);
        assert_eq!(m.norm1(), 7.0);
        assert_eq!(m.norm2(), 5.0);
        assert_eq!(m.norm_max(), 4.0);
        approx::assert_relative_eq!(Matrix::<f64>::ones(1, 3).norm2(), 3.0_f64.sqrt());
    }

    #[test]
    fn test_dot_requires_equal_length_only() {
        let x = Matrix::vector(vec![1.0, 2.0, 3.0]);
        let y = Matrix::row_vector(vec![4.0, 5.0, 6.0]);
        assert_eq!(x.dot(&y).unwrap(), 32.0);
        let short = Matrix::vector(vec![1.0]);
        assert!(x.dot(&short).is_err());
    }

    #[test]
    fn test_distances() {
        let x = Matrix::vector(vec![0.0, 0.0]);
        let y = Matrix::vector(vec![3.0, 4.0]);
        assert_eq!(x.squared_distance(&y).unwrap(), 25.0);
        assert_eq!(x.distance2(&y).unwrap(), 5.0);
        assert_eq!(x.distance1(&y).unwrap(), 7.0);
    }

    #[test]
    fn test_column_and_row_aggregates() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.column_sums().as_slice(), [5.0, 7.0, 9.0]);
        assert_eq!(m.row_sums().as_slice(), [6.0, 15.0]);
        assert_eq!(m.column_means().as_slice(), [2.5, 3.5, 4.5]);
        assert_eq!(m.row_means().as_slice(), [2.0, 5.0]);
    }

    #[test]
    fn test_find_indices() {
        let m = Matrix::from_vec(1, 4, vec![0.0, 1.5, 0.0, -2.0]).unwrap();
        assert_eq!(m.find_indices(), [1, 3]);
    }

    #[test]
    fn test_eq_approx() {
        let a = m22();
        let mut b = m22();
        b.put(0, 0, 1.0 + 1e-9);
        assert!(a.eq_approx(&b, 1e-6));
        assert!(!a.eq_approx(&b, 1e-12));
        let mut r = m22();
        r.reshape(1, 4).unwrap();
        // Same data, different shape.
        assert!(!a.eq_approx(&r, 1e-6));
    }

    #[test]
    fn test_same_length_vs_same_size() {
        let a = Matrix::<f64>::new(3, 3);
        let b = Matrix::<f64>::new(1, 9);
        assert!(a.same_length(&b));
        assert!(!a.same_size(&b));
    }

    #[test]
    fn test_dup_is_independent() {
        let mut a = m22();
        let d = a.dup();
        a.fill(0.0);
        assert_eq!(d.get(0, 0), 1.0);
    }
}
