//! Index ranges for matrix slicing.
//!
//! A [`Range`] is a restartable cursor over a sequence of indices. Slicing
//! methods on [`Matrix`](crate::matrix::Matrix) initialize the cursor
//! against the relevant extent (row count, column count or element count)
//! and then walk it: `has_more` / `value` / `next`, with `index` reporting
//! the position inside the range (the destination index when copying a
//! slice out).
//!
//! Four selections are covered: everything within the bound, a
//! half-open interval, a single point, and an explicit index list. The
//! index list deliberately ignores the bound it is initialized against, so
//! gathers can pick arbitrary linear positions; see [`Range::find`] for
//! building one from a truth matrix.

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::matrix::Matrix;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    /// Every index in `lower..upper`.
    All,
    /// The half-open interval `start..end`, checked against the bound.
    Interval { start: usize, end: usize },
    /// A single index.
    Point(usize),
    /// An explicit list of indices, not bound-checked.
    Indices(Vec<usize>),
}

/// A restartable cursor over a selection of indices.
///
/// ```
/// use rublas_core::Range;
///
/// let mut r = Range::interval(1, 3);
/// r.init(0, 5).unwrap();
/// let mut picked = Vec::new();
/// while r.has_more() {
///     picked.push(r.value());
///     r.next();
/// }
/// assert_eq!(picked, [1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    kind: Kind,
    lower: usize,
    upper: usize,
    counter: usize,
}

impl Range {
    /// Every index within the bound given at `init`.
    pub fn all() -> Self {
        Self::with_kind(Kind::All)
    }

    /// The half-open interval `start..end`.
    pub fn interval(start: usize, end: usize) -> Self {
        Self::with_kind(Kind::Interval { start, end })
    }

    /// A single index.
    pub fn point(index: usize) -> Self {
        Self::with_kind(Kind::Point(index))
    }

    /// An explicit list of indices. The bound passed to `init` is ignored.
    pub fn indices(indices: Vec<usize>) -> Self {
        Self::with_kind(Kind::Indices(indices))
    }

    /// The linear indices of all non-zero entries of `x`, as an index list.
    ///
    /// Pairs with the truth matrices produced by element-wise comparisons:
    /// `Range::find(&a.gt(0.5)?)` selects the positions where the predicate
    /// held.
    pub fn find<T: Element>(x: &Matrix<T>) -> Self {
        Self::indices(x.find_indices())
    }

    fn with_kind(kind: Kind) -> Self {
        Range {
            kind,
            lower: 0,
            upper: 0,
            counter: 0,
        }
    }

    /// Rewind the cursor and bind it to `lower..upper`.
    ///
    /// Fails with [`Error::OutOfBounds`] when an interval or point does not
    /// lie inside the bound. Index lists accept any bound.
    pub fn init(&mut self, lower: usize, upper: usize) -> Result<()> {
        match self.kind {
            Kind::All | Kind::Indices(_) => {}
            Kind::Interval { start, end } => {
                if start < lower || end > upper {
                    return Err(Error::OutOfBounds {
                        what: "range: interval",
                        n: end.saturating_sub(start),
                        len: upper,
                        offset: start,
                        stride: 1,
                    });
                }
            }
            Kind::Point(index) => {
                if index < lower || index >= upper {
                    return Err(Error::OutOfBounds {
                        what: "range: point",
                        n: 1,
                        len: upper,
                        offset: index,
                        stride: 1,
                    });
                }
            }
        }
        self.lower = lower;
        self.upper = upper;
        self.counter = 0;
        Ok(())
    }

    /// Number of indices the cursor yields in total.
    pub fn len(&self) -> usize {
        match &self.kind {
            Kind::All => self.upper - self.lower,
            Kind::Interval { start, end } => end - start,
            Kind::Point(_) => 1,
            Kind::Indices(v) => v.len(),
        }
    }

    /// Whether the range selects nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the cursor has indices left to yield.
    pub fn has_more(&self) -> bool {
        self.counter < self.len()
    }

    /// The current index into the source extent.
    pub fn value(&self) -> usize {
        match &self.kind {
            Kind::All => self.lower + self.counter,
            Kind::Interval { start, .. } => start + self.counter,
            Kind::Point(index) => *index,
            Kind::Indices(v) => v[self.counter],
        }
    }

    /// The current position inside the range itself (0-based).
    pub fn index(&self) -> usize {
        self.counter
    }

    /// Advance to the next index.
    pub fn next(&mut self) {
        self.counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(r: &mut Range, lower: usize, upper: usize) -> Vec<usize> {
        r.init(lower, upper).unwrap();
        let mut out = Vec::new();
        while r.has_more() {
            assert_eq!(r.index(), out.len());
            out.push(r.value());
            r.next();
        }
        out
    }

    #[test]
    fn test_all_spans_bound() {
        let mut r = Range::all();
        assert_eq!(collect(&mut r, 0, 4), [0, 1, 2, 3]);
        assert_eq!(collect(&mut r, 2, 5), [2, 3, 4]);
    }

    #[test]
    fn test_interval_is_end_exclusive() {
        let mut r = Range::interval(1, 3);
        assert_eq!(collect(&mut r, 0, 5), [1, 2]);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_interval_out_of_bound() {
        let mut r = Range::interval(1, 6);
        let err = r.init(0, 5).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { len: 5, .. }));
    }

    #[test]
    fn test_point() {
        let mut r = Range::point(3);
        assert_eq!(collect(&mut r, 0, 5), [3]);
        assert!(r.init(0, 3).is_err());
    }

    #[test]
    fn test_indices_ignore_bound() {
        let mut r = Range::indices(vec![4, 0, 4]);
        assert_eq!(collect(&mut r, 0, 2), [4, 0, 4]);
    }

    #[test]
    fn test_init_rewinds() {
        let mut r = Range::interval(0, 2);
        r.init(0, 4).unwrap();
        r.next();
        r.next();
        assert!(!r.has_more());
        r.init(0, 4).unwrap();
        assert!(r.has_more());
        assert_eq!(r.value(), 0);
    }

    #[test]
    fn test_find_selects_nonzero() {
        let x = Matrix::from_vec(1, 4, vec![0.0, 2.0, 0.0, -1.0]).unwrap();
        let mut r = Range::find(&x);
        assert_eq!(collect(&mut r, 0, 4), [1, 3]);
    }

    #[test]
    fn test_empty_interval() {
        let mut r = Range::interval(2, 2);
        r.init(0, 4).unwrap();
        assert!(r.is_empty());
        assert!(!r.has_more());
    }
}
