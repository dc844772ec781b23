//! All errors returned by `rublas-core`.
//!
//! Every failure is local and synchronous: an operation either completes
//! fully or fails before any destination write is observable. The dispatch
//! layer's aliasing-pass ordering is designed so that those are the only two
//! outcomes.

/// Errors produced by matrix construction, indexing and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Two operand sizes disagree (element count, row or column count, or
    /// matrix-multiply compatibility). Always reports both conflicting sizes.
    #[error("{op}: size mismatch ({expected} != {got})")]
    SizeMismatch {
        op: &'static str,
        expected: usize,
        got: usize,
    },

    /// An in-place operation would have to resize its destination, but the
    /// destination is also an operand whose data the operation still reads.
    #[error("{op}: cannot resize result matrix because it is used in-place")]
    InvalidDestination { op: &'static str },

    /// A strided kernel's extreme offset `offset + (n - 1) * stride` falls
    /// outside the buffer.
    #[error(
        "{what}: stride walk out of bounds (n = {n}, len = {len}, offset = {offset}, stride = {stride})"
    )]
    OutOfBounds {
        what: &'static str,
        n: usize,
        len: usize,
        offset: usize,
        stride: usize,
    },

    /// A native backend routine reported a non-zero status. Opaque to the
    /// core; propagated with the routine name and status code.
    #[error("native routine {routine} failed with status {status}")]
    NativeRoutine { routine: &'static str, status: i32 },

    /// A constructor was given a flat buffer whose length does not equal
    /// `rows * columns`.
    #[error("buffer of length {len} does not fill a {rows}x{columns} matrix")]
    InvalidShape {
        rows: usize,
        columns: usize,
        len: usize,
    },
}

/// Convenience alias used throughout `rublas-core`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_reports_both_sizes() {
        let e = Error::SizeMismatch {
            op: "add",
            expected: 9,
            got: 6,
        };
        let msg = e.to_string();
        assert!(msg.contains('9') && msg.contains('6'));
    }

    #[test]
    fn test_display_out_of_bounds() {
        let e = Error::OutOfBounds {
            what: "axpy: x",
            n: 4,
            len: 3,
            offset: 0,
            stride: 1,
        };
        assert!(e.to_string().contains("out of bounds"));
    }

    #[test]
    fn test_display_native_routine() {
        let e = Error::NativeRoutine {
            routine: "dgemm",
            status: -3,
        };
        assert!(e.to_string().contains("dgemm"));
    }
}
