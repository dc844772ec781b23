//! Text formatting: `[a, b; c, d]` with rows separated by semicolons.

use std::fmt;

use crate::dtype::Element;
use crate::matrix::Matrix;

impl<T: Element> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.rows() {
            if i > 0 {
                write!(f, "; ")?;
            }
            for j in 0..self.columns() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                let v = self.get(i, j);
                match f.precision() {
                    Some(p) => write!(f, "{:.*}", p, v)?,
                    None => write!(f, "{}", v)?,
                }
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rows_and_columns() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(m.to_string(), "[1, 2; 3, 4]");
    }

    #[test]
    fn test_display_with_precision() {
        let m = Matrix::from_rows(&[[1.5, 2.25]]).unwrap();
        assert_eq!(format!("{:.2}", m), "[1.50, 2.25]");
    }

    #[test]
    fn test_display_empty() {
        let m = Matrix::<f64>::empty();
        assert_eq!(m.to_string(), "[]");
    }

    #[test]
    fn test_display_vector() {
        let v = Matrix::vector(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.to_string(), "[1; 2; 3]");
    }
}
