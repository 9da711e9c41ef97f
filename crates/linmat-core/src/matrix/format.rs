//! Textual output for [`Matrix`].
//!
//! `Display` writes the round-trip form read back by [`Matrix::parse`]: one
//! line per row, values separated by a single space, each value printed with
//! the shortest text that parses back to the same `f64`.
//!
//! [`Matrix::description`] is the human-readable grid: a `[RxC]` header line
//! followed by fixed-width `{:5.2}` cells.

use core::fmt;
use core::fmt::Write;

use super::Matrix;

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            if r > 0 {
                writeln!(f)?;
            }
            for c in 0..self.cols {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.data[self.offset(r, c)])?;
            }
        }
        Ok(())
    }
}

impl Matrix {
    /// Header line `[RxC]` followed by a fixed-width grid.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::from_rows(&[[1.0, -2.5], [0.126, 10.0]]).unwrap();
    /// assert_eq!(m.description(), "[2x2]\n 1.00 -2.50\n 0.13 10.00");
    /// ```
    pub fn description(&self) -> String {
        let mut out = String::with_capacity(8 + self.len() * 6);
        // Writing into a String cannot fail.
        let _ = write!(out, "[{}x{}]", self.rows, self.cols);
        for r in 0..self.rows {
            out.push('\n');
            for c in 0..self.cols {
                if c > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{:5.2}", self.data[self.offset(r, c)]);
            }
        }
        out
    }
}
