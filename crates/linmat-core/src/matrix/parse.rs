//! Parsing matrices from text.
//!
//! The accepted format is the one written by `Display`: rows separated by
//! line breaks, values within a row separated by whitespace. Runs of
//! whitespace count as one separator and blank lines around the body are
//! ignored. An optional `[RxC]` header line, as written by
//! [`Matrix::description`], is checked against the parsed body.

use core::str::FromStr;

use crate::error::{CoreError, Result};

use super::Matrix;

impl Matrix {
    /// Parse a matrix from text.
    ///
    /// Every row must hold the same number of values as the first one.
    ///
    /// ```
    /// # use linmat_core::Matrix;
    /// let m = Matrix::parse("1  2 3\n4 5   6\n\n").unwrap();
    /// assert_eq!(m.shape(), (2, 3));
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .collect();

        let first = lines.iter().position(|(_, l)| !l.is_empty());
        let last = lines.iter().rposition(|(_, l)| !l.is_empty());
        let (first, last) = match (first, last) {
            (Some(f), Some(l)) => (f, l),
            _ => {
                return Err(CoreError::Parse {
                    line: 1,
                    reason: "no rows".to_string(),
                })
            }
        };
        let mut body = &lines[first..=last];

        let header = match parse_header(body[0].1) {
            Some(dims) => {
                let dims = dims.map_err(|reason| CoreError::Parse {
                    line: body[0].0,
                    reason,
                })?;
                body = &body[1..];
                Some((body_line(body, lines.len()), dims))
            }
            None => None,
        };

        let mut rows: Vec<Vec<f64>> = Vec::with_capacity(body.len());
        for &(line, text) in body {
            if text.is_empty() {
                return Err(CoreError::Parse {
                    line,
                    reason: "empty row".to_string(),
                });
            }
            let row = text
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<f64>().map_err(|_| CoreError::Parse {
                        line,
                        reason: format!("invalid number `{tok}`"),
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            if let Some(first_row) = rows.first() {
                if row.len() != first_row.len() {
                    return Err(CoreError::Parse {
                        line,
                        reason: format!(
                            "expected {} values, found {}",
                            first_row.len(),
                            row.len()
                        ),
                    });
                }
            }
            rows.push(row);
        }

        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some((line, (hr, hc))) = header {
            if (hr, hc) != (n_rows, n_cols) {
                return Err(CoreError::Parse {
                    line,
                    reason: format!("header declares {hr}x{hc}, body is {n_rows}x{n_cols}"),
                });
            }
        }
        if n_rows == 0 {
            return Err(CoreError::Parse {
                line: lines.len(),
                reason: "no rows".to_string(),
            });
        }

        Matrix::from_rows(&rows)
    }
}

impl FromStr for Matrix {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Matrix::parse(s)
    }
}

/// Line number used to report header/body disagreement.
fn body_line(body: &[(usize, &str)], fallback: usize) -> usize {
    body.first().map_or(fallback, |&(line, _)| line)
}

/// `None` if `line` is not a header; otherwise the parsed `(rows, cols)`.
fn parse_header(line: &str) -> Option<std::result::Result<(usize, usize), String>> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let parsed = inner
        .split_once('x')
        .and_then(|(r, c)| {
            let rows = r.trim().parse::<usize>().ok()?;
            let cols = c.trim().parse::<usize>().ok()?;
            Some((rows, cols))
        })
        .ok_or_else(|| format!("malformed header `{line}`"));
    Some(parsed)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let m = Matrix::parse("1 2\n3 4").unwrap();
        assert_eq!(m, Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap());
    }

    #[test]
    fn test_parse_whitespace_tolerance() {
        let m = Matrix::parse("  1\t 2   3 \r\n4 5 6\n\n\n").unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(1, 2)], 6.0);
    }

    #[test]
    fn test_parse_scientific() {
        let m = Matrix::parse("1e3 -2.5E-2\n.5 -0").unwrap();
        assert_eq!(m[(0, 0)], 1000.0);
        assert_eq!(m[(0, 1)], -0.025);
        assert_eq!(m[(1, 0)], 0.5);
    }

    #[test]
    fn test_parse_invalid_number() {
        let err = Matrix::parse("1 2\n3 abc").unwrap_err();
        assert_eq!(
            err,
            CoreError::Parse {
                line: 2,
                reason: "invalid number `abc`".to_string()
            }
        );
    }

    #[test]
    fn test_parse_ragged_rejected() {
        let err = Matrix::parse("1 2 3\n4 5\n").unwrap_err();
        assert!(matches!(err, CoreError::Parse { line: 2, .. }));
        assert!(Matrix::parse("1 2\n3 4 5").is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert!(Matrix::parse("").is_err());
        assert!(Matrix::parse(" \n\n ").is_err());
    }

    #[test]
    fn test_parse_interior_blank_line() {
        assert!(matches!(
            Matrix::parse("1 2\n\n3 4"),
            Err(CoreError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_with_header() {
        let m = Matrix::parse("[2x2]\n1 2\n3 4\n").unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert!(Matrix::parse("[3x2]\n1 2\n3 4").is_err());
        assert!(Matrix::parse("[2y2]\n1 2\n3 4").is_err());
        assert!(Matrix::parse("[2x2]\n").is_err());
    }

    #[test]
    fn test_display_parse_round_trip() {
        let m = Matrix::from_fn(4, 3, |r, c| (r as f64 + 1.0) / (c as f64 + 3.0) - 0.7);
        let back: Matrix = m.to_string().parse().unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_description_parse_round_trip() {
        let m = Matrix::from_rows(&[[1.25, -2.5], [3.75, 100.0]]).unwrap();
        let back = Matrix::parse(&m.description()).unwrap();
        assert!(back.feql_eps(&m, 5e-3));
    }
}
