//! Binary parity-check matrix.
//!
//! Error patterns and syndromes are both held as integers read
//! most-significant-bit first: slot 0 of a pattern is bit `WIDTH - 1`, and
//! row 0 of a syndrome is bit `WIDTH - 1`. Pattern `i` therefore prints as
//! `format!("{i:06b}")`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Width of every fixed register the matrix is wired into.
pub const WIDTH: usize = 6;

const DEFAULT_ROWS: [[u8; WIDTH]; WIDTH] = [
    [1, 1, 0, 0, 0, 0],
    [1, 0, 1, 0, 0, 0],
    [0, 0, 1, 1, 0, 0],
    [0, 0, 0, 1, 1, 0],
    [0, 1, 0, 0, 0, 1],
    [0, 0, 0, 0, 1, 1],
];

/// Whether slot `index` of an MSB-first `value` is set.
pub fn msb_bit(value: u32, index: usize) -> bool {
    (value >> (WIDTH - 1 - index)) & 1 == 1
}

/// Format an MSB-first value as a fixed-width bitstring.
pub fn format_bits(value: u32) -> String {
    format!("{value:0width$b}", width = WIDTH)
}

/// A validated 6×6 binary matrix. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct ParityCheckMatrix {
    entries: [[u8; WIDTH]; WIDTH],
    /// Row supports as MSB-first column masks.
    masks: [u32; WIDTH],
}

impl ParityCheckMatrix {
    /// Build a matrix from rows of 0/1 entries.
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Self, ConfigError> {
        if rows.len() != WIDTH {
            return Err(ConfigError::InvalidDimensions {
                expected: WIDTH,
                rows: rows.len(),
                cols: rows.first().map_or(0, Vec::len),
            });
        }

        let mut entries = [[0u8; WIDTH]; WIDTH];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != WIDTH {
                return Err(ConfigError::InvalidDimensions {
                    expected: WIDTH,
                    rows: rows.len(),
                    cols: row.len(),
                });
            }
            for (c, &value) in row.iter().enumerate() {
                if value > 1 {
                    return Err(ConfigError::NonBinaryEntry {
                        row: r,
                        col: c,
                        value,
                    });
                }
                entries[r][c] = value;
            }
        }

        Ok(Self::from_entries(entries))
    }

    fn from_entries(entries: [[u8; WIDTH]; WIDTH]) -> Self {
        let mut masks = [0u32; WIDTH];
        for (r, row) in entries.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value == 1 {
                    masks[r] |= 1 << (WIDTH - 1 - c);
                }
            }
        }
        Self { entries, masks }
    }

    /// Number of rows (checks).
    pub fn rows(&self) -> usize {
        WIDTH
    }

    /// Number of columns (variables).
    pub fn cols(&self) -> usize {
        WIDTH
    }

    /// Entry at `(r, c)`, or `None` if out of range.
    pub fn get(&self, r: usize, c: usize) -> Option<u8> {
        self.entries.get(r).and_then(|row| row.get(c)).copied()
    }

    /// Column indices set in row `r`, ascending.
    pub fn row_support(&self, r: usize) -> Vec<usize> {
        self.entries
            .get(r)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(_, v)| **v == 1)
                    .map(|(c, _)| c)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `(H · error) mod 2`, MSB-first on both sides.
    pub fn syndrome(&self, error: u32) -> u32 {
        self.masks.iter().enumerate().fold(0, |acc, (r, mask)| {
            let parity = (mask & error).count_ones() & 1;
            acc | (parity << (WIDTH - 1 - r))
        })
    }

    /// Rows as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.entries.iter().map(|row| row.to_vec()).collect()
    }
}

impl Default for ParityCheckMatrix {
    fn default() -> Self {
        Self::from_entries(DEFAULT_ROWS)
    }
}

impl TryFrom<Vec<Vec<u8>>> for ParityCheckMatrix {
    type Error = ConfigError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<ParityCheckMatrix> for Vec<Vec<u8>> {
    fn from(matrix: ParityCheckMatrix) -> Self {
        matrix.to_rows()
    }
}

impl std::fmt::Display for ParityCheckMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.entries.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(u8::to_string).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
