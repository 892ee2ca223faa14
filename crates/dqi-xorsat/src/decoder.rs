//! Syndrome lookup table.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::matrix::ParityCheckMatrix;

/// Largest error weight the table tries to correct.
pub const MAX_CORRECTABLE_WEIGHT: u32 = 2;

/// Map from syndrome to a best-guess error pattern of weight at most
/// [`MAX_CORRECTABLE_WEIGHT`].
///
/// Iteration is ascending by syndrome. A syndrome without a low-weight
/// preimage has no entry; callers treat that as "no correction".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyndromeTable {
    entries: BTreeMap<u32, u32>,
}

impl SyndromeTable {
    /// Enumerate every pattern in ascending order and record its syndrome.
    ///
    /// When two patterns share a syndrome the later one replaces the earlier
    /// one.
    pub fn build(matrix: &ParityCheckMatrix) -> Self {
        let mut entries = BTreeMap::new();
        for error in 0u32..(1 << matrix.cols()) {
            if error.count_ones() > MAX_CORRECTABLE_WEIGHT {
                continue;
            }
            let syndrome = matrix.syndrome(error);
            if let Some(previous) = entries.insert(syndrome, error) {
                trace!(syndrome, previous, error, "syndrome entry overwritten");
            }
        }
        debug!(entries = entries.len(), "built syndrome table");
        Self { entries }
    }

    /// Error pattern recorded for `syndrome`.
    pub fn get(&self, syndrome: u32) -> Option<u32> {
        self.entries.get(&syndrome).copied()
    }

    /// Whether `syndrome` has an entry.
    pub fn contains(&self, syndrome: u32) -> bool {
        self.entries.contains_key(&syndrome)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(syndrome, error)` pairs, ascending by syndrome.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.entries.iter().map(|(&s, &e)| (s, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_TABLE: [(u32, u32); 22] = [
        (0, 0),
        (3, 1),
        (5, 2),
        (6, 3),
        (9, 6),
        (12, 4),
        (15, 5),
        (18, 48),
        (20, 12),
        (24, 8),
        (27, 9),
        (29, 10),
        (33, 17),
        (34, 16),
        (39, 18),
        (40, 40),
        (46, 20),
        (48, 32),
        (51, 33),
        (53, 34),
        (58, 24),
        (60, 36),
    ];

    #[test]
    fn test_default_table_contents() {
        let table = SyndromeTable::build(&ParityCheckMatrix::default());
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, DEFAULT_TABLE.to_vec());
    }

    #[test]
    fn test_lookup() {
        let table = SyndromeTable::build(&ParityCheckMatrix::default());
        assert_eq!(table.get(0b000011), Some(0b000001));
        assert_eq!(table.get(0b110000), Some(0b100000));
        // No pattern of weight <= 2 reaches 000001.
        assert_eq!(table.get(0b000001), None);
        assert!(!table.contains(1));
        assert!(table.contains(0));
    }

    #[test]
    fn test_last_write_wins() {
        // With an all-zero matrix every pattern collides on syndrome 0, so
        // the entry is the largest weight-2 pattern.
        let zero = ParityCheckMatrix::new(vec![vec![0; 6]; 6]).unwrap();
        let table = SyndromeTable::build(&zero);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0), Some(0b110000));
    }

    #[test]
    fn test_entries_reproduce_their_key() {
        let matrix = ParityCheckMatrix::default();
        let table = SyndromeTable::build(&matrix);
        for (syndrome, error) in table.iter() {
            assert!(error.count_ones() <= MAX_CORRECTABLE_WEIGHT);
            assert_eq!(matrix.syndrome(error), syndrome);
        }
    }
}
