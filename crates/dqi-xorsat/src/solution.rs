//! Aggregating backend histograms into solution counts.
//!
//! Backend bitstrings put the highest classical bit leftmost, and
//! `vector_meas` owns clbits 0 through 5, so the solution is the trailing
//! six characters of each key (vector slot 5 leftmost).

use dqi_hal::Counts;
use serde::Serialize;

use crate::error::SolutionError;
use crate::matrix::WIDTH;

/// Histogram over 6-character solution bitstrings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SolutionCounts {
    counts: Counts,
}

impl SolutionCounts {
    /// Keep the trailing six characters of every key and sum per suffix.
    pub fn from_counts(counts: &Counts) -> Result<Self, SolutionError> {
        let mut solutions = Counts::new();
        for (key, &n) in counts.iter() {
            if !key.chars().all(|c| c == '0' || c == '1') {
                return Err(SolutionError::NonBinary(key.clone()));
            }
            if key.len() < WIDTH {
                return Err(SolutionError::TooShort {
                    key: key.clone(),
                    len: key.len(),
                    need: WIDTH,
                });
            }
            solutions.insert(&key[key.len() - WIDTH..], n);
        }
        Ok(Self { counts: solutions })
    }

    /// Highest-count solution; ties go to the first key encountered.
    pub fn best(&self) -> Option<(&str, u64)> {
        self.counts.most_frequent().map(|(k, n)| (k.as_str(), *n))
    }

    /// Count for `solution`.
    pub fn get(&self, solution: &str) -> u64 {
        self.counts.get(solution)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.total_shots()
    }

    /// Number of distinct solutions.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Solutions in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, n)| (k.as_str(), *n))
    }

    /// Solutions by count, highest first.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        self.counts
            .sorted()
            .into_iter()
            .map(|(k, n)| (k.as_str(), *n))
            .collect()
    }
}

/// Convert a solution key into an MSB-first vector pattern (slot 0 as the
/// high bit), the same orientation the syndrome table uses.
pub fn key_to_pattern(key: &str) -> Option<u32> {
    if key.len() != WIDTH {
        return None;
    }
    key.chars().enumerate().try_fold(0u32, |acc, (j, c)| {
        let bit = c.to_digit(2)?;
        // Character j is slot WIDTH - 1 - j.
        Some(acc | (bit << j))
    })
}
