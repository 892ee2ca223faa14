//! Execution results.
//!
//! Bitstrings are written with the highest classical bit leftmost, so the
//! rightmost character is clbit 0.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

/// Measurement outcome histogram, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, u64)>", into = "Vec<(String, u64)>")]
pub struct Counts {
    entries: IndexMap<String, u64, FxBuildHasher>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(bitstring, count)` pairs; repeated keys accumulate.
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, u64)>) -> Self {
        let mut counts = Self::new();
        for (k, n) in pairs {
            counts.insert(k, n);
        }
        counts
    }

    /// Add `n` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, n: u64) {
        *self.entries.entry(bitstring.into()).or_insert(0) += n;
    }

    /// Count for `bitstring`, zero if never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.entries.get(bitstring).copied().unwrap_or(0)
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no outcome has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total_shots(&self) -> u64 {
        self.entries.values().sum()
    }

    /// Outcomes in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.entries.iter()
    }

    /// Outcomes by count, highest first. Equal counts keep first-seen order.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut v: Vec<_> = self.iter().collect();
        v.sort_by(|a, b| b.1.cmp(a.1));
        v
    }

    /// The outcome with the highest count; ties go to the first seen.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        let mut best: Option<(&String, &u64)> = None;
        for (k, n) in self.iter() {
            match best {
                Some((_, b)) if n <= b => {}
                _ => best = Some((k, n)),
            }
        }
        best
    }
}

impl From<Vec<(String, u64)>> for Counts {
    fn from(pairs: Vec<(String, u64)>) -> Self {
        Self::from_pairs(pairs)
    }
}

impl From<Counts> for Vec<(String, u64)> {
    fn from(counts: Counts) -> Self {
        counts.entries.into_iter().collect()
    }
}

/// Result of a completed job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Outcome histogram.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Wall-clock execution time, if measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Attach the measured execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}
