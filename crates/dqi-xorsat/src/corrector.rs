//! Measure-and-correct using the syndrome table.
//!
//! The syndrome register is measured into `syndrome_meas`, and for every
//! table entry a classically conditioned X is applied to each slot the
//! entry's error pattern marks. How much of the measured syndrome a
//! condition checks depends on [`CorrectionMode`].

use std::fmt;
use std::str::FromStr;

use dqi_ir::{Circuit, ClassicalCondition, IrResult, QuantumRegister};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::check_len;
use crate::decoder::SyndromeTable;
use crate::error::ConfigError;
use crate::matrix::{WIDTH, msb_bit};

/// Name of the classical register receiving the measured syndrome.
pub const SYNDROME_MEAS_REG: &str = "syndrome_meas";

/// How a correction is matched against the measured syndrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrectionMode {
    /// Nest conditions on syndrome bits 0 and 1 only. A correction fires
    /// whenever those two bits match, whatever the other four hold.
    #[default]
    Legacy,
    /// One condition over all six syndrome bits.
    FullMatch,
}

impl CorrectionMode {
    /// Number of leading syndrome bits a condition checks.
    pub fn checked_bits(self) -> usize {
        match self {
            CorrectionMode::Legacy => 2,
            CorrectionMode::FullMatch => WIDTH,
        }
    }

    /// Whether an entry keyed by `stored` fires for `measured`.
    pub fn matches(self, stored: u32, measured: u32) -> bool {
        (0..self.checked_bits()).all(|i| msb_bit(stored, i) == msb_bit(measured, i))
    }

    /// Configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            CorrectionMode::Legacy => "legacy",
            CorrectionMode::FullMatch => "full-match",
        }
    }
}

impl fmt::Display for CorrectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrectionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(CorrectionMode::Legacy),
            "full-match" | "full_match" | "full" => Ok(CorrectionMode::FullMatch),
            other => Err(ConfigError::ValidationError(format!(
                "Unknown correction mode: {other}"
            ))),
        }
    }
}

/// Emits the syndrome measurement and the conditional corrections.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyndromeCorrector {
    mode: CorrectionMode,
}

impl SyndromeCorrector {
    /// Create a corrector.
    pub fn new(mode: CorrectionMode) -> Self {
        Self { mode }
    }

    /// The matching mode.
    pub fn mode(&self) -> CorrectionMode {
        self.mode
    }

    /// Measure `syndrome`, flip slots of `target` per `table`, then reset
    /// `syndrome`.
    pub fn correct(
        &self,
        circuit: &mut Circuit,
        syndrome: &QuantumRegister,
        target: &QuantumRegister,
        table: &SyndromeTable,
    ) -> IrResult<()> {
        check_len(syndrome, WIDTH, "SyndromeCorrector", "6")?;
        check_len(target, WIDTH, "SyndromeCorrector", "6")?;

        let meas = circuit.add_creg(SYNDROME_MEAS_REG, WIDTH as u32);
        circuit.measure_register(syndrome, &meas)?;

        let mut emitted = 0usize;
        for (stored, error) in table.iter() {
            for i in (0..WIDTH).filter(|&i| msb_bit(error, i)) {
                match self.mode {
                    CorrectionMode::Legacy => {
                        let outer = ClassicalCondition::bit(meas[0], msb_bit(stored, 0));
                        let inner = ClassicalCondition::bit(meas[1], msb_bit(stored, 1));
                        circuit.conditional(outer, |b| {
                            b.conditional(inner, |b| {
                                b.x(target[i])?;
                                Ok(())
                            })?;
                            Ok(())
                        })?;
                    }
                    CorrectionMode::FullMatch => {
                        let on = ClassicalCondition::all(
                            (0..WIDTH).map(|b| (meas[b], msb_bit(stored, b))),
                        )?;
                        circuit.conditional(on, |b| {
                            b.x(target[i])?;
                            Ok(())
                        })?;
                    }
                }
                emitted += 1;
            }
        }

        for q in syndrome.iter() {
            circuit.reset(q)?;
        }

        debug!(mode = %self.mode, corrections = emitted, "emitted syndrome corrections");
        Ok(())
    }

    /// XOR mask the emitted corrections apply to the target for a measured
    /// syndrome, MSB-first.
    pub fn flips_for(&self, table: &SyndromeTable, measured: u32) -> u32 {
        table
            .iter()
            .filter(|&(stored, _)| self.mode.matches(stored, measured))
            .fold(0, |mask, (_, error)| mask ^ error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::ParityCheckMatrix;

    fn table() -> SyndromeTable {
        SyndromeTable::build(&ParityCheckMatrix::default())
    }

    fn assemble(mode: CorrectionMode) -> Circuit {
        let mut circuit = Circuit::new("corr");
        let vector = circuit.add_qreg("vector", 6);
        let transform = circuit.add_qreg("transform", 6);
        SyndromeCorrector::new(mode)
            .correct(&mut circuit, &transform, &vector, &table())
            .unwrap();
        circuit
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("legacy".parse::<CorrectionMode>().unwrap(), CorrectionMode::Legacy);
        assert_eq!(
            "Full-Match".parse::<CorrectionMode>().unwrap(),
            CorrectionMode::FullMatch
        );
        assert!("partial".parse::<CorrectionMode>().is_err());
        assert_eq!(CorrectionMode::default(), CorrectionMode::Legacy);
        assert_eq!(CorrectionMode::FullMatch.to_string(), "full-match");
    }

    #[test]
    fn test_partial_match_flips() {
        // 000001 agrees with every entry below 010000 on bits 0 and 1 but
        // equals none of them.
        let table = table();
        assert!(!table.contains(0b000001));
        let legacy = SyndromeCorrector::new(CorrectionMode::Legacy);
        let full = SyndromeCorrector::new(CorrectionMode::FullMatch);
        assert_eq!(legacy.flips_for(&table, 0b000001), 0b000111);
        assert_eq!(full.flips_for(&table, 0b000001), 0);
    }

    #[test]
    fn test_full_match_inverts_table() {
        let table = table();
        let full = SyndromeCorrector::new(CorrectionMode::FullMatch);
        for (syndrome, error) in table.iter() {
            assert_eq!(full.flips_for(&table, syndrome), error);
        }
    }

    #[test]
    fn test_emitted_structure() {
        // 22 entries carry 1·6 + 2·15 = 36 set bits.
        let legacy = assemble(CorrectionMode::Legacy);
        let ops = legacy.count_ops();
        assert_eq!(ops.get("measure"), Some(&6));
        assert_eq!(ops.get("reset"), Some(&6));
        assert_eq!(ops.get("x"), Some(&36));
        assert_eq!(ops.get("if"), Some(&72));

        let full = assemble(CorrectionMode::FullMatch);
        let ops = full.count_ops();
        assert_eq!(ops.get("x"), Some(&36));
        assert_eq!(ops.get("if"), Some(&36));
        let (cond, _) = full
            .instructions()
            .iter()
            .find_map(|i| i.as_conditional())
            .unwrap();
        assert_eq!(cond.tests().len(), 6);
    }

    #[test]
    fn test_mode_serde_names() {
        #[derive(Deserialize)]
        struct Holder {
            correction: CorrectionMode,
        }
        let holder: Holder = serde_yaml_ng::from_str("correction: full-match").unwrap();
        assert_eq!(holder.correction, CorrectionMode::FullMatch);
    }
}
