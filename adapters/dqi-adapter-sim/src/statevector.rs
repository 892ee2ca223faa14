//! Sparse statevector simulation engine.
//!
//! Only basis states with non-negligible amplitude are stored, keyed by their
//! index (bit `q` of the key is qubit `q`). The DQI program keeps at most a
//! few dozen branches alive at any time, so this stays cheap even though the
//! register file is wider than a dense vector would comfortably allow.

use num_complex::Complex64;
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};
use std::f64::consts::FRAC_1_SQRT_2;

use dqi_ir::{Instruction, InstructionKind, StandardGate};

/// Amplitudes whose squared norm falls below this are dropped.
const PRUNE_EPS: f64 = 1e-24;

/// 2×2 matrix, row-major.
type Mat2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A pure state stored as a sparse map from basis index to amplitude.
#[derive(Debug, Clone)]
pub struct SparseStatevector {
    amplitudes: FxHashMap<u64, Complex64>,
    num_qubits: usize,
}

impl SparseStatevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = FxHashMap::default();
        amplitudes.insert(0, ONE);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Amplitude of basis state `index` (zero if not stored).
    pub fn amplitude(&self, index: u64) -> Complex64 {
        self.amplitudes.get(&index).copied().unwrap_or(ZERO)
    }

    /// Number of stored basis states.
    pub fn support_len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Stored `(index, amplitude)` pairs, ascending by index.
    pub fn support(&self) -> Vec<(u64, Complex64)> {
        let mut v: Vec<_> = self.amplitudes.iter().map(|(k, a)| (*k, *a)).collect();
        v.sort_by_key(|(k, _)| *k);
        v
    }

    /// Total probability; 1 up to rounding.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.values().map(Complex64::norm_sqr).sum()
    }

    /// Run `instructions` as one trajectory, writing measured bits to
    /// `memory` (indexed by clbit id).
    pub fn execute<R: Rng + ?Sized>(
        &mut self,
        instructions: &[Instruction],
        memory: &mut [bool],
        rng: &mut R,
    ) {
        for inst in instructions {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.index()).collect();
                    self.apply_gate(&gate.kind, &qubits);
                }
                InstructionKind::Measure => {
                    for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                        memory[c.index()] = self.measure(q.index(), rng);
                    }
                }
                InstructionKind::Reset => {
                    for q in &inst.qubits {
                        self.reset(q.index(), rng);
                    }
                }
                InstructionKind::Conditional { on, then } => {
                    if on.evaluate(memory) {
                        self.execute(then, memory, rng);
                    }
                }
            }
        }
    }

    /// Apply a gate to qubit positions (controls first, target last).
    pub fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::X => self.apply_controlled_x(0, qubits[0]),
            StandardGate::CX => self.apply_controlled_x(bit(qubits[0]), qubits[1]),
            StandardGate::Swap => self.apply_swap(qubits[0], qubits[1]),
            StandardGate::Z => self.apply_phase_on(bit(qubits[0]), -ONE),
            StandardGate::H => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                self.apply_1q(0, qubits[0], &[[h, h], [h, -h]]);
            }
            StandardGate::Ry(theta) => self.apply_1q(0, qubits[0], &ry(*theta)),
            StandardGate::CRy(theta) => self.apply_1q(bit(qubits[0]), qubits[1], &ry(*theta)),
            StandardGate::CCRy(theta) => {
                self.apply_1q(bit(qubits[0]) | bit(qubits[1]), qubits[2], &ry(*theta));
            }
        }
    }

    /// Measure a qubit in the computational basis, collapsing the state.
    pub fn measure<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) -> bool {
        let mask = bit(qubit);
        let p1: f64 = self
            .amplitudes
            .iter()
            .filter(|(k, _)| *k & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum();
        let r: f64 = rng.r#gen();
        let outcome = r < p1;
        let kept = if outcome { p1 } else { 1.0 - p1 };

        self.amplitudes.retain(|k, _| (*k & mask != 0) == outcome);
        if kept > 0.0 {
            let scale = 1.0 / kept.sqrt();
            for amp in self.amplitudes.values_mut() {
                *amp *= scale;
            }
        }
        outcome
    }

    /// Reset a qubit to |0⟩ by measuring and flipping on a 1.
    pub fn reset<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) {
        if self.measure(qubit, rng) {
            self.apply_controlled_x(0, qubit);
        }
    }

    /// Sample a full basis state without collapsing.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        let support = self.support();
        let r: f64 = rng.r#gen::<f64>() * self.norm_sqr();
        let mut cumulative = 0.0;
        for (k, a) in &support {
            cumulative += a.norm_sqr();
            if r < cumulative {
                return *k;
            }
        }
        support.last().map_or(0, |(k, _)| *k)
    }

    // =========================================================================
    // Kernels
    // =========================================================================

    /// X on `target` where every bit of `controls` is set.
    fn apply_controlled_x(&mut self, controls: u64, target: usize) {
        let tmask = bit(target);
        self.rekey(|k| if k & controls == controls { k ^ tmask } else { k });
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let (m1, m2) = (bit(q1), bit(q2));
        self.rekey(|k| {
            if (k & m1 != 0) != (k & m2 != 0) {
                k ^ m1 ^ m2
            } else {
                k
            }
        });
    }

    fn rekey(&mut self, f: impl Fn(u64) -> u64) {
        let old = std::mem::take(&mut self.amplitudes);
        self.amplitudes = old.into_iter().map(|(k, a)| (f(k), a)).collect();
    }

    /// Multiply by `phase` every basis state that has all bits of `mask` set.
    fn apply_phase_on(&mut self, mask: u64, phase: Complex64) {
        for (k, amp) in &mut self.amplitudes {
            if k & mask == mask {
                *amp *= phase;
            }
        }
    }

    /// Apply `m` to `target` on the subspace where all `controls` are set.
    fn apply_1q(&mut self, controls: u64, target: usize, m: &Mat2) {
        let tmask = bit(target);
        let bases: FxHashSet<u64> = self
            .amplitudes
            .keys()
            .filter(|k| *k & controls == controls)
            .map(|k| k & !tmask)
            .collect();

        for base in bases {
            let i0 = base;
            let i1 = base | tmask;
            let a0 = self.amplitude(i0);
            let a1 = self.amplitude(i1);
            self.store(i0, m[0][0] * a0 + m[0][1] * a1);
            self.store(i1, m[1][0] * a0 + m[1][1] * a1);
        }
    }

    fn store(&mut self, index: u64, amp: Complex64) {
        if amp.norm_sqr() < PRUNE_EPS {
            self.amplitudes.remove(&index);
        } else {
            self.amplitudes.insert(index, amp);
        }
    }
}

#[inline]
fn bit(q: usize) -> u64 {
    1u64 << q
}

fn ry(theta: f64) -> Mat2 {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new((theta / 2.0).sin(), 0.0);
    [[c, -s], [s, c]]
}
