//! Property-based tests for the circuit builder.
//!
//! Random programs mixing gates, measurements, resets and conditional
//! blocks must keep the structural bookkeeping consistent.

use dqi_ir::{Circuit, ClassicalCondition, ClbitId, InstructionKind, QubitId};
use proptest::prelude::*;

/// Operations applied to a circuit under test.
#[derive(Debug, Clone)]
enum Op {
    H(u32),
    X(u32),
    Ry(f64, u32),
    CX(u32, u32),
    Measure(u32, u32),
    Reset(u32),
    IfX(u32, bool, u32),
}

impl Op {
    fn apply(self, circuit: &mut Circuit) {
        match self {
            Op::H(q) => {
                let _ = circuit.h(QubitId(q));
            }
            Op::X(q) => {
                let _ = circuit.x(QubitId(q));
            }
            Op::Ry(t, q) => {
                let _ = circuit.ry(t, QubitId(q));
            }
            Op::CX(a, b) => {
                let _ = circuit.cx(QubitId(a), QubitId(b));
            }
            Op::Measure(q, c) => {
                let _ = circuit.measure(QubitId(q), ClbitId(c));
            }
            Op::Reset(q) => {
                let _ = circuit.reset(QubitId(q));
            }
            Op::IfX(c, v, q) => {
                let _ = circuit.conditional(ClassicalCondition::bit(ClbitId(c), v), |b| {
                    b.x(QubitId(q))?;
                    Ok(())
                });
            }
        }
    }
}

fn arb_op(nq: u32, nc: u32) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..nq).prop_map(Op::H),
        (0..nq).prop_map(Op::X),
        (-3.0f64..3.0, 0..nq).prop_map(|(t, q)| Op::Ry(t, q)),
        (0..nq, 0..nq).prop_map(|(a, b)| Op::CX(a, b)),
        (0..nq, 0..nc).prop_map(|(q, c)| Op::Measure(q, c)),
        (0..nq).prop_map(Op::Reset),
        (0..nc, any::<bool>(), 0..nq).prop_map(|(c, v, q)| Op::IfX(c, v, q)),
    ]
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (1_u32..=5, 1_u32..=3).prop_flat_map(|(nq, nc)| {
        prop::collection::vec(arb_op(nq, nc), 0..=20).prop_map(move |ops| {
            let mut circuit = Circuit::new("prop");
            circuit.add_qreg("q", nq);
            circuit.add_creg("c", nc);
            for op in ops {
                op.apply(&mut circuit);
            }
            circuit
        })
    })
}

proptest! {
    #[test]
    fn depth_bounded_by_program_length(circuit in arb_circuit()) {
        let n = circuit.instructions().len();
        let depth = circuit.depth();
        prop_assert!(depth <= n);
        prop_assert_eq!(depth == 0, n == 0);
    }

    #[test]
    fn op_counts_sum_to_size(circuit in arb_circuit()) {
        let total: usize = circuit.count_ops().values().sum();
        prop_assert_eq!(total, circuit.size());
    }

    #[test]
    fn every_operand_is_declared(circuit in arb_circuit()) {
        for inst in circuit.instructions() {
            for q in &inst.qubits {
                prop_assert!(q.index() < circuit.num_qubits());
            }
            for c in &inst.clbits {
                prop_assert!(c.index() < circuit.num_clbits());
            }
            if let InstructionKind::Conditional { on, then } = &inst.kind {
                prop_assert!(!on.tests().is_empty());
                prop_assert_eq!(then.len(), 1);
            }
        }
    }
}

#[test]
fn test_circuit_serializes_with_conditionals() {
    let mut circuit = Circuit::new("serde");
    let q = circuit.add_qreg("q", 2);
    let c = circuit.add_creg("c", 1);
    circuit.ry(0.25, q[0]).unwrap();
    circuit.measure(q[0], c[0]).unwrap();
    circuit
        .conditional(ClassicalCondition::bit(c[0], true), |b| {
            b.swap(q[0], q[1])?;
            Ok(())
        })
        .unwrap();

    let json = serde_json::to_string(&circuit).unwrap();
    let back: Circuit = serde_json::from_str(&json).unwrap();
    assert_eq!(back, circuit);
}
