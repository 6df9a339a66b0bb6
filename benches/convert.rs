//! Conversion benchmarks.
//!
//! Run with:
//! ```bash
//! cargo bench --bench convert
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use logic_workbench::bdd::BddConfig;
use logic_workbench::network::{Network, NetworkKind};
use logic_workbench::repr::BddSet;
use logic_workbench::reversible::circuit::{Circuit, Control, Gate};
use logic_workbench::reversible::cost::{control_costs, evaluate, gate_costs};
use logic_workbench::truth_table::TruthTable;
use std::rc::Rc;

/// Hidden weighted bit: `x[w]` where `w` is the number of ones, 0 if there are none.
fn hidden_weighted_bit(n: u32) -> TruthTable {
    TruthTable::from_fn(n, |x| {
        let w = x.iter().filter(|&&b| b).count();
        w > 0 && x[w - 1]
    })
}

/// `n`-bit ripple-carry adder as an AIG, operand bits interleaved.
fn adder(n: usize) -> Network {
    let mut net = Network::new(NetworkKind::Aig);
    let mut carry = net.add_input("cin");
    for i in 0..n {
        let a = net.add_input(format!("a{}", i));
        let b = net.add_input(format!("b{}", i));
        let sum = net.xor3(a, b, carry);
        carry = net.maj(a, b, carry);
        net.add_output(sum, format!("s{}", i));
    }
    net.add_output(carry, "cout");
    net
}

fn bench_truth_table_to_aig(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert/tt_to_aig");
    for n in [6, 8, 10, 12] {
        let tt = hidden_weighted_bit(n);
        group.bench_with_input(BenchmarkId::new("hwb", n), &tt, |b, tt| {
            b.iter(|| black_box(Network::from_truth_table(NetworkKind::Aig, tt)))
        });
    }
    group.finish();
}

fn bench_network_kinds(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert/network");
    for n in [8, 32, 128] {
        let aig = adder(n);
        group.bench_with_input(BenchmarkId::new("aig_to_mig", n), &aig, |b, aig| {
            b.iter(|| black_box(aig.convert_to(NetworkKind::Mig)))
        });
        group.bench_with_input(BenchmarkId::new("aig_to_xmg", n), &aig, |b, aig| {
            b.iter(|| black_box(aig.convert_to(NetworkKind::Xmg)))
        });
    }
    group.finish();
}

fn bench_aig_to_bdd(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert/aig_to_bdd");
    group.sample_size(20);
    for n in [8, 16, 32] {
        let aig = adder(n);
        group.bench_with_input(BenchmarkId::new("adder", n), &aig, |b, aig| {
            b.iter(|| black_box(BddSet::from_network(aig, BddConfig::default()).unwrap().num_nodes()))
        });
    }
    group.finish();
}

fn bench_costs(c: &mut Criterion) {
    let mut group = c.benchmark_group("cost/hierarchy");

    let mut leaf = Circuit::new(4);
    leaf.add_gate(Gate::toffoli(vec![Control::positive(0), Control::positive(1)], 2));
    leaf.add_gate(Gate::cnot(2, 3));
    let mut module = Rc::new(leaf);
    // each level instantiates the previous one twice
    for depth in 1..=8 {
        let mut next = Circuit::new(4);
        next.add_gate(Gate::module("m", module.clone(), vec![], vec![0, 1, 2, 3]));
        next.add_gate(Gate::module("m", module.clone(), vec![], vec![3, 2, 1, 0]));
        module = Rc::new(next);

        if depth % 4 == 0 {
            group.bench_with_input(BenchmarkId::new("by_gate", depth), &module, |b, m| {
                b.iter(|| black_box(evaluate(m, &control_costs())))
            });
            group.bench_with_input(BenchmarkId::new("by_circuit", depth), &module, |b, m| {
                b.iter(|| black_box(evaluate(m, &gate_costs())))
            });
        }
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_truth_table_to_aig,
    bench_network_kinds,
    bench_aig_to_bdd,
    bench_costs
);
criterion_main!(benches);
