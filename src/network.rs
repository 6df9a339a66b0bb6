//! Structurally hashed logic networks: AIGs, MIGs and XMGs.
//!
//! A [`Network`] is a DAG of gates over primary inputs. Nodes are small
//! integer ids scoped to the network; node 0 is the constant false and every
//! node is created after its fanins, so ids are a topological order.
//!
//! All three flavors share one implementation and differ only in the gates
//! their builders emit:
//!
//! | kind  | gates                         |
//! |-------|-------------------------------|
//! | `Aig` | 2-input AND                   |
//! | `Mig` | majority-of-three             |
//! | `Xmg` | majority-of-three, 3-input XOR |
//!
//! Functions that a kind has no gate for are decomposed by the builders,
//! e.g. `Mig::and(a, b) = maj(a, b, 0)` and `Aig::maj` is a sum of products.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use log::debug;

use crate::expr::{Expr, Expression};
use crate::gate::{BinaryType, Gate, TernaryType};
use crate::signal::Signal;
use crate::truth_table::TruthTable;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NetworkKind {
    Aig,
    Mig,
    Xmg,
}

impl NetworkKind {
    pub fn supports(self, gate: &Gate) -> bool {
        match self {
            NetworkKind::Aig => gate.is_and(),
            NetworkKind::Mig => gate.is_maj(),
            NetworkKind::Xmg => gate.is_maj() || matches!(gate, Gate::Ternary(TernaryType::Xor, _)),
        }
    }
}

impl Display for NetworkKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkKind::Aig => write!(f, "AIG"),
            NetworkKind::Mig => write!(f, "MIG"),
            NetworkKind::Xmg => write!(f, "XMG"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Node {
    Const,
    Input(u32),
    Gate(Gate),
}

/// A mapped cell: the node it implements and the leaves it reads.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Cell {
    pub name: String,
    pub leaves: Vec<u32>,
}

/// Technology mapping annotation: root node -> cell.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Mapping {
    cells: BTreeMap<u32, Cell>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, root: u32, cell: Cell) {
        self.cells.insert(root, cell);
    }

    pub fn cell(&self, root: u32) -> Option<&Cell> {
        self.cells.get(&root)
    }

    pub fn cells(&self) -> impl Iterator<Item = (u32, &Cell)> {
        self.cells.iter().map(|(&root, cell)| (root, cell))
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }
}

/// Evaluation domain for [`Network::simulate_with`].
///
/// Constants and negation are infallible; building anything else may fail with `Self::Error`.
pub trait Simulator {
    type Value: Clone;
    type Error;

    fn zero(&self) -> Self::Value;
    fn not(&self, a: &Self::Value) -> Self::Value;
    fn input(&self, index: usize) -> Result<Self::Value, Self::Error>;
    fn and(&self, a: &Self::Value, b: &Self::Value) -> Result<Self::Value, Self::Error>;
    fn xor(&self, a: &Self::Value, b: &Self::Value) -> Result<Self::Value, Self::Error>;
    fn maj(
        &self,
        a: &Self::Value,
        b: &Self::Value,
        c: &Self::Value,
    ) -> Result<Self::Value, Self::Error>;
}

/// Simulates a network with truth tables over its primary inputs.
pub struct TruthTableSimulator {
    num_vars: u32,
}

impl TruthTableSimulator {
    pub fn new(num_vars: u32) -> Self {
        Self { num_vars }
    }
}

impl Simulator for TruthTableSimulator {
    type Value = TruthTable;
    type Error = Infallible;

    fn zero(&self) -> TruthTable {
        TruthTable::zero(self.num_vars)
    }

    fn not(&self, a: &TruthTable) -> TruthTable {
        !a
    }

    fn input(&self, index: usize) -> Result<TruthTable, Infallible> {
        Ok(TruthTable::var(self.num_vars, index as u32))
    }

    fn and(&self, a: &TruthTable, b: &TruthTable) -> Result<TruthTable, Infallible> {
        Ok(a & b)
    }

    fn xor(&self, a: &TruthTable, b: &TruthTable) -> Result<TruthTable, Infallible> {
        Ok(a ^ b)
    }

    fn maj(&self, a: &TruthTable, b: &TruthTable, c: &TruthTable) -> Result<TruthTable, Infallible> {
        Ok(TruthTable::maj(a, b, c))
    }
}

#[derive(Debug, Clone)]
pub struct Network {
    kind: NetworkKind,
    name: String,
    nodes: Vec<Node>,
    inputs: Vec<u32>,
    input_names: Vec<String>,
    outputs: Vec<Signal>,
    output_names: Vec<String>,
    strash: HashMap<Gate, u32>,
    mapping: Option<Mapping>,
}

// Constructors
impl Network {
    pub fn new(kind: NetworkKind) -> Self {
        Self {
            kind,
            name: String::new(),
            nodes: vec![Node::Const],
            inputs: Vec::new(),
            input_names: Vec::new(),
            outputs: Vec::new(),
            output_names: Vec::new(),
            strash: HashMap::new(),
            mapping: None,
        }
    }

    pub fn with_name(kind: NetworkKind, name: impl Into<String>) -> Self {
        let mut network = Self::new(kind);
        network.name = name.into();
        network
    }

    /// Single-output network computing `tt`, built by Shannon expansion with
    /// shared cofactors. Inputs are named `x0, x1, ...` and the output `f`.
    pub fn from_truth_table(kind: NetworkKind, tt: &TruthTable) -> Self {
        let mut network = Self::new(kind);
        let inputs: Vec<Signal> = (0..tt.num_vars())
            .map(|i| network.add_input(format!("x{}", i)))
            .collect();

        let mut cache = HashMap::new();
        let f = network.shannon(tt, &inputs, &mut cache);
        network.add_output(f, "f");

        debug!(
            "from_truth_table: {} variables -> {} with {} gates",
            tt.num_vars(),
            kind,
            network.num_gates()
        );
        network
    }

    fn shannon(
        &mut self,
        tt: &TruthTable,
        inputs: &[Signal],
        cache: &mut HashMap<TruthTable, Signal>,
    ) -> Signal {
        if tt.is_zero() {
            return Signal::zero();
        }
        if tt.is_one() {
            return Signal::one();
        }
        if let Some(&s) = cache.get(tt) {
            return s;
        }

        let top = tt.num_vars() - 1;
        let (low, high) = tt.cofactors(top);
        let f = if low == high {
            self.shannon(&low, inputs, cache)
        } else {
            let x = inputs[top as usize];
            let f0 = self.shannon(&low, inputs, cache);
            let f1 = self.shannon(&high, inputs, cache);
            self.ite(x, f1, f0)
        };

        cache.insert(tt.clone(), f);
        f
    }

    /// Single-output network computing `expr`. Input `i` is variable `x{i}`,
    /// the output is named `f`.
    pub fn from_expression(kind: NetworkKind, expr: &Expression) -> Self {
        let mut network = Self::new(kind);
        let inputs: Vec<Signal> = (0..expr.num_vars())
            .map(|i| network.add_input(format!("x{}", i)))
            .collect();

        let mut cache = HashMap::new();
        let f = network.build_expr(expr.root(), &inputs, &mut cache);
        network.add_output(f, "f");
        network
    }

    fn build_expr(
        &mut self,
        e: &Rc<Expr>,
        inputs: &[Signal],
        cache: &mut HashMap<*const Expr, Signal>,
    ) -> Signal {
        if let Some(&s) = cache.get(&Rc::as_ptr(e)) {
            return s;
        }
        let s = match e.as_ref() {
            Expr::Const(b) => Signal::from(*b),
            Expr::Var(i) => inputs[*i as usize],
            Expr::Not(a) => !self.build_expr(a, inputs, cache),
            Expr::And(a, b) => {
                let a = self.build_expr(a, inputs, cache);
                let b = self.build_expr(b, inputs, cache);
                self.and(a, b)
            }
            Expr::Or(a, b) => {
                let a = self.build_expr(a, inputs, cache);
                let b = self.build_expr(b, inputs, cache);
                self.or(a, b)
            }
            Expr::Xor(a, b) => {
                let a = self.build_expr(a, inputs, cache);
                let b = self.build_expr(b, inputs, cache);
                self.xor(a, b)
            }
        };
        cache.insert(Rc::as_ptr(e), s);
        s
    }
}

// Getters
impl Network {
    pub fn kind(&self) -> NetworkKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn node(&self, id: u32) -> &Node {
        &self.nodes[id as usize]
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    pub fn num_gates(&self) -> usize {
        self.gates().count()
    }

    pub fn input(&self, index: usize) -> Signal {
        Signal::from_node(self.inputs[index])
    }

    pub fn inputs(&self) -> impl Iterator<Item = Signal> + '_ {
        self.inputs.iter().map(|&n| Signal::from_node(n))
    }

    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    pub fn outputs(&self) -> &[Signal] {
        &self.outputs
    }

    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }

    pub fn output_index(&self, name: &str) -> Option<usize> {
        self.output_names.iter().position(|n| n == name)
    }

    /// Gates with their node ids, in topological order.
    pub fn gates(&self) -> impl Iterator<Item = (u32, &Gate)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, node)| match node {
            Node::Gate(g) => Some((i as u32, g)),
            _ => None,
        })
    }

    pub fn mapping(&self) -> Option<&Mapping> {
        self.mapping.as_ref()
    }

    pub fn set_mapping(&mut self, mapping: Mapping) {
        for (root, cell) in mapping.cells() {
            assert!((root as usize) < self.nodes.len(), "Mapped node {} does not exist", root);
            for &leaf in &cell.leaves {
                assert!((leaf as usize) < self.nodes.len(), "Leaf {} does not exist", leaf);
            }
        }
        self.mapping = Some(mapping);
    }

    pub fn clear_mapping(&mut self) {
        self.mapping = None;
    }

    pub fn num_cells(&self) -> usize {
        self.mapping.as_ref().map_or(0, |m| m.num_cells())
    }
}

// Builders
impl Network {
    pub fn add_input(&mut self, name: impl Into<String>) -> Signal {
        let id = self.nodes.len() as u32;
        self.nodes.push(Node::Input(self.inputs.len() as u32));
        self.inputs.push(id);
        self.input_names.push(name.into());
        Signal::from_node(id)
    }

    pub fn add_output(&mut self, signal: Signal, name: impl Into<String>) -> usize {
        assert!(
            (signal.node() as usize) < self.nodes.len(),
            "Output signal {} does not exist",
            signal
        );
        self.outputs.push(signal);
        self.output_names.push(name.into());
        self.outputs.len() - 1
    }

    fn mk_gate(&mut self, gate: Gate) -> Signal {
        assert!(self.kind.supports(&gate), "{} cannot hold {:?}", self.kind, gate);
        if let Some(&id) = self.strash.get(&gate) {
            return Signal::from_node(id);
        }
        let id = self.nodes.len() as u32;
        self.nodes.push(Node::Gate(gate));
        self.strash.insert(gate, id);
        Signal::from_node(id)
    }

    pub fn and(&mut self, a: Signal, b: Signal) -> Signal {
        if a == Signal::zero() || b == Signal::zero() || a == !b {
            return Signal::zero();
        }
        if a == Signal::one() || a == b {
            return b;
        }
        if b == Signal::one() {
            return a;
        }

        match self.kind {
            NetworkKind::Aig => {
                let (a, b) = if a < b { (a, b) } else { (b, a) };
                self.mk_gate(Gate::and(a, b))
            }
            NetworkKind::Mig | NetworkKind::Xmg => self.maj(a, b, Signal::zero()),
        }
    }

    pub fn or(&mut self, a: Signal, b: Signal) -> Signal {
        !self.and(!a, !b)
    }

    pub fn maj(&mut self, a: Signal, b: Signal, c: Signal) -> Signal {
        if a == b || a == c {
            return a;
        }
        if b == c {
            return b;
        }
        if a == !b {
            return c;
        }
        if a == !c {
            return b;
        }
        if b == !c {
            return a;
        }

        match self.kind {
            NetworkKind::Aig => {
                let ab = self.and(a, b);
                let ac = self.and(a, c);
                let bc = self.and(b, c);
                let t = self.or(ab, ac);
                self.or(t, bc)
            }
            NetworkKind::Mig | NetworkKind::Xmg => {
                let mut fanins = [a, b, c];
                // maj is self-dual: keep at most one complemented fanin
                let flip = fanins.iter().filter(|s| s.is_complemented()).count() >= 2;
                if flip {
                    fanins.iter_mut().for_each(|s| *s = !*s);
                }
                fanins.sort();
                let [a, b, c] = fanins;
                self.mk_gate(Gate::maj(a, b, c)).complement_if(flip)
            }
        }
    }

    pub fn xor(&mut self, a: Signal, b: Signal) -> Signal {
        if a == b {
            return Signal::zero();
        }
        if a == !b {
            return Signal::one();
        }
        if a.is_const() {
            return b.complement_if(a.is_complemented());
        }
        if b.is_const() {
            return a.complement_if(b.is_complemented());
        }

        match self.kind {
            NetworkKind::Aig | NetworkKind::Mig => {
                let t1 = self.and(a, !b);
                let t2 = self.and(!a, b);
                self.or(t1, t2)
            }
            NetworkKind::Xmg => self.xor3(a, b, Signal::zero()),
        }
    }

    pub fn xor3(&mut self, a: Signal, b: Signal, c: Signal) -> Signal {
        match self.kind {
            NetworkKind::Aig | NetworkKind::Mig => {
                let t = self.xor(a, b);
                self.xor(t, c)
            }
            NetworkKind::Xmg => {
                // complements are pushed to the output
                let parity = [a, b, c].iter().filter(|s| s.is_complemented()).count() % 2 == 1;
                let mut fanins = [a.regular(), b.regular(), c.regular()];
                fanins.sort();
                let [a, b, c] = fanins;
                if a == b {
                    return c.complement_if(parity);
                }
                if b == c {
                    return a.complement_if(parity);
                }
                self.mk_gate(Gate::xor3(a, b, c)).complement_if(parity)
            }
        }
    }

    /// `c ? t : e`.
    pub fn ite(&mut self, c: Signal, t: Signal, e: Signal) -> Signal {
        if t == e {
            return t;
        }
        if c == Signal::one() {
            return t;
        }
        if c == Signal::zero() {
            return e;
        }
        let ct = self.and(c, t);
        let ce = self.and(!c, e);
        self.or(ct, ce)
    }

    /// Rebuild `gate` (with fanins already translated) using this network's builders.
    fn rebuild(&mut self, gate: &Gate, fanin: impl Fn(Signal) -> Signal) -> Signal {
        match *gate {
            Gate::Binary(BinaryType::And, [a, b]) => self.and(fanin(a), fanin(b)),
            Gate::Binary(BinaryType::Xor, [a, b]) => self.xor(fanin(a), fanin(b)),
            Gate::Ternary(TernaryType::Maj, [a, b, c]) => self.maj(fanin(a), fanin(b), fanin(c)),
            Gate::Ternary(TernaryType::Xor, [a, b, c]) => self.xor3(fanin(a), fanin(b), fanin(c)),
        }
    }
}

// Analysis
impl Network {
    /// Nodes in the transitive fanin of the given outputs, constant and inputs excluded.
    fn reachable(&self, outputs: &[usize]) -> Vec<bool> {
        let mut needed = vec![false; self.nodes.len()];
        for &o in outputs {
            needed[self.outputs[o].node() as usize] = true;
        }
        for id in (0..self.nodes.len()).rev() {
            if !needed[id] {
                continue;
            }
            if let Node::Gate(g) = &self.nodes[id] {
                for s in g.inputs() {
                    needed[s.node() as usize] = true;
                }
            }
        }
        needed
    }

    /// Level of every node: 0 for the constant and inputs, `1 + max(fanin levels)` for gates.
    pub fn levels(&self) -> Vec<usize> {
        let mut levels = vec![0; self.nodes.len()];
        for (id, node) in self.nodes.iter().enumerate() {
            if let Node::Gate(g) = node {
                levels[id] = 1 + g
                    .inputs()
                    .iter()
                    .map(|s| levels[s.node() as usize])
                    .max()
                    .unwrap_or(0);
            }
        }
        levels
    }

    /// Longest path, in gates, from a primary input to a primary output.
    pub fn depth(&self) -> usize {
        let levels = self.levels();
        self.outputs
            .iter()
            .map(|s| levels[s.node() as usize])
            .max()
            .unwrap_or(0)
    }

    /// Number of reachable gates on each level `1..=depth`.
    pub fn level_histogram(&self) -> Vec<usize> {
        let levels = self.levels();
        let needed = self.reachable(&(0..self.outputs.len()).collect::<Vec<_>>());
        let mut histogram = vec![0; self.depth()];
        for (id, _) in self.gates() {
            let level = levels[id as usize];
            if needed[id as usize] && level <= histogram.len() {
                histogram[level - 1] += 1;
            }
        }
        histogram
    }

    /// Complemented fanin edges of all gates.
    pub fn complemented_edges(&self) -> usize {
        self.gates()
            .flat_map(|(_, g)| g.inputs())
            .filter(|s| s.is_complemented())
            .count()
    }

    /// Distinct non-constant nodes used complemented by a gate or an output.
    pub fn inverters(&self) -> usize {
        let fanins = self.gates().flat_map(|(_, g)| g.inputs().iter().copied());
        fanins
            .chain(self.outputs.iter().copied())
            .filter(|s| s.is_complemented() && !s.is_const())
            .map(|s| s.node())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn num_maj(&self) -> usize {
        self.gates().filter(|(_, g)| g.is_maj()).count()
    }

    /// Majority gates none of whose fanins is a constant.
    pub fn num_real_maj(&self) -> usize {
        self.gates()
            .filter(|(_, g)| g.is_maj() && g.inputs().iter().all(|s| !s.is_const()))
            .count()
    }

    pub fn num_xor(&self) -> usize {
        self.gates().filter(|(_, g)| g.is_xor()).count()
    }
}

// Simulation
impl Network {
    /// Output values under `assignment` (one value per primary input).
    pub fn simulate(&self, assignment: &[bool]) -> Vec<bool> {
        assert_eq!(assignment.len(), self.inputs.len(), "Assignment has wrong length");
        let mut values = vec![false; self.nodes.len()];
        for (id, node) in self.nodes.iter().enumerate() {
            values[id] = match node {
                Node::Const => false,
                Node::Input(i) => assignment[*i as usize],
                Node::Gate(g) => g.eval(|s| values[s.node() as usize] ^ s.is_complemented()),
            };
        }
        self.outputs
            .iter()
            .map(|s| values[s.node() as usize] ^ s.is_complemented())
            .collect()
    }

    /// Output values in an arbitrary [`Simulator`] domain.
    pub fn simulate_with<S: Simulator>(&self, sim: &S) -> Result<Vec<S::Value>, S::Error> {
        let needed = self.reachable(&(0..self.outputs.len()).collect::<Vec<_>>());
        let mut values: Vec<Option<S::Value>> = vec![None; self.nodes.len()];
        values[0] = Some(sim.zero());

        let get = |values: &[Option<S::Value>], s: Signal| -> S::Value {
            match &values[s.node() as usize] {
                Some(v) if s.is_complemented() => sim.not(v),
                Some(v) => v.clone(),
                None => unreachable!("fanin {} evaluated before its node", s),
            }
        };

        for (id, node) in self.nodes.iter().enumerate() {
            let value = match node {
                Node::Const => continue,
                Node::Input(i) => sim.input(*i as usize)?,
                Node::Gate(_) if !needed[id] => continue,
                Node::Gate(g) => {
                    let v: Vec<S::Value> = g.inputs().iter().map(|&s| get(&values, s)).collect();
                    match g {
                        Gate::Binary(BinaryType::And, _) => sim.and(&v[0], &v[1])?,
                        Gate::Binary(BinaryType::Xor, _) => sim.xor(&v[0], &v[1])?,
                        Gate::Ternary(TernaryType::Maj, _) => sim.maj(&v[0], &v[1], &v[2])?,
                        Gate::Ternary(TernaryType::Xor, _) => sim.xor(&sim.xor(&v[0], &v[1])?, &v[2])?,
                    }
                }
            };
            values[id] = Some(value);
        }

        Ok(self.outputs.iter().map(|&s| get(&values, s)).collect())
    }

    /// Truth table of every output over the primary inputs.
    pub fn truth_tables(&self) -> Vec<TruthTable> {
        match self.simulate_with(&TruthTableSimulator::new(self.inputs.len() as u32)) {
            Ok(tables) => tables,
            Err(never) => match never {},
        }
    }

    /// Expression for output `output`, over variables `x0..x{num_inputs}`.
    pub fn to_expression(&self, output: usize) -> Expression {
        let mut cache = HashMap::new();
        let root = self.expr_of(self.outputs[output], &mut cache);
        Expression::with_num_vars(root, self.inputs.len() as u32)
    }

    fn expr_of(&self, s: Signal, cache: &mut HashMap<u32, Rc<Expr>>) -> Rc<Expr> {
        let e = match cache.get(&s.node()) {
            Some(e) => e.clone(),
            None => {
                let e = match &self.nodes[s.node() as usize] {
                    Node::Const => Expr::constant(false),
                    Node::Input(i) => Expr::var(*i),
                    Node::Gate(g) => {
                        let v: Vec<Rc<Expr>> =
                            g.inputs().iter().map(|&f| self.expr_of(f, cache)).collect();
                        match g {
                            Gate::Binary(BinaryType::And, _) => Expr::and(v[0].clone(), v[1].clone()),
                            Gate::Binary(BinaryType::Xor, _) => Expr::xor(v[0].clone(), v[1].clone()),
                            Gate::Ternary(TernaryType::Maj, _) => {
                                Expr::maj(v[0].clone(), v[1].clone(), v[2].clone())
                            }
                            Gate::Ternary(TernaryType::Xor, _) => {
                                Expr::xor(Expr::xor(v[0].clone(), v[1].clone()), v[2].clone())
                            }
                        }
                    }
                };
                cache.insert(s.node(), e.clone());
                e
            }
        };
        if s.is_complemented() {
            Expr::not(e)
        } else {
            e
        }
    }
}

// Transformations
impl Network {
    /// Copy the logic of the given outputs into a fresh network of `kind`.
    /// All primary inputs are kept; the mapping is dropped.
    fn transfer(&self, kind: NetworkKind, outputs: &[usize]) -> Network {
        let mut result = Network::with_name(kind, self.name.clone());
        let needed = self.reachable(outputs);

        let mut map: HashMap<u32, Signal> = HashMap::new();
        map.insert(0, Signal::zero());
        for (&id, name) in self.inputs.iter().zip(&self.input_names) {
            map.insert(id, result.add_input(name.clone()));
        }

        for (id, gate) in self.gates() {
            if !needed[id as usize] {
                continue;
            }
            let s = result.rebuild(gate, |f| map[&f.node()].complement_if(f.is_complemented()));
            map.insert(id, s);
        }

        for &o in outputs {
            let s = self.outputs[o];
            let t = map[&s.node()].complement_if(s.is_complemented());
            result.add_output(t, self.output_names[o].clone());
        }
        result
    }

    /// Functionally equivalent network of another kind, same input and output order.
    pub fn convert_to(&self, kind: NetworkKind) -> Network {
        let result = self.transfer(kind, &(0..self.outputs.len()).collect::<Vec<_>>());
        debug!(
            "convert {} ({} gates) -> {} ({} gates)",
            self.kind,
            self.num_gates(),
            kind,
            result.num_gates()
        );
        result
    }

    /// Keep only the given outputs and the logic in their transitive fanin.
    ///
    /// # Panics
    ///
    /// Panics if an output index is out of range.
    pub fn cone(&self, outputs: &[usize]) -> Network {
        for &o in outputs {
            assert!(o < self.outputs.len(), "Output {} does not exist", o);
        }
        self.transfer(self.kind, outputs)
    }

    /// Rename inputs and outputs; names not in the maps are left unchanged.
    pub fn rename(&mut self, inputs: &HashMap<String, String>, outputs: &HashMap<String, String>) {
        for name in self.input_names.iter_mut() {
            if let Some(new) = inputs.get(name) {
                *name = new.clone();
            }
        }
        for name in self.output_names.iter_mut() {
            if let Some(new) = outputs.get(name) {
                *name = new.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn full_adder(kind: NetworkKind) -> Network {
        let mut n = Network::with_name(kind, "fa");
        let a = n.add_input("a");
        let b = n.add_input("b");
        let c = n.add_input("c");
        let sum = n.xor3(a, b, c);
        let carry = n.maj(a, b, c);
        n.add_output(sum, "sum");
        n.add_output(carry, "carry");
        n
    }

    fn expected_full_adder() -> Vec<TruthTable> {
        vec![
            TruthTable::from_fn(3, |x| x[0] ^ x[1] ^ x[2]),
            TruthTable::from_fn(3, |x| (x[0] as u8 + x[1] as u8 + x[2] as u8) >= 2),
        ]
    }

    #[test]
    fn test_aig_and_strash() {
        let mut n = Network::new(NetworkKind::Aig);
        let a = n.add_input("a");
        let b = n.add_input("b");
        let f = n.and(a, b);
        let g = n.and(b, a);
        assert_eq!(f, g);
        assert_eq!(n.num_gates(), 1);
        assert_eq!(n.and(a, !a), Signal::zero());
        assert_eq!(n.and(a, Signal::one()), a);
    }

    #[test]
    fn test_full_adder_all_kinds() {
        for kind in [NetworkKind::Aig, NetworkKind::Mig, NetworkKind::Xmg] {
            let n = full_adder(kind);
            assert_eq!(n.truth_tables(), expected_full_adder(), "{}", kind);
            assert_eq!(n.simulate(&[true, true, false]), vec![false, true]);
        }
    }

    #[test]
    fn test_xmg_counts() {
        let n = full_adder(NetworkKind::Xmg);
        assert_eq!(n.num_gates(), 2);
        assert_eq!(n.num_maj(), 1);
        assert_eq!(n.num_real_maj(), 1);
        assert_eq!(n.num_xor(), 1);
        assert_eq!(n.depth(), 1);
    }

    #[test]
    fn test_mig_and_is_maj_with_constant() {
        let mut n = Network::new(NetworkKind::Mig);
        let a = n.add_input("a");
        let b = n.add_input("b");
        let f = n.and(a, b);
        n.add_output(f, "f");
        assert_eq!(n.num_maj(), 1);
        assert_eq!(n.num_real_maj(), 0);
    }

    #[test]
    fn test_mig_self_duality() {
        let mut n = Network::new(NetworkKind::Mig);
        let a = n.add_input("a");
        let b = n.add_input("b");
        let c = n.add_input("c");
        let f = n.maj(!a, !b, c);
        let g = n.maj(a, b, !c);
        assert_eq!(f, !g);
        assert_eq!(n.num_gates(), 1);
    }

    #[test]
    fn test_depth_and_levels() {
        let mut n = Network::new(NetworkKind::Aig);
        let a = n.add_input("a");
        let b = n.add_input("b");
        let c = n.add_input("c");
        let ab = n.and(a, b);
        let abc = n.and(ab, c);
        n.add_output(abc, "f");
        n.add_output(ab, "g");
        assert_eq!(n.depth(), 2);
        assert_eq!(n.level_histogram(), vec![1, 1]);
    }

    #[test]
    fn test_empty_network_depth() {
        let mut n = Network::new(NetworkKind::Aig);
        let a = n.add_input("a");
        n.add_output(a, "f");
        assert_eq!(n.depth(), 0);
        assert_eq!(n.num_gates(), 0);
    }

    #[test]
    fn test_convert_roundtrip() {
        let aig = full_adder(NetworkKind::Aig);
        let mig = aig.convert_to(NetworkKind::Mig);
        let xmg = mig.convert_to(NetworkKind::Xmg);
        let back = xmg.convert_to(NetworkKind::Aig);
        assert_eq!(mig.kind(), NetworkKind::Mig);
        for n in [&mig, &xmg, &back] {
            assert_eq!(n.truth_tables(), expected_full_adder());
            assert_eq!(n.output_names(), &["sum", "carry"]);
            assert_eq!(n.input_names(), &["a", "b", "c"]);
            assert_eq!(n.name(), "fa");
        }
    }

    #[test]
    fn test_from_truth_table() {
        let tt = TruthTable::from_binary("10010110").unwrap();
        let aig = Network::from_truth_table(NetworkKind::Aig, &tt);
        assert_eq!(aig.num_inputs(), 3);
        assert_eq!(aig.output_names(), &["f"]);
        assert_eq!(aig.truth_tables(), vec![tt]);
    }

    #[test]
    fn test_expression_roundtrip() {
        let e = Expression::new(Expr::or(
            Expr::and(Expr::var(0), Expr::var(1)),
            Expr::xor(Expr::var(2), Expr::not(Expr::var(0))),
        ));
        for kind in [NetworkKind::Aig, NetworkKind::Mig, NetworkKind::Xmg] {
            let n = Network::from_expression(kind, &e);
            assert_eq!(n.truth_tables(), vec![e.to_truth_table()]);
            let back = n.to_expression(0);
            assert_eq!(back.num_vars(), 3);
            assert_eq!(back.to_truth_table(), e.to_truth_table());
        }
    }

    #[test]
    fn test_cone() {
        let n = full_adder(NetworkKind::Xmg);
        let carry = n.output_index("carry").unwrap();
        let c = n.cone(&[carry]);
        assert_eq!(c.num_outputs(), 1);
        assert_eq!(c.num_inputs(), 3);
        assert_eq!(c.num_gates(), 1);
        assert_eq!(c.truth_tables(), vec![expected_full_adder()[1].clone()]);
        assert_eq!(n.output_index("nope"), None);
    }

    #[test]
    fn test_rename() {
        let mut n = full_adder(NetworkKind::Aig);
        let inputs = HashMap::from([("a".to_string(), "x".to_string())]);
        let outputs = HashMap::from([("carry".to_string(), "cout".to_string())]);
        n.rename(&inputs, &outputs);
        assert_eq!(n.input_names(), &["x", "b", "c"]);
        assert_eq!(n.output_names(), &["sum", "cout"]);
    }

    #[test]
    fn test_complemented_edges_and_inverters() {
        let mut n = Network::new(NetworkKind::Mig);
        let a = n.add_input("a");
        let b = n.add_input("b");
        let c = n.add_input("c");
        let f = n.maj(!a, b, c);
        n.add_output(!f, "f");
        assert_eq!(n.complemented_edges(), 1);
        assert_eq!(n.inverters(), 2);
    }

    #[test]
    fn test_mapping() {
        let mut n = full_adder(NetworkKind::Aig);
        assert_eq!(n.num_cells(), 0);
        let root = n.outputs()[1].node();
        let mut mapping = Mapping::new();
        mapping.insert(
            root,
            Cell {
                name: "lut3".to_string(),
                leaves: n.inputs().map(|s| s.node()).collect(),
            },
        );
        n.set_mapping(mapping);
        assert_eq!(n.num_cells(), 1);
        assert_eq!(n.mapping().and_then(|m| m.cell(root)).map(|c| c.leaves.len()), Some(3));
        // conversions drop the annotation
        assert_eq!(n.convert_to(NetworkKind::Mig).num_cells(), 0);
    }
}
