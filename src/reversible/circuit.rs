//! Reversible circuits: lines, gates and references to sub-circuits.

use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::utils::fill_pattern;

/// Control line of a gate; `polarity == false` is a negative control.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Control {
    pub line: usize,
    pub polarity: bool,
}

impl Control {
    pub fn positive(line: usize) -> Self {
        Self { line, polarity: true }
    }

    pub fn negative(line: usize) -> Self {
        Self { line, polarity: false }
    }

    fn is_active(&self, state: u64) -> bool {
        ((state >> self.line) & 1 == 1) == self.polarity
    }
}

/// Reference to a shared sub-circuit.
#[derive(Clone)]
pub struct ModuleRef {
    pub name: String,
    pub circuit: Rc<Circuit>,
}

impl Debug for ModuleRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRef")
            .field("name", &self.name)
            .field("lines", &self.circuit.lines())
            .field("gates", &self.circuit.num_gates())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum GateKind {
    /// Multiple-controlled Toffoli; NOT and CNOT included.
    Toffoli,
    /// Multiple-controlled swap of two targets.
    Fredkin,
    /// Sub-circuit whose lines are mapped, in order, onto the targets.
    Module(ModuleRef),
}

#[derive(Debug, Clone)]
pub struct Gate {
    controls: Vec<Control>,
    targets: Vec<usize>,
    kind: GateKind,
}

// Constructors
impl Gate {
    pub fn not(target: usize) -> Self {
        Self::toffoli(Vec::new(), target)
    }

    pub fn cnot(control: usize, target: usize) -> Self {
        Self::toffoli(vec![Control::positive(control)], target)
    }

    pub fn toffoli(controls: Vec<Control>, target: usize) -> Self {
        Self {
            controls,
            targets: vec![target],
            kind: GateKind::Toffoli,
        }
    }

    pub fn fredkin(controls: Vec<Control>, a: usize, b: usize) -> Self {
        assert_ne!(a, b, "Fredkin targets must differ");
        Self {
            controls,
            targets: vec![a, b],
            kind: GateKind::Fredkin,
        }
    }

    /// Instantiate `circuit` on `targets`; line `i` of the sub-circuit is `targets[i]`.
    ///
    /// # Panics
    ///
    /// Panics if the number of targets differs from the sub-circuit's line count.
    pub fn module(
        name: impl Into<String>,
        circuit: Rc<Circuit>,
        controls: Vec<Control>,
        targets: Vec<usize>,
    ) -> Self {
        assert_eq!(
            targets.len(),
            circuit.lines(),
            "Module expects {} lines, got {}",
            circuit.lines(),
            targets.len()
        );
        Self {
            controls,
            targets,
            kind: GateKind::Module(ModuleRef {
                name: name.into(),
                circuit,
            }),
        }
    }

    /// Same operation on other lines, with `extra` controls in front of its own.
    pub(crate) fn remapped(&self, lines: &[usize], extra: &[Control]) -> Self {
        let controls = extra
            .iter()
            .copied()
            .chain(self.controls.iter().map(|c| Control {
                line: lines[c.line],
                polarity: c.polarity,
            }))
            .collect();
        Self {
            controls,
            targets: self.targets.iter().map(|&t| lines[t]).collect(),
            kind: self.kind.clone(),
        }
    }
}

// Getters
impl Gate {
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    pub fn kind(&self) -> &GateKind {
        &self.kind
    }

    pub fn module_ref(&self) -> Option<&ModuleRef> {
        match &self.kind {
            GateKind::Module(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_module(&self) -> bool {
        self.module_ref().is_some()
    }

    fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.controls.iter().map(|c| c.line).chain(self.targets.iter().copied())
    }
}

/// Patterns for [`Circuit::assign_unique_names`]; `{}` is replaced by a 1-based counter.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NamePatterns {
    pub input: String,
    pub output: String,
    pub constant: String,
    pub garbage: String,
}

impl Default for NamePatterns {
    fn default() -> Self {
        Self {
            input: "i{}".to_string(),
            output: "o{}".to_string(),
            constant: "c{}".to_string(),
            garbage: "g{}".to_string(),
        }
    }
}

impl NamePatterns {
    pub fn with_input(mut self, pattern: impl Into<String>) -> Self {
        self.input = pattern.into();
        self
    }

    pub fn with_output(mut self, pattern: impl Into<String>) -> Self {
        self.output = pattern.into();
        self
    }

    pub fn with_constant(mut self, pattern: impl Into<String>) -> Self {
        self.constant = pattern.into();
        self
    }

    pub fn with_garbage(mut self, pattern: impl Into<String>) -> Self {
        self.garbage = pattern.into();
        self
    }
}

/// Reversible circuit over a fixed number of lines.
///
/// Line `i` carries input name `inputs[i]`, output name `outputs[i]`, an
/// optional constant input value and a garbage flag for its output.
#[derive(Debug, Clone)]
pub struct Circuit {
    lines: usize,
    gates: Vec<Gate>,
    inputs: Vec<String>,
    outputs: Vec<String>,
    constants: Vec<Option<bool>>,
    garbage: Vec<bool>,
}

impl Circuit {
    /// Empty circuit on `lines` lines, each named `x{i}` on both ends.
    pub fn new(lines: usize) -> Self {
        let names: Vec<String> = (0..lines).map(|i| format!("x{}", i)).collect();
        Self {
            lines,
            gates: Vec::new(),
            inputs: names.clone(),
            outputs: names,
            constants: vec![None; lines],
            garbage: vec![false; lines],
        }
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Number of gates on this level, module references counted once.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn constants(&self) -> &[Option<bool>] {
        &self.constants
    }

    pub fn garbage(&self) -> &[bool] {
        &self.garbage
    }

    pub fn has_modules(&self) -> bool {
        self.gates.iter().any(|g| g.is_module())
    }

    /// Distinct modules referenced directly by this circuit, in order of first use.
    pub fn modules(&self) -> Vec<&ModuleRef> {
        let mut seen = HashSet::new();
        self.gates
            .iter()
            .filter_map(|g| g.module_ref())
            .filter(|m| seen.insert(Rc::as_ptr(&m.circuit)))
            .collect()
    }

    pub fn add_gate(&mut self, gate: Gate) {
        let mut used = HashSet::new();
        for line in gate.lines() {
            assert!(line < self.lines, "Line {} out of range for {} lines", line, self.lines);
            assert!(used.insert(line), "Line {} used twice by one gate", line);
        }
        self.gates.push(gate);
    }

    pub fn set_inputs(&mut self, names: Vec<String>) {
        assert_eq!(names.len(), self.lines, "Expected one input name per line");
        self.inputs = names;
    }

    pub fn set_outputs(&mut self, names: Vec<String>) {
        assert_eq!(names.len(), self.lines, "Expected one output name per line");
        self.outputs = names;
    }

    pub fn set_constants(&mut self, constants: Vec<Option<bool>>) {
        assert_eq!(constants.len(), self.lines, "Expected one constant per line");
        self.constants = constants;
    }

    pub fn set_garbage(&mut self, garbage: Vec<bool>) {
        assert_eq!(garbage.len(), self.lines, "Expected one garbage flag per line");
        self.garbage = garbage;
    }

    /// Copy of this circuit's line metadata without gates.
    pub(crate) fn empty_like(&self) -> Self {
        Self {
            lines: self.lines,
            gates: Vec::new(),
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            constants: self.constants.clone(),
            garbage: self.garbage.clone(),
        }
    }

    /// Name inputs by the input or constant pattern and outputs by the output
    /// or garbage pattern, each with its own counter.
    pub fn assign_unique_names(&mut self, patterns: &NamePatterns) {
        let (mut ictr, mut octr, mut cctr, mut gctr) = (0, 0, 0, 0);
        for i in 0..self.lines {
            self.inputs[i] = if self.constants[i].is_some() {
                cctr += 1;
                fill_pattern(&patterns.constant, cctr)
            } else {
                ictr += 1;
                fill_pattern(&patterns.input, ictr)
            };
            self.outputs[i] = if self.garbage[i] {
                gctr += 1;
                fill_pattern(&patterns.garbage, gctr)
            } else {
                octr += 1;
                fill_pattern(&patterns.output, octr)
            };
        }
    }

    /// Apply the circuit to `state`, where bit `i` is the value of line `i`.
    pub fn simulate(&self, state: u64) -> Result<u64> {
        assert!(self.lines <= 64, "Cannot simulate more than 64 lines");
        self.simulate_(state, &mut ModuleStack::default())
    }

    fn simulate_(&self, mut state: u64, stack: &mut ModuleStack) -> Result<u64> {
        for gate in &self.gates {
            if !gate.controls.iter().all(|c| c.is_active(state)) {
                continue;
            }
            match &gate.kind {
                GateKind::Toffoli => {
                    for &t in &gate.targets {
                        state ^= 1 << t;
                    }
                }
                GateKind::Fredkin => {
                    let (a, b) = (gate.targets[0], gate.targets[1]);
                    if ((state >> a) ^ (state >> b)) & 1 == 1 {
                        state ^= (1 << a) | (1 << b);
                    }
                }
                GateKind::Module(m) => {
                    stack.enter(m)?;
                    let sub_in = gate
                        .targets
                        .iter()
                        .enumerate()
                        .fold(0u64, |acc, (i, &t)| acc | (((state >> t) & 1) << i));
                    let sub_out = m.circuit.simulate_(sub_in, stack)?;
                    for (i, &t) in gate.targets.iter().enumerate() {
                        state = (state & !(1 << t)) | (((sub_out >> i) & 1) << t);
                    }
                    stack.leave();
                }
            }
        }
        Ok(state)
    }
}

/// Modules currently being expanded, innermost last.
///
/// Entering a module that is already on the stack means the module graph is cyclic.
#[derive(Debug, Default)]
pub(crate) struct ModuleStack {
    active: Vec<*const Circuit>,
}

impl ModuleStack {
    pub(crate) fn enter(&mut self, module: &ModuleRef) -> Result<()> {
        let ptr = Rc::as_ptr(&module.circuit);
        if self.active.contains(&ptr) {
            return Err(Error::CyclicModuleReference(module.name.clone()));
        }
        self.active.push(ptr);
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.active.pop();
    }
}
