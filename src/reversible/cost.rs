//! Cost models for reversible circuits.
//!
//! A [`CostFunction`] either scores a whole (flat) circuit or scores each
//! primitive gate given the line count of the circuit it sits in.
//! [`evaluate`] resolves module references for both shapes: by-circuit
//! functions see a flattened copy, by-gate functions are summed over the
//! module tree.
//!
//! ```
//! use logic_workbench::reversible::circuit::{Circuit, Control, Gate};
//! use logic_workbench::reversible::cost::{evaluate, BuiltinCost};
//!
//! let mut circuit = Circuit::new(3);
//! circuit.add_gate(Gate::toffoli(vec![Control::positive(0), Control::positive(1)], 2));
//! circuit.add_gate(Gate::not(0));
//!
//! let control = "control".parse::<BuiltinCost>().unwrap().cost_function();
//! assert_eq!(evaluate(&circuit, &control).unwrap(), 16);
//! ```

use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use log::debug;

use crate::error::{Error, Result};
use crate::reversible::circuit::{Circuit, Gate, ModuleStack};
use crate::reversible::flatten::flatten;

pub type Cost = u64;

/// Cost of a single control line under [`control_costs`].
pub const CONTROL_COST: Cost = 8;

pub enum CostFunction {
    ByCircuit(Box<dyn Fn(&Circuit) -> Cost>),
    ByGate(Box<dyn Fn(&Gate, usize) -> Cost>),
}

impl CostFunction {
    pub fn by_circuit(f: impl Fn(&Circuit) -> Cost + 'static) -> Self {
        CostFunction::ByCircuit(Box::new(f))
    }

    pub fn by_gate(f: impl Fn(&Gate, usize) -> Cost + 'static) -> Self {
        CostFunction::ByGate(Box::new(f))
    }
}

impl Debug for CostFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CostFunction::ByCircuit(_) => write!(f, "CostFunction::ByCircuit(..)"),
            CostFunction::ByGate(_) => write!(f, "CostFunction::ByGate(..)"),
        }
    }
}

/// Number of gates.
pub fn gate_costs() -> CostFunction {
    CostFunction::by_circuit(|circuit| circuit.num_gates() as Cost)
}

/// Number of lines.
pub fn line_costs() -> CostFunction {
    CostFunction::by_circuit(|circuit| circuit.lines() as Cost)
}

/// [`CONTROL_COST`] per control line of every gate.
pub fn control_costs() -> CostFunction {
    CostFunction::by_gate(|gate, _| CONTROL_COST * gate.controls().len() as Cost)
}

/// One per gate.
pub fn unit_costs() -> CostFunction {
    CostFunction::by_gate(|_, _| 1)
}

/// The built-in cost functions, selectable by name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BuiltinCost {
    Gate,
    Line,
    Control,
    Unit,
}

impl BuiltinCost {
    pub const ALL: [BuiltinCost; 4] = [
        BuiltinCost::Gate,
        BuiltinCost::Line,
        BuiltinCost::Control,
        BuiltinCost::Unit,
    ];

    pub fn cost_function(self) -> CostFunction {
        match self {
            BuiltinCost::Gate => gate_costs(),
            BuiltinCost::Line => line_costs(),
            BuiltinCost::Control => control_costs(),
            BuiltinCost::Unit => unit_costs(),
        }
    }
}

impl Display for BuiltinCost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BuiltinCost::Gate => "gate",
            BuiltinCost::Line => "line",
            BuiltinCost::Control => "control",
            BuiltinCost::Unit => "unit",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for BuiltinCost {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BuiltinCost::ALL
            .into_iter()
            .find(|c| c.to_string() == s)
            .ok_or_else(|| Error::UnknownCostFunction(s.to_string()))
    }
}

/// Total cost of `circuit` under `f`.
pub fn evaluate(circuit: &Circuit, f: &CostFunction) -> Result<Cost> {
    let cost = match f {
        CostFunction::ByCircuit(f) => {
            if circuit.has_modules() {
                f(&flatten(circuit)?)
            } else {
                f(circuit)
            }
        }
        CostFunction::ByGate(f) => by_gate(circuit, f.as_ref(), &mut ModuleStack::default())?,
    };
    debug!("evaluate {:?} on {} lines: {}", f, circuit.lines(), cost);
    Ok(cost)
}

fn by_gate(
    circuit: &Circuit,
    f: &dyn Fn(&Gate, usize) -> Cost,
    stack: &mut ModuleStack,
) -> Result<Cost> {
    let mut sum = 0;
    for gate in circuit.gates() {
        sum += match gate.module_ref() {
            Some(m) => {
                stack.enter(m)?;
                let cost = by_gate(&m.circuit, f, stack)?;
                stack.leave();
                cost
            }
            None => f(gate, circuit.lines()),
        };
    }
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use test_log::test;

    use super::*;
    use crate::reversible::circuit::Control;

    #[test]
    fn test_builtin_names() {
        for cost in BuiltinCost::ALL {
            assert_eq!(cost.to_string().parse::<BuiltinCost>().unwrap(), cost);
        }
        assert!(matches!(
            "quantum".parse::<BuiltinCost>(),
            Err(Error::UnknownCostFunction(name)) if name == "quantum"
        ));
    }

    #[test]
    fn test_by_gate_sees_enclosing_line_count() {
        let mut sub = Circuit::new(2);
        sub.add_gate(Gate::not(0));
        let sub = Rc::new(sub);

        let mut top = Circuit::new(4);
        top.add_gate(Gate::not(3));
        top.add_gate(Gate::module("sub", sub, vec![], vec![1, 2]));

        let lines = CostFunction::by_gate(|_, lines| lines as Cost);
        assert_eq!(evaluate(&top, &lines).unwrap(), 4 + 2);
    }

    #[test]
    fn test_module_controls_counted_once_per_level() {
        let mut sub = Circuit::new(2);
        sub.add_gate(Gate::cnot(0, 1));
        let sub = Rc::new(sub);

        let mut top = Circuit::new(3);
        top.add_gate(Gate::module("sub", sub, vec![Control::positive(2)], vec![0, 1]));

        // by-gate recursion scores the sub-circuit's own gates
        assert_eq!(evaluate(&top, &control_costs()).unwrap(), 8);
        // by-circuit scoring sees the inlined gate with the extra control
        let flat_controls = CostFunction::by_circuit(|c| {
            c.gates().iter().map(|g| g.controls().len() as Cost).sum()
        });
        assert_eq!(evaluate(&top, &flat_controls).unwrap(), 2);
    }
}
