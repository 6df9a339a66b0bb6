//! Inlining of module references into flat circuits.

use log::debug;

use crate::error::Result;
use crate::reversible::circuit::{Circuit, Control, GateKind, ModuleStack};

/// Inline every module reference of `circuit`, depth-first in gate order.
///
/// The result has the same lines, names, constants and garbage flags as
/// `circuit`; controls of a module gate are added to every gate inlined
/// from it. The input circuit is left untouched.
pub fn flatten(circuit: &Circuit) -> Result<Circuit> {
    let mut result = circuit.empty_like();
    let identity: Vec<usize> = (0..circuit.lines()).collect();
    flatten_into(&mut result, circuit, &identity, &[], &mut ModuleStack::default())?;
    debug!(
        "flatten: {} gates -> {} gates on {} lines",
        circuit.num_gates(),
        result.num_gates(),
        result.lines()
    );
    Ok(result)
}

fn flatten_into(
    result: &mut Circuit,
    circuit: &Circuit,
    lines: &[usize],
    controls: &[Control],
    stack: &mut ModuleStack,
) -> Result<()> {
    for gate in circuit.gates() {
        let mapped = gate.remapped(lines, controls);
        match gate.kind() {
            GateKind::Module(m) => {
                stack.enter(m)?;
                flatten_into(result, &m.circuit, mapped.targets(), mapped.controls(), stack)?;
                stack.leave();
            }
            _ => result.add_gate(mapped),
        }
    }
    Ok(())
}
