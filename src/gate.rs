use crate::signal::Signal;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryType {
    And,
    Xor,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TernaryType {
    Maj,
    Xor,
}

/// Logic gate over fanin signals.
///
/// Gates are kept in a normal form (sorted fanins, no complemented Xor fanin),
/// so structurally equal gates compare equal and can be hash-consed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Gate {
    Binary(BinaryType, [Signal; 2]),
    Ternary(TernaryType, [Signal; 3]),
}

// Constructors
impl Gate {
    pub fn and(a: Signal, b: Signal) -> Gate {
        Gate::Binary(BinaryType::And, [a, b])
    }

    pub fn xor(a: Signal, b: Signal) -> Gate {
        Gate::Binary(BinaryType::Xor, [a, b])
    }

    pub fn maj(a: Signal, b: Signal, c: Signal) -> Gate {
        Gate::Ternary(TernaryType::Maj, [a, b, c])
    }

    pub fn xor3(a: Signal, b: Signal, c: Signal) -> Gate {
        Gate::Ternary(TernaryType::Xor, [a, b, c])
    }
}

// Getters
impl Gate {
    pub fn inputs(&self) -> &[Signal] {
        match self {
            Gate::Binary(_, inputs) => inputs,
            Gate::Ternary(_, inputs) => inputs,
        }
    }

    pub fn is_and(&self) -> bool {
        matches!(self, Gate::Binary(BinaryType::And, _))
    }

    pub fn is_maj(&self) -> bool {
        matches!(self, Gate::Ternary(TernaryType::Maj, _))
    }

    pub fn is_xor(&self) -> bool {
        matches!(
            self,
            Gate::Binary(BinaryType::Xor, _) | Gate::Ternary(TernaryType::Xor, _)
        )
    }

    /// Evaluate the gate given the values of its fanins.
    pub fn eval(&self, value: impl Fn(Signal) -> bool) -> bool {
        match self {
            Gate::Binary(BinaryType::And, [a, b]) => value(*a) && value(*b),
            Gate::Binary(BinaryType::Xor, [a, b]) => value(*a) ^ value(*b),
            Gate::Ternary(TernaryType::Xor, [a, b, c]) => value(*a) ^ value(*b) ^ value(*c),
            Gate::Ternary(TernaryType::Maj, [a, b, c]) => {
                let (a, b, c) = (value(*a), value(*b), value(*c));
                (a && b) || (a && c) || (b && c)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_and() {
        let a = Signal::from_node(1);
        let b = Signal::from_node(2);
        let gate = Gate::and(a, b);
        assert_eq!(gate.inputs(), &[a, b]);
        assert!(gate.is_and());
        assert!(!gate.is_xor());
    }

    #[test]
    fn test_gate_xor3() {
        let a = Signal::from_node(1);
        let b = Signal::from_node(2);
        let c = Signal::from_node(3);
        let gate = Gate::xor3(a, b, c);
        assert_eq!(gate.inputs(), &[a, b, c]);
        assert!(gate.is_xor());
        assert!(!gate.is_maj());
    }

    #[test]
    fn test_gate_eval() {
        let a = Signal::from_node(1);
        let b = Signal::from_node(2);
        let c = Signal::from_node(3);
        let value = |s: Signal| [false, true, true, false][s.node() as usize];
        assert!(Gate::maj(a, b, c).eval(value));
        assert!(!Gate::and(a, c).eval(value));
        assert!(!Gate::xor(a, b).eval(value));
        assert!(!Gate::xor3(a, b, c).eval(value));
        assert!(Gate::xor3(a, c, c).eval(value));
    }
}
