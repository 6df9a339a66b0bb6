//! Immutable Boolean expressions with structural sharing.
//!
//! Sub-expressions are held in [`Rc`]s, so cloning an [`Expression`] is cheap
//! and sub-trees can be shared between several expressions. Nothing is ever
//! mutated after construction.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use crate::truth_table::TruthTable;

#[derive(Debug, PartialEq, Eq)]
pub enum Expr {
    Const(bool),
    Var(u32),
    Not(Rc<Expr>),
    And(Rc<Expr>, Rc<Expr>),
    Or(Rc<Expr>, Rc<Expr>),
    Xor(Rc<Expr>, Rc<Expr>),
}

// Constructors
impl Expr {
    pub fn constant(value: bool) -> Rc<Expr> {
        Rc::new(Expr::Const(value))
    }

    pub fn var(index: u32) -> Rc<Expr> {
        Rc::new(Expr::Var(index))
    }

    pub fn not(inner: Rc<Expr>) -> Rc<Expr> {
        match inner.as_ref() {
            Expr::Const(b) => Expr::constant(!b),
            Expr::Not(a) => a.clone(),
            _ => Rc::new(Expr::Not(inner)),
        }
    }

    pub fn and(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Expr> {
        match (lhs.as_ref(), rhs.as_ref()) {
            (Expr::Const(false), _) | (_, Expr::Const(false)) => Expr::constant(false),
            (Expr::Const(true), _) => rhs,
            (_, Expr::Const(true)) => lhs,
            _ => Rc::new(Expr::And(lhs, rhs)),
        }
    }

    pub fn or(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Expr> {
        match (lhs.as_ref(), rhs.as_ref()) {
            (Expr::Const(true), _) | (_, Expr::Const(true)) => Expr::constant(true),
            (Expr::Const(false), _) => rhs,
            (_, Expr::Const(false)) => lhs,
            _ => Rc::new(Expr::Or(lhs, rhs)),
        }
    }

    pub fn xor(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Expr> {
        match (lhs.as_ref(), rhs.as_ref()) {
            (Expr::Const(false), _) => rhs,
            (_, Expr::Const(false)) => lhs,
            (Expr::Const(true), _) => Expr::not(rhs),
            (_, Expr::Const(true)) => Expr::not(lhs),
            _ => Rc::new(Expr::Xor(lhs, rhs)),
        }
    }

    /// `(c ∧ t) ∨ (¬c ∧ e)`.
    pub fn ite(cond: Rc<Expr>, then: Rc<Expr>, else_: Rc<Expr>) -> Rc<Expr> {
        Expr::or(
            Expr::and(cond.clone(), then),
            Expr::and(Expr::not(cond), else_),
        )
    }

    /// `(a ∧ b) ∨ (a ∧ c) ∨ (b ∧ c)`.
    pub fn maj(a: Rc<Expr>, b: Rc<Expr>, c: Rc<Expr>) -> Rc<Expr> {
        Expr::or(
            Expr::or(Expr::and(a.clone(), b.clone()), Expr::and(a, c.clone())),
            Expr::and(b, c),
        )
    }
}

impl Expr {
    /// Largest variable index mentioned, if any.
    pub fn max_var(&self) -> Option<u32> {
        match self {
            Expr::Const(_) => None,
            Expr::Var(i) => Some(*i),
            Expr::Not(a) => a.max_var(),
            Expr::And(a, b) | Expr::Or(a, b) | Expr::Xor(a, b) => {
                match (a.max_var(), b.max_var()) {
                    (Some(x), Some(y)) => Some(x.max(y)),
                    (x, y) => x.or(y),
                }
            }
        }
    }

    pub fn eval(&self, assignment: &[bool]) -> bool {
        match self {
            Expr::Const(b) => *b,
            Expr::Var(i) => assignment.get(*i as usize).copied().unwrap_or(false),
            Expr::Not(a) => !a.eval(assignment),
            Expr::And(a, b) => a.eval(assignment) && b.eval(assignment),
            Expr::Or(a, b) => a.eval(assignment) || b.eval(assignment),
            Expr::Xor(a, b) => a.eval(assignment) ^ b.eval(assignment),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(b) => write!(f, "{}", *b as u8),
            Expr::Var(i) => write!(f, "x{}", i),
            Expr::Not(a) => write!(f, "!{}", a),
            Expr::And(a, b) => write!(f, "({} & {})", a, b),
            Expr::Or(a, b) => write!(f, "({} | {})", a, b),
            Expr::Xor(a, b) => write!(f, "({} ^ {})", a, b),
        }
    }
}

/// A published expression together with the number of variables it ranges over.
///
/// `num_vars` is at least one more than the largest variable mentioned,
/// but may be larger when the function does not depend on its top variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    root: Rc<Expr>,
    num_vars: u32,
}

impl Expression {
    pub fn new(root: Rc<Expr>) -> Self {
        let num_vars = root.max_var().map_or(0, |v| v + 1);
        Self { root, num_vars }
    }

    /// Like [`Expression::new`], widening the declared arity to at least `num_vars`.
    pub fn with_num_vars(root: Rc<Expr>, num_vars: u32) -> Self {
        let mut expr = Self::new(root);
        expr.num_vars = expr.num_vars.max(num_vars);
        expr
    }

    pub fn root(&self) -> &Rc<Expr> {
        &self.root
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn eval(&self, assignment: &[bool]) -> bool {
        self.root.eval(assignment)
    }

    /// Number of distinct operator nodes, shared sub-trees counted once.
    pub fn num_operators(&self) -> usize {
        fn go(e: &Rc<Expr>, seen: &mut HashSet<*const Expr>) -> usize {
            if !seen.insert(Rc::as_ptr(e)) {
                return 0;
            }
            match e.as_ref() {
                Expr::Const(_) | Expr::Var(_) => 0,
                Expr::Not(a) => 1 + go(a, seen),
                Expr::And(a, b) | Expr::Or(a, b) | Expr::Xor(a, b) => {
                    1 + go(a, seen) + go(b, seen)
                }
            }
        }
        go(&self.root, &mut HashSet::new())
    }

    pub fn to_truth_table(&self) -> TruthTable {
        let mut cache = HashMap::new();
        self.to_truth_table_(&self.root, &mut cache)
    }

    fn to_truth_table_(
        &self,
        e: &Rc<Expr>,
        cache: &mut HashMap<*const Expr, TruthTable>,
    ) -> TruthTable {
        if let Some(tt) = cache.get(&Rc::as_ptr(e)) {
            return tt.clone();
        }
        let n = self.num_vars;
        let tt = match e.as_ref() {
            Expr::Const(false) => TruthTable::zero(n),
            Expr::Const(true) => TruthTable::one(n),
            Expr::Var(i) => TruthTable::var(n, *i),
            Expr::Not(a) => !&self.to_truth_table_(a, cache),
            Expr::And(a, b) => &self.to_truth_table_(a, cache) & &self.to_truth_table_(b, cache),
            Expr::Or(a, b) => &self.to_truth_table_(a, cache) | &self.to_truth_table_(b, cache),
            Expr::Xor(a, b) => &self.to_truth_table_(a, cache) ^ &self.to_truth_table_(b, cache),
        };
        cache.insert(Rc::as_ptr(e), tt.clone());
        tt
    }

    /// Shannon expansion of a truth table, topmost variable first.
    pub fn from_truth_table(tt: &TruthTable) -> Self {
        fn go(tt: &TruthTable) -> Rc<Expr> {
            if tt.is_zero() {
                return Expr::constant(false);
            }
            if tt.is_one() {
                return Expr::constant(true);
            }
            let top = tt.num_vars() - 1;
            let (low, high) = tt.cofactors(top);
            if low == high {
                return go(&low);
            }
            let x = Expr::var(top);
            if low == !&high {
                return Expr::xor(x, go(&low));
            }
            Expr::ite(x, go(&high), go(&low))
        }
        Self::with_num_vars(go(tt), tt.num_vars())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_constructors_simplify() {
        let x = Expr::var(0);
        assert_eq!(Expr::not(Expr::not(x.clone())), x);
        assert_eq!(*Expr::and(x.clone(), Expr::constant(false)), Expr::Const(false));
        assert_eq!(Expr::or(Expr::constant(false), x.clone()), x);
        assert_eq!(*Expr::xor(Expr::constant(true), x.clone()), Expr::Not(x));
    }

    #[test]
    fn test_display() {
        let e = Expr::and(Expr::var(0), Expr::not(Expr::xor(Expr::var(1), Expr::var(2))));
        assert_eq!(e.to_string(), "(x0 & !(x1 ^ x2))");
    }

    #[test]
    fn test_num_vars() {
        let e = Expression::new(Expr::or(Expr::var(0), Expr::var(3)));
        assert_eq!(e.num_vars(), 4);
        let c = Expression::new(Expr::constant(true));
        assert_eq!(c.num_vars(), 0);
        let w = Expression::with_num_vars(Expr::var(0), 3);
        assert_eq!(w.num_vars(), 3);
    }

    #[test]
    fn test_to_truth_table() {
        let e = Expression::new(Expr::maj(Expr::var(0), Expr::var(1), Expr::var(2)));
        assert_eq!(e.to_truth_table().to_string(), "11101000");
    }

    #[test]
    fn test_from_truth_table_roundtrip() {
        for bits in ["0110", "1000", "1110", "0001", "11101000", "10010110", "01000000", "1111"] {
            let tt = TruthTable::from_binary(bits).unwrap();
            let e = Expression::from_truth_table(&tt);
            assert_eq!(e.num_vars(), tt.num_vars());
            assert_eq!(e.to_truth_table(), tt, "expression {}", e);
        }
    }

    #[test]
    fn test_shared_subtrees_counted_once() {
        let shared = Expr::and(Expr::var(0), Expr::var(1));
        let e = Expression::new(Expr::or(shared.clone(), Expr::not(shared)));
        assert_eq!(e.num_operators(), 3);
    }
}
