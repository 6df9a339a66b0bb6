//! Representation values and their tags.
//!
//! A [`Repr`] holds exactly one representation of a Boolean function (or of a
//! multi-output logic network); its [`Tag`] is derived from the variant and
//! selects the store entry, converters and presentation handlers.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::bdd::{Bdd, BddConfig};
use crate::error::{Error, Result};
use crate::expr::{Expr, Expression};
use crate::network::{Network, NetworkKind, Simulator};
use crate::reference::Ref;
use crate::truth_table::TruthTable;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Tag {
    TruthTable,
    Expression,
    BddSet,
    Aig,
    Mig,
    Xmg,
}

impl Tag {
    pub const ALL: [Tag; 6] = [
        Tag::TruthTable,
        Tag::Expression,
        Tag::BddSet,
        Tag::Aig,
        Tag::Mig,
        Tag::Xmg,
    ];

    /// Short name, as used on command lines.
    pub fn name(self) -> &'static str {
        match self {
            Tag::TruthTable => "tt",
            Tag::Expression => "expr",
            Tag::BddSet => "bdd",
            Tag::Aig => "aig",
            Tag::Mig => "mig",
            Tag::Xmg => "xmg",
        }
    }

    pub fn from_name(name: &str) -> Option<Tag> {
        Tag::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn network_kind(self) -> Option<NetworkKind> {
        match self {
            Tag::Aig => Some(NetworkKind::Aig),
            Tag::Mig => Some(NetworkKind::Mig),
            Tag::Xmg => Some(NetworkKind::Xmg),
            _ => None,
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Tag::TruthTable => "truth table",
            Tag::Expression => "expression",
            Tag::BddSet => "BDD",
            Tag::Aig => "AIG",
            Tag::Mig => "MIG",
            Tag::Xmg => "XMG",
        };
        write!(f, "{}", s)
    }
}

/// A set of BDDs sharing one manager, one root per output.
///
/// The manager is owned by the set, so roots can only be created through
/// [`BddSet::build`] and never refer into a foreign manager.
#[derive(Debug)]
pub struct BddSet {
    manager: Bdd,
    roots: Vec<Ref>,
    num_vars: u32,
}

impl BddSet {
    /// Create a fresh manager and let `f` build the roots in it.
    ///
    /// The manager is dropped if `f` fails.
    pub fn build(
        num_vars: u32,
        config: BddConfig,
        f: impl FnOnce(&Bdd) -> Result<Vec<Ref>>,
    ) -> Result<Self> {
        let manager = Bdd::with_config(config);
        let roots = f(&manager)?;
        let num_vars = num_vars.max(manager.num_vars());
        Ok(Self {
            manager,
            roots,
            num_vars,
        })
    }

    /// BDDs of the outputs of `network`; input `i` becomes variable `i + 1`.
    pub fn from_network(network: &Network, config: BddConfig) -> Result<Self> {
        BddSet::build(network.num_inputs() as u32, config, |bdd| {
            network.simulate_with(&BddSimulator::new(bdd))
        })
    }

    /// Single-root set for `expr`; variable `x{i}` becomes BDD variable `i + 1`.
    pub fn from_expression(expr: &Expression, config: BddConfig) -> Result<Self> {
        fn go(bdd: &Bdd, e: &Rc<Expr>, cache: &mut HashMap<*const Expr, Ref>) -> Result<Ref> {
            if let Some(&r) = cache.get(&Rc::as_ptr(e)) {
                return Ok(r);
            }
            let r = match e.as_ref() {
                Expr::Const(true) => bdd.one(),
                Expr::Const(false) => bdd.zero(),
                Expr::Var(i) => bdd.try_mk_var(i + 1)?,
                Expr::Not(a) => bdd.apply_not(go(bdd, a, cache)?),
                Expr::And(a, b) => {
                    let (a, b) = (go(bdd, a, cache)?, go(bdd, b, cache)?);
                    bdd.try_apply_and(a, b)?
                }
                Expr::Or(a, b) => {
                    let (a, b) = (go(bdd, a, cache)?, go(bdd, b, cache)?);
                    bdd.try_apply_or(a, b)?
                }
                Expr::Xor(a, b) => {
                    let (a, b) = (go(bdd, a, cache)?, go(bdd, b, cache)?);
                    bdd.try_apply_xor(a, b)?
                }
            };
            cache.insert(Rc::as_ptr(e), r);
            Ok(r)
        }

        BddSet::build(expr.num_vars(), config, |bdd| {
            Ok(vec![go(bdd, expr.root(), &mut HashMap::new())?])
        })
    }

    pub fn manager(&self) -> &Bdd {
        &self.manager
    }

    pub fn roots(&self) -> &[Ref] {
        &self.roots
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn num_outputs(&self) -> usize {
        self.roots.len()
    }

    /// Nodes reachable from any root, terminal included.
    pub fn num_nodes(&self) -> usize {
        self.manager.descendants(self.roots.iter().copied()).len()
    }

    pub fn eval(&self, output: usize, assignment: &[bool]) -> bool {
        self.manager.eval(self.roots[output], assignment)
    }

    pub fn truth_tables(&self) -> Vec<TruthTable> {
        self.roots
            .iter()
            .map(|&r| TruthTable::from_fn(self.num_vars, |x| self.manager.eval(r, x)))
            .collect()
    }

    /// Expression for output `output` by Shannon expansion along the diagram.
    pub fn to_expression(&self, output: usize) -> Expression {
        let mut cache = HashMap::new();
        let root = self.expr_of(self.roots[output], &mut cache);
        Expression::with_num_vars(root, self.num_vars)
    }

    fn expr_of(&self, node: Ref, cache: &mut HashMap<u32, Rc<Expr>>) -> Rc<Expr> {
        if self.manager.is_zero(node) {
            return Expr::constant(false);
        }
        if self.manager.is_one(node) {
            return Expr::constant(true);
        }

        let index = node.index();
        let e = match cache.get(&index) {
            Some(e) => e.clone(),
            None => {
                let v = self.manager.variable(index);
                let high = self.expr_of(self.manager.high(index), cache);
                let low = self.expr_of(self.manager.low(index), cache);
                let e = Expr::ite(Expr::var(v - 1), high, low);
                cache.insert(index, e.clone());
                e
            }
        };

        if node.is_negated() {
            Expr::not(e)
        } else {
            e
        }
    }
}

/// Simulates a network symbolically in a BDD manager.
pub struct BddSimulator<'a> {
    bdd: &'a Bdd,
}

impl<'a> BddSimulator<'a> {
    pub fn new(bdd: &'a Bdd) -> Self {
        Self { bdd }
    }
}

impl Simulator for BddSimulator<'_> {
    type Value = Ref;
    type Error = Error;

    fn zero(&self) -> Ref {
        self.bdd.zero()
    }

    fn not(&self, a: &Ref) -> Ref {
        self.bdd.apply_not(*a)
    }

    fn input(&self, index: usize) -> Result<Ref> {
        self.bdd.try_mk_var(index as u32 + 1)
    }

    fn and(&self, a: &Ref, b: &Ref) -> Result<Ref> {
        self.bdd.try_apply_and(*a, *b)
    }

    fn xor(&self, a: &Ref, b: &Ref) -> Result<Ref> {
        self.bdd.try_apply_xor(*a, *b)
    }

    fn maj(&self, a: &Ref, b: &Ref, c: &Ref) -> Result<Ref> {
        self.bdd.try_apply_maj(*a, *b, *c)
    }
}

#[derive(Debug)]
pub enum Repr {
    TruthTable(TruthTable),
    Expression(Expression),
    BddSet(BddSet),
    Aig(Network),
    Mig(Network),
    Xmg(Network),
}

impl Repr {
    pub fn tag(&self) -> Tag {
        match self {
            Repr::TruthTable(_) => Tag::TruthTable,
            Repr::Expression(_) => Tag::Expression,
            Repr::BddSet(_) => Tag::BddSet,
            Repr::Aig(_) => Tag::Aig,
            Repr::Mig(_) => Tag::Mig,
            Repr::Xmg(_) => Tag::Xmg,
        }
    }

    pub fn as_truth_table(&self) -> Option<&TruthTable> {
        match self {
            Repr::TruthTable(tt) => Some(tt),
            _ => None,
        }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Repr::Expression(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_bdd_set(&self) -> Option<&BddSet> {
        match self {
            Repr::BddSet(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_network(&self) -> Option<&Network> {
        match self {
            Repr::Aig(n) | Repr::Mig(n) | Repr::Xmg(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_network_mut(&mut self) -> Option<&mut Network> {
        match self {
            Repr::Aig(n) | Repr::Mig(n) | Repr::Xmg(n) => Some(n),
            _ => None,
        }
    }

    /// Truth table of every output.
    pub fn truth_tables(&self) -> Vec<TruthTable> {
        match self {
            Repr::TruthTable(tt) => vec![tt.clone()],
            Repr::Expression(e) => vec![e.to_truth_table()],
            Repr::BddSet(b) => b.truth_tables(),
            Repr::Aig(n) | Repr::Mig(n) | Repr::Xmg(n) => n.truth_tables(),
        }
    }
}

impl From<TruthTable> for Repr {
    fn from(tt: TruthTable) -> Self {
        Repr::TruthTable(tt)
    }
}

impl From<Expression> for Repr {
    fn from(e: Expression) -> Self {
        Repr::Expression(e)
    }
}

impl From<BddSet> for Repr {
    fn from(b: BddSet) -> Self {
        Repr::BddSet(b)
    }
}

/// The variant is chosen by the network's kind.
impl From<Network> for Repr {
    fn from(n: Network) -> Self {
        match n.kind() {
            NetworkKind::Aig => Repr::Aig(n),
            NetworkKind::Mig => Repr::Mig(n),
            NetworkKind::Xmg => Repr::Xmg(n),
        }
    }
}
