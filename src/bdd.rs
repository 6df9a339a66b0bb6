//! Reduced ordered BDD manager with complement edges.
//!
//! All nodes live in a single hash-consed [`Table`] owned by the [`Bdd`]
//! manager and are addressed through [`Ref`] handles. The high edge of a
//! stored node is never complemented, which keeps the representation
//! canonical for a fixed variable order (variable 1 is topmost).
//!
//! ```
//! use logic_workbench::bdd::Bdd;
//!
//! let bdd = Bdd::default();
//! let x1 = bdd.mk_var(1);
//! let x2 = bdd.mk_var(2);
//! let f = bdd.apply_and(x1, -x2);
//!
//! assert!(bdd.eval(f, &[true, false]));
//! assert!(!bdd.eval(f, &[true, true]));
//! ```

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;

use log::debug;

use crate::cache::Cache;
use crate::error::{Error, Result};
use crate::reference::Ref;
use crate::table::Table;
use crate::utils::{pairing3, MyHash};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Node {
    variable: u32,
    low: Ref,
    high: Ref,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            variable: 0,
            low: Ref::negative(1),
            high: Ref::negative(1),
        }
    }
}

impl MyHash for Node {
    fn hash(&self) -> u64 {
        pairing3(
            self.variable as u64,
            self.low.unsigned() as u64,
            self.high.unsigned() as u64,
        )
    }
}

/// Sizing of a [`Bdd`] manager.
///
/// ```
/// use logic_workbench::bdd::{Bdd, BddConfig};
///
/// let config = BddConfig::default().with_storage_bits(16).with_cache_bits(10);
/// let bdd = Bdd::with_config(config);
/// assert_eq!(bdd.capacity(), 1 << 16);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BddConfig {
    /// The unique table holds at most `2^storage_bits` nodes.
    pub storage_bits: usize,
    /// The computed cache has `2^cache_bits` slots.
    pub cache_bits: usize,
}

impl Default for BddConfig {
    fn default() -> Self {
        Self {
            storage_bits: 20,
            cache_bits: 14,
        }
    }
}

impl BddConfig {
    pub fn with_storage_bits(mut self, storage_bits: usize) -> Self {
        self.storage_bits = storage_bits;
        self
    }

    pub fn with_cache_bits(mut self, cache_bits: usize) -> Self {
        self.cache_bits = cache_bits;
        self
    }
}

pub struct Bdd {
    storage: RefCell<Table<Node>>,
    cache: RefCell<Cache<(Ref, Ref, Ref), Ref>>,
    num_vars: Cell<u32>,
    zero: Ref,
    one: Ref,
}

impl Bdd {
    pub fn new(storage_bits: usize) -> Self {
        Self::with_config(BddConfig::default().with_storage_bits(storage_bits))
    }

    pub fn with_config(config: BddConfig) -> Self {
        assert!(
            (1..=31).contains(&config.storage_bits),
            "Storage bits should be in the range 1..=31"
        );

        let mut storage = Table::new(config.storage_bits);

        // Allocate the terminal node:
        let one = storage.add(Node::default());
        assert_eq!(one, Some(1)); // Make sure the terminal node is (1).
        let one = Ref::positive(1);

        Self {
            storage: RefCell::new(storage),
            cache: RefCell::new(Cache::new(config.cache_bits.min(config.storage_bits))),
            num_vars: Cell::new(0),
            zero: -one,
            one,
        }
    }
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::with_config(BddConfig::default())
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let storage = self.storage.borrow();
        f.debug_struct("Bdd")
            .field("capacity", &storage.capacity())
            .field("size", &storage.size())
            .field("num_vars", &self.num_vars.get())
            .finish()
    }
}

impl Bdd {
    pub fn zero(&self) -> Ref {
        self.zero
    }
    pub fn one(&self) -> Ref {
        self.one
    }

    /// Maximum number of nodes the manager can hold.
    pub fn capacity(&self) -> usize {
        self.storage.borrow().capacity()
    }
    /// Number of nodes allocated so far, terminal included.
    pub fn num_nodes(&self) -> usize {
        self.storage.borrow().size()
    }
    /// Largest variable created with [`Bdd::mk_var`] or [`Bdd::mk_node`].
    pub fn num_vars(&self) -> u32 {
        self.num_vars.get()
    }

    /// Variable of the node at `index` (0 for the terminal).
    pub fn variable(&self, index: u32) -> u32 {
        self.storage.borrow().value(index as usize).variable
    }
    pub fn low(&self, index: u32) -> Ref {
        self.storage.borrow().value(index as usize).low
    }
    pub fn high(&self, index: u32) -> Ref {
        self.storage.borrow().value(index as usize).high
    }

    pub fn low_node(&self, node: Ref) -> Ref {
        let low = self.low(node.index());
        if node.is_negated() {
            -low
        } else {
            low
        }
    }
    pub fn high_node(&self, node: Ref) -> Ref {
        let high = self.high(node.index());
        if node.is_negated() {
            -high
        } else {
            high
        }
    }

    pub fn is_zero(&self, node: Ref) -> bool {
        node == self.zero
    }
    pub fn is_one(&self, node: Ref) -> bool {
        node == self.one
    }
    pub fn is_terminal(&self, node: Ref) -> bool {
        node.index() == self.one.index()
    }

    /// Find or create the node `(v, low, high)`.
    ///
    /// Fails with [`Error::BddCapacityExceeded`] if the node is new and the unique table is full.
    pub fn try_mk_node(&self, v: u32, low: Ref, high: Ref) -> Result<Ref> {
        debug!("mk(v = {}, low = {}, high = {})", v, low, high);

        assert_ne!(v, 0, "Variable index should not be zero");

        // Handle canonicity
        if high.is_negated() {
            return Ok(-self.try_mk_node(v, -low, -high)?);
        }

        // Handle duplicates
        if low == high {
            return Ok(low);
        }

        let mut storage = self.storage.borrow_mut();
        let i = storage
            .put(Node {
                variable: v,
                low,
                high,
            })
            .ok_or_else(|| Error::BddCapacityExceeded {
                capacity: storage.capacity(),
            })?;

        if v > self.num_vars.get() {
            self.num_vars.set(v);
        }
        Ok(Ref::positive(i as u32))
    }

    pub fn try_mk_var(&self, v: u32) -> Result<Ref> {
        assert_ne!(v, 0, "Variable index should not be zero");
        self.try_mk_node(v, self.zero, self.one)
    }

    fn top_cofactors(&self, node: Ref, v: u32) -> (Ref, Ref) {
        if self.is_terminal(node) || v < self.variable(node.index()) {
            return (node, node);
        }
        (self.low_node(node), self.high_node(node))
    }

    /// Apply the ITE operation to the arguments.
    ///
    /// ```text
    /// ITE(x, y, z) = (x ∧ y) ∨ (¬x ∧ z)
    /// ```
    pub fn try_apply_ite(&self, f: Ref, g: Ref, h: Ref) -> Result<Ref> {
        debug!("apply_ite(f = {}, g = {}, h = {})", f, g, h);

        // Base cases:
        //   ite(1,G,H) => G
        //   ite(0,G,H) => H
        //   ite(F,G,G) => G
        //   ite(F,1,0) => F
        //   ite(F,0,1) => ~F
        if self.is_one(f) {
            return Ok(g);
        }
        if self.is_zero(f) {
            return Ok(h);
        }
        if g == h {
            return Ok(g);
        }
        if self.is_one(g) && self.is_zero(h) {
            return Ok(f);
        }
        if self.is_zero(g) && self.is_one(h) {
            return Ok(-f);
        }

        // Standard triples:
        //   ite(F,F,H) => ite(F,1,H)
        //   ite(F,G,F) => ite(F,G,0)
        //   ite(F,~F,H) => ite(F,0,H)
        //   ite(F,G,~F) => ite(F,G,1)
        if g == f {
            return self.try_apply_ite(f, self.one, h);
        }
        if h == f {
            return self.try_apply_ite(f, g, self.zero);
        }
        if g == -f {
            return self.try_apply_ite(f, self.zero, h);
        }
        if h == -f {
            return self.try_apply_ite(f, g, self.one);
        }

        // Make sure the first two pointers (f and g) are regular (not negated):
        //   ite(~F,G,H) => ite(F,H,G)
        //   ite(F,~G,H) => ~ite(F,G,~H)
        let (mut f, mut g, mut h) = (f, g, h);
        if f.is_negated() {
            f = -f;
            std::mem::swap(&mut g, &mut h);
        }
        let mut n = false;
        if g.is_negated() {
            n = true;
            g = -g;
            h = -h;
        }

        let key = (f, g, h);
        if let Some(&res) = self.cache.borrow().get(&key) {
            debug!("cache: apply_ite{:?} -> {}", key, res);
            return Ok(if n { -res } else { res });
        }

        // Determine the top variable (terminals have variable 0):
        let mut m = self.variable(f.index());
        for r in [g, h] {
            if !self.is_terminal(r) {
                m = m.min(self.variable(r.index()));
            }
        }
        assert_ne!(m, 0);

        let (f0, f1) = self.top_cofactors(f, m);
        let (g0, g1) = self.top_cofactors(g, m);
        let (h0, h1) = self.top_cofactors(h, m);

        let e = self.try_apply_ite(f0, g0, h0)?;
        let t = self.try_apply_ite(f1, g1, h1)?;

        let res = self.try_mk_node(m, e, t)?;
        debug!("computed: apply_ite{:?} -> {}", key, res);
        self.cache.borrow_mut().insert(key, res);

        Ok(if n { -res } else { res })
    }

    pub fn try_apply_and(&self, u: Ref, v: Ref) -> Result<Ref> {
        self.try_apply_ite(u, v, self.zero)
    }

    pub fn try_apply_or(&self, u: Ref, v: Ref) -> Result<Ref> {
        self.try_apply_ite(u, self.one, v)
    }

    pub fn try_apply_xor(&self, u: Ref, v: Ref) -> Result<Ref> {
        self.try_apply_ite(u, -v, v)
    }

    /// Majority of three functions: `(u ∧ v) ∨ (u ∧ w) ∨ (v ∧ w)`.
    pub fn try_apply_maj(&self, u: Ref, v: Ref, w: Ref) -> Result<Ref> {
        let v_or_w = self.try_apply_or(v, w)?;
        let v_and_w = self.try_apply_and(v, w)?;
        self.try_apply_ite(u, v_or_w, v_and_w)
    }

    pub fn apply_not(&self, f: Ref) -> Ref {
        -f
    }
}

/// Infallible variants of the operations above.
///
/// # Panics
///
/// All of them panic when the unique table is full.
impl Bdd {
    pub fn mk_node(&self, v: u32, low: Ref, high: Ref) -> Ref {
        unwrap_full(self.try_mk_node(v, low, high))
    }

    pub fn mk_var(&self, v: u32) -> Ref {
        unwrap_full(self.try_mk_var(v))
    }

    pub fn apply_ite(&self, f: Ref, g: Ref, h: Ref) -> Ref {
        unwrap_full(self.try_apply_ite(f, g, h))
    }

    pub fn apply_and(&self, u: Ref, v: Ref) -> Ref {
        unwrap_full(self.try_apply_and(u, v))
    }

    pub fn apply_or(&self, u: Ref, v: Ref) -> Ref {
        unwrap_full(self.try_apply_or(u, v))
    }

    pub fn apply_xor(&self, u: Ref, v: Ref) -> Ref {
        unwrap_full(self.try_apply_xor(u, v))
    }

    pub fn apply_maj(&self, u: Ref, v: Ref, w: Ref) -> Ref {
        unwrap_full(self.try_apply_maj(u, v, w))
    }
}

fn unwrap_full(result: Result<Ref>) -> Ref {
    match result {
        Ok(r) => r,
        Err(e) => panic!("{}", e),
    }
}

impl Bdd {
    /// Evaluate `f` under an assignment, where `assignment[i]` is the value of variable `i + 1`.
    ///
    /// Variables beyond the end of the assignment are taken as false.
    pub fn eval(&self, f: Ref, assignment: &[bool]) -> bool {
        let mut current = f;
        while !self.is_terminal(current) {
            let v = self.variable(current.index()) as usize;
            current = if assignment.get(v - 1).copied().unwrap_or(false) {
                self.high_node(current)
            } else {
                self.low_node(current)
            };
        }
        self.is_one(current)
    }
}

// Structural analysis
impl Bdd {
    /// Indices of all nodes reachable from `nodes`, terminal included.
    pub fn descendants(&self, nodes: impl IntoIterator<Item = Ref>) -> HashSet<u32> {
        let mut visited = HashSet::new();
        visited.insert(self.one.index());
        let mut queue = VecDeque::from_iter(nodes);

        while let Some(node) = queue.pop_front() {
            let i = node.index();
            if visited.insert(i) {
                queue.push_back(self.low(i));
                queue.push_back(self.high(i));
            }
        }

        visited
    }

    /// Number of nodes of `f`, terminal included.
    pub fn size(&self, f: Ref) -> u64 {
        self.descendants([f]).len() as u64
    }

    /// Number of decision nodes per variable, for variables `1..=num_vars`.
    pub fn level_sizes(&self, roots: &[Ref], num_vars: u32) -> Vec<usize> {
        let num_vars = num_vars.max(self.num_vars());
        let mut sizes = vec![0; num_vars as usize];
        for i in self.descendants(roots.iter().copied()) {
            let v = self.variable(i);
            if v != 0 {
                sizes[v as usize - 1] += 1;
            }
        }
        sizes
    }

    /// Largest number of decision nodes on a path from a root to a terminal.
    pub fn depth(&self, roots: &[Ref]) -> usize {
        let mut cache = HashMap::new();
        roots
            .iter()
            .map(|&r| self.depth_(r.index(), &mut cache))
            .max()
            .unwrap_or(0)
    }

    fn depth_(&self, index: u32, cache: &mut HashMap<u32, usize>) -> usize {
        if index == self.one.index() {
            return 0;
        }
        if let Some(&d) = cache.get(&index) {
            return d;
        }
        let low = self.depth_(self.low(index).index(), cache);
        let high = self.depth_(self.high(index).index(), cache);
        let d = 1 + low.max(high);
        cache.insert(index, d);
        d
    }

    /// Largest number of incoming edges of a decision node, root references included.
    pub fn max_fanout(&self, roots: &[Ref]) -> usize {
        let mut fanout: HashMap<u32, usize> = HashMap::new();
        for r in roots {
            *fanout.entry(r.index()).or_default() += 1;
        }
        for i in self.descendants(roots.iter().copied()) {
            if i == self.one.index() {
                continue;
            }
            *fanout.entry(self.low(i).index()).or_default() += 1;
            *fanout.entry(self.high(i).index()).or_default() += 1;
        }
        fanout.remove(&self.one.index());
        fanout.into_values().max().unwrap_or(0)
    }

    /// Number of complemented edges: low edges of reachable nodes plus complemented roots.
    pub fn complement_edges(&self, roots: &[Ref]) -> usize {
        let internal = self
            .descendants(roots.iter().copied())
            .into_iter()
            .filter(|&i| i != self.one.index() && self.low(i).is_negated())
            .count();
        internal + roots.iter().filter(|r| r.is_negated()).count()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_var() {
        let bdd = Bdd::default();

        let x = bdd.mk_var(1);

        assert_eq!(bdd.variable(x.index()), 1);
        assert_eq!(bdd.high_node(x), bdd.one());
        assert_eq!(bdd.low_node(x), bdd.zero());
        assert_eq!(bdd.num_vars(), 1);
    }

    #[test]
    fn test_not_var() {
        let bdd = Bdd::default();

        let x = bdd.mk_var(1);
        let not_x = -x;

        assert_eq!(bdd.variable(not_x.index()), 1);
        assert_eq!(bdd.high_node(not_x), bdd.zero());
        assert_eq!(bdd.low_node(not_x), bdd.one());
    }

    #[test]
    fn test_terminal() {
        let bdd = Bdd::default();

        assert!(bdd.is_terminal(bdd.zero()));
        assert!(bdd.is_terminal(bdd.one()));
        assert_eq!(bdd.zero(), -bdd.one());

        let x = bdd.mk_var(1);
        assert!(!bdd.is_terminal(x));
    }

    #[test]
    fn test_de_morgan_and() {
        let bdd = Bdd::default();

        let x = bdd.mk_var(1);
        let y = bdd.mk_var(2);
        let f = -bdd.apply_and(x, y);
        let g = bdd.apply_or(-x, -y);

        assert_eq!(f, g);
    }

    #[test]
    fn test_xor_itself() {
        let bdd = Bdd::default();

        let x = bdd.mk_var(1);
        assert_eq!(bdd.apply_xor(x, x), bdd.zero());
        assert_eq!(bdd.apply_xor(x, -x), bdd.one());
        assert_eq!(-bdd.apply_xor(x, x), bdd.one());
    }

    #[test]
    fn test_apply_ite() {
        let bdd = Bdd::default();

        let x = bdd.mk_var(1);
        let y = bdd.mk_var(2);
        let z = bdd.mk_var(3);
        let f = bdd.apply_ite(x, y, z);

        let x_and_y = bdd.apply_and(x, y);
        let not_x_and_z = bdd.apply_and(-x, z);
        assert_eq!(f, bdd.apply_or(x_and_y, not_x_and_z));
    }

    #[test]
    fn test_maj_truth() {
        let bdd = Bdd::default();

        let x = bdd.mk_var(1);
        let y = bdd.mk_var(2);
        let z = bdd.mk_var(3);
        let f = bdd.apply_maj(x, y, z);

        for i in 0..8u32 {
            let a: Vec<bool> = (0..3).map(|j| (i >> j) & 1 == 1).collect();
            let expected = a.iter().filter(|&&b| b).count() >= 2;
            assert_eq!(bdd.eval(f, &a), expected, "assignment {:?}", a);
        }
    }

    #[test]
    fn test_storage_full() {
        // Room for the terminal and two nodes.
        let bdd = Bdd::new(2);

        let x = bdd.try_mk_var(1).unwrap();
        let y = bdd.try_mk_var(2).unwrap();
        assert_eq!(bdd.num_nodes(), 3);

        let z = bdd.try_mk_var(3);
        assert!(matches!(z, Err(Error::BddCapacityExceeded { capacity: 4 })));
        // x1 ^ x2 needs a fresh x1 node.
        let f = bdd.try_apply_xor(x, y);
        assert!(matches!(f, Err(Error::BddCapacityExceeded { .. })));

        // Existing nodes are still found, and operations that need nothing new succeed.
        assert_eq!(bdd.try_mk_var(2).unwrap(), y);
        assert_eq!(bdd.try_apply_and(x, bdd.one()).unwrap(), x);
        assert_eq!(bdd.num_nodes(), 3);
        assert_eq!(bdd.num_vars(), 2);
    }

    #[test]
    #[should_panic(expected = "BDD storage is full")]
    fn test_storage_full_panics() {
        let bdd = Bdd::new(1);
        bdd.mk_var(1);
    }

    #[test]
    fn test_structure() {
        let bdd = Bdd::default();

        let x = bdd.mk_var(1);
        let y = bdd.mk_var(2);
        let f = bdd.apply_xor(x, y);

        // x1 node, one x2 node shared through complement edges, and the terminal.
        assert_eq!(bdd.size(f), 3);
        assert_eq!(bdd.depth(&[f]), 2);
        assert_eq!(bdd.level_sizes(&[f], 2), vec![1, 1]);
        assert_eq!(bdd.max_fanout(&[f]), 2);
        // The low edge of x1, the low edge of x2 (to zero), and the root itself.
        assert_eq!(bdd.complement_edges(&[f]), 3);
    }
}
