use std::collections::HashMap;

use num_bigint::BigUint;

use crate::bdd::Bdd;
use crate::reference::Ref;

impl Bdd {
    /// Number of satisfying assignments of `node` over `num_vars` variables.
    pub fn sat_count(&self, node: Ref, num_vars: usize) -> BigUint {
        let mut cache = HashMap::new();
        let max = BigUint::from(1u32) << num_vars;
        self.sat_count_(node, &max, &mut cache)
    }

    fn sat_count_(&self, node: Ref, max: &BigUint, cache: &mut HashMap<Ref, BigUint>) -> BigUint {
        if self.is_zero(node) {
            return BigUint::ZERO;
        } else if self.is_one(node) {
            return max.clone();
        }

        if let Some(count) = cache.get(&node) {
            return count.clone();
        }

        let low = self.low(node.index());
        let high = self.high(node.index());

        let count_low = self.sat_count_(low, max, cache);
        let count_high = self.sat_count_(high, max, cache);

        let count: BigUint = (count_low + count_high) >> 1;
        let count = if node.is_negated() { max - count } else { count };

        cache.insert(node, count.clone());
        count
    }

    /// Number of paths from `node` to either terminal.
    pub fn path_count(&self, node: Ref) -> BigUint {
        let mut cache = HashMap::new();
        self.path_count_(node.index(), &mut cache)
    }

    fn path_count_(&self, index: u32, cache: &mut HashMap<u32, BigUint>) -> BigUint {
        if index == self.one().index() {
            return BigUint::from(1u32);
        }
        if let Some(count) = cache.get(&index) {
            return count.clone();
        }
        let count = self.path_count_(self.low(index).index(), cache)
            + self.path_count_(self.high(index).index(), cache);
        cache.insert(index, count.clone());
        count
    }

    /// Number of paths from `node` to the one terminal.
    pub fn path_count_to_one(&self, node: Ref) -> BigUint {
        let mut cache = HashMap::new();
        self.path_count_to_one_(node, &mut cache)
    }

    fn path_count_to_one_(&self, node: Ref, cache: &mut HashMap<Ref, BigUint>) -> BigUint {
        if self.is_zero(node) {
            return BigUint::ZERO;
        } else if self.is_one(node) {
            return BigUint::from(1u32);
        }
        if let Some(count) = cache.get(&node) {
            return count.clone();
        }
        let count = self.path_count_to_one_(self.low_node(node), cache)
            + self.path_count_to_one_(self.high_node(node), cache);
        cache.insert(node, count.clone());
        count
    }
}
