//! Truth table representation for single-output Boolean functions.
//!
//! A function f: {0,1}ⁿ → {0,1} is stored as 2ⁿ bits. Bit `i` is the value of
//! `f` at the assignment where `xⱼ = (i >> j) & 1`, so `x₀` is the least
//! significant variable.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

use bitvec::prelude::*;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TruthTable {
    num_vars: u32,
    bits: BitVec<u64, Lsb0>,
}

impl TruthTable {
    /// Create a truth table by evaluating `f` on every assignment.
    pub fn from_fn(num_vars: u32, f: impl Fn(&[bool]) -> bool) -> Self {
        let size = 1usize << num_vars;
        let mut bits = BitVec::with_capacity(size);
        let mut assignment = vec![false; num_vars as usize];

        for i in 0..size {
            for (j, value) in assignment.iter_mut().enumerate() {
                *value = (i >> j) & 1 == 1;
            }
            bits.push(f(&assignment));
        }

        Self { num_vars, bits }
    }

    /// Create a truth table from raw bits.
    ///
    /// # Panics
    ///
    /// Panics if `bits.len() != 2^num_vars`.
    pub fn from_bits(num_vars: u32, bits: BitVec<u64, Lsb0>) -> Self {
        let expected = 1usize << num_vars;
        assert_eq!(
            bits.len(),
            expected,
            "Expected {} bits for {} variables, got {}",
            expected,
            num_vars,
            bits.len()
        );
        Self { num_vars, bits }
    }

    /// Parse a binary string, most significant bit (last assignment) first.
    ///
    /// Returns `None` if the length is not a power of two or a character is not `0`/`1`.
    pub fn from_binary(s: &str) -> Option<Self> {
        let len = s.len();
        if len == 0 || !len.is_power_of_two() {
            return None;
        }
        let mut bits = BitVec::with_capacity(len);
        for c in s.chars().rev() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => return None,
            }
        }
        Some(Self {
            num_vars: len.trailing_zeros(),
            bits,
        })
    }

    pub fn zero(num_vars: u32) -> Self {
        Self {
            num_vars,
            bits: bitvec![u64, Lsb0; 0; 1usize << num_vars],
        }
    }

    pub fn one(num_vars: u32) -> Self {
        Self {
            num_vars,
            bits: bitvec![u64, Lsb0; 1; 1usize << num_vars],
        }
    }

    /// Projection on variable `var` (0-based).
    pub fn var(num_vars: u32, var: u32) -> Self {
        assert!(
            var < num_vars,
            "Variable {} out of range for {}-variable function",
            var,
            num_vars
        );
        Self::from_fn(num_vars, |x| x[var as usize])
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn num_bits(&self) -> usize {
        self.bits.len()
    }

    /// Value at the assignment encoded by `index`.
    pub fn get(&self, index: usize) -> bool {
        self.bits[index]
    }

    pub fn eval(&self, assignment: &[bool]) -> bool {
        let index = assignment
            .iter()
            .take(self.num_vars as usize)
            .enumerate()
            .fold(0usize, |acc, (j, &b)| acc | ((b as usize) << j));
        self.bits[index]
    }

    /// Number of satisfying assignments.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn is_zero(&self) -> bool {
        self.bits.not_any()
    }

    pub fn is_one(&self) -> bool {
        self.bits.all()
    }

    /// Cofactors `(f|var=0, f|var=1)` as functions over the remaining `num_vars - 1` variables.
    pub fn cofactors(&self, var: u32) -> (TruthTable, TruthTable) {
        assert!(var < self.num_vars, "Variable {} out of range", var);
        let n = self.num_vars - 1;
        let size = 1usize << n;
        let mut low = BitVec::with_capacity(size);
        let mut high = BitVec::with_capacity(size);
        let lower_mask = (1usize << var) - 1;
        for i in 0..size {
            let base = (i & lower_mask) | ((i & !lower_mask) << 1);
            low.push(self.bits[base]);
            high.push(self.bits[base | (1 << var)]);
        }
        (
            TruthTable::from_bits(n, low),
            TruthTable::from_bits(n, high),
        )
    }

    /// Whether the function depends on `var`.
    pub fn has_var(&self, var: u32) -> bool {
        let (low, high) = self.cofactors(var);
        low != high
    }

    /// Extend the function to `num_vars` variables it does not depend on.
    pub fn extend_to(&self, num_vars: u32) -> TruthTable {
        assert!(num_vars >= self.num_vars, "Cannot shrink a truth table");
        let mask = (1usize << self.num_vars) - 1;
        TruthTable::from_fn(num_vars, |x| {
            let index = x
                .iter()
                .enumerate()
                .fold(0usize, |acc, (j, &b)| acc | ((b as usize) << j));
            self.bits[index & mask]
        })
    }

    /// Majority of three functions of the same arity.
    pub fn maj(a: &TruthTable, b: &TruthTable, c: &TruthTable) -> TruthTable {
        &(&(a & b) | &(a & c)) | &(b & c)
    }

    /// Hexadecimal string, most significant nibble first.
    pub fn to_hex(&self) -> String {
        let digits = self.bits.len().div_ceil(4);
        (0..digits)
            .rev()
            .map(|d| {
                let nibble = (0..4)
                    .filter(|&k| {
                        let i = 4 * d + k;
                        i < self.bits.len() && self.bits[i]
                    })
                    .fold(0u32, |acc, k| acc | (1 << k));
                char::from_digit(nibble, 16).unwrap_or('?')
            })
            .collect()
    }

    fn zip_with(&self, other: &TruthTable, op: impl Fn(bool, bool) -> bool) -> TruthTable {
        assert_eq!(
            self.num_vars, other.num_vars,
            "Truth tables have different arity"
        );
        let bits = self
            .bits
            .iter()
            .by_vals()
            .zip(other.bits.iter().by_vals())
            .map(|(a, b)| op(a, b))
            .collect();
        TruthTable {
            num_vars: self.num_vars,
            bits,
        }
    }
}

impl Not for &TruthTable {
    type Output = TruthTable;

    fn not(self) -> TruthTable {
        TruthTable {
            num_vars: self.num_vars,
            bits: !self.bits.clone(),
        }
    }
}

impl BitAnd for &TruthTable {
    type Output = TruthTable;

    fn bitand(self, rhs: Self) -> TruthTable {
        self.zip_with(rhs, |a, b| a & b)
    }
}

impl BitOr for &TruthTable {
    type Output = TruthTable;

    fn bitor(self, rhs: Self) -> TruthTable {
        self.zip_with(rhs, |a, b| a | b)
    }
}

impl BitXor for &TruthTable {
    type Output = TruthTable;

    fn bitxor(self, rhs: Self) -> TruthTable {
        self.zip_with(rhs, |a, b| a ^ b)
    }
}

impl fmt::Display for TruthTable {
    /// Binary string, most significant bit first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals().rev() {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl fmt::Debug for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TruthTable({}, {})", self.num_vars, self)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_var_and_display() {
        let x0 = TruthTable::var(2, 0);
        let x1 = TruthTable::var(2, 1);
        assert_eq!(x0.to_string(), "1010");
        assert_eq!(x1.to_string(), "1100");
        assert_eq!((&x0 & &x1).to_string(), "1000");
        assert_eq!((&x0 | &x1).to_string(), "1110");
        assert_eq!((&x0 ^ &x1).to_string(), "0110");
        assert_eq!((!&x0).to_string(), "0101");
    }

    #[test]
    fn test_from_binary() {
        let tt = TruthTable::from_binary("1000").unwrap();
        assert_eq!(tt.num_vars(), 2);
        assert!(tt.eval(&[true, true]));
        assert!(!tt.eval(&[true, false]));
        assert!(TruthTable::from_binary("100").is_none());
        assert!(TruthTable::from_binary("10x0").is_none());
    }

    #[test]
    fn test_hex() {
        let maj = TruthTable::maj(
            &TruthTable::var(3, 0),
            &TruthTable::var(3, 1),
            &TruthTable::var(3, 2),
        );
        assert_eq!(maj.to_string(), "11101000");
        assert_eq!(maj.to_hex(), "e8");
        assert_eq!(TruthTable::var(1, 0).to_hex(), "2");
    }

    #[test]
    fn test_cofactors() {
        let f = TruthTable::from_fn(3, |x| x[0] && (x[1] || x[2]));
        let (low, high) = f.cofactors(1);
        assert_eq!(low, TruthTable::from_fn(2, |x| x[0] && x[1]));
        assert_eq!(high, TruthTable::var(2, 0));
        assert!(f.has_var(2));
        assert!(!TruthTable::var(3, 0).has_var(2));
    }

    #[test]
    fn test_extend_to() {
        let x0 = TruthTable::var(1, 0);
        assert_eq!(x0.extend_to(3), TruthTable::var(3, 0));
    }

    #[test]
    fn test_count_ones() {
        assert_eq!(TruthTable::one(3).count_ones(), 8);
        assert!(TruthTable::zero(2).is_zero());
        assert!(TruthTable::one(0).is_one());
    }
}
