use std::fmt::{Display, Formatter};
use std::ops::Neg;

/// Handle to a node of a [`Bdd`][crate::bdd::Bdd] manager.
///
/// The sign carries the complement bit: `-r` is the negation of `r`.
/// A `Ref` is only meaningful for the manager that produced it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Ref(i32);

impl Ref {
    pub const fn positive(index: u32) -> Self {
        assert!(index != 0, "Index should not be zero");
        Self(index as i32)
    }

    pub const fn negative(index: u32) -> Self {
        assert!(index != 0, "Index should not be zero");
        Self(-(index as i32))
    }

    pub const fn is_negated(self) -> bool {
        self.0 < 0
    }

    pub const fn negate(self) -> Self {
        Self(-self.0)
    }

    /// Return the regular (non-complemented) version of the reference.
    pub const fn regular(self) -> Self {
        Self(self.0.abs())
    }

    /// Return the index of the referenced node in the storage.
    pub const fn index(self) -> u32 {
        self.0.unsigned_abs()
    }

    /// Return the internal representation of the reference.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Literal-style encoding `2 * index + negated`, used for hashing.
    pub const fn unsigned(self) -> u32 {
        (self.0.unsigned_abs() << 1) + (self.0 < 0) as u32
    }
}

impl Neg for Ref {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}@{}",
            if self.is_negated() { "~" } else { "" },
            self.index()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negation() {
        let r = Ref::positive(5);
        assert!(!r.is_negated());
        assert!((-r).is_negated());
        assert_eq!(-(-r), r);
        assert_eq!((-r).index(), 5);
        assert_eq!((-r).regular(), r);
    }

    #[test]
    fn test_unsigned() {
        assert_eq!(Ref::positive(3).unsigned(), 6);
        assert_eq!(Ref::negative(3).unsigned(), 7);
    }

    #[test]
    fn test_display() {
        assert_eq!(Ref::positive(2).to_string(), "@2");
        assert_eq!(Ref::negative(2).to_string(), "~@2");
    }
}
