use std::fmt::{Debug, Display, Formatter};
use std::ops::Not;

/// Possibly complemented edge to a node of a [`Network`][crate::network::Network].
///
/// Encoded as `2 * node + complemented`; node 0 is the constant false,
/// so `Signal::zero()` and `Signal::one()` are the two constants.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Signal(u32);

// Constructors
impl Signal {
    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn one() -> Self {
        Self(1)
    }

    pub const fn from_node(node: u32) -> Self {
        Self(node << 1)
    }
}

// Getters
impl Signal {
    pub const fn node(self) -> u32 {
        self.0 >> 1
    }

    pub const fn is_const(self) -> bool {
        self.node() == 0
    }

    pub const fn is_complemented(self) -> bool {
        self.0 & 1 != 0
    }

    /// The same signal without complementation.
    pub const fn regular(self) -> Self {
        Self(self.0 & !1)
    }

    /// Complement the signal if `flag` is set.
    pub const fn complement_if(self, flag: bool) -> Self {
        Self(self.0 ^ flag as u32)
    }
}

impl From<bool> for Signal {
    fn from(b: bool) -> Self {
        if b {
            Self::one()
        } else {
            Self::zero()
        }
    }
}

impl Not for Signal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(self.0 ^ 1)
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_const() {
            write!(f, "{}", self.0 & 1)
        } else {
            if self.is_complemented() {
                write!(f, "!")?;
            }
            write!(f, "n{}", self.node())
        }
    }
}

impl Debug for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const() {
        let zero = Signal::zero();
        let one = Signal::one();

        assert!(zero.is_const());
        assert!(one.is_const());

        assert_eq!(zero, !one);
        assert_eq!(one, !zero);

        assert!(!zero.is_complemented());
        assert!(one.is_complemented());
        assert_eq!(Signal::from(true), one);
    }

    #[test]
    fn test_node() {
        let s = Signal::from_node(7);
        assert_eq!(s.node(), 7);
        assert_eq!((!s).node(), 7);
        assert!((!s).is_complemented());
        assert_eq!((!s).regular(), s);
        assert_eq!(s.complement_if(true), !s);
        assert_eq!(s.complement_if(false), s);
    }

    #[test]
    fn test_display() {
        assert_eq!(Signal::zero().to_string(), "0");
        assert_eq!(Signal::one().to_string(), "1");
        assert_eq!((!Signal::from_node(3)).to_string(), "!n3");
    }
}
