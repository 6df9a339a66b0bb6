//! Error types for store, conversion and cost operations.

use std::io;

use thiserror::Error;

use crate::repr::Tag;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The store holds no current value for the tag
    #[error("no current {tag} in store")]
    NoCurrentValue { tag: Tag },

    #[error("index {index} out of range for {tag} store with {len} entries")]
    IndexOutOfRange { tag: Tag, index: usize, len: usize },

    #[error("no conversion from {from} to {to}")]
    ConversionUnavailable { from: Tag, to: Tag },

    /// The source has no output to convert into a single-output target
    #[error("cannot convert {from} without outputs to {to}")]
    NoOutputs { from: Tag, to: Tag },

    /// The BDD unique table ran out of room
    #[error("BDD storage is full ({capacity} nodes)")]
    BddCapacityExceeded { capacity: usize },

    #[error("circuit refers to module '{0}' from within itself")]
    CyclicModuleReference(String),

    #[error("unknown cost function: {0}")]
    UnknownCostFunction(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
