//! Reversible circuits with hierarchical modules, and their cost models.

pub mod circuit;
pub mod cost;
pub mod flatten;
