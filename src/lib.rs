//! # logic-workbench: Boolean function representations in Rust
//!
//! **`logic-workbench`** is the core of a logic-synthesis workbench. Boolean functions and
//! logic networks move between interchangeable representations, and reversible circuits
//! with hierarchical modules are scored by pluggable cost models.
//!
//! ## Representations
//!
//! Every value in the workbench is a [`Repr`][crate::repr::Repr], tagged by one of:
//!
//! - **Truth tables** ([`truth_table`]): bit vectors of `2^n` function values.
//! - **Expressions** ([`expr`]): immutable AND/OR/XOR/NOT trees with structural sharing.
//! - **BDD sets** ([`repr::BddSet`]): several roots in one exclusively owned [`Bdd`][crate::bdd::Bdd] manager.
//! - **AIGs, MIGs and XMGs** ([`network`]): structurally hashed logic networks built from
//!   AND, majority, or majority and XOR gates.
//!
//! ## Key Features
//!
//! - **Store with a cursor**: the [`Store`][crate::store::Store] keeps an ordered history per tag and a current value.
//! - **Conversion matrix**: direct conversions between representations ([`convert`]), value-preserving and output-order-preserving.
//!   There is no automatic chaining: an undefined pair is an error, not a detour.
//! - **Uniform statistics**: every graph-shaped value reports `inputs`, `outputs`, `size` and `depth` ([`present`]).
//! - **Hierarchical costs**: by-circuit and by-gate cost functions over circuits with nested modules ([`reversible::cost`]).
//!
//! ## Basic Usage
//!
//! ```rust
//! use logic_workbench::repr::Tag;
//! use logic_workbench::store::Store;
//! use logic_workbench::truth_table::TruthTable;
//!
//! let mut store = Store::new();
//!
//! // 1. Add a 3-input majority function
//! store.add(TruthTable::from_binary("11101000").unwrap());
//!
//! // 2. Convert it along the matrix: truth table -> AIG -> MIG
//! store.convert(Tag::TruthTable, Tag::Aig).unwrap();
//! store.convert(Tag::Aig, Tag::Mig).unwrap();
//!
//! // 3. The function survives every step
//! let mig = store.current(Tag::Mig).unwrap();
//! assert_eq!(mig.truth_tables()[0].to_hex(), "e8");
//!
//! // 4. There is no direct path from truth tables to BDDs
//! assert!(store.convert(Tag::TruthTable, Tag::BddSet).is_err());
//! ```
//!
//! ## Core Components
//!
//! - **[`bdd`]**: The ROBDD manager with complement edges, used by BDD sets.
//! - **[`network`]**: AIG/MIG/XMG networks, simulation and conversion between kinds.
//! - **[`store`]**, **[`convert`]**, **[`present`]**: the registry and its handlers.
//! - **[`reversible`]**: Reversible circuits, flattening, and cost evaluation.

pub mod bdd;
pub mod cache;
pub mod convert;
pub mod error;
pub mod expr;
pub mod gate;
pub mod network;
pub mod present;
pub mod reference;
pub mod repr;
pub mod reversible;
pub mod sat;
pub mod signal;
pub mod store;
pub mod table;
pub mod truth_table;
pub mod utils;

pub use error::{Error, Result};
