//! The conversion matrix between representations.
//!
//! Only direct conversions are offered; there is no chaining through
//! intermediate representations. Available pairs:
//!
//! | from          | to                                   |
//! |---------------|--------------------------------------|
//! | truth table   | AIG, expression                      |
//! | expression    | truth table, BDD, MIG, XMG           |
//! | BDD           | expression                           |
//! | AIG           | BDD, MIG, XMG                        |
//! | MIG           | AIG, XMG, expression                 |
//! | XMG           | AIG, MIG, expression                 |

use log::debug;

use crate::bdd::BddConfig;
use crate::error::{Error, Result};
use crate::expr::Expression;
use crate::network::{Network, NetworkKind};
use crate::repr::{BddSet, Repr, Tag};

/// Whether a direct conversion from `from` to `to` exists.
pub fn is_available(from: Tag, to: Tag) -> bool {
    use Tag::*;
    matches!(
        (from, to),
        (TruthTable, Aig)
            | (TruthTable, Expression)
            | (Expression, TruthTable)
            | (Expression, BddSet)
            | (Expression, Mig)
            | (Expression, Xmg)
            | (BddSet, Expression)
            | (Aig, BddSet)
            | (Aig, Mig)
            | (Aig, Xmg)
            | (Mig, Aig)
            | (Mig, Xmg)
            | (Mig, Expression)
            | (Xmg, Aig)
            | (Xmg, Mig)
            | (Xmg, Expression)
    )
}

/// All available `(from, to)` pairs.
pub fn available() -> Vec<(Tag, Tag)> {
    Tag::ALL
        .into_iter()
        .flat_map(|from| Tag::ALL.into_iter().map(move |to| (from, to)))
        .filter(|&(from, to)| is_available(from, to))
        .collect()
}

/// Convert `value` into the representation tagged `target`.
///
/// BDD targets get a fresh manager sized by `config`; a diagram that does not
/// fit fails with [`Error::BddCapacityExceeded`].
pub fn convert(value: &Repr, target: Tag, config: BddConfig) -> Result<Repr> {
    let source = value.tag();
    debug!("convert {} -> {}", source, target);

    let result: Repr = match (value, target) {
        (Repr::TruthTable(tt), Tag::Aig) => Network::from_truth_table(NetworkKind::Aig, tt).into(),
        (Repr::TruthTable(tt), Tag::Expression) => Expression::from_truth_table(tt).into(),

        (Repr::Expression(e), Tag::TruthTable) => e.to_truth_table().into(),
        (Repr::Expression(e), Tag::BddSet) => BddSet::from_expression(e, config)?.into(),
        (Repr::Expression(e), Tag::Mig) => Network::from_expression(NetworkKind::Mig, e).into(),
        (Repr::Expression(e), Tag::Xmg) => Network::from_expression(NetworkKind::Xmg, e).into(),

        (Repr::BddSet(b), Tag::Expression) => {
            if b.num_outputs() == 0 {
                return Err(Error::NoOutputs {
                    from: source,
                    to: target,
                });
            }
            b.to_expression(0).into()
        }

        (Repr::Aig(n), Tag::BddSet) => BddSet::from_network(n, config)?.into(),

        (Repr::Aig(n) | Repr::Mig(n) | Repr::Xmg(n), _) if is_available(source, target) => {
            match target.network_kind() {
                Some(kind) => n.convert_to(kind).into(),
                None => {
                    // network -> expression
                    if n.num_outputs() == 0 {
                        return Err(Error::NoOutputs {
                            from: source,
                            to: target,
                        });
                    }
                    n.to_expression(0).into()
                }
            }
        }

        _ => {
            return Err(Error::ConversionUnavailable {
                from: source,
                to: target,
            })
        }
    };

    debug_assert_eq!(result.tag(), target);
    Ok(result)
}
