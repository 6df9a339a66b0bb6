//! Per-representation presentation: one-line summaries, verbose reports,
//! and structured statistics records.

use std::io::{self, Write};

use serde_json::{json, Map, Value};

use crate::network::{Network, NetworkKind};
use crate::repr::{BddSet, Repr};

/// One-line description, as shown in store listings.
pub fn summarize(value: &Repr) -> String {
    match value {
        Repr::TruthTable(tt) => tt.to_string(),
        Repr::Expression(e) => e.to_string(),
        Repr::BddSet(b) => format!(
            "{} variables, {} functions, {} nodes",
            b.num_vars(),
            b.num_outputs(),
            b.num_nodes()
        ),
        Repr::Aig(n) => {
            let mut s = format!("{}   gates = {}", io_summary(n), n.num_gates());
            if n.mapping().is_some() {
                s += &format!("   luts = {}", n.num_cells());
            }
            s
        }
        Repr::Mig(n) | Repr::Xmg(n) => io_summary(n),
    }
}

fn io_summary(n: &Network) -> String {
    let name = if n.name().is_empty() { "(unnamed)" } else { n.name() };
    format!("{} i/o = {}/{}", name, n.num_inputs(), n.num_outputs())
}

fn join<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Multi-line report of `value`.
pub fn report(w: &mut impl Write, value: &Repr) -> io::Result<()> {
    match value {
        Repr::TruthTable(tt) => {
            writeln!(w, "{}", tt.to_hex())?;
            writeln!(w, "{}", tt)?;
        }
        Repr::Expression(e) => {
            writeln!(w, "{}", e)?;
            writeln!(w, "[i] no. of variables: {}", e.num_vars())?;
            writeln!(w, "[i] no. of operators: {}", e.num_operators())?;
        }
        Repr::BddSet(b) => report_bdd(w, b)?,
        Repr::Aig(n) | Repr::Mig(n) | Repr::Xmg(n) => report_network(w, n)?,
    }
    Ok(())
}

fn report_bdd(w: &mut impl Write, b: &BddSet) -> io::Result<()> {
    let bdd = b.manager();
    let roots = b.roots();
    let minterms = roots.iter().map(|&r| bdd.sat_count(r, b.num_vars() as usize));

    writeln!(w, "[i] no. of variables: {}", b.num_vars())?;
    writeln!(w, "[i] no. of nodes:     {}", b.num_nodes())?;
    writeln!(w, "[i] no. of minterms:  {}", join(minterms))?;
    writeln!(w, "[i] level sizes:      {}", join(bdd.level_sizes(roots, b.num_vars())))?;
    writeln!(w, "[i] maximum fanout:   {}", bdd.max_fanout(roots))?;
    writeln!(w, "[i] complement edges: {}", bdd.complement_edges(roots))?;
    for (i, &r) in roots.iter().enumerate() {
        writeln!(w, "[i] info for output {}:", i)?;
        writeln!(w, "[i] - path count:               {}", bdd.path_count(r))?;
        writeln!(w, "[i] - path count (to non-zero): {}", bdd.path_count_to_one(r))?;
    }
    Ok(())
}

fn report_network(w: &mut impl Write, n: &Network) -> io::Result<()> {
    writeln!(w, "[i] {} {}", n.kind(), io_summary(n))?;
    writeln!(w, "[i] inputs:  {}", join(n.input_names()))?;
    writeln!(w, "[i] outputs: {}", join(n.output_names()))?;
    writeln!(w, "[i] gates:   {}", n.num_gates())?;
    writeln!(w, "[i] depth:   {}", n.depth())?;
    match n.kind() {
        NetworkKind::Aig => {
            writeln!(w, "[i] levels:  {}", join(n.level_histogram()))?;
            if let Some(mapping) = n.mapping() {
                writeln!(w, "[i] luts:    {}", mapping.num_cells())?;
            }
        }
        NetworkKind::Mig => {
            writeln!(w, "[i] complemented edges: {}", n.complemented_edges())?;
            writeln!(w, "[i] inverters:          {}", n.inverters())?;
        }
        NetworkKind::Xmg => {
            writeln!(w, "[i] maj: {} (real: {})", n.num_maj(), n.num_real_maj())?;
            writeln!(w, "[i] xor: {}", n.num_xor())?;
        }
    }
    Ok(())
}

/// Structured statistics of `value`.
///
/// Networks and BDD sets always carry `inputs`, `outputs`, `size` and `depth`.
pub fn statistics(value: &Repr) -> Map<String, Value> {
    let mut stats = Map::new();
    match value {
        Repr::TruthTable(tt) => {
            stats.insert("inputs".into(), json!(tt.num_vars()));
            stats.insert("outputs".into(), json!(1));
            stats.insert("minterms".into(), json!(tt.count_ones()));
            stats.insert("hex".into(), json!(tt.to_hex()));
        }
        Repr::Expression(e) => {
            stats.insert("expression".into(), json!(e.to_string()));
            stats.insert("inputs".into(), json!(e.num_vars()));
        }
        Repr::BddSet(b) => {
            stats.insert("inputs".into(), json!(b.num_vars()));
            stats.insert("outputs".into(), json!(b.num_outputs()));
            stats.insert("size".into(), json!(b.num_nodes()));
            stats.insert("depth".into(), json!(b.manager().depth(b.roots())));
        }
        Repr::Aig(n) | Repr::Mig(n) | Repr::Xmg(n) => {
            stats.insert("inputs".into(), json!(n.num_inputs()));
            stats.insert("outputs".into(), json!(n.num_outputs()));
            stats.insert("size".into(), json!(n.num_gates()));
            stats.insert("depth".into(), json!(n.depth()));
            match n.kind() {
                NetworkKind::Aig => {}
                NetworkKind::Mig => {
                    stats.insert("complemented_edges".into(), json!(n.complemented_edges()));
                    stats.insert("inverters".into(), json!(n.inverters()));
                }
                NetworkKind::Xmg => {
                    stats.insert("maj".into(), json!(n.num_maj()));
                    stats.insert("real_maj".into(), json!(n.num_real_maj()));
                    stats.insert("xor".into(), json!(n.num_xor()));
                }
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::bdd::BddConfig;
    use crate::expr::{Expr, Expression};
    use crate::network::{Cell, Mapping};
    use crate::truth_table::TruthTable;

    fn and_or() -> Network {
        let mut n = Network::new(NetworkKind::Aig);
        let a = n.add_input("a");
        let b = n.add_input("b");
        let c = n.add_input("c");
        let ab = n.and(a, b);
        let f = n.or(ab, c);
        n.add_output(f, "f");
        n
    }

    #[test]
    fn test_summaries() {
        let tt = Repr::from(TruthTable::from_binary("1000").unwrap());
        assert_eq!(summarize(&tt), "1000");

        let e = Repr::from(Expression::new(Expr::or(Expr::var(0), Expr::var(1))));
        assert_eq!(summarize(&e), "(x0 | x1)");

        let mut n = and_or();
        assert_eq!(summarize(&Repr::from(n.clone())), "(unnamed) i/o = 3/1   gates = 2");
        n.set_name("top");
        let mut mapping = Mapping::new();
        mapping.insert(
            n.outputs()[0].node(),
            Cell {
                name: "lut".into(),
                leaves: vec![1, 2, 3],
            },
        );
        n.set_mapping(mapping);
        assert_eq!(
            summarize(&Repr::from(n.clone())),
            "top i/o = 3/1   gates = 2   luts = 1"
        );

        let mig = Repr::from(n.convert_to(NetworkKind::Mig));
        assert_eq!(summarize(&mig), "top i/o = 3/1");
    }

    #[test]
    fn test_bdd_summary() {
        let e = Expression::new(Expr::and(Expr::var(0), Expr::var(1)));
        let set = Repr::from(BddSet::from_expression(&e, BddConfig::default()).unwrap());
        assert_eq!(summarize(&set), "2 variables, 1 functions, 3 nodes");
    }

    #[test]
    fn test_graph_statistics() {
        let aig = Repr::from(and_or());
        let stats = statistics(&aig);
        assert_eq!(stats["inputs"], json!(3));
        assert_eq!(stats["outputs"], json!(1));
        assert_eq!(stats["size"], json!(2));
        assert_eq!(stats["depth"], json!(2));

        let Repr::Aig(n) = &aig else { unreachable!() };
        let xmg = statistics(&Repr::from(n.convert_to(NetworkKind::Xmg)));
        for key in ["inputs", "outputs", "size", "depth", "maj", "real_maj", "xor"] {
            assert!(xmg.contains_key(key), "missing {}", key);
        }
        let mig = statistics(&Repr::from(n.convert_to(NetworkKind::Mig)));
        assert!(mig.contains_key("complemented_edges"));
        assert!(mig.contains_key("inverters"));
    }

    #[test]
    fn test_truth_table_report() {
        let tt = Repr::from(TruthTable::from_binary("11101000").unwrap());
        let mut out = Vec::new();
        report(&mut out, &tt).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "e8\n11101000\n");
        assert_eq!(statistics(&tt)["minterms"], json!(4));
    }

    #[test]
    fn test_bdd_report() {
        let e = Expression::new(Expr::xor(Expr::var(0), Expr::var(1)));
        let set = Repr::from(BddSet::from_expression(&e, BddConfig::default()).unwrap());
        let mut out = Vec::new();
        report(&mut out, &set).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[i] no. of minterms:  2"));
        assert!(text.contains("[i] level sizes:      1 1"));
        assert!(text.contains("[i] - path count (to non-zero): 2"));
    }
}
