//! Walk a function through the conversion matrix and score a reversible adder.
//!
//! ```bash
//! cargo run --example session -- 11101000 --path aig,xmg,mig,expr,bdd --cost control
//! ```

use std::rc::Rc;

use clap::Parser;
use color_eyre::eyre::eyre;

use logic_workbench::bdd::BddConfig;
use logic_workbench::repr::Tag;
use logic_workbench::reversible::circuit::{Circuit, Control, Gate, NamePatterns};
use logic_workbench::reversible::cost::{evaluate, BuiltinCost};
use logic_workbench::store::Store;
use logic_workbench::truth_table::TruthTable;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Truth table as a binary string, most significant bit first.
    #[arg(value_name = "BITS", default_value = "11101000")]
    function: String,

    /// Comma-separated tags to convert through, starting from the truth table.
    #[clap(long, value_delimiter = ',', default_value = "aig,mig,xmg,expr,bdd")]
    path: Vec<String>,

    /// Cost function for the reversible adder (gate, line, control, unit).
    #[clap(long, default_value = "control")]
    cost: String,

    /// BDD size (in bits, so the actual size is `2^size` nodes).
    #[clap(long, value_name = "INT", default_value = "16")]
    size: usize,
}

/// Two-bit ripple adder built from a one-bit full-adder module.
fn ripple_adder() -> Circuit {
    let mut full_adder = Circuit::new(4);
    full_adder.add_gate(Gate::toffoli(vec![Control::positive(0), Control::positive(1)], 3));
    full_adder.add_gate(Gate::cnot(0, 1));
    full_adder.add_gate(Gate::toffoli(vec![Control::positive(1), Control::positive(2)], 3));
    full_adder.add_gate(Gate::cnot(1, 2));
    let full_adder = Rc::new(full_adder);

    let mut adder = Circuit::new(7);
    adder.add_gate(Gate::module("fa", full_adder.clone(), vec![], vec![0, 1, 2, 3]));
    adder.add_gate(Gate::module("fa", full_adder, vec![], vec![4, 5, 3, 6]));
    adder.set_constants(vec![None, None, Some(false), Some(false), None, None, Some(false)]);
    adder.set_garbage(vec![true, true, false, true, true, false, false]);
    adder.assign_unique_names(&NamePatterns::default());
    adder
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    let tt = TruthTable::from_binary(&args.function)
        .ok_or_else(|| eyre!("'{}' is not a truth table", args.function))?;

    let mut store = Store::with_bdd_config(BddConfig::default().with_storage_bits(args.size));
    store.add(tt);

    let mut source = Tag::TruthTable;
    for name in &args.path {
        let target = Tag::from_name(name).ok_or_else(|| eyre!("unknown representation '{}'", name))?;
        store.convert(source, target)?;
        println!("{} -> {}", source, target);
        source = target;
    }

    for tag in Tag::ALL {
        if store.is_empty(tag) {
            continue;
        }
        println!("{}:", tag);
        for line in store.summaries(tag) {
            println!("  {}", line);
        }
        println!("  stats = {}", serde_json::Value::Object(store.statistics(tag)?));
    }

    let mut stdout = std::io::stdout();
    store.report(source, &mut stdout)?;

    let cost: BuiltinCost = args.cost.parse()?;
    let adder = ripple_adder();
    println!(
        "adder: {} lines, inputs {:?}, {} cost = {}",
        adder.lines(),
        adder.inputs(),
        cost,
        evaluate(&adder, &cost.cost_function())?
    );

    Ok(())
}
