use anyhow::{Context, Result};
use clap::Parser;
use leafcount::report::{self, ReportOptions};
use leafcount::{Hierarchy, Options};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

/// Count leaf devices (types without module definitions) in a hierarchical
/// Verilog/VAMS netlist.
#[derive(Parser, Debug)]
#[command(name = "leafcount", version, about)]
struct Args {
    /// Path to netlist (.v/.vams)
    netlist: PathBuf,

    /// Top module name. If omitted, inferred as modules not instantiated by others.
    #[arg(short, long)]
    top: Option<String>,

    /// Also print the inferred top modules.
    #[arg(long)]
    list_tops: bool,

    /// Print the full leaf-type breakdown.
    #[arg(long)]
    dump_leaves: bool,

    /// Print the instance tree below the top modules.
    #[arg(long)]
    tree: bool,

    /// Fail on a cyclic module hierarchy instead of looping forever.
    #[arg(long)]
    check_cycles: bool,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .try_init();

    if let Err(e) = run(&args) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let text = leafcount::read_netlist(&args.netlist)?;
    let hier = Hierarchy::parse(&text)
        .with_context(|| format!("parsing `{}`", args.netlist.display()))?;

    let opts = Options {
        top: args.top.clone(),
        // The tree printer has no cycle guard of its own.
        check_cycles: args.check_cycles || args.tree,
    };
    let count = hier.count(&opts)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(
        &mut out,
        &count,
        &ReportOptions {
            list_tops: args.list_tops,
            dump_leaves: args.dump_leaves,
        },
    )?;
    if args.tree {
        report::write_tree(&mut out, &hier, &count.tops)?;
    }
    out.flush()?;

    Ok(())
}
