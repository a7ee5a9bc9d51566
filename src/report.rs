//! Human-readable output for the command line.

use crate::atom::Atom;
use crate::hierarchy::{Hierarchy, Instantiation};
use crate::LeafCount;
use fxhash::FxHashMap;
use std::io::{self, Write};

/// Which optional sections to print. None of them affect the counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub list_tops: bool,
    pub dump_leaves: bool,
}

/// Writes the inferred tops (if asked), the breakdown (if asked), the total
/// and, unless the breakdown was dumped, the tops counted from.
pub fn write_report<W: Write>(out: &mut W, count: &LeafCount, opts: &ReportOptions) -> io::Result<()> {
    if opts.list_tops {
        write_inferred_tops(out, &count.roots)?;
    }
    if opts.dump_leaves {
        write_breakdown(out, &count.breakdown)?;
    }
    writeln!(out, "Total leaf device instances: {}", count.total)?;
    if !opts.dump_leaves && !count.tops.is_empty() {
        writeln!(out, "Top modules: {}", join(&count.tops))?;
    }
    Ok(())
}

pub fn write_inferred_tops<W: Write>(out: &mut W, roots: &[Atom]) -> io::Result<()> {
    if roots.is_empty() {
        writeln!(out, "Inferred top modules: (none)")
    } else {
        writeln!(out, "Inferred top modules: {}", join(roots))
    }
}

/// One line per leaf type, highest count first, ties by name.
pub fn write_breakdown<W: Write>(out: &mut W, breakdown: &FxHashMap<Atom, u64>) -> io::Result<()> {
    if breakdown.is_empty() {
        return writeln!(out, "Breakdown by type: (no leaf instances found)");
    }

    let mut rows: Vec<(&Atom, u64)> = breakdown.iter().map(|(ty, &n)| (ty, n)).collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let width = rows.iter().map(|(ty, _)| ty.len()).max().unwrap_or(4);

    writeln!(out, "Breakdown by type:")?;
    for (ty, n) in rows {
        writeln!(out, "  {:<width$}  {}", &**ty, n, width = width)?;
    }
    Ok(())
}

/// Prints the instance tree below each start, children ordered by instance
/// name. Replicated instances are shown once with an `[xN]` suffix.
///
/// The hierarchy must be acyclic.
pub fn write_tree<W: Write>(out: &mut W, hier: &Hierarchy, starts: &[Atom]) -> io::Result<()> {
    for start in starts {
        writeln!(out, "{}", start)?;

        let mut stack: Vec<(usize, &Instantiation)> = Vec::new();
        push_children(&mut stack, hier, start, 1);

        while let Some((level, inst)) = stack.pop() {
            write!(out, "{}{}: {}", "  ".repeat(level), inst.name, inst.ty)?;
            if inst.multiplicity > 1 {
                write!(out, " [x{}]", inst.multiplicity)?;
            }
            writeln!(out)?;

            push_children(&mut stack, hier, &inst.ty, level + 1);
        }
    }
    Ok(())
}

fn push_children<'h>(
    stack: &mut Vec<(usize, &'h Instantiation)>,
    hier: &'h Hierarchy,
    module: &Atom,
    level: usize,
) {
    let mut children = hier.instantiations(module).iter().collect::<Vec<_>>();
    children.sort_by(|a, b| a.name.cmp(&b.name));
    stack.extend(children.into_iter().rev().map(|inst| (level, inst)));
}

fn join(names: &[Atom]) -> String {
    names.iter().map(|n| &**n).collect::<Vec<_>>().join(", ")
}
