//! Leaf device counting for hierarchical Verilog / Verilog-AMS netlists.
//!
//! The netlist is not elaborated. Module bodies are split into statements,
//! instantiations are picked out by their shape, and the resulting module
//! graph is walked from the top modules, multiplying array replication along
//! the way. Any instantiated type without a `module` definition in the text
//! is a leaf device.
//!
//! ```no_run
//! let text = std::fs::read_to_string("chip.vams")?;
//! let count = leafcount::count_leaves(&text, &leafcount::Options::default())?;
//! println!("{} leaves under {:?}", count.total, count.tops);
//! # Ok::<(), anyhow::Error>(())
//! ```

#[macro_use]
#[allow(dead_code, clippy::all)]
mod atom {
    include!(concat!(env!("OUT_DIR"), "/verilog_atom.rs"));
}

pub use crate::atom::Atom;

pub mod clean;
mod error;
pub mod hierarchy;
pub mod inst;
pub mod module;
pub mod range;
pub mod report;
mod scan;
pub mod stmt;

pub use crate::error::{Error, Result};
pub use crate::hierarchy::Hierarchy;

use fxhash::FxHashMap;
use std::fs;
use std::path::Path;

/// What to count from.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Start module. When `None`, the uninstantiated modules are used, or
    /// every module if there are none.
    pub top: Option<String>,
    /// Reject cyclic hierarchies instead of looping on them.
    pub check_cycles: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafCount {
    /// Modules the traversal started from.
    pub tops: Vec<Atom>,
    /// Modules no other module instantiates, sorted. Independent of
    /// [`Options::top`].
    pub roots: Vec<Atom>,
    pub total: u64,
    pub breakdown: FxHashMap<Atom, u64>,
}

/// Parses `text` and counts leaf instances below the selected tops.
pub fn count_leaves(text: &str, opts: &Options) -> Result<LeafCount> {
    Hierarchy::parse(text)?.count(opts)
}

/// Reads a netlist file. Bytes that are not valid UTF-8 are replaced.
pub fn read_netlist(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn count_leaves_in_file(path: &Path, opts: &Options) -> Result<LeafCount> {
    count_leaves(&read_netlist(path)?, opts)
}
