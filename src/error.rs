use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed module header on line {line}: expected a module name after `module`")]
    MalformedModuleHeader { line: usize },

    #[error("top `{top}` not found among modules: [{}]", .known.join(", "))]
    UnknownTop { top: String, known: Vec<String> },

    #[error("module hierarchy is cyclic (through `{module}`)")]
    CyclicHierarchy { module: String },

    #[error("cannot read netlist `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
