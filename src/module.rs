//! Locating `module ... endmodule` spans in cleaned netlist text.

use crate::atom::Atom;
use crate::scan::{is_ident_continue, Cursor};
use crate::{Error, Result};
use std::ops::Range;

/// One module definition found in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpan {
    pub name: Atom,
    /// Byte range from the end of the module name up to the start of the
    /// line holding the matching `endmodule`.
    pub body: Range<usize>,
    /// `false` when no `endmodule` was found and the body runs to the end.
    pub terminated: bool,
}

impl ModuleSpan {
    pub fn body<'t>(&self, text: &'t str) -> &'t str {
        &text[self.body.clone()]
    }
}

/// Finds every module header in `text` together with its body span.
///
/// Headers and terminators are only recognised as the first token of a line.
/// A `module` keyword that is not followed by a name is an error.
pub fn extract_modules(text: &str) -> Result<Vec<ModuleSpan>> {
    let lines = line_starts(text);
    let terminators: Vec<usize> = lines
        .iter()
        .copied()
        .filter(|&start| leading_keyword(text, start, "endmodule").is_some())
        .collect();

    let mut modules = Vec::new();
    for (lineno, &start) in lines.iter().enumerate() {
        let after_kw = match leading_keyword(text, start, "module") {
            Some(pos) => pos,
            None => continue,
        };

        let mut cur = Cursor::new(&text[after_kw..]);
        cur.skip_ws();
        let name = cur
            .ident()
            .ok_or(Error::MalformedModuleHeader { line: lineno + 1 })?;
        let name_end = text.len() - cur.rest().len();

        let next_end = terminators.iter().copied().find(|&t| t > name_end);
        let body = name_end..next_end.unwrap_or_else(|| text.len());
        if next_end.is_none() {
            log::warn!(
                "module `{}` (line {}) has no `endmodule`; body extends to end of text",
                name,
                lineno + 1
            );
        }

        modules.push(ModuleSpan {
            name: Atom::from(name),
            body,
            terminated: next_end.is_some(),
        });
    }

    Ok(modules)
}

fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .filter(|&i| i < text.len())
        .collect()
}

/// If the line at `start` begins (after blanks) with the whole word `kw`,
/// returns the offset just past it.
fn leading_keyword(text: &str, start: usize, kw: &str) -> Option<usize> {
    let line = &text[start..];
    let indent = line.len()
        - line
            .trim_start_matches(|c: char| c == ' ' || c == '\t' || c == '\r')
            .len();
    let pos = start + indent;
    if !text[pos..].starts_with(kw) {
        return None;
    }
    let end = pos + kw.len();
    match text.as_bytes().get(end) {
        Some(&b) if is_ident_continue(b) => None,
        _ => Some(end),
    }
}
