//! Removal of comments and attribute instances ahead of structural parsing.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Attribute,
}

/// Strips `/* ... */`, `// ...` and `(* ... *)` from `text`.
///
/// Newlines inside removed regions are kept, so line numbers of the cleaned
/// text match the input. `(*)` is an event-control wildcard, not an
/// attribute, and is left alone. An unterminated block comment or attribute
/// swallows the rest of the text.
pub fn strip_comments_and_attrs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = State::Code;
    let mut chars = text.char_indices();

    while let Some((i, c)) = chars.next() {
        let rest = &text[i..];
        match state {
            State::Code => {
                if rest.starts_with("/*") {
                    chars.next();
                    state = State::BlockComment;
                } else if rest.starts_with("//") {
                    chars.next();
                    state = State::LineComment;
                } else if rest.starts_with("(*") && !rest.starts_with("(*)") {
                    chars.next();
                    state = State::Attribute;
                } else {
                    out.push(c);
                }
            }
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                }
            }
            State::BlockComment | State::Attribute => {
                let close = if state == State::BlockComment { "*/" } else { "*)" };
                if rest.starts_with(close) {
                    chars.next();
                    state = State::Code;
                } else if c == '\n' {
                    out.push('\n');
                }
            }
        }
    }

    match state {
        State::BlockComment => log::warn!("unterminated block comment at end of netlist"),
        State::Attribute => log::warn!("unterminated attribute at end of netlist"),
        State::Code | State::LineComment => {}
    }

    out
}
