//! Splitting a module body into `;`-terminated statements.

/// Splits `body` on `;`, keeping the terminator and trimming each statement.
///
/// A trailing fragment without a terminator is kept if it is not blank.
/// Parentheses and strings are not tracked; once comments and attributes are
/// gone, `;` never appears inside an instantiation.
pub fn split_statements(body: &str) -> Vec<&str> {
    let mut stmts = Vec::new();
    let mut start = 0;
    for (i, _) in body.match_indices(';') {
        stmts.push(body[start..=i].trim());
        start = i + 1;
    }
    let tail = body[start..].trim();
    if !tail.is_empty() {
        stmts.push(tail);
    }
    stmts
}
