//! Recognising instantiation statements.
//!
//! An instantiation has the shape
//!
//! ```text
//! Type [#( overrides )] name [ [msb:lsb] ] ( ports ) {, name ... ( ports )} ;
//! ```
//!
//! Everything whose first token is a declaration or control keyword is
//! rejected up front; misses only undercount, while a false instantiation
//! would add bogus edges to the hierarchy.

use crate::atom::Atom;
use crate::range::BitRange;
use crate::scan::{Balance, Cursor};

/// Type name of an instantiation and the text following it (and its
/// parameter overrides, if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstHead<'a> {
    pub ty: Atom,
    pub rest: &'a str,
}

/// One named instance in an instantiation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceDecl {
    pub name: Atom,
    pub range: Option<BitRange>,
}

impl InstanceDecl {
    pub fn multiplicity(&self) -> u64 {
        self.range.map_or(1, |r| r.multiplicity())
    }
}

/// Statement heads that never start an instantiation.
pub fn is_reserved_head(head: &Atom) -> bool {
    match *head {
        atom!("module")
        | atom!("endmodule")
        | atom!("primitive")
        | atom!("endprimitive")
        | atom!("input")
        | atom!("output")
        | atom!("inout")
        | atom!("wire")
        | atom!("wreal")
        | atom!("tri")
        | atom!("supply0")
        | atom!("supply1")
        | atom!("real")
        | atom!("integer")
        | atom!("time")
        | atom!("reg")
        | atom!("logic")
        | atom!("electrical")
        | atom!("ground")
        | atom!("discipline")
        | atom!("nature")
        | atom!("parameter")
        | atom!("localparam")
        | atom!("typedef")
        | atom!("assign")
        | atom!("always")
        | atom!("initial")
        | atom!("analog")
        | atom!("function")
        | atom!("endfunction")
        | atom!("task")
        | atom!("endtask")
        | atom!("generate")
        | atom!("endgenerate")
        | atom!("for")
        | atom!("if")
        | atom!("case")
        | atom!("endcase")
        | atom!("begin")
        | atom!("end")
        | atom!("import")
        | atom!("export") => true,
        _ => false,
    }
}

/// Reads `Type [#(...)]` from the start of `stmt`.
///
/// Returns `None` for reserved heads, statements not starting with an
/// identifier, and a `#` that is not followed by `(`.
pub fn parse_inst_head(stmt: &str) -> Option<InstHead<'_>> {
    let mut cur = Cursor::new(stmt);
    cur.skip_ws();
    let ty = Atom::from(cur.ident()?);
    if is_reserved_head(&ty) {
        return None;
    }

    cur.skip_ws();
    if cur.eat(b'#') {
        cur.skip_ws();
        if cur.skip_balanced(b'(', b')') == Balance::Missing {
            return None;
        }
    }

    Some(InstHead {
        ty,
        rest: cur.rest().trim(),
    })
}

/// Reads the comma-separated instance list following an instantiation head.
///
/// Each instance needs a port list in parentheses; the list stops at the
/// first entry without one. A range that is not two integer literals is
/// dropped and the instance kept.
pub fn extract_instances(rest: &str) -> Vec<InstanceDecl> {
    let mut decls = Vec::new();
    let mut cur = Cursor::new(rest);

    loop {
        cur.skip_ws();
        let name = match cur.ident() {
            Some(name) => Atom::from(name),
            None => break,
        };

        cur.skip_ws();
        let mut range = None;
        if cur.peek() == Some(b'[') {
            range = cur.bracketed().and_then(BitRange::parse);
            cur.skip_ws();
        }

        if cur.skip_balanced(b'(', b')') == Balance::Missing {
            break;
        }
        decls.push(InstanceDecl { name, range });

        cur.skip_ws();
        if !cur.eat(b',') {
            break;
        }
    }

    decls
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head(stmt: &str) -> Option<(String, &str)> {
        parse_inst_head(stmt).map(|h| (h.ty.to_string(), h.rest))
    }

    fn insts(rest: &str) -> Vec<(String, u64)> {
        extract_instances(rest)
            .into_iter()
            .map(|d| (d.name.to_string(), d.multiplicity()))
            .collect()
    }

    #[test]
    fn plain_head() {
        assert_eq!(
            head("  nmos m1 (d, g, s, b);"),
            Some(("nmos".to_string(), "m1 (d, g, s, b);"))
        );
    }

    #[test]
    fn head_with_nested_overrides() {
        assert_eq!(
            head("fifo #(.DEPTH(f(4)), .W((8))) u_fifo (.clk(clk));"),
            Some(("fifo".to_string(), "u_fifo (.clk(clk));"))
        );
        assert_eq!(
            head("fifo # ( 4 ) u0 ();"),
            Some(("fifo".to_string(), "u0 ();"))
        );
    }

    #[test]
    fn reserved_heads_are_rejected() {
        for stmt in &[
            "wire (a, b);",
            "input a;",
            "electrical n1, n2;",
            "parameter real W = 1u;",
            "assign y = f(a);",
            "analog begin V(a) <+ 0;",
            "endmodule",
        ] {
            assert_eq!(head(stmt), None, "{}", stmt);
        }
    }

    #[test]
    fn reserved_check_is_whole_word() {
        assert!(head("wire_buf wb0 (a, b);").is_some());
        assert!(head("endmodule_cell c (a);").is_some());
    }

    #[test]
    fn non_identifier_heads() {
        assert_eq!(head("(a, b);"), None);
        assert_eq!(head("$display(\"x\");"), None);
        assert_eq!(head(""), None);
    }

    #[test]
    fn malformed_override_is_not_an_instantiation() {
        assert_eq!(head("fifo # 4 u0 (a);"), None);
        assert_eq!(head("fifo #"), None);
    }

    #[test]
    fn single_instance() {
        assert_eq!(insts("m1 (d, g, s, b);"), [("m1".to_string(), 1)]);
    }

    #[test]
    fn instance_list() {
        assert_eq!(
            insts("l1 (a, b), l2 (b, (c)) , l3(c, d);"),
            [
                ("l1".to_string(), 1),
                ("l2".to_string(), 1),
                ("l3".to_string(), 1)
            ]
        );
    }

    #[test]
    fn array_instance() {
        assert_eq!(insts("inst [3:0] (a, b);"), [("inst".to_string(), 4)]);
        assert_eq!(insts("inst[0:7](a);"), [("inst".to_string(), 8)]);
    }

    #[test]
    fn malformed_range_defaults_to_one() {
        assert_eq!(insts("inst [W-1:0] (a);"), [("inst".to_string(), 1)]);
        assert_eq!(insts("inst [4] (a);"), [("inst".to_string(), 1)]);
    }

    #[test]
    fn missing_port_list_yields_nothing() {
        assert!(insts("= a & b;").is_empty());
        assert!(insts("w1, w2;").is_empty());
        assert!(insts("").is_empty());
    }

    #[test]
    fn list_stops_at_first_bad_entry() {
        assert_eq!(insts("a (x), b, c (y);"), [("a".to_string(), 1)]);
    }

    #[test]
    fn unclosed_port_list_still_counts() {
        assert_eq!(insts("u0 (a, b"), [("u0".to_string(), 1)]);
    }
}
