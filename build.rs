use std::env;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    string_cache_codegen::AtomType::new("atom::Atom", "atom!")
        .atoms(&[
            "module",
            "endmodule",
            "primitive",
            "endprimitive",
            "input",
            "output",
            "inout",
            "wire",
            "wreal",
            "tri",
            "supply0",
            "supply1",
            "real",
            "integer",
            "time",
            "reg",
            "logic",
            "electrical",
            "ground",
            "discipline",
            "nature",
            "parameter",
            "localparam",
            "typedef",
            "assign",
            "always",
            "initial",
            "analog",
            "function",
            "endfunction",
            "task",
            "endtask",
            "generate",
            "endgenerate",
            "for",
            "if",
            "case",
            "endcase",
            "begin",
            "end",
            "import",
            "export",
        ])
        .write_to_file(&Path::new(&env::var("OUT_DIR").unwrap()).join("verilog_atom.rs"))
        .unwrap()
}
