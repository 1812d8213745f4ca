//! `formobj-inflate` — rebuild a JSON document from bracket-path fields.
//!
//! Usage:
//!   formobj-inflate [--lenient] < fields.json
//!
//! Reads a JSON array of `[path, value]` pairs. `--lenient` accepts
//! malformed brackets the way legacy form parsers did.

use formobj::cli::{inflate_json, init_logging};
use formobj_path::PathMode;
use std::io::{self, Read, Write};

fn main() {
    init_logging();

    let mut mode = PathMode::Strict;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--lenient" => mode = PathMode::Lenient,
            other => {
                eprintln!("Unknown argument: {other}");
                std::process::exit(1);
            }
        }
    }

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match inflate_json(buf.trim(), mode) {
        Ok(result) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{result}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
