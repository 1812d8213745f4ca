//! `formobj-flatten` — flatten a JSON document into bracket-path fields.
//!
//! Usage:
//!   formobj-flatten < doc.json
//!
//! Prints a JSON array of `[path, value]` pairs.

use formobj::cli::{flatten_json, init_logging};
use std::io::{self, Read, Write};

fn main() {
    init_logging();

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match flatten_json(buf.trim()) {
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
