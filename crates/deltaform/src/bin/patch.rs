//! `deltaform-patch` - apply a JSON Patch (RFC 6902) to a document.
//!
//! Usage:
//!   deltaform-patch [--strict] '<patch-array-json>'
//!
//! The document is read from stdin; the patched document is written to
//! stdout. With `--strict`, unresolvable operations abort with an error
//! instead of being skipped.

use std::io::{self, Read, Write};

use deltaform::cli::apply_json_patch;

fn main() {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let strict = if args.first().map(String::as_str) == Some("--strict") {
        args.remove(0);
        true
    } else {
        false
    };
    let patch = match args.first() {
        Some(p) => p.clone(),
        None => {
            eprintln!("Usage: deltaform-patch [--strict] '<patch-array-json>'");
            std::process::exit(1);
        }
    };

    let mut doc = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut doc) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match apply_json_patch(doc.trim(), &patch, strict) {
        Ok(result) => {
            io::stdout().write_all(result.as_bytes()).unwrap();
            io::stdout().write_all(b"\n").unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
