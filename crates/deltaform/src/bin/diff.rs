//! `deltaform-diff` - compute a JSON Patch between two JSON documents.
//!
//! Usage:
//!   deltaform-diff <original.json> <updated.json>
//!
//! Either argument may be `-` to read that document from stdin (at most one).
//! The patch array is written to stdout.

use std::io::{self, Read, Write};

use deltaform::cli::diff_json_docs;

fn read_input(arg: &str) -> io::Result<String> {
    if arg == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(arg)
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (src_arg, dst_arg) = match (args.get(1), args.get(2)) {
        (Some(a), Some(b)) => (a.clone(), b.clone()),
        _ => {
            eprintln!("Usage: deltaform-diff <original.json> <updated.json>");
            std::process::exit(1);
        }
    };
    if src_arg == "-" && dst_arg == "-" {
        eprintln!("Only one document may come from stdin.");
        std::process::exit(1);
    }

    let src = read_input(&src_arg).unwrap_or_else(|e| {
        eprintln!("{src_arg}: {e}");
        std::process::exit(1);
    });
    let dst = read_input(&dst_arg).unwrap_or_else(|e| {
        eprintln!("{dst_arg}: {e}");
        std::process::exit(1);
    });

    match diff_json_docs(&src, &dst) {
        Ok(patch) => {
            io::stdout().write_all(patch.as_bytes()).unwrap();
            io::stdout().write_all(b"\n").unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
