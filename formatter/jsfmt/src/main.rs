//! jsfmt CLI
//!
//! Reads a script, prints the reformatted text to stdout. On failure the
//! original is never partially echoed: the error goes to stderr and the
//! exit code is 1, leaving fallback display to the caller.

use std::io::Read;

use js_fmt::{format_with_options, FormatOptions};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut path: Option<&str> = None;
    let mut options = FormatOptions::default();
    let mut show_map = false;

    for arg in args.iter().skip(1) {
        if let Some(width) = arg.strip_prefix("--indent=") {
            match width.parse::<usize>() {
                Ok(width) if width > 0 && width <= 16 => {
                    options = FormatOptions::with_indent_width(width);
                }
                _ => {
                    eprintln!("error: --indent expects a width between 1 and 16");
                    std::process::exit(1);
                }
            }
        } else if arg == "--map" {
            show_map = true;
        } else if arg == "-h" || arg == "--help" {
            print_usage();
            return;
        } else if path.is_none() {
            path = Some(arg.as_str());
        } else {
            eprintln!("error: unexpected argument {arg:?}");
            print_usage();
            std::process::exit(1);
        }
    }

    let Some(path) = path else {
        print_usage();
        std::process::exit(1);
    };

    let source = match read_source(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {path}: {err}");
            std::process::exit(1);
        }
    };

    match format_with_options(&source, &options) {
        Ok(result) => {
            print!("{}", result.text);
            if !result.text.ends_with('\n') {
                println!();
            }
            if show_map {
                for (original, formatted) in result.mapping.pairs() {
                    eprintln!("{original} -> {formatted}");
                }
            }
        }
        Err(err) => {
            eprintln!("{path}: {err}");
            std::process::exit(1);
        }
    }
}

fn read_source(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        std::fs::read_to_string(path)
    }
}

fn print_usage() {
    eprintln!("Usage: jsfmt <file.js> [options]");
    eprintln!();
    eprintln!("Reads the script (or stdin with `-`), prints the reformatted");
    eprintln!("text to stdout.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --indent=<n>   Spaces per indentation level (default: 4)");
    eprintln!("  --map          Dump original -> formatted offset pairs to stderr");
    eprintln!("  -h, --help     Show this help");
}
