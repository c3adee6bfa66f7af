//! AX-014: Rust command-line tool (`Cargo.toml`, `src/main.rs`).
//!
//! The generated crate has no dependencies; arguments are parsed by hand so
//! it builds offline.

use super::{comment_line, fill, string_literal};
use indexmap::IndexMap;

/// Render `Cargo.toml` and `src/main.rs`, keyed by relative path.
pub fn render_cli(name: &str, brief: &str) -> IndexMap<String, String> {
    let vars: [(&str, &str); 3] = [
        ("NAME", name),
        ("BRIEF_COMMENT", &comment_line(brief)),
        ("BRIEF_LIT", &string_literal(brief)),
    ];

    let mut files = IndexMap::new();
    files.insert("Cargo.toml".to_string(), fill(CARGO_TOML, &vars));
    files.insert("src/main.rs".to_string(), fill(MAIN_RS, &vars));
    files
}

const CARGO_TOML: &str = r#"[package]
name = "%%NAME%%"
version = "0.1.0"
edition = "2021"
description = %%BRIEF_LIT%%

[dependencies]

[profile.release]
lto = true
codegen-units = 1
"#;

const MAIN_RS: &str = r##"//! %%NAME%%: %%BRIEF_COMMENT%%
//!
//! Counts lines, words, and bytes of each FILE (or standard input).

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");
const ABOUT: &str = %%BRIEF_LIT%%;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Counts {
    lines: usize,
    words: usize,
    bytes: usize,
}

impl Counts {
    fn of(data: &[u8]) -> Self {
        let text = String::from_utf8_lossy(data);
        Self {
            lines: text.lines().count(),
            words: text.split_whitespace().count(),
            bytes: data.len(),
        }
    }

    fn add(&mut self, other: Counts) {
        self.lines += other.lines;
        self.words += other.words;
        self.bytes += other.bytes;
    }
}

fn usage() -> String {
    format!(
        "{NAME} {VERSION}\n{ABOUT}\n\n\
         Usage: {NAME} [OPTIONS] [FILE]...\n\n\
         With no FILE, read standard input.\n\n\
         Options:\n  -h, --help     Print help\n  -V, --version  Print version\n"
    )
}

fn report(counts: Counts, label: &str) {
    println!("{:>8} {:>8} {:>8} {}", counts.lines, counts.words, counts.bytes, label);
}

fn main() -> ExitCode {
    let mut paths = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print!("{}", usage());
                return ExitCode::SUCCESS;
            }
            "-V" | "--version" => {
                println!("{NAME} {VERSION}");
                return ExitCode::SUCCESS;
            }
            flag if flag.starts_with('-') && flag != "-" => {
                eprintln!("{NAME}: unknown option '{flag}'");
                eprint!("{}", usage());
                return ExitCode::from(2);
            }
            _ => paths.push(arg),
        }
    }

    if paths.is_empty() {
        paths.push("-".to_string());
    }

    let mut total = Counts::default();
    let mut failed = false;
    for path in &paths {
        let data = if path == "-" {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).map(|_| buf)
        } else {
            fs::read(path)
        };
        match data {
            Ok(bytes) => {
                let counts = Counts::of(&bytes);
                report(counts, path);
                total.add(counts);
            }
            Err(err) => {
                eprintln!("{NAME}: {path}: {err}");
                failed = true;
            }
        }
    }
    if paths.len() > 1 {
        report(total, "total");
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_text() {
        let c = Counts::of(b"one two\nthree\n");
        assert_eq!(c, Counts { lines: 2, words: 3, bytes: 14 });
    }

    #[test]
    fn counts_empty() {
        assert_eq!(Counts::of(b""), Counts::default());
    }
}
"##;
