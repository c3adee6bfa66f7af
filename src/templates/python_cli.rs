//! AX-011: Python CLI tool (`<name>.py`).

use super::{docstring, fill, string_literal};
use std::collections::BTreeMap;

/// Render a Python CLI script. Hashing prompts get a hashlib tool; anything
/// else gets an argparse app with `info`, `process`, and `run` subcommands.
pub fn render_cli(name: &str, brief: &str, fields: &BTreeMap<String, String>) -> String {
    let template = match fields.get("feature").map(String::as_str) {
        Some("hash") => HASH_TEMPLATE,
        _ => GENERIC_TEMPLATE,
    };
    fill(
        template,
        &[
            ("NAME", name),
            ("DOC", &docstring(brief)),
            ("BRIEF_LIT", &string_literal(brief)),
        ],
    )
}

/// File name for a CLI script.
pub fn file_name(name: &str) -> String {
    format!("{}.py", name)
}

const HASH_TEMPLATE: &str = r#"#!/usr/bin/env python3
"""%%DOC%%

Compute file hashes with MD5, SHA1, SHA256, or SHA512.

Usage:
    python %%NAME%%.py file1.txt                  # SHA256 (default)
    python %%NAME%%.py -a md5 file1.txt file2.txt
    python %%NAME%%.py -r path/to/directory       # recurse into directories
"""

import argparse
import hashlib
import sys
from pathlib import Path
from typing import Iterator, List, Optional

ALGORITHMS = ("md5", "sha1", "sha256", "sha512")
CHUNK_SIZE = 65536


def compute_hash(path: Path, algorithm: str = "sha256") -> Optional[str]:
    """Return the hex digest of a file, or None if it cannot be read."""
    digest = hashlib.new(algorithm)
    try:
        with path.open("rb") as handle:
            for chunk in iter(lambda: handle.read(CHUNK_SIZE), b""):
                digest.update(chunk)
    except OSError as err:
        print(f"error: {path}: {err}", file=sys.stderr)
        return None
    return digest.hexdigest()


def iter_files(targets: List[str], recursive: bool) -> Iterator[Path]:
    """Expand targets into files, descending into directories when asked."""
    for target in targets:
        path = Path(target)
        if path.is_file():
            yield path
        elif path.is_dir():
            pattern = "**/*" if recursive else "*"
            for child in sorted(path.glob(pattern)):
                if child.is_file():
                    yield child
        else:
            print(f"warning: {target}: no such file or directory", file=sys.stderr)


def main(argv: Optional[List[str]] = None) -> int:
    parser = argparse.ArgumentParser(prog="%%NAME%%", description=%%BRIEF_LIT%%)
    parser.add_argument("paths", nargs="+", help="files or directories to hash")
    parser.add_argument("-a", "--algorithm", choices=ALGORITHMS, default="sha256")
    parser.add_argument("-r", "--recursive", action="store_true",
                        help="descend into subdirectories")
    args = parser.parse_args(argv)

    processed = 0
    for path in iter_files(args.paths, args.recursive):
        value = compute_hash(path, args.algorithm)
        if value is not None:
            print(f"{value}  {path}")
            processed += 1
    return 0 if processed > 0 else 1


if __name__ == "__main__":
    sys.exit(main())
"#;

const GENERIC_TEMPLATE: &str = r#"#!/usr/bin/env python3
"""%%DOC%%

Usage:
    python %%NAME%%.py info
    python %%NAME%%.py process INPUT [-o OUTPUT]
    python %%NAME%%.py run [--dry-run]
"""

import argparse
import sys
from pathlib import Path
from typing import List, Optional

PROG = "%%NAME%%"
VERSION = "0.1.0"


class App:
    """Command handlers."""

    def __init__(self, verbose: bool = False) -> None:
        self.verbose = verbose

    def log(self, message: str) -> None:
        if self.verbose:
            print(f"[{PROG}] {message}", file=sys.stderr)

    def cmd_info(self, args: argparse.Namespace) -> int:
        print(f"{PROG} {VERSION}")
        print(%%BRIEF_LIT%%)
        return 0

    def cmd_process(self, args: argparse.Namespace) -> int:
        source = Path(args.input)
        if not source.exists():
            print(f"error: {source} does not exist", file=sys.stderr)
            return 1
        self.log(f"processing {source}")
        if source.is_dir():
            files = sorted(p for p in source.rglob("*") if p.is_file())
        else:
            files = [source]
        report = "\n".join(f"{p}\t{p.stat().st_size}" for p in files)
        if args.output:
            Path(args.output).write_text(report + "\n", encoding="utf-8")
            self.log(f"wrote {args.output}")
        else:
            print(report)
        return 0

    def cmd_run(self, args: argparse.Namespace) -> int:
        if args.dry_run:
            print("dry run: nothing to do")
            return 0
        self.log("running")
        print("done")
        return 0


def build_parser() -> argparse.ArgumentParser:
    parser = argparse.ArgumentParser(prog=PROG, description=%%BRIEF_LIT%%)
    parser.add_argument("-v", "--verbose", action="store_true")
    parser.add_argument("--version", action="version", version=f"%(prog)s {VERSION}")
    subparsers = parser.add_subparsers(dest="command")
    subparsers.add_parser("info", help="show tool information")
    process = subparsers.add_parser("process", help="list files with their sizes")
    process.add_argument("input")
    process.add_argument("-o", "--output")
    run = subparsers.add_parser("run", help="run the main task")
    run.add_argument("--dry-run", action="store_true")
    return parser


def main(argv: Optional[List[str]] = None) -> int:
    parser = build_parser()
    args = parser.parse_args(argv)
    if not args.command:
        parser.print_help()
        return 1
    app = App(verbose=args.verbose)
    handler = getattr(app, f"cmd_{args.command}")
    return handler(args)


if __name__ == "__main__":
    sys.exit(main())
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::testutil::py_compile;

    fn hash_fields() -> BTreeMap<String, String> {
        BTreeMap::from([("feature".to_string(), "hash".to_string())])
    }

    #[test]
    fn test_ax011_hash_cli() {
        let src = render_cli("hash_files", "create a CLI tool to hash files", &hash_fields());
        assert!(src.contains("import argparse"));
        assert!(src.contains("import hashlib"));
        assert!(src.contains("\"md5\""));
        assert!(src.contains("\"sha256\""));
        assert!(src.contains("if __name__ == \"__main__\":"));
        assert!(src.contains("python hash_files.py -a md5"));
        assert!(!src.contains("%%"));
    }

    #[test]
    fn test_ax011_generic_cli() {
        let src = render_cli(
            "file_processing",
            "build a command line tool for file processing",
            &BTreeMap::new(),
        );
        assert!(src.contains("add_subparsers"));
        assert!(src.contains("def cmd_process"));
        assert!(src.contains("PROG = \"file_processing\""));
        assert!(!src.contains("hashlib"));
        assert!(!src.contains("%%"));
    }

    #[test]
    fn test_ax011_file_name() {
        assert_eq!(file_name("hash_files"), "hash_files.py");
    }

    #[test]
    fn test_ax011_python_compiles() {
        let hash = render_cli("hash_files", "hash \"files\" \\ fast", &hash_fields());
        let generic = render_cli("tool", "a tool\nwith two lines", &BTreeMap::new());
        let nul = render_cli("nul_tool", "hash\u{0}files", &hash_fields());
        assert!(!nul.contains('\u{0}'));
        match py_compile(&[
            ("hash_files.py", &hash),
            ("tool.py", &generic),
            ("nul_tool.py", &nul),
        ]) {
            Some(result) => result.unwrap(),
            None => eprintln!("python3 not available; skipping compile check"),
        }
    }
}
