//! Template renderers: produce source text for each target language.
//!
//! Every renderer is a pure function of `(name, brief, fields)`. Nothing here
//! touches the filesystem; writing is done by `core::output`.
//!
//! Templates mark substitution points as `%%KEY%%`, which does not collide
//! with format syntax in any of the target languages.

pub mod csharp_api;
pub mod flask_app;
pub mod go_service;
pub mod python_cli;
pub mod python_lib;
pub mod rust_cli;

/// Replace each `%%KEY%%` marker in `template`.
///
/// Single pass: substituted values are never rescanned, so user text that
/// happens to contain a marker is left alone. Unknown markers stay as-is.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("%%") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after.find("%%").and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, end))
        });
        match value {
            Some((v, end)) => {
                out.push_str(v);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("%%");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Control characters plus the Unicode line/paragraph separators, which C#
/// treats as line breaks.
fn unsafe_in_line(c: char) -> bool {
    c.is_control() || c == '\u{2028}' || c == '\u{2029}'
}

/// Double-quoted string literal valid in Python, Go, Rust, C#, and TOML.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if unsafe_in_line(c) => out.push(' '),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Text safe inside a Python `"""` docstring. Newlines and tabs survive;
/// other control characters (NUL included) become spaces.
pub fn docstring(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' | '\t' => out.push(c),
            c if unsafe_in_line(c) => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// Text safe on a single `//` or `#` comment line.
pub fn comment_line(s: &str) -> String {
    s.chars()
        .map(|c| if unsafe_in_line(c) { ' ' } else { c })
        .collect()
}

/// Text safe inside HTML/XML content and inside a non-raw Python string.
pub fn html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\\' => out.push_str("&#92;"),
            c if unsafe_in_line(c) => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::process::Command;

    /// Byte-compile Python sources with the local interpreter.
    ///
    /// Returns `None` when no `python3` is available, so callers can skip.
    pub fn py_compile(files: &[(&str, &str)]) -> Option<Result<(), String>> {
        Command::new("python3").arg("--version").output().ok()?;
        let dir = tempfile::tempdir().ok()?;
        let mut paths = Vec::new();
        for (rel, src) in files {
            let path = dir.path().join(rel);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).ok()?;
            }
            std::fs::write(&path, src).ok()?;
            paths.push(path);
        }
        let out = Command::new("python3")
            .arg("-m")
            .arg("py_compile")
            .args(paths.iter().map(|p| p.as_path()))
            .current_dir(dir.path())
            .output()
            .ok()?;
        if out.status.success() {
            Some(Ok(()))
        } else {
            Some(Err(String::from_utf8_lossy(&out.stderr).to_string()))
        }
    }
}
