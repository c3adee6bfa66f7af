//! AX-003: Prompt → identifier slugs.
//!
//! Slugs are used as Python module names, Go/Cargo package names, and
//! directory names, so they are restricted to `[a-z][a-z0-9_]*`.

use regex::Regex;
use std::sync::LazyLock;

/// Upper bound on slug length, in bytes.
pub const MAX_SLUG_LEN: usize = 40;

/// Words of at most this many slug segments are kept.
const MAX_WORDS: usize = 3;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9]+").expect("static word pattern"));

/// Filler and routing words that never make it into a name.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "make", "create", "build", "write", "generate", "give", "me", "please", "i",
    "want", "need", "to", "for", "with", "that", "which", "of", "and", "or", "in", "on", "my",
    "some", "simple", "new", "can", "you", "could", "would", "should", "it", "is", "be", "this",
    "using", "use", "program", "code", "app", "application", "cli", "tool", "script", "ui",
    "function", "func", "lib", "library", "command", "line", "web", "api", "py", "python", "go",
    "golang", "rust", "csharp", "c", "net", "dotnet", "fast", "memory", "safe", "enterprise",
    "windows", "high", "performance", "performant", "low", "latency",
];

/// Identifiers that would break generated code if used verbatim.
const RESERVED: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "false", "finally", "for", "from", "global", "if", "import", "in", "is",
    "lambda", "none", "nonlocal", "not", "or", "pass", "raise", "return", "true", "try", "while",
    "with", "yield", "fn", "impl", "match", "mod", "type", "struct", "main", "test", "tests",
    "std", "core", "self", "super", "crate", "package", "string", "sys", "os", "typing",
    "functools", "unittest", "pathlib", "hashlib", "argparse", "flask", "abc", "enum", "io", "re",
    "json", "math", "random", "time", "collections", "types", "copy", "socket", "signal",
    "queue", "logging", "codecs", "http",
    // Rust keywords, strict and reserved; Cargo rejects them as package names.
    "abstract", "become", "box", "const", "do", "dyn", "extern", "final", "gen", "let",
    "loop", "macro", "move", "mut", "override", "priv", "pub", "ref", "static", "trait",
    "typeof", "unsafe", "unsized", "use", "virtual", "where",
];

/// Build a slug from free text, falling back to `default` when the text has
/// no usable words.
pub fn slugify(text: &str, default: &str) -> String {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| !STOPWORDS.contains(w))
        .take(MAX_WORDS)
        .collect();

    let mut slug = String::new();
    for word in words {
        let next_len = slug.len() + word.len() + usize::from(!slug.is_empty());
        if next_len > MAX_SLUG_LEN {
            break;
        }
        if !slug.is_empty() {
            slug.push('_');
        }
        slug.push_str(word);
    }

    if slug.is_empty() {
        slug = default.to_string();
    }
    if slug.starts_with(|c: char| c.is_ascii_digit()) {
        slug = format!("{}_{}", default, slug);
    }
    if RESERVED.contains(&slug.as_str()) {
        slug.push_str("_app");
    }
    slug.truncate(MAX_SLUG_LEN);
    slug
}

/// `hash_files` → `HashFiles`.
pub fn pascal_case(slug: &str) -> String {
    slug.split('_')
        .filter(|s| !s.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// `hash_files` → `Hash Files`.
pub fn title_case(slug: &str) -> String {
    slug.split('_')
        .filter(|s| !s.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `s` is a well-formed slug.
pub fn is_slug(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && s.len() <= MAX_SLUG_LEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ax003_slug_hash_files() {
        assert_eq!(slugify("create a CLI tool to hash files", "tool"), "hash_files");
    }

    #[test]
    fn test_ax003_slug_timer() {
        assert_eq!(
            slugify("make a futuristic timer ui", "app"),
            "futuristic_timer"
        );
    }

    #[test]
    fn test_ax003_slug_strips_routing_words() {
        assert_eq!(slugify("memory-safe cli to parse args", "tool"), "parse_args");
        assert_eq!(slugify("fast microservice web api", "app"), "microservice");
    }

    #[test]
    fn test_ax003_slug_max_three_words() {
        assert_eq!(
            slugify("compute alpha beta gamma delta", "func"),
            "compute_alpha_beta"
        );
    }

    #[test]
    fn test_ax003_slug_default_when_empty() {
        assert_eq!(slugify("", "func"), "func");
        assert_eq!(slugify("make me a tool!!", "tool"), "tool");
    }

    #[test]
    fn test_ax003_slug_leading_digit() {
        assert_eq!(slugify("3d renderer", "func"), "func_3d_renderer");
    }

    #[test]
    fn test_ax003_slug_reserved() {
        assert_eq!(slugify("lambda", "func"), "lambda_app");
        assert_eq!(slugify("class", "func"), "class_app");
    }

    #[test]
    fn test_ax003_slug_rust_keywords() {
        for kw in [
            "loop", "let", "trait", "const", "static", "pub", "ref", "mut", "where", "unsafe",
            "extern", "dyn", "fn", "impl", "match", "mod", "struct", "async", "await", "move",
            "box", "yield", "typeof", "crate", "self", "super",
        ] {
            let slug = slugify(kw, "tool");
            assert_eq!(slug, format!("{}_app", kw), "{}", kw);
            assert!(is_slug(&slug));
        }
    }

    #[test]
    fn test_ax003_slug_non_ascii_dropped() {
        assert_eq!(slugify("café über tool", "tool"), "caf_ber");
    }

    #[test]
    fn test_ax003_pascal_and_title() {
        assert_eq!(pascal_case("hash_files"), "HashFiles");
        assert_eq!(pascal_case("health"), "Health");
        assert_eq!(title_case("hash_files"), "Hash Files");
    }

    #[test]
    fn test_ax003_is_slug() {
        assert!(is_slug("hash_files"));
        assert!(is_slug("func_3d"));
        assert!(!is_slug("3d"));
        assert!(!is_slug("Hash"));
        assert!(!is_slug(""));
        assert!(!is_slug("a-b"));
    }

    proptest! {
        #[test]
        fn prop_ax003_slug_always_valid(text in ".{0,120}") {
            let slug = slugify(&text, "func");
            prop_assert!(is_slug(&slug), "bad slug {:?} from {:?}", slug, text);
        }
    }
}
