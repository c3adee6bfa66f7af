//! AX-002: Intent classification: free text → [`Intent`].
//!
//! Ordered keyword rules, first match wins:
//! 1. timer / countdown → web_app (feature = timer)
//! 2. web keywords → web_app
//! 3. cli keywords → cli_tool (feature = hash when hashing is mentioned)
//! 4. anything else → lib_func (feature = factorial, fibonacci, ... when recognized)
//!
//! Keywords match on word boundaries, so "build" never counts as "ui".

use super::slug::slugify;
use super::types::{Intent, IntentKind};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

fn keyword_re(pattern: &str) -> Regex {
    Regex::new(&format!(r"\b(?:{})\b", pattern)).expect("static keyword pattern")
}

static TIMER_RE: LazyLock<Regex> = LazyLock::new(|| keyword_re(r"timers?|countdowns?"));

static WEB_RE: LazyLock<Regex> = LazyLock::new(|| {
    keyword_re(
        r"ui|gui|web|website|webapp|web-app|webpage|dashboard|page|api|microservices?|servers?|services?|flask|frontend",
    )
});

static CLI_RE: LazyLock<Regex> = LazyLock::new(|| {
    keyword_re(r"cli|script|scripts|tool|tools|command[- ]line|terminal|argparse|shell")
});

static HASH_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_re(r"hash|hashes|hashing|md5|sha\d*|checksums?"));

/// Library features recognized in lib_func prompts, in priority order.
static LIB_FEATURES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (keyword_re(r"factorials?"), "factorial"),
        (keyword_re(r"fibonacci|fib"), "fibonacci"),
        (keyword_re(r"palindromes?"), "palindrome"),
    ]
});

static REVERSE_RE: LazyLock<Regex> = LazyLock::new(|| keyword_re(r"reverse|reversed|reversing"));
static STRING_RE: LazyLock<Regex> = LazyLock::new(|| keyword_re(r"strings?|text|words?"));

/// Default slug per kind when the prompt has no usable words.
pub fn default_name(kind: IntentKind) -> &'static str {
    match kind {
        IntentKind::WebApp => "app",
        IntentKind::CliTool => "tool",
        IntentKind::LibFunc => "func",
    }
}

/// Classify a prompt. Total: every input yields an intent, lib_func by default.
pub fn classify(text: &str) -> Intent {
    let brief = text.trim().to_string();
    let lowered = brief.to_lowercase();
    let mut fields = BTreeMap::new();

    let kind = if TIMER_RE.is_match(&lowered) {
        fields.insert("feature".to_string(), "timer".to_string());
        IntentKind::WebApp
    } else if WEB_RE.is_match(&lowered) {
        IntentKind::WebApp
    } else if CLI_RE.is_match(&lowered) {
        if HASH_RE.is_match(&lowered) {
            fields.insert("feature".to_string(), "hash".to_string());
        }
        IntentKind::CliTool
    } else {
        if let Some(feature) = lib_feature(&lowered) {
            fields.insert("feature".to_string(), feature.to_string());
        }
        IntentKind::LibFunc
    };

    Intent {
        kind,
        name: slugify(&brief, default_name(kind)),
        brief,
        fields,
    }
}

fn lib_feature(lowered: &str) -> Option<&'static str> {
    if let Some((_, feature)) = LIB_FEATURES.iter().find(|(re, _)| re.is_match(lowered)) {
        return Some(feature);
    }
    if REVERSE_RE.is_match(lowered) && STRING_RE.is_match(lowered) {
        return Some("reverse_string");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slug::is_slug;
    use proptest::prelude::*;

    #[test]
    fn test_ax002_futuristic_timer() {
        let intent = classify("make a futuristic timer ui");
        assert_eq!(intent.kind, IntentKind::WebApp);
        assert_eq!(intent.field("feature"), Some("timer"));
        assert_eq!(intent.brief, "make a futuristic timer ui");
    }

    #[test]
    fn test_ax002_countdown_beats_cli() {
        let intent = classify("countdown cli script");
        assert_eq!(intent.kind, IntentKind::WebApp);
        assert_eq!(intent.field("feature"), Some("timer"));
    }

    #[test]
    fn test_ax002_web_keywords() {
        for prompt in [
            "fast microservice web api",
            "enterprise web api with health",
            "a dashboard for sales",
            "simple flask page",
            "windows service",
            "a rest server",
            "fast service for orders",
            "two backend servers",
        ] {
            assert_eq!(classify(prompt).kind, IntentKind::WebApp, "{}", prompt);
        }
    }

    #[test]
    fn test_ax002_build_is_not_ui() {
        let intent = classify("build a command line tool for file processing");
        assert_eq!(intent.kind, IntentKind::CliTool);
        assert!(intent.fields.is_empty());
    }

    #[test]
    fn test_ax002_cli_hash_feature() {
        let intent = classify("create a CLI tool to hash files");
        assert_eq!(intent.kind, IntentKind::CliTool);
        assert_eq!(intent.field("feature"), Some("hash"));
        assert_eq!(intent.name, "hash_files");
    }

    #[test]
    fn test_ax002_cli_sha256() {
        let intent = classify("script that prints sha256 checksums");
        assert_eq!(intent.kind, IntentKind::CliTool);
        assert_eq!(intent.field("feature"), Some("hash"));
    }

    #[test]
    fn test_ax002_web_wins_over_cli() {
        assert_eq!(classify("cli tool with a web ui").kind, IntentKind::WebApp);
    }

    #[test]
    fn test_ax002_lib_default() {
        let intent = classify("sort numbers descending");
        assert_eq!(intent.kind, IntentKind::LibFunc);
        assert!(intent.fields.is_empty());
        assert_eq!(intent.name, "sort_numbers_descending");
    }

    #[test]
    fn test_ax002_lib_features() {
        assert_eq!(
            classify("compute factorial of n").field("feature"),
            Some("factorial")
        );
        assert_eq!(
            classify("nth fibonacci number").field("feature"),
            Some("fibonacci")
        );
        assert_eq!(
            classify("check if a word is a palindrome").field("feature"),
            Some("palindrome")
        );
        assert_eq!(
            classify("reverse a string").field("feature"),
            Some("reverse_string")
        );
        assert_eq!(classify("reverse a list").field("feature"), None);
    }

    #[test]
    fn test_ax002_empty_prompt() {
        let intent = classify("   ");
        assert_eq!(intent.kind, IntentKind::LibFunc);
        assert_eq!(intent.name, "func");
        assert_eq!(intent.brief, "");
    }

    #[test]
    fn test_ax002_default_names() {
        assert_eq!(default_name(IntentKind::WebApp), "app");
        assert_eq!(classify("web ui").name, "app");
        assert_eq!(classify("cli tool").name, "tool");
    }

    proptest! {
        #[test]
        fn prop_ax002_total_and_slugged(text in ".{0,200}") {
            let intent = classify(&text);
            prop_assert!(is_slug(&intent.name));
            prop_assert_eq!(intent.brief.as_str(), text.trim());
        }

        #[test]
        fn prop_ax002_timer_always_web(prefix in "[a-z ]{0,30}", suffix in "[a-z ]{0,30}") {
            let intent = classify(&format!("{} timer {}", prefix, suffix));
            prop_assert_eq!(intent.kind, IntentKind::WebApp);
            prop_assert_eq!(intent.field("feature"), Some("timer"));
        }

        #[test]
        fn prop_ax002_digits_only_is_lib(text in "[0-9 ]{0,40}") {
            prop_assert_eq!(classify(&text).kind, IntentKind::LibFunc);
        }
    }
}
