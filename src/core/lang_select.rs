//! AX-004: Target language selection.
//!
//! Precedence: explicit request > `AURORA_DEFAULT_LANG` > keyword rules > python.

use super::error::AuroraError;
use super::types::{Lang, LangChoice};
use regex::Regex;
use std::sync::LazyLock;

/// Environment variable that overrides keyword-based selection.
pub const DEFAULT_LANG_ENV: &str = "AURORA_DEFAULT_LANG";

fn keyword_re(pattern: &str) -> Regex {
    Regex::new(&format!(r"(?:^|[^a-z0-9])(?:{})(?:$|[^a-z0-9])", pattern))
        .expect("static keyword pattern")
}

static SPEED_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_re(r"fast|faster|high-performance|high performance|performant|low-latency"));
static WEB_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_re(r"web|api|apis|service|services|microservices?"));
static MEMORY_SAFE_RE: LazyLock<Regex> = LazyLock::new(|| keyword_re(r"memory-safe|memory safe"));
static CLI_RE: LazyLock<Regex> = LazyLock::new(|| keyword_re(r"cli|command-line|command line"));
static DOTNET_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_re(r"enterprise|windows|\.net|dotnet|c#"));

/// Pick a language from prompt keywords, honoring an override value.
///
/// `env_override` is the raw value of [`DEFAULT_LANG_ENV`]; values that do not
/// name a supported language are ignored.
pub fn pick_language(text: &str, env_override: Option<&str>) -> LangChoice {
    if let Some(lang) = env_override.and_then(|v| v.parse::<Lang>().ok()) {
        return LangChoice::new(lang, format!("{} override", DEFAULT_LANG_ENV));
    }

    let t = text.to_lowercase();
    if SPEED_RE.is_match(&t) && WEB_RE.is_match(&t) {
        LangChoice::new(Lang::Go, "fast web/api service: Go")
    } else if MEMORY_SAFE_RE.is_match(&t) && CLI_RE.is_match(&t) {
        LangChoice::new(Lang::Rust, "memory-safe CLI: Rust")
    } else if DOTNET_RE.is_match(&t) {
        LangChoice::new(Lang::Csharp, "enterprise/Windows/.NET: C#")
    } else {
        LangChoice::new(Lang::Python, "default: Python")
    }
}

/// [`pick_language`] with the override read from the process environment.
pub fn pick_language_from_env(text: &str) -> LangChoice {
    let env = std::env::var(DEFAULT_LANG_ENV).ok();
    pick_language(text, env.as_deref())
}

/// Resolve the language for a request. An explicit language wins; an
/// explicit language we do not support is a client error.
pub fn resolve_language(
    explicit: Option<&str>,
    text: &str,
    default_override: Option<&str>,
) -> Result<LangChoice, AuroraError> {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw
            .parse::<Lang>()
            .map(|lang| LangChoice::new(lang, "requested explicitly"))
            .map_err(|_| AuroraError::UnsupportedLang(raw.to_string())),
        None => Ok(pick_language(text, default_override)),
    }
}
