//! AX-001: Core types: intents, languages, renderers, rendered output.
//!
//! Everything here is request-scoped: an [`Intent`] and a [`LangChoice`] are
//! built for one prompt and dropped once the files are on disk. Types that
//! cross the HTTP boundary or land in manifests derive Serialize/Deserialize.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Intent
// ============================================================================

/// What kind of artifact a prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    WebApp,
    CliTool,
    LibFunc,
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WebApp => write!(f, "web_app"),
            Self::CliTool => write!(f, "cli_tool"),
            Self::LibFunc => write!(f, "lib_func"),
        }
    }
}

/// Classification result for a single prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Artifact kind
    pub kind: IntentKind,

    /// Identifier-safe slug (`[a-z][a-z0-9_]*`)
    pub name: String,

    /// The trimmed prompt, used as the artifact description
    pub brief: String,

    /// Extra hints picked up by the classifier (e.g. `feature = "timer"`)
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl Intent {
    /// Look up a classifier field.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

// ============================================================================
// Language
// ============================================================================

/// Target programming language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Python,
    Go,
    Rust,
    Csharp,
}

impl Lang {
    pub const ALL: [Lang; 4] = [Lang::Python, Lang::Go, Lang::Rust, Lang::Csharp];
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Python => write!(f, "python"),
            Self::Go => write!(f, "go"),
            Self::Rust => write!(f, "rust"),
            Self::Csharp => write!(f, "csharp"),
        }
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "py" | "python3" => Ok(Self::Python),
            "go" | "golang" => Ok(Self::Go),
            "rust" | "rs" => Ok(Self::Rust),
            "csharp" | "c#" | "cs" | "dotnet" | ".net" => Ok(Self::Csharp),
            other => Err(format!("unsupported lang: {}", other)),
        }
    }
}

/// Selected language plus a human-readable justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangChoice {
    pub lang: Lang,
    pub reason: String,
}

impl LangChoice {
    pub fn new(lang: Lang, reason: impl Into<String>) -> Self {
        Self {
            lang,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Renderers and rendered output
// ============================================================================

/// Generator chosen by the codegen decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Renderer {
    FlaskApp,
    PythonCli,
    PythonLib,
    GoService,
    RustCli,
    CsharpWebApi,
}

impl fmt::Display for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlaskApp => write!(f, "flask_app"),
            Self::PythonCli => write!(f, "python_cli"),
            Self::PythonLib => write!(f, "python_lib"),
            Self::GoService => write!(f, "go_service"),
            Self::RustCli => write!(f, "rust_cli"),
            Self::CsharpWebApi => write!(f, "csharp_web_api"),
        }
    }
}

/// Source files produced by one renderer, keyed by relative path.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub renderer: Renderer,

    /// Project name (slug, or PascalCase for C#)
    pub project: String,

    /// Relative path → file contents (insertion-ordered)
    pub files: IndexMap<String, String>,

    /// How to run what was generated, relative to the project directory
    pub hint: String,
}

// ============================================================================
// Manifest
// ============================================================================

/// Record written next to each generated project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// Schema version
    pub schema: String,

    /// Generator version
    pub generator: String,

    /// When the project was written
    pub generated_at: String,

    /// BLAKE3 composite digest over the rendered files
    pub digest: String,

    pub intent: Intent,
    pub lang: Lang,
    pub reason: String,
    pub renderer: Renderer,
    pub hint: String,

    /// Relative path → `blake3:{hex}` of the written contents
    pub files: IndexMap<String, String>,
}

// ============================================================================
// Journal events
// ============================================================================

/// Event recorded in the append-only generation journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum JournalEvent {
    GenerationStarted {
        run_id: String,
        kind: IntentKind,
        lang: Lang,
        name: String,
    },
    ProjectWritten {
        run_id: String,
        dir: String,
        digest: String,
        files: u32,
        duration_seconds: f64,
    },
    GenerationFailed {
        run_id: String,
        error: String,
    },
}

/// Timestamped event wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampedEvent {
    pub ts: String,
    #[serde(flatten)]
    pub event: JournalEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ax001_kind_display_matches_serde() {
        for kind in [IntentKind::WebApp, IntentKind::CliTool, IntentKind::LibFunc] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn test_ax001_lang_display_matches_serde() {
        for lang in Lang::ALL {
            let json = serde_json::to_string(&lang).unwrap();
            assert_eq!(json, format!("\"{}\"", lang));
        }
    }

    #[test]
    fn test_ax001_lang_aliases() {
        assert_eq!("Python".parse::<Lang>().unwrap(), Lang::Python);
        assert_eq!("golang".parse::<Lang>().unwrap(), Lang::Go);
        assert_eq!(" rs ".parse::<Lang>().unwrap(), Lang::Rust);
        assert_eq!("C#".parse::<Lang>().unwrap(), Lang::Csharp);
        assert_eq!(".NET".parse::<Lang>().unwrap(), Lang::Csharp);
    }

    #[test]
    fn test_ax001_lang_unsupported() {
        let err = "cobol".parse::<Lang>().unwrap_err();
        assert_eq!(err, "unsupported lang: cobol");
    }

    #[test]
    fn test_ax001_intent_field() {
        let mut fields = BTreeMap::new();
        fields.insert("feature".to_string(), "timer".to_string());
        let intent = Intent {
            kind: IntentKind::WebApp,
            name: "timer".to_string(),
            brief: "timer".to_string(),
            fields,
        };
        assert_eq!(intent.field("feature"), Some("timer"));
        assert_eq!(intent.field("theme"), None);
    }

    #[test]
    fn test_ax001_journal_event_serde() {
        let event = JournalEvent::GenerationStarted {
            run_id: "g-abc".to_string(),
            kind: IntentKind::CliTool,
            lang: Lang::Rust,
            name: "parse_args".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"generation_started\""));
        assert!(json.contains("\"kind\":\"cli_tool\""));
        assert!(json.contains("\"lang\":\"rust\""));
    }

    #[test]
    fn test_ax001_renderer_display() {
        assert_eq!(Renderer::FlaskApp.to_string(), "flask_app");
        assert_eq!(Renderer::CsharpWebApi.to_string(), "csharp_web_api");
    }
}
