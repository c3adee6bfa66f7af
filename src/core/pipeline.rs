//! AX-016: Generation pipeline shared by the CLI and the HTTP service.
//!
//! prompt → classify → resolve language → render → write → journal.

use super::classifier::classify;
use super::codegen;
use super::config::AuroraConfig;
use super::error::{AuroraError, Result};
use super::lang_select::resolve_language;
use super::output::{write_project, GeneratedProject};
use super::types::{Intent, JournalEvent, LangChoice, RenderOutput};
use crate::journal::eventlog::{generate_run_id, EventLog};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Result of one successful generation.
#[derive(Debug, Clone)]
pub struct Generation {
    pub run_id: String,
    pub intent: Intent,
    pub choice: LangChoice,
    pub output: RenderOutput,
    pub project: GeneratedProject,
}

/// Classify a prompt and pick its language without rendering anything.
pub fn plan(
    prompt: &str,
    explicit_lang: Option<&str>,
    default_lang: Option<&str>,
) -> Result<(Intent, LangChoice)> {
    if prompt.trim().is_empty() {
        return Err(AuroraError::MissingPrompt);
    }
    let intent = classify(prompt);
    let choice = resolve_language(explicit_lang, prompt, default_lang)?;
    Ok((intent, choice))
}

/// Intent router: owns the resolved configuration and the journal.
#[derive(Debug)]
pub struct Router {
    output_dir: PathBuf,
    default_lang: Option<String>,
    journal: Option<EventLog>,
}

impl Router {
    pub fn new(config: &AuroraConfig) -> Self {
        let output_dir = config.output.dir.clone();
        let journal = config.output.journal.then(|| EventLog::new(&output_dir));
        Self {
            output_dir,
            default_lang: config.default_lang.clone(),
            journal,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn default_lang(&self) -> Option<&str> {
        self.default_lang.as_deref()
    }

    pub fn journal_enabled(&self) -> bool {
        self.journal.is_some()
    }

    /// Run the full pipeline for one prompt.
    pub fn generate(&self, prompt: &str, explicit_lang: Option<&str>) -> Result<Generation> {
        let (intent, choice) = plan(prompt, explicit_lang, self.default_lang())?;
        let run_id = generate_run_id();
        let started = Instant::now();

        self.record(JournalEvent::GenerationStarted {
            run_id: run_id.clone(),
            kind: intent.kind,
            lang: choice.lang,
            name: intent.name.clone(),
        });

        let output = codegen::render(&intent, choice.lang);
        let project = match write_project(&self.output_dir, &intent, &choice, &output) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(run_id = %run_id, error = %e, "generation failed");
                self.record(JournalEvent::GenerationFailed {
                    run_id,
                    error: e.to_string(),
                });
                return Err(e);
            }
        };

        let duration = started.elapsed().as_secs_f64();
        tracing::info!(
            run_id = %run_id,
            kind = %intent.kind,
            lang = %choice.lang,
            renderer = %output.renderer,
            dir = %project.dir.display(),
            files = project.files.len(),
            "project generated"
        );
        self.record(JournalEvent::ProjectWritten {
            run_id: run_id.clone(),
            dir: project.dir.display().to_string(),
            digest: project.digest.clone(),
            files: u32::try_from(project.files.len()).unwrap_or(u32::MAX),
            duration_seconds: duration,
        });

        Ok(Generation {
            run_id,
            intent,
            choice,
            output,
            project,
        })
    }

    /// Journal failures never fail a generation.
    fn record(&self, event: JournalEvent) {
        if let Some(journal) = &self.journal {
            if let Err(e) = journal.append(event) {
                tracing::warn!(path = %journal.path().display(), error = %e, "journal append failed");
            }
        }
    }
}
