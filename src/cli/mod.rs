//! AX-019: CLI subcommands: init, validate, classify, generate, serve,
//! status, verify, completions.

use crate::core::config::{self, AuroraConfig, CONFIG_FILE};
use crate::core::pipeline::{self, Router};
use crate::core::types::{Intent, LangChoice};
use crate::core::{codegen, output};
use crate::journal::eventlog::{event_log_path, read_events};
use crate::journal::verify;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde_json::json;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "aurora-x",
    version,
    about = "Prompt-to-scaffold router: classify intent, pick a language, render a project"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default aurora.yaml and create the output directory
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Validate aurora.yaml
    Validate {
        /// Path to aurora.yaml
        #[arg(short, long, default_value = CONFIG_FILE)]
        file: PathBuf,
    },

    /// Show how a prompt would be routed, without writing anything
    Classify {
        /// Natural-language prompt
        prompt: String,

        /// Target language (python, go, rust, csharp)
        #[arg(short, long)]
        lang: Option<String>,

        /// Path to aurora.yaml (supplies default_lang)
        #[arg(short, long, default_value = CONFIG_FILE)]
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate a project from a prompt
    Generate {
        /// Natural-language prompt
        prompt: String,

        /// Target language (python, go, rust, csharp)
        #[arg(short, long)]
        lang: Option<String>,

        /// Path to aurora.yaml
        #[arg(short, long, default_value = CONFIG_FILE)]
        file: PathBuf,

        /// Output directory (overrides config)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Run the HTTP service (POST /chat)
    Serve {
        /// Path to aurora.yaml
        #[arg(short, long, default_value = CONFIG_FILE)]
        file: PathBuf,

        /// Listen address (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },

    /// List generated projects
    Status {
        /// Path to aurora.yaml
        #[arg(short, long, default_value = CONFIG_FILE)]
        file: PathBuf,

        /// Output directory (overrides config)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Detect generated files that were edited or deleted
    Verify {
        /// Path to aurora.yaml
        #[arg(short, long, default_value = CONFIG_FILE)]
        file: PathBuf,

        /// Output directory (overrides config)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Exit non-zero on any finding (for CI)
        #[arg(long)]
        strict: bool,
    },

    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Init { path } => cmd_init(&path),
        Commands::Validate { file } => cmd_validate(&file),
        Commands::Classify {
            prompt,
            lang,
            file,
            json,
        } => cmd_classify(&prompt, lang.as_deref(), &file, json),
        Commands::Generate {
            prompt,
            lang,
            file,
            output_dir,
        } => cmd_generate(&prompt, lang.as_deref(), &file, output_dir),
        Commands::Serve { file, bind } => cmd_serve(&file, bind),
        Commands::Status { file, output_dir } => cmd_status(&resolve_output_dir(&file, output_dir)?),
        Commands::Verify {
            file,
            output_dir,
            strict,
        } => cmd_verify(&resolve_output_dir(&file, output_dir)?, strict),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "aurora-x", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load, override, and validate the config.
fn load_and_validate(file: &Path) -> Result<AuroraConfig, String> {
    let config = config::load_config(file)?;
    let errors = config::validate_config(&config);
    if errors.is_empty() {
        return Ok(config);
    }
    for e in &errors {
        eprintln!("  ERROR: {}", e);
    }
    Err("validation failed".to_string())
}

fn resolve_output_dir(file: &Path, output_dir: Option<PathBuf>) -> Result<PathBuf, String> {
    match output_dir {
        Some(dir) => Ok(dir),
        None => Ok(load_and_validate(file)?.output.dir),
    }
}

fn cmd_init(path: &Path) -> Result<(), String> {
    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        return Err(format!("{} already exists", config_path.display()));
    }

    let output_dir = path.join(config::DEFAULT_OUTPUT_DIR);
    std::fs::create_dir_all(&output_dir)
        .map_err(|e| format!("cannot create output dir: {}", e))?;
    std::fs::write(&config_path, config::default_config_yaml())
        .map_err(|e| format!("cannot write {}: {}", config_path.display(), e))?;

    println!("Initialized aurora-x project at {}", path.display());
    println!("  Created: {}", config_path.display());
    println!("  Created: {}/", output_dir.display());
    Ok(())
}

fn cmd_validate(file: &Path) -> Result<(), String> {
    let config = config::parse_config_file(file)?;
    let errors = config::validate_config(&config);

    if errors.is_empty() {
        println!(
            "OK: {} (bind {}, output {}, default lang {})",
            file.display(),
            config.server.bind,
            config.output.dir.display(),
            config.default_lang.as_deref().unwrap_or("auto")
        );
        Ok(())
    } else {
        for e in &errors {
            eprintln!("  ERROR: {}", e);
        }
        Err(format!("{} validation error(s)", errors.len()))
    }
}

/// Route a prompt the way `generate` would under the same config.
fn plan_with_config(
    prompt: &str,
    lang: Option<&str>,
    file: &Path,
) -> Result<(Intent, LangChoice), String> {
    let config = load_and_validate(file)?;
    pipeline::plan(prompt, lang, config.default_lang.as_deref()).map_err(|e| e.to_string())
}

fn cmd_classify(prompt: &str, lang: Option<&str>, file: &Path, as_json: bool) -> Result<(), String> {
    let (intent, choice) = plan_with_config(prompt, lang, file)?;
    let rendered = codegen::render(&intent, choice.lang);
    let files: Vec<&String> = rendered.files.keys().collect();

    if as_json {
        let value = json!({
            "intent": intent,
            "lang": choice.lang,
            "reason": choice.reason,
            "renderer": rendered.renderer,
            "project": rendered.project,
            "files": files,
            "hint": rendered.hint,
        });
        let text = serde_json::to_string_pretty(&value).map_err(|e| e.to_string())?;
        println!("{}", text);
        return Ok(());
    }

    println!("kind:     {}", intent.kind);
    println!("name:     {}", intent.name);
    if let Some(feature) = intent.field("feature") {
        println!("feature:  {}", feature);
    }
    println!("lang:     {} ({})", choice.lang, choice.reason);
    println!("renderer: {}", rendered.renderer);
    for f in files {
        println!("  file:   {}", f);
    }
    println!("run:      {}", rendered.hint);
    Ok(())
}

fn cmd_generate(
    prompt: &str,
    lang: Option<&str>,
    file: &Path,
    output_dir: Option<PathBuf>,
) -> Result<(), String> {
    let mut config = load_and_validate(file)?;
    if let Some(dir) = output_dir {
        config.output.dir = dir;
    }
    let router = Router::new(&config);
    let g = router.generate(prompt, lang).map_err(|e| e.to_string())?;

    println!(
        "Generated {} ({}, {} → {})",
        g.intent.name, g.intent.kind, g.choice.lang, g.output.renderer
    );
    println!("  Reason: {}", g.choice.reason);
    println!("  Dir:    {}", g.project.dir.display());
    for rel in &g.project.files {
        println!("  Wrote:  {}", g.project.dir.join(rel).display());
    }
    println!("  Run:    cd {} && {}", g.project.dir.display(), g.output.hint);
    Ok(())
}

fn cmd_serve(file: &Path, bind: Option<String>) -> Result<(), String> {
    let mut config = load_and_validate(file)?;
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .map_err(|e| format!("invalid bind address '{}': {}", config.server.bind, e))?;
    let router = Arc::new(Router::new(&config));

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("cannot start runtime: {}", e))?;
    rt.block_on(crate::server::serve(router, addr))
}

fn cmd_status(output_dir: &Path) -> Result<(), String> {
    let projects = output::list_projects(output_dir).map_err(|e| e.to_string())?;
    if projects.is_empty() {
        println!(
            "No generated projects in {}. Run `aurora-x generate` first.",
            output_dir.display()
        );
        return Ok(());
    }

    println!("Output: {} ({} projects)", output_dir.display(), projects.len());
    for (dir, m) in &projects {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        println!("  {}", name);
        println!(
            "    {} / {} → {} ({} files)",
            m.intent.kind,
            m.lang,
            m.renderer,
            m.files.len()
        );
        println!("    Generated: {}", m.generated_at);
        println!("    Run:       {}", m.hint);
    }

    let events = read_events(&event_log_path(output_dir)).map_err(|e| e.to_string())?;
    if !events.is_empty() {
        println!();
        println!("Journal: {} event(s)", events.len());
    }
    Ok(())
}

fn cmd_verify(output_dir: &Path, strict: bool) -> Result<(), String> {
    let (checked, findings) = verify::verify_all(output_dir).map_err(|e| e.to_string())?;
    println!("Checked {} project(s) in {}", checked, output_dir.display());

    if findings.is_empty() {
        println!("No drift detected.");
        return Ok(());
    }

    for f in &findings {
        println!("  DRIFTED: {}/{} ({})", f.project, f.file, f.detail);
        println!("    Expected: {}", f.expected_hash);
        println!("    Actual:   {}", f.actual_hash);
    }
    println!();
    println!("Drift detected: {} file(s)", findings.len());
    if strict {
        return Err(format!("{} drift finding(s)", findings.len()));
    }
    Ok(())
}
