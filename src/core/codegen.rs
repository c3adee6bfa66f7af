//! AX-006: Code generation: dispatch to template renderers.
//!
//! The decision table is total over (kind, lang):
//! - go → GoService, rust → RustCli, csharp → CsharpWebApi, for any kind
//! - python: web_app → FlaskApp, cli_tool → PythonCli, lib_func → PythonLib

use super::types::{Intent, IntentKind, Lang, RenderOutput, Renderer};
use crate::templates;
use indexmap::IndexMap;

/// Choose the renderer for an intent kind and language.
pub fn select_renderer(kind: IntentKind, lang: Lang) -> Renderer {
    match (lang, kind) {
        (Lang::Go, _) => Renderer::GoService,
        (Lang::Rust, _) => Renderer::RustCli,
        (Lang::Csharp, _) => Renderer::CsharpWebApi,
        (Lang::Python, IntentKind::WebApp) => Renderer::FlaskApp,
        (Lang::Python, IntentKind::CliTool) => Renderer::PythonCli,
        (Lang::Python, IntentKind::LibFunc) => Renderer::PythonLib,
    }
}

/// How to run a generated project, from inside its directory.
pub fn run_hint(renderer: Renderer, name: &str) -> String {
    match renderer {
        Renderer::FlaskApp => format!(
            "PORT={} python {}",
            templates::flask_app::DEFAULT_PORT,
            templates::flask_app::FILE_NAME
        ),
        Renderer::PythonCli => format!("python {} --help", templates::python_cli::file_name(name)),
        Renderer::PythonLib => "python -m unittest discover -s tests".to_string(),
        Renderer::GoService => format!(
            "PORT={} go run .",
            templates::go_service::DEFAULT_PORT
        ),
        Renderer::RustCli => format!(
            "cargo build --release && ./target/release/{} --help",
            name
        ),
        Renderer::CsharpWebApi => format!(
            "PORT={} dotnet run",
            templates::csharp_api::DEFAULT_PORT
        ),
    }
}

/// Render every file for an intent in the given language.
pub fn render(intent: &Intent, lang: Lang) -> RenderOutput {
    let renderer = select_renderer(intent.kind, lang);
    let name = intent.name.as_str();
    let brief = intent.brief.as_str();

    let (project, files) = match renderer {
        Renderer::FlaskApp => (
            name.to_string(),
            single(
                templates::flask_app::FILE_NAME,
                templates::flask_app::render_app(name, brief, &intent.fields),
            ),
        ),
        Renderer::PythonCli => (
            name.to_string(),
            single(
                &templates::python_cli::file_name(name),
                templates::python_cli::render_cli(name, brief, &intent.fields),
            ),
        ),
        Renderer::PythonLib => (
            name.to_string(),
            templates::python_lib::render_func(name, brief, &intent.fields),
        ),
        Renderer::GoService => (
            name.to_string(),
            templates::go_service::render_service(name, brief),
        ),
        Renderer::RustCli => (name.to_string(), templates::rust_cli::render_cli(name, brief)),
        Renderer::CsharpWebApi => (
            templates::csharp_api::project_name(name),
            templates::csharp_api::render_api(name, brief),
        ),
    };

    RenderOutput {
        renderer,
        project,
        files,
        hint: run_hint(renderer, name),
    }
}

fn single(path: &str, contents: String) -> IndexMap<String, String> {
    let mut files = IndexMap::new();
    files.insert(path.to_string(), contents);
    files
}
