//! AX-008: Content-addressed project output.
//!
//! Each render lands in `<output_dir>/<name>-<digest12>/`, where the digest is
//! a BLAKE3 composite over the rendered paths and contents. Identical renders
//! share a directory; different renders never collide. Files are written
//! atomically (temp file + rename) and a manifest records the generation.

use super::error::{AuroraError, Result};
use super::types::{Intent, LangChoice, ProjectManifest, RenderOutput};
use crate::journal::eventlog::now_rfc3339;
use crate::journal::hasher::{composite_hash, hash_string, short_digest};
use indexmap::IndexMap;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Manifest file name inside every generated project.
pub const MANIFEST_FILE: &str = ".aurora-manifest.json";

/// Manifest schema version.
pub const MANIFEST_SCHEMA: &str = "1.0";

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// A project written to disk.
#[derive(Debug, Clone)]
pub struct GeneratedProject {
    /// Project directory
    pub dir: PathBuf,

    /// Paths of the written files, relative to `dir`, in render order
    pub files: Vec<String>,

    /// Full `blake3:` digest of the render
    pub digest: String,
}

/// Digest of a render: composite over each path and its contents.
pub fn render_digest(output: &RenderOutput) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(output.files.len() * 2);
    for (path, contents) in &output.files {
        parts.push(path);
        parts.push(contents);
    }
    composite_hash(&parts)
}

/// Directory a render is written to.
pub fn project_dir(output_dir: &Path, name: &str, digest: &str) -> PathBuf {
    output_dir.join(format!("{}-{}", name, short_digest(digest)))
}

/// Reject absolute paths, `..`, and anything else that could leave the
/// project directory.
pub fn check_relative_path(rel: &str) -> Result<()> {
    let path = Path::new(rel);
    let ok = !rel.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if ok {
        Ok(())
    } else {
        Err(AuroraError::Render(format!("unsafe output path: {}", rel)))
    }
}

/// Write `contents` to `path` via a sibling temp file and rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AuroraError::io(parent, e))?;
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(
        ".{}.{}-{}.tmp",
        file_name,
        std::process::id(),
        TMP_SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    std::fs::write(&tmp_path, contents).map_err(|e| AuroraError::io(&tmp_path, e))?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(AuroraError::io(path, e));
    }
    Ok(())
}

/// Write every rendered file plus the manifest.
///
/// An existing manifest with the same digest is left untouched, so repeating
/// a request leaves the directory byte-identical.
pub fn write_project(
    output_dir: &Path,
    intent: &Intent,
    choice: &LangChoice,
    output: &RenderOutput,
) -> Result<GeneratedProject> {
    for rel in output.files.keys() {
        check_relative_path(rel)?;
    }

    let digest = render_digest(output);
    let dir = project_dir(output_dir, &intent.name, &digest);

    let mut hashes = IndexMap::new();
    for (rel, contents) in &output.files {
        write_atomic(&dir.join(rel), contents.as_bytes())?;
        hashes.insert(rel.clone(), hash_string(contents));
    }

    let current = matches!(load_manifest(&dir), Ok(Some(ref m)) if m.digest == digest);
    if !current {
        let manifest = ProjectManifest {
            schema: MANIFEST_SCHEMA.to_string(),
            generator: format!("aurora-x {}", env!("CARGO_PKG_VERSION")),
            generated_at: now_rfc3339(),
            digest: digest.clone(),
            intent: intent.clone(),
            lang: choice.lang,
            reason: choice.reason.clone(),
            renderer: output.renderer,
            hint: output.hint.clone(),
            files: hashes,
        };
        let json = serde_json::to_string_pretty(&manifest)?;
        write_atomic(&dir.join(MANIFEST_FILE), json.as_bytes())?;
    }

    Ok(GeneratedProject {
        dir,
        files: output.files.keys().cloned().collect(),
        digest,
    })
}

/// Load a project's manifest. Returns None if the project has none.
pub fn load_manifest(dir: &Path) -> Result<Option<ProjectManifest>> {
    let path = dir.join(MANIFEST_FILE);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(AuroraError::io(&path, e)),
    };
    let manifest = serde_json::from_str(&content)?;
    Ok(Some(manifest))
}

/// Every project under `output_dir` that carries a manifest, sorted by
/// directory name. A missing output directory has no projects; unreadable
/// manifests are skipped with a warning.
pub fn list_projects(output_dir: &Path) -> Result<Vec<(PathBuf, ProjectManifest)>> {
    let read_dir = match std::fs::read_dir(output_dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(AuroraError::io(output_dir, e)),
    };
    let mut dirs: Vec<PathBuf> = read_dir
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    let mut projects = Vec::new();
    for dir in dirs {
        match load_manifest(&dir) {
            Ok(Some(manifest)) => projects.push((dir, manifest)),
            Ok(None) => {}
            Err(e) => tracing::warn!(dir = %dir.display(), error = %e, "skipping project"),
        }
    }
    Ok(projects)
}
