//! AX-022: Drift verification: compare generated files to manifest hashes.

use crate::core::error::Result;
use crate::core::output::{list_projects, load_manifest};
use crate::core::types::ProjectManifest;
use crate::journal::hasher;
use std::path::Path;

/// A single drift finding.
#[derive(Debug, Clone)]
pub struct DriftFinding {
    /// Project directory name
    pub project: String,
    /// File path relative to the project directory
    pub file: String,
    pub expected_hash: String,
    pub actual_hash: String,
    pub detail: String,
}

/// Check one generated file against its recorded hash.
pub fn check_file_drift(
    project_dir: &Path,
    rel: &str,
    expected_hash: &str,
) -> Option<DriftFinding> {
    let project = project_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let path = project_dir.join(rel);
    if !path.is_file() {
        return Some(DriftFinding {
            project,
            file: rel.to_string(),
            expected_hash: expected_hash.to_string(),
            actual_hash: "MISSING".to_string(),
            detail: format!("{} does not exist", rel),
        });
    }

    let actual = hasher::hash_file(&path).unwrap_or_else(|e| format!("ERROR:{}", e));
    if actual != expected_hash {
        Some(DriftFinding {
            project,
            file: rel.to_string(),
            expected_hash: expected_hash.to_string(),
            actual_hash: actual,
            detail: format!("{} content changed", rel),
        })
    } else {
        None
    }
}

/// Check every file recorded in a manifest.
pub fn detect_drift(project_dir: &Path, manifest: &ProjectManifest) -> Vec<DriftFinding> {
    manifest
        .files
        .iter()
        .filter_map(|(rel, expected)| check_file_drift(project_dir, rel, expected))
        .collect()
}

/// Verify one project directory. A directory without a manifest has nothing
/// to verify.
pub fn verify_project(project_dir: &Path) -> Result<Vec<DriftFinding>> {
    Ok(load_manifest(project_dir)?
        .map(|m| detect_drift(project_dir, &m))
        .unwrap_or_default())
}

/// Verify every project under an output directory. Returns the number of
/// projects checked and all findings.
pub fn verify_all(output_dir: &Path) -> Result<(usize, Vec<DriftFinding>)> {
    let projects = list_projects(output_dir)?;
    let findings = projects
        .iter()
        .flat_map(|(dir, manifest)| detect_drift(dir, manifest))
        .collect();
    Ok((projects.len(), findings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::output::write_project;
    use crate::core::types::{Intent, IntentKind, Lang, LangChoice, RenderOutput, Renderer};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn write_sample(output_dir: &Path, body: &str) -> PathBuf {
        let intent = Intent {
            kind: IntentKind::LibFunc,
            name: "factorial".to_string(),
            brief: "compute factorial".to_string(),
            fields: BTreeMap::new(),
        };
        let output = RenderOutput {
            renderer: Renderer::PythonLib,
            project: "factorial".to_string(),
            files: [
                ("factorial.py".to_string(), body.to_string()),
                ("tests/test_factorial.py".to_string(), "pass\n".to_string()),
            ]
            .into_iter()
            .collect(),
            hint: "python -m unittest discover -s tests".to_string(),
        };
        let choice = LangChoice::new(Lang::Python, "default: Python");
        write_project(output_dir, &intent, &choice, &output).unwrap().dir
    }

    #[test]
    fn test_ax022_no_drift() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = write_sample(tmp.path(), "def f(): pass\n");
        assert!(verify_project(&dir).unwrap().is_empty());
    }

    #[test]
    fn test_ax022_content_drift() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = write_sample(tmp.path(), "def f(): pass\n");
        std::fs::write(dir.join("factorial.py"), "edited\n").unwrap();

        let findings = verify_project(&dir).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].file, "factorial.py");
        assert!(findings[0].detail.contains("content changed"));
        assert_ne!(findings[0].actual_hash, findings[0].expected_hash);
    }

    #[test]
    fn test_ax022_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = write_sample(tmp.path(), "def f(): pass\n");
        std::fs::remove_file(dir.join("tests/test_factorial.py")).unwrap();

        let findings = verify_project(&dir).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].actual_hash, "MISSING");
    }

    #[test]
    fn test_ax022_no_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(verify_project(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_ax022_verify_all() {
        let tmp = tempfile::tempdir().unwrap();
        let a = write_sample(tmp.path(), "a\n");
        write_sample(tmp.path(), "b\n");
        std::fs::write(a.join("factorial.py"), "tampered\n").unwrap();

        let (checked, findings) = verify_all(tmp.path()).unwrap();
        assert_eq!(checked, 2);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].project,
            a.file_name().unwrap().to_string_lossy()
        );
    }
}
