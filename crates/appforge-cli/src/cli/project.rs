//! Loading and persisting a project directory as a source bundle.
//!
//! The walk respects `.gitignore` but includes dotfiles (a project may
//! carry `.github/` content of its own); the `.git` directory itself and
//! the assembled preview output are always skipped.

use std::path::Path;

use anyhow::Context;
use ignore::WalkBuilder;
use tracing::warn;

use appforge_types::bundle::SourceBundle;

/// Default output name of `appforge preview`; never pushed.
const PREVIEW_OUTPUT: &str = "preview.html";

/// Read every project file under `dir` into a bundle.
///
/// Non-UTF-8 files and files with paths the bundle rejects are skipped
/// with a warning rather than aborting the load.
pub fn load_bundle(dir: &Path) -> anyhow::Result<SourceBundle> {
    let mut bundle = SourceBundle::new();

    let walk = WalkBuilder::new(dir)
        .hidden(false)
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    for entry in walk {
        let entry = entry?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(dir)
            .with_context(|| format!("walk escaped {}", dir.display()))?;
        let key = relative.to_string_lossy().replace('\\', "/");
        if key == PREVIEW_OUTPUT {
            continue;
        }

        let content = match std::fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %entry.path().display(), error = %err, "skipping unreadable file");
                continue;
            }
        };

        if let Err(err) = bundle.insert(key.clone(), content) {
            warn!(path = %key, error = %err, "skipping file");
        }
    }

    Ok(bundle)
}

/// Write every bundle file back under `dir`, creating subdirectories as
/// needed.
pub async fn write_bundle(dir: &Path, bundle: &SourceBundle) -> anyhow::Result<()> {
    for (path, content) in bundle.iter() {
        let target = dir.join(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, content)
            .await
            .with_context(|| format!("failed to write {}", target.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_bundle_reads_nested_files() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("index.html"), "<html></html>").unwrap();
        std::fs::create_dir_all(tmp.path().join("assets")).unwrap();
        std::fs::write(tmp.path().join("assets/app.css"), "body{}").unwrap();

        let bundle = load_bundle(tmp.path()).unwrap();
        assert_eq!(bundle.get("index.html"), Some("<html></html>"));
        assert_eq!(bundle.get("assets/app.css"), Some("body{}"));
    }

    #[test]
    fn test_load_bundle_skips_git_dir_and_preview_output() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("main.js"), "x()").unwrap();
        std::fs::write(tmp.path().join("preview.html"), "<html>old</html>").unwrap();
        std::fs::create_dir_all(tmp.path().join(".git")).unwrap();
        std::fs::write(tmp.path().join(".git/HEAD"), "ref: main").unwrap();

        let bundle = load_bundle(tmp.path()).unwrap();
        assert!(bundle.contains("main.js"));
        assert!(!bundle.contains("preview.html"));
        assert!(bundle.paths().all(|p| !p.starts_with(".git/")));
    }

    #[test]
    fn test_load_bundle_includes_dotfiles() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join(".github/workflows")).unwrap();
        std::fs::write(tmp.path().join(".github/workflows/ci.yml"), "name: ci").unwrap();

        let bundle = load_bundle(tmp.path()).unwrap();
        assert!(bundle.contains(".github/workflows/ci.yml"));
    }

    #[tokio::test]
    async fn test_write_bundle_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let mut bundle = SourceBundle::new();
        bundle.insert("index.html", "<html></html>").unwrap();
        bundle.insert("js/app.js", "go()").unwrap();

        write_bundle(tmp.path(), &bundle).await.unwrap();

        let loaded = load_bundle(tmp.path()).unwrap();
        assert_eq!(loaded, bundle);
    }
}
