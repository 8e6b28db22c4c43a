//! Output directory confinement.

use std::path::{Component, Path, PathBuf};

use super::error::OutputDirError;
use crate::domain::DEFAULT_OUTPUT_DIR_KEY;

/// Maps a client `output_dir` onto a directory under a fixed root.
///
/// - `"default"` resolves to `default_dir`
/// - relative paths are joined onto `root`
/// - absolute paths are taken literally
///
/// The result must stay under `root` after `.`/`..` are folded, and again
/// after symlinks are resolved when the directory is prepared.
#[derive(Debug, Clone)]
pub struct OutputDirPolicy {
    default_dir: PathBuf,
    root: PathBuf,
}

impl OutputDirPolicy {
    /// Create a policy. `default_dir` must lie under `root`.
    pub fn new(
        default_dir: impl AsRef<Path>,
        root: impl AsRef<Path>,
    ) -> Result<Self, OutputDirError> {
        let root = absolutize(root.as_ref())?;
        let default_dir = absolutize(default_dir.as_ref())?;
        if !default_dir.starts_with(&root) {
            return Err(OutputDirError::OutsideRoot {
                path: default_dir,
                root,
            });
        }
        Ok(Self { default_dir, root })
    }

    pub fn default_dir(&self) -> &Path {
        &self.default_dir
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a requested directory without touching the filesystem.
    pub fn resolve(&self, requested: &str) -> Result<PathBuf, OutputDirError> {
        if requested == DEFAULT_OUTPUT_DIR_KEY {
            return Ok(self.default_dir.clone());
        }
        if requested.trim().is_empty() {
            return Err(OutputDirError::Empty);
        }

        let candidate = Path::new(requested);
        let joined = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        };
        let resolved = normalize(&joined);

        if !resolved.starts_with(&self.root) {
            return Err(OutputDirError::OutsideRoot {
                path: resolved,
                root: self.root.clone(),
            });
        }
        Ok(resolved)
    }

    /// Resolve, create (with parents) and verify a requested directory.
    pub async fn prepare(&self, requested: &str) -> Result<PathBuf, OutputDirError> {
        let dir = self.resolve(requested)?;

        create_dir(&self.root).await?;
        let canonical_root = canonicalize(&self.root).await?;

        // Refuse to create anything beneath a symlink that points elsewhere.
        let existing = deepest_existing_ancestor(&dir).await;
        self.check_canonical(&canonicalize(&existing).await?, &canonical_root)?;

        ensure_directory(&dir).await?;
        self.check_canonical(&canonicalize(&dir).await?, &canonical_root)?;

        Ok(dir)
    }

    fn check_canonical(&self, path: &Path, canonical_root: &Path) -> Result<(), OutputDirError> {
        if path.starts_with(canonical_root) {
            Ok(())
        } else {
            Err(OutputDirError::OutsideRoot {
                path: path.to_path_buf(),
                root: self.root.clone(),
            })
        }
    }
}

/// Make a path absolute and fold `.`/`..` lexically.
fn absolutize(path: &Path) -> Result<PathBuf, OutputDirError> {
    if path.as_os_str().is_empty() {
        return Err(OutputDirError::Empty);
    }
    std::path::absolute(path)
        .map(|p| normalize(&p))
        .map_err(|e| OutputDirError::Resolve {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Lexical normalization. `..` at the filesystem root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

async fn deepest_existing_ancestor(path: &Path) -> PathBuf {
    for ancestor in path.ancestors() {
        if tokio::fs::symlink_metadata(ancestor).await.is_ok() {
            return ancestor.to_path_buf();
        }
    }
    PathBuf::from("/")
}

async fn canonicalize(path: &Path) -> Result<PathBuf, OutputDirError> {
    tokio::fs::canonicalize(path)
        .await
        .map_err(|e| OutputDirError::Resolve {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

async fn create_dir(path: &Path) -> Result<(), OutputDirError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| OutputDirError::CreateFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

async fn ensure_directory(path: &Path) -> Result<(), OutputDirError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(OutputDirError::NotADirectory(path.to_path_buf())),
        Err(_) => create_dir(path).await,
    }
}
