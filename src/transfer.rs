//! File-transfer collaborators used to fetch finished exports
//!
//! The materializer only ever calls [`FileTransfer::download`]; opening and
//! closing connections belongs to the implementation. Two backends ship with
//! the crate:
//!
//! - [`LocalFileTransfer`]: copies from a directory where the remote store is
//!   mounted or synced
//! - [`NoOpFileTransfer`]: stub that reports the operation as unsupported

use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

/// Fetches a file from the remote export store
///
/// Implementations report failures synchronously; callers do not retry.
///
/// # Examples
///
/// ```no_run
/// use wca_export::transfer::{FileTransfer, LocalFileTransfer};
/// use std::path::Path;
///
/// let transfer = LocalFileTransfer::new("/mnt/wca-ftp");
/// transfer.download("/download/export.csv", Path::new("/tmp/export.csv"))?;
/// # Ok::<(), wca_export::Error>(())
/// ```
pub trait FileTransfer: Send + Sync {
    /// Copy `remote_path` from the store to `local_path`
    ///
    /// # Errors
    ///
    /// Returns an error if the remote file cannot be read or the local file
    /// cannot be written.
    fn download(&self, remote_path: &str, local_path: &Path) -> Result<()>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Transfer backend for a remote store that is reachable as a local directory
#[derive(Clone, Debug)]
pub struct LocalFileTransfer {
    remote_root: PathBuf,
}

impl LocalFileTransfer {
    /// Backend rooted at `remote_root`; remote paths resolve beneath it
    pub fn new(remote_root: impl Into<PathBuf>) -> Self {
        Self {
            remote_root: remote_root.into(),
        }
    }

    /// Directory remote paths are resolved against
    pub fn remote_root(&self) -> &Path {
        &self.remote_root
    }

    /// Resolve a remote path beneath the root, refusing to escape it
    fn resolve(&self, remote_path: &str, local_path: &Path) -> Result<PathBuf> {
        let mut resolved = self.remote_root.clone();
        for component in Path::new(remote_path).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::RootDir | Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) => {
                    return Err(self.failure(remote_path, local_path, "path escapes the remote root"));
                }
            }
        }
        if resolved == self.remote_root {
            return Err(self.failure(remote_path, local_path, "no remote file name"));
        }
        Ok(resolved)
    }

    fn failure(&self, remote: &str, local: &Path, reason: impl Into<String>) -> Error {
        Error::Transfer {
            remote: remote.to_string(),
            local: local.to_path_buf(),
            reason: reason.into(),
        }
    }
}

impl FileTransfer for LocalFileTransfer {
    fn download(&self, remote_path: &str, local_path: &Path) -> Result<()> {
        let source = self.resolve(remote_path, local_path)?;

        if let Some(parent) = local_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                self.failure(
                    remote_path,
                    local_path,
                    format!("cannot create {}: {e}", parent.display()),
                )
            })?;
        }

        let bytes = std::fs::copy(&source, local_path)
            .map_err(|e| self.failure(remote_path, local_path, e.to_string()))?;

        debug!(
            remote = remote_path,
            source = %source.display(),
            local = %local_path.display(),
            bytes,
            "copied export from remote root"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

/// Transfer backend used when no store is configured
///
/// Every download fails with [`Error::NotSupported`], so a caller that asks
/// for a local copy without configuring a backend hears about it.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpFileTransfer;

impl FileTransfer for NoOpFileTransfer {
    fn download(&self, _remote_path: &str, _local_path: &Path) -> Result<()> {
        Err(Error::NotSupported(
            "downloading exports requires a file transfer backend. \
             Configure transfer.remote_root or supply a FileTransfer implementation."
                .into(),
        ))
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn noop_reports_not_supported() {
        let result = NoOpFileTransfer.download("/a.csv", Path::new("/tmp/a.csv"));
        assert!(matches!(result, Err(Error::NotSupported(_))));
        assert_eq!(NoOpFileTransfer.name(), "noop");
    }

    #[test]
    fn local_copies_into_new_directory() {
        let remote = TempDir::new().unwrap();
        let local = TempDir::new().unwrap();
        std::fs::create_dir_all(remote.path().join("download")).unwrap();
        std::fs::write(remote.path().join("download/export.csv"), "Email\na@b.c\n").unwrap();

        let target = local.path().join("nested/dir/data.csv");
        LocalFileTransfer::new(remote.path())
            .download("/download/export.csv", &target)
            .unwrap();

        assert_eq!(std::fs::read_to_string(target).unwrap(), "Email\na@b.c\n");
    }

    #[test]
    fn local_missing_remote_file_is_transfer_error() {
        let remote = TempDir::new().unwrap();
        let local = TempDir::new().unwrap();
        let target = local.path().join("data.csv");

        let err = LocalFileTransfer::new(remote.path())
            .download("missing.csv", &target)
            .unwrap_err();

        match err {
            Error::Transfer { remote, local, .. } => {
                assert_eq!(remote, "missing.csv");
                assert_eq!(local, target);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn local_refuses_parent_traversal() {
        let remote = TempDir::new().unwrap();
        let err = LocalFileTransfer::new(remote.path())
            .download("../etc/passwd", Path::new("/tmp/x"))
            .unwrap_err();
        assert!(matches!(err, Error::Transfer { .. }));
    }

    #[test]
    fn local_refuses_empty_remote_path() {
        let remote = TempDir::new().unwrap();
        let err = LocalFileTransfer::new(remote.path())
            .download("", Path::new("/tmp/x"))
            .unwrap_err();
        assert!(err.to_string().contains("no remote file name"));
    }
}
