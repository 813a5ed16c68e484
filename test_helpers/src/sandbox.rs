//! Temporary directories populated with the files a test command line names.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Throwaway directory removed when dropped.
#[derive(Debug)]
pub struct Sandbox {
    root: Utf8PathBuf,
    _dir: TempDir,
}

impl Sandbox {
    /// Creates an empty sandbox.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create sandbox directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("sandbox path is not UTF-8: {}", path.display()))?;
        Ok(Self { root, _dir: dir })
    }

    /// Root directory of the sandbox.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Path of `name` inside the sandbox, whether or not it exists.
    #[must_use]
    pub fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Writes `contents` to `name`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> Result<Utf8PathBuf> {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Writes a private key file in the tool's CSV layout.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write_private_key(&self, name: &str) -> Result<Utf8PathBuf> {
        self.write(name, "modulus,privateKey\n3233,2753\n")
    }
}
