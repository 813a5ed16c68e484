//! File access used while validating a command line.

use camino::Utf8Path;

/// Collaborator that checks and loads the files named on the command line.
///
/// The validator never touches the filesystem directly, so tests can observe
/// exactly which paths were checked and read.
pub trait SourceReader {
    /// Reports whether `path` names an existing regular file.
    fn is_file(&self, path: &Utf8Path) -> bool;

    /// Reads `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be opened or is
    /// not valid UTF-8.
    fn read_text(&self, path: &Utf8Path) -> std::io::Result<String>;
}

/// [`SourceReader`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSourceReader;

impl SourceReader for FsSourceReader {
    fn is_file(&self, path: &Utf8Path) -> bool {
        path.is_file()
    }

    fn read_text(&self, path: &Utf8Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

impl<R: SourceReader + ?Sized> SourceReader for &R {
    fn is_file(&self, path: &Utf8Path) -> bool {
        (**self).is_file(path)
    }

    fn read_text(&self, path: &Utf8Path) -> std::io::Result<String> {
        (**self).read_text(path)
    }
}
