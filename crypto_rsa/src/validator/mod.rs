//! Cross-field rules applied once the flag grammar has been accepted.
//!
//! Rules run in a fixed order and stop at the first failure:
//!
//! 1. `-g` short-circuits to key generation without touching the filesystem.
//! 2. Exactly one of `-e` or `-d` must be set.
//! 3. The secret key path must name an existing file.
//! 4. The source path must name an existing file.
//! 5. The source file is read once as UTF-8 text.

use camino::Utf8PathBuf;

use crate::error::{CliError, FileRole, Result};
use crate::invocation::{Invocation, MessageInputs, Mode};
use crate::reader::{FsSourceReader, SourceReader};
use crate::schema::{Flag, RawFlags};

/// Turns [`RawFlags`] into an [`Invocation`].
#[derive(Debug, Clone, Default)]
pub struct Validator<R = FsSourceReader> {
    reader: R,
}

impl<R: SourceReader> Validator<R> {
    /// Creates a validator that consults `reader` for file access.
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Applies the validation rules to `flags`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::MissingOperationMode`] when neither `-e` nor `-d`
    /// is set, [`CliError::FileNotFound`] for a missing key or source file
    /// (key first), and [`CliError::Io`] when the source cannot be read.
    pub fn validate(&self, flags: RawFlags) -> Result<Invocation> {
        if flags.generate {
            tracing::debug!("key generation requested");
            return Ok(Invocation::generate_keys());
        }

        let mode = operation_mode(&flags)?;
        let secret_key_path = self.require_file(flags.key, FileRole::SecretKey)?;
        let source_file_path = self.require_file(flags.source, FileRole::Source)?;
        let message = self
            .reader
            .read_text(&source_file_path)
            .map_err(|source| {
                tracing::warn!(path = %source_file_path, error = %source, "source read failed");
                CliError::Io {
                    path: source_file_path.clone(),
                    source,
                }
            })?;

        tracing::info!(
            %mode,
            key = %secret_key_path,
            source = %source_file_path,
            bytes = message.len(),
            "command line validated"
        );
        let inputs = MessageInputs::new(secret_key_path, source_file_path, message);
        Ok(Invocation::transform(
            mode,
            inputs,
            flags.result.map(Utf8PathBuf::from),
        ))
    }

    fn require_file(&self, value: Option<String>, role: FileRole) -> Result<Utf8PathBuf> {
        let path = Utf8PathBuf::from(value.unwrap_or_default());
        if path.as_str().is_empty() || !self.reader.is_file(&path) {
            tracing::debug!(%role, %path, "required file missing");
            return Err(CliError::FileNotFound { role, path });
        }
        Ok(path)
    }
}

fn operation_mode(flags: &RawFlags) -> Result<Mode> {
    match (flags.encrypt, flags.decrypt) {
        (true, false) => Ok(Mode::Encrypt),
        (false, true) => Ok(Mode::Decrypt),
        (false, false) => Err(CliError::MissingOperationMode),
        (true, true) => Err(CliError::Conflict {
            flag: Flag::Decrypt,
            other: Flag::Encrypt,
        }),
    }
}
