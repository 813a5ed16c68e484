//! The validated description of one requested operation.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};

/// Operation requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Generate a fresh key pair.
    GenerateKeys,
    /// Encrypt the source file with the secret key.
    Encrypt,
    /// Decrypt the source file with the secret key.
    Decrypt,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GenerateKeys => "generate keys",
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
        })
    }
}

/// Inputs loaded for an encrypt or decrypt run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageInputs {
    secret_key_path: Utf8PathBuf,
    source_file_path: Utf8PathBuf,
    message: String,
}

impl MessageInputs {
    pub(crate) const fn new(
        secret_key_path: Utf8PathBuf,
        source_file_path: Utf8PathBuf,
        message: String,
    ) -> Self {
        Self {
            secret_key_path,
            source_file_path,
            message,
        }
    }

    /// Secret key file; known to exist when validated.
    #[must_use]
    pub fn secret_key_path(&self) -> &Utf8Path {
        &self.secret_key_path
    }

    /// Source file the message was read from.
    #[must_use]
    pub fn source_file_path(&self) -> &Utf8Path {
        &self.source_file_path
    }

    /// Full UTF-8 content of the source file.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Immutable, validated command line.
///
/// Only the validator builds invocations, so the mode and inputs always
/// agree: key generation carries no inputs, encryption and decryption always
/// do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    mode: Mode,
    inputs: Option<MessageInputs>,
    result_file_path: Option<Utf8PathBuf>,
}

impl Invocation {
    pub(crate) const fn generate_keys() -> Self {
        Self {
            mode: Mode::GenerateKeys,
            inputs: None,
            result_file_path: None,
        }
    }

    pub(crate) const fn transform(
        mode: Mode,
        inputs: MessageInputs,
        result_file_path: Option<Utf8PathBuf>,
    ) -> Self {
        Self {
            mode,
            inputs: Some(inputs),
            result_file_path,
        }
    }

    /// Requested operation.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Loaded inputs; `None` for key generation.
    #[must_use]
    pub const fn inputs(&self) -> Option<&MessageInputs> {
        self.inputs.as_ref()
    }

    /// Secret key file, when the mode uses one.
    #[must_use]
    pub fn secret_key_path(&self) -> Option<&Utf8Path> {
        self.inputs.as_ref().map(MessageInputs::secret_key_path)
    }

    /// Source file, when the mode uses one.
    #[must_use]
    pub fn source_file_path(&self) -> Option<&Utf8Path> {
        self.inputs.as_ref().map(MessageInputs::source_file_path)
    }

    /// Explicit result file from `-r`.
    #[must_use]
    pub fn result_file_path(&self) -> Option<&Utf8Path> {
        self.result_file_path.as_deref()
    }

    /// Loaded message, when the mode uses one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.inputs.as_ref().map(MessageInputs::message)
    }
}
