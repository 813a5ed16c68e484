//! Error types for `crypto-rsa`.
//!
//! [`CliError`] covers every way a command line can be rejected. Each variant
//! is terminal for the invocation; the binary prints the message followed by
//! the usage text. [`ConfigError`] covers the settings layer, which is only
//! consulted once a command line has been accepted.

use std::fmt;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::schema::Flag;

/// Rejections produced while turning arguments into an
/// [`Invocation`](crate::Invocation).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// An unknown flag, a stray value, a repeated flag or a value-taking flag
    /// without its value.
    #[error("{reason}")]
    MalformedOption {
        /// Single-line description of the offending token.
        reason: String,
    },

    /// Two mutually exclusive flags were both supplied.
    #[error("option '{flag}' cannot be used with '{other}'")]
    Conflict {
        /// Flag whose arrival triggered the conflict.
        flag: Flag,
        /// Flag that was already set.
        other: Flag,
    },

    /// Neither `-e` nor `-d` was given and key generation was not requested.
    #[error("one of -e or -d must be given")]
    MissingOperationMode,

    /// A required input path does not name an existing file.
    #[error("{role} file {} does not exist", quoted(.path))]
    FileNotFound {
        /// Which input the path was supplied for.
        role: FileRole,
        /// Path as supplied on the command line; empty when omitted.
        path: Utf8PathBuf,
    },

    /// The source file exists but could not be read as UTF-8 text.
    #[error("failed to read source file '{path}': {source}")]
    Io {
        /// Source file path.
        path: Utf8PathBuf,
        /// Underlying read failure.
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Classifies the error without inspecting its message.
    #[must_use]
    pub const fn kind(&self) -> CliErrorKind {
        match self {
            Self::MalformedOption { .. } => CliErrorKind::MalformedOption,
            Self::Conflict { .. } => CliErrorKind::Conflict,
            Self::MissingOperationMode => CliErrorKind::MissingOperationMode,
            Self::FileNotFound { .. } => CliErrorKind::FileNotFound,
            Self::Io { .. } => CliErrorKind::Io,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedOption {
            reason: reason.into(),
        }
    }
}

/// Discriminant of [`CliError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CliErrorKind {
    /// See [`CliError::MalformedOption`].
    MalformedOption,
    /// See [`CliError::Conflict`].
    Conflict,
    /// See [`CliError::MissingOperationMode`].
    MissingOperationMode,
    /// See [`CliError::FileNotFound`].
    FileNotFound,
    /// See [`CliError::Io`].
    Io,
}

/// Input file a path was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    /// The `-k` secret key file.
    SecretKey,
    /// The `-s` source file.
    Source,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SecretKey => "secret key",
            Self::Source => "source",
        })
    }
}

fn quoted(path: &Utf8PathBuf) -> String {
    if path.as_str().is_empty() {
        String::from("(not given)")
    } else {
        format!("'{path}'")
    }
}

/// Failures while loading [`Settings`](crate::config::Settings).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment could not gather or extract the layered settings.
    #[error("failed to load settings: {0}")]
    Gathering(#[from] Box<figment::Error>),

    /// A setting was present but unusable.
    #[error("invalid setting '{key}': {message}")]
    Invalid {
        /// Settings key that failed validation.
        key: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },
}

/// Convenience alias for results carrying a [`CliError`].
pub type Result<T, E = CliError> = std::result::Result<T, E>;
