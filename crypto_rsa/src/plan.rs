//! Resolution of an [`Invocation`] into the concrete work handed to the
//! crypto engine.
use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};

use crate::config::Settings;
use crate::invocation::{Invocation, Mode};

/// Work the crypto engine is asked to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationPlan {
    /// Write a fresh key pair to the configured files.
    GenerateKeys {
        /// Destination of the public key.
        public_key: Utf8PathBuf,
        /// Destination of the private key.
        private_key: Utf8PathBuf,
    },
    /// Encrypt or decrypt the loaded message.
    Transform {
        /// Either [`Mode::Encrypt`] or [`Mode::Decrypt`].
        mode: Mode,
        /// Secret key file.
        secret_key: Utf8PathBuf,
        /// Source file the message came from.
        source: Utf8PathBuf,
        /// Destination of the transformed message.
        result: Utf8PathBuf,
        /// Size of the loaded message in bytes.
        message_bytes: usize,
    },
}

/// Builds the [`OperationPlan`] for `invocation`.
///
/// Without `-r` the result lands beside the source file, named with the
/// configured prefix.
///
/// # Examples
///
/// ```rust
/// use crypto_rsa::config::Settings;
/// use crypto_rsa::plan::{OperationPlan, build_plan};
/// use crypto_rsa::{CommandLine, Request};
///
/// let Ok(Request::Run(invocation)) = CommandLine::new().interpret(["crypto-rsa", "-g"]) else {
///     panic!("expected key generation");
/// };
/// let plan = build_plan(&invocation, &Settings::default());
/// assert_eq!(
///     plan,
///     OperationPlan::GenerateKeys {
///         public_key: "publicKey.csv".into(),
///         private_key: "privateKey.csv".into(),
///     }
/// );
/// ```
#[must_use]
pub fn build_plan(invocation: &Invocation, settings: &Settings) -> OperationPlan {
    let Some(inputs) = invocation.inputs() else {
        return OperationPlan::GenerateKeys {
            public_key: settings.public_key_file.clone(),
            private_key: settings.private_key_file.clone(),
        };
    };
    let result = invocation.result_file_path().map_or_else(
        || default_result_path(inputs.source_file_path(), &settings.result_prefix),
        Utf8Path::to_path_buf,
    );
    OperationPlan::Transform {
        mode: invocation.mode(),
        secret_key: inputs.secret_key_path().to_path_buf(),
        source: inputs.source_file_path().to_path_buf(),
        result,
        message_bytes: inputs.message().len(),
    }
}

/// Places `prefix` + the source file name in the source file's directory.
#[must_use]
pub fn default_result_path(source: &Utf8Path, prefix: &str) -> Utf8PathBuf {
    let name = source.file_name().unwrap_or_default();
    let file_name = format!("{prefix}{name}");
    source
        .parent()
        .map_or_else(|| Utf8PathBuf::from(&file_name), |dir| dir.join(&file_name))
}

/// Writes a human-readable description of `plan`.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing fails.
pub fn write_plan_to<W: Write>(writer: &mut W, plan: &OperationPlan) -> io::Result<()> {
    match plan {
        OperationPlan::GenerateKeys {
            public_key,
            private_key,
        } => {
            writeln!(writer, "PUBLIC_KEY  will be saved to: \"{public_key}\"")?;
            writeln!(writer, "PRIVATE_KEY will be saved to: \"{private_key}\"")
        }
        OperationPlan::Transform {
            mode,
            secret_key,
            source,
            result,
            message_bytes,
        } => {
            let suffix = if *message_bytes == 1 { "" } else { "s" };
            writeln!(
                writer,
                "{mode} {message_bytes} byte{suffix} from \"{source}\" using key \"{secret_key}\""
            )?;
            writeln!(writer, "The result will be saved to: \"{result}\"")
        }
    }
}

/// Prints `plan` to standard output.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing to standard output fails.
pub fn print_plan(plan: &OperationPlan) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_plan_to(&mut handle, plan)
}
