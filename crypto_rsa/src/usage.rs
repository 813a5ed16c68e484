//! Fixed usage text shown on request and after every rejected command line.

use std::io::{self, Write};

use crate::error::CliError;

/// Name the binary is documented under.
pub const PROGRAM_NAME: &str = "crypto-rsa";

const SYNOPSIS: &str = "-e|-d -s FILE [-r FILE] -k KEY";

const ARGUMENTS: &str = "\
optional arguments:
  -d         : decrypt message
  -e         : encrypt message
  -k KEY     : secret key file
  -s FILE    : source file
  -r FILE    : result file";

/// Returns the usage text, terminated by a newline.
///
/// # Examples
///
/// ```
/// let text = crypto_rsa::usage();
/// assert!(text.starts_with("usage: crypto-rsa -e|-d -s FILE [-r FILE] -k KEY\n\n"));
/// ```
#[must_use]
pub fn usage() -> String {
    format!("usage: {PROGRAM_NAME} {SYNOPSIS}\n\n{ARGUMENTS}\n")
}

/// Writes the usage text to `writer`.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing fails.
pub fn write_usage_to<W: Write>(writer: &mut W) -> io::Result<()> {
    writer.write_all(usage().as_bytes())
}

/// Writes `error`, a blank line, then the usage text.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing fails.
pub fn write_failure_to<W: Write>(writer: &mut W, error: &CliError) -> io::Result<()> {
    writeln!(writer, "{error}")?;
    writer.write_all(b"\n")?;
    write_usage_to(writer)
}
