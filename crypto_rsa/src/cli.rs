//! Entry point tying the flag grammar and the validation rules together.
//!
//! A [`CommandLine`] is an ordinary value: build one where it is needed and
//! call [`CommandLine::interpret`] as often as required. Nothing is cached
//! between calls.

use std::ffi::OsString;

use crate::error::Result;
use crate::invocation::Invocation;
use crate::reader::{FsSourceReader, SourceReader};
use crate::schema::OptionSchema;
use crate::validator::Validator;

/// Outcome of interpreting a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// The caller asked for usage text, or gave no arguments at all.
    Help,
    /// A validated operation ready for the crypto engine.
    Run(Invocation),
}

/// Parser and validator for one argument vector at a time.
#[derive(Debug, Clone, Default)]
pub struct CommandLine<R = FsSourceReader> {
    schema: OptionSchema,
    validator: Validator<R>,
}

impl CommandLine {
    /// Creates a command line interpreter backed by the local filesystem.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_reader(FsSourceReader)
    }
}

impl<R: SourceReader> CommandLine<R> {
    /// Creates an interpreter that consults `reader` for file access.
    #[must_use]
    pub const fn with_reader(reader: R) -> Self {
        Self {
            schema: OptionSchema::new(),
            validator: Validator::new(reader),
        }
    }

    /// Interprets `args`, whose first element is the program name.
    ///
    /// # Errors
    ///
    /// Returns a [`CliError`](crate::CliError) describing the first rule the
    /// command line violates.
    ///
    /// # Examples
    ///
    /// ```
    /// use crypto_rsa::{CommandLine, Mode, Request};
    ///
    /// let request = CommandLine::new()
    ///     .interpret(["crypto-rsa", "-g"])
    ///     .expect("key generation needs no files");
    /// let Request::Run(invocation) = request else {
    ///     panic!("expected an invocation");
    /// };
    /// assert_eq!(invocation.mode(), Mode::GenerateKeys);
    /// ```
    pub fn interpret<I, T>(&self, args: I) -> Result<Request>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        if is_help_request(&args) {
            tracing::debug!("usage requested");
            return Ok(Request::Help);
        }
        let flags = self.schema.parse(args)?;
        self.validator.validate(flags).map(Request::Run)
    }
}

/// Reports whether `args` asks for usage text.
///
/// The check runs before parsing so `-h` wins over any other problem on the
/// command line.
#[must_use]
pub fn is_help_request(args: &[OsString]) -> bool {
    let mut rest = args.iter().skip(1).peekable();
    rest.peek().is_none() || rest.any(|arg| arg == "-h" || arg == "--help")
}
