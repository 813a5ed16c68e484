//! Command-line front end for the `crypto-rsa` encryption tool.
//!
//! The crate turns raw process arguments into a validated [`Invocation`]:
//!
//! - [`schema`] declares the recognised flags and their conflict sets and
//!   tokenises the argument vector.
//! - [`validator`] applies the cross-field rules and loads the message.
//! - [`usage`] renders the fixed usage text.
//!
//! [`CommandLine`] strings these together. [`config`] and [`plan`] resolve a
//! validated invocation into the concrete files the crypto engine works with.

pub mod cli;
pub mod config;
pub mod error;
pub mod invocation;
pub mod plan;
pub mod reader;
pub mod schema;
pub mod usage;
pub mod validator;

pub use cli::{CommandLine, Request, is_help_request};
pub use error::{CliError, CliErrorKind, ConfigError, FileRole};
pub use invocation::{Invocation, MessageInputs, Mode};
pub use reader::{FsSourceReader, SourceReader};
pub use usage::{usage, write_failure_to, write_usage_to};
