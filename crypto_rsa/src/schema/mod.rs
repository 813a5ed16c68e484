//! Declarative flag grammar for the `crypto-rsa` command line.
//!
//! The [`FLAGS`] table is the single source of truth. It drives the token
//! check, the `clap` command that collects values, and the conflict replay
//! performed afterwards. Every flag and value is a token of its own; `clap`'s
//! clustering and attached values are never reached. Conflicts are evaluated
//! here, in command-line order, so the reported pair matches the first
//! collision a left-to-right reader would see.

use std::ffi::OsString;
use std::fmt;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::error::{CliError, Result};
use crate::usage::PROGRAM_NAME;

/// Flags recognised on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// `-g`: generate a key pair.
    Generate,
    /// `-e`: encrypt the source file.
    Encrypt,
    /// `-d`: decrypt the source file.
    Decrypt,
    /// `-k KEY`: secret key file.
    Key,
    /// `-s FILE`: source file.
    Source,
    /// `-r FILE`: result file.
    Result,
}

impl Flag {
    /// Identifier used for the flag inside the `clap` command.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
            Self::Key => "key",
            Self::Source => "source",
            Self::Result => "result",
        }
    }

    /// Short form, without the leading dash.
    #[must_use]
    pub const fn short(self) -> char {
        match self {
            Self::Generate => 'g',
            Self::Encrypt => 'e',
            Self::Decrypt => 'd',
            Self::Key => 'k',
            Self::Source => 's',
            Self::Result => 'r',
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}", self.short())
    }
}

/// Whether a flag stands alone or consumes the following token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Boolean switch.
    Switch,
    /// String-valued option.
    Value {
        /// Placeholder shown for the value, such as `FILE`.
        metavar: &'static str,
    },
}

/// Static description of one flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDescriptor {
    /// Flag being described; also supplies the name and short form.
    pub flag: Flag,
    /// Value arity.
    pub arity: Arity,
    /// Flags this one refuses to coexist with.
    pub forbids: &'static [Flag],
}

impl FlagDescriptor {
    /// Reports whether `self` and `other` may not both be set.
    ///
    /// Only one side of a pair needs to declare the conflict; `-s`, `-r` and
    /// `-k` rely on `-g` declaring them.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.forbids.contains(&other.flag) || other.forbids.contains(&self.flag)
    }

    fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.flag.id()).short(self.flag.short());
        match self.arity {
            Arity::Switch => arg.action(ArgAction::SetTrue),
            Arity::Value { metavar } => arg
                .action(ArgAction::Set)
                .value_name(metavar)
                .value_parser(clap::value_parser!(String)),
        }
    }
}

/// Recognised flags and their conflict sets.
pub static FLAGS: [FlagDescriptor; 6] = [
    FlagDescriptor {
        flag: Flag::Generate,
        arity: Arity::Switch,
        forbids: &[
            Flag::Decrypt,
            Flag::Encrypt,
            Flag::Source,
            Flag::Result,
            Flag::Key,
        ],
    },
    FlagDescriptor {
        flag: Flag::Encrypt,
        arity: Arity::Switch,
        forbids: &[Flag::Decrypt, Flag::Generate],
    },
    FlagDescriptor {
        flag: Flag::Decrypt,
        arity: Arity::Switch,
        forbids: &[Flag::Encrypt, Flag::Generate],
    },
    FlagDescriptor {
        flag: Flag::Key,
        arity: Arity::Value { metavar: "KEY" },
        forbids: &[],
    },
    FlagDescriptor {
        flag: Flag::Source,
        arity: Arity::Value { metavar: "FILE" },
        forbids: &[],
    },
    FlagDescriptor {
        flag: Flag::Result,
        arity: Arity::Value { metavar: "FILE" },
        forbids: &[],
    },
];

/// Flag values collected from the command line before cross-field rules run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFlags {
    /// `-g` was given.
    pub generate: bool,
    /// `-e` was given.
    pub encrypt: bool,
    /// `-d` was given.
    pub decrypt: bool,
    /// Value of `-k`.
    pub key: Option<String>,
    /// Value of `-s`.
    pub source: Option<String>,
    /// Value of `-r`.
    pub result: Option<String>,
}

/// Parser for the flag grammar described by [`FLAGS`].
///
/// The schema holds no state between calls; a single value may parse any
/// number of argument vectors.
#[derive(Debug, Clone, Copy)]
pub struct OptionSchema {
    flags: &'static [FlagDescriptor],
}

impl OptionSchema {
    /// Creates a schema over the standard [`FLAGS`] table.
    #[must_use]
    pub const fn new() -> Self {
        Self { flags: &FLAGS }
    }

    /// Descriptors this schema recognises.
    #[must_use]
    pub const fn flags(&self) -> &'static [FlagDescriptor] {
        self.flags
    }

    /// Parses `args`, whose first element is the program name.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::MalformedOption`] for unknown, repeated or
    /// incomplete flags and [`CliError::Conflict`] when two mutually exclusive
    /// flags are both present.
    ///
    /// # Examples
    ///
    /// ```
    /// use crypto_rsa::schema::OptionSchema;
    ///
    /// let flags = OptionSchema::new()
    ///     .parse(["crypto-rsa", "-e", "-s", "plain.txt", "-k", "key.csv"])
    ///     .expect("valid command line");
    /// assert!(flags.encrypt);
    /// assert_eq!(flags.source.as_deref(), Some("plain.txt"));
    /// ```
    pub fn parse<I, T>(&self, args: I) -> Result<RawFlags>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        self.check_tokens(&args)?;
        let matches = self
            .command()
            .try_get_matches_from(args)
            .map_err(|err| CliError::malformed(describe_clap_error(&err)))?;
        self.check_conflicts(&matches)?;
        Ok(collect(&matches))
    }

    /// Looks up the descriptor spelled exactly `token`, such as `-k`.
    fn lookup(&self, token: &str) -> Option<&'static FlagDescriptor> {
        let mut chars = token.strip_prefix('-')?.chars();
        let short = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        self.flags.iter().find(|descriptor| descriptor.flag.short() == short)
    }

    /// Accepts only separate tokens: every flag on its own and every value
    /// in the token after its flag. Clusters (`-es`), attached values
    /// (`-ssrc.txt`, `-k=key.csv`) and stray words are unrecognised.
    fn check_tokens(&self, args: &[OsString]) -> Result<()> {
        let mut pending: Option<Flag> = None;
        for token in args.iter().skip(1) {
            let text = token.to_string_lossy();
            if let Some(flag) = pending.take() {
                if text.starts_with('-') {
                    return Err(missing_value(flag));
                }
                continue;
            }
            let descriptor = self.lookup(&text).ok_or_else(|| {
                tracing::debug!(token = %text, "unrecognised token");
                CliError::malformed(format!("unrecognised option '{text}'"))
            })?;
            if matches!(descriptor.arity, Arity::Value { .. }) {
                pending = Some(descriptor.flag);
            }
        }
        pending.map_or(Ok(()), |flag| Err(missing_value(flag)))
    }

    fn command(&self) -> Command {
        self.flags.iter().fold(
            Command::new(PROGRAM_NAME)
                .disable_help_flag(true)
                .disable_version_flag(true),
            |command, descriptor| command.arg(descriptor.to_arg()),
        )
    }

    fn check_conflicts(&self, matches: &ArgMatches) -> Result<()> {
        let mut present: Vec<(usize, &FlagDescriptor)> = self
            .flags
            .iter()
            .filter(|descriptor| is_present(matches, descriptor.flag))
            .map(|descriptor| {
                let position = matches
                    .index_of(descriptor.flag.id())
                    .unwrap_or(usize::MAX);
                (position, descriptor)
            })
            .collect();
        present.sort_by_key(|(position, _)| *position);

        let mut accepted: Vec<&FlagDescriptor> = Vec::with_capacity(present.len());
        for (_, descriptor) in present {
            if let Some(earlier) = accepted
                .iter()
                .find(|earlier| descriptor.conflicts_with(earlier))
            {
                tracing::debug!(
                    flag = %descriptor.flag,
                    other = %earlier.flag,
                    "conflicting flags"
                );
                return Err(CliError::Conflict {
                    flag: descriptor.flag,
                    other: earlier.flag,
                });
            }
            tracing::debug!(flag = %descriptor.flag, "flag set");
            accepted.push(descriptor);
        }
        Ok(())
    }
}

impl Default for OptionSchema {
    fn default() -> Self {
        Self::new()
    }
}

fn collect(matches: &ArgMatches) -> RawFlags {
    let switch = |flag: Flag| matches.get_flag(flag.id());
    let value = |flag: Flag| matches.get_one::<String>(flag.id()).cloned();
    RawFlags {
        generate: switch(Flag::Generate),
        encrypt: switch(Flag::Encrypt),
        decrypt: switch(Flag::Decrypt),
        key: value(Flag::Key),
        source: value(Flag::Source),
        result: value(Flag::Result),
    }
}

fn is_present(matches: &ArgMatches, flag: Flag) -> bool {
    matches.value_source(flag.id()) == Some(ValueSource::CommandLine)
}

fn missing_value(flag: Flag) -> CliError {
    CliError::malformed(format!("option '{flag}' requires a value"))
}

fn describe_clap_error(err: &clap::Error) -> String {
    let offending = match err.get(ContextKind::InvalidArg) {
        // clap renders value options as `-k <KEY>`; keep only the flag.
        Some(ContextValue::String(arg)) => arg.split(' ').next(),
        _ => None,
    };
    match (err.kind(), offending) {
        (ErrorKind::UnknownArgument, Some(arg)) => format!("unrecognised option '{arg}'"),
        (ErrorKind::InvalidValue | ErrorKind::NoEquals, Some(arg)) => {
            format!("option '{arg}' requires a value")
        }
        (ErrorKind::ArgumentConflict, Some(arg)) => {
            format!("option '{arg}' was given more than once")
        }
        (ErrorKind::InvalidUtf8, _) => String::from("arguments must be valid UTF-8"),
        (kind, _) => kind
            .as_str()
            .map_or_else(|| String::from("malformed command line"), str::to_owned),
    }
}
