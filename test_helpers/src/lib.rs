//! Test helpers shared across crates in the `crypto-rsa` workspace.
//!
//! - [`sandbox`] creates throwaway directories holding key and message files.
//! - [`figment`] wraps `figment::Jail` for settings tests.
//! - [`argv`] builds argument vectors the way the binary receives them.

pub mod figment;
pub mod sandbox;

/// Program name placed in front of every argument vector.
pub const PROGRAM: &str = "crypto-rsa";

/// Prefixes `args` with [`PROGRAM`], mirroring `std::env::args`.
///
/// # Examples
///
/// ```
/// use test_helpers::argv;
///
/// assert_eq!(argv(&["-g"]), vec!["crypto-rsa", "-g"]);
/// ```
#[must_use]
pub fn argv<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    std::iter::once(PROGRAM)
        .chain(args.iter().map(AsRef::as_ref))
        .map(String::from)
        .collect()
}
