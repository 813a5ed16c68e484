//! Staging settings layers inside a [`figment::Jail`].
//!
//! Each call gets its own working directory and environment, so
//! `crypto-rsa.toml` files and `CRYPTO_RSA_*` variables never leak between
//! tests.

use anyhow::{Result, anyhow};

/// Files and environment variables placed in the jail before a load.
#[derive(Debug, Clone, Copy, Default)]
pub struct Layers<'a> {
    /// `(file name, contents)` pairs written to the jail's directory.
    pub files: &'a [(&'a str, &'a str)],
    /// `(name, value)` pairs exported for the duration of the call.
    pub env: &'a [(&'a str, &'a str)],
}

impl<'a> Layers<'a> {
    /// Layers made of files only, with no environment overrides.
    #[must_use]
    pub const fn file(files: &'a [(&'a str, &'a str)]) -> Self {
        Self { files, env: &[] }
    }
}

/// Stages `layers` in a fresh jail, then runs `load` there.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or a file cannot be
/// written.
///
/// # Examples
///
/// ```
/// use test_helpers::figment::{Layers, in_jail};
///
/// let layers = Layers {
///     env: &[("CRYPTO_RSA_RESULT_PREFIX", "out_")],
///     ..Layers::default()
/// };
/// let value = in_jail(layers, || std::env::var("CRYPTO_RSA_RESULT_PREFIX").ok())
///     .expect("jail runs");
/// assert_eq!(value.as_deref(), Some("out_"));
/// ```
pub fn in_jail<T>(layers: Layers<'_>, load: impl FnOnce() -> T) -> Result<T> {
    let mut loaded = None;
    figment::Jail::try_with(|jail| {
        for (name, contents) in layers.files {
            jail.create_file(name, contents)?;
        }
        for (name, value) in layers.env {
            jail.set_env(name, value);
        }
        loaded = Some(load());
        Ok(())
    })
    .map_err(|err| anyhow!("settings jail failed: {err}"))?;
    loaded.ok_or_else(|| anyhow!("settings jail exited before loading"))
}
