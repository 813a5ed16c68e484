//! Layered settings controlling where results are written.
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! `crypto-rsa.toml` in the working directory, then `CRYPTO_RSA_*` environment
//! variables.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration file consulted in the working directory.
pub const CONFIG_FILE: &str = "crypto-rsa.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "CRYPTO_RSA_";

/// Output naming used when handing work to the crypto engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// File receiving a generated public key.
    pub public_key_file: Utf8PathBuf,
    /// File receiving a generated private key.
    pub private_key_file: Utf8PathBuf,
    /// Prefix added to the source file name when `-r` is omitted.
    pub result_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            public_key_file: Utf8PathBuf::from("publicKey.csv"),
            private_key_file: Utf8PathBuf::from("privateKey.csv"),
            result_prefix: String::from("new_"),
        }
    }
}

impl Settings {
    /// Loads settings from every layer.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a layer cannot be parsed or a value is
    /// blank.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Builds the layered figment without extracting it.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Extracts and validates settings from `figment`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when extraction fails or a value is blank.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let settings: Self = figment.extract().map_err(Box::new)?;
        settings.validate()?;
        tracing::debug!(?settings, "settings loaded");
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if is_blank(&self.public_key_file) {
            return Err(ConfigError::Invalid {
                key: "public_key_file",
                message: "must name a file",
            });
        }
        if is_blank(&self.private_key_file) {
            return Err(ConfigError::Invalid {
                key: "private_key_file",
                message: "must name a file",
            });
        }
        if self.public_key_file == self.private_key_file {
            return Err(ConfigError::Invalid {
                key: "private_key_file",
                message: "must differ from public_key_file",
            });
        }
        if self.result_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "result_prefix",
                message: "must contain visible characters",
            });
        }
        Ok(())
    }
}

fn is_blank(path: &Utf8Path) -> bool {
    path.as_str().trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::{CONFIG_FILE, Settings};
    use crate::error::ConfigError;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;
    use test_helpers::figment::{Layers, in_jail};

    fn load(layers: Layers<'_>) -> Result<Result<Settings, ConfigError>> {
        in_jail(layers, Settings::load)
    }

    #[rstest]
    fn defaults_match_the_original_file_names() -> Result<()> {
        let settings = load(Layers::default())??;
        ensure!(settings == Settings::default(), "unexpected settings: {settings:?}");
        ensure!(settings.public_key_file == "publicKey.csv");
        ensure!(settings.private_key_file == "privateKey.csv");
        ensure!(settings.result_prefix == "new_");
        Ok(())
    }

    #[rstest]
    fn file_then_environment_override_defaults() -> Result<()> {
        let settings = load(Layers {
            files: &[(
                CONFIG_FILE,
                "result_prefix = \"enc_\"\npublic_key_file = \"keys/pub.csv\"\n",
            )],
            env: &[("CRYPTO_RSA_RESULT_PREFIX", "out_")],
        })??;
        ensure!(settings.result_prefix == "out_", "environment should win");
        ensure!(
            settings.public_key_file == "keys/pub.csv",
            "file value should apply"
        );
        ensure!(
            settings.private_key_file == "privateKey.csv",
            "default should survive"
        );
        Ok(())
    }

    #[rstest]
    #[case::blank_prefix("result_prefix = \"  \"\n", "result_prefix")]
    #[case::blank_public("public_key_file = \"\"\n", "public_key_file")]
    #[case::same_files(
        "public_key_file = \"k.csv\"\nprivate_key_file = \"k.csv\"\n",
        "private_key_file"
    )]
    fn unusable_values_are_rejected(
        #[case] contents: &'static str,
        #[case] expected_key: &str,
    ) -> Result<()> {
        match load(Layers::file(&[(CONFIG_FILE, contents)]))? {
            Err(ConfigError::Invalid { key, .. }) => {
                ensure!(key == expected_key, "unexpected key: {key}");
                Ok(())
            }
            other => Err(anyhow!("expected an invalid setting, got {other:?}")),
        }
    }

    #[rstest]
    fn malformed_file_is_a_gathering_error() -> Result<()> {
        let outcome = load(Layers::file(&[(CONFIG_FILE, "result_prefix = ")]))?;
        ensure!(
            matches!(outcome, Err(ConfigError::Gathering(_))),
            "unexpected outcome: {outcome:?}"
        );
        Ok(())
    }
}
