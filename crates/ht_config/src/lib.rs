pub mod error;
pub mod table;

use std::fs;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub use error::Error;
use error::Result;

/// Prefix of environment variables that override configuration values.
///
/// `HT_TABLE_CAPACITY=13` sets `table.capacity`.
pub const ENV_PREFIX: &str = "HT_";

/// Top-level configuration.
///
/// ```toml
/// [table]
/// strategy = "linear"
/// capacity = 11
/// hasher = "identity"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub table: table::Config,
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;

        Ok(config)
    }

    /// Load a TOML configuration file.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        trace!(%path, "Loading configuration file.");
        let content = fs::read_to_string(path)?;

        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(Into::into)
    }

    /// Set a configuration value using a stringified key/value pair.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        match key.split_once('.') {
            Some(("table", rest)) => self.table.set(rest, value),
            _ => set_error(key),
        }
    }

    /// Apply overrides from `HT_`-prefixed variables, ignoring all others.
    ///
    /// The remainder of the variable name maps to a configuration key by
    /// lowercasing it and turning the first underscore into a dot. Prefixed
    /// variables that do not name a known key are skipped.
    pub fn apply_env(&mut self, vars: impl IntoIterator<Item = (String, String)>) -> Result<()> {
        for (name, value) in vars {
            let Some(rest) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };

            let key = rest.to_lowercase().replacen('_', ".", 1);
            if !is_known_key(&key) {
                trace!(%name, "Ignoring unrelated environment variable.");
                continue;
            }

            debug!(%name, %key, "Applying environment override.");
            self.set(&key, value)?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.table.validate()
    }
}

fn is_known_key(key: &str) -> bool {
    key.strip_prefix("table.")
        .is_some_and(|rest| table::Config::KEYS.contains(&rest))
}

fn set_error(key: &str) -> Result<()> {
    Err(Error::UnknownConfigKey {
        key: key.to_owned(),
        available_keys: table::Config::KEYS
            .iter()
            .map(|k| format!("table.{k}"))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use ht_table::Strategy;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::table::Hasher;

    #[test]
    fn parse_toml() {
        let config = Config::from_toml(indoc! {r#"
            [table]
            strategy = "linear"
            capacity = 5
        "#})
        .unwrap();

        assert_eq!(config.table, table::Config {
            strategy: Strategy::Linear,
            capacity: 5,
            hasher: Hasher::Identity,
        });
    }

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
        assert_eq!(Config::default().table.capacity, table::DEFAULT_CAPACITY);
    }

    #[test]
    fn rejects_unknown_fields_and_zero_capacity() {
        assert_matches!(
            Config::from_toml("[table]\nload_factor = 0.5\n"),
            Err(Error::TomlDe(_))
        );
        assert_matches!(
            Config::from_toml("[table]\nstrategy = \"cuckoo\"\n"),
            Err(Error::TomlDe(_))
        );
        assert_matches!(
            Config::from_toml("[table]\ncapacity = 0\n"),
            Err(Error::ZeroCapacity)
        );
    }

    #[test]
    fn toml_round_trip() {
        let mut config = Config::default();
        config.set("table.strategy", "double").unwrap();

        let toml = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&toml).unwrap(), config);
    }

    #[test]
    fn set_unknown_key() {
        let mut config = Config::default();
        let error = config.set("bucket.size", "3").unwrap_err();

        assert_eq!(error, Error::UnknownConfigKey {
            key: "bucket.size".to_owned(),
            available_keys: vec![
                "table.strategy".to_owned(),
                "table.capacity".to_owned(),
                "table.hasher".to_owned(),
            ],
        });
    }

    #[test]
    fn env_overrides() {
        let mut config = Config::default();
        config
            .apply_env([
                ("HT_TABLE_STRATEGY".to_owned(), "linear".to_owned()),
                ("HT_TABLE_CAPACITY".to_owned(), "7".to_owned()),
                ("HOME".to_owned(), "/root".to_owned()),
            ])
            .unwrap();

        assert_eq!(config.table.strategy, Strategy::Linear);
        assert_eq!(config.table.capacity, 7);

        assert_matches!(
            config.apply_env([("HT_TABLE_CAPACITY".to_owned(), "many".to_owned())]),
            Err(Error::InvalidConfigValue { .. })
        );
    }

    #[test]
    fn env_skips_unrelated_prefixed_variables() {
        let mut config = Config::default();
        config
            .apply_env([
                ("HT_FOO".to_owned(), "1".to_owned()),
                ("HT_TABLE_LOAD".to_owned(), "0.5".to_owned()),
                ("HT_HISTORY_FILE".to_owned(), "/tmp/ht".to_owned()),
                ("HT_TABLE_HASHER".to_owned(), "random".to_owned()),
            ])
            .unwrap();

        assert_eq!(config.table, table::Config {
            hasher: Hasher::Random,
            ..Default::default()
        });
    }
}
