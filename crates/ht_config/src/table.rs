use ht_table::Strategy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_CAPACITY: usize = 11;

/// Table construction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Collision resolution strategy.
    pub strategy: Strategy,

    /// Number of slots. Fixed for the lifetime of the table.
    pub capacity: usize,

    /// How keys are hashed.
    pub hasher: Hasher,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            capacity: DEFAULT_CAPACITY,
            hasher: Hasher::default(),
        }
    }
}

/// Key hashing scheme.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hasher {
    /// Deterministic; integer keys hash to their own value.
    #[default]
    Identity,

    /// Randomly seeded per table.
    Random,
}

impl Config {
    pub const KEYS: [&'static str; 3] = ["strategy", "capacity", "hasher"];

    /// Set a configuration value using a stringified key/value pair.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();

        match key {
            "strategy" => {
                self.strategy = match value.as_str() {
                    "chained" => Strategy::Chained,
                    "linear" => Strategy::Linear,
                    "double" => Strategy::Double,
                    _ => return invalid_value(key, value, &["chained", "linear", "double"]),
                };
            }
            "capacity" => match value.parse() {
                Ok(0) => return Err(Error::ZeroCapacity),
                Ok(capacity) => self.capacity = capacity,
                Err(_) => return invalid_value(key, value, &["<positive integer>"]),
            },
            "hasher" => {
                self.hasher = match value.as_str() {
                    "identity" => Hasher::Identity,
                    "random" => Hasher::Random,
                    _ => return invalid_value(key, value, &["identity", "random"]),
                };
            }
            _ => return crate::set_error(&format!("table.{key}")),
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        Ok(())
    }
}

fn invalid_value(key: &str, value: String, need: &[&str]) -> Result<()> {
    Err(Error::InvalidConfigValue {
        key: format!("table.{key}"),
        value,
        need: need.iter().map(ToString::to_string).collect(),
    })
}
