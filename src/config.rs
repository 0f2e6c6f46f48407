//! Runtime configuration.
//!
//! Values are layered with `figment`: built-in defaults first, then any
//! `DBCONNECT_*` environment variable (for example `DBCONNECT_LOCATION`).

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::db::StorageLocation;

pub const ENV_PREFIX: &str = "DBCONNECT_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database file path, `sqlite:` URL or `:memory:`.
    pub location: String,
    /// Create the database file on first open when it does not exist.
    pub create_if_missing: bool,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            location: StorageLocation::DEFAULT.to_string(),
            create_if_missing: true,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Extract the configuration from defaults and the environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn storage_location(&self) -> StorageLocation {
        StorageLocation::new(self.location.clone())
    }
}
