use sqlx::sqlite::SqliteConnectOptions;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

const MEMORY: &str = ":memory:";

/// Where the database lives: a file path, a `sqlite:` URL or `:memory:`.
///
/// The raw string is kept verbatim; it is only interpreted when turned into
/// driver options, so a malformed location surfaces as a connection failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageLocation(String);

impl StorageLocation {
    pub const DEFAULT: &'static str = "database.db";

    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `:memory:`, `sqlite::memory:` (with or without a query
    /// string) and any `sqlite:` URL carrying `mode=memory`.
    pub fn is_memory(&self) -> bool {
        match self.url_parts() {
            Some((database, query)) => {
                database == MEMORY || query_value(query, "mode") == Some("memory")
            }
            None => self.0 == MEMORY,
        }
    }

    /// Database part and query string of a `sqlite:` / `sqlite://` URL.
    fn url_parts(&self) -> Option<(&str, Option<&str>)> {
        let rest = self
            .0
            .strip_prefix("sqlite://")
            .or_else(|| self.0.strip_prefix("sqlite:"))?;
        Some(match rest.split_once('?') {
            Some((database, query)) => (database, Some(query)),
            None => (rest, None),
        })
    }

    /// Driver options for opening this location.
    ///
    /// URLs go through the driver's own parser, so query parameters such as
    /// `mode` or `cache` are honoured; an explicit `mode` wins over
    /// `create_if_missing`. Plain paths are used as the file name unchanged.
    pub fn connect_options(
        &self,
        create_if_missing: bool,
    ) -> Result<SqliteConnectOptions, sqlx::Error> {
        match self.url_parts() {
            Some((database, query)) => {
                if database.trim().is_empty() {
                    return Err(empty_location());
                }
                let opts = SqliteConnectOptions::from_str(&self.0)?;
                if query_value(query, "mode").is_some() {
                    Ok(opts)
                } else {
                    Ok(opts.create_if_missing(create_if_missing))
                }
            }
            None if self.0.trim().is_empty() => Err(empty_location()),
            // Parsed form gives each open its own private in-memory database.
            None if self.0 == MEMORY => SqliteConnectOptions::from_str("sqlite::memory:"),
            None => Ok(SqliteConnectOptions::new()
                .filename(&self.0)
                .create_if_missing(create_if_missing)),
        }
    }
}

fn empty_location() -> sqlx::Error {
    sqlx::Error::Configuration("storage location is empty".into())
}

fn query_value<'a>(query: Option<&'a str>, key: &str) -> Option<&'a str> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

impl Default for StorageLocation {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StorageLocation {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for StorageLocation {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StorageLocation {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
