use crate::config::Config;
use crate::db::handle::ConnectionHandle;
use crate::db::location::StorageLocation;
use crate::error::ConnectionError;
use sqlx::{ConnectOptions, SqliteConnection};
use tracing::{error, info, warn};

/// Opens connections to one storage location.
///
/// The provider holds no connection state of its own: every [`acquire`]
/// opens a fresh handle that the caller owns outright.
///
/// [`acquire`]: ConnectionProvider::acquire
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    location: StorageLocation,
    create_if_missing: bool,
}

impl ConnectionProvider {
    pub fn new(location: impl Into<StorageLocation>) -> Self {
        Self {
            location: location.into(),
            create_if_missing: true,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.storage_location()).create_if_missing(cfg.create_if_missing)
    }

    /// Whether a missing database file is created on open. Parent
    /// directories are never created.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn location(&self) -> &StorageLocation {
        &self.location
    }

    /// Open one connection. Logs the outcome exactly once; no retry.
    pub async fn acquire(&self) -> Result<ConnectionHandle, ConnectionError> {
        match self.open().await {
            Ok(conn) => {
                info!(location = %self.location, "Connection Established");
                Ok(ConnectionHandle::new(conn, self.location.clone()))
            }
            Err(source) => {
                error!(location = %self.location, "Connection Failed:{source}");
                Err(ConnectionError::Failure {
                    location: self.location.to_string(),
                    source,
                })
            }
        }
    }

    async fn open(&self) -> Result<SqliteConnection, sqlx::Error> {
        let opts = self.location.connect_options(self.create_if_missing)?;
        opts.connect().await
    }

    /// Run `f` against a freshly acquired handle and close it afterwards,
    /// whether `f` succeeds or fails.
    ///
    /// A close failure after a successful `f` is returned as the error. When
    /// `f` itself failed, its error wins and the close failure is only logged.
    pub async fn with_connection<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: AsyncFnOnce(&mut ConnectionHandle) -> Result<T, E>,
        E: From<ConnectionError>,
    {
        let mut handle = self.acquire().await?;
        let outcome = f(&mut handle).await;
        let closed = handle.close().await;
        settle(&self.location, outcome, closed)
    }
}

/// Combine the result of scoped work with the result of closing its handle.
fn settle<T, E>(
    location: &StorageLocation,
    outcome: Result<T, E>,
    closed: Result<(), ConnectionError>,
) -> Result<T, E>
where
    E: From<ConnectionError>,
{
    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            warn!(
                location = %location,
                error = %close_err,
                "close failed after scoped work returned an error"
            );
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum WorkError {
        Work(&'static str),
        Connection(ConnectionError),
    }

    impl From<ConnectionError> for WorkError {
        fn from(e: ConnectionError) -> Self {
            WorkError::Connection(e)
        }
    }

    fn close_failure() -> ConnectionError {
        ConnectionError::Close {
            location: "app.db".to_string(),
            source: sqlx::Error::Protocol("worker gone".to_string()),
        }
    }

    #[test]
    fn settle_returns_value_when_both_succeed() {
        let loc = StorageLocation::new("app.db");
        let res: Result<i32, WorkError> = settle(&loc, Ok(7), Ok(()));
        assert!(matches!(res, Ok(7)));
    }

    #[test]
    fn settle_reports_close_failure_after_successful_work() {
        let loc = StorageLocation::new("app.db");
        let res: Result<i32, WorkError> = settle(&loc, Ok(7), Err(close_failure()));
        assert!(matches!(
            res,
            Err(WorkError::Connection(ConnectionError::Close { .. }))
        ));
    }

    #[test]
    fn settle_keeps_work_error_when_close_also_fails() {
        let loc = StorageLocation::new("app.db");
        let res: Result<i32, WorkError> =
            settle(&loc, Err(WorkError::Work("bad row")), Err(close_failure()));
        assert!(matches!(res, Err(WorkError::Work("bad row"))));
    }

    #[test]
    fn settle_keeps_work_error_when_close_succeeds() {
        let loc = StorageLocation::new("app.db");
        let res: Result<i32, WorkError> = settle(&loc, Err(WorkError::Work("bad row")), Ok(()));
        assert!(matches!(res, Err(WorkError::Work("bad row"))));
    }
}
