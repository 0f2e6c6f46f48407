use crate::db::location::StorageLocation;
use crate::error::ConnectionError;
use chrono::{DateTime, Utc};
use sqlx::{Connection, SqliteConnection};
use std::ops::{Deref, DerefMut};
use tracing::debug;

/// An open connection handed out by [`ConnectionProvider`](super::ConnectionProvider).
///
/// A handle only ever exists in the open state; [`close`](Self::close)
/// consumes it. Dropping it without closing still releases the driver
/// connection, but any close error is then lost.
#[derive(Debug)]
pub struct ConnectionHandle {
    conn: SqliteConnection,
    location: StorageLocation,
    opened_at: DateTime<Utc>,
}

impl ConnectionHandle {
    pub(crate) fn new(conn: SqliteConnection, location: StorageLocation) -> Self {
        Self {
            conn,
            location,
            opened_at: Utc::now(),
        }
    }

    pub fn location(&self) -> &StorageLocation {
        &self.location
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// The driver connection, for running statements.
    pub fn connection_mut(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    /// Round-trip to the engine to check the channel is still usable.
    pub async fn ping(&mut self) -> Result<(), ConnectionError> {
        self.conn
            .ping()
            .await
            .map_err(|source| ConnectionError::Ping {
                location: self.location.to_string(),
                source,
            })
    }

    /// Version string of the SQLite library behind this connection.
    pub async fn engine_version(&mut self) -> Result<String, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT sqlite_version()")
            .fetch_one(&mut self.conn)
            .await
    }

    /// Release the connection, reporting any driver error.
    pub async fn close(self) -> Result<(), ConnectionError> {
        let Self {
            conn,
            location,
            opened_at,
        } = self;
        let open_for_ms = (Utc::now() - opened_at).num_milliseconds();
        conn.close()
            .await
            .map_err(|source| ConnectionError::Close {
                location: location.to_string(),
                source,
            })?;
        debug!(location = %location, open_for_ms, "Connection Closed");
        Ok(())
    }
}

impl Deref for ConnectionHandle {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for ConnectionHandle {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}
