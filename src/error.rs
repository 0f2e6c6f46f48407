use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ConnectionError {
    /// The driver could not open a connection at the given location.
    #[error("could not open database at {location}: {source}")]
    Failure {
        location: String,
        #[source]
        source: SqlxError,
    },

    #[error("could not close connection to {location}: {source}")]
    Close {
        location: String,
        #[source]
        source: SqlxError,
    },

    #[error("connection to {location} did not respond: {source}")]
    Ping {
        location: String,
        #[source]
        source: SqlxError,
    },
}

impl ConnectionError {
    /// Location of the database the failed operation targeted.
    pub fn location(&self) -> &str {
        match self {
            ConnectionError::Failure { location, .. }
            | ConnectionError::Close { location, .. }
            | ConnectionError::Ping { location, .. } => location,
        }
    }

    /// The underlying driver error.
    pub fn driver_error(&self) -> &SqlxError {
        match self {
            ConnectionError::Failure { source, .. }
            | ConnectionError::Close { source, .. }
            | ConnectionError::Ping { source, .. } => source,
        }
    }
}
