pub mod config;
pub mod db;
pub mod error;

pub use config::Config;
pub use db::{ConnectionHandle, ConnectionProvider, StorageLocation};
pub use error::ConnectionError;
