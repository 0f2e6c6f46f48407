//! Database module: acquiring and releasing SQLite connections.
//!
//! Layout:
//! - `location.rs`: where the database lives and how the driver opens it
//! - `provider.rs`: `ConnectionProvider`, the one way to open a connection
//! - `handle.rs`: `ConnectionHandle`, an owned open connection

pub mod handle;
pub mod location;
pub mod provider;

pub use handle::ConnectionHandle;
pub use location::StorageLocation;
pub use provider::ConnectionProvider;
