//! Store Module
//!
//! SQLite persistence for products and carts. Every operation opens its own
//! connection and drops it on every exit path; there is no pooling and no
//! locking beyond what SQLite itself provides.

mod carts;
mod products;

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;

pub use carts::CartStore;
pub use products::{ProductStore, SEED_PRODUCTS};

/// How long a connection waits on another connection's lock before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a read-write connection, creating the file and its parent
/// directory when missing.
pub(crate) fn open_connection(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let connection = Connection::open_with_flags(path, flags)?;
    connection.busy_timeout(BUSY_TIMEOUT)?;
    Ok(connection)
}
