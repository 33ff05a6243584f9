//! In-memory user directory.
//!
//! Holds the user records served over HTTP. Reads share the lock; an
//! update holds the write lock across its whole read-modify-write so
//! concurrent updates cannot overwrite each other.

mod state;

pub use state::{DirectoryError, UserDirectory};
