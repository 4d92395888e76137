//! Snapshot persistence port.

use crate::domain::SalesSnapshot;
use crate::error::Result;

/// Single-slot storage for the latest sales snapshot.
///
/// `put` replaces the whole previous value; there is no merge and no history.
/// `get` returns `None` until the first successful `put`, which callers treat
/// as "no data yet" rather than an error.
pub trait SnapshotCache: Send + Sync {
    fn get(&self) -> Result<Option<SalesSnapshot>>;

    fn put(&self, snapshot: &SalesSnapshot) -> Result<()>;
}
