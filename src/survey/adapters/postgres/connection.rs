//! Scoped connection checkout for blocking Diesel work.

use diesel::r2d2::{ManageConnection, Pool, PoolError};

/// Checks a connection out of `pool`, runs `f` on it, and hands the
/// connection back to the pool when `f` returns, whatever the outcome.
///
/// The pooled connection is dropped exactly once at the end of this call,
/// which returns it to the pool; callers never hold it beyond `f`.
pub(super) fn with_connection<M, T, E, P, F>(pool: &Pool<M>, map_pool_err: P, f: F) -> Result<T, E>
where
    M: ManageConnection,
    P: FnOnce(PoolError) -> E,
    F: FnOnce(&mut M::Connection) -> Result<T, E>,
{
    let mut connection = pool.get().map_err(map_pool_err)?;
    f(&mut connection)
}
