// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    num::NonZeroU64,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    time::Duration,
};

use tokio::{sync::RwLock, task::spawn_blocking, time::timeout};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

use super::{ConnectionPool, PooledConnection, get_pooled_connection};

/// Manage database connections for asynchronous tasks
///
/// Only a single writer is allowed to access the `SQLite` database
/// at any given time while readers may share the pool. This prevents
/// both synchronous locking when obtaining a connection and timeouts
/// when concurrently trying to execute write operations.
#[allow(missing_debug_implementations)]
pub struct Gatekeeper {
    connection_pool: RwLock<ConnectionPool>,
    acquire_read_timeout: Duration,
    acquire_write_timeout: Duration,
    exclusive_reads: bool,
    pending_tasks: AtomicUsize,
    decommissioned: AtomicBool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessMode {
    Read,
    Write,
}

struct PendingTaskScope<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> PendingTaskScope<'a> {
    fn enter(counter: &'a AtomicUsize, mode: AccessMode) -> Self {
        let pending_before = counter.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "Starting {mode:?} task: {pending} pending task(s)",
            pending = pending_before + 1
        );
        Self { counter }
    }
}

impl Drop for PendingTaskScope<'_> {
    fn drop(&mut self) {
        let pending_before = self.counter.fetch_sub(1, Ordering::Relaxed);
        debug_assert!(pending_before > 0);
    }
}

impl Gatekeeper {
    #[must_use]
    pub fn new(connection_pool: ConnectionPool, config: Config) -> Self {
        let Config {
            acquire_read_timeout_millis,
            acquire_write_timeout_millis,
        } = config;
        // Readers would block each other synchronously while waiting
        // for the only pooled connection.
        let exclusive_reads = connection_pool.max_size() <= 1;
        Self {
            connection_pool: RwLock::new(connection_pool),
            acquire_read_timeout: Duration::from_millis(acquire_read_timeout_millis.get()),
            acquire_write_timeout: Duration::from_millis(acquire_write_timeout_millis.get()),
            exclusive_reads,
            pending_tasks: AtomicUsize::new(0),
            decommissioned: AtomicBool::new(false),
        }
    }

    /// Rejects all subsequent tasks.
    pub fn decommission(&self) {
        self.decommissioned.store(true, Ordering::Release);
    }

    fn check_not_decommissioned(&self) -> Result<()> {
        if self.decommissioned.load(Ordering::Acquire) {
            return Err(Error::TaskTimeout {
                reason: "connection pool has been decommissioned".to_owned(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.pending_tasks.load(Ordering::Relaxed)
    }

    pub async fn spawn_blocking_read_task<H, R>(&self, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.exclusive_reads {
            return self.spawn_blocking_write_task(connection_handler).await;
        }
        self.check_not_decommissioned()?;
        let _scope = PendingTaskScope::enter(&self.pending_tasks, AccessMode::Read);
        let Ok(guard) = timeout(self.acquire_read_timeout, self.connection_pool.read()).await
        else {
            return Err(Error::TaskTimeout {
                reason: "database is locked".to_owned(),
            });
        };
        self.check_not_decommissioned()?;
        let connection = get_pooled_connection(&guard)?;
        spawn_blocking(move || connection_handler(connection))
            .await
            .map_err(Error::TaskScheduling)
    }

    pub async fn spawn_blocking_write_task<H, R>(&self, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.check_not_decommissioned()?;
        let _scope = PendingTaskScope::enter(&self.pending_tasks, AccessMode::Write);
        let Ok(guard) = timeout(self.acquire_write_timeout, self.connection_pool.write()).await
        else {
            return Err(Error::TaskTimeout {
                reason: "database is locked".to_owned(),
            });
        };
        self.check_not_decommissioned()?;
        let connection = get_pooled_connection(&guard)?;
        // The exclusive lock is held until the blocking task has finished.
        spawn_blocking(move || connection_handler(connection))
            .await
            .map_err(Error::TaskScheduling)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub acquire_read_timeout_millis: NonZeroU64,
    pub acquire_write_timeout_millis: NonZeroU64,
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use diesel::{RunQueryDsl as _, sql_query};

    use super::*;
    use crate::connection::{Storage, pool::create_connection_pool};

    fn new_gatekeeper() -> Gatekeeper {
        let pool = create_connection_pool(&Storage::InMemory, NonZeroU32::MIN).unwrap();
        Gatekeeper::new(
            pool,
            Config {
                acquire_read_timeout_millis: NonZeroU64::new(1_000).unwrap(),
                acquire_write_timeout_millis: NonZeroU64::new(1_000).unwrap(),
            },
        )
    }

    #[tokio::test]
    async fn write_then_read_same_in_memory_database() {
        let gatekeeper = new_gatekeeper();
        gatekeeper
            .spawn_blocking_write_task(|mut connection| {
                sql_query("CREATE TABLE probe (value INTEGER NOT NULL)")
                    .execute(&mut *connection)
                    .unwrap();
                sql_query("INSERT INTO probe (value) VALUES (42)")
                    .execute(&mut *connection)
                    .unwrap();
            })
            .await
            .unwrap();
        let rows = gatekeeper
            .spawn_blocking_read_task(|mut connection| {
                sql_query("DELETE FROM probe WHERE value = 42")
                    .execute(&mut *connection)
                    .unwrap()
            })
            .await
            .unwrap();
        assert_eq!(1, rows);
        assert_eq!(0, gatekeeper.pending_tasks());
    }

    #[tokio::test]
    async fn reject_tasks_after_decommissioning() {
        let gatekeeper = new_gatekeeper();
        gatekeeper.decommission();
        let result = gatekeeper.spawn_blocking_read_task(|_connection| ()).await;
        assert!(matches!(result, Err(Error::TaskTimeout { .. })));
    }
}
