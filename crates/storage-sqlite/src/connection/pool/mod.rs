// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU32;

use diesel::{Connection as _, r2d2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Result;

use super::Storage;

pub type ConnectionManager = r2d2::ConnectionManager<diesel::SqliteConnection>;

pub type ConnectionPool = r2d2::Pool<ConnectionManager>;

pub type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

#[cfg(feature = "tokio")]
pub mod gatekeeper;

/// Creates a pool of connections to the given storage.
///
/// Every connection to an in-memory database opens a separate database.
/// The pool is then restricted to a single connection that is kept alive
/// for the lifetime of the pool.
pub fn create_connection_pool(storage: &Storage, max_size: NonZeroU32) -> Result<ConnectionPool> {
    let connection_url = storage.connection_url();
    // Establish a test connection before creating the connection pool to fail early.
    // If the given file is inaccessible r2d2 seems to do multiple retries and logs
    // errors instead of simply failing and returning an error immediately.
    drop(diesel::SqliteConnection::establish(&connection_url)?);
    let manager = ConnectionManager::new(connection_url);
    let builder = ConnectionPool::builder();
    let builder = if storage.is_in_memory() {
        if max_size.get() > 1 {
            log::info!("Restricting connection pool for in-memory database to a single connection");
        }
        builder
            .max_size(1)
            .min_idle(Some(1))
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        builder.max_size(max_size.get())
    };
    let pool = builder.build(manager)?;
    Ok(pool)
}

pub fn get_pooled_connection(pool: &ConnectionPool) -> Result<PooledConnection> {
    pool.get().map_err(Into::into)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub max_size: NonZeroU32,

    #[cfg(feature = "tokio")]
    pub gatekeeper: self::gatekeeper::Config,
}
