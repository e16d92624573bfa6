// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{future, sync::Arc, time::Instant};

use anyhow::anyhow;

use paraglide_igc::{HttpTrackLoader, TrackLoader};
use paraglide_repo_sqlite::{initialize_database, run_migrations};
use paraglide_storage_sqlite::connection::pool::{
    create_connection_pool, gatekeeper::Gatekeeper as DatabaseConnectionGatekeeper,
    get_pooled_connection,
};

use crate::{
    config::{Config, DatabaseConfig},
    routing,
};

pub(crate) fn provision_database(
    config: &DatabaseConfig,
) -> anyhow::Result<DatabaseConnectionGatekeeper> {
    log::info!(
        "Commissioning SQLite database: {storage}",
        storage = config.connection.storage,
    );

    // The maximum size of the pool defines the maximum number of
    // allowed readers while writers require exclusive access.
    let pool_max_size = config.connection.pool.max_size;
    log::info!("Creating connection pool of max. size {pool_max_size}");
    let connection_pool = create_connection_pool(&config.connection.storage, pool_max_size)?;

    let mut connection = get_pooled_connection(&connection_pool)?;

    log::info!("Initializing database");
    initialize_database(&mut connection)?;

    if config.migrate_schema_on_startup {
        log::info!("Migrating database schema");
        let migrations = run_migrations(&mut connection).map_err(|err| anyhow!(err))?;
        log::info!("Applied {count} pending migration(s)", count = migrations.len());
    }

    // Return the connection to the pool before handing it over
    drop(connection);

    Ok(DatabaseConnectionGatekeeper::new(
        connection_pool,
        config.connection.pool.gatekeeper,
    ))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            log::info!("Received shutdown signal");
        }
        Err(err) => {
            log::error!("Failed to listen for shutdown signal: {err}");
            // Keep running until the process is killed
            future::pending::<()>().await;
        }
    }
}

pub(crate) async fn run(config: Config, launched_at: Instant) -> anyhow::Result<()> {
    log::info!("Launching");

    let shared_connection_gatekeeper = Arc::new(provision_database(&config.database)?);

    let track_loader: Arc<dyn TrackLoader> = Arc::new(HttpTrackLoader::default());

    log::info!("Creating service routes");
    let filters = routing::create_filters(
        launched_at,
        Arc::clone(&shared_connection_gatekeeper),
        track_loader,
        config.ticker.page_size,
    );

    log::info!("Initializing server");
    let server = warp::serve(filters);

    log::info!("Starting");
    let (socket_addr, server_listener) = server
        .try_bind_with_graceful_shutdown(config.network.endpoint.socket_addr(), shutdown_signal())?;

    log::info!("Listening on {socket_addr}");
    server_listener.await;

    log::info!("Stopping");
    shared_connection_gatekeeper.decommission();
    let pending_tasks = shared_connection_gatekeeper.pending_tasks();
    if pending_tasks > 0 {
        log::warn!("Abandoning {pending_tasks} pending database task(s)");
    }

    log::info!("Terminating");
    Ok(())
}
