// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    env,
    fmt,
    net::IpAddr,
    num::{NonZeroU32, NonZeroUsize},
    path::PathBuf,
    str::{FromStr, ParseBoolError},
};

use tracing::{Subscriber, subscriber::set_global_default};
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

use paraglide_storage_sqlite::connection::Storage;

use crate::config::Config;

pub(crate) fn init_environment() {
    if let Ok(path) = dotenvy::dotenv() {
        // Print to stderr because logging has not been initialized yet
        eprintln!("Loaded environment from dotenv file {}", path.display());
    }
}

const TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT: &str = "info";

fn create_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        if let Some(rust_log_from_env) = env::var("RUST_LOG").ok().filter(|var| !var.is_empty()) {
            eprintln!("Failed to parse RUST_LOG environment variable '{rust_log_from_env}': {err}");
        }
        EnvFilter::new(TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT)
    })
}

fn create_tracing_subscriber() -> impl Subscriber {
    tracing_subscriber::fmt()
        .with_env_filter(create_env_filter())
        .with_writer(std::io::stderr)
        .finish()
}

pub(crate) fn init_tracing_and_logging() -> anyhow::Result<()> {
    // Capture and redirect all log messages as tracing events
    LogTracer::init()?;

    let subscriber = create_tracing_subscriber();
    set_global_default(subscriber)?;

    Ok(())
}

fn parse_bool(var: &str) -> Result<bool, ParseBoolError> {
    var.to_lowercase().parse::<bool>().or_else(|err| {
        match var.parse::<u8>() {
            Ok(0) => Ok(false),
            Ok(1) => Ok(true),
            _ => Err(err),
        }
    })
}

/// Parses the value of a variable.
///
/// Blank values are treated like missing values.
fn parse_value<T, E>(name: &str, var: &str, parse: impl FnOnce(&str) -> Result<T, E>) -> Option<T>
where
    E: fmt::Display,
{
    tracing::debug!("{name} = {var}");
    let var = var.trim();
    if var.is_empty() {
        return None;
    }
    parse(var)
        .map_err(|err| {
            tracing::warn!("Failed to parse {name} = {var}: {err}");
        })
        .ok()
}

fn parse_var<T>(name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let var = env::var(name).ok()?;
    parse_value(name, &var, str::parse)
}

const CONFIG_FILE_ENV: &str = "PARAGLIDE_CONFIG_FILE";

pub(crate) fn parse_config_file() -> Option<PathBuf> {
    parse_var(CONFIG_FILE_ENV)
}

const ENDPOINT_IP_ENV: &str = "ENDPOINT_IP";

pub(crate) fn parse_endpoint_ip() -> Option<IpAddr> {
    parse_var(ENDPOINT_IP_ENV)
}

const ENDPOINT_PORT_ENV: &str = "ENDPOINT_PORT";

/// Accepted if `ENDPOINT_PORT` is missing.
const LEGACY_PORT_ENV: &str = "PORT";

pub(crate) fn parse_endpoint_port() -> Option<u16> {
    parse_var(ENDPOINT_PORT_ENV).or_else(|| parse_var(LEGACY_PORT_ENV))
}

const DATABASE_URL_ENV: &str = "DATABASE_URL";

pub(crate) fn parse_database_storage() -> Option<Storage> {
    parse_var(DATABASE_URL_ENV)
}

const DATABASE_CONNECTION_POOL_SIZE_ENV: &str = "DATABASE_CONNECTION_POOL_SIZE";

pub(crate) fn parse_database_connection_pool_size() -> Option<NonZeroU32> {
    parse_var(DATABASE_CONNECTION_POOL_SIZE_ENV)
}

const DATABASE_MIGRATE_SCHEMA_ON_STARTUP_ENV: &str = "DATABASE_MIGRATE_SCHEMA_ON_STARTUP";

pub(crate) fn parse_database_migrate_schema_on_startup() -> Option<bool> {
    let var = env::var(DATABASE_MIGRATE_SCHEMA_ON_STARTUP_ENV).ok()?;
    parse_value(DATABASE_MIGRATE_SCHEMA_ON_STARTUP_ENV, &var, parse_bool)
}

const TICKER_PAGE_SIZE_ENV: &str = "TICKER_PAGE_SIZE";

pub(crate) fn parse_ticker_page_size() -> Option<NonZeroUsize> {
    parse_var(TICKER_PAGE_SIZE_ENV)
}

/// Overrides the configuration with environment variables.
pub(crate) fn parse_config_into(config: &mut Config) {
    if let Some(ip_addr) = parse_endpoint_ip() {
        config.network.endpoint.ip_addr = ip_addr;
    }
    if let Some(port) = parse_endpoint_port() {
        config.network.endpoint.port = port;
    }
    if let Some(storage) = parse_database_storage() {
        config.database.connection.storage = storage;
    }
    if let Some(max_size) = parse_database_connection_pool_size() {
        config.database.connection.pool.max_size = max_size;
    }
    if let Some(migrate_schema_on_startup) = parse_database_migrate_schema_on_startup() {
        config.database.migrate_schema_on_startup = migrate_schema_on_startup;
    }
    if let Some(page_size) = parse_ticker_page_size() {
        config.ticker.page_size = page_size;
    }
}
