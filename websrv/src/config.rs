// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fs,
    net::{IpAddr, Ipv6Addr, SocketAddr},
    num::{NonZeroU32, NonZeroU64, NonZeroUsize},
    path::Path,
};

use serde::{Deserialize, Serialize};

use paraglide_core::ticker::DEFAULT_PAGE_SIZE;
use paraglide_storage_sqlite::connection::{
    Config as DatabaseConnectionConfig, Storage,
    pool::{
        Config as DatabaseConnectionPoolConfig,
        gatekeeper::Config as DatabaseConnectionGatekeeperConfig,
    },
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) network: NetworkConfig,
    pub(crate) database: DatabaseConfig,
    pub(crate) ticker: TickerConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct NetworkConfig {
    pub(crate) endpoint: EndpointConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct EndpointConfig {
    pub(crate) ip_addr: IpAddr,
    pub(crate) port: u16,
}

const ENDPOINT_PORT_DEFAULT: u16 = 8080;

impl EndpointConfig {
    pub(crate) const fn new_v6() -> Self {
        Self {
            ip_addr: IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            port: ENDPOINT_PORT_DEFAULT,
        }
    }

    pub(crate) const fn socket_addr(self) -> SocketAddr {
        let Self { ip_addr, port } = self;
        SocketAddr::new(ip_addr, port)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new_v6()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DatabaseConfig {
    pub(crate) connection: DatabaseConnectionConfig,
    pub(crate) migrate_schema_on_startup: bool,
}

const DEFAULT_DATABASE_CONNECTION_POOL_SIZE: NonZeroU32 = NonZeroU32::new(8).unwrap();

const DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_READ_MILLIS: NonZeroU64 =
    NonZeroU64::new(10_000).unwrap();

const DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_WRITE_MILLIS: NonZeroU64 =
    NonZeroU64::new(30_000).unwrap();

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connection: DatabaseConnectionConfig {
                storage: Storage::InMemory,
                pool: DatabaseConnectionPoolConfig {
                    max_size: DEFAULT_DATABASE_CONNECTION_POOL_SIZE,
                    gatekeeper: DatabaseConnectionGatekeeperConfig {
                        acquire_read_timeout_millis:
                            DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_READ_MILLIS,
                        acquire_write_timeout_millis:
                            DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_WRITE_MILLIS,
                    },
                },
            },
            migrate_schema_on_startup: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TickerConfig {
    /// The maximum number of tracks per ticker window.
    pub(crate) page_size: NonZeroUsize,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Loads the configuration from a RON file.
///
/// Falls back to the defaults if the file could not be read or parsed.
#[must_use]
pub(crate) fn load_from_file(file_path: &Path) -> Config {
    log::info!("Loading configuration from file: {}", file_path.display());
    match fs::read_to_string(file_path) {
        Ok(content) => ron::from_str(&content)
            .map_err(|err| {
                log::warn!("Failed to parse configuration data: {err}");
            })
            .unwrap_or_default(),
        Err(err) => {
            log::warn!("Failed to read configuration data from file: {err}");
            Config::default()
        }
    }
}
