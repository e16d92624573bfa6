// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env::current_exe, process::ExitCode, time::Instant};

use crate::config::Config;

mod config;
mod env;
mod routing;
mod runtime;

fn main() -> ExitCode {
    // Measure the uptime from the earliest possible moment
    let launched_at = Instant::now();

    env::init_environment();

    if let Err(err) = env::init_tracing_and_logging() {
        eprintln!("Failed to initialize tracing and logging: {err}");
        return ExitCode::FAILURE;
    }

    if let Ok(exe_path) = current_exe() {
        log::info!("Executable: {}", exe_path.display());
    }
    log::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = env::parse_config_file()
        .map(|file_path| config::load_from_file(&file_path))
        .unwrap_or_else(|| {
            log::info!("Using default configuration");
            Config::default()
        });
    log::debug!("Initial configuration: {config:?}");

    log::info!("Patching configuration from .env file and environment variables");
    env::parse_config_into(&mut config);
    log::debug!("Patched configuration: {config:?}");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            log::error!("Failed to create runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = runtime.block_on(runtime::run(config, launched_at)) {
        log::error!("Runtime terminated with error: {err:#}");
        return ExitCode::FAILURE;
    }

    log::info!("Exiting");
    ExitCode::SUCCESS
}
