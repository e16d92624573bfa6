// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fs, time::Duration};

use url::Url;

use crate::{Error, FlightRecording, Result, parse::parse_flight_recording};

/// Fetches and parses remote IGC files.
///
/// Implementations are blocking and must be invoked from a context that
/// is allowed to block, e.g. `tokio::task::spawn_blocking()`.
pub trait TrackLoader: Send + Sync {
    fn load_flight_recording(&self, url: &Url) -> Result<FlightRecording>;
}

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Loads IGC files via HTTP(S) or from the local file system.
#[derive(Debug, Clone)]
pub struct HttpTrackLoader {
    timeout: Duration,
}

impl HttpTrackLoader {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn fetch_content(&self, url: &Url) -> Result<String> {
        match url.scheme() {
            "http" | "https" => {
                // The blocking client must neither be created nor dropped
                // within an async context.
                let client = reqwest::blocking::Client::builder()
                    .timeout(self.timeout)
                    .build()?;
                let response = client.get(url.clone()).send()?.error_for_status()?;
                Ok(response.text()?)
            }
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|()| Error::UnsupportedUrlScheme(url.to_string()))?;
                Ok(fs::read_to_string(path)?)
            }
            scheme => Err(Error::UnsupportedUrlScheme(scheme.to_owned())),
        }
    }
}

impl Default for HttpTrackLoader {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl TrackLoader for HttpTrackLoader {
    fn load_flight_recording(&self, url: &Url) -> Result<FlightRecording> {
        log::debug!("Loading flight recording from {url}");
        let content = self.fetch_content(url)?;
        parse_flight_recording(&content).map_err(Error::Content)
    }
}
