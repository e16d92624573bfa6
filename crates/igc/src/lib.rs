// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{io::Error as IoError, result::Result as StdResult};

use jiff::civil::{Date, Time};
use thiserror::Error;

pub mod geo;
pub mod load;
pub mod parse;

pub use self::load::{HttpTrackLoader, TrackLoader};

#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported URL scheme: {0}")]
    UnsupportedUrlScheme(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Content(anyhow::Error),
}

pub type Result<T> = StdResult<T, Error>;

/// A single position record (B record).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    pub time: Time,

    /// Degrees, positive north.
    pub latitude: f64,

    /// Degrees, positive east.
    pub longitude: f64,

    /// `true` for a 3D fix, `false` for a 2D fix or no GPS data.
    pub valid: bool,

    /// Meters, relative to the ICAO ISA 1013.25 hPa datum.
    pub pressure_altitude: i32,

    /// Meters, above the WGS84 ellipsoid.
    pub gnss_altitude: i32,
}

/// Metadata and fixes extracted from an IGC file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightRecording {
    pub date: Option<Date>,
    pub pilot: String,
    pub glider_type: String,
    pub glider_id: String,
    pub fixes: Vec<Fix>,
}

impl FlightRecording {
    /// Total distance along all consecutive fixes in meters.
    #[must_use]
    pub fn track_length_meters(&self) -> f64 {
        self.fixes
            .windows(2)
            .map(|pair| geo::distance_meters(&pair[0], &pair[1]))
            .sum()
    }
}
