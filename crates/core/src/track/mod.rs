// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, num::ParseIntError, str::FromStr};

use url::Url;

use crate::util::clock::UtcDateTimeMs;

pub type TrackIdValue = i64;

/// Sequential identifier of a track.
///
/// Assigned exactly once when the track is created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TrackId(TrackIdValue);

impl TrackId {
    #[must_use]
    pub const fn new(inner: TrackIdValue) -> Self {
        Self(inner)
    }

    #[must_use]
    pub const fn to_inner(self) -> TrackIdValue {
        let Self(inner) = self;
        inner
    }
}

impl From<TrackIdValue> for TrackId {
    fn from(from: TrackIdValue) -> Self {
        Self::new(from)
    }
}

impl From<TrackId> for TrackIdValue {
    fn from(from: TrackId) -> Self {
        from.to_inner()
    }
}

impl FromStr for TrackId {
    type Err = ParseIntError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        input.parse().map(Self::new)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_inner().fmt(f)
    }
}

/// Summary of a single, recorded flight.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    /// The location of the IGC file from which the summary was extracted.
    pub source_url: Url,

    /// When the track has been ingested.
    ///
    /// Defines the chronological order of the ticker.
    pub ingested_at: UtcDateTimeMs,

    /// The date of the flight (midnight UTC) as recorded in the header.
    pub flight_date: UtcDateTimeMs,

    pub pilot: String,

    pub glider: String,

    pub glider_id: String,

    /// Sum of the distances between all consecutive fixes.
    pub track_length_meters: f64,
}

impl Track {
    /// Renders the value of a single field as plain text.
    #[must_use]
    pub fn project(&self, field: TrackField) -> String {
        match field {
            TrackField::FlightDate => self.flight_date.to_timestamp().to_string(),
            TrackField::Pilot => self.pilot.clone(),
            TrackField::Glider => self.glider.clone(),
            TrackField::GliderId => self.glider_id.clone(),
            TrackField::TrackLength => self.track_length_meters.to_string(),
            TrackField::SourceUrl => self.source_url.to_string(),
        }
    }
}

/// Fields of a [`Track`] that can be requested individually.
///
/// The string representation is the external field name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
pub enum TrackField {
    #[strum(serialize = "H_date")]
    FlightDate,

    #[strum(serialize = "pilot")]
    Pilot,

    #[strum(serialize = "glider")]
    Glider,

    #[strum(serialize = "glider_id")]
    GliderId,

    #[strum(serialize = "track_length")]
    TrackLength,

    #[strum(serialize = "track_src_url")]
    SourceUrl,
}
