// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use paraglide_core::{TrackField, TrackId};

use super::*;

mod _core {
    pub(super) use paraglide_core::Track;
}

pub mod count;
pub mod create;
pub mod load_ids;
pub mod load_one;
pub mod path;
pub mod purge;

/// External representation of a stored track.
///
/// The identifier is not part of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "H_date")]
    pub flight_date: String,

    pub pilot: String,

    pub glider: String,

    pub glider_id: String,

    pub track_length: f64,

    pub track_src_url: String,
}

impl From<&_core::Track> for Track {
    fn from(from: &_core::Track) -> Self {
        Self {
            flight_date: from.project(TrackField::FlightDate),
            pilot: from.pilot.clone(),
            glider: from.glider.clone(),
            glider_id: from.glider_id.clone(),
            track_length: from.track_length_meters,
            track_src_url: from.source_url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackIdBody {
    pub id: TrackId,
}

#[cfg(test)]
mod tests;
