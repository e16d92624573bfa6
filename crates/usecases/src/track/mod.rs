// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::anyhow;
use url::Url;

use paraglide_core::{Track, TrackId, util::clock::UtcDateTimeMs};
use paraglide_igc::FlightRecording;
use paraglide_repo::{sequence::SequenceRepo, track::EntityRepo};

use super::*;

/// Summary of a flight recording that is ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    source_url: Url,
    flight_date: UtcDateTimeMs,
    pilot: String,
    glider: String,
    glider_id: String,
    track_length_meters: f64,
}

impl ValidatedInput {
    fn into_track(self, ingested_at: UtcDateTimeMs) -> Track {
        let Self {
            source_url,
            flight_date,
            pilot,
            glider,
            glider_id,
            track_length_meters,
        } = self;
        Track {
            source_url,
            ingested_at,
            flight_date,
            pilot,
            glider,
            glider_id,
            track_length_meters,
        }
    }
}

pub fn validate_input(
    source_url: Url,
    recording: FlightRecording,
) -> InputResult<ValidatedInput> {
    let track_length_meters = recording.track_length_meters();
    let FlightRecording {
        date,
        pilot,
        glider_type,
        glider_id,
        fixes: _,
    } = recording;
    let date = date.ok_or_else(|| anyhow!("missing flight date"))?;
    let flight_date = UtcDateTimeMs::from_date(date)?;
    if !track_length_meters.is_finite() {
        return Err(anyhow!("invalid track length: {track_length_meters}").into());
    }
    Ok(ValidatedInput {
        source_url,
        flight_date,
        pilot,
        glider: glider_type,
        glider_id,
        track_length_meters,
    })
}

/// Stores a new track with a freshly allocated identifier.
///
/// Must be invoked within a single write transaction. Either both the
/// identifier is allocated and the track is inserted or nothing happens.
pub fn ingest<Repo>(
    repo: &mut Repo,
    ingested_at: UtcDateTimeMs,
    input: ValidatedInput,
) -> Result<TrackId>
where
    Repo: EntityRepo + SequenceRepo,
{
    let id = repo.next_track_id()?;
    let track = input.into_track(ingested_at);
    repo.insert_track(id, &track)?;
    log::info!("Ingested track {id} from {url}", url = track.source_url);
    Ok(id)
}

pub fn purge_all<Repo>(repo: &mut Repo) -> Result<usize>
where
    Repo: EntityRepo,
{
    let purged = repo.purge_tracks()?;
    log::info!("Purged {purged} track(s)");
    Ok(purged)
}

#[cfg(test)]
mod tests;
