// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::anyhow;
use url::Url;

use paraglide_core::{
    Track, TrackId,
    util::clock::{TimestampMillis, UtcDateTimeMs},
};
use paraglide_repo::track::RecordHeader;

use crate::prelude::*;

use super::schema::*;

pub(crate) fn utc_date_time_from_millis(millis: TimestampMillis) -> RepoResult<UtcDateTimeMs> {
    UtcDateTimeMs::try_from_unix_timestamp_millis(millis)
        .ok_or_else(|| anyhow!("timestamp out of range: {millis} ms").into())
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = track)]
pub(crate) struct QueryableRecord {
    pub(crate) ingested_ms: TimestampMillis,
    pub(crate) flight_date_ms: TimestampMillis,
    pub(crate) source_url: String,
    pub(crate) pilot: String,
    pub(crate) glider: String,
    pub(crate) glider_id: String,
    pub(crate) track_length_m: f64,
}

impl TryFrom<QueryableRecord> for Track {
    type Error = RepoError;

    fn try_from(from: QueryableRecord) -> RepoResult<Self> {
        let QueryableRecord {
            ingested_ms,
            flight_date_ms,
            source_url,
            pilot,
            glider,
            glider_id,
            track_length_m,
        } = from;
        let source_url = Url::parse(&source_url)
            .map_err(|err| anyhow!("invalid source URL '{source_url}': {err}"))?;
        Ok(Self {
            source_url,
            ingested_at: utc_date_time_from_millis(ingested_ms)?,
            flight_date: utc_date_time_from_millis(flight_date_ms)?,
            pilot,
            glider,
            glider_id,
            track_length_meters: track_length_m,
        })
    }
}

#[derive(Debug, Queryable)]
pub(crate) struct QueryableHeader {
    pub(crate) track_id: i64,
    pub(crate) ingested_ms: TimestampMillis,
}

impl TryFrom<QueryableHeader> for RecordHeader {
    type Error = RepoError;

    fn try_from(from: QueryableHeader) -> RepoResult<Self> {
        let QueryableHeader {
            track_id,
            ingested_ms,
        } = from;
        Ok(Self {
            id: TrackId::new(track_id),
            ingested_at: utc_date_time_from_millis(ingested_ms)?,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = track)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) track_id: i64,
    pub(crate) ingested_ms: TimestampMillis,
    pub(crate) flight_date_ms: TimestampMillis,
    pub(crate) source_url: &'a str,
    pub(crate) pilot: &'a str,
    pub(crate) glider: &'a str,
    pub(crate) glider_id: &'a str,
    pub(crate) track_length_m: f64,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(id: TrackId, track: &'a Track) -> Self {
        let Track {
            source_url,
            ingested_at,
            flight_date,
            pilot,
            glider,
            glider_id,
            track_length_meters,
        } = track;
        Self {
            track_id: id.to_inner(),
            ingested_ms: ingested_at.unix_timestamp_millis(),
            flight_date_ms: flight_date.unix_timestamp_millis(),
            source_url: source_url.as_str(),
            pilot,
            glider,
            glider_id,
            track_length_m: *track_length_meters,
        }
    }
}
