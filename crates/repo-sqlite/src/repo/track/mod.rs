// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroUsize;

use diesel::dsl::count_star;

use paraglide_core::{Track, TrackId};
use paraglide_repo::track::{EntityRepo, IngestedRange, RecordHeader, TieBreak};

use crate::{
    db::track::{models::*, schema::*},
    prelude::*,
};

impl EntityRepo for crate::Connection<'_> {
    fn insert_track(&mut self, id: TrackId, track: &Track) -> RepoResult<()> {
        let insertable = InsertableRecord::bind(id, track);
        let rows_affected = diesel::insert_into(track::table)
            .values(&insertable)
            .execute(self.as_mut())
            .map_err(|err| match err {
                DieselError::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ) => RepoError::Conflict,
                err => repo_error(err),
            })?;
        debug_assert_eq!(1, rows_affected);
        log::debug!("Inserted track {id}");
        Ok(())
    }

    fn load_track(&mut self, id: TrackId) -> RepoResult<Track> {
        track::table
            .find(id.to_inner())
            .select(QueryableRecord::as_select())
            .first::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .and_then(TryInto::try_into)
    }

    fn load_track_ids(&mut self) -> RepoResult<Vec<TrackId>> {
        let ids = track::table
            .select(track::track_id)
            .order_by(track::track_id)
            .load::<i64>(self.as_mut())
            .map_err(repo_error)?;
        Ok(ids.into_iter().map(TrackId::new).collect())
    }

    fn count_tracks(&mut self) -> RepoResult<u64> {
        track::table
            .select(count_star())
            .first::<i64>(self.as_mut())
            .map_err(repo_error)
            .map(|count| {
                debug_assert!(count >= 0);
                count as u64
            })
    }

    fn purge_tracks(&mut self) -> RepoResult<usize> {
        diesel::delete(track::table)
            .execute(self.as_mut())
            .map_err(repo_error)
    }

    fn load_latest_ingested_track_header(&mut self) -> RepoResult<RecordHeader> {
        track::table
            .select((track::track_id, track::ingested_ms))
            .order_by((track::ingested_ms.desc(), track::track_id.desc()))
            .first::<QueryableHeader>(self.as_mut())
            .map_err(repo_error)
            .and_then(TryInto::try_into)
    }

    fn load_ingested_track_headers(
        &mut self,
        range: IngestedRange,
        tie_break: TieBreak,
        limit: NonZeroUsize,
    ) -> RepoResult<Vec<RecordHeader>> {
        let IngestedRange { after, until } = range;
        let mut query = track::table
            .select((track::track_id, track::ingested_ms))
            .order_by(track::ingested_ms)
            .into_boxed();
        match tie_break {
            TieBreak::StoreDefault => (),
            TieBreak::IdAscending => {
                query = query.then_order_by(track::track_id);
            }
        }
        if let Some(after) = after {
            query = query.filter(track::ingested_ms.gt(after.unix_timestamp_millis()));
        }
        if let Some(until) = until {
            query = query.filter(track::ingested_ms.le(until.unix_timestamp_millis()));
        }
        let limit = i64::try_from(limit.get()).unwrap_or(i64::MAX);
        query
            .limit(limit)
            .load::<QueryableHeader>(self.as_mut())
            .map_err(repo_error)?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }
}
