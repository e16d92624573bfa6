// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroUsize;

use paraglide_core::{Track, track::TrackId, util::clock::UtcDateTimeMs};

use crate::prelude::*;

/// Identity and ordering key of a stored track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordHeader {
    pub id: TrackId,
    pub ingested_at: UtcDateTimeMs,
}

/// Secondary ordering of tracks with the same ingestion time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Undefined total order, stable within one store implementation.
    StoreDefault,

    #[default]
    IdAscending,
}

/// Half-open interval `(after, until]` of ingestion times.
///
/// Missing bounds are unrestricted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestedRange {
    /// Exclusive lower bound.
    pub after: Option<UtcDateTimeMs>,

    /// Inclusive upper bound.
    pub until: Option<UtcDateTimeMs>,
}

impl IngestedRange {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            after: None,
            until: None,
        }
    }

    #[must_use]
    pub fn contains(&self, ingested_at: UtcDateTimeMs) -> bool {
        self.after.is_none_or(|after| ingested_at > after)
            && self.until.is_none_or(|until| ingested_at <= until)
    }
}

pub trait EntityRepo {
    fn insert_track(&mut self, id: TrackId, track: &Track) -> RepoResult<()>;

    fn load_track(&mut self, id: TrackId) -> RepoResult<Track>;

    /// All identifiers in ascending order.
    fn load_track_ids(&mut self) -> RepoResult<Vec<TrackId>>;

    fn count_tracks(&mut self) -> RepoResult<u64>;

    /// Deletes all tracks and returns the number of deleted records.
    fn purge_tracks(&mut self) -> RepoResult<usize>;

    /// The most recently ingested track.
    ///
    /// Ties are resolved by the highest identifier. Fails with
    /// [`RepoError::NotFound`] if no tracks are stored.
    fn load_latest_ingested_track_header(&mut self) -> RepoResult<RecordHeader>;

    /// Tracks within the given range ordered by ascending ingestion time.
    fn load_ingested_track_headers(
        &mut self,
        range: IngestedRange,
        tie_break: TieBreak,
        limit: NonZeroUsize,
    ) -> RepoResult<Vec<RecordHeader>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> UtcDateTimeMs {
        UtcDateTimeMs::try_from_unix_timestamp_millis(millis).unwrap()
    }

    #[test]
    fn ingested_range_bounds() {
        let range = IngestedRange {
            after: Some(at(10)),
            until: Some(at(20)),
        };
        assert!(!range.contains(at(10)));
        assert!(range.contains(at(11)));
        assert!(range.contains(at(20)));
        assert!(!range.contains(at(21)));
        assert!(IngestedRange::all().contains(at(i64::from(i32::MIN))));
    }
}
