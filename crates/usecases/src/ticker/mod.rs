// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{num::NonZeroUsize, time::Instant};

use paraglide_core::{
    ticker::{DEFAULT_PAGE_SIZE, TickerWindow},
    util::clock::UtcDateTimeMs,
};
use paraglide_repo::track::{EntityRepo, IngestedRange, RecordHeader, TieBreak};

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// Exclusive lower bound of the ingestion time.
    ///
    /// Starts with the oldest tracks if `None`.
    pub cursor: Option<UtcDateTimeMs>,

    pub page_size: NonZeroUsize,

    pub tie_break: TieBreak,
}

impl Params {
    #[must_use]
    pub fn from_start() -> Self {
        Self {
            cursor: None,
            page_size: DEFAULT_PAGE_SIZE,
            tie_break: TieBreak::default(),
        }
    }

    #[must_use]
    pub fn after(cursor: UtcDateTimeMs) -> Self {
        Self {
            cursor: Some(cursor),
            ..Self::from_start()
        }
    }
}

/// The ingestion time of the most recently ingested track.
///
/// Returns `None` if no tracks are stored.
pub fn load_watermark<Repo>(repo: &mut Repo) -> Result<Option<UtcDateTimeMs>>
where
    Repo: EntityRepo,
{
    let latest = repo.load_latest_ingested_track_header().optional()?;
    Ok(latest.map(|header| header.ingested_at))
}

/// Assembles the next window of ingested tracks.
///
/// Returns `None` if no tracks are stored or if no tracks have been
/// ingested after the cursor.
pub fn load_window<Repo>(repo: &mut Repo, params: &Params) -> Result<Option<TickerWindow>>
where
    Repo: EntityRepo,
{
    let started = Instant::now();
    let Params {
        cursor,
        page_size,
        tie_break,
    } = *params;
    let Some(latest) = load_watermark(repo)? else {
        log::debug!("No tracks available");
        return Ok(None);
    };
    let range = match cursor {
        None => IngestedRange::all(),
        Some(after) => IngestedRange {
            after: Some(after),
            until: Some(latest),
        },
    };
    let headers = repo.load_ingested_track_headers(range, tie_break, page_size)?;
    let (Some(first), Some(last)) = (headers.first(), headers.last()) else {
        log::debug!("No tracks ingested after {cursor:?}");
        return Ok(None);
    };
    let start = first.ingested_at;
    let stop = last.ingested_at;
    let track_ids = headers
        .iter()
        .map(|RecordHeader { id, .. }| *id)
        .collect();
    Ok(Some(TickerWindow {
        latest,
        start,
        stop,
        track_ids,
        processing: started.elapsed(),
    }))
}

#[cfg(test)]
mod tests;
