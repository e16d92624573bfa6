// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{num::NonZeroUsize, time::Duration};

use crate::{track::TrackId, util::clock::UtcDateTimeMs};

/// The maximum number of tracks per window if not configured otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(5).unwrap();

/// A page of recently ingested tracks.
///
/// Computed on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerWindow {
    /// Ingestion time of the most recently ingested track (watermark).
    pub latest: UtcDateTimeMs,

    /// Ingestion time of the first track in this window.
    pub start: UtcDateTimeMs,

    /// Ingestion time of the last track in this window.
    ///
    /// Passed as the cursor for requesting the next window.
    pub stop: UtcDateTimeMs,

    /// In ingestion order.
    pub track_ids: Vec<TrackId>,

    /// Time spent on assembling the window.
    pub processing: Duration,
}
