// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroUsize;

use percent_encoding::percent_decode_str;

use paraglide_core::{TrackId, ticker::TickerWindow, util::clock::UtcDateTimeMs};
use paraglide_repo::track::TieBreak;

use super::*;

mod uc {
    pub(super) use paraglide_usecases::ticker::{Params, load_watermark, load_window};
}

/// External representation of a [`TickerWindow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub t_latest: UtcDateTimeMs,

    pub t_start: UtcDateTimeMs,

    pub t_stop: UtcDateTimeMs,

    pub tracks: Vec<TrackId>,

    /// Milliseconds
    pub processing: u64,
}

impl From<TickerWindow> for Window {
    fn from(from: TickerWindow) -> Self {
        let TickerWindow {
            latest,
            start,
            stop,
            track_ids,
            processing,
        } = from;
        Self {
            t_latest: latest,
            t_start: start,
            t_stop: stop,
            tracks: track_ids,
            processing: processing.as_millis().try_into().unwrap_or(u64::MAX),
        }
    }
}

/// Parses a percent-encoded path segment.
pub fn parse_cursor(input: &str) -> Result<UtcDateTimeMs> {
    let decoded = percent_decode_str(input)
        .decode_utf8()
        .map_err(|err| Error::InvalidCursor(err.into()))?;
    decoded.parse().map_err(Error::InvalidCursor)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub page_size: NonZeroUsize,
    pub tie_break: TieBreak,
}

impl Params {
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_size,
            tie_break: TieBreak::default(),
        }
    }
}

pub mod load_window {
    use super::*;

    pub type ResponseBody = Window;

    /// Starts with the oldest track if no cursor is given.
    pub fn handle_request(
        connection: &mut DbConnection,
        cursor: Option<UtcDateTimeMs>,
        params: Params,
    ) -> Result<ResponseBody> {
        let Params {
            page_size,
            tie_break,
        } = params;
        let params = uc::Params {
            cursor,
            page_size,
            tie_break,
        };
        let window = connection.transaction::<_, Error, _>(|connection| {
            let mut repo = RepoConnection::new(connection);
            uc::load_window(&mut repo, &params).map_err(Into::into)
        })?;
        window.map(Into::into).ok_or(Error::NoRecords)
    }
}

pub mod load_latest {
    use super::*;

    /// The watermark in cursor format, rendered as plain text.
    pub type ResponseBody = String;

    pub fn handle_request(connection: &mut DbConnection) -> Result<ResponseBody> {
        let latest = connection.transaction::<_, Error, _>(|connection| {
            let mut repo = RepoConnection::new(connection);
            uc::load_watermark(&mut repo).map_err(Into::into)
        })?;
        latest
            .as_ref()
            .map(ToString::to_string)
            .ok_or(Error::NoRecords)
    }
}

#[cfg(test)]
mod tests;
