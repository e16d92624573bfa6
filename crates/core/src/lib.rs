// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod ticker;
pub mod util;

pub mod track;
pub use self::track::{Track, TrackField, TrackId};

pub mod prelude {
    pub use crate::{
        track::{Track, TrackField, TrackId},
        util::clock::{TimestampMillis, UtcDateTimeMs},
    };
}
