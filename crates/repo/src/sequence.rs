// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use paraglide_core::track::TrackId;

use crate::prelude::*;

/// Allocation of sequential identifiers.
///
/// The sequence is independent of the stored records. Identifiers are
/// never reused, not even after all records have been purged.
pub trait SequenceRepo {
    /// Atomically increments the sequence and returns the allocated value.
    ///
    /// The first identifier is 0. Must be invoked within the same write
    /// transaction that inserts the record.
    fn next_track_id(&mut self) -> RepoResult<TrackId>;
}
