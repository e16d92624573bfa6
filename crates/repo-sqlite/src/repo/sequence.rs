// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use paraglide_core::TrackId;
use paraglide_repo::sequence::SequenceRepo;

use crate::{
    db::track_sequence::{SINGLE_ROW_ID, schema::*},
    prelude::*,
};

impl SequenceRepo for crate::Connection<'_> {
    fn next_track_id(&mut self) -> RepoResult<TrackId> {
        let next_track_id = diesel::update(track_sequence::table.find(SINGLE_ROW_ID))
            .set(track_sequence::next_track_id.eq(track_sequence::next_track_id + 1_i64))
            .returning(track_sequence::next_track_id)
            .get_result::<i64>(self.as_mut())
            .map_err(repo_error)?;
        debug_assert!(next_track_id > 0);
        Ok(TrackId::new(next_track_id - 1))
    }
}
