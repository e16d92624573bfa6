// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use paraglide_repo::track::EntityRepo as _;

use super::*;

/// All identifiers in ascending order.
pub type ResponseBody = Vec<TrackId>;

pub fn handle_request(connection: &mut DbConnection) -> Result<ResponseBody> {
    connection.transaction::<_, Error, _>(|connection| {
        let mut repo = RepoConnection::new(connection);
        repo.load_track_ids().map_err(Into::into)
    })
}
