// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use paraglide_repo::track::EntityRepo as _;

use super::*;

/// The number of stored tracks, rendered as plain text.
pub type ResponseBody = String;

pub fn handle_request(connection: &mut DbConnection) -> Result<ResponseBody> {
    connection
        .transaction::<_, Error, _>(|connection| {
            let mut repo = RepoConnection::new(connection);
            repo.count_tracks().map_err(Into::into)
        })
        .map(|count| count.to_string())
}
