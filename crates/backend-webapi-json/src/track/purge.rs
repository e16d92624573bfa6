// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

mod uc {
    pub(super) use paraglide_usecases::track::purge_all;
}

/// Deletes all tracks and returns how many have been deleted.
///
/// Identifiers that have already been handed out are never reused.
pub fn handle_request(connection: &mut DbConnection) -> Result<usize> {
    connection.transaction::<_, Error, _>(|connection| {
        let mut repo = RepoConnection::new(connection);
        uc::purge_all(&mut repo).map_err(Into::into)
    })
}
