// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::str::FromStr as _;

use paraglide_repo::track::EntityRepo as _;

use super::{path::TrackPath, *};

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The whole record as JSON.
    Record(Track),

    /// A single field as plain text.
    Field(String),
}

pub fn handle_request(connection: &mut DbConnection, path: &TrackPath) -> Result<ResponseBody> {
    let track = connection.transaction::<_, Error, _>(|connection| {
        let mut repo = RepoConnection::new(connection);
        repo.load_track(path.id()).map_err(Into::into)
    })?;
    let response_body = match path {
        TrackPath::Record { .. } => ResponseBody::Record((&track).into()),
        TrackPath::Field { field, .. } => {
            let field = TrackField::from_str(field).map_err(|_| Error::NotFound)?;
            ResponseBody::Field(track.project(field))
        }
    };
    Ok(response_body)
}
