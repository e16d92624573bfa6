// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::anyhow;
use url::Url;

use paraglide_core::util::clock::UtcDateTimeMs;
use paraglide_igc::TrackLoader;

use super::*;

mod uc {
    pub(super) use paraglide_usecases::track::{ValidatedInput, ingest, validate_input};
}

/// Accepted both as JSON and as a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBody {
    pub url: String,
}

pub type ResponseBody = TrackIdBody;

/// A flight recording that has been loaded but not stored yet.
#[derive(Debug, Clone)]
pub struct LoadedInput(uc::ValidatedInput);

/// Loads and parses the IGC file referenced by the request.
///
/// Blocks the current thread until the file has been fetched. Must
/// not be invoked while holding a database connection.
pub fn load_input(loader: &dyn TrackLoader, request_body: &RequestBody) -> Result<LoadedInput> {
    let RequestBody { url } = request_body;
    let url: Url = url
        .trim()
        .parse()
        .map_err(|err| Error::ParseFailure(anyhow!("invalid URL '{url}': {err}")))?;
    log::debug!("Loading track from {url}");
    let recording = loader
        .load_flight_recording(&url)
        .map_err(|err| Error::ParseFailure(err.into()))?;
    let input = uc::validate_input(url, recording)
        .map_err(|err| Error::ParseFailure(err.0))?;
    Ok(LoadedInput(input))
}

pub fn handle_request(
    connection: &mut DbConnection,
    ingested_at: UtcDateTimeMs,
    input: LoadedInput,
) -> Result<ResponseBody> {
    let LoadedInput(input) = input;
    let id = connection.transaction::<_, Error, _>(|connection| {
        let mut repo = RepoConnection::new(connection);
        uc::ingest(&mut repo, ingested_at, input).map_err(Into::into)
    })?;
    Ok(TrackIdBody { id })
}
