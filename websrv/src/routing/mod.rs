// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{convert::Infallible, num::NonZeroUsize, sync::Arc, time::Instant};

use warp::{Filter, Reply};

use paraglide_igc::TrackLoader;
use paraglide_storage_sqlite::connection::pool::gatekeeper::Gatekeeper as DatabaseConnectionGatekeeper;
use paraglide_websrv_warp_sqlite::handle_rejection;

pub(crate) mod api;

/// All routes are nested below this path segment.
pub(crate) const ROOT_PATH: &str = "paragliding";

pub(crate) fn create_filters(
    launched_at: Instant,
    shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>,
    track_loader: Arc<dyn TrackLoader>,
    ticker_page_size: NonZeroUsize,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone + Send + Sync + 'static {
    warp::path(ROOT_PATH)
        .and(api::create_filters(
            launched_at,
            shared_connection_gatekeeper,
            track_loader,
            ticker_page_size,
        ))
        .recover(handle_rejection)
}
