// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{num::NonZeroUsize, sync::Arc, time::Instant};

use mime::Mime;
use warp::{
    Filter, Rejection, Reply,
    filters::BoxedFilter,
    path::{FullPath, Tail},
};

use paraglide_core::util::clock::UtcDateTimeMs;
use paraglide_igc::TrackLoader;
use paraglide_storage_sqlite::connection::pool::gatekeeper::Gatekeeper as DatabaseConnectionGatekeeper;

use paraglide_websrv_warp_sqlite as websrv;

use paraglide_backend_webapi_json as api;

/// Matches form submissions regardless of any media type parameters.
fn form_content_type() -> impl Filter<Extract = (), Error = Rejection> + Clone {
    warp::header::<Mime>("content-type")
        .and_then(|content_type: Mime| async move {
            if content_type.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str()
            {
                Ok(())
            } else {
                Err(warp::reject::not_found())
            }
        })
        .untuple_one()
}

/// Rejects a trailing slash that [`warp::path::end()`] would accept.
fn no_trailing_slash() -> impl Filter<Extract = (), Error = Rejection> + Clone {
    warp::path::full()
        .and_then(|full_path: FullPath| async move {
            if full_path.as_str().ends_with('/') {
                Err(warp::reject::not_found())
            } else {
                Ok(())
            }
        })
        .untuple_one()
}

#[allow(clippy::too_many_lines)]
pub(crate) fn create_filters(
    launched_at: Instant,
    shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>,
    track_loader: Arc<dyn TrackLoader>,
    ticker_page_size: NonZeroUsize,
) -> BoxedFilter<(impl Reply,)> {
    let shared_connection_gatekeeper =
        warp::any().map(move || Arc::clone(&shared_connection_gatekeeper));
    let track_loader = warp::any().map(move || Arc::clone(&track_loader));
    let ticker_params = api::ticker::Params::new(ticker_page_size);

    log::info!("Creating API routes");

    let api_path = warp::path("api");
    let admin_api_path = warp::path("admin").and(api_path);
    let track_path = warp::path("track");
    let ticker_path = warp::path("ticker");

    // GET /api
    let about = api_path
        .and(warp::path::end())
        .and(warp::get())
        .map(move || {
            let response_body = api::about::handle_request(launched_at.elapsed());
            warp::reply::json(&response_body)
        });

    // Tracks
    // A trailing slash denotes an empty identifier
    let tracks_load_ids = api_path
        .and(track_path)
        .and(warp::path::end())
        .and(no_trailing_slash())
        .and(warp::get())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            |shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    |mut pooled_connection| {
                        api::track::load_ids::handle_request(&mut pooled_connection)
                    },
                )
                .await
                .map(|response_body| warp::reply::json(&response_body))
            },
        );

    let tracks_create_request_body = form_content_type()
        .and(warp::body::form::<api::track::create::RequestBody>())
        .or(warp::body::json::<api::track::create::RequestBody>())
        .unify();
    let tracks_create = api_path
        .and(track_path)
        .and(warp::path::end())
        .and(warp::post())
        .and(tracks_create_request_body)
        .and(track_loader)
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            |request_body: api::track::create::RequestBody,
             track_loader: Arc<dyn TrackLoader>,
             shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                // The database is not involved while fetching the track
                let input = websrv::after_blocking_task_finished(
                    tokio::task::spawn_blocking(move || {
                        api::track::create::load_input(&*track_loader, &request_body)
                    })
                    .await
                    .map_err(anyhow::Error::from),
                )?;
                websrv::spawn_blocking_write_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::track::create::handle_request(
                            &mut pooled_connection,
                            UtcDateTimeMs::now(),
                            input,
                        )
                    },
                )
                .await
                .map(|response_body| warp::reply::json(&response_body))
            },
        );

    let tracks_load_one = api_path
        .and(track_path)
        .and(warp::path::tail())
        .and(warp::get())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            |tail: Tail, shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                let path = api::track::path::TrackPath::resolve(tail.as_str())
                    .map_err(websrv::reject_on_error)?;
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::track::load_one::handle_request(&mut pooled_connection, &path)
                    },
                )
                .await
                .map(|response_body| match response_body {
                    api::track::load_one::ResponseBody::Record(record) => {
                        warp::reply::json(&record).into_response()
                    }
                    api::track::load_one::ResponseBody::Field(value) => value.into_response(),
                })
            },
        );

    let tracks_count = admin_api_path
        .and(warp::path("tracks_count"))
        .and(warp::path::end())
        .and(warp::get())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            |shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    |mut pooled_connection| {
                        api::track::count::handle_request(&mut pooled_connection)
                    },
                )
                .await
            },
        );

    let tracks_purge = admin_api_path
        .and(warp::path("tracks"))
        .and(warp::path::end())
        .and(warp::delete())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            |shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_write_task(
                    &shared_connection_gatekeeper,
                    |mut pooled_connection| {
                        api::track::purge::handle_request(&mut pooled_connection)
                    },
                )
                .await
                .map(|_purged| warp::reply())
            },
        );

    // Ticker
    let ticker_load_from_start = api_path
        .and(ticker_path)
        .and(warp::path::end())
        .and(warp::get())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::ticker::load_window::handle_request(
                            &mut pooled_connection,
                            None,
                            ticker_params,
                        )
                    },
                )
                .await
                .map(|response_body| warp::reply::json(&response_body))
            },
        );

    let ticker_load_latest = api_path
        .and(ticker_path)
        .and(warp::path("latest"))
        .and(warp::path::end())
        .and(warp::get())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            |shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    |mut pooled_connection| {
                        api::ticker::load_latest::handle_request(&mut pooled_connection)
                    },
                )
                .await
            },
        );

    let ticker_load_from_cursor = api_path
        .and(ticker_path)
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(shared_connection_gatekeeper)
        .and_then(
            move |cursor: String,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                let cursor =
                    api::ticker::parse_cursor(&cursor).map_err(websrv::reject_on_error)?;
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::ticker::load_window::handle_request(
                            &mut pooled_connection,
                            Some(cursor),
                            ticker_params,
                        )
                    },
                )
                .await
                .map(|response_body| warp::reply::json(&response_body))
            },
        );

    let tracks_filters = tracks_load_ids
        .or(tracks_create)
        .or(tracks_load_one)
        .or(tracks_count)
        .or(tracks_purge);

    let ticker_filters = ticker_load_latest
        .or(ticker_load_from_start)
        .or(ticker_load_from_cursor);

    about.or(tracks_filters).or(ticker_filters).boxed()
}
