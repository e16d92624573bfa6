// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{convert::Infallible, result::Result as StdResult};

use thiserror::Error;
use warp::{
    Reply,
    body::BodyDeserializeError,
    http::StatusCode,
    reject::{
        self, InvalidHeader, InvalidQuery, MethodNotAllowed, Reject, Rejection, UnsupportedMediaType,
    },
};

use paraglide_backend_webapi_json as api;
use paraglide_storage_sqlite::{
    self as db,
    connection::pool::{PooledConnection, gatekeeper::Gatekeeper as DatabaseConnectionGatekeeper},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] api::Error),

    #[error("timeout: {reason}")]
    Timeout { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<db::Error> for Error {
    fn from(err: db::Error) -> Self {
        use db::Error::*;
        match err {
            Database(err) => Self::Other(err.into()),
            DatabaseConnection(err) => Self::Other(err.into()),
            DatabaseConnectionPool(err) => Self::Other(err.into()),
            TaskScheduling(err) => Self::Other(err.into()),
            TaskTimeout { reason } => Self::Timeout { reason },
            Other(err) => Self::Other(err),
        }
    }
}

impl Error {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Api(err) => match err {
                api::Error::InvalidIdentifier(_)
                | api::Error::InvalidCursor(_)
                | api::Error::ParseFailure(_) => StatusCode::BAD_REQUEST,
                api::Error::NotFound | api::Error::NoRecords => StatusCode::NOT_FOUND,
                api::Error::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Timeout { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = StdResult<T, Error>;

impl Reject for Error {}

pub fn reject_on_error(err: impl Into<Error>) -> Rejection {
    reject::custom(err.into())
}

pub fn after_blocking_task_finished<T, E1, E2>(
    res: StdResult<StdResult<T, E1>, E2>,
) -> StdResult<T, Rejection>
where
    E1: Into<Error>,
    E2: Into<Error>,
{
    res.map_err(reject_on_error)
        .and_then(|res| res.map_err(reject_on_error))
}

pub async fn spawn_blocking_write_task<H, T, E>(
    gatekeeper: &DatabaseConnectionGatekeeper,
    handler: H,
) -> StdResult<T, Rejection>
where
    H: FnOnce(PooledConnection) -> StdResult<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<Error> + Send + 'static,
{
    after_blocking_task_finished(gatekeeper.spawn_blocking_write_task(handler).await)
}

pub async fn spawn_blocking_read_task<H, T, E>(
    gatekeeper: &DatabaseConnectionGatekeeper,
    handler: H,
) -> StdResult<T, Rejection>
where
    H: FnOnce(PooledConnection) -> StdResult<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<Error> + Send + 'static,
{
    after_blocking_task_finished(gatekeeper.spawn_blocking_read_task(handler).await)
}

fn status_code_to_string(code: StatusCode) -> String {
    code.canonical_reason()
        .unwrap_or_else(|| code.as_str())
        .to_owned()
}

fn rejection_status_code(reject: &Rejection) -> StatusCode {
    if reject.is_not_found() {
        return StatusCode::NOT_FOUND;
    }
    if let Some(err) = reject.find::<Error>() {
        let code = err.status_code();
        if code.is_server_error() {
            log::warn!("Request failed: {err}");
        } else {
            log::debug!("Request rejected: {err}");
        }
        return code;
    }
    if reject.find::<InvalidHeader>().is_some()
        || reject.find::<InvalidQuery>().is_some()
        || reject.find::<BodyDeserializeError>().is_some()
        || reject.find::<UnsupportedMediaType>().is_some()
    {
        return StatusCode::BAD_REQUEST;
    }
    // This must have the least priority, because most rejections
    // contain a MethodNotAllowed element!
    if reject.find::<MethodNotAllowed>().is_some() {
        return StatusCode::METHOD_NOT_ALLOWED;
    }
    log::error!("Unhandled rejection {reject:?}");
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Replies with the canonical reason of the status code as plain text.
#[allow(clippy::unused_async)] // async needed for warp filter
pub async fn handle_rejection(reject: Rejection) -> StdResult<impl Reply, Infallible> {
    let code = rejection_status_code(&reject);
    Ok(warp::reply::with_status(status_code_to_string(code), code))
}
