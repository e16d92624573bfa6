// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{num::ParseIntError, result::Result as StdResult};

use diesel::Connection as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use paraglide_repo::prelude::RepoError;
use paraglide_repo_sqlite::{Connection as RepoConnection, DbConnection};
use paraglide_usecases as uc;

pub mod about;
pub mod ticker;
pub mod track;

/// Failures of request handlers.
///
/// Each variant corresponds to a distinct HTTP status code.
#[derive(Error, Debug)]
pub enum Error {
    /// The track identifier in the path is not an integer.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(#[source] ParseIntError),

    /// The ticker timestamp in the path could not be parsed.
    #[error("invalid cursor: {0}")]
    InvalidCursor(anyhow::Error),

    /// The track could not be loaded or parsed.
    #[error("parse failure: {0}")]
    ParseFailure(anyhow::Error),

    /// Unknown route, field name, or track identifier.
    #[error("not found")]
    NotFound,

    /// The ticker has nothing to report.
    #[error("no records")]
    NoRecords,

    #[error("store unavailable: {0}")]
    StoreUnavailable(anyhow::Error),
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Self::StoreUnavailable(err.into())
    }
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound,
            RepoError::Other(err) => Self::StoreUnavailable(err),
            err @ RepoError::Conflict => Self::StoreUnavailable(err.into()),
        }
    }
}

impl From<uc::Error> for Error {
    fn from(err: uc::Error) -> Self {
        match err {
            uc::Error::Input(err) => Self::ParseFailure(err.0),
            uc::Error::Repository(err) => err.into(),
            uc::Error::Other(err) => Self::StoreUnavailable(err),
        }
    }
}

pub type Result<T> = StdResult<T, Error>;

#[cfg(test)]
mod tests;
