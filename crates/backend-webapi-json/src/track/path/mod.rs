// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use percent_encoding::percent_decode_str;

use paraglide_core::TrackId;

use crate::{Error, Result};

const SEGMENT_SEPARATOR: char = '/';

/// Arguments extracted from the path below `track/`.
///
/// Pattern: `:id[/:field]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackPath {
    Record { id: TrackId },
    Field { id: TrackId, field: String },
}

impl TrackPath {
    /// Resolves the remaining, percent-encoded path segments.
    ///
    /// The field name is captured verbatim and not validated here.
    pub fn resolve(tail: &str) -> Result<Self> {
        let tail = percent_decode_str(tail)
            .decode_utf8()
            .map_err(|_| Error::NotFound)?;
        let mut segments = tail.split(SEGMENT_SEPARATOR);
        // An empty tail still contains an (empty) identifier segment
        let id = segments.next().unwrap_or_default();
        let field = segments.next();
        if segments.next().is_some() {
            return Err(Error::NotFound);
        }
        let id = id.parse().map_err(Error::InvalidIdentifier)?;
        let path = match field {
            None => Self::Record { id },
            Some(field) => Self::Field {
                id,
                field: field.to_owned(),
            },
        };
        Ok(path)
    }

    #[must_use]
    pub const fn id(&self) -> TrackId {
        match self {
            Self::Record { id } | Self::Field { id, .. } => *id,
        }
    }
}

#[cfg(test)]
mod tests;
