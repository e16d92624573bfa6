// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{convert::Infallible, fmt, path::PathBuf, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod pool;

const IN_MEMORY_STORAGE: &str = ":memory:";

/// Location of the database.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Storage {
    /// Volatile, the contents are lost on shutdown.
    InMemory,
    File { path: PathBuf },
}

impl Storage {
    #[must_use]
    pub const fn is_in_memory(&self) -> bool {
        matches!(self, Self::InMemory)
    }

    /// The connection string as expected by `SQLite`.
    #[must_use]
    pub fn connection_url(&self) -> String {
        match self {
            Self::InMemory => IN_MEMORY_STORAGE.to_owned(),
            Self::File { path } => path.display().to_string(),
        }
    }
}

impl FromStr for Storage {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if input.is_empty() || input == IN_MEMORY_STORAGE {
            return Ok(Self::InMemory);
        }
        Ok(Self::File {
            path: input.strip_prefix("file:").unwrap_or(input).into(),
        })
    }
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InMemory => f.write_str(IN_MEMORY_STORAGE),
            Self::File { path } => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub storage: Storage,
    pub pool: pool::Config,
}
