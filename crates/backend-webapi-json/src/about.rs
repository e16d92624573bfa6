// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use paraglide_core::util::clock::period::format_uptime;

use super::*;

pub const INFO: &str = "Service for Paragliding tracks.";

pub const VERSION: &str = "v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub uptime: String,
    pub info: String,
    pub version: String,
}

/// Describes the service.
///
/// The uptime is measured from the launch of the service.
#[must_use]
pub fn handle_request(uptime: Duration) -> ResponseBody {
    ResponseBody {
        uptime: format_uptime(uptime),
        info: INFO.to_owned(),
        version: VERSION.to_owned(),
    }
}
