// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub(crate) mod schema;

/// The primary key of the one and only row.
pub(crate) const SINGLE_ROW_ID: i64 = 1;
