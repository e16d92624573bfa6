// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

diesel::table! {
    track_sequence (row_id) {
        row_id -> BigInt,
        next_track_id -> BigInt,
    }
}
