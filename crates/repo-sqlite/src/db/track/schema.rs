// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

diesel::table! {
    track (track_id) {
        track_id -> BigInt,
        ingested_ms -> BigInt,
        flight_date_ms -> BigInt,
        source_url -> Text,
        pilot -> Text,
        glider -> Text,
        glider_id -> Text,
        track_length_m -> Double,
    }
}
