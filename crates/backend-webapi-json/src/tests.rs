// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::anyhow;
use jiff::civil::{date, time};
use url::Url;

use paraglide_core::{TrackId, util::clock::UtcDateTimeMs};
use paraglide_igc::{Fix, FlightRecording, TrackLoader};

use super::*;

pub(crate) fn establish_connection() -> DbConnection {
    let mut connection =
        DbConnection::establish(":memory:").expect("in-memory database connection");
    paraglide_repo_sqlite::run_migrations(&mut connection).expect("migrated database schema");
    connection
}

pub(crate) fn at(millis: i64) -> UtcDateTimeMs {
    UtcDateTimeMs::try_from_unix_timestamp_millis(millis).unwrap()
}

fn fix_at(latitude: f64, longitude: f64) -> Fix {
    Fix {
        time: time(10, 0, 0, 0),
        latitude,
        longitude,
        valid: true,
        pressure_altitude: 500,
        gnss_altitude: 520,
    }
}

/// Serves a fixed recording for every URL with an `.igc` suffix.
#[derive(Debug, Default)]
pub(crate) struct StubLoader;

impl TrackLoader for StubLoader {
    fn load_flight_recording(&self, url: &Url) -> paraglide_igc::Result<FlightRecording> {
        if !url.path().ends_with(".igc") {
            return Err(paraglide_igc::Error::Content(anyhow!("not an IGC file")));
        }
        Ok(FlightRecording {
            date: Some(date(2016, 2, 19)),
            pilot: "Miguel Angel Gordillo".to_owned(),
            glider_type: "RV8".to_owned(),
            glider_id: "EC-XLL".to_owned(),
            fixes: vec![fix_at(0.0, 0.0), fix_at(0.0, 1.0)],
        })
    }
}

pub(crate) const SAMPLE_URL: &str = "http://skypolaris.org/wp-content/uploads/IGS%20Files/Madrid%20to%20Jerez.igc";

pub(crate) fn create_track(connection: &mut DbConnection, ingested_at: UtcDateTimeMs) -> TrackId {
    let request_body = track::create::RequestBody {
        url: SAMPLE_URL.to_owned(),
    };
    let input = track::create::load_input(&StubLoader, &request_body).unwrap();
    track::create::handle_request(connection, ingested_at, input)
        .unwrap()
        .id
}

#[test]
fn repository_errors() {
    assert!(matches!(Error::from(RepoError::NotFound), Error::NotFound));
    assert!(matches!(
        Error::from(RepoError::Conflict),
        Error::StoreUnavailable(_)
    ));
    assert!(matches!(
        Error::from(RepoError::Other(anyhow!("disk full"))),
        Error::StoreUnavailable(_)
    ));
}
