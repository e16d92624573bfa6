// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use jiff::civil::{date, time};
use test_log::test;

use paraglide_igc::Fix;

use super::*;
use crate::tests::{MemoryRepo, at};

fn fix_at(latitude: f64, longitude: f64) -> Fix {
    Fix {
        time: time(12, 0, 0, 0),
        latitude,
        longitude,
        valid: true,
        pressure_altitude: 1_000,
        gnss_altitude: 1_000,
    }
}

fn new_recording() -> FlightRecording {
    FlightRecording {
        date: Some(date(2016, 2, 19)),
        pilot: "Miguel Angel Gordillo".to_owned(),
        glider_type: "RV8".to_owned(),
        glider_id: "EC-XLL".to_owned(),
        fixes: vec![fix_at(0.0, 0.0), fix_at(1.0, 0.0)],
    }
}

fn source_url() -> Url {
    "http://skypolaris.org/wp-content/uploads/IGS%20Files/Madrid%20to%20Jerez.igc"
        .parse()
        .unwrap()
}

#[test]
fn validate_recording() {
    let input = validate_input(source_url(), new_recording()).unwrap();
    let track = input.into_track(at(1_000));
    assert_eq!(source_url(), track.source_url);
    assert_eq!(at(1_000), track.ingested_at);
    assert_eq!("2016-02-19T00:00:00Z", track.flight_date.to_timestamp().to_string());
    assert_eq!("Miguel Angel Gordillo", track.pilot);
    assert_eq!("RV8", track.glider);
    assert_eq!("EC-XLL", track.glider_id);
    assert!((track.track_length_meters - 111_195.0).abs() < 1.0);
}

#[test]
fn reject_recording_without_date() {
    let recording = FlightRecording {
        date: None,
        ..new_recording()
    };
    assert!(validate_input(source_url(), recording).is_err());
}

#[test]
fn ingest_allocates_sequential_ids() {
    let mut repo = MemoryRepo::default();
    for expected_id in 0..3 {
        let input = validate_input(source_url(), new_recording()).unwrap();
        let id = ingest(&mut repo, at(expected_id * 1_000), input).unwrap();
        assert_eq!(TrackId::new(expected_id), id);
    }
    assert_eq!(3, repo.count_tracks().unwrap());
    let track = repo.load_track(TrackId::new(2)).unwrap();
    assert_eq!(at(2_000), track.ingested_at);
}

#[test]
fn ids_stay_unique_after_purging() {
    let mut repo = MemoryRepo::default();
    let input = validate_input(source_url(), new_recording()).unwrap();
    let first_id = ingest(&mut repo, at(0), input.clone()).unwrap();
    assert_eq!(1, purge_all(&mut repo).unwrap());
    assert!(repo.load_track_ids().unwrap().is_empty());
    let second_id = ingest(&mut repo, at(1), input).unwrap();
    assert_ne!(first_id, second_id);
    assert_eq!(vec![second_id], repo.load_track_ids().unwrap());
}
