// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use super::{path::TrackPath, *};
use crate::tests::{SAMPLE_URL, StubLoader, at, create_track, establish_connection};

#[test]
fn create_tracks_with_sequential_ids() {
    let mut connection = establish_connection();
    assert_eq!(TrackId::new(0), create_track(&mut connection, at(1_000)));
    assert_eq!(TrackId::new(1), create_track(&mut connection, at(2_000)));
    assert_eq!(
        vec![TrackId::new(0), TrackId::new(1)],
        load_ids::handle_request(&mut connection).unwrap()
    );
    assert_eq!("2", count::handle_request(&mut connection).unwrap());
}

#[test]
fn reject_invalid_url() {
    let request_body = create::RequestBody {
        url: "not a url".to_owned(),
    };
    assert!(matches!(
        create::load_input(&StubLoader, &request_body),
        Err(Error::ParseFailure(_))
    ));
}

#[test]
fn reject_unloadable_track() {
    let request_body = create::RequestBody {
        url: "https://example.com/index.html".to_owned(),
    };
    assert!(matches!(
        create::load_input(&StubLoader, &request_body),
        Err(Error::ParseFailure(_))
    ));
}

#[test]
fn load_record() {
    let mut connection = establish_connection();
    let id = create_track(&mut connection, at(1_000));
    let response_body =
        load_one::handle_request(&mut connection, &TrackPath::Record { id }).unwrap();
    let load_one::ResponseBody::Record(record) = response_body else {
        panic!("unexpected response: {response_body:?}");
    };
    assert_eq!("2016-02-19T00:00:00Z", record.flight_date);
    assert_eq!("Miguel Angel Gordillo", record.pilot);
    assert_eq!("RV8", record.glider);
    assert_eq!("EC-XLL", record.glider_id);
    assert!((record.track_length - 111_195.0).abs() < 1.0);
    assert_eq!(SAMPLE_URL, record.track_src_url);

    let json = serde_json::to_value(&record).unwrap();
    let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    for key in [
        "H_date",
        "pilot",
        "glider",
        "glider_id",
        "track_length",
        "track_src_url",
    ] {
        assert!(keys.iter().any(|k| k == key), "missing {key}");
    }
    assert_eq!(6, keys.len());
}

#[test]
fn load_field() {
    let mut connection = establish_connection();
    let id = create_track(&mut connection, at(1_000));
    let path = |field: &str| TrackPath::Field {
        id,
        field: field.to_owned(),
    };
    assert_eq!(
        load_one::ResponseBody::Field("Miguel Angel Gordillo".to_owned()),
        load_one::handle_request(&mut connection, &path("pilot")).unwrap()
    );
    assert_eq!(
        load_one::ResponseBody::Field("2016-02-19T00:00:00Z".to_owned()),
        load_one::handle_request(&mut connection, &path("H_date")).unwrap()
    );
    assert_eq!(
        load_one::ResponseBody::Field(SAMPLE_URL.to_owned()),
        load_one::handle_request(&mut connection, &path("track_src_url")).unwrap()
    );
    for unknown in ["", "Pilot", "id", "track_length_m"] {
        assert!(matches!(
            load_one::handle_request(&mut connection, &path(unknown)),
            Err(Error::NotFound)
        ));
    }
}

#[test]
fn load_unknown_track() {
    let mut connection = establish_connection();
    create_track(&mut connection, at(1_000));
    let id = TrackId::new(1);
    assert!(matches!(
        load_one::handle_request(&mut connection, &TrackPath::Record { id }),
        Err(Error::NotFound)
    ));
    assert!(matches!(
        load_one::handle_request(
            &mut connection,
            &TrackPath::Field {
                id,
                field: "pilot".to_owned()
            }
        ),
        Err(Error::NotFound)
    ));
    // The record is looked up before the field name
    assert!(matches!(
        load_one::handle_request(
            &mut connection,
            &TrackPath::Field {
                id,
                field: "unknown".to_owned()
            }
        ),
        Err(Error::NotFound)
    ));
}

#[test]
fn purge_all_tracks() {
    let mut connection = establish_connection();
    create_track(&mut connection, at(1_000));
    create_track(&mut connection, at(2_000));
    assert_eq!(2, purge::handle_request(&mut connection).unwrap());
    assert!(load_ids::handle_request(&mut connection).unwrap().is_empty());
    assert_eq!("0", count::handle_request(&mut connection).unwrap());
    // Identifiers are not reused
    assert_eq!(TrackId::new(2), create_track(&mut connection, at(3_000)));
}
