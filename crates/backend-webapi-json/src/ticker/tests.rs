// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use super::*;
use crate::tests::{at, create_track, establish_connection};

fn default_params() -> Params {
    Params::new(paraglide_core::ticker::DEFAULT_PAGE_SIZE)
}

#[test]
fn empty_store_has_no_records() {
    let mut connection = establish_connection();
    assert!(matches!(
        load_window::handle_request(&mut connection, None, default_params()),
        Err(Error::NoRecords)
    ));
    assert!(matches!(
        load_window::handle_request(&mut connection, Some(at(0)), default_params()),
        Err(Error::NoRecords)
    ));
    assert!(matches!(
        load_latest::handle_request(&mut connection),
        Err(Error::NoRecords)
    ));
}

#[test]
fn page_through_all_tracks() {
    let mut connection = establish_connection();
    for millis in 1..=7 {
        create_track(&mut connection, at(millis * 1_000));
    }
    let first = load_window::handle_request(&mut connection, None, default_params()).unwrap();
    assert_eq!(5, first.tracks.len());
    assert_eq!(at(1_000), first.t_start);
    assert_eq!(at(5_000), first.t_stop);
    assert_eq!(at(7_000), first.t_latest);

    let second =
        load_window::handle_request(&mut connection, Some(first.t_stop), default_params())
            .unwrap();
    assert_eq!(
        vec![TrackId::new(5), TrackId::new(6)],
        second.tracks
    );
    assert_eq!(at(6_000), second.t_start);
    assert_eq!(at(7_000), second.t_stop);

    assert!(matches!(
        load_window::handle_request(&mut connection, Some(second.t_stop), default_params()),
        Err(Error::NoRecords)
    ));
    assert_eq!(
        "1970-01-01T00:00:07.000Z",
        load_latest::handle_request(&mut connection).unwrap()
    );
}

#[test]
fn window_json() {
    let mut connection = establish_connection();
    create_track(&mut connection, at(1_500));
    let window = load_window::handle_request(&mut connection, None, default_params()).unwrap();
    let json = serde_json::to_value(&window).unwrap();
    assert_eq!("1970-01-01T00:00:01.500Z", json["t_latest"]);
    assert_eq!("1970-01-01T00:00:01.500Z", json["t_start"]);
    assert_eq!("1970-01-01T00:00:01.500Z", json["t_stop"]);
    assert_eq!(serde_json::json!([0]), json["tracks"]);
    assert!(json["processing"].is_u64());
}

#[test]
fn reject_invalid_cursors() {
    for input in [
        "",
        "yesterday",
        "2016-02-19",
        "2016-02-19 10:00:00.000Z",
        "2016-02-19T10:00:00.000+01:00",
        "2016-02-19T10%3A00%3A00.000%2B01%3A00",
        "%FF",
    ] {
        assert!(
            matches!(parse_cursor(input), Err(Error::InvalidCursor(_))),
            "{input}"
        );
    }
}

#[test]
fn parse_percent_encoded_cursor() {
    assert_eq!(
        at(1_500),
        parse_cursor("1970-01-01T00%3A00%3A01.500Z").unwrap()
    );
    assert_eq!(at(1_500), parse_cursor("1970-01-01T00:00:01.500Z").unwrap());
}
