// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use proptest::prelude::*;

use super::*;

#[test]
fn resolve_record() {
    assert_eq!(
        TrackPath::Record {
            id: TrackId::new(42)
        },
        TrackPath::resolve("42").unwrap()
    );
}

#[test]
fn resolve_field() {
    assert_eq!(
        TrackPath::Field {
            id: TrackId::new(0),
            field: "pilot".to_owned(),
        },
        TrackPath::resolve("0/pilot").unwrap()
    );
}

#[test]
fn resolve_empty_trailing_field() {
    assert_eq!(
        TrackPath::Field {
            id: TrackId::new(7),
            field: String::new(),
        },
        TrackPath::resolve("7/").unwrap()
    );
}

#[test]
fn resolve_invalid_identifier() {
    assert!(matches!(
        TrackPath::resolve("abc"),
        Err(Error::InvalidIdentifier(_))
    ));
    assert!(matches!(
        TrackPath::resolve("1.5/pilot"),
        Err(Error::InvalidIdentifier(_))
    ));
}

#[test]
fn resolve_too_many_segments() {
    assert!(matches!(
        TrackPath::resolve("1/pilot/extra"),
        Err(Error::NotFound)
    ));
    // Even if the identifier is invalid
    assert!(matches!(
        TrackPath::resolve("x/pilot/extra"),
        Err(Error::NotFound)
    ));
}

#[test]
fn resolve_empty_identifier() {
    assert!(matches!(
        TrackPath::resolve(""),
        Err(Error::InvalidIdentifier(_))
    ));
    assert!(matches!(
        TrackPath::resolve("/pilot"),
        Err(Error::InvalidIdentifier(_))
    ));
}

#[test]
fn resolve_percent_encoded() {
    assert_eq!(
        TrackPath::Field {
            id: TrackId::new(12),
            field: "glider_id".to_owned(),
        },
        TrackPath::resolve("%31%32/glider%5Fid").unwrap()
    );
    assert!(matches!(TrackPath::resolve("1/%FF"), Err(Error::NotFound)));
}

proptest! {
    #[test]
    fn any_integer_id_resolves_to_record(id in any::<i64>()) {
        let path = TrackPath::resolve(&id.to_string()).unwrap();
        prop_assert_eq!(TrackPath::Record { id: TrackId::new(id) }, path);
    }

    #[test]
    fn field_is_captured_verbatim(id in 0..i64::MAX, field in "[A-Za-z_]{0,16}") {
        let path = TrackPath::resolve(&format!("{id}/{field}")).unwrap();
        prop_assert_eq!(TrackId::new(id), path.id());
        prop_assert_eq!(TrackPath::Field { id: TrackId::new(id), field }, path);
    }

    #[test]
    fn non_numeric_ids_are_rejected(id in "[a-z]{1,8}") {
        prop_assert!(matches!(TrackPath::resolve(&id), Err(Error::InvalidIdentifier(_))));
    }

    #[test]
    fn more_than_two_segments_are_not_found(
        id in any::<i64>(),
        segments in proptest::collection::vec("[a-z]{0,4}", 2..5),
    ) {
        let tail = format!("{id}/{}", segments.join("/"));
        prop_assert!(matches!(TrackPath::resolve(&tail), Err(Error::NotFound)));
    }
}
