// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use paraglide_core::TrackId;

use super::*;
use crate::tests::{MemoryRepo, at};

fn ids(window: &TickerWindow) -> Vec<i64> {
    window.track_ids.iter().copied().map(TrackId::to_inner).collect()
}

#[test]
fn empty_store_has_no_window() {
    let mut repo = MemoryRepo::default();
    assert!(load_window(&mut repo, &Params::from_start()).unwrap().is_none());
    assert!(
        load_window(&mut repo, &Params::after(at(0)))
            .unwrap()
            .is_none()
    );
    assert!(load_watermark(&mut repo).unwrap().is_none());
}

#[test]
fn from_start_returns_the_oldest_page() {
    let mut repo = MemoryRepo::with_ingested_at([10, 20, 30, 40, 50, 60]);
    let window = load_window(&mut repo, &Params::from_start())
        .unwrap()
        .unwrap();
    assert_eq!(vec![0, 1, 2, 3, 4], ids(&window));
    assert_eq!(at(10), window.start);
    assert_eq!(at(50), window.stop);
    assert_eq!(at(60), window.latest);
}

#[test]
fn from_cursor_returns_newer_tracks_up_to_the_watermark() {
    let mut repo = MemoryRepo::with_ingested_at([10, 20, 30, 40, 50, 60]);
    let window = load_window(&mut repo, &Params::after(at(20)))
        .unwrap()
        .unwrap();
    assert_eq!(vec![2, 3, 4, 5], ids(&window));
    assert_eq!(at(30), window.start);
    assert_eq!(at(60), window.stop);
    assert_eq!(at(60), window.latest);
}

#[test]
fn page_size_caps_the_window() {
    let mut repo = MemoryRepo::with_ingested_at(1..=12);
    let params = Params {
        page_size: NonZeroUsize::new(3).unwrap(),
        ..Params::after(at(4))
    };
    let window = load_window(&mut repo, &params).unwrap().unwrap();
    assert_eq!(vec![4, 5, 6], ids(&window));
    assert_eq!(at(12), window.latest);
}

#[test]
fn cursor_at_the_watermark_has_no_window() {
    let mut repo = MemoryRepo::with_ingested_at([10, 20, 30]);
    assert!(
        load_window(&mut repo, &Params::after(at(30)))
            .unwrap()
            .is_none()
    );
    assert!(
        load_window(&mut repo, &Params::after(at(99)))
            .unwrap()
            .is_none()
    );
}

#[test]
fn ordered_by_ingestion_time_not_by_id() {
    let mut repo = MemoryRepo::with_ingested_at([50, 10, 40, 20, 30]);
    let window = load_window(&mut repo, &Params::from_start())
        .unwrap()
        .unwrap();
    assert_eq!(vec![1, 3, 4, 2, 0], ids(&window));
    assert_eq!(at(50), window.latest);
}

#[test]
fn ties_are_broken_by_id() {
    let mut repo = MemoryRepo::with_ingested_at([10, 20, 20, 20]);
    // Disturb the insertion order of the ties
    let tracks = repo.purge_tracks().unwrap();
    assert_eq!(4, tracks);
    for (id, millis) in [(3, 20), (0, 10), (2, 20), (1, 20)] {
        repo.insert_track(TrackId::new(id), &crate::tests::new_track(at(millis)))
            .unwrap();
    }
    let window = load_window(&mut repo, &Params::from_start())
        .unwrap()
        .unwrap();
    assert_eq!(vec![0, 1, 2, 3], ids(&window));

    let params = Params {
        tie_break: TieBreak::StoreDefault,
        ..Params::from_start()
    };
    let window = load_window(&mut repo, &params).unwrap().unwrap();
    assert_eq!(vec![0, 3, 2, 1], ids(&window));
}

#[test]
fn watermark_is_the_latest_ingestion_time() {
    let mut repo = MemoryRepo::with_ingested_at([30, 10, 20]);
    assert_eq!(Some(at(30)), load_watermark(&mut repo).unwrap());
}
