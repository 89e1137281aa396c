//! Parked-vehicle track record and the store that owns every live track.

use std::collections::BTreeMap;

use nalgebra::Point2;
use tracing::debug;

use crate::tracker::rect::Rect;
use crate::zone::Zone;

/// Persistent identity for one stationary (or about-to-be-stationary) object.
///
/// All timestamps are seconds on the caller's frame clock.
#[derive(Debug, Clone)]
pub struct ParkedTrack {
    /// Unique track identifier, never reused
    pub id: u64,
    /// Most recent matched bounding box
    pub last_box: Rect,
    /// Center of `last_box`, the stationary anchor
    pub last_pos: Point2<f32>,
    /// When the current stationary period began
    pub start_time: f64,
    /// Timestamp of the most recent successful match
    pub last_seen_time: f64,
    /// Elapsed seconds of the current stationary period
    pub stop_duration: f64,
    /// Zone the track sits in, recomputed when the track moves
    pub zone: Option<Zone>,
}

/// Owns the id-to-track mapping. Tracks are created here, mutated by the
/// per-frame updater and deleted only by [`TrackStore::remove_stale`].
///
/// Ids come from a store-local monotonic counter, so a deleted id is never
/// handed out again.
#[derive(Debug, Default)]
pub struct TrackStore {
    tracks: BTreeMap<u64, ParkedTrack>,
    next_id: u64,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&ParkedTrack> {
        self.tracks.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut ParkedTrack> {
        self.tracks.get_mut(&id)
    }

    /// Iterate live tracks in ascending id order, so association tie-breaks
    /// deterministically favor the oldest track.
    pub fn iter(&self) -> impl Iterator<Item = &ParkedTrack> {
        self.tracks.values()
    }

    /// Create a brand-new track from a detection that matched nothing.
    ///
    /// Both timestamps start at `now` and the stop duration at zero.
    pub fn create(&mut self, bbox: Rect, zone: Option<Zone>, now: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        debug!(id, zone = ?zone, "created track");
        self.tracks.insert(
            id,
            ParkedTrack {
                id,
                last_box: bbox,
                last_pos: bbox.center(),
                start_time: now,
                last_seen_time: now,
                stop_duration: 0.0,
                zone,
            },
        );
        id
    }

    /// Delete every track unseen for longer than `stale_timeout` seconds.
    ///
    /// Runs once per frame, before any association.
    pub fn remove_stale(&mut self, now: f64, stale_timeout: f64) {
        self.tracks.retain(|&id, track| {
            let age = now - track.last_seen_time;
            if age > stale_timeout {
                debug!(id, age, "removing stale track");
                false
            } else {
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let mut store = TrackStore::new();
        let a = store.create(Rect::new(0.0, 0.0, 10.0, 10.0), None, 0.0);
        let b = store.create(Rect::new(50.0, 50.0, 10.0, 10.0), None, 0.0);
        assert_eq!(a, 0);
        assert_eq!(b, 1);
    }

    #[test]
    fn test_ids_never_reused_after_reap() {
        let mut store = TrackStore::new();
        let a = store.create(Rect::new(0.0, 0.0, 10.0, 10.0), None, 0.0);

        store.remove_stale(10.0, 3.0);
        assert!(store.is_empty());

        let b = store.create(Rect::new(0.0, 0.0, 10.0, 10.0), None, 10.0);
        assert_ne!(a, b);
        assert_eq!(b, 1);
    }

    #[test]
    fn test_remove_stale_boundary() {
        let mut store = TrackStore::new();
        store.create(Rect::new(0.0, 0.0, 10.0, 10.0), None, 0.0);

        // Exactly at the timeout the track survives; the cutoff is strict.
        store.remove_stale(3.0, 3.0);
        assert_eq!(store.len(), 1);

        store.remove_stale(3.1, 3.0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_initializes_from_detection() {
        let mut store = TrackStore::new();
        let id = store.create(Rect::new(100.0, 100.0, 40.0, 40.0), Some(Zone::D), 7.0);

        let track = store.get(id).unwrap();
        assert_eq!(track.last_pos, Point2::new(120.0, 120.0));
        assert_eq!(track.start_time, 7.0);
        assert_eq!(track.last_seen_time, 7.0);
        assert_eq!(track.stop_duration, 0.0);
        assert_eq!(track.zone, Some(Zone::D));
    }

    #[test]
    fn test_iter_ascending_id_order() {
        let mut store = TrackStore::new();
        for i in 0..5 {
            store.create(Rect::new(i as f32 * 100.0, 0.0, 10.0, 10.0), None, 0.0);
        }
        let ids: Vec<u64> = store.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }
}
