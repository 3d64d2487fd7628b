//! Room layout generation
//!
//! A pass scatters anchor points over the canvas, ranks every pair of
//! points by distance, and walks the pairs from nearest to farthest:
//!
//! 1. Derive a room size from the pair's distance. Pairs too close
//!    together to hold a room create no rooms; they can only join rooms
//!    that other pairs created.
//! 2. Materialize a room for each endpoint the first time it is seen.
//! 3. Connect the two rooms only if neither can already reach the other.
//!
//! The result is a single connected component whose connections form a
//! spanning tree taken in ascending distance order. It is not a minimum
//! spanning tree once short pairs have been skipped.

use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::geometry::Point;
use crate::options::{Anchor, GenOptions};
use crate::room::{IdSequence, Room, RoomId, RoomMap};

/// Source of uniform random integers
pub trait PointSource {
    /// Uniform integer in `lo..=hi`
    fn uniform(&mut self, lo: i32, hi: i32) -> i32;
}

impl<S: PointSource + ?Sized> PointSource for &mut S {
    fn uniform(&mut self, lo: i32, hi: i32) -> i32 {
        (**self).uniform(lo, hi)
    }
}

/// Samples anchor points inside the inset sampling area of a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointSampler {
    x_bounds: (i32, i32),
    y_bounds: (i32, i32),
}

impl PointSampler {
    pub fn new(options: &GenOptions) -> Self {
        Self::from_bounds(options.x_bounds(), options.y_bounds())
    }

    /// Sampler over explicit inclusive bounds
    pub fn from_bounds(x_bounds: (i32, i32), y_bounds: (i32, i32)) -> Self {
        Self { x_bounds, y_bounds }
    }

    pub fn x_bounds(&self) -> (i32, i32) {
        self.x_bounds
    }

    pub fn y_bounds(&self) -> (i32, i32) {
        self.y_bounds
    }

    /// Draw a single point
    pub fn selection(&self, source: &mut impl PointSource) -> Point {
        let x = source.uniform(self.x_bounds.0, self.x_bounds.1);
        let y = source.uniform(self.y_bounds.0, self.y_bounds.1);
        Point::new(x, y)
    }

    /// Draw `count` points; duplicates are possible
    pub fn sample(&self, source: &mut impl PointSource, count: usize) -> Vec<Point> {
        (0..count).map(|_| self.selection(source)).collect()
    }
}

/// A candidate pairing of two sampled points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub distance: u32,
    pub a: Point,
    pub b: Point,
}

/// Every unordered pair of `points`, in combination order
/// (`(0,1), (0,2), .., (1,2), ..`)
pub fn pairwise_edges(points: &[Point]) -> impl Iterator<Item = Edge> + '_ {
    points.iter().enumerate().flat_map(move |(i, a)| {
        points[i + 1..].iter().map(move |b| Edge {
            distance: a.distance_to(b),
            a: *a,
            b: *b,
        })
    })
}

/// Pairwise edges sorted by distance; equal distances keep combination order
pub fn sorted_edges(points: &[Point]) -> Vec<Edge> {
    let mut edges: Vec<Edge> = pairwise_edges(points).collect();
    edges.sort_by_key(|e| e.distance);
    edges
}

/// A connection made during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: RoomId,
    pub to: RoomId,
    /// Distance between the two anchors
    pub distance: u32,
}

/// Outcome of one generation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMap {
    /// Sampled anchor points, in draw order
    pub points: Vec<Point>,
    pub rooms: RoomMap,
    /// Connections in the order they were made
    pub connections: Vec<Connection>,
    /// Pairs skipped because their room would have been too small
    pub skipped: usize,
}

impl GeneratedMap {
    pub fn is_connected(&self) -> bool {
        self.rooms.is_connected()
    }

    /// Anchor-to-anchor segments for every connection
    pub fn segments(&self) -> Vec<(Point, Point)> {
        self.connections
            .iter()
            .filter_map(|c| {
                let from = self.rooms.get(c.from)?;
                let to = self.rooms.get(c.to)?;
                Some((from.anchor, to.anchor))
            })
            .collect()
    }
}

/// Drives generation passes
///
/// Owns the room id sequence, so ids keep increasing across passes made
/// by the same generator.
#[derive(Debug, Clone)]
pub struct Generator {
    options: GenOptions,
    ids: IdSequence,
}

impl Generator {
    /// Create a generator, rejecting unusable options up front
    pub fn new(options: GenOptions) -> Result<Self, GenError> {
        Self::with_ids(options, IdSequence::new())
    }

    /// Create a generator that draws room ids from `ids`
    pub fn with_ids(options: GenOptions, ids: IdSequence) -> Result<Self, GenError> {
        options.validate()?;
        Ok(Self { options, ids })
    }

    pub fn options(&self) -> &GenOptions {
        &self.options
    }

    pub fn ids(&self) -> &IdSequence {
        &self.ids
    }

    /// Sample anchor points from `source` and build a connected layout
    pub fn generate(&mut self, source: &mut impl PointSource) -> Result<GeneratedMap, GenError> {
        let sampler = PointSampler::new(&self.options);
        let points = sampler.sample(source, self.options.rooms);
        tracing::debug!(
            count = points.len(),
            x_bounds = ?sampler.x_bounds(),
            y_bounds = ?sampler.y_bounds(),
            "sampled anchor points"
        );
        self.generate_from_points(points)
    }

    /// Build a connected layout over a fixed set of anchor points
    pub fn generate_from_points(&mut self, points: Vec<Point>) -> Result<GeneratedMap, GenError> {
        let anchor = self.options.anchor;
        let size_policy = self.options.size_policy;
        let enforce_fanout = self.options.enforce_fanout;
        let mut rooms = RoomMap::new();
        let mut connections = Vec::new();
        let mut deferred = Vec::new();
        let mut skipped = 0;

        for edge in sorted_edges(&points) {
            let diameter = size_policy.diameter(edge.distance);
            if diameter < self.options.min_diameter {
                tracing::debug!(
                    a = %edge.a,
                    b = %edge.b,
                    distance = edge.distance,
                    diameter,
                    "pair too close for a room"
                );
                skipped += 1;
                deferred.push(edge);
                continue;
            }

            let a = room_for(&mut rooms, &mut self.ids, anchor, edge.a, diameter);
            let b = room_for(&mut rooms, &mut self.ids, anchor, edge.b, diameter);
            link(&mut rooms, &mut connections, enforce_fanout, a, b, edge.distance)?;
        }

        // Pairs too short for a room can still bridge rooms made by longer
        // pairs. Nearest first, like the main walk.
        for edge in &deferred {
            if let Some((a, b)) = existing_rooms(&rooms, edge) {
                link(&mut rooms, &mut connections, enforce_fanout, a, b, edge.distance)?;
            }
        }

        tracing::info!(
            rooms = rooms.len(),
            connections = connections.len(),
            skipped,
            "generation pass complete"
        );

        Ok(GeneratedMap {
            points,
            rooms,
            connections,
            skipped,
        })
    }
}

/// Connect `a` and `b` unless they already reach each other
fn link(
    rooms: &mut RoomMap,
    connections: &mut Vec<Connection>,
    enforce_fanout: bool,
    a: RoomId,
    b: RoomId,
    distance: u32,
) -> Result<bool, GenError> {
    if a == b || rooms.reachable(a, b) {
        tracing::trace!(%a, %b, "already reachable");
        return Ok(false);
    }
    if enforce_fanout && !both_available(rooms, a, b) {
        tracing::trace!(%a, %b, "fan-out exhausted");
        return Ok(false);
    }

    rooms.connect_to(a, b)?;
    tracing::debug!(%a, %b, distance, "connecting");
    connections.push(Connection {
        from: a,
        to: b,
        distance,
    });
    Ok(true)
}

fn existing_rooms(rooms: &RoomMap, edge: &Edge) -> Option<(RoomId, RoomId)> {
    let a = rooms.by_anchor(&edge.a)?.id;
    let b = rooms.by_anchor(&edge.b)?.id;
    Some((a, b))
}

fn room_for(
    rooms: &mut RoomMap,
    ids: &mut IdSequence,
    anchor: Anchor,
    point: Point,
    diameter: u32,
) -> RoomId {
    rooms.get_or_insert_with(point, || {
        Room::new(ids.next_id(), point, anchor.place(point, diameter))
    })
}

fn both_available(rooms: &RoomMap, a: RoomId, b: RoomId) -> bool {
    let free = |id| rooms.get(id).is_some_and(Room::available);
    free(a) && free(b)
}

/// One-shot pass with a fresh id sequence
pub fn generate_rooms(
    options: GenOptions,
    source: &mut impl PointSource,
) -> Result<GeneratedMap, GenError> {
    Generator::new(options)?.generate(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::MapRng;
    use crate::room::MAX_FANOUT;

    /// Replays a fixed script of values and records the bounds asked for
    struct Scripted {
        values: Vec<i32>,
        asked: Vec<(i32, i32)>,
    }

    impl PointSource for Scripted {
        fn uniform(&mut self, lo: i32, hi: i32) -> i32 {
            self.asked.push((lo, hi));
            self.values.remove(0)
        }
    }

    fn pts(raw: &[(i32, i32)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_pairwise_edges_combination_order() {
        let points = pts(&[(0, 0), (3, 4), (6, 8)]);
        let pairs: Vec<(Point, Point)> = pairwise_edges(&points).map(|e| (e.a, e.b)).collect();
        assert_eq!(
            pairs,
            vec![
                (points[0], points[1]),
                (points[0], points[2]),
                (points[1], points[2]),
            ]
        );
    }

    #[test]
    fn test_sorted_edges_is_stable() {
        // (0,1) and (1,2) are both 5 apart; (0,2) is 10.
        let points = pts(&[(0, 0), (3, 4), (6, 8)]);
        let edges = sorted_edges(&points);
        let dists: Vec<u32> = edges.iter().map(|e| e.distance).collect();
        assert_eq!(dists, vec![5, 5, 10]);
        assert_eq!(edges[0].a, points[0]);
        assert_eq!(edges[1].a, points[1]);
    }

    #[test]
    fn test_sampler_uses_inset_bounds() {
        let mut source = Scripted {
            values: vec![100, 200],
            asked: Vec::new(),
        };
        let sampler = PointSampler::new(&GenOptions::default());
        let p = sampler.selection(&mut source);
        assert_eq!(p, Point::new(100, 200));
        assert_eq!(source.asked, vec![(60, 540), (40, 360)]);
    }

    #[test]
    fn test_invalid_options_fail_before_sampling() {
        let mut source = Scripted {
            values: Vec::new(),
            asked: Vec::new(),
        };
        let opts = GenOptions {
            height: -5,
            ..GenOptions::default()
        };
        assert!(matches!(
            generate_rooms(opts, &mut source),
            Err(GenError::InvalidCanvas { .. })
        ));
        assert!(source.asked.is_empty());
    }

    #[test]
    fn test_line_of_rooms_is_a_chain() {
        let mut generator = Generator::new(GenOptions::default()).unwrap();
        let map = generator
            .generate_from_points(pts(&[(0, 0), (10, 0), (20, 0), (30, 0)]))
            .unwrap();
        assert_eq!(map.rooms.len(), 4);
        assert_eq!(map.connections.len(), 3);
        assert!(map.is_connected());
        assert_eq!(map.skipped, 0);
        // Only neighbours along the line get connected.
        assert!(map.connections.iter().all(|c| c.distance == 10));
        for room in &map.rooms {
            assert_eq!(room.width(), 8);
            assert_eq!(room.height(), 8);
        }
    }

    #[test]
    fn test_room_size_fixed_by_first_edge() {
        let mut generator = Generator::new(GenOptions::default()).unwrap();
        let map = generator
            .generate_from_points(pts(&[(0, 0), (10, 0), (100, 0)]))
            .unwrap();
        let far = map.rooms.by_anchor(&Point::new(100, 0)).unwrap();
        // First seen on the 90-long edge from (10, 0).
        assert_eq!(far.width(), 72);
        let near = map.rooms.by_anchor(&Point::new(0, 0)).unwrap();
        assert_eq!(near.width(), 8);
    }

    #[test]
    fn test_anchor_policies() {
        let points = pts(&[(50, 50), (60, 50)]);
        let mut centered = Generator::new(GenOptions::default()).unwrap();
        let map = centered.generate_from_points(points.clone()).unwrap();
        let room = map.rooms.by_anchor(&Point::new(50, 50)).unwrap();
        assert_eq!(room.origin(), Point::new(46, 46));

        let opts = GenOptions {
            anchor: Anchor::TopLeft,
            ..GenOptions::default()
        };
        let mut top_left = Generator::new(opts).unwrap();
        let map = top_left.generate_from_points(points).unwrap();
        let room = map.rooms.by_anchor(&Point::new(50, 50)).unwrap();
        assert_eq!(room.origin(), Point::new(50, 50));
    }

    #[test]
    fn test_degenerate_pairs_are_skipped() {
        // (0,0)-(1,1) floors to 1, so no room comes from that pair.
        let mut generator = Generator::new(GenOptions::default()).unwrap();
        let map = generator
            .generate_from_points(pts(&[(0, 0), (1, 1), (40, 0)]))
            .unwrap();
        assert_eq!(map.skipped, 1);
        assert_eq!(map.rooms.len(), 3);
        assert!(map.is_connected());
    }

    #[test]
    fn test_short_pairs_join_existing_rooms() {
        // Every cross pair between {(0,0),(3,0)} and {(1,1),(1,-2)} is too
        // short for a room, yet both clusters end up with rooms.
        let mut generator = Generator::new(GenOptions::default()).unwrap();
        let map = generator
            .generate_from_points(pts(&[(0, 0), (3, 0), (1, 1), (1, -2)]))
            .unwrap();
        assert_eq!(map.rooms.len(), 4);
        assert_eq!(map.skipped, 4);
        assert_eq!(map.connections.len(), 3);
        assert!(map.is_connected());

        let bridge = map.connections[2];
        let from = map.rooms.get(bridge.from).unwrap();
        let to = map.rooms.get(bridge.to).unwrap();
        assert_eq!(bridge.distance, 1);
        assert_eq!(from.anchor, Point::new(0, 0));
        assert_eq!(to.anchor, Point::new(1, 1));
    }

    #[test]
    fn test_coincident_points_make_no_rooms() {
        let mut generator = Generator::new(GenOptions::default()).unwrap();
        let map = generator
            .generate_from_points(pts(&[(5, 5), (5, 5), (6, 5)]))
            .unwrap();
        assert!(map.rooms.is_empty());
        assert!(map.connections.is_empty());
        assert_eq!(map.skipped, 3);
    }

    #[test]
    fn test_duplicate_anchor_shares_a_room() {
        let mut generator = Generator::new(GenOptions::default()).unwrap();
        let map = generator
            .generate_from_points(pts(&[(0, 0), (0, 0), (30, 0)]))
            .unwrap();
        assert_eq!(map.rooms.len(), 2);
        assert_eq!(map.connections.len(), 1);
        for room in &map.rooms {
            assert!(!room.is_connected_to(room.id));
        }
    }

    #[test]
    fn test_ids_continue_across_passes() {
        let mut generator = Generator::with_ids(GenOptions::default(), IdSequence::starting_at(10))
            .unwrap();
        let first = generator
            .generate_from_points(pts(&[(0, 0), (20, 0)]))
            .unwrap();
        let second = generator
            .generate_from_points(pts(&[(0, 0), (20, 0)]))
            .unwrap();
        let first_ids: Vec<u32> = first.rooms.ids().map(|id| id.0).collect();
        let second_ids: Vec<u32> = second.rooms.ids().map(|id| id.0).collect();
        assert_eq!(first_ids, vec![10, 11]);
        assert_eq!(second_ids, vec![12, 13]);
    }

    #[test]
    fn test_fanout_gate() {
        // A hub with five spokes: the hub takes at most MAX_FANOUT of them.
        let opts = GenOptions {
            enforce_fanout: true,
            ..GenOptions::default()
        };
        let mut generator = Generator::new(opts).unwrap();
        let map = generator
            .generate_from_points(pts(&[
                (100, 100),
                (120, 100),
                (80, 100),
                (100, 121),
                (100, 78),
                (123, 123),
            ]))
            .unwrap();
        for room in &map.rooms {
            assert!(room.connected.len() <= MAX_FANOUT);
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let run = |seed| {
            let mut rng = MapRng::new(seed);
            let map = generate_rooms(GenOptions::default(), &mut rng).unwrap();
            serde_json::to_string(&map).unwrap()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn test_segments_follow_connections() {
        let mut generator = Generator::new(GenOptions::default()).unwrap();
        let map = generator
            .generate_from_points(pts(&[(0, 0), (10, 0)]))
            .unwrap();
        assert_eq!(
            map.segments(),
            vec![(Point::new(0, 0), Point::new(10, 0))]
        );
    }
}
