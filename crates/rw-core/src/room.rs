//! Rooms and the room graph
//!
//! Rooms reference each other through ids only. A [`RoomMap`] owns every
//! room of a generation pass and answers the graph questions (connect,
//! reachability, components) the generator needs.

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::coalesce::coalesce;
use crate::error::GenError;
use crate::geometry::{Periphery, Point, Rect, nearest_point};

/// Maximum number of connections before a room stops being `available`
pub const MAX_FANOUT: usize = 3;

/// Identity of a room, unique within its [`IdSequence`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u32);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonically increasing room id source
///
/// Owned by whoever drives generation. Sharing one sequence across passes
/// keeps ids unique across all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u32,
}

impl IdSequence {
    /// Sequence whose first id is 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Hand out the next id
    pub fn next_id(&mut self) -> RoomId {
        let id = RoomId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// A rectangular room derived from a sampled anchor point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// The sampled point this room was built around
    pub anchor: Point,
    pub rect: Rect,
    /// Neighbour ids; may hold the same id twice if connected twice
    pub connected: Vec<RoomId>,
}

impl Room {
    pub fn new(id: RoomId, anchor: Point, rect: Rect) -> Self {
        Self {
            id,
            anchor,
            rect,
            connected: Vec::new(),
        }
    }

    /// Top-left cell
    pub fn origin(&self) -> Point {
        self.rect.origin
    }

    pub fn width(&self) -> u32 {
        self.rect.width
    }

    pub fn height(&self) -> u32 {
        self.rect.height
    }

    /// Whether this room can take another connection
    pub fn available(&self) -> bool {
        self.connected.len() < MAX_FANOUT
    }

    /// Whether `other` is a direct neighbour
    pub fn is_connected_to(&self, other: RoomId) -> bool {
        self.connected.contains(&other)
    }

    pub fn periphery(&self) -> Periphery {
        self.rect.periphery()
    }

    /// Closest boundary cells between this room and `other`
    pub fn nearest_point(&self, other: &Room) -> Option<(u32, Point, Point)> {
        nearest_point(&self.rect, &other.rect)
    }
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Room {} {} w:{}, h:{}",
            self.id, self.anchor, self.rect.width, self.rect.height
        )
    }
}

/// Arena of rooms for one generation pass
///
/// Rooms iterate in creation order. Each anchor point maps to at most one
/// room.
#[derive(Debug, Clone, Default)]
pub struct RoomMap {
    rooms: Vec<Room>,
    by_id: HashMap<RoomId, usize>,
    by_anchor: HashMap<Point, usize>,
}

impl RoomMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a map from a list of rooms; later duplicates of an id or
    /// anchor shadow earlier ones in lookups.
    pub fn from_rooms(rooms: Vec<Room>) -> Self {
        let mut map = Self::new();
        for room in rooms {
            map.insert(room);
        }
        map
    }

    /// Add a room and return its id
    pub fn insert(&mut self, room: Room) -> RoomId {
        let id = room.id;
        let idx = self.rooms.len();
        self.by_id.insert(id, idx);
        self.by_anchor.insert(room.anchor, idx);
        self.rooms.push(room);
        id
    }

    /// Room for `anchor`, creating it with `make` on first use
    pub fn get_or_insert_with(&mut self, anchor: Point, make: impl FnOnce() -> Room) -> RoomId {
        match self.by_anchor.get(&anchor) {
            Some(&idx) => self.rooms[idx].id,
            None => self.insert(make()),
        }
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.by_id.get(&id).map(|&idx| &self.rooms[idx])
    }

    pub fn get_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.by_id.get(&id).map(|&idx| &mut self.rooms[idx])
    }

    pub fn by_anchor(&self, anchor: &Point) -> Option<&Room> {
        self.by_anchor.get(anchor).map(|&idx| &self.rooms[idx])
    }

    pub fn contains(&self, id: RoomId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Room> {
        self.rooms.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.rooms.iter().map(|r| r.id)
    }

    /// Connect two rooms in both directions.
    ///
    /// Repeated calls add parallel edges. Returns `Ok(false)` without
    /// touching anything when `a == b`.
    pub fn connect_to(&mut self, a: RoomId, b: RoomId) -> Result<bool, GenError> {
        let ia = *self.by_id.get(&a).ok_or(GenError::UnknownRoom(a))?;
        let ib = *self.by_id.get(&b).ok_or(GenError::UnknownRoom(b))?;
        if ia == ib {
            tracing::warn!(room = %a, "refusing to connect a room to itself");
            return Ok(false);
        }
        self.rooms[ia].connected.push(b);
        self.rooms[ib].connected.push(a);
        Ok(true)
    }

    /// Whether a path leads from `from` to `target`.
    ///
    /// A room always reaches itself. Unknown ids reach nothing.
    pub fn reachable(&self, from: RoomId, target: RoomId) -> bool {
        if !self.contains(from) || !self.contains(target) {
            return false;
        }
        if from == target {
            return true;
        }

        let mut visited: HashSet<RoomId> = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(from);
        queue.push_back(from);

        while let Some(id) = queue.pop_front() {
            let Some(room) = self.get(id) else {
                continue;
            };
            for &next in &room.connected {
                if next == target {
                    return true;
                }
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// Whether every room reaches every other room
    pub fn is_connected(&self) -> bool {
        let Some(first) = self.rooms.first() else {
            return true;
        };
        self.rooms.iter().all(|r| self.reachable(first.id, r.id))
    }

    /// Every connection once, as `(lower, higher)` id pairs
    pub fn edges(&self) -> Vec<(RoomId, RoomId)> {
        let mut edges = Vec::new();
        for room in &self.rooms {
            for &other in &room.connected {
                if room.id < other {
                    edges.push((room.id, other));
                }
            }
        }
        edges
    }

    /// Connected components as sets of room ids
    pub fn components(&self) -> Vec<HashSet<RoomId>> {
        coalesce(self.rooms.iter().map(|r| {
            let mut closed = r.connected.clone();
            closed.push(r.id);
            closed
        }))
        .collect()
    }
}

impl<'a> IntoIterator for &'a RoomMap {
    type Item = &'a Room;
    type IntoIter = std::slice::Iter<'a, Room>;

    fn into_iter(self) -> Self::IntoIter {
        self.rooms.iter()
    }
}

impl Serialize for RoomMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.rooms)
    }
}

impl<'de> Deserialize<'de> for RoomMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rooms = Vec::<Room>::deserialize(deserializer)?;
        Ok(RoomMap::from_rooms(rooms))
    }
}
