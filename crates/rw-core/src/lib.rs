//! rw-core: room scattering and greedy connectivity generation
//!
//! This crate contains all generation logic with no terminal I/O.
//! It is designed to be pure and testable: given a seed (or a fixed point
//! set) a generation pass always produces the same rooms and connections.

pub mod coalesce;
pub mod generation;
pub mod geometry;
pub mod options;
pub mod room;

mod error;
mod rng;

pub use coalesce::{Coalesce, coalesce};
pub use error::{GenError, OptionsError};
pub use generation::{
    Connection, Edge, GeneratedMap, Generator, PointSampler, PointSource, generate_rooms,
    pairwise_edges, sorted_edges,
};
pub use geometry::{Periphery, Point, Rect, nearest_point};
pub use options::{Anchor, GenOptions, SizePolicy};
pub use rng::MapRng;
pub use room::{IdSequence, MAX_FANOUT, Room, RoomId, RoomMap};
