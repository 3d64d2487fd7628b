//! Error types for generation and option loading

use thiserror::Error;

use crate::room::RoomId;

/// Errors raised before or during a generation pass
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("canvas extents must be positive, got {width}x{height}")]
    InvalidCanvas { width: i32, height: i32 },

    #[error("room count must be positive")]
    InvalidRoomCount,

    #[error("inset of {percent}% leaves no sampling area (must be below 50%)")]
    InvalidInset { percent: u32 },

    #[error("minimum room diameter must be at least 1")]
    InvalidMinDiameter,

    #[error("no room with id {0}")]
    UnknownRoom(RoomId),
}

/// Errors raised while loading or parsing generation options
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("could not read options: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("malformed JSON options: {0}")]
    Json(#[from] serde_json::Error),
}
