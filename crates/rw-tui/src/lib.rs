//! rw-tui: terminal renderer for generated layouts using ratatui
//!
//! Draws each room as an outline and each connection as a line between
//! room anchors. The `roomweb` binary drives generation runs through it.

pub mod app;
pub mod display;
pub mod input;
pub mod session;
pub mod theme;

pub use app::{MapView, RunInfo, ViewOutcome};
pub use display::{MarkerMode, Projection};
pub use input::Command;
pub use session::{Crossterm, TerminalMode, TerminalSession};
pub use theme::Theme;
