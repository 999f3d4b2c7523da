//! Per-switch display state
//!
//! One record per hardware switch, created at startup and updated from
//! input events for the life of the daemon:
//! - modifiers follow the modifier bitmask of every keyboard event
//! - the regular key remembers the label of the most recent key
//! - mouse buttons follow press/release, with left+right shown as a chord

mod board;

pub use board::{SwitchBoard, SwitchState};
