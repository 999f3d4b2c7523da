//! Hardware switch classification
//!
//! Maps key names, mouse button codes and modifier bitmasks onto the
//! small, closed set of switches the overlay knows how to draw.

mod hardware;

pub use hardware::{mask, HardwareSwitch, Modifier, SwitchError};
