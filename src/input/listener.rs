//! Input events and the source abstraction

use serde::{Deserialize, Serialize};

/// Raw input as delivered by a hook, before classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    KeyPressed {
        /// Key label, e.g. `a`, `Enter` or `Shift`
        key: String,
        /// Modifier bits, see [`crate::switch::mask`]
        #[serde(default)]
        modifiers: u32,
    },
    KeyReleased {
        key: String,
        #[serde(default)]
        modifiers: u32,
    },
    /// Mouse button went down, X11 numbering (1 left, 2 middle, 3 right)
    MousePressed { button: u16 },
    MouseReleased { button: u16 },
}

/// A listener thread that pushes [`InputEvent`]s onto a channel
pub trait InputSource {
    /// Spawn the listener thread
    fn start(&self) -> Result<(), InputError>;

    /// Ask the listener thread to exit
    fn stop(&self);

    /// Check if the listener is currently running
    fn is_running(&self) -> bool;
}

/// Errors that can occur in an input source
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input listener is already running")]
    AlreadyRunning,

    #[error("failed to create event tap - check Accessibility permissions")]
    EventTapCreation,

    #[error("failed to spawn listener thread: {0}")]
    ThreadSpawn(String),
}
