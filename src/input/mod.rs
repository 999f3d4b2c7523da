//! Input sources feeding the switch board
//!
//! Sources only observe events, they never consume or alter them:
//! - macOS: a listen-only CGEventTap
//! - any platform: newline-delimited JSON on stdin

#[cfg(target_os = "macos")]
mod keys;
mod listener;
#[cfg(target_os = "macos")]
mod macos;
mod stdin;

pub use listener::{InputError, InputEvent, InputSource};
#[cfg(target_os = "macos")]
pub use macos::TapListener;
pub use stdin::StdinSource;
