//! Global input listener using a macOS CGEventTap
//!
//! Observes key, modifier and mouse button events system-wide without
//! altering them. Runs on a dedicated thread with its own CFRunLoop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use core_foundation::runloop::{kCFRunLoopCommonModes, kCFRunLoopDefaultMode, CFRunLoop};
use core_graphics::event::{
    CGEvent, CGEventFlags, CGEventTap, CGEventTapLocation, CGEventTapOptions,
    CGEventTapPlacement, CGEventType, EventField,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::keys;
use super::listener::{InputError, InputEvent, InputSource};

/// What the tap callback captures; translated off the callback
#[derive(Debug, Clone, Copy)]
struct RawEvent {
    kind: CGEventType,
    keycode: i64,
    button: i64,
    flags: CGEventFlags,
}

/// Listen-only event tap feeding the switch board
pub struct TapListener {
    event_tx: mpsc::Sender<InputEvent>,
    running: Arc<AtomicBool>,
}

impl TapListener {
    pub fn new(event_tx: mpsc::Sender<InputEvent>) -> Self {
        Self {
            event_tx,
            running: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl InputSource for TapListener {
    /// Spawns a thread running a CFRunLoop that receives the tap callbacks
    fn start(&self) -> Result<(), InputError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(InputError::AlreadyRunning);
        }

        let event_tx = self.event_tx.clone();
        let running = Arc::clone(&self.running);

        thread::Builder::new()
            .name("input-tap".to_string())
            .spawn(move || {
                info!("input tap thread started");

                if let Err(e) = run_event_loop(event_tx, running.clone()) {
                    error!(?e, "input tap error");
                }

                running.store(false, Ordering::SeqCst);
                info!("input tap thread stopped");
            })
            .map_err(|e| InputError::ThreadSpawn(e.to_string()))?;

        Ok(())
    }

    fn stop(&self) {
        // The run loop exits on its next interval
        self.running.store(false, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Turn a captured event into an input event, if it is one we show
fn translate(raw: RawEvent) -> Option<InputEvent> {
    let modifiers = keys::modifier_bits(raw.flags);

    match raw.kind {
        CGEventType::KeyDown => Some(InputEvent::KeyPressed {
            key: keys::key_label(raw.keycode),
            modifiers,
        }),
        CGEventType::KeyUp => Some(InputEvent::KeyReleased {
            key: keys::key_label(raw.keycode),
            modifiers,
        }),
        CGEventType::FlagsChanged => {
            let (label, flag) = keys::modifier_key(raw.keycode)?;
            let key = label.to_string();
            if raw.flags.contains(flag) {
                Some(InputEvent::KeyPressed { key, modifiers })
            } else {
                Some(InputEvent::KeyReleased { key, modifiers })
            }
        }
        CGEventType::LeftMouseDown => Some(InputEvent::MousePressed { button: 1 }),
        CGEventType::LeftMouseUp => Some(InputEvent::MouseReleased { button: 1 }),
        CGEventType::RightMouseDown => Some(InputEvent::MousePressed { button: 3 }),
        CGEventType::RightMouseUp => Some(InputEvent::MouseReleased { button: 3 }),
        CGEventType::OtherMouseDown => {
            x11_button(raw.button).map(|button| InputEvent::MousePressed { button })
        }
        CGEventType::OtherMouseUp => {
            x11_button(raw.button).map(|button| InputEvent::MouseReleased { button })
        }
        _ => None,
    }
}

/// CG numbers buttons 0 left, 1 right, 2 middle, then extras
fn x11_button(cg_button: i64) -> Option<u16> {
    match cg_button {
        0 => Some(1),
        1 => Some(3),
        2 => Some(2),
        n => u16::try_from(n + 1).ok(),
    }
}

/// Run the CFRunLoop with the event tap
fn run_event_loop(
    event_tx: mpsc::Sender<InputEvent>,
    running: Arc<AtomicBool>,
) -> Result<(), InputError> {
    let (callback_tx, callback_rx) = std::sync::mpsc::channel::<RawEvent>();

    // CGEventTap callback - must be fast and non-blocking
    let callback = move |_proxy: core_graphics::event::CGEventTapProxy,
                         event_type: CGEventType,
                         event: &CGEvent|
                         -> Option<CGEvent> {
        match event_type {
            CGEventType::TapDisabledByTimeout | CGEventType::TapDisabledByUserInput => {
                warn!("event tap disabled, events may be missed");
            }
            kind => {
                let _ = callback_tx.send(RawEvent {
                    kind,
                    keycode: event.get_integer_value_field(EventField::KEYBOARD_EVENT_KEYCODE),
                    button: event.get_integer_value_field(EventField::MOUSE_EVENT_BUTTON_NUMBER),
                    flags: event.get_flags(),
                });
            }
        }
        Some(event.clone())
    };

    let tap = CGEventTap::new(
        CGEventTapLocation::Session,
        CGEventTapPlacement::HeadInsertEventTap,
        CGEventTapOptions::ListenOnly,
        vec![
            CGEventType::KeyDown,
            CGEventType::KeyUp,
            CGEventType::FlagsChanged,
            CGEventType::LeftMouseDown,
            CGEventType::LeftMouseUp,
            CGEventType::RightMouseDown,
            CGEventType::RightMouseUp,
            CGEventType::OtherMouseDown,
            CGEventType::OtherMouseUp,
        ],
        callback,
    )
    .map_err(|_| {
        error!("failed to create event tap - is Accessibility permission granted?");
        InputError::EventTapCreation
    })?;

    tap.enable();

    let run_loop_source = tap
        .mach_port
        .create_runloop_source(0)
        .map_err(|_| InputError::EventTapCreation)?;
    let run_loop = CFRunLoop::get_current();

    unsafe {
        run_loop.add_source(&run_loop_source, kCFRunLoopCommonModes);
    }

    info!("event tap created and enabled");

    while running.load(Ordering::SeqCst) {
        unsafe {
            CFRunLoop::run_in_mode(
                kCFRunLoopDefaultMode,
                std::time::Duration::from_millis(100),
                true,
            );
        }

        while let Ok(raw) = callback_rx.try_recv() {
            let Some(event) = translate(raw) else {
                continue;
            };

            debug!(?event, "input event");
            if event_tx.blocking_send(event).is_err() {
                warn!("failed to send input event - channel closed?");
                return Ok(());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: CGEventType, keycode: i64, flags: CGEventFlags) -> RawEvent {
        RawEvent {
            kind,
            keycode,
            button: 0,
            flags,
        }
    }

    #[test]
    fn test_listener_creation() {
        let (tx, _rx) = mpsc::channel(32);
        let listener = TapListener::new(tx);
        assert!(!listener.is_running());
    }

    #[test]
    fn test_translate_flags_changed() {
        let ctrl = CGEventFlags::CGEventFlagControl;
        let down = translate(raw(CGEventType::FlagsChanged, 0x3B, ctrl));
        assert_eq!(
            down,
            Some(InputEvent::KeyPressed {
                key: "ctrl".into(),
                modifiers: crate::switch::mask::CTRL
            })
        );

        let up = translate(raw(CGEventType::FlagsChanged, 0x3B, CGEventFlags::CGEventFlagNull));
        assert!(matches!(up, Some(InputEvent::KeyReleased { modifiers: 0, .. })));
    }

    #[test]
    fn test_translate_middle_button() {
        let mut event = raw(CGEventType::OtherMouseDown, 0, CGEventFlags::CGEventFlagNull);
        event.button = 2;
        assert_eq!(translate(event), Some(InputEvent::MousePressed { button: 2 }));
    }
}
