//! Input source reading newline-delimited JSON events from stdin
//!
//! Used on platforms without a native tap, and for scripted demos:
//!
//! ```text
//! {"type":"key_pressed","key":"a","modifiers":2}
//! {"type":"mouse_pressed","button":1}
//! ```

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::listener::{InputError, InputEvent, InputSource};

/// Reads [`InputEvent`]s from stdin on a dedicated thread
pub struct StdinSource {
    event_tx: mpsc::Sender<InputEvent>,
    running: Arc<AtomicBool>,
}

impl StdinSource {
    pub fn new(event_tx: mpsc::Sender<InputEvent>) -> Self {
        Self {
            event_tx,
            running: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl InputSource for StdinSource {
    fn start(&self) -> Result<(), InputError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(InputError::AlreadyRunning);
        }

        let event_tx = self.event_tx.clone();
        let running = Arc::clone(&self.running);

        thread::Builder::new()
            .name("stdin-listener".to_string())
            .spawn(move || {
                info!("stdin listener thread started");

                let stdin = std::io::stdin();
                let forwarded = pump(stdin.lock(), &event_tx, &running);

                running.store(false, Ordering::SeqCst);
                info!(forwarded, "stdin listener thread stopped");
            })
            .map_err(|e| InputError::ThreadSpawn(e.to_string()))?;

        Ok(())
    }

    /// The thread notices on its next line; a blocked read is not interrupted
    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Forward events from `reader` until EOF, a stop request, or a closed
/// channel. Returns the number of events forwarded.
fn pump<R: BufRead>(reader: R, event_tx: &mpsc::Sender<InputEvent>, running: &AtomicBool) -> usize {
    let mut forwarded = 0;

    for (number, line) in reader.lines().enumerate() {
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!(?e, "failed to read stdin");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let event: InputEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                warn!(line = number + 1, %e, "skipping malformed input event");
                continue;
            }
        };

        debug!(?event, "input event");
        if event_tx.blocking_send(event).is_err() {
            warn!("failed to send input event - channel closed?");
            break;
        }
        forwarded += 1;
    }

    forwarded
}
