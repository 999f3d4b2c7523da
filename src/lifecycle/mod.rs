//! Process lifecycle: the event pipeline and signal handling

mod pipeline;

use std::io;

use tokio::signal::unix::{signal, SignalKind};

pub use pipeline::run_pipeline;

/// Wait for SIGTERM or SIGINT and return the name of the one received
pub async fn wait_for_shutdown() -> io::Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let received = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };

    Ok(received)
}
