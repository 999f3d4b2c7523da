//! kmcaster: key-cast daemon for screen recordings and presentations
//!
//! Startup:
//! - rasterizes every switch icon (a missing icon aborts startup)
//! - starts a listen-only input source (macOS event tap or stdin)
//! - classifies input into switch state changes
//! - hands the matching icon to the compositor for each change

use anyhow::{Context, Result};
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use kmcaster::config::{Config, InputKind};
use kmcaster::events::SwitchEvent;
use kmcaster::input::{InputEvent, InputSource, StdinSource};
use kmcaster::lifecycle::{run_pipeline, wait_for_shutdown};
use kmcaster::overlay::{Compositor, IconSet, LogCompositor, Overlay, SnapshotCompositor};
use kmcaster::raster::{Rasterizer, RenderQuality};
use kmcaster::state::SwitchBoard;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "kmcaster starting");

    // Load configuration
    let config = Config::load()?;
    config.ensure_dirs()?;
    info!(
        resources = %config.resource_dir.display(),
        input = ?config.input,
        "configuration loaded"
    );

    let mut rasterizer = Rasterizer::new(&config.resource_dir, RenderQuality::HIGH);
    if config.system_fonts {
        rasterizer = rasterizer.with_system_fonts();
    }

    let icons = IconSet::load(&mut rasterizer, config.key_size, config.mouse_size)
        .with_context(|| format!("failed to load icons from {}", rasterizer.root().display()))?;

    let compositor: Box<dyn Compositor + Send> = match &config.snapshot_dir {
        Some(dir) => Box::new(SnapshotCompositor::new(dir)),
        None => Box::new(LogCompositor),
    };
    let mut overlay = Overlay::new(icons, compositor);

    // Input source -> switch board
    let (input_tx, input_rx) = mpsc::channel(64);
    // Switch board -> overlay
    let (event_tx, event_rx) = broadcast::channel::<SwitchEvent>(64);

    let board = SwitchBoard::new(event_tx);

    let source = create_source(config.input, input_tx);
    match source.start() {
        Ok(()) => {
            info!("input source started");
        }
        Err(e) => {
            error!(?e, "failed to start input source");
            warn!("continuing without input - check Accessibility permissions");
        }
    }

    info!("daemon initialized, entering main loop");

    tokio::select! {
        presented = run_pipeline(board, input_rx, event_rx, &mut overlay) => {
            info!(presented, "input closed");
        }

        result = wait_for_shutdown() => {
            match result {
                Ok(signal) => info!(signal, "shutdown signal received"),
                Err(e) => error!(?e, "failed to register signal handlers"),
            }
        }
    }

    info!("shutting down...");
    source.stop();
    info!("kmcaster stopped");

    Ok(())
}

fn create_source(kind: InputKind, input_tx: mpsc::Sender<InputEvent>) -> Box<dyn InputSource> {
    match kind {
        #[cfg(target_os = "macos")]
        InputKind::Native => Box::new(kmcaster::input::TapListener::new(input_tx)),
        #[cfg(not(target_os = "macos"))]
        InputKind::Native => {
            warn!("no native input tap on this platform, reading events from stdin");
            Box::new(StdinSource::new(input_tx))
        }
        InputKind::Stdin => Box::new(StdinSource::new(input_tx)),
    }
}
