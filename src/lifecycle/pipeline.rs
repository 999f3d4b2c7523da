//! Input → switch board → overlay

use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use crate::events::SwitchEvent;
use crate::input::InputEvent;
use crate::overlay::Overlay;
use crate::state::SwitchBoard;

/// Drive `board` from `input_rx` and present every switch event on `overlay`
///
/// The board is dropped once its input closes, which closes the event
/// channel; the overlay keeps presenting until that channel is empty.
/// `event_rx` must be subscribed to the board's sender. Returns the number
/// of frames presented.
pub async fn run_pipeline(
    mut board: SwitchBoard,
    input_rx: mpsc::Receiver<InputEvent>,
    mut event_rx: broadcast::Receiver<SwitchEvent>,
    overlay: &mut Overlay,
) -> usize {
    let classify = async move {
        board.run(input_rx).await;
    };

    let present = async {
        let mut presented = 0;
        loop {
            match event_rx.recv().await {
                Ok(event) => match overlay.apply(&event) {
                    Ok(()) => presented += 1,
                    Err(e) => error!(?e, %event, "failed to present frame"),
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "switch event receiver lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        presented
    };

    let ((), presented) = tokio::join!(classify, present);
    info!(presented, "event pipeline drained");
    presented
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::overlay::tests::{write_icons, Presented, Recorder};
    use crate::overlay::IconSet;
    use crate::raster::{Dimension, Rasterizer, RenderQuality};
    use crate::switch::HardwareSwitch;

    fn create_overlay(presented: &Presented) -> (tempfile::TempDir, Overlay) {
        let dir = tempfile::tempdir().unwrap();
        write_icons(dir.path());

        let mut rasterizer = Rasterizer::new(dir.path(), RenderQuality::HIGH);
        let icons = IconSet::load(&mut rasterizer, Dimension::new(16, 16), Dimension::new(8, 16))
            .unwrap();
        let overlay = Overlay::new(icons, Box::new(Recorder(Arc::clone(presented))));
        (dir, overlay)
    }

    #[test]
    fn test_every_event_is_presented_after_input_closes() {
        let presented = Presented::default();
        let (_dir, mut overlay) = create_overlay(&presented);

        let (input_tx, input_rx) = mpsc::channel(128);
        let (event_tx, event_rx) = broadcast::channel(64);
        let board = SwitchBoard::new(event_tx);

        // More events than the broadcast channel holds, all queued up front
        for _ in 0..50 {
            input_tx.try_send(InputEvent::MousePressed { button: 1 }).unwrap();
            input_tx.try_send(InputEvent::MouseReleased { button: 1 }).unwrap();
        }
        drop(input_tx);

        let count = tokio_test::block_on(run_pipeline(board, input_rx, event_rx, &mut overlay));

        assert_eq!(count, 100);
        let presented = presented.lock().unwrap();
        assert_eq!(presented.len(), 100);
        assert!(presented.iter().all(|(switch, _, _)| *switch == HardwareSwitch::MouseLeft));
        assert_eq!(presented[99].1, "/mouse/button-1-released.svg");
    }

    #[test]
    fn test_final_state_reaches_overlay() {
        let presented = Presented::default();
        let (_dir, mut overlay) = create_overlay(&presented);

        let (input_tx, input_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = broadcast::channel(8);
        let board = SwitchBoard::new(event_tx);

        input_tx
            .try_send(InputEvent::KeyPressed { key: "q".into(), modifiers: 0 })
            .unwrap();
        input_tx
            .try_send(InputEvent::KeyReleased { key: "q".into(), modifiers: 0 })
            .unwrap();
        drop(input_tx);

        let count = tokio_test::block_on(run_pipeline(board, input_rx, event_rx, &mut overlay));

        assert_eq!(count, 2);
        let presented = presented.lock().unwrap();
        assert_eq!(
            presented.last().unwrap(),
            &(
                HardwareSwitch::KeyRegular,
                "/key/regular-released.svg".to_string(),
                Some("q".to_string()),
            )
        );
    }
}
