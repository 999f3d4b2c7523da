//! Switch board implementation
//!
//! Classifies input events into hardware switches and emits a
//! [`SwitchEvent`] for every switch whose visual state changes.

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use crate::events::SwitchEvent;
use crate::input::InputEvent;
use crate::switch::{HardwareSwitch, Modifier};

/// Visual state of a single switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchState {
    pub switch: HardwareSwitch,
    pub pressed: bool,
    /// Text of the most recent regular key, `None` for every other switch
    pub label: Option<String>,
}

impl SwitchState {
    fn new(switch: HardwareSwitch) -> Self {
        Self {
            switch,
            pressed: false,
            label: None,
        }
    }
}

/// Owns the state table and must only be driven from one task
pub struct SwitchBoard {
    /// Indexed by [`HardwareSwitch::index`]
    states: [SwitchState; 8],
    /// Channel for emitting switch events
    event_tx: broadcast::Sender<SwitchEvent>,
}

impl SwitchBoard {
    /// Create a board with every switch released
    pub fn new(event_tx: broadcast::Sender<SwitchEvent>) -> Self {
        Self {
            states: HardwareSwitch::ALL.map(SwitchState::new),
            event_tx,
        }
    }

    /// Current state of `switch`
    pub fn state(&self, switch: HardwareSwitch) -> &SwitchState {
        &self.states[switch.index()]
    }

    /// All states, in [`HardwareSwitch::ALL`] order
    pub fn states(&self) -> &[SwitchState] {
        &self.states
    }

    /// Run the board, processing input events until the channel closes
    pub async fn run(&mut self, mut input_rx: mpsc::Receiver<InputEvent>) {
        info!("switch board started");

        while let Some(event) = input_rx.recv().await {
            self.handle_input(event);
            // let subscribers drain before the next burst
            tokio::task::yield_now().await;
        }

        info!("switch board stopped");
    }

    /// Apply one input event
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyPressed { key, modifiers } => self.handle_key(key, modifiers, true),
            InputEvent::KeyReleased { key, modifiers } => self.handle_key(key, modifiers, false),
            InputEvent::MousePressed { button } => self.handle_mouse(button, true),
            InputEvent::MouseReleased { button } => self.handle_mouse(button, false),
        }
    }

    fn handle_key(&mut self, key: String, modifiers: u32, down: bool) {
        for modifier in Modifier::ALL {
            self.set(modifier.switch(), modifier.is_pressed(modifiers), None);
        }

        // Platforms differ on whether the flags of a modifier's own event
        // include its bit, so the key itself has the last word.
        if let Some(modifier) = HardwareSwitch::from_name(&key).modifier() {
            self.set(modifier.switch(), down, None);
            return;
        }

        let regular = HardwareSwitch::KeyRegular;
        if down {
            self.set(regular, true, Some(key));
        } else if self.state(regular).label.as_deref() == Some(key.as_str()) {
            // Releasing an older key must not release the one now shown
            self.set(regular, false, Some(key));
        }
    }

    fn handle_mouse(&mut self, button: u16, down: bool) {
        let switch = HardwareSwitch::from_mouse_button(button);
        if !switch.is_mouse() {
            debug!(button, "ignoring unmapped mouse button");
            return;
        }

        self.set(switch, down, None);

        let chord = self.state(HardwareSwitch::MouseLeft).pressed
            && self.state(HardwareSwitch::MouseRight).pressed;
        self.set(HardwareSwitch::MouseLr, chord, None);
    }

    /// Update one switch, emitting an event only when something changed
    fn set(&mut self, switch: HardwareSwitch, pressed: bool, label: Option<String>) {
        let state = &mut self.states[switch.index()];
        if state.pressed == pressed && state.label == label {
            return;
        }

        state.pressed = pressed;
        state.label = label.clone();

        let event = if pressed {
            SwitchEvent::Pressed { switch, label }
        } else {
            SwitchEvent::Released { switch, label }
        };

        debug!(%event, "switch changed");
        let _ = self.event_tx.send(event);
    }
}
