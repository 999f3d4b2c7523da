//! Switch events emitted by the switch board
//!
//! Each event carries the full visual state of one switch, so a consumer
//! never has to track earlier events to draw it.

use serde::{Deserialize, Serialize};

use crate::switch::HardwareSwitch;

/// Emitted whenever a switch's pressed state or label changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SwitchEvent {
    /// Switch went down (or a held regular key changed its label)
    Pressed {
        switch: HardwareSwitch,
        /// Text of the most recent regular key
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },

    /// Switch went up
    Released {
        switch: HardwareSwitch,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl SwitchEvent {
    pub fn switch(&self) -> HardwareSwitch {
        match self {
            SwitchEvent::Pressed { switch, .. } | SwitchEvent::Released { switch, .. } => *switch,
        }
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self, SwitchEvent::Pressed { .. })
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            SwitchEvent::Pressed { label, .. } | SwitchEvent::Released { label, .. } => {
                label.as_deref()
            }
        }
    }
}

impl std::fmt::Display for SwitchEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = if self.is_pressed() { "PRESSED" } else { "RELEASED" };
        match self.label() {
            Some(label) => write!(f, "{} {} ({})", action, self.switch(), label),
            None => write!(f, "{} {}", action, self.switch()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = SwitchEvent::Pressed {
            switch: HardwareSwitch::KeyRegular,
            label: Some("q".into()),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"pressed","switch":"key_regular","label":"q"}"#);
    }

    #[test]
    fn test_event_deserialization() {
        let json = r#"{"type":"released","switch":"mouse_lr"}"#;
        let event: SwitchEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.switch(), HardwareSwitch::MouseLr);
        assert!(!event.is_pressed());
        assert_eq!(event.label(), None);
    }

    #[test]
    fn test_event_display() {
        let event = SwitchEvent::Released {
            switch: HardwareSwitch::KeyCtrl,
            label: None,
        };
        assert_eq!(event.to_string(), "RELEASED ctrl");
    }
}
