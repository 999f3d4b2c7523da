//! Canonical hardware switches and modifier bitmasks
//!
//! The set of switches is fixed: three keyboard modifiers, one bucket for
//! every other key, and four mouse states (including the left+right chord).

use serde::{Deserialize, Serialize};

/// Modifier bit positions used in the `modifiers` field of keyboard events
pub mod mask {
    /// Shift key modifier bit
    pub const SHIFT: u32 = 0x1;
    /// Control key modifier bit
    pub const CTRL: u32 = 0x2;
    /// Meta/Command key modifier bit (no switch of its own)
    pub const META: u32 = 0x4;
    /// Alt/Option key modifier bit
    pub const ALT: u32 = 0x8;
}

/// A canonical key or mouse button category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareSwitch {
    KeyAlt,
    KeyCtrl,
    KeyShift,
    /// Any key that is not a modifier
    KeyRegular,
    MouseLeft,
    MouseWheel,
    MouseRight,
    /// Left and right buttons held together
    MouseLr,
}

/// The three switches whose pressed state comes from a modifier bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Alt,
    Ctrl,
    Shift,
}

/// Errors raised when a switch is used outside its contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SwitchError {
    #[error("switch `{0}` is not a keyboard modifier")]
    NotAModifier(HardwareSwitch),
}

impl HardwareSwitch {
    /// Every switch, in lookup order
    pub const ALL: [HardwareSwitch; 8] = [
        HardwareSwitch::KeyAlt,
        HardwareSwitch::KeyCtrl,
        HardwareSwitch::KeyShift,
        HardwareSwitch::KeyRegular,
        HardwareSwitch::MouseLeft,
        HardwareSwitch::MouseWheel,
        HardwareSwitch::MouseRight,
        HardwareSwitch::MouseLr,
    ];

    /// Switch returned for names that match nothing
    pub const DEFAULT: HardwareSwitch = HardwareSwitch::KeyRegular;

    /// The display name, used verbatim for labels and lookups
    pub fn name(self) -> &'static str {
        match self {
            HardwareSwitch::KeyAlt => "alt",
            HardwareSwitch::KeyCtrl => "ctrl",
            HardwareSwitch::KeyShift => "shift",
            HardwareSwitch::KeyRegular => "regular",
            HardwareSwitch::MouseLeft => "button 1",
            HardwareSwitch::MouseWheel => "button 2",
            HardwareSwitch::MouseRight => "button 3",
            HardwareSwitch::MouseLr => "button 1-3",
        }
    }

    /// Look up a switch by name, ignoring case
    ///
    /// Unknown names resolve to [`HardwareSwitch::DEFAULT`] so that any key
    /// can still be shown generically.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|switch| switch.name().eq_ignore_ascii_case(name))
            .unwrap_or(Self::DEFAULT)
    }

    /// Look up a mouse switch from an X11-numbered button code
    /// (1 = left, 2 = middle/wheel, 3 = right)
    pub fn from_mouse_button(button: u16) -> Self {
        Self::from_name(&format!("button {button}"))
    }

    /// Position of this switch in [`HardwareSwitch::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The typed modifier for this switch, if it is one
    pub fn modifier(self) -> Option<Modifier> {
        match self {
            HardwareSwitch::KeyAlt => Some(Modifier::Alt),
            HardwareSwitch::KeyCtrl => Some(Modifier::Ctrl),
            HardwareSwitch::KeyShift => Some(Modifier::Shift),
            _ => None,
        }
    }

    /// Check if this switch is a keyboard modifier
    pub fn is_modifier(self) -> bool {
        self.modifier().is_some()
    }

    /// Check if this switch is a mouse button state
    pub fn is_mouse(self) -> bool {
        matches!(
            self,
            HardwareSwitch::MouseLeft
                | HardwareSwitch::MouseWheel
                | HardwareSwitch::MouseRight
                | HardwareSwitch::MouseLr
        )
    }

    /// Check if this modifier's bit is set in `modifiers`
    ///
    /// Only modifiers carry a mask; asking a mouse button or the regular key
    /// bucket is a caller bug and reported as [`SwitchError::NotAModifier`].
    pub fn is_pressed(self, modifiers: u32) -> Result<bool, SwitchError> {
        self.modifier()
            .map(|modifier| modifier.is_pressed(modifiers))
            .ok_or(SwitchError::NotAModifier(self))
    }
}

impl Default for HardwareSwitch {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for HardwareSwitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Modifier {
    /// Every modifier, in switch order
    pub const ALL: [Modifier; 3] = [Modifier::Alt, Modifier::Ctrl, Modifier::Shift];

    /// The modifier bit tested against platform flags
    pub fn mask(self) -> u32 {
        match self {
            Modifier::Alt => mask::ALT,
            Modifier::Ctrl => mask::CTRL,
            Modifier::Shift => mask::SHIFT,
        }
    }

    /// Check if this modifier's bit is set, other bits are ignored
    pub fn is_pressed(self, modifiers: u32) -> bool {
        modifiers & self.mask() != 0
    }

    /// The switch this modifier is drawn as
    pub fn switch(self) -> HardwareSwitch {
        match self {
            Modifier::Alt => HardwareSwitch::KeyAlt,
            Modifier::Ctrl => HardwareSwitch::KeyCtrl,
            Modifier::Shift => HardwareSwitch::KeyShift,
        }
    }
}

impl From<Modifier> for HardwareSwitch {
    fn from(modifier: Modifier) -> Self {
        modifier.switch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_ignores_case() {
        assert_eq!(HardwareSwitch::from_name("CTRL"), HardwareSwitch::KeyCtrl);
        assert_eq!(HardwareSwitch::from_name("ctrl"), HardwareSwitch::KeyCtrl);
        assert_eq!(HardwareSwitch::from_name("Button 1-3"), HardwareSwitch::MouseLr);

        for switch in HardwareSwitch::ALL {
            let upper = switch.name().to_uppercase();
            assert_eq!(HardwareSwitch::from_name(&upper), switch);
        }
    }

    #[test]
    fn test_unknown_names_fall_back_to_regular() {
        for name in ["", "a", "F12", "ctrl ", "button", "button 4", "meta"] {
            assert_eq!(HardwareSwitch::from_name(name), HardwareSwitch::KeyRegular, "{name:?}");
        }
    }

    #[test]
    fn test_mouse_buttons() {
        assert_eq!(HardwareSwitch::from_mouse_button(1), HardwareSwitch::MouseLeft);
        assert_eq!(HardwareSwitch::from_mouse_button(2), HardwareSwitch::MouseWheel);
        assert_eq!(HardwareSwitch::from_mouse_button(3), HardwareSwitch::MouseRight);
        assert!(!HardwareSwitch::from_mouse_button(5).is_mouse());
    }

    #[test]
    fn test_modifier_variants() {
        let modifiers: Vec<_> = HardwareSwitch::ALL
            .into_iter()
            .filter(|switch| switch.is_modifier())
            .collect();
        assert_eq!(
            modifiers,
            vec![HardwareSwitch::KeyAlt, HardwareSwitch::KeyCtrl, HardwareSwitch::KeyShift]
        );

        for switch in HardwareSwitch::ALL {
            let plain = switch.is_mouse() || switch == HardwareSwitch::KeyRegular;
            assert_ne!(switch.is_modifier(), plain);
        }
    }

    #[test]
    fn test_ctrl_pressed() {
        let ctrl = HardwareSwitch::KeyCtrl;
        assert_eq!(ctrl.is_pressed(0x2), Ok(true));
        assert_eq!(ctrl.is_pressed(0x0), Ok(false));
        assert_eq!(ctrl.is_pressed(0x2 | 0x1), Ok(true));
        assert_eq!(ctrl.is_pressed(mask::SHIFT | mask::ALT), Ok(false));
    }

    #[test]
    fn test_is_pressed_rejects_non_modifiers() {
        for switch in HardwareSwitch::ALL.into_iter().filter(|s| !s.is_modifier()) {
            assert_eq!(switch.is_pressed(u32::MAX), Err(SwitchError::NotAModifier(switch)));
        }
    }

    #[test]
    fn test_modifier_round_trip() {
        for modifier in Modifier::ALL {
            assert_eq!(modifier.switch().modifier(), Some(modifier));
        }
    }

    #[test]
    fn test_index_matches_order() {
        for (i, switch) in HardwareSwitch::ALL.into_iter().enumerate() {
            assert_eq!(switch.index(), i);
        }
    }

    #[test]
    fn test_display_is_name() {
        assert_eq!(HardwareSwitch::MouseLr.to_string(), "button 1-3");
        assert_eq!(HardwareSwitch::KeyShift.to_string(), "shift");
    }
}
