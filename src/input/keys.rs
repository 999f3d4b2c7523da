//! macOS key codes and modifier flags
//!
//! Translates CGEventFlags into the modifier bits used by input events,
//! and CGKeyCode values (Carbon `kVK_*`) into key labels.

use core_graphics::event::CGEventFlags;

use crate::switch::mask;

/// Modifier flag masks from macOS CGEventFlags, paired with our bits
const FLAG_BITS: [(CGEventFlags, u32); 4] = [
    (CGEventFlags::CGEventFlagShift, mask::SHIFT),
    (CGEventFlags::CGEventFlagControl, mask::CTRL),
    (CGEventFlags::CGEventFlagCommand, mask::META),
    (CGEventFlags::CGEventFlagAlternate, mask::ALT),
];

/// Convert CGEventFlags into modifier bits
pub fn modifier_bits(flags: CGEventFlags) -> u32 {
    FLAG_BITS
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .fold(0, |bits, (_, bit)| bits | bit)
}

/// Label and flag of a modifier key, for FlagsChanged events
pub fn modifier_key(keycode: i64) -> Option<(&'static str, CGEventFlags)> {
    match keycode {
        0x38 | 0x3C => Some(("shift", CGEventFlags::CGEventFlagShift)),
        0x3B | 0x3E => Some(("ctrl", CGEventFlags::CGEventFlagControl)),
        0x3A | 0x3D => Some(("alt", CGEventFlags::CGEventFlagAlternate)),
        0x37 | 0x36 => Some(("meta", CGEventFlags::CGEventFlagCommand)),
        _ => None,
    }
}

/// Label shown for a non-modifier key
pub fn key_label(keycode: i64) -> String {
    let label = match keycode {
        0x00 => "A",
        0x01 => "S",
        0x02 => "D",
        0x03 => "F",
        0x04 => "H",
        0x05 => "G",
        0x06 => "Z",
        0x07 => "X",
        0x08 => "C",
        0x09 => "V",
        0x0B => "B",
        0x0C => "Q",
        0x0D => "W",
        0x0E => "E",
        0x0F => "R",
        0x10 => "Y",
        0x11 => "T",
        0x12 => "1",
        0x13 => "2",
        0x14 => "3",
        0x15 => "4",
        0x16 => "6",
        0x17 => "5",
        0x18 => "=",
        0x19 => "9",
        0x1A => "7",
        0x1B => "-",
        0x1C => "8",
        0x1D => "0",
        0x1E => "]",
        0x1F => "O",
        0x20 => "U",
        0x21 => "[",
        0x22 => "I",
        0x23 => "P",
        0x24 => "Enter",
        0x25 => "L",
        0x26 => "J",
        0x27 => "'",
        0x28 => "K",
        0x29 => ";",
        0x2A => "\\",
        0x2B => ",",
        0x2C => "/",
        0x2D => "N",
        0x2E => "M",
        0x2F => ".",
        0x30 => "Tab",
        0x31 => "Space",
        0x32 => "`",
        0x33 => "Backspace",
        0x35 => "Esc",
        0x39 => "Caps Lock",
        0x60 => "F5",
        0x61 => "F6",
        0x62 => "F7",
        0x63 => "F3",
        0x64 => "F8",
        0x65 => "F9",
        0x67 => "F11",
        0x6D => "F10",
        0x6F => "F12",
        0x73 => "Home",
        0x74 => "Page Up",
        0x75 => "Delete",
        0x76 => "F4",
        0x77 => "End",
        0x78 => "F2",
        0x79 => "Page Down",
        0x7A => "F1",
        0x7B => "Left",
        0x7C => "Right",
        0x7D => "Down",
        0x7E => "Up",
        _ => return format!("Key {keycode}"),
    };
    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_bits() {
        assert_eq!(modifier_bits(CGEventFlags::CGEventFlagNull), 0);

        let flags = CGEventFlags::CGEventFlagControl | CGEventFlags::CGEventFlagShift;
        assert_eq!(modifier_bits(flags), mask::CTRL | mask::SHIFT);
    }

    #[test]
    fn test_modifier_keys_resolve_to_switches() {
        use crate::switch::HardwareSwitch;

        for (keycode, switch) in [
            (0x38, HardwareSwitch::KeyShift),
            (0x3E, HardwareSwitch::KeyCtrl),
            (0x3A, HardwareSwitch::KeyAlt),
        ] {
            let (label, _) = modifier_key(keycode).unwrap();
            assert_eq!(HardwareSwitch::from_name(label), switch);
        }
    }

    #[test]
    fn test_key_labels() {
        assert_eq!(key_label(0x00), "A");
        assert_eq!(key_label(0x24), "Enter");
        assert_eq!(key_label(0x99), "Key 153");
    }
}
