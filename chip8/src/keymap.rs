use sdl2::keyboard::{Keycode, Scancode};

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// `Qwerty` maps this original layout to the left 4 alphanumeric columns, by physical position
/// so that the pad stays in place on AZERTY or Dvorak keyboards.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
///
/// `Hex` maps every hex digit to the host key with the same label.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keypad {
    Qwerty,
    Hex,
}

impl Keypad {
    /// The Chip-8 key bound to a host key, if there is one
    ///
    /// # Arguments
    /// * `keycode` the symbol the host layout assigns to the key, used by `Hex`
    /// * `scancode` the physical key position, used by `Qwerty`
    pub fn key(self, keycode: Option<Keycode>, scancode: Option<Scancode>) -> Option<u8> {
        match self {
            Keypad::Qwerty => scancode.and_then(qwerty),
            Keypad::Hex => keycode.and_then(hex),
        }
    }
}

fn qwerty(key: Scancode) -> Option<u8> {
    match key {
        Scancode::X => Some(0x0),
        Scancode::Num1 => Some(0x1),
        Scancode::Num2 => Some(0x2),
        Scancode::Num3 => Some(0x3),
        Scancode::Q => Some(0x4),
        Scancode::W => Some(0x5),
        Scancode::E => Some(0x6),
        Scancode::A => Some(0x7),
        Scancode::S => Some(0x8),
        Scancode::D => Some(0x9),
        Scancode::Z => Some(0xA),
        Scancode::C => Some(0xB),
        Scancode::Num4 => Some(0xC),
        Scancode::R => Some(0xD),
        Scancode::F => Some(0xE),
        Scancode::V => Some(0xF),
        _ => None,
    }
}

fn hex(key: Keycode) -> Option<u8> {
    match key {
        Keycode::Num0 | Keycode::Kp0 => Some(0x0),
        Keycode::Num1 | Keycode::Kp1 => Some(0x1),
        Keycode::Num2 | Keycode::Kp2 => Some(0x2),
        Keycode::Num3 | Keycode::Kp3 => Some(0x3),
        Keycode::Num4 | Keycode::Kp4 => Some(0x4),
        Keycode::Num5 | Keycode::Kp5 => Some(0x5),
        Keycode::Num6 | Keycode::Kp6 => Some(0x6),
        Keycode::Num7 | Keycode::Kp7 => Some(0x7),
        Keycode::Num8 | Keycode::Kp8 => Some(0x8),
        Keycode::Num9 | Keycode::Kp9 => Some(0x9),
        Keycode::A => Some(0xA),
        Keycode::B => Some(0xB),
        Keycode::C => Some(0xC),
        Keycode::D => Some(0xD),
        Keycode::E => Some(0xE),
        Keycode::F => Some(0xF),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qwerty_key(scancode: Scancode) -> Option<u8> {
        Keypad::Qwerty.key(None, Some(scancode))
    }

    fn hex_key(keycode: Keycode) -> Option<u8> {
        Keypad::Hex.key(Some(keycode), None)
    }

    #[test]
    fn test_qwerty_layout() {
        assert_eq!(qwerty_key(Scancode::Num1), Some(0x1));
        assert_eq!(qwerty_key(Scancode::Num4), Some(0xC));
        assert_eq!(qwerty_key(Scancode::X), Some(0x0));
        assert_eq!(qwerty_key(Scancode::V), Some(0xF));
        assert_eq!(qwerty_key(Scancode::Num5), None);
    }

    #[test]
    fn test_qwerty_follows_position_not_symbol() {
        // an AZERTY keyboard reports A for the key in the Q position
        assert_eq!(Keypad::Qwerty.key(Some(Keycode::A), Some(Scancode::Q)), Some(0x4));
        assert_eq!(Keypad::Qwerty.key(Some(Keycode::Q), None), None);
    }

    #[test]
    fn test_hex_layout() {
        assert_eq!(hex_key(Keycode::Num0), Some(0x0));
        assert_eq!(hex_key(Keycode::Kp7), Some(0x7));
        assert_eq!(hex_key(Keycode::B), Some(0xB));
        assert_eq!(hex_key(Keycode::Q), None);
        assert_eq!(Keypad::Hex.key(None, Some(Scancode::B)), None);
    }

    #[test]
    fn test_every_key_is_reachable() {
        let scancodes = [
            Scancode::Num1, Scancode::Num2, Scancode::Num3, Scancode::Num4,
            Scancode::Q, Scancode::W, Scancode::E, Scancode::R,
            Scancode::A, Scancode::S, Scancode::D, Scancode::F,
            Scancode::Z, Scancode::X, Scancode::C, Scancode::V,
        ];
        let mut mapped: Vec<u8> = scancodes.iter().filter_map(|&k| qwerty_key(k)).collect();
        mapped.sort_unstable();
        assert_eq!(mapped, (0x0..=0xF).collect::<Vec<u8>>());

        let keycodes = [
            Keycode::Num0, Keycode::Num1, Keycode::Num2, Keycode::Num3,
            Keycode::Num4, Keycode::Num5, Keycode::Num6, Keycode::Num7,
            Keycode::Num8, Keycode::Num9, Keycode::A, Keycode::B,
            Keycode::C, Keycode::D, Keycode::E, Keycode::F,
        ];
        let mapped: Vec<u8> = keycodes.iter().filter_map(|&k| hex_key(k)).collect();
        assert_eq!(mapped, (0x0..=0xF).collect::<Vec<u8>>());
    }
}
