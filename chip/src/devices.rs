//! The boundary between the interpreter and the host devices.
use std::io;

use crate::definitions::keyboard;

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will present the given pixels, one byte per pixel in row-major order.
    fn display(&mut self, pixels: &[u8]) -> io::Result<()>;
}

/// What the keyboard reported during a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// The current state of all the keys
    Keys([bool; keyboard::SIZE]),
    /// The user asked to stop the machine
    Quit,
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keyboard data
pub trait KeyboardCommands {
    fn poll(&mut self) -> io::Result<Input>;
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for the tone
pub trait SoundCommands {
    /// Turns the tone on or off.
    fn set_tone(&mut self, active: bool) -> io::Result<()>;
}

/// The internal keyboard representation
///
/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone)]
pub struct Keyboard {
    keys: [bool; keyboard::SIZE],
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    pub fn set_key(&mut self, key: usize, to: bool) {
        debug_assert!(key < keyboard::SIZE);
        if let Some(entry) = self.keys.get_mut(key) {
            *entry = to;
        } else {
            log::warn!("ignoring state of the unknown key {:#X}", key);
        }
    }

    pub fn set_mult(&mut self, keys: &[bool]) {
        assert!(keys.len() == self.keys.len());
        self.keys.copy_from_slice(keys);
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }

    /// Will check if the key with the given index is pressed, unknown keys are never pressed.
    pub fn is_pressed(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// The lowest index of all the currently pressed keys.
    pub fn first_pressed(&self) -> Option<usize> {
        self.keys.iter().position(|&pressed| pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_key() {
        let mut keys = Keyboard::new();
        assert_eq!(None, keys.first_pressed());

        keys.set_key(0xA, true);
        assert!(keys.is_pressed(0xA));
        assert!(!keys.is_pressed(0xB));
        assert_eq!(Some(0xA), keys.first_pressed());

        keys.set_key(0xA, false);
        assert!(!keys.is_pressed(0xA));
        assert_eq!(None, keys.first_pressed());
    }

    #[test]
    fn test_first_pressed_is_lowest() {
        let mut keys = Keyboard::new();
        let mut state = [false; keyboard::SIZE];
        state[0x3] = true;
        state[0xC] = true;
        state[0x7] = true;
        keys.set_mult(&state);

        assert_eq!(Some(0x3), keys.first_pressed());
        assert_eq!(&state[..], keys.get_keys());
    }

    #[test]
    fn test_unknown_key_is_never_pressed() {
        let keys = Keyboard::new();
        assert!(!keys.is_pressed(0xFF));
    }
}
