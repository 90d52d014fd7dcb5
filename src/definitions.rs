/// The terminal keys, laid out like the hex keypad rows in
/// [`chip::definitions::keyboard::LAYOUT`].
pub(crate) mod keymap {
    pub const KEYS: [[char; 4]; 4] = [
        ['1', '2', '3', '4'],
        ['q', 'w', 'e', 'r'],
        ['a', 's', 'd', 'f'],
        ['z', 'x', 'c', 'v'],
    ];
}

pub(crate) mod field {
    /// Two terminal cells per pixel, so that the pixels come out roughly square
    pub const ACTIVE: &str = "██";
    pub const INACTIVE: &str = "  ";
    /// The cells taken up by the border around the board
    pub const BORDER: u16 = 2;
}

pub(crate) mod sound {
    /// The terminal bell
    pub const BELL: &[u8] = b"\x07";
}
