/// # Opcodes
///
/// Instruction words are 16 bits, stored big-endian in memory. Which instruction a word
/// encodes is decided by its class plus, for some classes, a sub-selector:
/// - `[c___]` the class; applies to all words
/// - `[___n]` selects within classes 5, 8 and 9
/// - `[__kk]` selects within classes E and F
/// - `[_nnn]` selects within class 0 (CLS and RET)
///
/// The remaining nibbles carry operands.
/// - `[_nnn]` a 12-bit address
/// - `[__kk]` an 8-bit immediate
/// - `[_x__]` the register Vx, or the range V0..=Vx
/// - `[__y_]` the register Vy
/// - `[___n]` a 4-bit immediate (sprite height)
pub trait Opcode {
    /// Returns the word's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The most significant nibble.
    /// `[c___]`
    fn class(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> usize;

    /// `[__y_]`
    fn y(&self) -> usize;

    /// `[___n]`
    fn n(&self) -> u8;

    /// The least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The word without its class nibble.
    /// `[_nnn]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.class(), self.x() as u8, self.y() as u8, self.n())
    }

    fn class(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> usize {
        ((self & 0x0F00) >> 8) as usize
    }

    fn y(&self) -> usize {
        ((self & 0x00F0) >> 4) as usize
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}
