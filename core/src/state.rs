use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, KEY_COUNT, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT,
    STACK_DEPTH,
};
use crate::error::{Error, Result};

/// The FrameBuffer is indexed as [y][x]
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// The complete Chip-8 machine state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry, borrow, shifted-out bit and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, pointing at the next instruction to fetch
///
/// Stack
/// - (stack) 16 return addresses
/// - (sp) how many of them are in use, so 0 is empty and 16 is full
///
/// Timers
/// - 2 8-bit timers (delay & sound) decremented by `tick` while above 0
/// - the host plays a tone while the sound timer is above 0
///
/// ## Memory
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the fontset once loaded
///     - 0x200.. holds the program
/// - 64x32 frame buffer, drawn to by XOR-ing sprites onto it
///
/// ## Input
/// - 16 latches tracking the pressed status of keys 0..F
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_DEPTH],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keyboard: [bool; KEY_COUNT],
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
            delay_timer: 0,
            sound_timer: 0,
            memory: [0; MEMORY_SIZE],
            frame_buffer: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            keyboard: [false; KEY_COUNT],
        }
    }

    /// Reads the big-endian word at `address` and `address + 1`.
    pub fn read_word(&self, address: usize) -> Result<u16> {
        let bytes = self.slice(address, 2)?;
        Ok(u16::from(bytes[0]) << 8 | u16::from(bytes[1]))
    }

    /// Borrows `len` bytes of memory starting at `address`.
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8]> {
        self.memory
            .get(address..address + len)
            .ok_or_else(|| out_of_range(address))
    }

    /// Mutably borrows `len` bytes of memory starting at `address`.
    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8]> {
        self.memory
            .get_mut(address..address + len)
            .ok_or_else(|| out_of_range(address))
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Reports the first address of a range that falls outside of memory
fn out_of_range(address: usize) -> Error {
    Error::AddressOverflow {
        address: address.max(MEMORY_SIZE),
    }
}
