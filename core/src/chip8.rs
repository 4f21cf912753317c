use std::io::Read;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::constants::{FONTSET_SIZE, FONTSET_START, KEY_COUNT, MEMORY_SIZE, PROGRAM_START};
use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the random source used by `RND`
///
/// Supplies interfaces for:
/// - loading a fontset and a rom
/// - pressing and releasing keys
/// - advancing the CPU by one instruction
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
///
/// The machine does no I/O and never blocks. Whoever drives it decides how often to call
/// `step` and `tick`, and must not interleave them with `set_key` from another thread.
pub struct Chip8 {
    state: State,
    rng: Box<dyn RngCore + Send>,
}

impl Chip8 {
    /// A zeroed machine seeded once from the OS random source
    ///
    /// # Panics
    /// If the OS random source is unavailable. Use `with_seed` where that can't be allowed.
    pub fn new() -> Self {
        Chip8::with_rng(Box::new(StdRng::from_os_rng()))
    }

    /// A zeroed machine whose `RND` bytes are fixed by `seed`; never fails
    pub fn with_seed(seed: u64) -> Self {
        Chip8::with_rng(Box::new(StdRng::seed_from_u64(seed)))
    }

    /// A zeroed machine drawing `RND` bytes from `rng`
    pub fn with_rng(rng: Box<dyn RngCore + Send>) -> Self {
        Chip8 {
            state: State::new(),
            rng,
        }
    }

    /// Copy the 16 hex digit glyphs into low memory
    ///
    /// # Arguments
    /// * `fontset` exactly 80 bytes, 5 per digit
    pub fn load_fontset(&mut self, fontset: &[u8]) -> Result<()> {
        if fontset.len() != FONTSET_SIZE {
            return Err(Error::InvalidFontset { len: fontset.len() });
        }
        self.state
            .slice_mut(usize::from(FONTSET_START), FONTSET_SIZE)?
            .copy_from_slice(fontset);
        debug!("loaded fontset at {:#05X}", FONTSET_START);
        Ok(())
    }

    /// Copy a program image into memory at 0x200
    ///
    /// An image that would reach the last byte of memory is refused.
    ///
    /// # Arguments
    /// * `program` the raw bytes of a ROM
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        let start = usize::from(PROGRAM_START);
        if program.len() >= MEMORY_SIZE - start {
            return Err(Error::AddressOverflow {
                address: start + program.len(),
            });
        }
        self.state
            .slice_mut(start, program.len())?
            .copy_from_slice(program);
        debug!("loaded {} byte program at {:#05X}", program.len(), start);
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut program = Vec::new();
        reader
            .read_to_end(&mut program)
            .map_err(|_| Error::FileOpenFailed)?;
        self.load_program(&program)
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex digit of the key, 0x0..=0xF
    /// * `pressed` whether the key is now held down
    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<()> {
        if usize::from(key) >= KEY_COUNT {
            return Err(Error::InvalidKey { key });
        }
        self.state.keyboard[usize::from(key)] = pressed;
        Ok(())
    }

    pub fn key_press(&mut self, key: u8) -> Result<()> {
        self.set_key(key, true)
    }

    pub fn key_release(&mut self, key: u8) -> Result<()> {
        self.set_key(key, false)
    }

    /// Advances the CPU by a single instruction
    /// - fetches the word at pc and moves pc past it
    /// - decodes and executes it
    ///
    /// On failure nothing but the pc has changed.
    pub fn step(&mut self) -> Result<()> {
        let pc = self.state.pc;
        let op = self.state.read_word(usize::from(pc))?;
        self.state.pc += 2;

        let instruction = Instruction::decode(op)?;
        trace!("{:04X}: {:04X} {}", pc, op, instruction);
        instruction.execute(&mut self.state, &mut *self.rng)
    }

    /// Decrements both timers towards 0; should be called at 60Hz
    pub fn tick(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Whether the host should currently be playing its tone
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// The current frame, whether or not it changed
    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if it changed since it was last taken
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn index(&self) -> u16 {
        self.state.i
    }

    pub fn sp(&self) -> u8 {
        self.state.sp
    }

    pub fn registers(&self) -> &[u8] {
        &self.state.v
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn memory(&self) -> &[u8] {
        &self.state.memory
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FONTSET;
    use crate::rng::SequenceRng;

    fn chip8_with_program(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::with_rng(Box::new(SequenceRng::new(&[0x5A])));
        chip8.load_program(program).unwrap();
        chip8
    }

    #[test]
    fn test_step_fetches_big_endian_and_advances_pc() {
        // LD V1, 0x22
        let mut chip8 = chip8_with_program(&[0x61, 0x22]);
        chip8.step().unwrap();
        assert_eq!(chip8.pc(), 0x202);
        assert_eq!(chip8.registers()[0x1], 0x22);
    }

    #[test]
    fn test_step_jumps_are_absolute() {
        let mut chip8 = chip8_with_program(&[0x13, 0x00]);
        chip8.step().unwrap();
        assert_eq!(chip8.pc(), 0x300);
    }

    #[test]
    fn test_unknown_instruction_only_moves_pc() {
        let mut chip8 = chip8_with_program(&[0x00, 0x00]);
        let before = chip8.state().clone();
        assert_eq!(
            chip8.step(),
            Err(Error::UnknownInstruction { opcode: 0x0000 })
        );
        let mut after = chip8.state().clone();
        assert_eq!(after.pc, 0x202);
        after.pc = before.pc;
        assert_eq!(after, before);
    }

    #[test]
    fn test_fetch_past_end_of_memory() {
        let mut chip8 = chip8_with_program(&[0x1F, 0xFF]);
        chip8.step().unwrap();
        assert_eq!(
            chip8.step(),
            Err(Error::AddressOverflow { address: 0x1000 })
        );
        assert_eq!(chip8.pc(), 0xFFF);
    }

    #[test]
    fn test_rnd_uses_injected_source() {
        // RND V3, 0x0F
        let mut chip8 = chip8_with_program(&[0xC3, 0x0F]);
        chip8.step().unwrap();
        assert_eq!(chip8.registers()[0x3], 0x0A);
    }

    #[test]
    fn test_seeded_machines_draw_the_same_bytes() {
        // RND V0, 0xFF; RND V1, 0xFF; RND V2, 0xFF
        let program = [0xC0, 0xFF, 0xC1, 0xFF, 0xC2, 0xFF];
        let mut a = Chip8::with_seed(0x5EED);
        let mut b = Chip8::with_seed(0x5EED);
        a.load_program(&program).unwrap();
        b.load_program(&program).unwrap();
        for _ in 0..3 {
            a.step().unwrap();
            b.step().unwrap();
        }
        assert_eq!(a.registers()[0..3], b.registers()[0..3]);
        assert_eq!(a.pc(), 0x206);
    }

    #[test]
    fn test_loads_fontset() {
        let mut chip8 = Chip8::new();
        chip8.load_fontset(&FONTSET).unwrap();
        assert_eq!(chip8.memory()[0x50..0xA0], FONTSET[..]);
    }

    #[test]
    fn test_rejects_wrong_sized_fontset() {
        let mut chip8 = Chip8::new();
        assert_eq!(
            chip8.load_fontset(&FONTSET[..79]),
            Err(Error::InvalidFontset { len: 79 })
        );
        assert_eq!(
            chip8.load_fontset(&[0; 81]),
            Err(Error::InvalidFontset { len: 81 })
        );
        assert!(chip8.memory().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_program_capacity() {
        let mut chip8 = Chip8::new();
        assert!(chip8.load_program(&[0xAA; 0xDFF]).is_ok());
        assert_eq!(chip8.memory()[0xFFE], 0xAA);
        assert_eq!(chip8.memory()[0xFFF], 0x00);
        assert_eq!(
            chip8.load_program(&[0xBB; 0xE00]),
            Err(Error::AddressOverflow { address: 0x1000 })
        );
    }

    #[test]
    fn test_load_rom_from_reader() {
        let mut chip8 = Chip8::new();
        let mut rom: &[u8] = &[0x00, 0xE0];
        chip8.load_rom(&mut rom).unwrap();
        assert_eq!(chip8.memory()[0x200..0x202], [0x00, 0xE0]);
    }

    #[test]
    fn test_set_key() {
        let mut chip8 = Chip8::new();
        chip8.key_press(0xF).unwrap();
        assert!(chip8.state().keyboard[0xF]);
        chip8.key_release(0xF).unwrap();
        assert!(!chip8.state().keyboard[0xF]);
        assert_eq!(chip8.set_key(0x10, true), Err(Error::InvalidKey { key: 0x10 }));
    }

    #[test]
    fn test_tick_floors_at_zero() {
        // LD V0, 3; LD DT, V0; LD ST, V0
        let mut chip8 = chip8_with_program(&[0x60, 0x03, 0xF0, 0x15, 0xF0, 0x18]);
        chip8.tick();
        assert_eq!(chip8.delay_timer(), 0);
        for _ in 0..3 {
            chip8.step().unwrap();
        }
        assert!(chip8.sound_active());
        for _ in 0..4 {
            chip8.tick();
        }
        assert_eq!(chip8.delay_timer(), 0);
        assert_eq!(chip8.sound_timer(), 0);
        assert!(!chip8.sound_active());
    }

    #[test]
    fn test_take_frame_only_after_draw() {
        let mut chip8 = chip8_with_program(&[0x00, 0xE0]);
        assert!(chip8.take_frame().is_none());
        chip8.step().unwrap();
        assert!(chip8.take_frame().is_some());
        assert!(chip8.take_frame().is_none());
    }
}
