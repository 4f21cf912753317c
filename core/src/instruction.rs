use std::fmt;

use rand::RngCore;

use crate::error::{Error, Result};
use crate::opcode::Opcode;
use crate::state::State;

/// A decoded instruction, named after its conventional assembler mnemonic.
///
/// Registers are stored as indices into V0..VF, addresses as 12-bit values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 1nnn
    Jp(u16),
    /// 2nnn
    Call(u16),
    /// 3xkk
    SeByte(usize, u8),
    /// 4xkk
    SneByte(usize, u8),
    /// 5xy0
    SeReg(usize, usize),
    /// 6xkk
    LdByte(usize, u8),
    /// 7xkk
    AddByte(usize, u8),
    /// 8xy0
    LdReg(usize, usize),
    /// 8xy1
    Or(usize, usize),
    /// 8xy2
    And(usize, usize),
    /// 8xy3
    Xor(usize, usize),
    /// 8xy4
    AddReg(usize, usize),
    /// 8xy5
    Sub(usize, usize),
    /// 8xy6, Vy is ignored
    Shr(usize),
    /// 8xy7
    Subn(usize, usize),
    /// 8xyE, Vy is ignored
    Shl(usize),
    /// 9xy0
    SneReg(usize, usize),
    /// Annn
    LdI(u16),
    /// Bnnn
    JpV0(u16),
    /// Cxkk
    Rnd(usize, u8),
    /// Dxyn
    Drw(usize, usize, u8),
    /// Ex9E
    Skp(usize),
    /// ExA1
    Sknp(usize),
    /// Fx07
    LdVxDt(usize),
    /// Fx0A
    LdVxK(usize),
    /// Fx15
    LdDtVx(usize),
    /// Fx18
    LdStVx(usize),
    /// Fx1E
    AddI(usize),
    /// Fx29
    LdF(usize),
    /// Fx33
    LdB(usize),
    /// Fx55
    LdIVx(usize),
    /// Fx65
    LdVxI(usize),
}

impl Instruction {
    /// Selects the Instruction encoded by an opcode.
    ///
    /// The class picks the family; classes 0, 5, 8, 9, E and F are further cased on their
    /// sub-selector. Anything left over is an `UnknownInstruction`.
    pub fn decode(op: u16) -> Result<Instruction> {
        let (x, y) = (op.x(), op.y());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Cls,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Ret,
            (0x1, ..) => Instruction::Jp(op.addr()),
            (0x2, ..) => Instruction::Call(op.addr()),
            (0x3, ..) => Instruction::SeByte(x, op.kk()),
            (0x4, ..) => Instruction::SneByte(x, op.kk()),
            (0x5, .., 0x0) => Instruction::SeReg(x, y),
            (0x6, ..) => Instruction::LdByte(x, op.kk()),
            (0x7, ..) => Instruction::AddByte(x, op.kk()),
            (0x8, .., 0x0) => Instruction::LdReg(x, y),
            (0x8, .., 0x1) => Instruction::Or(x, y),
            (0x8, .., 0x2) => Instruction::And(x, y),
            (0x8, .., 0x3) => Instruction::Xor(x, y),
            (0x8, .., 0x4) => Instruction::AddReg(x, y),
            (0x8, .., 0x5) => Instruction::Sub(x, y),
            (0x8, .., 0x6) => Instruction::Shr(x),
            (0x8, .., 0x7) => Instruction::Subn(x, y),
            (0x8, .., 0xE) => Instruction::Shl(x),
            (0x9, .., 0x0) => Instruction::SneReg(x, y),
            (0xA, ..) => Instruction::LdI(op.addr()),
            (0xB, ..) => Instruction::JpV0(op.addr()),
            (0xC, ..) => Instruction::Rnd(x, op.kk()),
            (0xD, ..) => Instruction::Drw(x, y, op.n()),
            (0xE, _, 0x9, 0xE) => Instruction::Skp(x),
            (0xE, _, 0xA, 0x1) => Instruction::Sknp(x),
            (0xF, _, 0x0, 0x7) => Instruction::LdVxDt(x),
            (0xF, _, 0x0, 0xA) => Instruction::LdVxK(x),
            (0xF, _, 0x1, 0x5) => Instruction::LdDtVx(x),
            (0xF, _, 0x1, 0x8) => Instruction::LdStVx(x),
            (0xF, _, 0x1, 0xE) => Instruction::AddI(x),
            (0xF, _, 0x2, 0x9) => Instruction::LdF(x),
            (0xF, _, 0x3, 0x3) => Instruction::LdB(x),
            (0xF, _, 0x5, 0x5) => Instruction::LdIVx(x),
            (0xF, _, 0x6, 0x5) => Instruction::LdVxI(x),
            _ => return Err(Error::UnknownInstruction { opcode: op }),
        };
        Ok(instruction)
    }

    /// Applies the instruction to `state`, drawing from `rng` only for `Rnd`.
    pub fn execute(self, state: &mut State, rng: &mut dyn RngCore) -> Result<()> {
        match self {
            Instruction::Cls => state.clr(),
            Instruction::Ret => state.rts(),
            Instruction::Jp(addr) => state.jump(addr),
            Instruction::Call(addr) => state.call(addr),
            Instruction::SeByte(x, kk) => state.ske(x, kk),
            Instruction::SneByte(x, kk) => state.skne(x, kk),
            Instruction::SeReg(x, y) => state.skre(x, y),
            Instruction::LdByte(x, kk) => state.load(x, kk),
            Instruction::AddByte(x, kk) => state.add(x, kk),
            Instruction::LdReg(x, y) => state.mv(x, y),
            Instruction::Or(x, y) => state.or(x, y),
            Instruction::And(x, y) => state.and(x, y),
            Instruction::Xor(x, y) => state.xor(x, y),
            Instruction::AddReg(x, y) => state.addr(x, y),
            Instruction::Sub(x, y) => state.sub(x, y),
            Instruction::Shr(x) => state.shr(x),
            Instruction::Subn(x, y) => state.subn(x, y),
            Instruction::Shl(x) => state.shl(x),
            Instruction::SneReg(x, y) => state.skrne(x, y),
            Instruction::LdI(addr) => state.loadi(addr),
            Instruction::JpV0(addr) => state.jumpi(addr),
            Instruction::Rnd(x, kk) => state.rand(x, kk, rng.next_u32() as u8),
            Instruction::Drw(x, y, n) => state.draw(x, y, n),
            Instruction::Skp(x) => state.skpr(x),
            Instruction::Sknp(x) => state.skup(x),
            Instruction::LdVxDt(x) => state.moved(x),
            Instruction::LdVxK(x) => state.keyd(x),
            Instruction::LdDtVx(x) => state.loads(x),
            Instruction::LdStVx(x) => state.ld(x),
            Instruction::AddI(x) => state.addi(x),
            Instruction::LdF(x) => state.ldspr(x),
            Instruction::LdB(x) => state.bcd(x),
            Instruction::LdIVx(x) => state.stor(x),
            Instruction::LdVxI(x) => state.read(x),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Instruction::Cls => write!(f, "CLS"),
            Instruction::Ret => write!(f, "RET"),
            Instruction::Jp(addr) => write!(f, "JP {:#05X}", addr),
            Instruction::Call(addr) => write!(f, "CALL {:#05X}", addr),
            Instruction::SeByte(x, kk) => write!(f, "SE V{:X}, {:#04X}", x, kk),
            Instruction::SneByte(x, kk) => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            Instruction::SeReg(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::LdByte(x, kk) => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Instruction::AddByte(x, kk) => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Instruction::LdReg(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::AddReg(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::Sub(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::Shr(x) => write!(f, "SHR V{:X}", x),
            Instruction::Subn(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::Shl(x) => write!(f, "SHL V{:X}", x),
            Instruction::SneReg(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            Instruction::LdI(addr) => write!(f, "LD I, {:#05X}", addr),
            Instruction::JpV0(addr) => write!(f, "JP V0, {:#05X}", addr),
            Instruction::Rnd(x, kk) => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Instruction::Drw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::Skp(x) => write!(f, "SKP V{:X}", x),
            Instruction::Sknp(x) => write!(f, "SKNP V{:X}", x),
            Instruction::LdVxDt(x) => write!(f, "LD V{:X}, DT", x),
            Instruction::LdVxK(x) => write!(f, "LD V{:X}, K", x),
            Instruction::LdDtVx(x) => write!(f, "LD DT, V{:X}", x),
            Instruction::LdStVx(x) => write!(f, "LD ST, V{:X}", x),
            Instruction::AddI(x) => write!(f, "ADD I, V{:X}", x),
            Instruction::LdF(x) => write!(f, "LD F, V{:X}", x),
            Instruction::LdB(x) => write!(f, "LD B, V{:X}", x),
            Instruction::LdIVx(x) => write!(f, "LD [I], V{:X}", x),
            Instruction::LdVxI(x) => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
