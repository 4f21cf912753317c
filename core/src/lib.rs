pub use chip8::Chip8;
pub use error::{Error, Result};
pub use instruction::Instruction;
pub use rng::SequenceRng;
pub use rom::read_rom;

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
mod rng;
mod rom;
pub mod state;
