/// Everything that can go wrong while loading or running a program.
///
/// None of these leave the machine in a half-applied state: a failing `step`
/// has at most advanced the pc past the instruction that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Instruction {opcode:#06X} does not exist")]
    UnknownInstruction { opcode: u16 },

    #[error("Keyboard key {key:#04X} not found")]
    InvalidKey { key: u8 },

    #[error("Stack overflow")]
    StackOverflow,

    #[error("Stack underflow")]
    StackUnderflow,

    #[error("Address {address:#06X} is out of range")]
    AddressOverflow { address: usize },

    #[error("Cannot open file")]
    FileOpenFailed,

    #[error("Invalid fontset of {len} bytes, expected 80")]
    InvalidFontset { len: usize },

    #[error("Initialization failed")]
    InitFailed,
}

pub type Result<T> = std::result::Result<T, Error>;
