use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;

use keymap::Keypad;

mod audio;
mod keymap;
mod run;

/// Run a Chip-8 ROM
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Path to the ROM to run
    rom: PathBuf,

    /// Window width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 320)]
    height: u32,

    /// WAV clip played while the sound timer runs
    #[arg(long, default_value = "media/audio.wav")]
    audio: PathBuf,

    /// Host key layout for the hex keypad
    #[arg(long, value_enum, default_value = "qwerty")]
    keypad: Keypad,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run::run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}
