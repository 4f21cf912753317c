use std::time::{Duration, Instant};

use log::{error, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::constants::FONTSET;
use chip8_core::{read_rom, Chip8, Error, Result};
use chip8_display::Display;

use crate::audio::Speaker;
use crate::Args;

/// Time between two instructions (1kHz)
const STEP_INTERVAL: Duration = Duration::from_millis(1);
/// Time between two timer ticks, which is also the frame rate (60Hz)
const TICK_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Reports an SDL failure and replaces it with the engine's initialization error
fn init_failed(what: &str) -> impl Fn(String) -> Error + '_ {
    move |e| {
        error!("{} failed: {}", what, e);
        Error::InitFailed
    }
}

pub fn run(args: &Args) -> Result<()> {
    let mut chip8: Chip8 = Chip8::new();

    // Load fontset and ROM
    chip8.load_fontset(&FONTSET)?;
    let program = read_rom(&args.rom)?;
    chip8.load_program(&program)?;
    info!("loaded {} ({} bytes)", args.rom.display(), program.len());

    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init().map_err(init_failed("SDL"))?;
    let mut display: Display =
        Display::new(&sdl, args.width, args.height).map_err(init_failed("display"))?;
    let mut speaker = Speaker::new(&sdl, &args.audio).map_err(init_failed("audio"))?;
    let mut events = sdl.event_pump().map_err(init_failed("event pump"))?;

    // Set initial timing
    let mut next_step: Instant = Instant::now();
    let mut next_tick: Instant = next_step;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode,
                    scancode,
                    repeat: false,
                    ..
                } => {
                    if let Some(kc) = args.keypad.key(keycode, scancode) {
                        chip8.key_press(kc)?;
                    }
                }
                Event::KeyUp {
                    keycode, scancode, ..
                } => {
                    if let Some(kc) = args.keypad.key(keycode, scancode) {
                        chip8.key_release(kc)?;
                    }
                }
                _ => continue,
            };
        }

        // Update state
        let now = Instant::now();
        while next_step <= now {
            chip8.step()?;
            next_step += STEP_INTERVAL;
        }

        // Timers, sound and the frame all move at 60Hz
        if next_tick <= now {
            chip8.tick();
            speaker
                .update(chip8.sound_active())
                .map_err(init_failed("audio"))?;
            if let Some(frame) = chip8.take_frame() {
                display.render(frame).map_err(init_failed("render"))?;
            }
            next_tick += TICK_INTERVAL;
        }

        // Handle timing
        let wake = next_step.min(next_tick);
        std::thread::sleep(wake.saturating_duration_since(Instant::now()));
    }

    info!("quit");
    Ok(())
}
