use std::error::Error;
use std::fs;
use std::time::{Duration, Instant};

use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use ocho::constants::TIMER_RATE;
use ocho::{Chip8, Config, RunState};
use ocho_display::{Display, DisplayOptions};

use crate::keymap::keymap;
use crate::Args;

pub fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let rom = fs::read(&args.rom)?;

    let config = Config {
        cycles_per_tick: args.cycles,
        ..Config::default()
    };
    let mut chip8 = Chip8::new(config);
    // An oversized ROM is reported before any window goes up
    chip8.load_rom(&rom)?;

    let sdl = sdl2::init()?;
    let mut display = Display::new(
        &sdl,
        config.width,
        config.height,
        DisplayOptions {
            scale: args.scale,
            outline: args.outline,
            ..DisplayOptions::default()
        },
    )?;
    let mut events = sdl.event_pump()?;

    let frame_time = Duration::from_secs(1) / TIMER_RATE;
    let mut last_frame = Instant::now();

    while chip8.run_state() != RunState::Quit {
        // Input first so the keypad is current for this frame's steps
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => chip8.quit(),
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match key {
                    Keycode::Escape => chip8.quit(),
                    Keycode::Space => chip8.toggle_pause(),
                    _ => {
                        if let Some(pad) = keymap(key) {
                            chip8.key_press(pad);
                        }
                    }
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(pad) = keymap(key) {
                        chip8.key_release(pad);
                    }
                }
                _ => {}
            }
        }

        for _ in 0..config.cycles_per_tick {
            if let Err(fault) = chip8.step() {
                // The interpreter has already shut itself down
                return Err(fault.into());
            }
        }
        chip8.tick();

        if let Some(frame) = chip8.frame() {
            display.render(frame)?;
        }

        // Hold the loop at the 60Hz timer cadence
        let elapsed = last_frame.elapsed();
        if frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
        last_frame = Instant::now();
    }

    info!("interpreter shut down cleanly");
    Ok(())
}
