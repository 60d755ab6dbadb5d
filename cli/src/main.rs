use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

mod keymap;
mod run;

/// A CHIP-8 virtual machine.
#[derive(Parser)]
#[command(name = "ocho", version, about)]
struct Args {
    /// ROM file to load
    rom: PathBuf,

    /// Size multiplier for each display pixel
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Instructions executed per 60Hz frame
    #[arg(long, default_value_t = ocho::constants::DEFAULT_CYCLES_PER_TICK)]
    cycles: u32,

    /// Draw an outline around lit pixels
    #[arg(long)]
    outline: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
