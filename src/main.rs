//! Runs a chip8 program inside of the terminal.
//!
//! `chip8 <rom>`, the keypad sits on `1234 / qwer / asdf / zxcv` and `Esc` quits.
mod adapters;
mod definitions;

use std::{env, io, path::PathBuf, process};

use anyhow::{bail, Context};
use chip::{chip8::ChipSet, resources::Rom, Runner};

use adapters::{DisplayAdapter, KeyboardAdapter, SoundAdapter, TerminalGuard};

fn rom_path() -> anyhow::Result<PathBuf> {
    let mut args = env::args_os().skip(1);
    match (args.next(), args.next()) {
        (Some(path), None) => Ok(PathBuf::from(path)),
        _ => bail!("usage: chip8 <rom>"),
    }
}

fn run() -> anyhow::Result<()> {
    let path = rom_path()?;
    let rom = Rom::from_file(&path)
        .with_context(|| format!("unable to load {}", path.display()))?;

    let chip = ChipSet::new(rom);
    log::info!("starting {}", chip.get_name());

    let _guard = TerminalGuard::enter().context("unable to set up the terminal")?;
    let display = DisplayAdapter::new(chip.get_name())?;
    let mut runner = Runner::new(
        chip,
        display,
        KeyboardAdapter::new(),
        SoundAdapter::new(io::stdout()),
    );

    runner.run().context("the emulation stopped")?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("chip8: {:#}", err);
        process::exit(1);
    }
}
