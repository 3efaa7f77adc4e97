//! # Probabilistic Life
//!
//! Terminal front ends for the probabilistic Game of Life engine.
//!
//! ## Modes
//!
//! * `tui` (default): interactive board with a statistics panel
//! * `run`: plain-text animation of a single trial
//! * `batch`: many parallel trials with survival statistics

mod cli;
mod tui;

use std::{io::Write, ops::ControlFlow, thread, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use probabilistic_life::{run_trial, run_trials, Engine, TrialConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use cli::{Cli, Command};

const SEPARATOR: &str = "________________________________________";

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let seed = cli.board.seed.unwrap_or_else(rand::random);
    info!("using seed {seed}");
    let (width, height) = (cli.board.width, cli.board.height);

    match cli.command.unwrap_or_default() {
        Command::Tui { tick_ms } => tui::run(
            width,
            height,
            ChaCha12Rng::seed_from_u64(seed),
            Duration::from_millis(tick_ms),
        ),
        Command::Run {
            max_iterations,
            frame_delay_ms,
        } => animate(width, height, seed, max_iterations, frame_delay_ms),
        Command::Batch {
            trials,
            max_iterations,
            quiet,
        } => batch(
            &TrialConfig {
                width,
                height,
                trials,
                max_iterations,
                seed,
            },
            quiet,
        ),
    }
}

/// Prints one trial frame by frame, pausing between frames.
fn animate(width: usize, height: usize, seed: u64, max_iterations: u64, delay_ms: u64) -> Result<()> {
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    let mut engine = Engine::new(width, height, &mut rng).context("failed to create board")?;
    let delay = Duration::from_millis(delay_ms);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut write_error = None;
    let outcome = run_trial(&mut engine, &mut rng, max_iterations, |engine, _| {
        match write!(out, "\n{SEPARATOR}\n{engine}").and_then(|()| out.flush()) {
            Ok(()) => {
                thread::sleep(delay);
                ControlFlow::Continue(())
            }
            Err(e) => {
                write_error = Some(e);
                ControlFlow::Break(())
            }
        }
    });
    if let Some(e) = write_error {
        return Err(e).context("failed to write frame");
    }

    match outcome.extinct_after {
        Some(steps) => writeln!(out, "\nextinct after {steps} steps")?,
        None => writeln!(out, "\nstill alive after {} steps", outcome.steps)?,
    }
    Ok(())
}

/// Runs a batch of trials and prints each trial's last living board plus a summary.
fn batch(config: &TrialConfig, quiet: bool) -> Result<()> {
    let summary = run_trials(config).context("failed to run trials")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if !quiet {
        for outcome in &summary.outcomes {
            writeln!(out, "{}\n{SEPARATOR}\n", outcome.last_living.as_deref().unwrap_or(""))?;
        }
    }

    writeln!(out, "trials: {}", summary.trials())?;
    writeln!(out, "extinct: {}", summary.extinct())?;
    writeln!(out, "survived {} steps: {}", config.max_iterations, summary.survivors())?;
    match summary.mean_extinction {
        Some(mean) => writeln!(out, "mean steps until extinction: {mean:.1}")?,
        None => writeln!(out, "mean steps until extinction: n/a")?,
    }
    Ok(())
}
