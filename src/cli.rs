use clap::{Args, Parser, Subcommand};

/// Probabilistic Game of Life on a toroidal board.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub board: BoardArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Args)]
pub struct BoardArgs {
    /// Board width in cells
    #[arg(long, global = true, default_value_t = 40)]
    pub width: usize,

    /// Board height in cells
    #[arg(long, global = true, default_value_t = 15)]
    pub height: usize,

    /// Seed for the random generator (drawn from entropy when omitted)
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Command {
    /// Interactive terminal board (default)
    Tui {
        /// Milliseconds between generations while running
        #[arg(long, default_value_t = 100)]
        tick_ms: u64,
    },
    /// Print one trial frame by frame until extinction
    Run {
        /// Stop after this many steps
        #[arg(long, default_value_t = 1000)]
        max_iterations: u64,

        /// Pause between frames in milliseconds
        #[arg(long, default_value_t = 100)]
        frame_delay_ms: u64,
    },
    /// Run many trials and report how long boards survive
    Batch {
        /// Number of independent trials
        #[arg(long, default_value_t = 100)]
        trials: usize,

        /// Stop each trial after this many steps
        #[arg(long, default_value_t = 1000)]
        max_iterations: u64,

        /// Print only the summary, not each trial's last living board
        #[arg(long)]
        quiet: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Tui { tick_ms: 100 }
    }
}
