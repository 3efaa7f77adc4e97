//! Running counters for the interactive front end.

use crate::engine::StepReport;

/// Running statistics about a simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    /// Current generation number
    pub generation: u64,
    /// Total number of cells created since start
    pub cells_created: u64,
    /// Total number of cells destroyed since start
    pub cells_destroyed: u64,
    /// Current number of living cells
    pub current_population: u64,
}

impl Stats {
    /// Creates a new `Stats` instance at generation zero.
    ///
    /// # Arguments
    ///
    /// * `population` - Live cells on the starting board
    pub fn new(population: usize) -> Self {
        Stats {
            current_population: population as u64,
            ..Stats::default()
        }
    }

    /// Folds one step into the counters.
    pub fn record(&mut self, report: StepReport) {
        self.generation += 1;
        self.cells_created += report.births as u64;
        self.cells_destroyed += report.deaths as u64;
        self.current_population = report.population as u64;
    }

    /// Average births per generation.
    pub fn birth_rate(&self) -> f64 {
        self.cells_created as f64 / self.generation.max(1) as f64
    }

    /// Average deaths per generation.
    pub fn death_rate(&self) -> f64 {
        self.cells_destroyed as f64 / self.generation.max(1) as f64
    }
}
