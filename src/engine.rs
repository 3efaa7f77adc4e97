//! Double-buffered simulation engine.
//!
//! The engine owns two boards of identical size. One is authoritative, the
//! other is scratch space written during [`Engine::step`]; once every cell has
//! been computed the roles flip. Reads during a step therefore only ever see
//! the pre-step board.

use std::fmt;

use log::debug;
use rand::Rng;

use crate::error::Result;
use crate::grid::Grid;
use crate::rules::{self, SEARCH_RADIUS, SEED_DENSITY_DIVISOR};

/// Cell changes produced by one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Cells dead before the step and alive after it.
    pub births: usize,
    /// Cells alive before the step and dead after it.
    pub deaths: usize,
    /// Live cells after the step.
    pub population: usize,
}

/// A probabilistic Life board advanced in discrete steps.
#[derive(Debug, Clone)]
pub struct Engine {
    buffers: [Grid; 2],
    current: usize,
    generation: u64,
}

impl Engine {
    /// Creates an engine with a randomly seeded board.
    ///
    /// Makes `width * height / 4` placements at independently drawn
    /// coordinates. Coordinates may repeat, so the initial density is
    /// approximately, not exactly, 25%.
    ///
    /// # Arguments
    ///
    /// * `width` - Number of columns
    /// * `height` - Number of rows
    /// * `rng` - Source of the placement coordinates
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::InvalidDimensions`](crate::LifeError) if either
    /// dimension is zero or the board is too large to allocate.
    pub fn new<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        let mut grid = Grid::new(width, height)?;
        // the grid has already checked this product
        let placements = grid.width() * grid.height() / SEED_DENSITY_DIVISOR;
        for _ in 0..placements {
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);
            grid.set(x as i64, y as i64, true);
        }
        debug!(
            "seeded {}x{} board: {} placements, {} alive",
            width,
            height,
            placements,
            grid.population()
        );
        Ok(Self::from_grid(grid))
    }

    /// Wraps an explicit initial board.
    pub fn from_grid(grid: Grid) -> Self {
        let mut scratch = grid.clone();
        scratch.clear();
        Self {
            buffers: [grid, scratch],
            current: 0,
            generation: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.current().width()
    }

    pub fn height(&self) -> usize {
        self.current().height()
    }

    /// Number of completed steps.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The authoritative board.
    pub fn current(&self) -> &Grid {
        &self.buffers[self.current]
    }

    /// Sum of the influence of every live cell within the search radius of
    /// `(x, y)`, excluding the cell itself.
    ///
    /// On boards narrower than the neighbourhood the same cell can be visited
    /// more than once through the wraparound; each visit counts.
    pub fn influence_sum(&self, x: i64, y: i64) -> f64 {
        neighbourhood_influence(self.current(), x, y)
    }

    /// Advances the board by one step.
    ///
    /// Draws exactly one uniform value per cell, rows top to bottom and
    /// columns left to right, so a fixed generator sequence produces a fixed
    /// board.
    ///
    /// # Returns
    ///
    /// Births, deaths and the population of the new board.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> StepReport {
        let mut report = StepReport::default();
        let (first, second) = self.buffers.split_at_mut(1);
        let (read, write) = if self.current == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        };

        for y in 0..read.height() as i64 {
            for x in 0..read.width() as i64 {
                let alive = read.is_alive(x, y);
                let sum = neighbourhood_influence(read, x, y);
                let next = rules::next_state(alive, sum, rng.gen::<f64>());
                write.set(x, y, next);

                match (alive, next) {
                    (false, true) => report.births += 1,
                    (true, false) => report.deaths += 1,
                    _ => {}
                }
                if next {
                    report.population += 1;
                }
            }
        }

        self.current = 1 - self.current;
        self.generation += 1;
        if report.population == 0 && report.deaths > 0 {
            debug!("board went extinct at generation {}", self.generation);
        }
        report
    }

    /// Renders the authoritative board: `*` alive, space dead, one
    /// newline-terminated line per row.
    pub fn render(&self) -> String {
        self.current().to_string()
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.current(), f)
    }
}

fn neighbourhood_influence(grid: &Grid, x: i64, y: i64) -> f64 {
    let mut sum = 0.0;
    for dy in -SEARCH_RADIUS..=SEARCH_RADIUS {
        for dx in -SEARCH_RADIUS..=SEARCH_RADIUS {
            if (dx != 0 || dy != 0) && grid.is_alive(x + dx, y + dy) {
                sum += rules::influence(dx, dy);
            }
        }
    }
    sum
}
