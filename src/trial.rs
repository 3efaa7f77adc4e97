//! Driving engines until extinction, singly or in parallel batches.

use std::ops::ControlFlow;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use rayon::prelude::*;

use crate::engine::{Engine, StepReport};
use crate::error::Result;

/// Multiplier used to spread per-trial seeds apart.
const TRIAL_SEED_PRIME: u64 = 0x9E37_79B9_7F4A_7C15;

/// Outcome of running one engine until extinction or the iteration limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialOutcome {
    /// Steps taken until the board was observed empty, `None` if it survived.
    pub extinct_after: Option<u64>,
    /// Steps actually executed.
    pub steps: u64,
    /// Rendering of the last board that still had live cells.
    pub last_living: Option<String>,
    /// The observer asked to stop before extinction or the limit.
    pub interrupted: bool,
}

/// Steps `engine` until it dies out or `max_iterations` steps have run.
///
/// # Arguments
///
/// * `engine` - Board to advance in place
/// * `rng` - Source of every step's draws
/// * `max_iterations` - Upper bound on the number of steps
/// * `observer` - Called after each step that leaves live cells behind;
///   returning [`ControlFlow::Break`] ends the trial after that step
///
/// # Returns
///
/// When the board died out, how many steps ran and its last living frame.
pub fn run_trial<R, F>(
    engine: &mut Engine,
    rng: &mut R,
    max_iterations: u64,
    mut observer: F,
) -> TrialOutcome
where
    R: Rng + ?Sized,
    F: FnMut(&Engine, &StepReport) -> ControlFlow<()>,
{
    let mut outcome = TrialOutcome {
        extinct_after: None,
        steps: 0,
        last_living: None,
        interrupted: false,
    };

    for _ in 0..max_iterations {
        let report = engine.step(rng);
        outcome.steps += 1;
        if report.population == 0 {
            outcome.extinct_after = Some(outcome.steps);
            break;
        }
        outcome.last_living = Some(engine.render());
        if observer(engine, &report).is_break() {
            outcome.interrupted = true;
            break;
        }
    }
    outcome
}

/// Parameters of a batch of independent trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialConfig {
    pub width: usize,
    pub height: usize,
    pub trials: usize,
    pub max_iterations: u64,
    /// Base seed; trial `i` uses a generator derived from it and `i`.
    pub seed: u64,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 15,
            trials: 100,
            max_iterations: 1000,
            seed: 0,
        }
    }
}

/// Aggregate results of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    /// Per-trial outcomes, in trial order.
    pub outcomes: Vec<TrialOutcome>,
    /// Mean steps until extinction over the trials that died out.
    pub mean_extinction: Option<f64>,
}

impl BatchSummary {
    fn from_outcomes(outcomes: Vec<TrialOutcome>) -> Self {
        let extinct: Vec<u64> = outcomes.iter().filter_map(|o| o.extinct_after).collect();
        let mean_extinction = if extinct.is_empty() {
            None
        } else {
            Some(extinct.iter().sum::<u64>() as f64 / extinct.len() as f64)
        };
        Self {
            outcomes,
            mean_extinction,
        }
    }

    pub fn trials(&self) -> usize {
        self.outcomes.len()
    }

    pub fn extinct(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.extinct_after.is_some())
            .count()
    }

    pub fn survivors(&self) -> usize {
        self.trials() - self.extinct()
    }
}

/// Deterministic generator for trial `index` of a batch seeded with `base_seed`.
pub fn trial_rng(base_seed: u64, index: usize) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(base_seed.wrapping_add((index as u64).wrapping_mul(TRIAL_SEED_PRIME)))
}

/// Runs `config.trials` independent trials in parallel.
///
/// Each trial seeds its own board and draws from [`trial_rng`], so the
/// summary depends only on `config`, not on scheduling.
///
/// # Errors
///
/// Fails if the configured board dimensions are invalid.
pub fn run_trials(config: &TrialConfig) -> Result<BatchSummary> {
    info!(
        "running {} trials of {}x{} for up to {} steps",
        config.trials, config.width, config.height, config.max_iterations
    );
    let outcomes = (0..config.trials)
        .into_par_iter()
        .map(|index| -> Result<TrialOutcome> {
            let mut rng = trial_rng(config.seed, index);
            let mut engine = Engine::new(config.width, config.height, &mut rng)?;
            let outcome = run_trial(&mut engine, &mut rng, config.max_iterations, |_, _| {
                ControlFlow::Continue(())
            });
            debug!("trial {index}: {:?} after {} steps", outcome.extinct_after, outcome.steps);
            Ok(outcome)
        })
        .collect::<Result<Vec<_>>>()?;

    let summary = BatchSummary::from_outcomes(outcomes);
    info!(
        "{} of {} trials went extinct",
        summary.extinct(),
        summary.trials()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;
    use crate::grid::Grid;
    use rand::rngs::mock::StepRng;

    #[test]
    fn empty_board_dies_on_first_step() {
        let mut engine = Engine::from_grid(Grid::new(5, 5).unwrap());
        let mut seen = 0;
        let outcome = run_trial(&mut engine, &mut StepRng::new(0, 0), 10, |_, _| {
            seen += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(outcome.extinct_after, Some(1));
        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.last_living, None);
        assert_eq!(seen, 0);
    }

    #[test]
    fn high_draws_kill_then_last_board_is_empty() {
        let mut engine = Engine::from_grid("   \n * \n   \n".parse().unwrap());
        let outcome = run_trial(&mut engine, &mut StepRng::new(u64::MAX, 0), 10, |_, _| {
            ControlFlow::Continue(())
        });
        assert_eq!(outcome.extinct_after, Some(1));
        assert_eq!(outcome.last_living, None);
    }

    #[test]
    fn survivor_runs_to_the_limit() {
        // zero draws: the four corners of a 3x3 torus sustain each other
        let mut engine = Engine::from_grid("   \n * \n   \n".parse().unwrap());
        let mut frames = Vec::new();
        let outcome = run_trial(&mut engine, &mut StepRng::new(0, 0), 3, |e, r| {
            frames.push((e.generation(), r.population));
            ControlFlow::Continue(())
        });
        assert_eq!(outcome.extinct_after, None);
        assert!(!outcome.interrupted);
        assert_eq!(outcome.steps, 3);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0], (1, 4));
        assert_eq!(outcome.last_living.as_deref(), Some(engine.render().as_str()));
    }

    #[test]
    fn observer_break_stops_stepping() {
        let mut engine = Engine::from_grid("   \n * \n   \n".parse().unwrap());
        let mut calls = 0;
        let outcome = run_trial(&mut engine, &mut StepRng::new(0, 0), 1000, |_, _| {
            calls += 1;
            if calls == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(calls, 2);
        assert_eq!(outcome.steps, 2);
        assert_eq!(engine.generation(), 2);
        assert!(outcome.interrupted);
        assert_eq!(outcome.extinct_after, None);
        assert_eq!(outcome.last_living.as_deref(), Some("* *\n   \n* *\n"));
    }

    #[test]
    fn batch_is_reproducible() {
        let config = TrialConfig {
            width: 12,
            height: 8,
            trials: 6,
            max_iterations: 50,
            seed: 1234,
        };
        let a = run_trials(&config).unwrap();
        let b = run_trials(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.trials(), 6);
        assert_eq!(a.extinct() + a.survivors(), 6);
    }

    #[test]
    fn batch_rejects_bad_dimensions() {
        let config = TrialConfig {
            width: 0,
            trials: 2,
            ..TrialConfig::default()
        };
        assert_eq!(
            run_trials(&config),
            Err(LifeError::InvalidDimensions { width: 0, height: 15 })
        );
    }

    #[test]
    fn mean_counts_only_extinct_trials() {
        let outcome = |extinct_after| TrialOutcome {
            extinct_after,
            steps: 0,
            last_living: None,
            interrupted: false,
        };
        let summary =
            BatchSummary::from_outcomes(vec![outcome(Some(4)), outcome(None), outcome(Some(8))]);
        assert_eq!(summary.mean_extinction, Some(6.0));
        assert_eq!(summary.survivors(), 1);

        let none = BatchSummary::from_outcomes(vec![outcome(None)]);
        assert_eq!(none.mean_extinction, None);
    }
}
