//! Constant tables and the per-cell transition rule.
//!
//! A neighbour at offset `(dx, dy)` contributes the average of the per-axis
//! weights `INFLUENCE_WEIGHTS[|dx|]` and `INFLUENCE_WEIGHTS[|dy|]`. The summed
//! contribution of all live neighbours is truncated and looked up in
//! [`ALIVE_PROBABILITY`].

/// Half-width of the square neighbourhood examined around each cell.
pub const SEARCH_RADIUS: i64 = 2;

/// Initial seeding makes `width * height / SEED_DENSITY_DIVISOR` placements.
pub const SEED_DENSITY_DIVISOR: usize = 4;

/// Per-axis weight by absolute offset.
pub const INFLUENCE_WEIGHTS: [f64; 5] = [1.0, 1.0, 0.5, 0.25, 0.125];

/// Probability of being alive next step, indexed by truncated influence sum.
pub const ALIVE_PROBABILITY: [f64; 9] = [0.0, 0.1, 0.9, 0.95, 0.04, 0.02, 0.01, 0.001, 0.0];

/// Sums below this keep the current state instead of forcing a birth.
const BIRTH_THRESHOLD: usize = 3;

fn axis_weight(offset: i64) -> f64 {
    usize::try_from(offset.unsigned_abs())
        .ok()
        .and_then(|i| INFLUENCE_WEIGHTS.get(i))
        .copied()
        .unwrap_or(0.0)
}

/// Contribution of a live neighbour at relative offset `(dx, dy)`.
///
/// Depends only on `|dx|` and `|dy|`.
pub fn influence(dx: i64, dy: i64) -> f64 {
    (axis_weight(dx) + axis_weight(dy)) / 2.0
}

/// Looks up the aliveness probability for a truncated influence sum.
///
/// Sums outside the table (reachable on dense boards, the radius-2
/// neighbourhood tops out at 19) have probability 0.
pub fn alive_probability(truncated_sum: usize) -> f64 {
    ALIVE_PROBABILITY
        .get(truncated_sum)
        .copied()
        .unwrap_or(0.0)
}

/// Decides a cell's next state from its influence sum and a uniform draw in `[0, 1)`.
///
/// * The sum is truncated, never rounded.
/// * If the table probability exceeds `draw`, the cell lives, except that
///   sums below 3 keep the current state.
/// * Otherwise the cell dies.
pub fn next_state(current: bool, influence_sum: f64, draw: f64) -> bool {
    // influence sums are never negative, so the cast truncates toward zero
    let truncated = influence_sum.trunc() as usize;

    if alive_probability(truncated) > draw {
        if truncated < BIRTH_THRESHOLD {
            current
        } else {
            true
        }
    } else {
        false
    }
}
