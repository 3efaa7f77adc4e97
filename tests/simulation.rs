use probabilistic_life::{rules, Engine, Grid, LifeError};
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

fn seeded(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

#[test]
fn construction_rejects_empty_dimensions() {
    let mut rng = seeded(0);
    assert_eq!(
        Engine::new(0, 5, &mut rng).err(),
        Some(LifeError::InvalidDimensions { width: 0, height: 5 })
    );
    assert_eq!(
        Engine::new(5, 0, &mut rng).err(),
        Some(LifeError::InvalidDimensions { width: 5, height: 0 })
    );
    assert!(Grid::new(0, 0).is_err());
}

#[test]
fn same_board_and_draws_give_same_future() {
    let board = Engine::new(40, 15, &mut seeded(9)).unwrap().current().clone();
    let mut a = Engine::from_grid(board.clone());
    let mut b = Engine::from_grid(board);
    let (mut rng_a, mut rng_b) = (seeded(77), seeded(77));
    for _ in 0..25 {
        a.step(&mut rng_a);
        b.step(&mut rng_b);
    }
    assert_eq!(a.render(), b.render());
    assert_eq!(a.generation(), 25);
}

#[test]
fn empty_board_ignores_the_draws() {
    let mut engine = Engine::from_grid(Grid::new(6, 4).unwrap());
    engine.step(&mut StepRng::new(0, 0));
    engine.step(&mut StepRng::new(u64::MAX, 0));
    engine.step(&mut seeded(3));
    assert!(engine.current().is_extinct());
    assert_eq!(engine.render(), "      \n".repeat(4));
}

#[test]
fn isolated_cell_on_a_large_board() {
    // far from wraparound every neighbour sees the cell once
    let mut grid = Grid::new(9, 9).unwrap();
    grid.set(4, 4, true);
    let engine = Engine::from_grid(grid);

    for dy in -2..=2i64 {
        for dx in -2..=2i64 {
            let expected = if dx == 0 && dy == 0 {
                0.0
            } else {
                rules::influence(dx, dy)
            };
            assert_eq!(engine.influence_sum(4 - dx, 4 - dy), expected, "({dx}, {dy})");
        }
    }
    assert_eq!(engine.influence_sum(0, 0), 0.0);
}

#[test]
fn dense_board_overcrowds() {
    // every neighbourhood sums to 19, beyond the probability table
    let full: Grid = "*****\n".repeat(5).parse().unwrap();
    let mut engine = Engine::from_grid(full);
    assert_eq!(engine.influence_sum(2, 2), 19.0);
    let report = engine.step(&mut StepRng::new(0, 0));
    assert_eq!(report.deaths, 25);
    assert!(engine.current().is_extinct());
}

#[test]
fn render_is_width_by_height() {
    let mut rng = seeded(21);
    let mut engine = Engine::new(17, 6, &mut rng).unwrap();
    for _ in 0..3 {
        engine.step(&mut rng);
        let text = engine.render();
        let lines: Vec<&str> = text.split_terminator('\n').collect();
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|l| l.len() == 17));
        assert!(text.chars().all(|c| matches!(c, '*' | ' ' | '\n')));
    }
}
