//! Benchmarks for the solving passes.
//!
//! Measures one logic wave and one probability analysis on representative
//! mid-game positions, plus full playouts of seeded boards.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::hint;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use minegrid_core::Position;
use minegrid_game::GameSession;
use minegrid_solver::{Solver, testing::layout_session};

/// A wall of mines with a gap; logic resolves most of it and leaves a
/// three-cell frontier for the probability pass.
fn wall_position() -> (Solver, GameSession) {
    let mut session = layout_session(&[
        "..........",
        "..........",
        "..........",
        "..........",
        "*****.****",
        ".....*....",
        "..........",
        "..........",
        "..........",
        "..........",
    ]);
    let solver = Solver::new(&mut session).unwrap();
    session.left_click(Position::new(0, 0)).unwrap();
    (solver, session)
}

fn bench_logic_wave(c: &mut Criterion) {
    let (solver, session) = wall_position();
    c.bench_function("logic_wave", |b| {
        b.iter_batched_ref(
            || hint::black_box((solver.clone(), session.clone())),
            |(solver, session)| {
                let acted = solver.logic_wave(session, Position::new(5, 5)).unwrap();
                hint::black_box(acted)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_probabilities(c: &mut Criterion) {
    let (mut solver, mut session) = wall_position();
    while solver.solve_next_step(&mut session).unwrap() {}
    c.bench_function("probabilities", |b| {
        b.iter_batched_ref(
            || hint::black_box((solver.clone(), session.clone())),
            |(solver, session)| {
                let stats = solver.probabilities(session).unwrap();
                hint::black_box(stats)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_full_playout(c: &mut Criterion) {
    c.bench_function("full_playout", |b| {
        b.iter_batched(
            || {
                let mut session = GameSession::with_seed(10, 10, 42).unwrap();
                let solver = Solver::new(&mut session).unwrap();
                (solver, session)
            },
            |(mut solver, mut session)| {
                session.left_click(Position::new(5, 5)).unwrap();
                while !session.is_done() {
                    if !solver.solve_next_step(&mut session).unwrap()
                        && !solver.guess(&mut session).unwrap()
                    {
                        break;
                    }
                }
                hint::black_box(session.is_won())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_logic_wave,
    bench_probabilities,
    bench_full_playout,
);
criterion_main!(benches);
