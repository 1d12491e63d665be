//! End-to-end solver benchmarks.
//!
//! Measures full technique-solver runs and backtracking solution counting
//! on puzzles of varying difficulty.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::{hint, str::FromStr as _};

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use sudokit_core::DigitGrid;
use sudokit_solver::{BacktrackSolver, TechniqueGrid, TechniqueSolver};

fn easy_puzzle() -> DigitGrid {
    DigitGrid::from_str(
        "
        53_ _7_ ___
        6__ 195 ___
        _98 ___ _6_
        8__ _6_ __3
        4__ 8_3 __1
        7__ _2_ __6
        _6_ ___ 28_
        ___ 419 __5
        ___ _8_ _79
    ",
    )
    .unwrap()
}

fn hard_puzzle() -> DigitGrid {
    DigitGrid::from_str(
        "
        _2_ ___ ___
        ___ 6__ __3
        _74 _8_ ___
        ___ __3 __2
        _8_ _4_ _1_
        6__ 5__ ___
        ___ _1_ 78_
        5__ __9 ___
        ___ ___ _4_
    ",
    )
    .unwrap()
}

fn bench_technique_solver(c: &mut Criterion) {
    let puzzles = [("easy", easy_puzzle()), ("hard", hard_puzzle())];
    let solver = TechniqueSolver::with_all_techniques();

    for (param, puzzle) in puzzles {
        c.bench_with_input(
            BenchmarkId::new("technique_solver_solve", param),
            &puzzle,
            |b, puzzle| {
                b.iter_batched_ref(
                    || hint::black_box(TechniqueGrid::from_digit_grid(puzzle)),
                    |grid| {
                        let result = solver.solve(grid).unwrap();
                        hint::black_box(result)
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_backtrack_solve(c: &mut Criterion) {
    let puzzles = [("easy", easy_puzzle()), ("hard", hard_puzzle())];
    let solver = BacktrackSolver::new();

    for (param, puzzle) in puzzles {
        c.bench_with_input(
            BenchmarkId::new("backtrack_solve", param),
            &puzzle,
            |b, puzzle| {
                b.iter(|| {
                    let solution = solver.solve(hint::black_box(puzzle)).unwrap();
                    hint::black_box(solution)
                });
            },
        );
    }
}

fn bench_uniqueness_check(c: &mut Criterion) {
    let puzzles = [("easy", easy_puzzle()), ("hard", hard_puzzle())];
    let solver = BacktrackSolver::new();

    for (param, puzzle) in puzzles {
        c.bench_with_input(
            BenchmarkId::new("has_unique_solution", param),
            &puzzle,
            |b, puzzle| {
                b.iter(|| hint::black_box(solver.has_unique_solution(hint::black_box(puzzle))));
            },
        );
    }
}

criterion_group!(
    benches,
    bench_technique_solver,
    bench_backtrack_solve,
    bench_uniqueness_check,
);
criterion_main!(benches);
