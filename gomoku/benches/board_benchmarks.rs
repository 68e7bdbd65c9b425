use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gomoku::{Board, Coordinate, Symbol, constants::BOARD_SIZE};
use std::hint::black_box;

/// Board with every cell filled in a checkerboard pattern, so no run of
/// three exists in any row or column.
fn checkerboard() -> Board {
    let mut board = Board::new();
    for coord in Coordinate::all() {
        let symbol = if (coord.row() + coord.col()) % 2 == 0 {
            Symbol::X
        } else {
            Symbol::O
        };
        board.place(coord, symbol).unwrap();
    }
    board
}

/// Benchmark victory detection on a sparse board
fn bench_check_victory_sparse(c: &mut Criterion) {
    let mut board = Board::new();
    let coord: Coordinate = "E5".parse().unwrap();
    board.place(coord, Symbol::X).unwrap();

    c.bench_function("check_victory_sparse", |b| {
        b.iter(|| board.check_victory(black_box(coord)));
    });
}

/// Benchmark victory detection on a full board without a winner in the
/// axis-aligned directions
fn bench_check_victory_full(c: &mut Criterion) {
    let board = checkerboard();
    let mut group = c.benchmark_group("check_victory_full");

    for cell in ["A0", "E5", "J9"] {
        let coord: Coordinate = cell.parse().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(cell), &coord, |b, &coord| {
            b.iter(|| board.check_victory(black_box(coord)));
        });
    }

    group.finish();
}

/// Benchmark scanning every cell after each placement of a full game
fn bench_fill_and_check(c: &mut Criterion) {
    c.bench_function("fill_and_check_all_cells", |b| {
        b.iter(|| {
            let mut board = Board::new();
            let mut wins = 0usize;
            for coord in Coordinate::all() {
                let symbol = if coord.row() % 2 == 0 { Symbol::X } else { Symbol::O };
                board.place(coord, symbol).unwrap();
                if board.check_victory(coord) {
                    wins += 1;
                }
            }
            black_box(wins)
        });
    });
}

fn bench_coordinate_parse(c: &mut Criterion) {
    c.bench_function("coordinate_parse_all", |b| {
        b.iter(|| {
            Coordinate::all()
                .map(|coord| coord.to_string().parse::<Coordinate>().unwrap())
                .count()
                == BOARD_SIZE * BOARD_SIZE
        });
    });
}

criterion_group!(
    victory_detection,
    bench_check_victory_sparse,
    bench_check_victory_full,
    bench_fill_and_check,
);

criterion_group!(coordinates, bench_coordinate_parse);

criterion_main!(victory_detection, coordinates);
