use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Board, GameSession};
use blockfall::term::{FrameBuffer, GameView, Viewport};
use blockfall::types::{Command, GameConfig};

fn bench_tick(c: &mut Criterion) {
    c.bench_function("session_tick", |b| {
        let mut session = GameSession::new(GameConfig::default(), 12345).unwrap();
        session.start().unwrap();
        b.iter(|| {
            if session.outcome().is_over() {
                session.play_again().unwrap();
            }
            black_box(session.tick().unwrap());
        })
    });
}

fn bench_row_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new(9, 15);
            for y in 11..15 {
                for x in 0..9 {
                    board.set(x, y, true);
                }
            }
            for y in board.full_rows() {
                board.clear_row(y);
            }
            black_box(board.occupied_count())
        })
    });
}

fn bench_commands(c: &mut Criterion) {
    let mut session = GameSession::new(GameConfig::default(), 12345).unwrap();
    session.start().unwrap();

    c.bench_function("move_and_rotate", |b| {
        b.iter(|| {
            for command in [
                Command::MoveLeft,
                Command::RotateRight,
                Command::MoveRight,
                Command::RotateLeft,
                Command::FlipHorizontal,
            ] {
                black_box(session.apply(black_box(command)).unwrap());
            }
        })
    });
}

fn bench_init_turn(c: &mut Criterion) {
    let mut session = GameSession::new(GameConfig::default(), 12345).unwrap();

    c.bench_function("init_turn_on_empty_board", |b| {
        b.iter(|| {
            black_box(session.play_again().unwrap());
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut session = GameSession::new(GameConfig::default(), 12345).unwrap();
    let board = session.start().unwrap();
    let progress = session.progress_snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("render_frame", |b| {
        b.iter(|| {
            view.render_into(
                black_box(&board),
                &progress,
                session.outcome(),
                Viewport::new(80, 24),
                &mut fb,
            );
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_row_clear,
    bench_commands,
    bench_init_turn,
    bench_render
);
criterion_main!(benches);
