use iai::black_box;
use rochade::{fen::Fen, perft, Game, Move, Notation, Position, Square};

fn bench_shallow_perft() {
    let pos = Position::default();
    assert_eq!(black_box(perft(black_box(&pos), 3)), 8_902);
}

fn bench_deep_perft() {
    let pos = Position::default();
    assert_eq!(perft(black_box(&pos), 4), 197_281);
}

fn bench_kiwipete() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - ";
    let pos = fen
        .trim()
        .parse::<Fen>()
        .expect("valid fen")
        .into_position()
        .expect("legal position");
    assert_eq!(perft(black_box(&pos), 2), 2_039);
}

fn bench_generate_moves() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";
    let pos = fen
        .parse::<Fen>()
        .expect("valid fen")
        .into_position()
        .expect("legal position");

    assert_eq!(black_box(&pos).legal_moves().len(), 48);
}

fn bench_play_unchecked() -> Position {
    let mut pos = black_box(Position::default());
    pos.play_unchecked(Move::new(Square::E2, Square::E4));
    pos
}

fn bench_play_notations() -> Position {
    let moves = [
        "e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Ba4", "Nf6", "O-O", "Be7", "Re1", "b5", "Bb3",
        "d6", "c3", "O-O", "h3",
    ];

    let mut pos = black_box(Position::default());
    for notation in black_box(moves).iter() {
        let m = notation
            .parse::<Notation>()
            .expect("valid notation")
            .to_move(&pos)
            .expect("legal move");

        pos.play_unchecked(m);
    }
    pos
}

fn bench_game_clicks() -> Game {
    let mut game = black_box(Game::new());
    for (row, col) in [(6, 4), (4, 4), (1, 4), (3, 4), (7, 6), (5, 5)] {
        game.select_square(row, col);
    }
    while game.undo() {}
    while game.redo() {}
    game
}

iai::main!(
    bench_shallow_perft,
    bench_deep_perft,
    bench_kiwipete,
    bench_generate_moves,
    bench_play_unchecked,
    bench_play_notations,
    bench_game_clicks,
);
