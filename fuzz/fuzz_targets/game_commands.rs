#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rochade::{Color, Game, Role, Square};

#[derive(Debug, Arbitrary)]
enum Command {
    Select(Square),
    Undo,
    Redo,
    Tick,
    Restart,
}

fuzz_target!(|commands: Vec<Command>| {
    let mut game = Game::with_time_control(30);
    for command in commands {
        match command {
            Command::Select(sq) => {
                game.select(sq);
            }
            Command::Undo => {
                game.undo();
            }
            Command::Redo => {
                game.redo();
            }
            Command::Tick => game.tick(),
            Command::Restart => game.restart(),
        }
        for color in Color::ALL {
            assert_eq!(game.board().count_piece(color, Role::King), 1);
        }
        assert_eq!(game.move_list().len(), game.snapshot().plies);
    }
});
