#![cfg(feature = "serde")]

use rochade::{Color, Game, Notation, Square, Status};

#[test]
fn test_natural_representations() {
    assert_eq!(serde_json::to_string(&Square::E4).expect("serialize"), r#""e4""#);
    assert_eq!(
        serde_json::from_str::<Square>(r#""h8""#).expect("deserialize"),
        Square::H8
    );
    assert!(serde_json::from_str::<Square>(r#""i9""#).is_err());

    let notation: Notation = "exd5".parse().expect("valid notation");
    assert_eq!(serde_json::to_string(&notation).expect("serialize"), r#""exd5""#);
    assert_eq!(
        serde_json::from_str::<Notation>(r#""O-O-O""#).expect("deserialize"),
        "O-O-O".parse::<Notation>().expect("valid notation")
    );

    assert_eq!(serde_json::to_string(&Color::Black).expect("serialize"), r#""black""#);
}

#[test]
fn test_game_round_trip() {
    let mut game = Game::with_time_control(300);
    game.select(Square::E2);
    game.select(Square::E4);
    game.select(Square::C7);
    game.select(Square::C5);
    game.tick();
    assert!(game.undo());

    let json = serde_json::to_string(&game).expect("serialize");
    let restored: Game = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, game);
    assert!(restored.can_redo());
    assert_eq!(restored.status(), Status::Normal);
}
