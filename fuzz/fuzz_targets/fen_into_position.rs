#![no_main]

use libfuzzer_sys::fuzz_target;
use rochade::{attacks, fen::Fen};

fuzz_target!(|data: &[u8]| {
    let Ok(fen) = Fen::from_ascii(data) else {
        return;
    };
    let Ok(pos) = fen.into_position() else {
        return;
    };
    let _ = pos.status();
    for m in pos.legal_moves() {
        assert!(pos.is_legal(m));
        let mut child = pos;
        child.play_unchecked(m).expect("piece on origin");
        assert!(!attacks::is_king_attacked(child.board(), pos.turn()));
        assert_eq!(child.turn(), !pos.turn());
    }
});
