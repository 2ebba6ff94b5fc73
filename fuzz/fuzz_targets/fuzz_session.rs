#![no_main]

//! Session fuzzer.
//!
//! Feeds arbitrary move codes to a seeded session, including invalid codes
//! and keep-playing requests, and checks the score and status contract after
//! every step.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use merge1024::game::{check_invariants, has_legal_move, GameSession, GameStatus};
use merge1024::GameConfig;

/// Structured input for session fuzzing.
#[derive(Arbitrary, Debug)]
struct SessionInput {
    /// Spawn seed.
    seed: u64,
    /// Board side, reduced into 2..=6.
    size: u8,
    /// Win exponent, reduced into 2^3..=2^11.
    win_exp: u8,
    /// Move codes; 4..=7 request keep playing, larger codes are invalid.
    codes: Vec<u8>,
}

fuzz_target!(|input: SessionInput| {
    let config = GameConfig {
        size: usize::from(input.size % 5) + 2,
        win_value: 1 << (u32::from(input.win_exp % 9) + 3),
        ..GameConfig::default()
    };
    let Ok(mut session) = GameSession::seeded(config, input.seed) else {
        return;
    };

    for &code in input.codes.iter().take(500) {
        let score = session.score();
        let status = session.status();

        match code {
            0..=3 => {
                let Ok(outcome) = session.apply_move_code(code) else {
                    panic!("code {code} rejected");
                };
                assert!(outcome.score >= score);
                if !status.accepts_moves() {
                    assert!(!outcome.accepted);
                }
            }
            4..=7 => {
                let changed = session.keep_playing();
                assert_eq!(changed, status == GameStatus::Won);
            }
            _ => assert!(session.apply_move_code(code).is_err()),
        }

        assert!(session.best() >= session.score());
        assert!(check_invariants(session.grid()).is_empty());
        if session.status() == GameStatus::Lost {
            assert!(!has_legal_move(session.grid()));
        }
    }
});
