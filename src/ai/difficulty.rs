//! Maps the player's win count to how hard the AI plays.

use serde::{Deserialize, Serialize};

use crate::types::GameKind;

pub const MAX_CHECKERS_DEPTH: u8 = 4;
pub const MAX_REVERSI_DEPTH: u8 = 4;

/// How the AI picks its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "tier")]
pub enum DifficultyParams {
    /// Uniformly random legal move.
    Random,
    /// The move affecting the most opponent pieces. Positional weights are ignored.
    Greedy,
    /// Alpha-beta search `depth` plies deep.
    Minimax { depth: u8 },
}

/// Difficulty for a player with `wins` wins. Non-decreasing in `wins`.
pub fn depth_or_tier(kind: GameKind, wins: u32) -> DifficultyParams {
    match kind {
        GameKind::Checkers => DifficultyParams::Minimax {
            depth: saturating_depth(wins.saturating_add(1), MAX_CHECKERS_DEPTH),
        },
        GameKind::Reversi => match wins {
            0 => DifficultyParams::Random,
            1 => DifficultyParams::Greedy,
            _ => DifficultyParams::Minimax {
                depth: saturating_depth(wins, MAX_REVERSI_DEPTH),
            },
        },
    }
}

fn saturating_depth(value: u32, max: u8) -> u8 {
    value.min(max as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkers_depth_grows_with_wins_and_saturates() {
        let depths: Vec<DifficultyParams> = (0..6).map(|w| depth_or_tier(GameKind::Checkers, w)).collect();

        assert_eq!(
            depths,
            [1, 2, 3, 4, 4, 4].map(|depth| DifficultyParams::Minimax { depth }).to_vec()
        );
        assert_eq!(
            depth_or_tier(GameKind::Checkers, u32::MAX),
            DifficultyParams::Minimax { depth: 4 }
        );
    }

    #[test]
    fn reversi_walks_through_the_tiers() {
        assert_eq!(depth_or_tier(GameKind::Reversi, 0), DifficultyParams::Random);
        assert_eq!(depth_or_tier(GameKind::Reversi, 1), DifficultyParams::Greedy);
        assert_eq!(depth_or_tier(GameKind::Reversi, 2), DifficultyParams::Minimax { depth: 2 });
        assert_eq!(depth_or_tier(GameKind::Reversi, 3), DifficultyParams::Minimax { depth: 3 });
        assert_eq!(depth_or_tier(GameKind::Reversi, 4), DifficultyParams::Minimax { depth: 4 });
        assert_eq!(depth_or_tier(GameKind::Reversi, 50), DifficultyParams::Minimax { depth: 4 });
    }
}
