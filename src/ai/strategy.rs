use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::ai::difficulty::DifficultyParams;
use crate::ai::rules::Rules;
use crate::ai::search::Searcher;

/// Picks the AI's move. `None` means the side has no legal move.
pub trait MoveSelector<R: Rules>: Send {
    fn select_move(&mut self, board: &R::Board, side: R::Side) -> Option<R::Move>;
}

/// Always plays the first legal move.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl<R: Rules> MoveSelector<R> for FirstLegalMoveSelector {
    fn select_move(&mut self, board: &R::Board, side: R::Side) -> Option<R::Move> {
        R::legal_moves(board, side).into_iter().next()
    }
}

/// Plays according to a [`DifficultyParams`] tier.
#[derive(Debug, Clone)]
pub struct TieredSelector {
    params: DifficultyParams,
    rng: SmallRng,
}

impl TieredSelector {
    pub fn new(params: DifficultyParams, seed: u64) -> Self {
        Self {
            params,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn params(&self) -> DifficultyParams {
        self.params
    }
}

impl<R: Rules> MoveSelector<R> for TieredSelector {
    fn select_move(&mut self, board: &R::Board, side: R::Side) -> Option<R::Move> {
        let selected = match self.params {
            DifficultyParams::Random => R::legal_moves(board, side).choose(&mut self.rng).cloned(),
            DifficultyParams::Greedy => greedy_move::<R>(board, side),
            DifficultyParams::Minimax { depth } => Searcher::<R>::new(depth).best_move(board, side),
        };
        debug!(game = ?R::KIND, params = ?self.params, ?selected, "AI move selected");
        selected
    }
}

/// The move affecting the most opponent pieces; the first one on ties.
pub fn greedy_move<R: Rules>(board: &R::Board, side: R::Side) -> Option<R::Move> {
    let mut best: Option<(R::Move, usize)> = None;
    for mv in R::legal_moves(board, side) {
        let gain = R::affected_squares(&mv).len();
        if best.as_ref().is_none_or(|(_, best_gain)| gain > *best_gain) {
            best = Some((mv, gain));
        }
    }
    best.map(|(mv, _)| mv)
}
