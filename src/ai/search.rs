use std::marker::PhantomData;
use std::time::Duration;

use tracing::{debug, trace};
use web_time::Instant;

use crate::ai::rules::{Evaluation, Rules, WhenStuck};

pub const MIN_SCORE: Evaluation = Evaluation::MIN;
pub const MAX_SCORE: Evaluation = Evaluation::MAX;
/// Magnitude of a won or lost position, before the remaining-depth bonus.
pub const WIN_SCORE: Evaluation = 100_000;

/// Minimax with alpha-beta pruning over any [`Rules`].
///
/// Single-threaded and synchronous. Every node works on its own board copy,
/// so the caller's board is never touched.
pub struct Searcher<R: Rules> {
    max_depth: u8,
    perspective: R::Side,
    nodes: u64,
    start_time: Instant,
    elapsed: Duration,
    last_score: Option<Evaluation>,
    _rules: PhantomData<R>,
}

impl<R: Rules> Searcher<R> {
    /// A searcher looking `max_depth` plies ahead. Depth 0 is treated as 1.
    pub fn new(max_depth: u8) -> Self {
        Self {
            max_depth: max_depth.max(1),
            perspective: R::AI,
            nodes: 0,
            start_time: Instant::now(),
            elapsed: Duration::ZERO,
            last_score: None,
            _rules: PhantomData,
        }
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Nodes visited by the last `best_move`.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Wall-clock time of the last `best_move`.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Score of the move returned by the last `best_move`, `None` when it
    /// returned early without searching.
    pub fn last_score(&self) -> Option<Evaluation> {
        self.last_score
    }

    /// Searches the best move for `side`, maximizing from `side`'s perspective.
    ///
    /// Returns `None` when `side` has no legal move. Ties go to the first
    /// move explored.
    pub fn best_move(&mut self, board: &R::Board, side: R::Side) -> Option<R::Move> {
        self.start_time = Instant::now();
        self.perspective = side;
        self.nodes = 0;
        self.last_score = None;

        let mut moves = R::legal_moves(board, side);
        if moves.len() <= 1 {
            self.elapsed = self.start_time.elapsed();
            return moves.pop();
        }
        R::order_root(board, &mut moves);

        let mut best: Option<(R::Move, Evaluation)> = None;
        for mv in moves {
            let next = R::apply(board, &mv);
            let alpha = best.as_ref().map_or(MIN_SCORE, |(_, score)| *score);
            let score = self.search(&next, R::opponent(side), self.max_depth - 1, alpha, MAX_SCORE, false);
            trace!(?mv, score, "root move scored");

            if best.as_ref().is_none_or(|(_, best_score)| score > *best_score) {
                best = Some((mv, score));
            }
        }

        self.elapsed = self.start_time.elapsed();
        let (mv, score) = best?;
        self.last_score = Some(score);
        debug!(
            game = ?R::KIND,
            depth = self.max_depth,
            nodes = self.nodes,
            elapsed_ms = self.elapsed.as_millis() as u64,
            score,
            "search complete"
        );
        Some(mv)
    }

    /// Minimax value of `board` with `side` to move, `depth` plies deep.
    pub fn search(
        &mut self,
        board: &R::Board,
        side: R::Side,
        depth: u8,
        mut alpha: Evaluation,
        mut beta: Evaluation,
        maximizing: bool,
    ) -> Evaluation {
        self.nodes += 1;

        if depth == 0 {
            return R::evaluate(board, self.perspective);
        }

        let moves = R::legal_moves(board, side);
        if moves.is_empty() {
            return match R::WHEN_STUCK {
                WhenStuck::Loses => {
                    let margin = WIN_SCORE + depth as Evaluation;
                    if maximizing { -margin } else { margin }
                }
                WhenStuck::Passes => {
                    self.search(board, R::opponent(side), depth - 1, alpha, beta, !maximizing)
                }
            };
        }

        if maximizing {
            let mut best = MIN_SCORE;
            for mv in &moves {
                let next = R::apply(board, mv);
                let score = self.search(&next, R::opponent(side), depth - 1, alpha, beta, false);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = MAX_SCORE;
            for mv in &moves {
                let next = R::apply(board, mv);
                let score = self.search(&next, R::opponent(side), depth - 1, alpha, beta, true);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

/// Convenience wrapper around [`Searcher::best_move`].
pub fn best_move<R: Rules>(board: &R::Board, side: R::Side, depth: u8) -> Option<R::Move> {
    Searcher::<R>::new(depth).best_move(board, side)
}
