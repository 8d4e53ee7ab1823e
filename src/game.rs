use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ai::difficulty::depth_or_tier;
use crate::ai::rules::{Rules, WhenStuck};
use crate::ai::strategy::{MoveSelector, TieredSelector};
use crate::error::{EngineError, EngineResult};
use crate::types::{GameState, Outcome, Phase};

/// Host-supplied session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Games the player has won so far. Drives the AI difficulty.
    pub wins: u32,
    /// Seed for the AI's random choices.
    pub seed: u64,
    /// Overrides the game's own draw limit when set.
    pub quiet_ply_limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Actor {
    User,
    Ai,
}

/// Something the presentation layer should animate or announce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum GameEvent<M> {
    Moved { by: Actor, mv: M },
    Passed { by: Actor },
    Finished { outcome: Outcome },
}

/// One game between the user and the AI. Owns the authoritative board.
pub struct GameSession<R: Rules> {
    board: R::Board,
    phase: Phase,
    quiet_plies: u32,
    quiet_ply_limit: Option<u32>,
    is_pass: bool,
    last_move: Option<R::Move>,
    events: VecDeque<GameEvent<R::Move>>,
    selector: Box<dyn MoveSelector<R>>,
}

impl<R: Rules> GameSession<R> {
    pub fn new(config: SessionConfig) -> Self {
        let params = depth_or_tier(R::KIND, config.wins);
        debug!(game = ?R::KIND, wins = config.wins, ?params, "new session");
        let mut session = Self::with_selector(R::initial(), Box::new(TieredSelector::new(params, config.seed)));
        if config.quiet_ply_limit.is_some() {
            session.quiet_ply_limit = config.quiet_ply_limit;
        }
        session
    }

    /// Starts from `board` with the user to move.
    pub fn with_selector(board: R::Board, selector: Box<dyn MoveSelector<R>>) -> Self {
        Self {
            board,
            phase: Phase::UserTurn,
            quiet_plies: 0,
            quiet_ply_limit: R::QUIET_PLY_LIMIT,
            is_pass: false,
            last_move: None,
            events: VecDeque::new(),
            selector,
        }
    }

    pub fn board(&self) -> &R::Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    pub fn last_move(&self) -> Option<&R::Move> {
        self.last_move.as_ref()
    }

    /// The side to move, `None` once the game is over.
    pub fn side_to_move(&self) -> Option<R::Side> {
        match self.phase {
            Phase::UserTurn => Some(R::USER),
            Phase::AiTurn => Some(R::AI),
            Phase::Finished(_) => None,
        }
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<R::Move> {
        self.side_to_move()
            .map(|side| R::legal_moves(&self.board, side))
            .unwrap_or_default()
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        !self.legal_moves().is_empty()
    }

    pub fn play_user(&mut self, mv: &R::Move) -> EngineResult<()> {
        match self.phase {
            Phase::Finished(_) => return Err(EngineError::GameOver),
            Phase::AiTurn => return Err(EngineError::NotUsersTurn),
            Phase::UserTurn => {}
        }
        if !R::legal_moves(&self.board, R::USER).contains(mv) {
            return Err(EngineError::IllegalMove);
        }

        self.commit(Actor::User, mv.clone());
        Ok(())
    }

    /// Lets the selector move for the AI. Returns `None` when the AI passed.
    pub fn play_ai(&mut self) -> EngineResult<Option<R::Move>> {
        match self.phase {
            Phase::Finished(_) => return Err(EngineError::GameOver),
            Phase::UserTurn => return Err(EngineError::NotAisTurn),
            Phase::AiTurn => {}
        }

        let legal = R::legal_moves(&self.board, R::AI);
        if legal.is_empty() {
            self.pass()?;
            return Ok(None);
        }

        let selected = self
            .selector
            .select_move(&self.board, R::AI)
            .ok_or(EngineError::NoMoveSelected)?;
        if !legal.contains(&selected) {
            return Err(EngineError::IllegalMove);
        }

        self.commit(Actor::Ai, selected.clone());
        Ok(Some(selected))
    }

    /// Passes the turn. Only allowed when the side to move is stuck.
    pub fn pass(&mut self) -> EngineResult<()> {
        let actor = match self.phase {
            Phase::Finished(_) => return Err(EngineError::GameOver),
            Phase::UserTurn => Actor::User,
            Phase::AiTurn => Actor::Ai,
        };
        if R::WHEN_STUCK != WhenStuck::Passes || self.has_legal_moves_for_current() {
            return Err(EngineError::MustMove);
        }

        self.is_pass = true;
        self.last_move = None;
        self.phase = turn_of(opposite(actor));
        self.events.push_back(GameEvent::Passed { by: actor });
        Ok(())
    }

    /// Removes and returns queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent<R::Move>> {
        self.events.drain(..).collect()
    }

    pub fn to_game_state(&self) -> GameState {
        let affected = self
            .last_move
            .as_ref()
            .filter(|_| !self.is_pass)
            .map(|mv| R::affected_squares(mv).iter().map(|p| p.index() as u8).collect())
            .unwrap_or_default();

        GameState {
            kind: R::KIND,
            board: R::cells(&self.board).to_vec(),
            phase: self.phase,
            user_count: R::count(&self.board, R::USER),
            ai_count: R::count(&self.board, R::AI),
            is_game_over: self.is_game_over(),
            is_pass: self.is_pass,
            affected,
            quiet_plies: self.quiet_plies,
        }
    }

    fn commit(&mut self, actor: Actor, mv: R::Move) {
        self.board = R::apply(&self.board, &mv);
        self.quiet_plies = if R::is_progress(&mv) { 0 } else { self.quiet_plies + 1 };
        self.is_pass = false;
        self.last_move = Some(mv.clone());
        self.events.push_back(GameEvent::Moved { by: actor, mv });

        let next = opposite(actor);
        if let Some(outcome) = self.outcome_after(actor, next) {
            self.finish(outcome);
        } else {
            self.phase = turn_of(next);
        }
    }

    fn outcome_after(&self, mover: Actor, next: Actor) -> Option<Outcome> {
        if self.quiet_ply_limit.is_some_and(|limit| self.quiet_plies >= limit) {
            return Some(Outcome::Draw);
        }
        if !R::legal_moves(&self.board, side_of::<R>(next)).is_empty() {
            return None;
        }

        match R::WHEN_STUCK {
            WhenStuck::Loses => Some(win_for(mover)),
            WhenStuck::Passes if R::legal_moves(&self.board, side_of::<R>(mover)).is_empty() => {
                Some(self.outcome_by_count())
            }
            WhenStuck::Passes => None,
        }
    }

    fn outcome_by_count(&self) -> Outcome {
        let user = R::count(&self.board, R::USER);
        let ai = R::count(&self.board, R::AI);
        match user.cmp(&ai) {
            std::cmp::Ordering::Greater => Outcome::UserWin,
            std::cmp::Ordering::Less => Outcome::AiWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        info!(game = ?R::KIND, ?outcome, quiet_plies = self.quiet_plies, "game finished");
        self.phase = Phase::Finished(outcome);
        self.events.push_back(GameEvent::Finished { outcome });
    }
}

fn opposite(actor: Actor) -> Actor {
    match actor {
        Actor::User => Actor::Ai,
        Actor::Ai => Actor::User,
    }
}

fn turn_of(actor: Actor) -> Phase {
    match actor {
        Actor::User => Phase::UserTurn,
        Actor::Ai => Phase::AiTurn,
    }
}

fn win_for(actor: Actor) -> Outcome {
    match actor {
        Actor::User => Outcome::UserWin,
        Actor::Ai => Outcome::AiWin,
    }
}

fn side_of<R: Rules>(actor: Actor) -> R::Side {
    match actor {
        Actor::User => R::USER,
        Actor::Ai => R::AI,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::strategy::FirstLegalMoveSelector;
    use crate::checkers::Checkers;
    use crate::checkers::board::{Board as CheckersBoard, CheckersMove, Color, Piece};
    use crate::reversi::Reversi;
    use crate::reversi::board::{Board as ReversiBoard, Owner};
    use crate::types::Position;

    const FULL_BOARD: u64 = u64::MAX;

    struct FixedMoveSelector<M> {
        mv: M,
    }

    impl<R: Rules> MoveSelector<R> for FixedMoveSelector<R::Move> {
        fn select_move(&mut self, _board: &R::Board, _side: R::Side) -> Option<R::Move> {
            Some(self.mv.clone())
        }
    }

    fn bit(row: usize, col: usize) -> u64 {
        1u64 << (row * 8 + col)
    }

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    fn reversi_at(board: ReversiBoard, phase: Phase) -> GameSession<Reversi> {
        let mut game = GameSession::<Reversi>::with_selector(board, Box::new(FirstLegalMoveSelector));
        game.phase = phase;
        game
    }

    #[test]
    fn initial_state_is_correct() {
        let game = GameSession::<Reversi>::new(SessionConfig::default());
        let state = game.to_game_state();

        assert_eq!(state.phase, Phase::UserTurn);
        assert_eq!(state.user_count, 2);
        assert_eq!(state.ai_count, 2);
        assert!(!state.is_game_over);
        assert!(!state.is_pass);
        assert!(state.affected.is_empty());
        assert_eq!(game.legal_moves().len(), 4);
    }

    #[test]
    fn user_and_ai_alternate() {
        let mut game = GameSession::<Reversi>::new(SessionConfig { wins: 3, ..Default::default() });
        let mv = game.legal_moves()[0].clone();

        game.play_user(&mv).unwrap();
        assert_eq!(game.phase(), Phase::AiTurn);
        assert_eq!(game.play_user(&mv), Err(EngineError::NotUsersTurn));

        let reply = game.play_ai().unwrap();
        assert!(reply.is_some());
        assert_eq!(game.phase(), Phase::UserTurn);
        assert_eq!(game.play_ai(), Err(EngineError::NotAisTurn));

        let events = game.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], GameEvent::Moved { by: Actor::User, mv });
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn t02_illegal_player_move_returns_error() {
        let mut game = GameSession::<Reversi>::new(SessionConfig::default());
        let mut mv = game.legal_moves()[0].clone();
        mv.position = pos(0, 0);

        assert_eq!(game.play_user(&mv), Err(EngineError::IllegalMove));
        assert_eq!(game.phase(), Phase::UserTurn);
    }

    #[test]
    fn t03_pass_occurrence_switches_turn() {
        let user = bit(0, 1);
        let waifu = FULL_BOARD ^ bit(0, 0) ^ user;
        let mut game = reversi_at(ReversiBoard::from_bitboards(user, waifu), Phase::UserTurn);

        assert!(!game.has_legal_moves_for_current());
        game.pass().unwrap();

        assert_eq!(game.phase(), Phase::AiTurn);
        let state = game.to_game_state();
        assert!(state.is_pass);
        assert!(state.affected.is_empty());
        assert!(!state.is_game_over);
        assert!(game.has_legal_moves_for_current());
        assert_eq!(game.drain_events(), vec![GameEvent::Passed { by: Actor::User }]);
    }

    #[test]
    fn pass_is_refused_while_moves_exist() {
        let mut game = GameSession::<Reversi>::new(SessionConfig::default());

        assert_eq!(game.pass(), Err(EngineError::MustMove));
    }

    #[test]
    fn stuck_ai_passes_automatically() {
        let waifu = bit(0, 1);
        let user = FULL_BOARD ^ bit(0, 0) ^ waifu;
        let mut game = reversi_at(ReversiBoard::from_bitboards(user, waifu), Phase::AiTurn);

        assert_eq!(game.play_ai(), Ok(None));
        assert_eq!(game.phase(), Phase::UserTurn);
        assert!(game.to_game_state().is_pass);
    }

    #[test]
    fn t05_full_board_after_move_ends_by_count() {
        let user = bit(0, 1);
        let waifu = FULL_BOARD ^ bit(0, 0) ^ user;
        let board = ReversiBoard::from_bitboards(user, waifu);
        let mv = board.legal_moves(Owner::Waifu)[0].clone();
        let mut game = GameSession::<Reversi>::with_selector(board, Box::new(FixedMoveSelector { mv }));
        game.phase = Phase::AiTurn;

        game.play_ai().unwrap();
        let state = game.to_game_state();

        assert!(state.is_game_over);
        assert_eq!(state.phase, Phase::Finished(Outcome::AiWin));
        assert_eq!(state.user_count, 0);
        assert_eq!(state.ai_count, 64);
        assert_eq!(state.affected, vec![1]);
        assert_eq!(game.play_ai(), Err(EngineError::GameOver));
    }

    #[test]
    fn selector_returning_an_illegal_move_is_rejected() {
        let board = ReversiBoard::new();
        let mv = board.legal_moves(Owner::User)[0].clone();
        let mut game = GameSession::<Reversi>::with_selector(board, Box::new(FixedMoveSelector { mv }));
        game.phase = Phase::AiTurn;

        assert_eq!(game.play_ai(), Err(EngineError::IllegalMove));
        assert_eq!(game.board(), &ReversiBoard::new());
    }

    #[test]
    fn capturing_the_last_piece_wins_checkers() {
        let board = CheckersBoard::empty()
            .with_piece(pos(4, 3), Piece::man(Color::White))
            .with_piece(pos(3, 2), Piece::man(Color::Black));
        let mut game = GameSession::<Checkers>::with_selector(board, Box::new(FirstLegalMoveSelector));
        let mv = game.legal_moves()[0].clone();

        game.play_user(&mv).unwrap();

        assert_eq!(game.phase(), Phase::Finished(Outcome::UserWin));
        assert_eq!(game.to_game_state().affected, vec![pos(3, 2).index() as u8]);
        assert_eq!(game.pass(), Err(EngineError::GameOver));
    }

    #[test]
    fn checkers_never_allows_passing() {
        let board = CheckersBoard::empty()
            .with_piece(pos(5, 0), Piece::man(Color::White))
            .with_piece(pos(6, 1), Piece::man(Color::White))
            .with_piece(pos(0, 7), Piece::king(Color::Black));
        let mut game = GameSession::<Checkers>::with_selector(board, Box::new(FirstLegalMoveSelector));

        assert_eq!(game.pass(), Err(EngineError::MustMove));
    }

    #[test]
    fn quiet_plies_end_checkers_in_a_draw() {
        // Two kings shuffle without ever meeting.
        let board = CheckersBoard::empty()
            .with_piece(pos(7, 0), Piece::king(Color::White))
            .with_piece(pos(0, 7), Piece::king(Color::Black));
        let mut game = GameSession::<Checkers>::new(SessionConfig {
            quiet_ply_limit: Some(4),
            ..Default::default()
        });
        game.board = board;

        let shuffle = |from: Position, to: Position| CheckersMove {
            from,
            to,
            captures: Vec::new(),
            becomes_king: false,
        };
        game.play_user(&shuffle(pos(7, 0), pos(6, 1))).unwrap();
        game.selector = Box::new(FixedMoveSelector { mv: shuffle(pos(0, 7), pos(1, 6)) });
        game.play_ai().unwrap();
        game.play_user(&shuffle(pos(6, 1), pos(7, 0))).unwrap();
        assert_eq!(game.phase(), Phase::AiTurn);
        game.selector = Box::new(FixedMoveSelector { mv: shuffle(pos(1, 6), pos(0, 7)) });
        game.play_ai().unwrap();

        assert_eq!(game.phase(), Phase::Finished(Outcome::Draw));
        assert_eq!(game.to_game_state().quiet_plies, 4);
        assert_eq!(
            game.drain_events().last(),
            Some(&GameEvent::Finished { outcome: Outcome::Draw })
        );
    }

    #[test]
    fn default_checkers_draw_limit_is_forty_plies() {
        let game = GameSession::<Checkers>::new(SessionConfig::default());

        assert_eq!(game.quiet_ply_limit, Some(crate::checkers::QUIET_PLY_LIMIT));
        assert_eq!(game.quiet_ply_limit, Some(40));
    }

    #[test]
    fn config_reads_camel_case_with_defaults() {
        let config: SessionConfig = serde::Deserialize::deserialize(
            serde::de::value::MapDeserializer::<_, serde::de::value::Error>::new(
                [("wins", 2u64)].into_iter(),
            ),
        )
        .unwrap();

        assert_eq!(config, SessionConfig { wins: 2, ..Default::default() });
    }
}
