use serde::{Deserialize, Serialize};

use crate::types::{BOARD_SIZE, NUM_SQUARES, Position};

const KING_DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const WHITE_DIRECTIONS: [(i32, i32); 2] = [(-1, -1), (-1, 1)];
const BLACK_DIRECTIONS: [(i32, i32); 2] = [(1, -1), (1, 1)];
const START_ROWS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row on which a man of this color is crowned.
    /// White advances toward row 0, black toward row 7.
    pub fn promotion_row(self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => (BOARD_SIZE - 1) as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub color: Color,
    pub is_king: bool,
}

impl Piece {
    pub const fn man(color: Color) -> Self {
        Self { color, is_king: false }
    }

    pub const fn king(color: Color) -> Self {
        Self { color, is_king: true }
    }

    fn directions(self) -> &'static [(i32, i32)] {
        match (self.is_king, self.color) {
            (true, _) => &KING_DIRECTIONS,
            (false, Color::White) => &WHITE_DIRECTIONS,
            (false, Color::Black) => &BLACK_DIRECTIONS,
        }
    }

    fn crowns_on(self, pos: Position) -> bool {
        !self.is_king && pos.row == self.color.promotion_row()
    }
}

/// A single step or a complete jump chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckersMove {
    pub from: Position,
    pub to: Position,
    /// Jumped pieces in landing order. Never repeats a square.
    pub captures: Vec<Position>,
    pub becomes_king: bool,
}

impl CheckersMove {
    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }
}

/// Checkers board. Only dark squares (`(row + col)` odd) are ever occupied
/// through play; move generation keeps it that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the initial board:
    /// black on the dark squares of rows 0-2, white on rows 5-7.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for pos in Position::all().filter(|&pos| is_dark(pos)) {
            let row = pos.row as usize;
            if row < START_ROWS {
                board.set(pos, Some(Piece::man(Color::Black)));
            } else if row >= BOARD_SIZE - START_ROWS {
                board.set(pos, Some(Piece::man(Color::White)));
            }
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Returns a copy with `piece` placed on `pos`. Off-board squares are ignored.
    pub fn with_piece(mut self, pos: Position, piece: Piece) -> Self {
        self.set(pos, Some(piece));
        self
    }

    /// The occupant of `pos`, `None` when empty or off the board.
    pub fn at(&self, pos: Position) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        self.cells[pos.row as usize][pos.col as usize]
    }

    /// Pieces of `color` in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| match self.at(pos) {
            Some(piece) if piece.color == color => Some((pos, piece)),
            _ => None,
        })
    }

    pub fn count(&self, color: Color) -> u8 {
        self.pieces(color).count() as u8
    }

    /// One diagonal step onto an empty square. Men step forward only.
    pub fn regular_moves(&self, pos: Position) -> Vec<CheckersMove> {
        let Some(piece) = self.at(pos) else {
            return Vec::new();
        };

        piece
            .directions()
            .iter()
            .filter_map(|&(dr, dc)| pos.offset(dr, dc))
            .filter(|&to| self.at(to).is_none())
            .map(|to| CheckersMove {
                from: pos,
                to,
                captures: Vec::new(),
                becomes_king: piece.crowns_on(to),
            })
            .collect()
    }

    /// Every complete jump chain starting from `pos`.
    ///
    /// A chain stops as soon as a man lands on its promotion row, even when
    /// further jumps would be available from there.
    pub fn capture_chains(&self, pos: Position) -> Vec<CheckersMove> {
        let Some(piece) = self.at(pos) else {
            return Vec::new();
        };

        let mut chains = Vec::new();
        let mut captured = Vec::new();
        self.extend_chain(pos, pos, piece, &mut captured, &mut chains);
        chains
    }

    fn extend_chain(
        &self,
        origin: Position,
        at: Position,
        piece: Piece,
        captured: &mut Vec<Position>,
        chains: &mut Vec<CheckersMove>,
    ) {
        let mut extended = false;

        for &(dr, dc) in piece.directions() {
            let (Some(over), Some(landing)) = (at.offset(dr, dc), at.offset(2 * dr, 2 * dc)) else {
                continue;
            };
            let is_enemy = matches!(self.at(over), Some(other) if other.color != piece.color);
            if !is_enemy || captured.contains(&over) || self.at(landing).is_some() {
                continue;
            }

            extended = true;
            let mut next = *self;
            next.set(at, None);
            next.set(over, None);
            next.set(landing, Some(piece));
            captured.push(over);

            if piece.crowns_on(landing) {
                chains.push(CheckersMove {
                    from: origin,
                    to: landing,
                    captures: captured.clone(),
                    becomes_king: true,
                });
            } else {
                next.extend_chain(origin, landing, piece, captured, chains);
            }

            captured.pop();
        }

        if !extended && !captured.is_empty() {
            chains.push(CheckersMove {
                from: origin,
                to: at,
                captures: captured.clone(),
                becomes_king: false,
            });
        }
    }

    /// Returns legal moves for `color`. Jumps are mandatory: when any chain
    /// exists, only chains are returned.
    pub fn legal_moves(&self, color: Color) -> Vec<CheckersMove> {
        let captures: Vec<CheckersMove> = self
            .pieces(color)
            .flat_map(|(pos, _)| self.capture_chains(pos))
            .collect();
        if !captures.is_empty() {
            return captures;
        }

        self.pieces(color)
            .flat_map(|(pos, _)| self.regular_moves(pos))
            .collect()
    }

    /// Returns a new board with `mv` applied. The receiver is untouched.
    ///
    /// # Panics
    ///
    /// Panics when `mv.from` is empty. Callers must only apply moves produced
    /// by `legal_moves` for this board.
    pub fn with_move_applied(&self, mv: &CheckersMove) -> Self {
        let Some(mut piece) = self.at(mv.from) else {
            panic!("no piece at {:?} to move", mv.from);
        };
        piece.is_king |= mv.becomes_king;

        let mut next = *self;
        next.set(mv.from, None);
        for &captured in &mv.captures {
            next.set(captured, None);
        }
        next.set(mv.to, Some(piece));
        next
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=white man, 2=black man,
    /// 3=white king, 4=black king.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut cells = [0u8; NUM_SQUARES];
        for (pos, cell) in Position::all().zip(cells.iter_mut()) {
            *cell = match self.at(pos) {
                None => 0,
                Some(Piece { color: Color::White, is_king: false }) => 1,
                Some(Piece { color: Color::Black, is_king: false }) => 2,
                Some(Piece { color: Color::White, is_king: true }) => 3,
                Some(Piece { color: Color::Black, is_king: true }) => 4,
            };
        }
        cells
    }

    fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.cells[pos.row as usize][pos.col as usize] = piece;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_dark(pos: Position) -> bool {
    (pos.row + pos.col) % 2 == 1
}
