use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::types::{NUM_SQUARES, Position};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// For every square, the squares along each of the 8 rays, nearest first.
static RAYS: Lazy<Vec<[Vec<Position>; 8]>> = Lazy::new(|| {
    Position::all()
        .map(|origin| {
            DIRECTIONS.map(|(dr, dc)| {
                let mut ray = Vec::new();
                let mut cursor = origin;
                while let Some(next) = cursor.offset(dr, dc) {
                    ray.push(next);
                    cursor = next;
                }
                ray
            })
        })
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Owner {
    User,
    Waifu,
}

impl Owner {
    pub fn opponent(self) -> Self {
        match self {
            Self::User => Self::Waifu,
            Self::Waifu => Self::User,
        }
    }
}

/// A placement together with every stone it converts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReversiMove {
    pub position: Position,
    pub player: Owner,
    /// Opponent stones bounded along the 8 rays, grouped by ray.
    pub flips: Vec<Position>,
}

/// Reversi board state represented by two bitboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    user: u64,
    waifu: u64,
}

impl Board {
    /// Creates the initial board:
    /// waifu on (3,3) and (4,4), user on (3,4) and (4,3).
    pub fn new() -> Self {
        Self {
            user: bit(Position::new(3, 4)) | bit(Position::new(4, 3)),
            waifu: bit(Position::new(3, 3)) | bit(Position::new(4, 4)),
        }
    }

    pub fn empty() -> Self {
        Self::from_bitboards(0, 0)
    }

    /// Builds a board from raw masks, bit `row * 8 + col`.
    /// Squares set in both masks belong to the user.
    pub fn from_bitboards(user: u64, waifu: u64) -> Self {
        Self {
            user,
            waifu: waifu & !user,
        }
    }

    /// Returns a copy with `owner`'s stone on `pos`. Off-board squares are ignored.
    pub fn with_stone(self, pos: Position, owner: Owner) -> Self {
        let square = bit(pos);
        let (mut user, mut waifu) = (self.user & !square, self.waifu & !square);
        match owner {
            Owner::User => user |= square,
            Owner::Waifu => waifu |= square,
        }
        Self { user, waifu }
    }

    /// The owner of `pos`, `None` when empty or off the board.
    pub fn at(&self, pos: Position) -> Option<Owner> {
        let square = bit(pos);
        if self.user & square != 0 {
            Some(Owner::User)
        } else if self.waifu & square != 0 {
            Some(Owner::Waifu)
        } else {
            None
        }
    }

    /// Stones `owner` would flip by playing on `pos`.
    /// Empty when `pos` is occupied, off the board, or flips nothing.
    pub fn flips_for(&self, pos: Position, owner: Owner) -> Vec<Position> {
        if !pos.is_valid() || self.at(pos).is_some() {
            return Vec::new();
        }

        let opponent = owner.opponent();
        let mut flips = Vec::new();
        for ray in &RAYS[pos.index()] {
            let run = ray
                .iter()
                .take_while(|&&square| self.at(square) == Some(opponent))
                .count();
            if run > 0 && ray.get(run).is_some_and(|&end| self.at(end) == Some(owner)) {
                flips.extend_from_slice(&ray[..run]);
            }
        }
        flips
    }

    /// Returns one move per legal empty square, in row-major order.
    pub fn legal_moves(&self, owner: Owner) -> Vec<ReversiMove> {
        Position::all()
            .filter_map(|position| {
                let flips = self.flips_for(position, owner);
                (!flips.is_empty()).then_some(ReversiMove {
                    position,
                    player: owner,
                    flips,
                })
            })
            .collect()
    }

    /// Returns a new board with the stone placed and `mv.flips` converted.
    ///
    /// # Panics
    ///
    /// Panics when `mv.position` is already occupied. Callers must only apply
    /// moves produced by `legal_moves` for this board.
    pub fn with_move_applied(&self, mv: &ReversiMove) -> Self {
        if let Some(owner) = self.at(mv.position) {
            panic!("{:?} is already taken by {owner:?}", mv.position);
        }

        let flips = mv.flips.iter().fold(0u64, |mask, &pos| mask | bit(pos));
        let placed = bit(mv.position) | flips;
        match mv.player {
            Owner::User => Self {
                user: self.user | placed,
                waifu: self.waifu & !flips,
            },
            Owner::Waifu => Self {
                user: self.user & !flips,
                waifu: self.waifu | placed,
            },
        }
    }

    pub fn count(&self, owner: Owner) -> u8 {
        match owner {
            Owner::User => self.user.count_ones() as u8,
            Owner::Waifu => self.waifu.count_ones() as u8,
        }
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.count(Owner::User) - self.count(Owner::Waifu)
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=user, 2=waifu.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in Position::all().zip(board.iter_mut()) {
            *cell = match self.at(pos) {
                None => 0,
                Some(Owner::User) => 1,
                Some(Owner::Waifu) => 2,
            };
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn bit(pos: Position) -> u64 {
    if pos.is_valid() { 1u64 << pos.index() } else { 0 }
}
