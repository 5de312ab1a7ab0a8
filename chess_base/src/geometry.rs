use crate::types::{File, Rank, Team, Tile};

/// Step on the board, in files (towards file H) and ranks (towards row 7, i.e. White's side)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Delta {
    pub file: i8,
    pub rank: i8,
}

impl Delta {
    pub const fn new(file: i8, rank: i8) -> Delta {
        Delta { file, rank }
    }

    pub const fn times(self, k: i8) -> Delta {
        Delta::new(self.file * k, self.rank * k)
    }
}

pub const NORTH: Delta = Delta::new(0, -1);
pub const SOUTH: Delta = Delta::new(0, 1);
pub const EAST: Delta = Delta::new(1, 0);
pub const WEST: Delta = Delta::new(-1, 0);

pub const ROOK_DIRS: [Delta; 4] = [NORTH, SOUTH, EAST, WEST];

pub const BISHOP_DIRS: [Delta; 4] = [
    Delta::new(1, -1),
    Delta::new(-1, -1),
    Delta::new(1, 1),
    Delta::new(-1, 1),
];

pub const QUEEN_DIRS: [Delta; 8] = [
    NORTH,
    SOUTH,
    EAST,
    WEST,
    Delta::new(1, -1),
    Delta::new(-1, -1),
    Delta::new(1, 1),
    Delta::new(-1, 1),
];

pub const KING_STEPS: [Delta; 8] = QUEEN_DIRS;

pub const KNIGHT_STEPS: [Delta; 8] = [
    Delta::new(1, -2),
    Delta::new(-1, -2),
    Delta::new(1, 2),
    Delta::new(-1, 2),
    Delta::new(-2, -1),
    Delta::new(-2, 1),
    Delta::new(2, -1),
    Delta::new(2, 1),
];

pub const fn castling_rank(t: Team) -> Rank {
    match t {
        Team::White => Rank::R1,
        Team::Black => Rank::R8,
    }
}

/// Rank from which the pawns of team `t` may advance by two tiles
pub const fn pawn_home_rank(t: Team) -> Rank {
    match t {
        Team::White => Rank::R2,
        Team::Black => Rank::R7,
    }
}

pub const fn pawn_forward(t: Team) -> Delta {
    match t {
        Team::White => NORTH,
        Team::Black => SOUTH,
    }
}

pub const fn pawn_captures(t: Team) -> [Delta; 2] {
    let fwd = pawn_forward(t);
    [Delta::new(-1, fwd.rank), Delta::new(1, fwd.rank)]
}

pub const fn king_origin(t: Team) -> Tile {
    Tile::from_parts(File::E, castling_rank(t))
}
