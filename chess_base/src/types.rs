use crate::geometry::Delta;

use std::fmt::{self, Display};
use std::hint;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TileParseError {
    #[error("bad tile index: {0}")]
    BadIndex(#[from] std::num::ParseIntError),
    #[error("tile index {0} is out of range")]
    OutOfRange(usize),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PieceParseError {
    #[error("unexpected piece char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TeamParseError {
    #[error("unexpected team char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CastleInfoParseError {
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
    #[error("duplicate char {0:?}")]
    DuplicateChar(char),
    #[error("unexpected empty string")]
    EmptyString,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => File::A,
            1 => File::B,
            2 => File::C,
            3 => File::D,
            4 => File::E,
            5 => File::F,
            6 => File::G,
            7 => File::H,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "file index must be between 0 and 7");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(|x| unsafe { Self::from_index_unchecked(x) })
    }
}

/// Row of the board
///
/// Rows are numbered from the top: [`Rank::R8`] (Black's back rank) is row 0,
/// [`Rank::R1`] (White's back rank) is row 7.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    R8 = 0,
    R7 = 1,
    R6 = 2,
    R5 = 3,
    R4 = 4,
    R3 = 5,
    R2 = 6,
    R1 = 7,
}

impl Rank {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => Rank::R8,
            1 => Rank::R7,
            2 => Rank::R6,
            3 => Rank::R5,
            4 => Rank::R4,
            5 => Rank::R3,
            6 => Rank::R2,
            7 => Rank::R1,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "rank index must be between 0 and 7");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(|x| unsafe { Self::from_index_unchecked(x) })
    }
}

/// Index of one of the 64 tiles
///
/// Tiles are numbered row-major from 0 to 63: `index / 8` is the row (see [`Rank`]),
/// `index % 8` is the file.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(u8);

impl Tile {
    pub const COUNT: usize = 64;

    pub const fn from_index(val: usize) -> Tile {
        assert!(val < 64, "tile must be between 0 and 63");
        Tile(val as u8)
    }

    /// Returns `None` if `val` is outside `0..64`
    ///
    /// Negative values are accepted, so sentinels like `-1` map to `None`.
    pub const fn try_from_index(val: isize) -> Option<Tile> {
        if val < 0 || val >= 64 {
            return None;
        }
        Some(Tile(val as u8))
    }

    pub const fn from_parts(file: File, rank: Rank) -> Tile {
        Tile(((rank as u8) << 3) | file as u8)
    }

    pub const fn file(&self) -> File {
        unsafe { File::from_index_unchecked((self.0 & 7) as usize) }
    }

    pub const fn rank(&self) -> Rank {
        unsafe { Rank::from_index_unchecked((self.0 >> 3) as usize) }
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Steps by `delta`, returning `None` if the step leaves the board
    ///
    /// The board is a flat array, so this is the only place where wraparound from one
    /// row to the next is excluded.
    pub const fn shift(self, delta: Delta) -> Option<Tile> {
        let new_file = self.file().index() as isize + delta.file as isize;
        let new_rank = self.rank().index() as isize + delta.rank as isize;
        if new_file < 0 || new_file >= 8 || new_rank < 0 || new_rank >= 8 {
            return None;
        }
        Some(Tile(((new_rank as u8) << 3) | new_file as u8))
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0_u8..64_u8).map(Tile)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.0 < 64 {
            return write!(f, "Tile({})", self.0);
        }
        write!(f, "Tile(?{:?})", self.0)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Tile {
    type Err = TileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let val = usize::from_str(s)?;
        if val >= 64 {
            return Err(TileParseError::OutOfRange(val));
        }
        Ok(Tile::from_index(val))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Team {
    White = 0,
    Black = 1,
}

impl Team {
    pub const fn inv(&self) -> Team {
        match *self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }

    pub fn as_char(&self) -> char {
        match *self {
            Team::White => 'w',
            Team::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Team> {
        match c {
            'w' => Some(Team::White),
            'b' => Some(Team::Black),
            _ => None,
        }
    }
}

impl Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Team {
    type Err = TeamParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(TeamParseError::BadLength);
        }
        let ch = s.as_bytes()[0] as char;
        Team::from_char(ch).ok_or(TeamParseError::UnexpectedChar(ch))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Role {
    Pawn = 0,
    King = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl Role {
    pub fn iter() -> impl Iterator<Item = Self> {
        [
            Role::Pawn,
            Role::King,
            Role::Knight,
            Role::Bishop,
            Role::Rook,
            Role::Queen,
        ]
        .into_iter()
    }

    /// Returns the lowercase letter of the role
    pub fn as_char(&self) -> char {
        b"pknbrq"[*self as u8 as usize] as char
    }
}

/// Contents of a tile
///
/// An empty tile is a piece value of its own, so "is this tile free" is answered by comparing
/// against [`Piece::EMPTY`] and [`Piece::team()`] returns `None` for it.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Piece {
    #[default]
    Empty,
    Occupied(Team, Role),
}

impl Piece {
    pub const EMPTY: Piece = Piece::Empty;

    pub const fn new(t: Team, r: Role) -> Piece {
        Piece::Occupied(t, r)
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Piece::Empty)
    }

    pub const fn is_occupied(&self) -> bool {
        !self.is_empty()
    }

    pub const fn team(&self) -> Option<Team> {
        match *self {
            Piece::Empty => None,
            Piece::Occupied(t, _) => Some(t),
        }
    }

    pub const fn role(&self) -> Option<Role> {
        match *self {
            Piece::Empty => None,
            Piece::Occupied(_, r) => Some(r),
        }
    }

    /// Returns `true` if the tile holds a piece of the team opposite to `t`
    pub fn is_enemy_of(&self, t: Team) -> bool {
        self.team() == Some(t.inv())
    }

    pub fn as_char(&self) -> char {
        match *self {
            Piece::Empty => '.',
            Piece::Occupied(Team::White, r) => r.as_char().to_ascii_uppercase(),
            Piece::Occupied(Team::Black, r) => r.as_char(),
        }
    }

    pub fn as_utf8_char(&self) -> char {
        match *self {
            Piece::Empty => '.',
            Piece::Occupied(t, r) => {
                let glyphs = match t {
                    Team::White => ['♙', '♔', '♘', '♗', '♖', '♕'],
                    Team::Black => ['♟', '♚', '♞', '♝', '♜', '♛'],
                };
                glyphs[r as u8 as usize]
            }
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Piece::EMPTY);
        }
        let team = if c.is_ascii_uppercase() {
            Team::White
        } else {
            Team::Black
        };
        let role = match c.to_ascii_lowercase() {
            'p' => Role::Pawn,
            'k' => Role::King,
            'n' => Role::Knight,
            'b' => Role::Bishop,
            'r' => Role::Rook,
            'q' => Role::Queen,
            _ => return None,
        };
        Some(Piece::new(team, role))
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Piece({})", self.as_char())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Piece {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Piece::from_char(ch).ok_or(PieceParseError::UnexpectedChar(ch)),
            _ => Err(PieceParseError::BadLength),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    Queen = 0,
    King = 1,
}

/// Forfeited castling rights of both teams
///
/// A right, once forfeited, stays forfeited. There is no way to clear a flag.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CastleInfo(u8);

impl CastleInfo {
    const fn to_index(t: Team, s: CastlingSide) -> u8 {
        ((t as u8) << 1) | s as u8
    }

    /// No right is forfeited
    pub const NONE: CastleInfo = CastleInfo(0);
    /// Every right is forfeited
    pub const ALL: CastleInfo = CastleInfo(15);

    pub const fn is_forfeited(&self, t: Team, s: CastlingSide) -> bool {
        ((self.0 >> Self::to_index(t, s)) & 1) != 0
    }

    pub const fn can_castle(&self, t: Team, s: CastlingSide) -> bool {
        !self.is_forfeited(t, s)
    }

    pub const fn with(self, t: Team, s: CastlingSide) -> CastleInfo {
        CastleInfo(self.0 | (1_u8 << Self::to_index(t, s)))
    }

    pub fn forfeit(&mut self, t: Team, s: CastlingSide) {
        *self = self.with(t, s)
    }

    pub fn forfeit_team(&mut self, t: Team) {
        self.forfeit(t, CastlingSide::King);
        self.forfeit(t, CastlingSide::Queen);
    }
}

impl fmt::Debug for CastleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "CastleInfo({})", self)
    }
}

/// Lists the rights which are still available, in FEN style (`KQkq`, or `-` if none)
impl fmt::Display for CastleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if *self == Self::ALL {
            return write!(f, "-");
        }
        if self.can_castle(Team::White, CastlingSide::King) {
            write!(f, "K")?;
        }
        if self.can_castle(Team::White, CastlingSide::Queen) {
            write!(f, "Q")?;
        }
        if self.can_castle(Team::Black, CastlingSide::King) {
            write!(f, "k")?;
        }
        if self.can_castle(Team::Black, CastlingSide::Queen) {
            write!(f, "q")?;
        }
        Ok(())
    }
}

impl FromStr for CastleInfo {
    type Err = CastleInfoParseError;

    fn from_str(s: &str) -> Result<CastleInfo, Self::Err> {
        type Error = CastleInfoParseError;
        if s == "-" {
            return Ok(CastleInfo::ALL);
        }
        if s.is_empty() {
            return Err(Error::EmptyString);
        }
        let mut available = CastleInfo::NONE;
        for b in s.bytes() {
            let (team, side) = match b {
                b'K' => (Team::White, CastlingSide::King),
                b'Q' => (Team::White, CastlingSide::Queen),
                b'k' => (Team::Black, CastlingSide::King),
                b'q' => (Team::Black, CastlingSide::Queen),
                _ => return Err(Error::UnexpectedChar(b as char)),
            };
            if available.is_forfeited(team, side) {
                return Err(Error::DuplicateChar(b as char));
            }
            available.forfeit(team, side);
        }
        // `available` has a bit set for each listed right, so the forfeited ones are the rest
        Ok(CastleInfo(!available.0 & Self::ALL.0))
    }
}
