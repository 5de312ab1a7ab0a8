//! Board and related things

use crate::history::MoveLog;
use crate::movegen::{self, MoveMap};
use crate::pretty::{Pretty, PrettyStyle};
use tilechess_base::geometry;
use tilechess_base::tileset::TileSet;
use tilechess_base::types::{
    self, CastleInfo, File, Piece, Rank, Role, Team, Tile,
};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Error parsing [`Placement`] from the piece placement part of FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PlacementParseError {
    /// Rank is too large
    #[error("too many items in rank {0:?}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0:?}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Error parsing [`Board`] from a layout string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum LayoutParseError {
    /// Layout contains non-ASCII characters
    #[error("non-ASCII data in layout")]
    NonAscii,
    /// Layout doesn't have placement part
    #[error("placement not specified")]
    NoPlacement,
    /// Error parsing placement
    #[error("bad placement: {0}")]
    Placement(#[from] PlacementParseError),
    /// Layout doesn't have the side to move
    #[error("no move side")]
    NoMoveSide,
    /// Error parsing the side to move
    #[error("bad move side: {0}")]
    MoveSide(#[from] types::TeamParseError),
    /// Error parsing castling rights
    #[error("bad castling rights: {0}")]
    Castling(#[from] types::CastleInfoParseError),
    /// Error parsing the en passant tile
    #[error("bad en passant tile: {0}")]
    EnPassant(#[from] types::TileParseError),
    /// En passant tile cannot be skipped by a pawn of the side which just moved
    #[error("tile {0} cannot be passed by a pawn two-step")]
    BadEnPassant(Tile),
    /// Layout contains extra data
    #[error("extra data in layout")]
    ExtraData,
}

/// Pieces to put onto the board, in order
///
/// If the same tile is listed twice, the later piece wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Placement(Vec<(Tile, Piece)>);

impl Placement {
    pub fn new() -> Placement {
        Placement(Vec::new())
    }

    /// Returns the standard initial placement of all 32 pieces
    pub fn standard() -> Placement {
        let mut res = Placement::new();
        for file in File::iter() {
            res.put(Tile::from_parts(file, Rank::R2), Piece::new(Team::White, Role::Pawn));
            res.put(Tile::from_parts(file, Rank::R7), Piece::new(Team::Black, Role::Pawn));
        }
        let back = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];
        for (team, rank) in [(Team::White, Rank::R1), (Team::Black, Rank::R8)] {
            for (file, role) in File::iter().zip(back) {
                res.put(Tile::from_parts(file, rank), Piece::new(team, role));
            }
        }
        res
    }

    pub fn put(&mut self, tile: Tile, piece: Piece) {
        self.0.push((tile, piece));
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tile, Piece)> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<(Tile, Piece)> for Placement {
    fn from_iter<I: IntoIterator<Item = (Tile, Piece)>>(iter: I) -> Self {
        Placement(iter.into_iter().collect())
    }
}

/// Parses the piece placement part of FEN, listing only the occupied tiles
impl FromStr for Placement {
    type Err = PlacementParseError;

    fn from_str(s: &str) -> Result<Placement, Self::Err> {
        type Error = PlacementParseError;

        let mut file = 0_usize;
        let mut rank = 0_usize;
        let mut pos = 0_usize;
        let mut res = Placement::new();
        for b in s.bytes() {
            match b {
                b'1'..=b'8' => {
                    let add = (b - b'0') as usize;
                    if file + add > 8 {
                        return Err(Error::RankOverflow(Rank::from_index(rank)));
                    }
                    file += add;
                    pos += add;
                }
                b'/' => {
                    if file < 8 {
                        return Err(Error::RankUnderflow(Rank::from_index(rank)));
                    }
                    rank += 1;
                    file = 0;
                    if rank >= 8 {
                        return Err(Error::Overflow);
                    }
                }
                _ => {
                    if file >= 8 {
                        return Err(Error::RankOverflow(Rank::from_index(rank)));
                    }
                    let piece = match Piece::from_char(b as char) {
                        Some(p) if p.is_occupied() => p,
                        _ => return Err(Error::UnexpectedChar(b as char)),
                    };
                    res.put(Tile::from_index(pos), piece);
                    file += 1;
                    pos += 1;
                }
            };
        }

        if file < 8 {
            return Err(Error::RankUnderflow(Rank::from_index(rank)));
        }
        if rank < 7 {
            return Err(Error::Underflow);
        }

        Ok(res)
    }
}

/// Board construction option
///
/// Options are applied in order onto an empty board with White to move and no castling right
/// forfeited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardOption {
    /// Put all 32 pieces onto their standard initial tiles
    StandardPlacement,
    /// Put the given pieces, overwriting the tiles placed before
    CustomPlacement(Placement),
    /// Set the side which moves first
    StartTeam(Team),
    /// Set forfeited castling rights
    Castling(CastleInfo),
}

/// Tiles of the pawn that has just advanced by two
///
/// Valid only for the move immediately following the double advance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EnPassantInfo {
    /// Tile the pawn skipped over, the destination of the capturing pawn
    pub passing: Tile,
    /// Tile of the pawn which gets removed
    pub capture: Tile,
}

/// Chess board
///
/// Owns the whole game state: tile contents, side to move, en passant tracking, castling rights
/// and the move log. Move generation borrows the board immutably, while [`Board::make_move()`]
/// borrows it mutably, so a move is never observed half-applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) tiles: [Piece; Tile::COUNT],
    pub(crate) side: Team,
    pub(crate) en_passant: Option<EnPassantInfo>,
    pub(crate) castling: CastleInfo,
    pub(crate) log: MoveLog,
}

impl Board {
    /// Creates a board by applying `options` in order
    ///
    /// # Example
    ///
    /// ```
    /// # use tilechess::{Board, BoardOption, Placement, Piece, Role, Team, Tile};
    /// #
    /// let placement: Placement = [(Tile::from_index(36), Piece::new(Team::Black, Role::Queen))]
    ///     .into_iter()
    ///     .collect();
    /// let board = Board::new([
    ///     BoardOption::StandardPlacement,
    ///     BoardOption::CustomPlacement(placement),
    ///     BoardOption::StartTeam(Team::Black),
    /// ]);
    /// assert_eq!(board.get(Tile::from_index(36)), Piece::new(Team::Black, Role::Queen));
    /// assert_eq!(board.side(), Team::Black);
    /// ```
    pub fn new(options: impl IntoIterator<Item = BoardOption>) -> Board {
        let mut res = Board {
            tiles: [Piece::EMPTY; Tile::COUNT],
            side: Team::White,
            en_passant: None,
            castling: CastleInfo::NONE,
            log: MoveLog::new(),
        };
        for opt in options {
            res.apply_option(opt);
        }
        res
    }

    fn apply_option(&mut self, opt: BoardOption) {
        match opt {
            BoardOption::StandardPlacement => self.place(&Placement::standard()),
            BoardOption::CustomPlacement(p) => self.place(&p),
            BoardOption::StartTeam(t) => self.side = t,
            BoardOption::Castling(c) => self.castling = c,
        }
    }

    fn place(&mut self, p: &Placement) {
        for (tile, piece) in p.iter() {
            self.tiles[tile.index()] = piece;
        }
    }

    /// Returns an empty board with White to move
    pub fn empty() -> Board {
        Board::new([])
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        Board::new([BoardOption::StandardPlacement])
    }

    /// Parses a board from a layout string
    ///
    /// The layout is the FEN piece placement, followed by the side to move and, optionally,
    /// the castling rights which are still available (`-` if none). Rights omitted from the
    /// list are forfeited, and omitting the whole field keeps all of them. The last optional
    /// field is the index of the tile skipped by a pawn two-step on the previous move (`-` if
    /// none).
    ///
    /// Does the same as [`Board::from_str`].
    ///
    /// # Example
    ///
    /// ```
    /// # use tilechess::{Board, Team, CastlingSide};
    /// #
    /// let board = Board::from_layout("r3k2r/8/8/8/8/8/8/R3K2R b Kq").unwrap();
    /// assert_eq!(board.side(), Team::Black);
    /// assert!(board.castle_info().can_castle(Team::White, CastlingSide::King));
    /// assert!(board.castle_info().is_forfeited(Team::White, CastlingSide::Queen));
    /// ```
    pub fn from_layout(s: &str) -> Result<Board, LayoutParseError> {
        Board::from_str(s)
    }

    /// Returns the contents of the tile `t`
    #[inline]
    pub fn get(&self, t: Tile) -> Piece {
        self.tiles[t.index()]
    }

    /// Returns the contents of all the tiles, indexed by tile index
    #[inline]
    pub fn tiles(&self) -> &[Piece; Tile::COUNT] {
        &self.tiles
    }

    /// Returns side to move
    #[inline]
    pub fn side(&self) -> Team {
        self.side
    }

    /// Returns the en passant state left by the previous move
    #[inline]
    pub fn en_passant(&self) -> Option<EnPassantInfo> {
        self.en_passant
    }

    /// Returns the forfeited castling rights
    #[inline]
    pub fn castle_info(&self) -> CastleInfo {
        self.castling
    }

    /// Returns all the moves applied to this board, oldest first
    #[inline]
    pub fn move_log(&self) -> &MoveLog {
        &self.log
    }

    /// Returns the set of tiles occupied by team `t`
    pub fn team_tiles(&self, t: Team) -> TileSet {
        Tile::iter()
            .filter(|&tile| self.get(tile).team() == Some(t))
            .collect()
    }

    /// Returns the set of all occupied tiles
    pub fn occupied(&self) -> TileSet {
        self.team_tiles(Team::White) | self.team_tiles(Team::Black)
    }

    /// Returns the available moves of the piece on `t`
    ///
    /// See [`movegen::available_moves()`] for details.
    #[inline]
    pub fn available_moves(&self, t: Tile) -> MoveMap {
        movegen::available_moves(self, t)
    }

    /// Same as [`Board::available_moves()`], but takes a raw index
    ///
    /// Indices outside `0..64` (like `-1` for "no selection") yield an empty map.
    #[inline]
    pub fn available_moves_at(&self, index: isize) -> MoveMap {
        match Tile::try_from_index(index) {
            Some(t) => self.available_moves(t),
            None => MoveMap::new(),
        }
    }

    /// Wraps the board to allow pretty-printing with the given style
    ///
    /// The resulting wrapper implements [`fmt::Display`]. Use [`Pretty::select()`] to overlay
    /// the available moves of one tile.
    ///
    /// # Example
    ///
    /// ```
    /// # use tilechess::{Board, PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    ///  0| r  n  b  q  k  b  n  r
    ///  8| p  p  p  p  p  p  p  p
    /// 16| .  .  .  .  .  .  .  .
    /// 24| .  .  .  .  .  .  .  .
    /// 32| .  .  .  .  .  .  .  .
    /// 40| .  .  .  .  .  .  .  .
    /// 48| P  P  P  P  P  P  P  P
    /// 56| R  N  B  Q  K  B  N  R
    /// --+------------------------
    ///  W| 0  1  2  3  4  5  6  7
    /// en passant: -
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty::new(self, style)
    }

    /// Converts the board into a layout string
    ///
    /// Does the same as `Board::to_string()`. The layout holds the position only: parsing it
    /// back gives an equal position with an empty move log. The en passant field is written
    /// only while a pawn two-step can be answered.
    #[inline]
    pub fn as_layout(&self) -> String {
        self.to_string()
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

impl FromStr for Board {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        type Error = LayoutParseError;

        if !s.is_ascii() {
            return Err(Error::NonAscii);
        }
        let mut iter = s.split(' ').fuse();

        let placement = Placement::from_str(iter.next().ok_or(Error::NoPlacement)?)?;
        let side = Team::from_str(iter.next().ok_or(Error::NoMoveSide)?)?;
        let castling = match iter.next() {
            Some(s) => CastleInfo::from_str(s)?,
            None => CastleInfo::NONE,
        };
        let en_passant = match iter.next() {
            Some("-") | None => None,
            Some(s) => {
                let passing = Tile::from_str(s)?;
                let info = en_passant_by_passing(side, passing);
                Some(info.ok_or(Error::BadEnPassant(passing))?)
            }
        };

        if iter.next().is_some() {
            return Err(Error::ExtraData);
        }

        let mut res = Board::new([
            BoardOption::CustomPlacement(placement),
            BoardOption::StartTeam(side),
            BoardOption::Castling(castling),
        ]);
        res.en_passant = en_passant;
        Ok(res)
    }
}

/// Restores the en passant state from the skipped tile, given the side to move
fn en_passant_by_passing(side: Team, passing: Tile) -> Option<EnPassantInfo> {
    let mover = side.inv();
    let fwd = geometry::pawn_forward(mover);
    let origin = passing.shift(fwd.times(-1))?;
    if origin.rank() != geometry::pawn_home_rank(mover) {
        return None;
    }
    Some(EnPassantInfo {
        passing,
        capture: passing.shift(fwd)?,
    })
}

fn format_tiles(tiles: &[Piece; Tile::COUNT], f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
    for rank in Rank::iter() {
        if rank.index() != 0 {
            write!(f, "/")?;
        }
        let mut empty = 0;
        for file in File::iter() {
            let piece = tiles[Tile::from_parts(file, rank).index()];
            if piece.is_empty() {
                empty += 1;
                continue;
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
                empty = 0;
            }
            write!(f, "{}", piece)?;
        }
        if empty != 0 {
            write!(f, "{}", (b'0' + empty) as char)?;
        }
    }
    Ok(())
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        format_tiles(&self.tiles, f)?;
        write!(f, " {} {}", self.side, self.castling)?;
        if let Some(ep) = self.en_passant {
            write!(f, " {}", ep.passing)?;
        }
        Ok(())
    }
}
