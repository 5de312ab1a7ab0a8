//! Move descriptors and move errors

use tilechess_base::types::{CastlingSide, Tile};

use thiserror::Error;

/// Move kind
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    /// Move to an empty tile
    Advance = 0,
    /// Capture of the enemy piece standing on the destination tile
    Attack = 1,
    /// Initial double advance of a pawn
    PawnTwoStep = 2,
    /// Pawn capture by en passant
    ///
    /// The destination is the tile the enemy pawn skipped over, the captured pawn is removed
    /// from the tile given by [`Effect::Remove`].
    EnPassantAttack = 3,
    /// Marks the tile of the pawn removed by the accompanying [`MoveKind::EnPassantAttack`]
    ///
    /// This is an annotation for observers, not a destination that can be chosen.
    EnPassantCapture = 4,
    /// Kingside castling
    KingSideCastle = 5,
    /// Queenside castling
    QueenSideCastle = 6,
}

impl MoveKind {
    /// Returns `true` if the entry only annotates a tile and cannot be requested as a move
    #[inline]
    pub fn is_annotation(self) -> bool {
        self == MoveKind::EnPassantCapture
    }

    #[inline]
    pub fn is_castling(self) -> bool {
        matches!(self, MoveKind::KingSideCastle | MoveKind::QueenSideCastle)
    }
}

impl From<CastlingSide> for MoveKind {
    #[inline]
    fn from(side: CastlingSide) -> Self {
        match side {
            CastlingSide::King => Self::KingSideCastle,
            CastlingSide::Queen => Self::QueenSideCastle,
        }
    }
}

impl TryFrom<MoveKind> for CastlingSide {
    type Error = ();

    #[inline]
    fn try_from(kind: MoveKind) -> Result<Self, Self::Error> {
        match kind {
            MoveKind::KingSideCastle => Ok(Self::King),
            MoveKind::QueenSideCastle => Ok(Self::Queen),
            _ => Err(()),
        }
    }
}

/// Relocation of one piece
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Relocation {
    pub from: Tile,
    pub to: Tile,
}

/// Secondary effect of a move, besides moving the piece from the source to the destination
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Also remove the piece standing on the given tile
    Remove(Tile),
    /// Move king and rook to their castled tiles instead of the plain move
    ///
    /// Both relocations are already normalized, i.e. `king.from` holds the king no matter
    /// whether the move was requested from the king or from the rook.
    Castle { king: Relocation, rook: Relocation },
}

/// Move descriptor
///
/// Produced by the move generator, one per destination tile. A descriptor is only meaningful
/// for the position it was generated from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    kind: MoveKind,
    src: Tile,
    dst: Tile,
    effect: Option<Effect>,
}

impl Move {
    #[inline]
    pub(crate) const fn new(kind: MoveKind, src: Tile, dst: Tile, effect: Option<Effect>) -> Move {
        Move {
            kind,
            src,
            dst,
            effect,
        }
    }

    /// Returns move kind
    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns the tile the move was requested from
    #[inline]
    pub const fn src(&self) -> Tile {
        self.src
    }

    /// Returns the destination tile, which is the key of this move in [`MoveMap`](crate::movegen::MoveMap)
    #[inline]
    pub const fn dst(&self) -> Tile {
        self.dst
    }

    /// Returns the secondary effect of the move, if any
    #[inline]
    pub const fn effect(&self) -> Option<Effect> {
        self.effect
    }
}

/// Error returned when a move cannot be applied
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum MoveError {
    /// The source tile does not hold a piece of the side to move
    #[error("illegal turn")]
    IllegalTurn,
    /// The destination is not among the available moves from the source tile
    #[error("illegal move")]
    IllegalMove,
}
