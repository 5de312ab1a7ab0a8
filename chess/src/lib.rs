//! # Tile-indexed chess rules engine
//!
//! The board is a flat array of 64 tiles, indexed row by row. Row 0 is Black's back rank and
//! row 7 is White's back rank, so White pawns move towards lower indices.
//!
//! The engine generates pseudo-legal moves per piece, applies them with full bookkeeping
//! (castling, en passant, pawn two-step, turn order and castling rights) and keeps a log of
//! every applied move. Check detection is not performed.
//!
//! # Example
//!
//! ```
//! use tilechess::{Board, MoveKind, Piece, Tile};
//!
//! let mut board = Board::initial();
//! let moves = board.available_moves(Tile::from_index(52));
//! assert_eq!(moves.kind(Tile::from_index(36)), Some(MoveKind::PawnTwoStep));
//!
//! assert_eq!(board.make_move(Tile::from_index(52), Tile::from_index(36)), Ok(Piece::EMPTY));
//! assert_eq!(board.to_string(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq 44");
//! ```

pub mod board;
pub mod castling;
pub mod history;
pub mod movegen;
pub mod moves;
pub mod pretty;

mod generic;
mod make;

pub use tilechess_base::{geometry, tileset, types};

pub use board::{Board, BoardOption, EnPassantInfo, Placement};
pub use history::{LogEntry, MoveLog};
pub use movegen::MoveMap;
pub use moves::{Effect, Move, MoveError, MoveKind, Relocation};
pub use pretty::{Pretty, PrettyStyle};
pub use tileset::TileSet;
pub use types::{CastleInfo, CastlingSide, File, Piece, Rank, Role, Team, Tile};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_send_sync() {
        assert_send_sync::<Board>();
        assert_send_sync::<MoveMap>();
        assert_send_sync::<MoveLog>();
    }
}
