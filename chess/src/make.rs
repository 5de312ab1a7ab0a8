//! Applying moves to the board

use crate::board::{Board, EnPassantInfo};
use crate::castling;
use crate::history::LogEntry;
use crate::moves::{Effect, Move, MoveError, MoveKind};
use tilechess_base::types::{Piece, Role, Tile};

use tracing::{debug, trace};

impl Board {
    /// Moves the piece from `from` to `to`, returning the captured piece
    ///
    /// The move must be one of [`Board::available_moves()`] from `from`. A castle is requested by
    /// moving the king onto its rook's tile or the rook onto its king's tile. If nothing was
    /// captured, [`Piece::EMPTY`] is returned.
    ///
    /// On error the board stays unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// # use tilechess::{Board, MoveError, Piece, Tile};
    /// #
    /// let mut board = Board::initial();
    /// let t = Tile::from_index;
    /// assert_eq!(board.make_move(t(52), t(36)), Ok(Piece::EMPTY));
    /// assert_eq!(board.make_move(t(51), t(35)), Err(MoveError::IllegalTurn));
    /// assert_eq!(board.make_move(t(12), t(36)), Err(MoveError::IllegalMove));
    /// assert_eq!(board.move_log().len(), 1);
    /// ```
    pub fn make_move(&mut self, from: Tile, to: Tile) -> Result<Piece, MoveError> {
        let moved = self.get(from);
        if moved.team() != Some(self.side) {
            trace!(%from, %to, side = %self.side, "rejected move: illegal turn");
            return Err(MoveError::IllegalTurn);
        }

        let mv = match self.available_moves(from).get(to) {
            Some(mv) if !mv.kind().is_annotation() => *mv,
            _ => {
                trace!(%from, %to, side = %self.side, "rejected move: illegal move");
                return Err(MoveError::IllegalMove);
            }
        };

        // Everything below must not fail, so that a rejected move leaves no trace
        let team = self.side;
        let captured = self.relocate(&mv);
        self.update_en_passant(&mv);
        self.update_castle_info(&mv, moved, captured);
        self.log.push(LogEntry::new(from, to, moved, captured, team, mv.kind()));
        self.side = team.inv();

        debug!(
            %from,
            %to,
            kind = ?mv.kind(),
            %team,
            %captured,
            "move applied"
        );
        Ok(captured)
    }

    fn take(&mut self, t: Tile) -> Piece {
        std::mem::take(&mut self.tiles[t.index()])
    }

    fn relocate(&mut self, mv: &Move) -> Piece {
        match mv.effect() {
            Some(Effect::Castle { king, rook }) => {
                let king_piece = self.take(king.from);
                let rook_piece = self.take(rook.from);
                self.tiles[king.to.index()] = king_piece;
                self.tiles[rook.to.index()] = rook_piece;
                Piece::EMPTY
            }
            Some(Effect::Remove(victim)) => {
                let piece = self.take(mv.src());
                self.tiles[mv.dst().index()] = piece;
                self.take(victim)
            }
            None => {
                let piece = self.take(mv.src());
                std::mem::replace(&mut self.tiles[mv.dst().index()], piece)
            }
        }
    }

    fn update_en_passant(&mut self, mv: &Move) {
        self.en_passant = match mv.kind() {
            MoveKind::PawnTwoStep => Some(EnPassantInfo {
                passing: Tile::from_index((mv.src().index() + mv.dst().index()) / 2),
                capture: mv.dst(),
            }),
            _ => None,
        };
    }

    fn update_castle_info(&mut self, mv: &Move, moved: Piece, captured: Piece) {
        if mv.kind().is_castling() || moved.role() == Some(Role::King) {
            self.castling.forfeit_team(self.side);
        } else if moved.role() == Some(Role::Rook) {
            if let Some(side) = castling::side_by_rook_origin(self.side, mv.src()) {
                self.castling.forfeit(self.side, side);
            }
        }

        // A rook captured on its corner forfeits that side, whatever piece captured it
        let enemy = self.side.inv();
        if !castling::ALL_ORIGINS.has(mv.dst()) || captured != Piece::new(enemy, Role::Rook) {
            return;
        }
        if let Some(side) = castling::side_by_rook_origin(enemy, mv.dst()) {
            self.castling.forfeit(enemy, side);
        }
    }
}
