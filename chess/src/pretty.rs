//! Text rendering of the board for debugging

use crate::board::Board;
use crate::movegen::MoveMap;
use crate::moves::MoveKind;
use tilechess_base::types::{File, Piece, Rank, Team, Tile};

use std::fmt::{self, Display};
use std::iter;

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces as chess glyphs and frames as box-drawing characters
    Utf8,
}

struct Glyphs {
    horz: char,
    vert: char,
    angle: char,
    white: char,
    black: char,
    target: char,
    piece: fn(&Piece) -> char,
}

const ASCII: Glyphs = Glyphs {
    horz: '-',
    vert: '|',
    angle: '+',
    white: 'W',
    black: 'B',
    target: '*',
    piece: Piece::as_char,
};

const UTF8: Glyphs = Glyphs {
    horz: '─',
    vert: '│',
    angle: '┼',
    white: '○',
    black: '●',
    target: '·',
    piece: Piece::as_utf8_char,
};

impl PrettyStyle {
    fn glyphs(self) -> &'static Glyphs {
        match self {
            PrettyStyle::Ascii => &ASCII,
            PrettyStyle::Utf8 => &UTF8,
        }
    }
}

/// Wrapper to pretty-print the board
///
/// Every tile takes three columns. With a selected tile, the selected piece is shown as `[p]`
/// and its available moves are marked by kind:
///
/// - ` * ` for a move to an empty tile (`·` in UTF-8 style), including a pawn two-step;
/// - `(p)` for a capture, `(*)` for an en passant capture;
/// - `{p}` for the pawn removed by en passant;
/// - `<R>` for the partner of a castle.
///
/// Below the board, the side to move, the en passant state and the list of the selected
/// tile's moves are printed.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
    selected: Option<Tile>,
}

impl<'a> Pretty<'a> {
    pub(crate) fn new(board: &'a Board, style: PrettyStyle) -> Pretty<'a> {
        Pretty {
            board,
            style,
            selected: None,
        }
    }

    /// Overlays the available moves from `tile`
    ///
    /// # Example
    ///
    /// ```
    /// # use tilechess::{Board, PrettyStyle, Tile};
    /// #
    /// let b = Board::initial();
    /// let s = b.pretty(PrettyStyle::Ascii).select(Tile::from_index(57)).to_string();
    /// assert!(s.contains("40| *  .  *  .  .  .  .  .\n"));
    /// assert!(s.contains("56| R [N] B  Q  K  B  N  R\n"));
    /// assert!(s.ends_with("moves from 57: 40=Advance 42=Advance\n"));
    /// ```
    pub fn select(self, tile: impl Into<Option<Tile>>) -> Pretty<'a> {
        Pretty {
            selected: tile.into(),
            ..self
        }
    }

    fn cell(&self, g: &Glyphs, moves: &MoveMap, tile: Tile) -> [char; 3] {
        let piece = (g.piece)(&self.board.get(tile));
        if self.selected == Some(tile) {
            return ['[', piece, ']'];
        }
        match moves.kind(tile) {
            None => [' ', piece, ' '],
            Some(MoveKind::Advance | MoveKind::PawnTwoStep) => [' ', g.target, ' '],
            Some(MoveKind::Attack) => ['(', piece, ')'],
            Some(MoveKind::EnPassantAttack) => ['(', g.target, ')'],
            Some(MoveKind::EnPassantCapture) => ['{', piece, '}'],
            Some(MoveKind::KingSideCastle | MoveKind::QueenSideCastle) => ['<', piece, '>'],
        }
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let g = self.style.glyphs();
        let moves = match self.selected {
            Some(t) => self.board.available_moves(t),
            None => MoveMap::new(),
        };

        for rank in Rank::iter() {
            let mut line = format!("{:>2}{}", Tile::from_parts(File::A, rank).index(), g.vert);
            for file in File::iter() {
                line.extend(self.cell(g, &moves, Tile::from_parts(file, rank)));
            }
            writeln!(f, "{}", line.trim_end())?;
        }

        let frame: String = [g.horz, g.horz, g.angle]
            .into_iter()
            .chain(iter::repeat(g.horz).take(3 * 8))
            .collect();
        writeln!(f, "{}", frame)?;

        let side = match self.board.side() {
            Team::White => g.white,
            Team::Black => g.black,
        };
        let mut line = format!(" {}{}", side, g.vert);
        for file in File::iter() {
            line += &format!(" {} ", file.index());
        }
        writeln!(f, "{}", line.trim_end())?;

        match self.board.en_passant() {
            Some(ep) => writeln!(f, "en passant: {} captures {}", ep.passing, ep.capture)?,
            None => writeln!(f, "en passant: -")?,
        }

        if let Some(src) = self.selected {
            let mut list: Vec<_> = moves.kinds().collect();
            list.sort_by_key(|&(dst, _)| dst);
            write!(f, "moves from {}:", src)?;
            for (dst, kind) in list {
                write!(f, " {}={:?}", dst, kind)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
