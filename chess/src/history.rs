//! Move history

use crate::moves::MoveKind;
use tilechess_base::types::{Piece, Team, Tile};

use std::ops::Deref;
use std::slice;

/// Record of one applied move
///
/// `from` and `to` are the tiles exactly as they were requested, so for a castle requested from the
/// rook `from` is the rook's tile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LogEntry {
    from: Tile,
    to: Tile,
    moved: Piece,
    captured: Piece,
    team: Team,
    kind: MoveKind,
}

impl LogEntry {
    pub(crate) fn new(
        from: Tile,
        to: Tile,
        moved: Piece,
        captured: Piece,
        team: Team,
        kind: MoveKind,
    ) -> LogEntry {
        LogEntry {
            from,
            to,
            moved,
            captured,
            team,
            kind,
        }
    }

    #[inline]
    pub fn from(&self) -> Tile {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Tile {
        self.to
    }

    #[inline]
    pub fn moved(&self) -> Piece {
        self.moved
    }

    /// Returns the captured piece, or [`Piece::EMPTY`] if the move captured nothing
    #[inline]
    pub fn captured(&self) -> Piece {
        self.captured
    }

    #[inline]
    pub fn team(&self) -> Team {
        self.team
    }

    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }
}

/// Append-only list of applied moves, oldest first
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveLog(Vec<LogEntry>);

impl MoveLog {
    pub fn new() -> MoveLog {
        MoveLog(Vec::new())
    }

    pub fn as_slice(&self) -> &[LogEntry] {
        &self.0
    }

    pub(crate) fn push(&mut self, entry: LogEntry) {
        self.0.push(entry);
    }
}

impl Deref for MoveLog {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a MoveLog {
    type Item = &'a LogEntry;
    type IntoIter = slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
