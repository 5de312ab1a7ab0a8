//! Move generation

use crate::board::Board;
use crate::moves::{Effect, Move, MoveKind, Relocation};
use crate::{castling, generic};
use tilechess_base::geometry::{self, Delta};
use tilechess_base::tileset::TileSet;
use tilechess_base::types::{CastlingSide, Piece, Role, Team, Tile};

use std::marker::PhantomData;
use std::slice;

use arrayvec::ArrayVec;

/// Available moves from one tile, keyed by destination
///
/// Holds at most one move per destination tile. The order of entries is unspecified, and two maps
/// compare equal if they hold the same set of moves.
#[derive(Default, Debug, Clone)]
pub struct MoveMap(ArrayVec<Move, 32>);

impl MoveMap {
    pub fn new() -> MoveMap {
        MoveMap(ArrayVec::new())
    }

    /// Returns the move with destination `dst`
    pub fn get(&self, dst: Tile) -> Option<&Move> {
        self.0.iter().find(|m| m.dst() == dst)
    }

    /// Returns the kind of the move with destination `dst`
    pub fn kind(&self, dst: Tile) -> Option<MoveKind> {
        self.get(dst).map(Move::kind)
    }

    pub fn contains(&self, dst: Tile) -> bool {
        self.get(dst).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Move> {
        self.0.iter()
    }

    /// Iterates over `(destination, kind)` pairs
    pub fn kinds(&self) -> impl Iterator<Item = (Tile, MoveKind)> + '_ {
        self.0.iter().map(|m| (m.dst(), m.kind()))
    }

    /// Returns all the keys of the map, annotations included
    pub fn destinations(&self) -> TileSet {
        self.0.iter().map(Move::dst).collect()
    }

    fn insert(&mut self, mv: Move) {
        match self.0.iter_mut().find(|m| m.dst() == mv.dst()) {
            Some(old) => *old = mv,
            None => self.0.push(mv),
        }
    }
}

impl PartialEq for MoveMap {
    fn eq(&self, other: &MoveMap) -> bool {
        self.len() == other.len() && self.iter().all(|m| other.get(m.dst()) == Some(m))
    }
}

impl Eq for MoveMap {}

impl<'a> IntoIterator for &'a MoveMap {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

struct MoveGenImpl<'a, C> {
    board: &'a Board,
    src: Tile,
    dst: MoveMap,
    _c: PhantomData<C>,
}

impl<'a, C: generic::Team> MoveGenImpl<'a, C> {
    fn new(board: &'a Board, src: Tile, _c: C) -> Self {
        MoveGenImpl {
            board,
            src,
            dst: MoveMap::new(),
            _c: PhantomData,
        }
    }

    fn add_move(&mut self, kind: MoveKind, dst: Tile, effect: Option<Effect>) {
        self.dst.insert(Move::new(kind, self.src, dst, effect));
    }

    /// Adds a move to `dst` if it's free or holds an enemy piece
    ///
    /// Returns `true` if the tile was free, so that a sliding piece may continue.
    fn add_simple(&mut self, dst: Tile) -> bool {
        let target = self.board.get(dst);
        if target.is_empty() {
            self.add_move(MoveKind::Advance, dst, None);
            return true;
        }
        if target.is_enemy_of(C::TEAM) {
            self.add_move(MoveKind::Attack, dst, None);
        }
        false
    }

    fn gen_slider(&mut self, dirs: &[Delta]) {
        for &dir in dirs {
            let mut cur = self.src;
            while let Some(dst) = cur.shift(dir) {
                if !self.add_simple(dst) {
                    break;
                }
                cur = dst;
            }
        }
    }

    fn gen_leaper(&mut self, steps: &[Delta]) {
        for &step in steps {
            if let Some(dst) = self.src.shift(step) {
                self.add_simple(dst);
            }
        }
    }

    fn gen_pawn_forward(&mut self) {
        let fwd = geometry::pawn_forward(C::TEAM);
        let mut skip_two_step = self.src.rank() != geometry::pawn_home_rank(C::TEAM);
        for (dist, kind) in [(1, MoveKind::Advance), (2, MoveKind::PawnTwoStep)] {
            if dist == 2 && skip_two_step {
                break;
            }
            let dst = match self.src.shift(fwd.times(dist)) {
                Some(dst) => dst,
                None => break,
            };
            if self.board.get(dst).is_occupied() {
                skip_two_step = true;
                continue;
            }
            self.add_move(kind, dst, None);
        }
    }

    fn gen_pawn_capture(&mut self) {
        let enemy_pawn = Piece::new(<C::Inv as generic::Team>::TEAM, Role::Pawn);
        for delta in geometry::pawn_captures(C::TEAM) {
            let dst = match self.src.shift(delta) {
                Some(dst) => dst,
                None => continue,
            };
            let target = self.board.get(dst);
            if target.is_enemy_of(C::TEAM) {
                self.add_move(MoveKind::Attack, dst, None);
                continue;
            }
            if let Some(ep) = self.board.en_passant() {
                if ep.passing == dst && target.is_empty() && self.board.get(ep.capture) == enemy_pawn {
                    self.add_move(MoveKind::EnPassantAttack, dst, Some(Effect::Remove(ep.capture)));
                    self.add_move(MoveKind::EnPassantCapture, ep.capture, None);
                }
            }
        }
    }

    fn gen_castling(&mut self, role: Role) {
        let king = geometry::king_origin(C::TEAM);
        for side in [CastlingSide::King, CastlingSide::Queen] {
            let rook = castling::rook_origin(C::TEAM, side);
            // The castle is requested by moving onto the partner's tile
            let partner = match role {
                Role::King if self.src == king => rook,
                Role::Rook if self.src == rook => king,
                _ => continue,
            };
            if self.board.castle_info().is_forfeited(C::TEAM, side)
                || self.board.get(king) != Piece::new(C::TEAM, Role::King)
                || self.board.get(rook) != Piece::new(C::TEAM, Role::Rook)
                || (castling::pass(C::TEAM, side) & self.board.occupied()).is_nonempty()
            {
                continue;
            }
            let effect = Effect::Castle {
                king: Relocation {
                    from: king,
                    to: castling::king_dst(C::TEAM, side),
                },
                rook: Relocation {
                    from: rook,
                    to: castling::rook_dst(C::TEAM, side),
                },
            };
            self.add_move(MoveKind::from(side), partner, Some(effect));
        }
    }

    fn gen(mut self, role: Role) -> MoveMap {
        match role {
            Role::Rook => {
                self.gen_slider(&geometry::ROOK_DIRS);
                self.gen_castling(role);
            }
            Role::Bishop => self.gen_slider(&geometry::BISHOP_DIRS),
            Role::Queen => self.gen_slider(&geometry::QUEEN_DIRS),
            Role::Knight => self.gen_leaper(&geometry::KNIGHT_STEPS),
            Role::King => {
                self.gen_leaper(&geometry::KING_STEPS);
                self.gen_castling(role);
            }
            Role::Pawn => {
                self.gen_pawn_forward();
                self.gen_pawn_capture();
            }
        }
        self.dst
    }
}

/// Generates the available moves of the piece standing on `src`
///
/// The moves are pseudo-legal: a move leaving the mover's own king under attack is not filtered
/// out. An empty tile yields an empty map. The board is never modified.
pub fn available_moves(b: &Board, src: Tile) -> MoveMap {
    match b.get(src) {
        Piece::Empty => MoveMap::new(),
        Piece::Occupied(Team::White, role) => MoveGenImpl::new(b, src, generic::White).gen(role),
        Piece::Occupied(Team::Black, role) => MoveGenImpl::new(b, src, generic::Black).gen(role),
    }
}

/// Generates all the moves of the side to move, annotations excluded
pub fn gen_all(b: &Board) -> Vec<Move> {
    b.team_tiles(b.side())
        .into_iter()
        .flat_map(|src| available_moves(b, src).0)
        .filter(|m| !m.kind().is_annotation())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardOption, Placement};
    use std::collections::BTreeMap;

    fn tile(idx: usize) -> Tile {
        Tile::from_index(idx)
    }

    fn board(placement: &[(usize, Piece)], side: Team) -> Board {
        Board::new([
            BoardOption::CustomPlacement(
                placement.iter().map(|&(idx, p)| (tile(idx), p)).collect::<Placement>(),
            ),
            BoardOption::StartTeam(side),
        ])
    }

    fn kinds(m: &MoveMap) -> BTreeMap<usize, MoveKind> {
        m.kinds().map(|(t, k)| (t.index(), k)).collect()
    }

    fn set(indices: &[usize]) -> TileSet {
        indices.iter().map(|&i| tile(i)).collect()
    }

    const WR: Piece = Piece::new(Team::White, Role::Rook);
    const BR: Piece = Piece::new(Team::Black, Role::Rook);
    const WN: Piece = Piece::new(Team::White, Role::Knight);
    const WP: Piece = Piece::new(Team::White, Role::Pawn);
    const BP: Piece = Piece::new(Team::Black, Role::Pawn);

    #[test]
    fn test_rook_empty_board() {
        let b = board(&[(0, WR)], Team::White);
        let moves = b.available_moves(tile(0));
        assert_eq!(
            moves.destinations(),
            set(&[1, 2, 3, 4, 5, 6, 7, 8, 16, 24, 32, 40, 48, 56])
        );
        assert!(moves.iter().all(|m| m.kind() == MoveKind::Advance));
        assert!(moves.iter().all(|m| m.src() == tile(0)));
    }

    #[test]
    fn test_rook_blockers() {
        let open = board(&[(0, WR)], Team::White).available_moves(tile(0));

        let enemy = board(&[(0, WR), (7, BR)], Team::White).available_moves(tile(0));
        assert_eq!(enemy.kind(tile(7)), Some(MoveKind::Attack));
        assert_eq!(enemy.destinations(), open.destinations());
        for idx in 1..7 {
            assert_eq!(enemy.kind(tile(idx)), Some(MoveKind::Advance));
        }

        let friend = board(&[(0, WR), (7, WN)], Team::White).available_moves(tile(0));
        assert_eq!(friend.kind(tile(7)), None);
        assert_eq!(friend.destinations(), open.destinations().without(tile(7)));
    }

    #[test]
    fn test_rook_no_wraparound() {
        let b = board(&[(7, WR)], Team::White);
        let moves = b.available_moves(tile(7));
        assert!(!moves.contains(tile(8)));
        assert_eq!(moves.len(), 14);

        let b = board(&[(8, WR)], Team::White);
        let moves = b.available_moves(tile(8));
        assert!(!moves.contains(tile(7)));
        assert_eq!(moves.len(), 14);
    }

    #[test]
    fn test_bishop() {
        let b = board(
            &[(35, Piece::new(Team::White, Role::Bishop)), (17, BP), (53, WP)],
            Team::White,
        );
        let moves = kinds(&b.available_moves(tile(35)));
        let expected = BTreeMap::from([
            (28, MoveKind::Advance),
            (21, MoveKind::Advance),
            (14, MoveKind::Advance),
            (7, MoveKind::Advance),
            (26, MoveKind::Advance),
            (17, MoveKind::Attack),
            (44, MoveKind::Advance),
            (42, MoveKind::Advance),
            (49, MoveKind::Advance),
            (56, MoveKind::Advance),
        ]);
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_queen_corner() {
        let b = board(&[(63, Piece::new(Team::Black, Role::Queen))], Team::Black);
        let moves = b.available_moves(tile(63));
        assert_eq!(moves.len(), 21);
        assert_eq!(moves.kind(tile(0)), Some(MoveKind::Advance));
        assert_eq!(moves.kind(tile(7)), Some(MoveKind::Advance));
        assert_eq!(moves.kind(tile(56)), Some(MoveKind::Advance));
        assert!(!moves.contains(tile(48)));
    }

    #[test]
    fn test_knight() {
        let b = board(&[(57, WN), (40, BP), (51, WP)], Team::White);
        let moves = kinds(&b.available_moves(tile(57)));
        assert_eq!(
            moves,
            BTreeMap::from([(40, MoveKind::Attack), (42, MoveKind::Advance)])
        );

        let b = board(&[(0, WN)], Team::White);
        assert_eq!(b.available_moves(tile(0)).destinations(), set(&[10, 17]));
    }

    #[test]
    fn test_king_without_castling_rights() {
        let b = board(&[(36, Piece::new(Team::White, Role::King)), (28, BP), (35, WP)], Team::White);
        let moves = kinds(&b.available_moves(tile(36)));
        assert_eq!(moves.len(), 7);
        assert_eq!(moves.get(&28), Some(&MoveKind::Attack));
        assert_eq!(moves.get(&35), None);
    }

    #[test]
    fn test_pawn_home_rank() {
        let b = board(&[(52, WP), (11, BP)], Team::White);
        assert_eq!(
            kinds(&b.available_moves(tile(52))),
            BTreeMap::from([(44, MoveKind::Advance), (36, MoveKind::PawnTwoStep)])
        );
        assert_eq!(
            kinds(&b.available_moves(tile(11))),
            BTreeMap::from([(19, MoveKind::Advance), (27, MoveKind::PawnTwoStep)])
        );

        // Blocked single step forbids the double one
        let b = board(&[(52, WP), (44, BP)], Team::White);
        assert!(b.available_moves(tile(52)).is_empty());

        // Blocked double step leaves the single one
        let b = board(&[(52, WP), (36, BP)], Team::White);
        assert_eq!(
            kinds(&b.available_moves(tile(52))),
            BTreeMap::from([(44, MoveKind::Advance)])
        );

        // No double step off the home rank
        let b = board(&[(44, WP)], Team::White);
        assert_eq!(
            kinds(&b.available_moves(tile(44))),
            BTreeMap::from([(36, MoveKind::Advance)])
        );
    }

    #[test]
    fn test_pawn_attacks() {
        let b = board(&[(48, WP), (41, BP), (40, BP), (55, WP), (46, WN)], Team::White);
        assert_eq!(
            kinds(&b.available_moves(tile(48))),
            BTreeMap::from([(41, MoveKind::Attack)])
        );
        assert_eq!(
            kinds(&b.available_moves(tile(55))),
            BTreeMap::from([(47, MoveKind::Advance), (39, MoveKind::PawnTwoStep)])
        );
    }

    #[test]
    fn test_pawn_last_row() {
        let b = board(&[(3, WP), (60, BP)], Team::White);
        assert!(b.available_moves(tile(3)).is_empty());
        assert!(b.available_moves(tile(60)).is_empty());
    }

    #[test]
    fn test_empty_and_out_of_range() {
        let b = Board::initial();
        assert!(b.available_moves(tile(35)).is_empty());
        assert!(b.available_moves_at(-1).is_empty());
        assert!(b.available_moves_at(64).is_empty());
        assert_eq!(b.available_moves_at(52), b.available_moves(tile(52)));
    }

    #[test]
    fn test_initial_counts() {
        let b = Board::initial();
        assert_eq!(gen_all(&b).len(), 20);
        // The rooks are boxed in, so no castling is offered
        assert!(b.available_moves(tile(63)).is_empty());
        assert!(b.available_moves(tile(60)).is_empty());
    }

    #[test]
    fn test_castling_offers() {
        let b = Board::from_layout("r3k2r/8/8/8/8/8/8/R3K2R w KQkq").unwrap();
        let king = kinds(&b.available_moves(tile(60)));
        assert_eq!(king.get(&63), Some(&MoveKind::KingSideCastle));
        assert_eq!(king.get(&56), Some(&MoveKind::QueenSideCastle));
        assert_eq!(
            kinds(&b.available_moves(tile(63))).get(&60),
            Some(&MoveKind::KingSideCastle)
        );
        assert_eq!(
            kinds(&b.available_moves(tile(56))).get(&60),
            Some(&MoveKind::QueenSideCastle)
        );
        assert_eq!(
            kinds(&b.available_moves(tile(4))).get(&0),
            Some(&MoveKind::QueenSideCastle)
        );

        let mv = *b.available_moves(tile(63)).get(tile(60)).unwrap();
        assert_eq!(
            mv.effect(),
            Some(Effect::Castle {
                king: Relocation {
                    from: tile(60),
                    to: tile(62)
                },
                rook: Relocation {
                    from: tile(63),
                    to: tile(61)
                },
            })
        );
    }

    #[test]
    fn test_castling_blocked() {
        // Forfeited right
        let b = Board::from_layout("r3k2r/8/8/8/8/8/8/R3K2R w Qkq").unwrap();
        assert_eq!(b.available_moves(tile(63)).kind(tile(60)), None);
        assert_eq!(b.available_moves(tile(60)).kind(tile(63)), None);
        assert_eq!(
            b.available_moves(tile(60)).kind(tile(56)),
            Some(MoveKind::QueenSideCastle)
        );

        // Piece in between, of either team
        let b = Board::from_layout("r3k2r/8/8/8/8/8/8/Rn2K1NR w KQkq").unwrap();
        assert_eq!(b.available_moves(tile(60)).kind(tile(63)), None);
        assert_eq!(b.available_moves(tile(60)).kind(tile(56)), None);

        // Partner is missing
        let b = Board::from_layout("4k3/8/8/8/8/8/8/4K2R w KQkq").unwrap();
        assert_eq!(b.available_moves(tile(60)).kind(tile(56)), None);
        assert_eq!(
            b.available_moves(tile(60)).kind(tile(63)),
            Some(MoveKind::KingSideCastle)
        );

        // Rook not on its corner
        let b = Board::from_layout("4k3/8/8/8/8/8/8/4K1R1 w KQkq").unwrap();
        assert!(b
            .available_moves(tile(62))
            .iter()
            .all(|m| !m.kind().is_castling()));
    }

    #[test]
    fn test_en_passant_annotation() {
        let mut b = board(&[(52, WP), (35, BP)], Team::White);
        b.make_move(tile(52), tile(36)).unwrap();
        let moves = b.available_moves(tile(35));
        assert_eq!(
            kinds(&moves),
            BTreeMap::from([
                (43, MoveKind::Advance),
                (44, MoveKind::EnPassantAttack),
                (36, MoveKind::EnPassantCapture),
            ])
        );
        assert_eq!(
            moves.get(tile(44)).and_then(Move::effect),
            Some(Effect::Remove(tile(36)))
        );
        assert!(gen_all(&b).iter().all(|m| m.kind() != MoveKind::EnPassantCapture));
    }

    #[test]
    fn test_purity() {
        let b = Board::from_layout("r3k2r/pppq1ppp/2n5/3pP3/8/2N5/PPP2PPP/R3K2R w KQkq").unwrap();
        let before = b.clone();
        for src in Tile::iter() {
            assert_eq!(b.available_moves(src), b.available_moves(src));
        }
        assert_eq!(b, before);
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let mut m1 = MoveMap::new();
        let mut m2 = MoveMap::new();
        let a = Move::new(MoveKind::Advance, tile(0), tile(1), None);
        let c = Move::new(MoveKind::Attack, tile(0), tile(2), None);
        m1.insert(a);
        m1.insert(c);
        m2.insert(c);
        m2.insert(a);
        assert_eq!(m1, m2);
        m2.insert(Move::new(MoveKind::Advance, tile(0), tile(2), None));
        assert_eq!(m2.len(), 2);
        assert_ne!(m1, m2);
    }
}
