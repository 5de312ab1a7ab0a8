use crate::types::Tile;
use derive_more::{BitAnd, BitOr};
use std::fmt;
use std::iter::FromIterator;

/// Set of tiles, bit `i` standing for the tile with index `i`
///
/// Used for occupancy queries, castling paths and move destinations.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, BitAnd, BitOr)]
pub struct TileSet(u64);

impl TileSet {
    pub const EMPTY: TileSet = TileSet(0);

    pub const fn from_raw(val: u64) -> TileSet {
        TileSet(val)
    }

    #[inline]
    const fn bit(tile: Tile) -> u64 {
        1_u64 << tile.index()
    }

    pub const fn with(self, tile: Tile) -> TileSet {
        TileSet(self.0 | Self::bit(tile))
    }

    pub const fn without(self, tile: Tile) -> TileSet {
        TileSet(self.0 & !Self::bit(tile))
    }

    pub const fn has(&self, tile: Tile) -> bool {
        self.0 & Self::bit(tile) != 0
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_nonempty(&self) -> bool {
        !self.is_empty()
    }
}

/// Lists the tile indices in ascending order, e.g. `{3, 40, 52}`
impl fmt::Debug for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_set()
            .entries(self.into_iter().map(|t| t.index()))
            .finish()
    }
}

/// Iterator over the tiles of a [`TileSet`], in ascending index order
pub struct Iter {
    set: TileSet,
    pos: usize,
}

impl Iterator for Iter {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        while self.pos < Tile::COUNT {
            let tile = Tile::from_index(self.pos);
            self.pos += 1;
            if self.set.has(tile) {
                return Some(tile);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(Tile::COUNT - self.pos))
    }
}

impl IntoIterator for TileSet {
    type Item = Tile;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter { set: self, pos: 0 }
    }
}

impl FromIterator<Tile> for TileSet {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        iter.into_iter().fold(TileSet::EMPTY, TileSet::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(indices: &[usize]) -> TileSet {
        indices.iter().map(|&i| Tile::from_index(i)).collect()
    }

    #[test]
    fn test_collect_and_iter() {
        let set = tiles(&[52, 3, 40, 3]);
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.into_iter().map(|t| t.index()).collect::<Vec<_>>(),
            vec![3, 40, 52],
        );
        assert_eq!(set.into_iter().collect::<TileSet>(), set);
        assert_eq!(format!("{:?}", set), "{3, 40, 52}");
        assert_eq!(TileSet::EMPTY.into_iter().next(), None);
    }

    #[test]
    fn test_path_against_occupancy() {
        // Tiles between a king on 60 and a rook on 63
        let path = TileSet::from_raw(0x60 << 56);
        assert_eq!(path, tiles(&[61, 62]));

        let white = tiles(&[56, 60, 63]);
        let black = tiles(&[4, 62]);
        let occupied = white | black;
        assert_eq!(occupied.len(), 5);
        assert!((path & white).is_empty());
        assert!((path & occupied).is_nonempty());
        assert_eq!(path & occupied, tiles(&[62]));
        assert!((path & occupied.without(Tile::from_index(62))).is_empty());
    }

    #[test]
    fn test_membership() {
        let set = tiles(&[0, 63]);
        assert!(set.has(Tile::from_index(0)));
        assert!(set.has(Tile::from_index(63)));
        assert!(!set.has(Tile::from_index(1)));
        assert_eq!(set.with(Tile::from_index(63)), set);
        assert!(set.without(Tile::from_index(0)).has(Tile::from_index(63)));
        assert!(TileSet::default().is_empty());
    }
}
