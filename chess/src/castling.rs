use tilechess_base::geometry;
use tilechess_base::tileset::TileSet;
use tilechess_base::types::{CastlingSide, File, Team, Tile};

/// Tiles strictly between the king and the rook, which must be empty to castle
#[inline]
pub const fn pass(t: Team, s: CastlingSide) -> TileSet {
    let x = match s {
        CastlingSide::King => 0x60,
        CastlingSide::Queen => 0x0e,
    };
    TileSet::from_raw(match t {
        Team::White => x << 56,
        Team::Black => x,
    })
}

#[inline]
pub const fn rook_origin(t: Team, s: CastlingSide) -> Tile {
    let file = match s {
        CastlingSide::King => File::H,
        CastlingSide::Queen => File::A,
    };
    Tile::from_parts(file, geometry::castling_rank(t))
}

#[inline]
pub const fn king_dst(t: Team, s: CastlingSide) -> Tile {
    let file = match s {
        CastlingSide::King => File::G,
        CastlingSide::Queen => File::C,
    };
    Tile::from_parts(file, geometry::castling_rank(t))
}

#[inline]
pub const fn rook_dst(t: Team, s: CastlingSide) -> Tile {
    let file = match s {
        CastlingSide::King => File::F,
        CastlingSide::Queen => File::D,
    };
    Tile::from_parts(file, geometry::castling_rank(t))
}

/// Returns the side whose rook starts on `tile`, if any
pub fn side_by_rook_origin(t: Team, tile: Tile) -> Option<CastlingSide> {
    [CastlingSide::King, CastlingSide::Queen]
        .into_iter()
        .find(|&s| rook_origin(t, s) == tile)
}

pub const ALL_ORIGINS: TileSet = TileSet::from_raw(0x91 | (0x91 << 56));
