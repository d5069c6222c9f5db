//! Decoded tile cache and the tile-atlas debug image.

use dotmatrix_common::Color;

/// Tiles in the 0x8000-0x97FF tile data area.
pub const TILE_COUNT: usize = 384;
/// Atlas layout: 16 tiles across, 24 down.
pub const ATLAS_WIDTH: usize = 16 * 8;
pub const ATLAS_HEIGHT: usize = 24 * 8;

/// One tile as 8x8 colour indices (0..=3), row-major.
pub type Tile = [u8; 64];

/// Every tile of VRAM decoded into colour indices.
///
/// Rebuilt from VRAM on the first scanline after tile data changed.
#[derive(Clone)]
pub struct TileCache {
    tiles: Box<[Tile; TILE_COUNT]>,
    dirty: bool,
}

impl Default for TileCache {
    fn default() -> Self {
        Self {
            tiles: Box::new([[0; 64]; TILE_COUNT]),
            dirty: true,
        }
    }
}

/// Decode one 16-byte tile. Each row is two bit planes, low plane first,
/// with the leftmost pixel in bit 7.
pub fn decode_tile(bytes: &[u8]) -> Tile {
    let mut tile = [0u8; 64];
    for (row, plane) in bytes.chunks_exact(2).take(8).enumerate() {
        let (lo, hi) = (plane[0], plane[1]);
        for col in 0..8 {
            let bit = 7 - col;
            tile[row * 8 + col] = ((hi >> bit) & 1) << 1 | ((lo >> bit) & 1);
        }
    }
    tile
}

impl TileCache {
    #[inline]
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Re-decode all tiles from the first 0x1800 bytes of VRAM if needed.
    pub fn refresh(&mut self, vram: &[u8]) {
        if !self.dirty {
            return;
        }
        for (tile, bytes) in self.tiles.iter_mut().zip(vram.chunks_exact(16)) {
            *tile = decode_tile(bytes);
        }
        self.dirty = false;
    }

    #[inline]
    pub fn tile(&self, number: usize) -> &Tile {
        &self.tiles[number % TILE_COUNT]
    }

    /// Colour index at (x, y) of a tile.
    #[inline]
    pub fn pixel(&self, number: usize, x: usize, y: usize) -> u8 {
        self.tile(number)[(y & 7) * 8 + (x & 7)]
    }

    /// Render all tiles into a `ATLAS_WIDTH` x `ATLAS_HEIGHT` RGBA image.
    pub fn render_atlas(&self, palette: &[Color; 4], out: &mut [u8]) {
        for (number, tile) in self.tiles.iter().enumerate() {
            let origin_x = (number % 16) * 8;
            let origin_y = (number / 16) * 8;
            for (i, &index) in tile.iter().enumerate() {
                let x = origin_x + i % 8;
                let y = origin_y + i / 8;
                let offset = (y * ATLAS_WIDTH + x) * 4;
                out[offset..offset + 4].copy_from_slice(&palette[index as usize].rgba());
            }
        }
    }
}

/// Tile number addressed by a map entry under the given addressing mode.
#[inline]
pub fn tile_number(index: u8, unsigned_mode: bool) -> usize {
    if unsigned_mode {
        index as usize
    } else {
        // 0x9000-based signed addressing: tiles 256..=383 then 128..=255.
        (256 + index as i8 as isize) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_bit_planes() {
        // Row 0: lo=0b1010_0000 hi=0b1100_0000 -> 3, 2, 1, 0, ...
        let mut bytes = [0u8; 16];
        bytes[0] = 0b1010_0000;
        bytes[1] = 0b1100_0000;
        let tile = decode_tile(&bytes);
        assert_eq!(&tile[..4], &[3, 2, 1, 0]);
        assert!(tile[8..].iter().all(|&p| p == 0));
    }

    #[test]
    fn signed_addressing_maps_around_0x9000() {
        assert_eq!(tile_number(0x00, false), 256);
        assert_eq!(tile_number(0x7F, false), 383);
        assert_eq!(tile_number(0x80, false), 128);
        assert_eq!(tile_number(0xFF, false), 255);
        assert_eq!(tile_number(0x80, true), 128);
    }
}
