//! Scanline renderer: background, window and objects for one line.

use super::tiles::tile_number;
use super::{Lcdc, Ppu};
use crate::SCREEN_WIDTH;

const MAX_SPRITES_PER_LINE: usize = 10;

/// One OAM entry as seen by the line renderer.
#[derive(Clone, Copy, Debug)]
struct Sprite {
    /// Screen coordinates of the top-left corner (OAM values minus 16/8).
    y: i16,
    x: i16,
    tile: u8,
    attrs: u8,
    index: usize,
}

impl Sprite {
    const BEHIND_BG: u8 = 0x80;
    const FLIP_Y: u8 = 0x40;
    const FLIP_X: u8 = 0x20;
    const PALETTE_1: u8 = 0x10;

    fn from_oam(index: usize, bytes: &[u8]) -> Self {
        Self {
            y: bytes[0] as i16 - 16,
            x: bytes[1] as i16 - 8,
            tile: bytes[2],
            attrs: bytes[3],
            index,
        }
    }

    #[inline]
    fn has(&self, attr: u8) -> bool {
        self.attrs & attr != 0
    }
}

/// Map a raw colour index through a palette register.
#[inline]
fn shade(palette: u8, index: u8) -> u8 {
    (palette >> (index * 2)) & 0x03
}

impl Ppu {
    /// Render line `ly` into the frame buffer.
    pub(super) fn render_line(&mut self) {
        self.tiles.refresh(&self.vram[..]);

        // Raw background/window colour index per pixel, needed for priority.
        let mut bg_index = [0u8; SCREEN_WIDTH];
        let mut shades = [0u8; SCREEN_WIDTH];

        if self.lcdc.contains(Lcdc::BG_ENABLE) {
            self.render_background(&mut bg_index);
            if self.window_visible() {
                self.render_window(&mut bg_index);
                self.window_line = self.window_line.wrapping_add(1);
            }
            for (shade_out, &index) in shades.iter_mut().zip(bg_index.iter()) {
                *shade_out = shade(self.bgp, index);
            }
        }

        if self.lcdc.contains(Lcdc::OBJ_ENABLE) {
            self.render_sprites(&bg_index, &mut shades);
        }

        let row = self.ly as usize * SCREEN_WIDTH * 4;
        for (x, &level) in shades.iter().enumerate() {
            let offset = row + x * 4;
            self.frame[offset..offset + 4].copy_from_slice(&self.palette[level as usize].rgba());
        }
    }

    fn map_base(&self, high: bool) -> usize {
        if high {
            0x1C00
        } else {
            0x1800
        }
    }

    /// Colour index of the tile-map pixel at (x, y) in the 256x256 map.
    fn map_pixel(&self, map: usize, x: usize, y: usize) -> u8 {
        let entry = self.vram[map + (y / 8) * 32 + x / 8];
        let number = tile_number(entry, self.lcdc.contains(Lcdc::TILE_DATA_LOW));
        self.tiles.pixel(number, x, y)
    }

    fn render_background(&self, out: &mut [u8; SCREEN_WIDTH]) {
        let map = self.map_base(self.lcdc.contains(Lcdc::BG_MAP_HIGH));
        let y = self.ly.wrapping_add(self.scy) as usize;
        for (screen_x, index) in out.iter_mut().enumerate() {
            let x = (screen_x as u8).wrapping_add(self.scx) as usize;
            *index = self.map_pixel(map, x, y);
        }
    }

    fn window_visible(&self) -> bool {
        self.lcdc.contains(Lcdc::WINDOW_ENABLE) && self.ly >= self.wy && self.wx <= 166
    }

    fn render_window(&self, out: &mut [u8; SCREEN_WIDTH]) {
        let map = self.map_base(self.lcdc.contains(Lcdc::WINDOW_MAP_HIGH));
        let origin = self.wx as i16 - 7;
        let y = self.window_line as usize;
        for (screen_x, index) in out.iter_mut().enumerate() {
            let x = screen_x as i16 - origin;
            if x >= 0 {
                *index = self.map_pixel(map, x as usize, y);
            }
        }
    }

    /// Up to ten objects overlapping this line, in drawing priority order.
    fn line_sprites(&self, height: i16) -> Vec<Sprite> {
        let ly = self.ly as i16;
        let mut sprites: Vec<Sprite> = self
            .oam
            .chunks_exact(4)
            .enumerate()
            .map(|(index, bytes)| Sprite::from_oam(index, bytes))
            .filter(|s| ly >= s.y && ly < s.y + height)
            .take(MAX_SPRITES_PER_LINE)
            .collect();
        // Lower X wins, ties go to the earlier OAM entry.
        sprites.sort_by_key(|s| (s.x, s.index));
        sprites
    }

    fn render_sprites(&self, bg_index: &[u8; SCREEN_WIDTH], shades: &mut [u8; SCREEN_WIDTH]) {
        let tall = self.lcdc.contains(Lcdc::OBJ_TALL);
        let height: i16 = if tall { 16 } else { 8 };
        let mut drawn = [false; SCREEN_WIDTH];

        for sprite in self.line_sprites(height) {
            let mut row = (self.ly as i16 - sprite.y) as usize;
            if sprite.has(Sprite::FLIP_Y) {
                row = height as usize - 1 - row;
            }
            let tile = if tall {
                (sprite.tile & 0xFE) as usize + row / 8
            } else {
                sprite.tile as usize
            };
            let palette = if sprite.has(Sprite::PALETTE_1) {
                self.obp1
            } else {
                self.obp0
            };

            for col in 0..8i16 {
                let screen_x = sprite.x + col;
                if !(0..SCREEN_WIDTH as i16).contains(&screen_x) {
                    continue;
                }
                let x = screen_x as usize;
                if drawn[x] {
                    continue;
                }
                let tile_x = (if sprite.has(Sprite::FLIP_X) { 7 - col } else { col }) as usize;
                let index = self.tiles.pixel(tile, tile_x, row);
                if index == 0 {
                    continue;
                }
                drawn[x] = true;
                if sprite.has(Sprite::BEHIND_BG) && bg_index[x] != 0 {
                    continue;
                }
                shades[x] = shade(palette, index);
            }
        }
    }
}
