//! Display controller.
//!
//! Time is counted in dots (T-cycles). Each of the 154 lines lasts 456
//! dots; lines 0-143 cycle through OAM scan (80 dots), pixel transfer
//! (172 dots) and HBlank, lines 144-153 are VBlank. A visible line is
//! rendered in one go when its 456 dots have elapsed.

mod registers;
mod render;
mod tiles;

pub use registers::{Lcdc, Mode, StatSelect};
pub use tiles::{decode_tile, ATLAS_HEIGHT, ATLAS_WIDTH};

use dotmatrix_common::Color;

use self::tiles::TileCache;
use super::{Interrupts, Memory};
use crate::config::DEFAULT_PALETTE;
use crate::error::GbError;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub const LINE_DOTS: u32 = 456;
pub const LINES_PER_FRAME: u8 = 154;
pub const VBLANK_LINE: u8 = 144;
const OAM_SCAN_END: u32 = 80;
const TRANSFER_END: u32 = OAM_SCAN_END + 172;

const VRAM_SIZE: usize = 0x2000;
const OAM_SIZE: usize = 0xA0;
/// Tile data occupies VRAM below the tile maps.
const TILE_DATA_END: u16 = 0x9800;

#[derive(Clone)]
pub struct Ppu {
    vram: Box<[u8; VRAM_SIZE]>,
    oam: [u8; OAM_SIZE],
    lcdc: Lcdc,
    stat_select: StatSelect,
    scy: u8,
    scx: u8,
    ly: u8,
    lyc: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,
    wy: u8,
    wx: u8,
    /// Dot within the current line, 0..LINE_DOTS.
    dot: u32,
    /// Level of the ORed STAT interrupt sources.
    stat_line: bool,
    /// Window row to draw next; advances only on lines that show the window.
    window_line: u8,
    tiles: TileCache,
    palette: [Color; 4],
    frame: Vec<u8>,
    frames: u64,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE)
    }
}

impl Ppu {
    /// PPU with the register state the boot ROM leaves behind.
    pub fn new(palette: [Color; 4]) -> Self {
        let mut ppu = Self {
            vram: Box::new([0; VRAM_SIZE]),
            oam: [0; OAM_SIZE],
            lcdc: Lcdc::from_bits_retain(0x91),
            stat_select: StatSelect::empty(),
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            bgp: 0xFC,
            obp0: 0xFF,
            obp1: 0xFF,
            wy: 0,
            wx: 0,
            dot: 0,
            stat_line: false,
            window_line: 0,
            tiles: TileCache::default(),
            palette,
            frame: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT * 4],
            frames: 0,
        };
        ppu.clear_frame();
        ppu
    }

    #[inline]
    pub fn lcd_enabled(&self) -> bool {
        self.lcdc.contains(Lcdc::LCD_ENABLE)
    }

    #[inline]
    pub fn ly(&self) -> u8 {
        self.ly
    }

    /// Frames completed (VBlank entries) since power-on.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current frame as 160x144 RGBA.
    pub fn frame_buffer(&self) -> &[u8] {
        &self.frame
    }

    pub fn mode(&self) -> Mode {
        if !self.lcd_enabled() {
            Mode::HBlank
        } else if self.ly >= VBLANK_LINE {
            Mode::VBlank
        } else if self.dot < OAM_SCAN_END {
            Mode::OamScan
        } else if self.dot < TRANSFER_END {
            Mode::Transfer
        } else {
            Mode::HBlank
        }
    }

    /// Next dot at which the mode can change.
    fn next_boundary(&self) -> u32 {
        if self.ly >= VBLANK_LINE || self.dot >= TRANSFER_END {
            LINE_DOTS
        } else if self.dot >= OAM_SCAN_END {
            TRANSFER_END
        } else {
            OAM_SCAN_END
        }
    }

    /// Advance by `cycles` dots and report the interrupts raised.
    pub fn step(&mut self, cycles: u32) -> Interrupts {
        let mut raised = Interrupts::empty();
        if !self.lcd_enabled() {
            return raised;
        }

        let mut remaining = cycles;
        while remaining > 0 {
            let advance = remaining.min(self.next_boundary() - self.dot);
            self.dot += advance;
            remaining -= advance;

            if self.dot == LINE_DOTS {
                self.dot = 0;
                raised |= self.finish_line();
            }
            raised |= self.update_stat_line();
        }
        raised
    }

    /// End-of-line work: render a visible line, advance LY.
    fn finish_line(&mut self) -> Interrupts {
        if self.ly < VBLANK_LINE {
            self.render_line();
        }

        self.ly = (self.ly + 1) % LINES_PER_FRAME;
        match self.ly {
            VBLANK_LINE => {
                self.frames += 1;
                log::debug!("GB PPU: VBlank, frame {}", self.frames);
                Interrupts::VBLANK
            }
            0 => {
                self.window_line = 0;
                Interrupts::empty()
            }
            _ => Interrupts::empty(),
        }
    }

    /// Recompute the ORed STAT source line; a rising edge requests INT $48.
    fn update_stat_line(&mut self) -> Interrupts {
        let line = self.lcd_enabled()
            && ((self.stat_select.contains(StatSelect::LYC) && self.ly == self.lyc)
                || self.stat_select.intersects(self.mode().select()));
        let rising = line && !self.stat_line;
        self.stat_line = line;
        if rising {
            log::trace!("GB PPU: STAT rising edge LY={} mode={:?}", self.ly, self.mode());
            Interrupts::LCD_STAT
        } else {
            Interrupts::empty()
        }
    }

    fn stat(&self) -> u8 {
        let coincidence = if self.ly == self.lyc { 0x04 } else { 0 };
        0x80 | self.stat_select.bits() | coincidence | self.mode() as u8
    }

    fn clear_frame(&mut self) {
        let white = self.palette[0].rgba();
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&white);
        }
    }

    fn write_lcdc(&mut self, value: u8) {
        let was_on = self.lcd_enabled();
        let old_select = self.lcdc.contains(Lcdc::TILE_DATA_LOW);
        self.lcdc = Lcdc::from_bits_retain(value);
        if old_select != self.lcdc.contains(Lcdc::TILE_DATA_LOW) {
            self.tiles.invalidate();
        }

        match (was_on, self.lcd_enabled()) {
            (true, false) => {
                log::debug!("GB PPU: LCD off at LY={}", self.ly);
                self.ly = 0;
                self.dot = 0;
                self.window_line = 0;
                self.stat_line = false;
                self.clear_frame();
            }
            (false, true) => log::debug!("GB PPU: LCD on"),
            _ => {}
        }
    }

    /// Read a register in FF40..=FF4B (DMA excluded).
    pub fn read_register(&self, addr: u16) -> Result<u8, GbError> {
        let value = match addr {
            0xFF40 => self.lcdc.bits(),
            0xFF41 => self.stat(),
            0xFF42 => self.scy,
            0xFF43 => self.scx,
            0xFF44 => self.ly,
            0xFF45 => self.lyc,
            0xFF47 => self.bgp,
            0xFF48 => self.obp0,
            0xFF49 => self.obp1,
            0xFF4A => self.wy,
            0xFF4B => self.wx,
            _ => return Err(GbError::UnmappedAddress { addr }),
        };
        Ok(value)
    }

    /// Write a register in FF40..=FF4B (DMA excluded). Changes to STAT
    /// selects or LYC can raise INT $48 immediately.
    pub fn write_register(&mut self, addr: u16, value: u8) -> Result<Interrupts, GbError> {
        match addr {
            0xFF40 => self.write_lcdc(value),
            0xFF41 => self.stat_select = StatSelect::from_bits_truncate(value),
            0xFF42 => self.scy = value,
            0xFF43 => self.scx = value,
            // LY is read-only.
            0xFF44 => {}
            0xFF45 => self.lyc = value,
            0xFF47 => self.bgp = value,
            0xFF48 => self.obp0 = value,
            0xFF49 => self.obp1 = value,
            0xFF4A => self.wy = value,
            0xFF4B => self.wx = value,
            _ => return Err(GbError::UnmappedAddress { addr }),
        }
        Ok(self.update_stat_line())
    }

    /// Copy a full OAM image, as OAM DMA does.
    pub fn load_oam(&mut self, data: &[u8; OAM_SIZE]) {
        self.oam.copy_from_slice(data);
    }

    /// All 384 tiles as a 128x192 RGBA image, decoded with the raw
    /// colour index (no BGP mapping).
    pub fn tile_atlas(&mut self) -> Vec<u8> {
        self.tiles.refresh(&self.vram[..]);
        let mut atlas = vec![0; ATLAS_WIDTH * ATLAS_HEIGHT * 4];
        self.tiles.render_atlas(&self.palette, &mut atlas);
        atlas
    }
}

impl Memory for Ppu {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize],
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize],
            _ => 0xFF,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x8000..=0x9FFF => {
                self.vram[(addr - 0x8000) as usize] = value;
                if addr < TILE_DATA_END {
                    self.tiles.invalidate();
                }
            }
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize] = value,
            _ => {}
        }
    }
}
