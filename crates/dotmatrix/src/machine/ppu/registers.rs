use bitflags::bitflags;

bitflags! {
    /// LCDC (FF40).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Lcdc: u8 {
        /// On DMG this gates both background and window.
        const BG_ENABLE = 0x01;
        const OBJ_ENABLE = 0x02;
        const OBJ_TALL = 0x04;
        const BG_MAP_HIGH = 0x08;
        /// Tile data at 0x8000 with unsigned indices; otherwise 0x8800
        /// with signed indices around 0x9000.
        const TILE_DATA_LOW = 0x10;
        const WINDOW_ENABLE = 0x20;
        const WINDOW_MAP_HIGH = 0x40;
        const LCD_ENABLE = 0x80;
    }
}

bitflags! {
    /// Writable interrupt-select bits of STAT (FF41).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct StatSelect: u8 {
        const HBLANK = 0x08;
        const VBLANK = 0x10;
        const OAM_SCAN = 0x20;
        const LYC = 0x40;
    }
}

/// PPU mode as reported in STAT bits 0-1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

impl Mode {
    /// The STAT select bit that makes this mode raise INT $48.
    #[inline]
    pub fn select(self) -> StatSelect {
        match self {
            Mode::HBlank => StatSelect::HBLANK,
            Mode::VBlank => StatSelect::VBLANK,
            Mode::OamScan => StatSelect::OAM_SCAN,
            Mode::Transfer => StatSelect::empty(),
        }
    }
}
