pub mod app;
pub mod config;
pub mod cpu;
pub mod error;
pub mod machine;

pub use app::GameBoyApp;
pub use config::Config;
pub use error::GbError;
pub use machine::{Button, GameBoy};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// Default integer scaling factor for windowed frontends.
pub const SCREEN_SCALE: u32 = 4;

/// T-cycles in one full DMG frame: 154 scanlines of 456 dots.
pub const CYCLES_PER_FRAME: u32 = 70_224;
