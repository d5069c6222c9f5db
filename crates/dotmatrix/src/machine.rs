mod apu;
mod cartridge;
mod gameboy;
mod interrupts;
mod joypad;
mod memory;
mod mmu;
mod ppu;
mod serial;
mod timer;

pub use apu::Apu;
pub use cartridge::{Cartridge, CartridgeHeader, MbcKind};
pub use gameboy::GameBoy;
pub use interrupts::{InterruptController, Interrupts};
pub use joypad::{Button, Joypad};
pub use memory::{Memory, Ram};
pub use mmu::Mmu;
pub use ppu::{decode_tile, Lcdc, Mode, Ppu, StatSelect, ATLAS_HEIGHT, ATLAS_WIDTH};
pub use serial::Serial;
pub use timer::{Timer, TimerFrequency};
