use crate::config::Config;
use crate::cpu::{Cpu, CpuState};
use crate::error::GbError;

use super::cartridge::Cartridge;
use super::joypad::Button;
use super::mmu::Mmu;

/// T-cycles per CPU M-cycle.
const TCYCLES_PER_MCYCLE: u32 = 4;

/// High-level Game Boy machine.
///
/// Holds the CPU core and the MMU with every peripheral behind it. One call
/// to [`GameBoy::step`] runs one frame.
pub struct GameBoy {
    pub cpu: Cpu,
    pub mmu: Mmu,
    config: Config,
    /// Cycles the last frame overshot its budget by; charged to the next one.
    frame_overrun: u32,
}

impl GameBoy {
    /// Build a console around `rom` with the default configuration.
    pub fn new(rom: &[u8]) -> Result<Self, GbError> {
        Self::with_config(rom, Config::default())
    }

    pub fn with_config(rom: &[u8], config: Config) -> Result<Self, GbError> {
        let cartridge = Cartridge::from_rom(rom)?;
        let mmu = Mmu::new(cartridge, &config);
        Ok(Self {
            cpu: Cpu::new(),
            mmu,
            config,
            frame_overrun: 0,
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn title(&self) -> &str {
        self.mmu.cartridge.title()
    }

    /// Execute one CPU step and advance the PPU and timer by its cost.
    ///
    /// Interrupts raised here become visible to the next CPU step. Returns
    /// the T-cycles consumed.
    pub fn step_instruction(&mut self) -> Result<u32, GbError> {
        let mcycles = self.cpu.step(&mut self.mmu)?;
        let cycles = mcycles * TCYCLES_PER_MCYCLE;
        self.mmu.tick(cycles);
        Ok(cycles)
    }

    /// Run one frame: step until the configured cycle budget (70224 T-cycles
    /// by default) has elapsed.
    pub fn step(&mut self) -> Result<(), GbError> {
        let budget = self.config.cycles_per_frame;
        let mut elapsed = self.frame_overrun;
        while elapsed < budget {
            elapsed += self.step_instruction()?;
        }
        self.frame_overrun = elapsed - budget;
        Ok(())
    }

    /// The composed 160x144 RGBA frame.
    pub fn frame_buffer(&self) -> &[u8] {
        self.mmu.ppu.frame_buffer()
    }

    /// Every VRAM tile as a 128x192 RGBA image.
    pub fn tile_atlas(&mut self) -> Vec<u8> {
        self.mmu.ppu.tile_atlas()
    }

    pub fn press(&mut self, button: Button) {
        self.mmu.press(button);
    }

    pub fn release(&mut self, button: Button) {
        self.mmu.release(button);
    }

    /// Every byte the ROM has shifted out of the serial port so far.
    pub fn serial_output(&self) -> &[u8] {
        self.mmu.serial.output()
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.cpu.state == CpuState::Stopped
    }
}
