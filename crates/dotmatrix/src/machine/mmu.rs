//! Address decoding for the DMG memory map.

use super::apu::Apu;
use super::cartridge::Cartridge;
use super::interrupts::{InterruptController, Interrupts};
use super::joypad::{Button, Joypad};
use super::memory::{Memory, Ram};
use super::ppu::Ppu;
use super::serial::Serial;
use super::timer::Timer;
use crate::config::Config;
use crate::cpu::Bus;
use crate::error::GbError;

const OAM_DMA_LEN: u16 = 0xA0;

/// Memory management unit: owns every device on the bus and routes CPU
/// accesses to them.
///
/// | range       | device                              |
/// |-------------|-------------------------------------|
/// | 0000-7FFF   | cartridge ROM (MBC registers)       |
/// | 8000-9FFF   | VRAM                                |
/// | A000-BFFF   | cartridge RAM                       |
/// | C000-DFFF   | work RAM                            |
/// | E000-FDFF   | echo of C000-DDFF                   |
/// | FE00-FE9F   | OAM                                 |
/// | FEA0-FEFF   | unusable, reads 0xFF                |
/// | FF00-FF7F   | I/O registers                       |
/// | FF80-FFFE   | high RAM                            |
/// | FFFF        | IE                                  |
pub struct Mmu {
    pub cartridge: Cartridge,
    wram0: Ram,
    wram1: Ram,
    hram: Ram,
    pub ppu: Ppu,
    pub timer: Timer,
    pub serial: Serial,
    pub joypad: Joypad,
    pub apu: Apu,
    pub interrupts: InterruptController,
    dma: u8,
    fault: Option<GbError>,
}

impl Mmu {
    pub fn new(cartridge: Cartridge, config: &Config) -> Self {
        let mut interrupts = InterruptController::new();
        // The boot ROM leaves VBlank requested.
        interrupts.request(Interrupts::VBLANK);
        Self {
            cartridge,
            wram0: Ram::new(0xC000, 0x1000),
            wram1: Ram::new(0xD000, 0x1000),
            hram: Ram::new(0xFF80, 0x7F),
            ppu: Ppu::new(config.palette),
            timer: Timer::new(),
            serial: Serial::new(config.echo_serial),
            joypad: Joypad::new(),
            apu: Apu::new(),
            interrupts,
            dma: 0xFF,
            fault: None,
        }
    }

    /// Advance the clocked devices by `cycles` T-cycles and latch any
    /// interrupts they raise.
    pub fn tick(&mut self, cycles: u32) {
        let raised = self.ppu.step(cycles) | self.timer.tick(cycles);
        self.interrupts.request(raised);
    }

    pub fn press(&mut self, button: Button) {
        let raised = self.joypad.press(button);
        self.interrupts.request(raised);
    }

    pub fn release(&mut self, button: Button) {
        self.joypad.release(button);
    }

    /// Latch the first fault; later ones are logged and dropped.
    fn latch(&mut self, err: GbError) {
        log::error!("GB MMU: {err}");
        if self.fault.is_none() {
            self.fault = Some(err);
        }
    }

    /// OAM DMA completes instantly: 160 bytes from XX00 land in FE00.
    fn oam_dma(&mut self, value: u8) {
        self.dma = value;
        let base = (value as u16) << 8;
        let mut data = [0u8; OAM_DMA_LEN as usize];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = self.read(base.wrapping_add(i as u16));
        }
        self.ppu.load_oam(&data);
        log::trace!("GB MMU: OAM DMA from {base:#06X}");
    }

    fn read_io(&mut self, addr: u16) -> u8 {
        match addr {
            0xFF00 => self.joypad.read(),
            0xFF01..=0xFF02 => self.serial.read(addr),
            0xFF04..=0xFF07 => self.timer.read(addr),
            0xFF0F => self.interrupts.read_if(),
            0xFF10..=0xFF3F => self.apu.read(addr),
            0xFF46 => self.dma,
            0xFF40..=0xFF4B => match self.ppu.read_register(addr) {
                Ok(value) => value,
                Err(err) => {
                    self.latch(err);
                    0xFF
                }
            },
            _ => 0xFF,
        }
    }

    fn write_io(&mut self, addr: u16, value: u8) {
        let raised = match addr {
            0xFF00 => {
                self.joypad.write(value);
                Ok(Interrupts::empty())
            }
            0xFF01..=0xFF02 => Ok(self.serial.write(addr, value)),
            0xFF04..=0xFF07 => self.timer.write(addr, value),
            0xFF0F => {
                self.interrupts.write_if(value);
                Ok(Interrupts::empty())
            }
            0xFF10..=0xFF3F => {
                self.apu.write(addr, value);
                Ok(Interrupts::empty())
            }
            0xFF46 => {
                self.oam_dma(value);
                Ok(Interrupts::empty())
            }
            0xFF40..=0xFF4B => self.ppu.write_register(addr, value),
            _ => Ok(Interrupts::empty()),
        };
        match raised {
            Ok(raised) => self.interrupts.request(raised),
            Err(err) => self.latch(err),
        }
    }
}

impl Memory for Mmu {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF | 0xA000..=0xBFFF => self.cartridge.read(addr),
            0x8000..=0x9FFF | 0xFE00..=0xFE9F => self.ppu.read(addr),
            0xC000..=0xCFFF => self.wram0.read(addr),
            0xD000..=0xDFFF => self.wram1.read(addr),
            0xE000..=0xEFFF => self.wram0.read(addr - 0x2000),
            0xF000..=0xFDFF => self.wram1.read(addr - 0x2000),
            0xFF80..=0xFFFE => self.hram.read(addr),
            0xFFFF => self.interrupts.enable,
            // Unusable area. I/O goes through `Bus::read8`, which can latch faults.
            _ => 0xFF,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF | 0xA000..=0xBFFF => self.cartridge.write(addr, value),
            0x8000..=0x9FFF | 0xFE00..=0xFE9F => self.ppu.write(addr, value),
            0xC000..=0xCFFF => self.wram0.write(addr, value),
            0xD000..=0xDFFF => self.wram1.write(addr, value),
            0xE000..=0xEFFF => self.wram0.write(addr - 0x2000, value),
            0xF000..=0xFDFF => self.wram1.write(addr - 0x2000, value),
            0xFF80..=0xFFFE => self.hram.write(addr, value),
            0xFFFF => self.interrupts.enable = value,
            _ => {}
        }
    }
}

impl Bus for Mmu {
    fn read8(&mut self, addr: u16) -> u8 {
        match addr {
            0xFF00..=0xFF7F => self.read_io(addr),
            _ => self.read(addr),
        }
    }

    fn write8(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF00..=0xFF7F => self.write_io(addr, value),
            _ => self.write(addr, value),
        }
    }

    fn pending_interrupts(&mut self) -> u8 {
        self.interrupts.pending().bits()
    }

    fn acknowledge_interrupt(&mut self) -> Option<u16> {
        self.interrupts.interrupt_addr()
    }

    fn any_button_pressed(&mut self) -> bool {
        self.joypad.any_pressed()
    }

    fn reset_divider(&mut self) {
        match self.timer.write(0xFF04, 0) {
            Ok(raised) => self.interrupts.request(raised),
            Err(err) => self.latch(err),
        }
    }

    fn take_fault(&mut self) -> Option<GbError> {
        self.fault.take()
    }
}
