mod header;
mod mbc1;

pub use header::{CartridgeHeader, MbcKind};

use self::mbc1::Mbc1;
use super::Memory;
use crate::error::GbError;

const ROM_BANK_SIZE: usize = 0x4000;
const RAM_BANK_SIZE: usize = 0x2000;

#[derive(Clone, Debug)]
enum Mapper {
    RomOnly,
    Mbc1(Mbc1),
}

/// Cartridge ROM image, external RAM and banking controller.
///
/// Maps 0x0000-0x7FFF (ROM and controller registers) and 0xA000-0xBFFF
/// (external RAM).
#[derive(Clone, Debug)]
pub struct Cartridge {
    header: CartridgeHeader,
    rom: Vec<u8>,
    ram: Vec<u8>,
    mapper: Mapper,
}

impl Cartridge {
    pub fn from_rom(rom: &[u8]) -> Result<Self, GbError> {
        let header = CartridgeHeader::parse(rom)?;
        let mapper = match header.kind {
            MbcKind::RomOnly => Mapper::RomOnly,
            MbcKind::Mbc1 => Mapper::Mbc1(Mbc1::new()),
        };

        log::info!(
            "GB cartridge: title={:?} kind={:?} rom_banks={} ram_bytes={}",
            header.title,
            header.kind,
            header.rom_banks,
            header.ram_bytes,
        );
        if rom.len() != header.rom_banks * ROM_BANK_SIZE {
            log::warn!(
                "GB cartridge: image is {} bytes but header declares {} banks",
                rom.len(),
                header.rom_banks,
            );
        }

        Ok(Self {
            ram: vec![0xFF; header.ram_bytes],
            rom: rom.to_vec(),
            header,
            mapper,
        })
    }

    pub fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub fn title(&self) -> &str {
        &self.header.title
    }

    fn rom_index(&self, addr: u16) -> usize {
        let bank = match &self.mapper {
            Mapper::RomOnly => (addr as usize) / ROM_BANK_SIZE,
            Mapper::Mbc1(mbc) => mbc.rom_bank(addr) % self.header.rom_banks,
        };
        bank * ROM_BANK_SIZE + (addr as usize & (ROM_BANK_SIZE - 1))
    }

    /// Offset into external RAM, or `None` when RAM is absent or disabled.
    fn ram_index(&self, addr: u16) -> Option<usize> {
        if self.ram.is_empty() {
            return None;
        }
        let offset = (addr - 0xA000) as usize;
        let index = match &self.mapper {
            Mapper::RomOnly => offset,
            Mapper::Mbc1(mbc) if mbc.ram_enabled() => mbc.ram_bank() * RAM_BANK_SIZE + offset,
            Mapper::Mbc1(_) => return None,
        };
        Some(index % self.ram.len())
    }
}

impl Memory for Cartridge {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.rom.get(self.rom_index(addr)).copied().unwrap_or(0xFF),
            0xA000..=0xBFFF => self.ram_index(addr).map_or(0xFF, |i| self.ram[i]),
            _ => 0xFF,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => {
                if let Mapper::Mbc1(mbc) = &mut self.mapper {
                    mbc.write_register(addr, value);
                }
            }
            0xA000..=0xBFFF => {
                if let Some(index) = self.ram_index(addr) {
                    self.ram[index] = value;
                }
            }
            _ => {}
        }
    }
}
