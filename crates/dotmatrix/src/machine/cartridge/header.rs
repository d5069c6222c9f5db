use crate::error::GbError;

/// Smallest image that still contains the whole header.
pub const HEADER_END: usize = 0x150;

const TITLE: std::ops::Range<usize> = 0x134..0x143;
const CGB_FLAG: usize = 0x143;
const SGB_FLAG: usize = 0x146;
const CARTRIDGE_TYPE: usize = 0x147;
const ROM_SIZE: usize = 0x148;
const RAM_SIZE: usize = 0x149;

/// Banking controller fitted to the cartridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MbcKind {
    /// 32 KiB of ROM, optionally with up to 8 KiB of RAM.
    RomOnly,
    Mbc1,
}

/// Metadata read from 0x0134..0x0150 of the ROM image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub cgb_flag: u8,
    pub sgb_flag: u8,
    pub cartridge_type: u8,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
    pub kind: MbcKind,
    /// Number of 16 KiB ROM banks.
    pub rom_banks: usize,
    /// External RAM size in bytes.
    pub ram_bytes: usize,
}

/// ROM size code N selects 2^(N+1) banks of 16 KiB.
pub fn rom_banks(code: u8) -> Result<usize, GbError> {
    match code {
        0x00..=0x08 => Ok(2usize << code),
        other => Err(GbError::InvalidRomSize(other)),
    }
}

/// RAM size code to bytes. The table is not monotonic: code 5 (64 KiB)
/// was added after code 4 (128 KiB).
pub fn ram_bytes(code: u8) -> Result<usize, GbError> {
    match code {
        0x00 | 0x01 => Ok(0),
        0x02 => Ok(8 * 1024),
        0x03 => Ok(32 * 1024),
        0x04 => Ok(128 * 1024),
        0x05 => Ok(64 * 1024),
        other => Err(GbError::InvalidRamSize(other)),
    }
}

impl CartridgeHeader {
    pub fn parse(rom: &[u8]) -> Result<Self, GbError> {
        if rom.len() < HEADER_END {
            return Err(GbError::RomTooSmall { len: rom.len() });
        }

        let cartridge_type = rom[CARTRIDGE_TYPE];
        let kind = match cartridge_type {
            0x00 | 0x08 | 0x09 => MbcKind::RomOnly,
            0x01..=0x03 => MbcKind::Mbc1,
            other => return Err(GbError::UnsupportedCartridge(other)),
        };

        let rom_size_code = rom[ROM_SIZE];
        let ram_size_code = rom[RAM_SIZE];

        Ok(Self {
            title: parse_title(&rom[TITLE]),
            cgb_flag: rom[CGB_FLAG],
            sgb_flag: rom[SGB_FLAG],
            cartridge_type,
            rom_size_code,
            ram_size_code,
            kind,
            rom_banks: rom_banks(rom_size_code)?,
            ram_bytes: ram_bytes(ram_size_code)?,
        })
    }
}

fn parse_title(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    bytes[..end]
        .iter()
        .filter(|b| b.is_ascii_graphic() || **b == b' ')
        .map(|&b| b as char)
        .collect::<String>()
        .trim_end()
        .to_string()
}
