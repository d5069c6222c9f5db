use thiserror::Error;

/// Conditions that stop emulation.
///
/// Every variant is a programming error or an unsupported ROM. Tolerant
/// hardware behaviour (open bus, unused I/O) never produces one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GbError {
    #[error("unimplemented opcode {}{opcode:#04X} at PC={pc:#06X}", cb_prefix(.prefixed))]
    UnimplementedOpcode { opcode: u8, prefixed: bool, pc: u16 },
    #[error("no device mapped at address {addr:#06X}")]
    UnmappedAddress { addr: u16 },
    #[error("invalid TAC frequency code {0:#04X}")]
    InvalidTimerFrequency(u8),
    #[error("ROM image is {len} bytes, too small to hold a cartridge header")]
    RomTooSmall { len: usize },
    #[error("unsupported cartridge type {0:#04X}")]
    UnsupportedCartridge(u8),
    #[error("invalid ROM size code {0:#04X}")]
    InvalidRomSize(u8),
    #[error("invalid RAM size code {0:#04X}")]
    InvalidRamSize(u8),
}

fn cb_prefix(prefixed: &bool) -> &'static str {
    if *prefixed {
        "CB "
    } else {
        ""
    }
}
