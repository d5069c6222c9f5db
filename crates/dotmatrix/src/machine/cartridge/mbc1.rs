/// MBC1 banking registers.
///
/// ROM bank = high2:low5 with low5 == 0 treated as 1. In mode 1 the high
/// bits also bank the 0x0000-0x3FFF window and select the RAM bank.
#[derive(Clone, Debug)]
pub(super) struct Mbc1 {
    rom_bank_low5: u8,
    rom_bank_high2: u8,
    ram_enable: bool,
    banking_mode: u8,
}

impl Mbc1 {
    pub(super) fn new() -> Self {
        Self {
            rom_bank_low5: 1,
            rom_bank_high2: 0,
            ram_enable: false,
            banking_mode: 0,
        }
    }

    #[inline]
    pub(super) fn ram_enabled(&self) -> bool {
        self.ram_enable
    }

    /// Bank mapped at `addr` in 0x0000..=0x7FFF, before wrapping to the
    /// cartridge's bank count.
    pub(super) fn rom_bank(&self, addr: u16) -> usize {
        let high = (self.rom_bank_high2 as usize) << 5;
        if addr < 0x4000 {
            if self.banking_mode == 1 {
                high
            } else {
                0
            }
        } else {
            high | self.rom_bank_low5 as usize
        }
    }

    pub(super) fn ram_bank(&self) -> usize {
        if self.banking_mode == 1 {
            self.rom_bank_high2 as usize
        } else {
            0
        }
    }

    pub(super) fn write_register(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => {
                self.ram_enable = value & 0x0F == 0x0A;
                log::trace!("MBC1 RAM enable={}", self.ram_enable);
            }
            0x2000..=0x3FFF => {
                self.rom_bank_low5 = (value & 0x1F).max(1);
                log::trace!("MBC1 ROM bank low5={:#04X}", self.rom_bank_low5);
            }
            0x4000..=0x5FFF => {
                self.rom_bank_high2 = value & 0x03;
                log::trace!("MBC1 bank high2={:#04X}", self.rom_bank_high2);
            }
            0x6000..=0x7FFF => {
                self.banking_mode = value & 0x01;
                log::trace!("MBC1 banking mode={}", self.banking_mode);
            }
            _ => {}
        }
    }
}
