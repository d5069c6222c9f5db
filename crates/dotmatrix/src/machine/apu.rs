//! Sound register storage. No audio is produced.

const BASE: u16 = 0xFF10;
const NR52: u16 = 0xFF26;

/// Bits that read back as 1 regardless of the stored value, for
/// FF10..=FF2F. Unused addresses read 0.
const READ_MASKS: [u8; 0x20] = [
    0x80, 0x3F, 0x00, 0xFF, 0xBF, // NR10-NR14
    0x00, 0x3F, 0x00, 0xFF, 0xBF, // unused, NR21-NR24
    0x7F, 0xFF, 0x9F, 0xFF, 0xBF, // NR30-NR34
    0x00, 0xFF, 0x00, 0x00, 0xBF, // unused, NR41-NR44
    0x00, 0x00, 0x70, // NR50-NR52
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // unused
];

#[inline]
fn is_unused(addr: u16) -> bool {
    matches!(addr, 0xFF15 | 0xFF1F | 0xFF27..=0xFF2F)
}

#[inline]
fn is_wave_ram(addr: u16) -> bool {
    (0xFF30..=0xFF3F).contains(&addr)
}

#[derive(Clone, Debug)]
pub struct Apu {
    regs: [u8; 0x30],
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}

impl Apu {
    /// Registers as left by the DMG boot ROM.
    pub fn new() -> Self {
        let mut regs = [0u8; 0x30];
        for (addr, value) in [
            (0xFF10, 0x80),
            (0xFF11, 0xBF),
            (0xFF12, 0xF3),
            (0xFF14, 0xBF),
            (0xFF16, 0x3F),
            (0xFF19, 0xBF),
            (0xFF1A, 0x7F),
            (0xFF1B, 0xFF),
            (0xFF1C, 0x9F),
            (0xFF1E, 0xBF),
            (0xFF20, 0xFF),
            (0xFF23, 0xBF),
            (0xFF24, 0x77),
            (0xFF25, 0xF3),
            (NR52, 0xF1),
        ] {
            regs[(addr - BASE) as usize] = value;
        }
        Self { regs }
    }

    /// NR52 bit 7.
    #[inline]
    pub fn powered(&self) -> bool {
        self.regs[(NR52 - BASE) as usize] & 0x80 != 0
    }

    pub fn read(&self, addr: u16) -> u8 {
        if !(BASE..=0xFF3F).contains(&addr) || is_unused(addr) {
            return 0x00;
        }
        let index = (addr - BASE) as usize;
        if is_wave_ram(addr) {
            return self.regs[index];
        }
        self.regs[index] | READ_MASKS[index]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        if !(BASE..=0xFF3F).contains(&addr) || is_unused(addr) {
            return;
        }
        let index = (addr - BASE) as usize;
        if addr == NR52 {
            self.write_nr52(value);
        } else if is_wave_ram(addr) || self.powered() {
            // Everything but wave RAM is read-only while powered off.
            self.regs[index] = value;
        }
    }

    fn write_nr52(&mut self, value: u8) {
        let index = (NR52 - BASE) as usize;
        if value & 0x80 == 0 {
            if self.powered() {
                log::debug!("GB APU powered off");
            }
            // Power-off clears every channel and control register.
            self.regs[..index].fill(0);
            self.regs[index] = 0;
        } else {
            self.regs[index] |= 0x80;
        }
    }
}
