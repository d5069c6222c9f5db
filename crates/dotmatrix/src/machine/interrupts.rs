use bitflags::bitflags;

bitflags! {
    /// Interrupt lines, in IE/IF bit order. Lower bits have priority.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Interrupts: u8 {
        const VBLANK = 0x01;
        const LCD_STAT = 0x02;
        const TIMER = 0x04;
        const SERIAL = 0x08;
        const JOYPAD = 0x10;
    }
}

impl Interrupts {
    /// Service routine address for a single interrupt line.
    pub fn vector(self) -> u16 {
        0x0040 + (self.bits().trailing_zeros() as u16) * 8
    }
}

/// IE and IF registers.
///
/// IME lives in the CPU; this only tracks which lines are enabled and
/// requested.
#[derive(Clone, Debug, Default)]
pub struct InterruptController {
    /// IE (FFFF). All eight bits are stored and read back.
    pub enable: u8,
    /// IF (FF0F).
    pub request: Interrupts,
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn request(&mut self, interrupts: Interrupts) {
        self.request |= interrupts;
    }

    /// Requested lines that are also enabled.
    #[inline]
    pub fn pending(&self) -> Interrupts {
        self.request & Interrupts::from_bits_truncate(self.enable)
    }

    /// Whether any enabled interrupt is requested.
    #[inline]
    pub fn has(&self) -> bool {
        !self.pending().is_empty()
    }

    /// Consume the highest-priority pending request and return its vector.
    pub fn interrupt_addr(&mut self) -> Option<u16> {
        let pending = self.pending();
        if pending.is_empty() {
            return None;
        }
        let line = Interrupts::from_bits_retain(pending.bits() & pending.bits().wrapping_neg());
        self.request.remove(line);
        Some(line.vector())
    }

    /// IF reads back with the three unused bits set.
    pub fn read_if(&self) -> u8 {
        0xE0 | self.request.bits()
    }

    pub fn write_if(&mut self, value: u8) {
        self.request = Interrupts::from_bits_truncate(value);
    }
}
