use crate::error::GbError;

/// Abstraction over the Game Boy bus (memory and IO).
///
/// Byte access never fails: hardware answers every address, so tolerant
/// defaults live in the implementation. Fatal faults detected while
/// decoding an access are latched and surfaced through `take_fault` once
/// the current instruction has finished.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Interrupts that are both requested (IF) and enabled (IE).
    ///
    /// The default implementation goes through the memory-mapped
    /// registers so that flat test buses work unchanged.
    fn pending_interrupts(&mut self) -> u8 {
        self.read8(0xFFFF) & self.read8(0xFF0F) & 0x1F
    }

    /// Clear the highest-priority pending request and return its vector.
    fn acknowledge_interrupt(&mut self) -> Option<u16> {
        let pending = self.pending_interrupts();
        if pending == 0 {
            return None;
        }
        let index = pending.trailing_zeros() as u16;
        let iflags = self.read8(0xFF0F);
        self.write8(0xFF0F, iflags & !(1 << index));
        Some(0x0040 + index * 8)
    }

    /// Whether any joypad line is pulled low; used to leave STOP.
    fn any_button_pressed(&mut self) -> bool {
        (self.read8(0xFF00) & 0x0F) != 0x0F
    }

    /// Clear the divider, as entering STOP does.
    fn reset_divider(&mut self) {
        self.write8(0xFF04, 0);
    }

    /// Take the first fatal fault raised since the last call, if any.
    fn take_fault(&mut self) -> Option<GbError> {
        None
    }
}
