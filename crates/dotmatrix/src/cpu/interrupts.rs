use super::{Bus, Cpu, CpuState};

/// M-cycles spent entering an interrupt handler.
const INTERRUPT_ENTRY_CYCLES: u32 = 5;

impl Cpu {
    /// Enter the highest-priority pending interrupt if IME allows it.
    ///
    /// Returns `Some(cycles)` if an interrupt was taken.
    pub(super) fn service_interrupt(&mut self, bus: &mut dyn Bus) -> Option<u32> {
        if !self.ime || bus.pending_interrupts() == 0 {
            return None;
        }
        let vector = bus.acknowledge_interrupt()?;

        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        self.state = CpuState::Fetching;

        // A HALT that hit the HALT bug (e.g. `EI ; HALT`) returns to itself.
        let pc = if std::mem::take(&mut self.halt_bug) {
            self.regs.pc.wrapping_sub(1)
        } else {
            self.regs.pc
        };
        self.push16(bus, pc);
        self.regs.pc = vector;

        log::debug!(
            "GB CPU interrupt: vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
            vector,
            pc,
            self.regs.sp,
        );
        Some(INTERRUPT_ENTRY_CYCLES)
    }

    /// Advance the delayed IME enable requested by EI.
    #[inline]
    pub(super) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            // Second boundary after EI: IME is now set.
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}
