use super::{Cpu, CpuState, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            ime: false,
            state: CpuState::Fetching,
            halt_bug: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
        };
        cpu.apply_dmg_boot_state();
        cpu
    }

    /// Reset the CPU to the state the DMG boot ROM leaves behind.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.state = CpuState::Fetching;
        self.halt_bug = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        self.apply_dmg_boot_state();
    }

    /// Initialize registers to match the DMG boot ROM's state after it
    /// hands control to cartridge code at 0x0100.
    fn apply_dmg_boot_state(&mut self) {
        self.regs.a = 0x01;
        self.regs.f = 0xB0;
        self.regs.b = 0x00;
        self.regs.c = 0x13;
        self.regs.d = 0x00;
        self.regs.e = 0xD8;
        self.regs.h = 0x01;
        self.regs.l = 0x4D;
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;

        // Cartridge code enables interrupts itself via EI/RETI.
        self.ime = false;
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.state == CpuState::Halted
    }
}
