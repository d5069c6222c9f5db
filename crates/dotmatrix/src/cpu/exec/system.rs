use crate::cpu::{Bus, Cpu, CpuState, ExecResult, Opcode, CB_OPCODES};
use crate::error::GbError;

impl Cpu {
    pub(in crate::cpu) fn exec_nop(&mut self, _bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        Ok(op.cycles as u32)
    }

    /// Fetch the second opcode byte and dispatch through the CB table.
    ///
    /// CB descriptors carry the full cost of the two-byte instruction.
    pub(in crate::cpu) fn exec_prefix_cb(&mut self, bus: &mut dyn Bus, _op: &Opcode) -> ExecResult {
        let code = self.fetch8(bus);
        let cb = &CB_OPCODES[code as usize];
        (cb.handler)(self, bus, cb)
    }

    /// HALT parks the core until an enabled interrupt is requested.
    ///
    /// With IME clear and an interrupt already pending the core keeps
    /// running, and the next opcode byte is read twice (HALT bug).
    pub(in crate::cpu) fn exec_halt(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        if !self.ime && bus.pending_interrupts() != 0 {
            self.halt_bug = true;
        } else {
            self.state = CpuState::Halted;
        }
        Ok(op.cycles as u32)
    }

    /// STOP skips its padding byte, resets DIV and parks the core until a
    /// joypad line goes low.
    pub(in crate::cpu) fn exec_stop(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let _padding = self.fetch8(bus);
        bus.reset_divider();
        self.state = CpuState::Stopped;
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_di(&mut self, _bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        Ok(op.cycles as u32)
    }

    /// IME becomes set after the instruction following EI completes.
    pub(in crate::cpu) fn exec_ei(&mut self, _bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.ime_enable_pending = true;
        Ok(op.cycles as u32)
    }

    /// Opcode holes lock up real hardware; here they abort the step.
    pub(in crate::cpu) fn exec_unimplemented(
        &mut self,
        _bus: &mut dyn Bus,
        op: &Opcode,
    ) -> ExecResult {
        let pc = self.regs.pc.wrapping_sub(op.length as u16);
        log::error!(
            "GB CPU unimplemented opcode {}0x{:02X} at pc=0x{:04X} AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X}",
            if op.prefixed { "CB " } else { "" },
            op.code,
            pc,
            self.regs.af(),
            self.regs.bc(),
            self.regs.de(),
            self.regs.hl(),
            self.regs.sp,
        );
        Err(GbError::UnimplementedOpcode {
            opcode: op.code,
            prefixed: op.prefixed,
            pc,
        })
    }
}
