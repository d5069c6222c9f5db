use crate::cpu::{Bus, Cpu, ExecResult, Flag, Opcode};

impl Cpu {
    pub(in crate::cpu) fn exec_add(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.read_operand8(bus, op.r2);
        self.alu_add(value, false);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_adc(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.read_operand8(bus, op.r2);
        self.alu_add(value, true);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_sub(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.read_operand8(bus, op.r2);
        self.alu_sub(value, false);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_sbc(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.read_operand8(bus, op.r2);
        self.alu_sub(value, true);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_and(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.read_operand8(bus, op.r2);
        self.alu_and(value);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_xor(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.read_operand8(bus, op.r2);
        self.alu_xor(value);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_or(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.read_operand8(bus, op.r2);
        self.alu_or(value);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_cp(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.read_operand8(bus, op.r2);
        self.alu_cp(value);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_add_hl(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.read_operand16(bus, op.r2);
        self.alu_add16_hl(value);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_add_sp(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let offset = self.fetch8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, offset);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_daa(&mut self, _bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.alu_daa();
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_cpl(&mut self, _bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.regs.a = !self.regs.a;
        self.regs.set_flag(Flag::N, true);
        self.regs.set_flag(Flag::H, true);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_scf(&mut self, _bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, false);
        self.regs.set_flag(Flag::C, true);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_ccf(&mut self, _bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let carry = self.regs.flag(Flag::C);
        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, false);
        self.regs.set_flag(Flag::C, !carry);
        Ok(op.cycles as u32)
    }

    // Accumulator rotates share the CB helpers but always clear Z.

    pub(in crate::cpu) fn exec_rlca(&mut self, _bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.regs.a = self.alu_rlc(self.regs.a);
        self.regs.set_flag(Flag::Z, false);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_rrca(&mut self, _bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.regs.a = self.alu_rrc(self.regs.a);
        self.regs.set_flag(Flag::Z, false);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_rla(&mut self, _bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.regs.a = self.alu_rl(self.regs.a);
        self.regs.set_flag(Flag::Z, false);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_rra(&mut self, _bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.regs.a = self.alu_rr(self.regs.a);
        self.regs.set_flag(Flag::Z, false);
        Ok(op.cycles as u32)
    }
}
