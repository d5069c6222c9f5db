use crate::cpu::{Bus, Cpu, ExecResult, Flag, Opcode, Operand};

impl Cpu {
    /// Apply a rotate/shift helper to the descriptor's target operand.
    #[inline]
    fn cb_modify(
        &mut self,
        bus: &mut dyn Bus,
        op: &Opcode,
        f: fn(&mut Cpu, u8) -> u8,
    ) -> ExecResult {
        let value = self.read_operand8(bus, op.r1);
        let result = f(self, value);
        self.write_operand8(bus, op.r1, result);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_rlc(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.cb_modify(bus, op, Cpu::alu_rlc)
    }

    pub(in crate::cpu) fn exec_rrc(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.cb_modify(bus, op, Cpu::alu_rrc)
    }

    pub(in crate::cpu) fn exec_rl(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.cb_modify(bus, op, Cpu::alu_rl)
    }

    pub(in crate::cpu) fn exec_rr(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.cb_modify(bus, op, Cpu::alu_rr)
    }

    pub(in crate::cpu) fn exec_sla(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.cb_modify(bus, op, Cpu::alu_sla)
    }

    pub(in crate::cpu) fn exec_sra(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.cb_modify(bus, op, Cpu::alu_sra)
    }

    pub(in crate::cpu) fn exec_swap(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.cb_modify(bus, op, Cpu::alu_swap)
    }

    pub(in crate::cpu) fn exec_srl(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.cb_modify(bus, op, Cpu::alu_srl)
    }

    #[inline]
    fn cb_bit_mask(op: &Opcode) -> u8 {
        let Operand::Bit(bit) = op.r1 else {
            unreachable!("bit descriptor without a bit index: {:?}", op);
        };
        1 << bit
    }

    /// BIT b,r: Z reflects the complement of the bit, H set, C preserved.
    pub(in crate::cpu) fn exec_bit(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let mask = Self::cb_bit_mask(op);
        let value = self.read_operand8(bus, op.r2);
        self.regs.set_flag(Flag::Z, value & mask == 0);
        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, true);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_res(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let mask = Self::cb_bit_mask(op);
        let value = self.read_operand8(bus, op.r2);
        self.write_operand8(bus, op.r2, value & !mask);
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_set(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let mask = Self::cb_bit_mask(op);
        let value = self.read_operand8(bus, op.r2);
        self.write_operand8(bus, op.r2, value | mask);
        Ok(op.cycles as u32)
    }
}
