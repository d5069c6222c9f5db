use crate::cpu::{Bus, Cpu, ExecResult, Opcode};

impl Cpu {
    /// INC r / INC (HL).
    pub(in crate::cpu) fn exec_inc8(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.read_operand8(bus, op.r1);
        let result = self.alu_inc8(value);
        self.write_operand8(bus, op.r1, result);
        Ok(op.cycles as u32)
    }

    /// DEC r / DEC (HL).
    pub(in crate::cpu) fn exec_dec8(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.read_operand8(bus, op.r1);
        let result = self.alu_dec8(value);
        self.write_operand8(bus, op.r1, result);
        Ok(op.cycles as u32)
    }

    // 16-bit INC/DEC leave the flags alone.

    pub(in crate::cpu) fn exec_inc16(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.read_operand16(bus, op.r1);
        self.write_operand16(bus, op.r1, value.wrapping_add(1));
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_dec16(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.read_operand16(bus, op.r1);
        self.write_operand16(bus, op.r1, value.wrapping_sub(1));
        Ok(op.cycles as u32)
    }
}
