use crate::cpu::{Bus, Cpu, ExecResult, Opcode};

impl Cpu {
    pub(in crate::cpu) fn exec_push(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.read_operand16(bus, op.r1);
        self.push16(bus, value);
        Ok(op.cycles as u32)
    }

    /// POP rr. `POP AF` drops the low nibble of F through the register file.
    pub(in crate::cpu) fn exec_pop(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.pop16(bus);
        self.write_operand16(bus, op.r1, value);
        Ok(op.cycles as u32)
    }
}
