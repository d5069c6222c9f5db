use crate::cpu::{Bus, Cpu, ExecResult, Opcode};

impl Cpu {
    /// 8-bit transfer `LD r1,r2` over every operand kind, LDH included.
    pub(in crate::cpu) fn exec_ld8(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        // The source is resolved first so that `LD (HL),d8` fetches its
        // immediate before touching memory.
        let value = self.read_operand8(bus, op.r2);
        self.write_operand8(bus, op.r1, value);
        Ok(op.cycles as u32)
    }

    /// 16-bit transfer: `LD rr,d16`, `LD SP,HL`, `LD (a16),SP` and
    /// `LD HL,SP+r8`.
    pub(in crate::cpu) fn exec_ld16(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let value = self.read_operand16(bus, op.r2);
        self.write_operand16(bus, op.r1, value);
        Ok(op.cycles as u32)
    }
}
