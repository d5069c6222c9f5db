use crate::cpu::{Bus, Cpu, ExecResult, Opcode, Operand};

impl Cpu {
    #[inline]
    fn branch_cycles(op: &Opcode, taken: bool) -> u32 {
        if taken {
            op.cycles as u32
        } else {
            op.cycles_not_taken as u32
        }
    }

    /// `JR r8` / `JR cc,r8`. The displacement is relative to the address
    /// following the operand.
    pub(in crate::cpu) fn exec_jr(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let offset = self.fetch8(bus) as i8;
        let taken = self.condition_holds(op.r1);
        if taken {
            self.regs.pc = self.regs.pc.wrapping_add(offset as i16 as u16);
        }
        Ok(Self::branch_cycles(op, taken))
    }

    pub(in crate::cpu) fn exec_jp(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let addr = self.fetch16(bus);
        let taken = self.condition_holds(op.r1);
        if taken {
            self.regs.pc = addr;
        }
        Ok(Self::branch_cycles(op, taken))
    }

    pub(in crate::cpu) fn exec_jp_hl(&mut self, _bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.regs.pc = self.regs.hl();
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_call(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let addr = self.fetch16(bus);
        let taken = self.condition_holds(op.r1);
        if taken {
            let ret = self.regs.pc;
            self.push16(bus, ret);
            self.regs.pc = addr;
        }
        Ok(Self::branch_cycles(op, taken))
    }

    pub(in crate::cpu) fn exec_ret(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let taken = self.condition_holds(op.r1);
        if taken {
            self.regs.pc = self.pop16(bus);
        }
        Ok(Self::branch_cycles(op, taken))
    }

    /// RETI enables IME immediately, unlike EI.
    pub(in crate::cpu) fn exec_reti(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        self.regs.pc = self.pop16(bus);
        self.ime = true;
        Ok(op.cycles as u32)
    }

    pub(in crate::cpu) fn exec_rst(&mut self, bus: &mut dyn Bus, op: &Opcode) -> ExecResult {
        let Operand::Vector(vector) = op.r1 else {
            unreachable!("RST descriptor without a vector: {:?}", op);
        };
        let ret = self.regs.pc;
        self.push16(bus, ret);
        self.regs.pc = vector;
        Ok(op.cycles as u32)
    }
}
