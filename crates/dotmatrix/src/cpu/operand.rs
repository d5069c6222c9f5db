use std::fmt;

use super::{Bus, Cpu, Flag, Reg16, Reg8, Registers};

/// Branch conditions encoded in JR/JP/CALL/RET.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    NZ,
    Z,
    NC,
    C,
}

impl Condition {
    #[inline]
    pub fn holds(self, regs: &Registers) -> bool {
        match self {
            Condition::NZ => !regs.flag(Flag::Z),
            Condition::Z => regs.flag(Flag::Z),
            Condition::NC => !regs.flag(Flag::C),
            Condition::C => regs.flag(Flag::C),
        }
    }
}

/// Operand slot of an opcode descriptor.
///
/// Immediate kinds (`D8`, `D16`, `A8`, `A16`, `Rel8`, `SpRel8`) consume
/// bytes from the instruction stream when they are resolved, in the order
/// the handler resolves them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    None,
    /// 8-bit register.
    Reg(Reg8),
    /// 16-bit register or pair.
    Pair(Reg16),
    /// Memory at the address held in a pair, e.g. `(HL)` or `(HL+)`.
    Ind(Reg16),
    /// Memory at `0xFF00 + C`.
    HighC,
    /// 8-bit immediate.
    D8,
    /// 16-bit immediate, also used for jump and call targets.
    D16,
    /// Memory at `0xFF00 + a8`.
    A8,
    /// Memory at an absolute 16-bit address.
    A16,
    /// Signed 8-bit displacement.
    Rel8,
    /// `SP` plus a signed 8-bit displacement.
    SpRel8,
    Cond(Condition),
    /// Bit index for BIT/RES/SET.
    Bit(u8),
    /// Restart vector for RST.
    Vector(u16),
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Condition::NZ => "NZ",
            Condition::Z => "Z",
            Condition::NC => "NC",
            Condition::C => "C",
        };
        f.write_str(name)
    }
}

fn pair_name(reg: Reg16) -> &'static str {
    match reg {
        Reg16::AF => "AF",
        Reg16::BC => "BC",
        Reg16::DE => "DE",
        Reg16::HL => "HL",
        Reg16::SP => "SP",
        Reg16::PC => "PC",
        Reg16::Hli => "HL+",
        Reg16::Hld => "HL-",
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Reg(reg) => write!(f, "{:?}", reg),
            Operand::Pair(reg) => f.write_str(pair_name(*reg)),
            Operand::Ind(reg) => write!(f, "({})", pair_name(*reg)),
            Operand::HighC => f.write_str("(C)"),
            Operand::D8 => f.write_str("d8"),
            Operand::D16 => f.write_str("d16"),
            Operand::A8 => f.write_str("(a8)"),
            Operand::A16 => f.write_str("(a16)"),
            Operand::Rel8 => f.write_str("r8"),
            Operand::SpRel8 => f.write_str("SP+r8"),
            Operand::Cond(cond) => write!(f, "{}", cond),
            Operand::Bit(bit) => write!(f, "{}", bit),
            Operand::Vector(addr) => write!(f, "{:02X}H", addr),
        }
    }
}

impl Cpu {
    #[inline]
    pub(super) fn fetch8(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = bus.read8(self.regs.pc);
        if self.halt_bug {
            // The first fetch after the HALT bug does not advance PC.
            self.halt_bug = false;
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        value
    }

    #[inline]
    pub(super) fn fetch16(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn push16(&mut self, bus: &mut dyn Bus, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        // memory[SP] = low, memory[SP+1] = high once both bytes are pushed.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop16(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = bus.read8(self.regs.sp);
        let hi = bus.read8(self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }

    /// Effective address of a memory operand. Consumes immediates.
    fn operand_addr(&mut self, bus: &mut dyn Bus, operand: Operand) -> u16 {
        match operand {
            Operand::Ind(reg) => self.regs.get16(reg),
            Operand::HighC => 0xFF00 | self.regs.c as u16,
            Operand::A8 => 0xFF00 | self.fetch8(bus) as u16,
            Operand::A16 => self.fetch16(bus),
            other => unreachable!("operand {:?} does not address memory", other),
        }
    }

    pub(super) fn read_operand8(&mut self, bus: &mut dyn Bus, operand: Operand) -> u8 {
        match operand {
            Operand::Reg(reg) => self.regs.get8(reg),
            Operand::D8 | Operand::Rel8 => self.fetch8(bus),
            _ => {
                let addr = self.operand_addr(bus, operand);
                bus.read8(addr)
            }
        }
    }

    pub(super) fn write_operand8(&mut self, bus: &mut dyn Bus, operand: Operand, value: u8) {
        match operand {
            Operand::Reg(reg) => self.regs.set8(reg, value),
            _ => {
                let addr = self.operand_addr(bus, operand);
                bus.write8(addr, value);
            }
        }
    }

    pub(super) fn read_operand16(&mut self, bus: &mut dyn Bus, operand: Operand) -> u16 {
        match operand {
            Operand::Pair(reg) => self.regs.get16(reg),
            Operand::D16 => self.fetch16(bus),
            Operand::SpRel8 => {
                let offset = self.fetch8(bus);
                self.alu_add16_signed(self.regs.sp, offset)
            }
            other => unreachable!("operand {:?} is not a 16-bit source", other),
        }
    }

    pub(super) fn write_operand16(&mut self, bus: &mut dyn Bus, operand: Operand, value: u16) {
        match operand {
            Operand::Pair(reg) => self.regs.set16(reg, value),
            Operand::A16 => {
                let addr = self.fetch16(bus);
                let [lo, hi] = value.to_le_bytes();
                bus.write8(addr, lo);
                bus.write8(addr.wrapping_add(1), hi);
            }
            other => unreachable!("operand {:?} is not a 16-bit destination", other),
        }
    }

    /// Evaluate an optional branch condition; `Operand::None` always holds.
    #[inline]
    pub(super) fn condition_holds(&self, operand: Operand) -> bool {
        match operand {
            Operand::Cond(cond) => cond.holds(&self.regs),
            _ => true,
        }
    }
}
