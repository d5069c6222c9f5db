use std::fmt;

use super::{Bus, Cpu, Operand};
use crate::error::GbError;

/// M-cycles consumed by an instruction, or the fault that stopped it.
pub type ExecResult = Result<u32, GbError>;

/// Instruction handler.
pub type Handler = fn(&mut Cpu, &mut dyn Bus, &Opcode) -> ExecResult;

/// Static descriptor for one opcode of the base or CB-prefixed table.
#[derive(Clone, Copy)]
pub struct Opcode {
    pub code: u8,
    pub prefixed: bool,
    pub mnemonic: &'static str,
    pub r1: Operand,
    pub r2: Operand,
    /// Encoded length in bytes, including the CB prefix for prefixed opcodes.
    pub length: u8,
    /// M-cycles, or the taken cost for conditional branches.
    pub cycles: u8,
    /// M-cycles when a conditional branch is not taken.
    pub cycles_not_taken: u8,
    pub handler: Handler,
}

impl Opcode {
    pub(super) fn new(
        code: u8,
        mnemonic: &'static str,
        r1: Operand,
        r2: Operand,
        length: u8,
        cycles: u8,
        handler: Handler,
    ) -> Self {
        Self {
            code,
            prefixed: false,
            mnemonic,
            r1,
            r2,
            length,
            cycles,
            cycles_not_taken: cycles,
            handler,
        }
    }

    pub(super) fn not_taken(mut self, cycles: u8) -> Self {
        self.cycles_not_taken = cycles;
        self
    }

    pub(super) fn prefixed(mut self) -> Self {
        self.prefixed = true;
        self
    }

    #[inline]
    pub fn is_conditional(&self) -> bool {
        self.cycles != self.cycles_not_taken
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic)?;
        if self.r1 != Operand::None {
            write!(f, " {}", self.r1)?;
        }
        if self.r2 != Operand::None {
            write!(f, ",{}", self.r2)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.prefixed { "CB " } else { "" };
        write!(
            f,
            "{}{:02X} {} len={} cycles={}/{}",
            prefix, self.code, self, self.length, self.cycles, self.cycles_not_taken
        )
    }
}
