//! Sharp LR35902 core.
//!
//! Instructions are decoded through two 256-entry descriptor tables (base and
//! CB-prefixed). Each descriptor carries its operands and cycle costs, and
//! points at a handler in `exec`.

mod alu;
mod bus;
mod exec;
mod init;
mod interrupts;
mod opcode;
mod operand;
mod regs;
mod step;
mod table;

#[cfg(test)]
mod tests;

pub use bus::Bus;
pub use opcode::{ExecResult, Handler, Opcode};
pub use operand::{Condition, Operand};
pub use regs::{Flag, Reg16, Reg8, Registers};
pub use table::{CB_OPCODES, OPCODES};

/// Execution state of the core between instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuState {
    /// Fetching and executing instructions.
    Fetching,
    /// Parked by HALT until `IE & IF` becomes non-zero.
    Halted,
    /// Parked by STOP until a joypad line goes low.
    Stopped,
}

/// Game Boy CPU (Sharp LR35902) core.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable.
    pub ime: bool,
    pub state: CpuState,
    halt_bug: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
}
