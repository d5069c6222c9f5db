//! Instruction handlers referenced from the opcode tables.
//!
//! Every handler has the `Handler` shape, reads its operands from the
//! descriptor and returns the M-cycles it consumed.

mod alu;
mod cb;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;
