//! Base and CB-prefixed opcode descriptor tables.
//!
//! Cycle counts are in M-cycles. Conditional branches carry both the taken
//! and the not-taken cost. The eleven holes of the base table dispatch to
//! `exec_unimplemented`.

use lazy_static::lazy_static;

use super::operand::Operand::{
    Bit, Cond, Ind, Pair, Reg, Vector, A16, A8, D16, D8, HighC, Rel8, SpRel8,
};
use super::{Condition, Cpu, Handler, Opcode, Operand, Reg16, Reg8};

lazy_static! {
    /// Unprefixed opcodes, indexed by opcode byte.
    pub static ref OPCODES: [Opcode; 256] = build_base_table();
    /// Opcodes following the 0xCB prefix, indexed by the second byte.
    pub static ref CB_OPCODES: [Opcode; 256] = build_cb_table();
}

const NONE: Operand = Operand::None;

/// Operand encoded by a 3-bit register field: B, C, D, E, H, L, (HL), A.
const R8: [Operand; 8] = [
    Reg(Reg8::B),
    Reg(Reg8::C),
    Reg(Reg8::D),
    Reg(Reg8::E),
    Reg(Reg8::H),
    Reg(Reg8::L),
    Ind(Reg16::HL),
    Reg(Reg8::A),
];

/// Opcode byte values with no instruction behind them.
pub const HOLES: [u8; 11] = [
    0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
];

#[inline]
fn is_hl(operand: Operand) -> bool {
    operand == Ind(Reg16::HL)
}

fn put(table: &mut [Opcode; 256], op: Opcode) {
    table[op.code as usize] = op;
}

fn blank_table(prefixed: bool) -> [Opcode; 256] {
    let illegal = Opcode::new(0, "ILLEGAL", NONE, NONE, 1, 1, Cpu::exec_unimplemented);
    let mut table = [illegal; 256];
    for (code, op) in table.iter_mut().enumerate() {
        op.code = code as u8;
        op.prefixed = prefixed;
    }
    table
}

fn build_base_table() -> [Opcode; 256] {
    let mut t = blank_table(false);

    put(&mut t, Opcode::new(0x00, "NOP", NONE, NONE, 1, 1, Cpu::exec_nop));
    put(&mut t, Opcode::new(0x10, "STOP", NONE, NONE, 2, 1, Cpu::exec_stop));
    put(&mut t, Opcode::new(0x76, "HALT", NONE, NONE, 1, 1, Cpu::exec_halt));
    put(&mut t, Opcode::new(0xF3, "DI", NONE, NONE, 1, 1, Cpu::exec_di));
    put(&mut t, Opcode::new(0xFB, "EI", NONE, NONE, 1, 1, Cpu::exec_ei));
    put(&mut t, Opcode::new(0xCB, "PREFIX", NONE, NONE, 1, 1, Cpu::exec_prefix_cb));

    // 16-bit pair groups, in encoding order.
    let pairs = [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::SP];
    let stack_pairs = [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::AF];
    let indirect = [Reg16::BC, Reg16::DE, Reg16::Hli, Reg16::Hld];
    let groups = pairs.iter().zip(&stack_pairs).zip(&indirect);
    for (i, ((&rp, &rp2), &ind)) in groups.enumerate() {
        let row = (i as u8) << 4;
        put(&mut t, Opcode::new(row | 0x01, "LD", Pair(rp), D16, 3, 3, Cpu::exec_ld16));
        put(&mut t, Opcode::new(row | 0x02, "LD", Ind(ind), Reg(Reg8::A), 1, 2, Cpu::exec_ld8));
        put(&mut t, Opcode::new(row | 0x03, "INC", Pair(rp), NONE, 1, 2, Cpu::exec_inc16));
        put(
            &mut t,
            Opcode::new(row | 0x09, "ADD", Pair(Reg16::HL), Pair(rp), 1, 2, Cpu::exec_add_hl),
        );
        put(&mut t, Opcode::new(row | 0x0A, "LD", Reg(Reg8::A), Ind(ind), 1, 2, Cpu::exec_ld8));
        put(&mut t, Opcode::new(row | 0x0B, "DEC", Pair(rp), NONE, 1, 2, Cpu::exec_dec16));
        put(&mut t, Opcode::new(0xC1 | row, "POP", Pair(rp2), NONE, 1, 3, Cpu::exec_pop));
        put(&mut t, Opcode::new(0xC5 | row, "PUSH", Pair(rp2), NONE, 1, 4, Cpu::exec_push));
    }

    // INC r, DEC r, LD r,d8.
    for (y, &reg) in R8.iter().enumerate() {
        let base = (y as u8) << 3;
        let rmw = if is_hl(reg) { 3 } else { 1 };
        let imm = if is_hl(reg) { 3 } else { 2 };
        put(&mut t, Opcode::new(base | 0x04, "INC", reg, NONE, 1, rmw, Cpu::exec_inc8));
        put(&mut t, Opcode::new(base | 0x05, "DEC", reg, NONE, 1, rmw, Cpu::exec_dec8));
        put(&mut t, Opcode::new(base | 0x06, "LD", reg, D8, 2, imm, Cpu::exec_ld8));
    }

    put(&mut t, Opcode::new(0x07, "RLCA", NONE, NONE, 1, 1, Cpu::exec_rlca));
    put(&mut t, Opcode::new(0x0F, "RRCA", NONE, NONE, 1, 1, Cpu::exec_rrca));
    put(&mut t, Opcode::new(0x17, "RLA", NONE, NONE, 1, 1, Cpu::exec_rla));
    put(&mut t, Opcode::new(0x1F, "RRA", NONE, NONE, 1, 1, Cpu::exec_rra));
    put(&mut t, Opcode::new(0x27, "DAA", NONE, NONE, 1, 1, Cpu::exec_daa));
    put(&mut t, Opcode::new(0x2F, "CPL", NONE, NONE, 1, 1, Cpu::exec_cpl));
    put(&mut t, Opcode::new(0x37, "SCF", NONE, NONE, 1, 1, Cpu::exec_scf));
    put(&mut t, Opcode::new(0x3F, "CCF", NONE, NONE, 1, 1, Cpu::exec_ccf));

    put(&mut t, Opcode::new(0x08, "LD", A16, Pair(Reg16::SP), 3, 5, Cpu::exec_ld16));

    // LD r,r' over 0x40..=0x7F; 0x76 stays HALT.
    for (y, &dst) in R8.iter().enumerate() {
        for (z, &src) in R8.iter().enumerate() {
            let code = 0x40 | (y as u8) << 3 | z as u8;
            if code == 0x76 {
                continue;
            }
            let cycles = if is_hl(dst) || is_hl(src) { 2 } else { 1 };
            put(&mut t, Opcode::new(code, "LD", dst, src, 1, cycles, Cpu::exec_ld8));
        }
    }

    // 8-bit ALU on A over 0x80..=0xBF, with the d8 forms at 0xC6..=0xFE.
    let alu: [(&'static str, Handler); 8] = [
        ("ADD", Cpu::exec_add),
        ("ADC", Cpu::exec_adc),
        ("SUB", Cpu::exec_sub),
        ("SBC", Cpu::exec_sbc),
        ("AND", Cpu::exec_and),
        ("XOR", Cpu::exec_xor),
        ("OR", Cpu::exec_or),
        ("CP", Cpu::exec_cp),
    ];
    for (y, &(mnemonic, handler)) in alu.iter().enumerate() {
        let y = y as u8;
        for (z, &src) in R8.iter().enumerate() {
            let cycles = if is_hl(src) { 2 } else { 1 };
            let code = 0x80 | y << 3 | z as u8;
            put(&mut t, Opcode::new(code, mnemonic, Reg(Reg8::A), src, 1, cycles, handler));
        }
        put(&mut t, Opcode::new(0xC6 | y << 3, mnemonic, Reg(Reg8::A), D8, 2, 2, handler));
    }

    // Branches, calls, returns and restarts.
    let conds = [Condition::NZ, Condition::Z, Condition::NC, Condition::C];
    put(&mut t, Opcode::new(0x18, "JR", NONE, Rel8, 2, 3, Cpu::exec_jr));
    put(&mut t, Opcode::new(0xC3, "JP", NONE, D16, 3, 4, Cpu::exec_jp));
    put(&mut t, Opcode::new(0xE9, "JP", Pair(Reg16::HL), NONE, 1, 1, Cpu::exec_jp_hl));
    put(&mut t, Opcode::new(0xCD, "CALL", NONE, D16, 3, 6, Cpu::exec_call));
    put(&mut t, Opcode::new(0xC9, "RET", NONE, NONE, 1, 4, Cpu::exec_ret));
    put(&mut t, Opcode::new(0xD9, "RETI", NONE, NONE, 1, 4, Cpu::exec_reti));
    for (i, &cc) in conds.iter().enumerate() {
        let cc_bits = (i as u8) << 3;
        put(
            &mut t,
            Opcode::new(0x20 | cc_bits, "JR", Cond(cc), Rel8, 2, 3, Cpu::exec_jr).not_taken(2),
        );
        put(
            &mut t,
            Opcode::new(0xC0 | cc_bits, "RET", Cond(cc), NONE, 1, 5, Cpu::exec_ret).not_taken(2),
        );
        put(
            &mut t,
            Opcode::new(0xC2 | cc_bits, "JP", Cond(cc), D16, 3, 4, Cpu::exec_jp).not_taken(3),
        );
        put(
            &mut t,
            Opcode::new(0xC4 | cc_bits, "CALL", Cond(cc), D16, 3, 6, Cpu::exec_call).not_taken(3),
        );
    }
    for n in 0..8u8 {
        let vector = n << 3;
        put(
            &mut t,
            Opcode::new(0xC7 | vector, "RST", Vector(vector as u16), NONE, 1, 4, Cpu::exec_rst),
        );
    }

    // High page and absolute loads.
    put(&mut t, Opcode::new(0xE0, "LDH", A8, Reg(Reg8::A), 2, 3, Cpu::exec_ld8));
    put(&mut t, Opcode::new(0xF0, "LDH", Reg(Reg8::A), A8, 2, 3, Cpu::exec_ld8));
    put(&mut t, Opcode::new(0xE2, "LD", HighC, Reg(Reg8::A), 1, 2, Cpu::exec_ld8));
    put(&mut t, Opcode::new(0xF2, "LD", Reg(Reg8::A), HighC, 1, 2, Cpu::exec_ld8));
    put(&mut t, Opcode::new(0xEA, "LD", A16, Reg(Reg8::A), 3, 4, Cpu::exec_ld8));
    put(&mut t, Opcode::new(0xFA, "LD", Reg(Reg8::A), A16, 3, 4, Cpu::exec_ld8));

    // SP arithmetic.
    put(&mut t, Opcode::new(0xE8, "ADD", Pair(Reg16::SP), Rel8, 2, 4, Cpu::exec_add_sp));
    put(&mut t, Opcode::new(0xF8, "LD", Pair(Reg16::HL), SpRel8, 2, 3, Cpu::exec_ld16));
    put(&mut t, Opcode::new(0xF9, "LD", Pair(Reg16::SP), Pair(Reg16::HL), 1, 2, Cpu::exec_ld16));

    debug_assert!(HOLES.iter().all(|&code| t[code as usize].mnemonic == "ILLEGAL"));
    t
}

fn build_cb_table() -> [Opcode; 256] {
    let mut t = blank_table(true);

    let shifts: [(&'static str, Handler); 8] = [
        ("RLC", Cpu::exec_rlc),
        ("RRC", Cpu::exec_rrc),
        ("RL", Cpu::exec_rl),
        ("RR", Cpu::exec_rr),
        ("SLA", Cpu::exec_sla),
        ("SRA", Cpu::exec_sra),
        ("SWAP", Cpu::exec_swap),
        ("SRL", Cpu::exec_srl),
    ];

    for (z, &target) in R8.iter().enumerate() {
        let z = z as u8;
        let hl = is_hl(target);
        let rmw = if hl { 4 } else { 2 };
        let test = if hl { 3 } else { 2 };

        for (y, &(mnemonic, handler)) in shifts.iter().enumerate() {
            let code = (y as u8) << 3 | z;
            put(&mut t, Opcode::new(code, mnemonic, target, NONE, 2, rmw, handler).prefixed());
        }
        for bit in 0..8u8 {
            let yz = bit << 3 | z;
            put(
                &mut t,
                Opcode::new(0x40 | yz, "BIT", Bit(bit), target, 2, test, Cpu::exec_bit).prefixed(),
            );
            put(
                &mut t,
                Opcode::new(0x80 | yz, "RES", Bit(bit), target, 2, rmw, Cpu::exec_res).prefixed(),
            );
            put(
                &mut t,
                Opcode::new(0xC0 | yz, "SET", Bit(bit), target, 2, rmw, Cpu::exec_set).prefixed(),
            );
        }
    }

    t
}
