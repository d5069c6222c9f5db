use super::table::HOLES;
use super::*;
use crate::error::GbError;

struct TestBus {
    memory: [u8; 0x10000],
    /// Writes to this address latch an `UnmappedAddress` fault.
    unmapped: Option<u16>,
    fault: Option<GbError>,
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
            unmapped: None,
            fault: None,
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        if self.unmapped == Some(addr) && self.fault.is_none() {
            self.fault = Some(GbError::UnmappedAddress { addr });
        }
        self.memory[addr as usize] = value;
    }

    fn take_fault(&mut self) -> Option<GbError> {
        self.fault.take()
    }
}

const PROGRAM_START: u16 = 0xC000;

fn cpu_with_program(program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::default();
    let start = PROGRAM_START as usize;
    bus.memory[start..start + program.len()].copy_from_slice(program);
    let mut cpu = Cpu::new();
    cpu.regs.pc = PROGRAM_START;
    (cpu, bus)
}

fn is_branch(op: &Opcode) -> bool {
    matches!(op.mnemonic, "JR" | "JP" | "CALL" | "RET" | "RETI" | "RST")
}

#[test]
fn boot_state_matches_dmg() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert!(!cpu.ime);
    assert_eq!(cpu.state, CpuState::Fetching);
}

#[test]
fn base_table_has_exactly_the_eleven_holes() {
    let holes: Vec<u8> = OPCODES
        .iter()
        .filter(|op| op.mnemonic == "ILLEGAL")
        .map(|op| op.code)
        .collect();
    assert_eq!(holes, HOLES.to_vec());
    assert!(CB_OPCODES.iter().all(|op| op.mnemonic != "ILLEGAL"));
}

#[test]
fn descriptors_are_indexed_by_their_code() {
    for (i, op) in OPCODES.iter().enumerate() {
        assert_eq!(op.code as usize, i);
        assert!(!op.prefixed);
    }
    for (i, op) in CB_OPCODES.iter().enumerate() {
        assert_eq!(op.code as usize, i);
        assert!(op.prefixed);
        assert_eq!(op.length, 2);
    }
}

#[test]
fn every_hole_faults_without_side_effects() {
    for &code in HOLES.iter() {
        let (mut cpu, mut bus) = cpu_with_program(&[code]);
        let before = cpu.regs;
        let err = cpu.step(&mut bus).unwrap_err();
        assert_eq!(
            err,
            GbError::UnimplementedOpcode {
                opcode: code,
                prefixed: false,
                pc: PROGRAM_START,
            }
        );
        assert_eq!(cpu.regs.a, before.a);
        assert_eq!(cpu.regs.sp, before.sp);
    }
}

#[test]
fn declared_length_and_cycles_match_execution() {
    for op in OPCODES.iter() {
        if op.mnemonic == "ILLEGAL" || op.code == 0xCB || is_branch(op) {
            continue;
        }
        let (mut cpu, mut bus) = cpu_with_program(&[op.code]);
        let cycles = cpu
            .step(&mut bus)
            .unwrap_or_else(|e| panic!("{:?} failed: {}", op, e));
        assert_eq!(
            cpu.regs.pc,
            PROGRAM_START + op.length as u16,
            "length of {:?}",
            op
        );
        assert_eq!(cycles, op.cycles as u32, "cycles of {:?}", op);
    }

    for op in CB_OPCODES.iter() {
        let (mut cpu, mut bus) = cpu_with_program(&[0xCB, op.code]);
        let cycles = cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.regs.pc, PROGRAM_START + 2, "length of {:?}", op);
        assert_eq!(cycles, op.cycles as u32, "cycles of {:?}", op);
    }
}

#[test]
fn descriptors_render_as_assembly() {
    assert_eq!(OPCODES[0x00].to_string(), "NOP");
    assert_eq!(OPCODES[0x2A].to_string(), "LD A,(HL+)");
    assert_eq!(OPCODES[0x32].to_string(), "LD (HL-),A");
    assert_eq!(OPCODES[0x36].to_string(), "LD (HL),d8");
    assert_eq!(OPCODES[0xE0].to_string(), "LDH (a8),A");
    assert_eq!(OPCODES[0xE2].to_string(), "LD (C),A");
    assert_eq!(OPCODES[0x20].to_string(), "JR NZ,r8");
    assert_eq!(OPCODES[0xC5].to_string(), "PUSH BC");
    assert_eq!(OPCODES[0xF8].to_string(), "LD HL,SP+r8");
    assert_eq!(OPCODES[0xFF].to_string(), "RST 38H");
    assert_eq!(CB_OPCODES[0x37].to_string(), "SWAP A");
    assert_eq!(CB_OPCODES[0x7E].to_string(), "BIT 7,(HL)");
    assert_eq!(CB_OPCODES[0xC1].to_string(), "SET 0,C");
}

#[test]
fn conditional_branches_report_taken_and_not_taken_cost() {
    // JR NZ,+2 with Z clear (taken) then with Z set (not taken).
    let (mut cpu, mut bus) = cpu_with_program(&[0x20, 0x02]);
    cpu.regs.set_flag(Flag::Z, false);
    assert_eq!(cpu.step(&mut bus).unwrap(), 3);
    assert_eq!(cpu.regs.pc, PROGRAM_START + 4);

    cpu.regs.pc = PROGRAM_START;
    cpu.regs.set_flag(Flag::Z, true);
    assert_eq!(cpu.step(&mut bus).unwrap(), 2);
    assert_eq!(cpu.regs.pc, PROGRAM_START + 2);

    // JR with a negative displacement.
    let (mut cpu, mut bus) = cpu_with_program(&[0x18, 0xFE]);
    assert_eq!(cpu.step(&mut bus).unwrap(), 3);
    assert_eq!(cpu.regs.pc, PROGRAM_START);

    // CALL Z,a16.
    let (mut cpu, mut bus) = cpu_with_program(&[0xCC, 0x34, 0x12]);
    cpu.regs.set_flag(Flag::Z, false);
    assert_eq!(cpu.step(&mut bus).unwrap(), 3);
    assert_eq!(cpu.regs.pc, PROGRAM_START + 3);
    cpu.regs.pc = PROGRAM_START;
    cpu.regs.set_flag(Flag::Z, true);
    assert_eq!(cpu.step(&mut bus).unwrap(), 6);
    assert_eq!(cpu.regs.pc, 0x1234);

    // RET C.
    let (mut cpu, mut bus) = cpu_with_program(&[0xD8]);
    cpu.regs.set_flag(Flag::C, false);
    assert_eq!(cpu.step(&mut bus).unwrap(), 2);
    cpu.regs.pc = PROGRAM_START;
    cpu.regs.set_flag(Flag::C, true);
    assert_eq!(cpu.step(&mut bus).unwrap(), 5);
}

#[test]
fn call_and_ret_use_little_endian_stack() {
    // CALL 0xC010 ; at 0xC010: RET
    let (mut cpu, mut bus) = cpu_with_program(&[0xCD, 0x10, 0xC0]);
    bus.memory[0xC010] = 0xC9;
    cpu.regs.sp = 0xDFFE;

    assert_eq!(cpu.step(&mut bus).unwrap(), 6);
    assert_eq!(cpu.regs.pc, 0xC010);
    assert_eq!(cpu.regs.sp, 0xDFFC);
    assert_eq!(bus.memory[0xDFFC], 0x03);
    assert_eq!(bus.memory[0xDFFD], 0xC0);

    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.regs.pc, PROGRAM_START + 3);
    assert_eq!(cpu.regs.sp, 0xDFFE);
}

#[test]
fn rst_jumps_to_vector() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xEF]);
    cpu.regs.sp = 0xDFFE;
    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(bus.memory[0xDFFC], 0x01);
    assert_eq!(bus.memory[0xDFFD], 0xC0);
}

#[test]
fn loads_through_hl_post_adjust() {
    // LD HL,0xC100 ; LD A,0x42 ; LD (HL+),A ; LD (HL-),A ; LD A,(HL-)
    let (mut cpu, mut bus) = cpu_with_program(&[0x21, 0x00, 0xC1, 0x3E, 0x42, 0x22, 0x32, 0x3A]);
    for _ in 0..4 {
        cpu.step(&mut bus).unwrap();
    }
    assert_eq!(bus.memory[0xC100], 0x42);
    assert_eq!(bus.memory[0xC101], 0x42);
    assert_eq!(cpu.regs.hl(), 0xC100);

    bus.memory[0xC100] = 0x99;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x99);
    assert_eq!(cpu.regs.hl(), 0xC0FF);
}

#[test]
fn high_page_and_absolute_loads() {
    // LDH (0x80),A ; LD C,0x81 ; LD (C),A ; LD (0xC200),A ; LD A,(0xFF80)
    let (mut cpu, mut bus) = cpu_with_program(&[
        0xE0, 0x80, 0x0E, 0x81, 0xE2, 0xEA, 0x00, 0xC2, 0xFA, 0x80, 0xFF,
    ]);
    cpu.regs.a = 0x5A;
    for _ in 0..4 {
        cpu.step(&mut bus).unwrap();
    }
    assert_eq!(bus.memory[0xFF80], 0x5A);
    assert_eq!(bus.memory[0xFF81], 0x5A);
    assert_eq!(bus.memory[0xC200], 0x5A);

    bus.memory[0xFF80] = 0x11;
    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.regs.a, 0x11);
}

#[test]
fn ld_a16_sp_stores_both_bytes() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x08, 0x00, 0xC3]);
    cpu.regs.sp = 0xBEEF;
    assert_eq!(cpu.step(&mut bus).unwrap(), 5);
    assert_eq!(bus.memory[0xC300], 0xEF);
    assert_eq!(bus.memory[0xC301], 0xBE);
}

#[test]
fn add_sets_half_and_full_carry() {
    // ADD A,B
    let (mut cpu, mut bus) = cpu_with_program(&[0x80]);
    cpu.regs.a = 0x3A;
    cpu.regs.b = 0xC6;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.flag(Flag::Z));
    assert!(!cpu.regs.flag(Flag::N));
    assert!(cpu.regs.flag(Flag::H));
    assert!(cpu.regs.flag(Flag::C));
}

#[test]
fn adc_includes_carry_in_half_carry() {
    // ADC A,d8
    let (mut cpu, mut bus) = cpu_with_program(&[0xCE, 0x0F]);
    cpu.regs.a = 0x00;
    cpu.regs.set_flag(Flag::C, true);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x10);
    assert!(cpu.regs.flag(Flag::H));
    assert!(!cpu.regs.flag(Flag::C));
}

#[test]
fn sub_and_sbc_update_flags() {
    // SUB A,d8: 0x10 - 0x01 = 0x0F, borrow from bit 4.
    let (mut cpu, mut bus) = cpu_with_program(&[0xD6, 0x01]);
    cpu.regs.a = 0x10;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x0F);
    assert!(!cpu.regs.flag(Flag::Z));
    assert!(cpu.regs.flag(Flag::N));
    assert!(cpu.regs.flag(Flag::H));
    assert!(!cpu.regs.flag(Flag::C));

    // SBC A,d8: 0x00 - 0x01 - 1 = 0xFE.
    let (mut cpu, mut bus) = cpu_with_program(&[0xDE, 0x01]);
    cpu.regs.a = 0x00;
    cpu.regs.set_flag(Flag::C, true);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0xFE);
    assert!(!cpu.regs.flag(Flag::Z));
    assert!(cpu.regs.flag(Flag::N));
    assert!(cpu.regs.flag(Flag::H));
    assert!(cpu.regs.flag(Flag::C));
}

#[test]
fn logical_ops_and_cp_flags() {
    // AND d8
    let (mut cpu, mut bus) = cpu_with_program(&[0xE6, 0x0F]);
    cpu.regs.a = 0xF0;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, 0xA0);

    // OR d8
    let (mut cpu, mut bus) = cpu_with_program(&[0xF6, 0x0F]);
    cpu.regs.a = 0xF0;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0xFF);
    assert_eq!(cpu.regs.f, 0x00);

    // XOR A
    let (mut cpu, mut bus) = cpu_with_program(&[0xAF]);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, 0x80);

    // CP d8 leaves A alone.
    let (mut cpu, mut bus) = cpu_with_program(&[0xFE, 0x20]);
    cpu.regs.a = 0x10;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x10);
    assert!(!cpu.regs.flag(Flag::Z));
    assert!(cpu.regs.flag(Flag::N));
    assert!(cpu.regs.flag(Flag::C));
}

#[test]
fn daa_corrects_bcd_addition_and_subtraction() {
    // LD A,0x45 ; ADD A,0x38 ; DAA
    let (mut cpu, mut bus) = cpu_with_program(&[0x3E, 0x45, 0xC6, 0x38, 0x27]);
    for _ in 0..3 {
        cpu.step(&mut bus).unwrap();
    }
    assert_eq!(cpu.regs.a, 0x83);
    assert!(!cpu.regs.flag(Flag::C));

    // LD A,0x42 ; SUB A,0x09 ; DAA
    let (mut cpu, mut bus) = cpu_with_program(&[0x3E, 0x42, 0xD6, 0x09, 0x27]);
    for _ in 0..3 {
        cpu.step(&mut bus).unwrap();
    }
    assert_eq!(cpu.regs.a, 0x33);
    assert!(cpu.regs.flag(Flag::N));
}

#[test]
fn inc_dec_preserve_carry() {
    // INC B ; DEC C ; INC (HL)
    let (mut cpu, mut bus) = cpu_with_program(&[0x04, 0x0D, 0x34]);
    cpu.regs.set_flag(Flag::C, true);
    cpu.regs.b = 0x0F;
    cpu.regs.c = 0x01;
    cpu.regs.set_hl(0xC100);
    bus.memory[0xC100] = 0xFF;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0x10);
    assert!(cpu.regs.flag(Flag::H));
    assert!(cpu.regs.flag(Flag::C));

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.c, 0x00);
    assert!(cpu.regs.flag(Flag::Z));
    assert!(cpu.regs.flag(Flag::N));
    assert!(cpu.regs.flag(Flag::C));

    assert_eq!(cpu.step(&mut bus).unwrap(), 3);
    assert_eq!(bus.memory[0xC100], 0x00);
    assert!(cpu.regs.flag(Flag::Z));
    assert!(cpu.regs.flag(Flag::C));
}

#[test]
fn sixteen_bit_arithmetic_flags() {
    // ADD HL,BC with carry out of bit 11 only.
    let (mut cpu, mut bus) = cpu_with_program(&[0x09]);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_bc(0x0001);
    cpu.regs.set_flag(Flag::Z, true);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert!(cpu.regs.flag(Flag::Z));
    assert!(cpu.regs.flag(Flag::H));
    assert!(!cpu.regs.flag(Flag::C));

    // ADD SP,-1 sets H and C from the low byte.
    let (mut cpu, mut bus) = cpu_with_program(&[0xE8, 0xFF]);
    cpu.regs.sp = 0x0001;
    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.regs.sp, 0x0000);
    assert!(!cpu.regs.flag(Flag::Z));
    assert!(cpu.regs.flag(Flag::H));
    assert!(cpu.regs.flag(Flag::C));

    // LD HL,SP+2
    let (mut cpu, mut bus) = cpu_with_program(&[0xF8, 0x02]);
    cpu.regs.sp = 0xFFF8;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.hl(), 0xFFFA);
    assert_eq!(cpu.regs.sp, 0xFFF8);

    // DEC BC wraps and leaves flags alone.
    let (mut cpu, mut bus) = cpu_with_program(&[0x0B]);
    cpu.regs.set_bc(0x0000);
    cpu.regs.f = 0x50;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.bc(), 0xFFFF);
    assert_eq!(cpu.regs.f, 0x50);
}

#[test]
fn push_pop_af_masks_low_nibble() {
    // LD BC,0x12FF ; PUSH BC ; POP AF
    let (mut cpu, mut bus) = cpu_with_program(&[0x01, 0xFF, 0x12, 0xC5, 0xF1]);
    cpu.regs.sp = 0xDFFE;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.step(&mut bus).unwrap(), 3);
    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f, 0xF0);
    assert_eq!(cpu.regs.sp, 0xDFFE);
}

#[test]
fn accumulator_rotates_clear_zero() {
    // RLCA with A=0 would set Z in the CB form.
    let (mut cpu, mut bus) = cpu_with_program(&[0x07, 0xCB, 0x07]);
    cpu.regs.a = 0x00;
    cpu.step(&mut bus).unwrap();
    assert!(!cpu.regs.flag(Flag::Z));
    cpu.step(&mut bus).unwrap();
    assert!(cpu.regs.flag(Flag::Z));

    // RRA shifts the carry into bit 7.
    let (mut cpu, mut bus) = cpu_with_program(&[0x1F]);
    cpu.regs.a = 0x01;
    cpu.regs.set_flag(Flag::C, true);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x80);
    assert!(cpu.regs.flag(Flag::C));
}

#[test]
fn cb_shifts_and_bit_ops() {
    // SWAP A ; SRA B ; BIT 7,(HL) ; RES 0,(HL) ; SET 3,(HL)
    let (mut cpu, mut bus) =
        cpu_with_program(&[0xCB, 0x37, 0xCB, 0x28, 0xCB, 0x7E, 0xCB, 0x86, 0xCB, 0xDE]);
    cpu.regs.a = 0xF1;
    cpu.regs.b = 0x81;
    cpu.regs.set_hl(0xC100);
    bus.memory[0xC100] = 0x01;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x1F);
    assert_eq!(cpu.regs.f, 0x00);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0xC0);
    assert!(cpu.regs.flag(Flag::C));

    assert_eq!(cpu.step(&mut bus).unwrap(), 3);
    assert!(cpu.regs.flag(Flag::Z));
    assert!(cpu.regs.flag(Flag::H));
    assert!(cpu.regs.flag(Flag::C));

    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(bus.memory[0xC100], 0x00);

    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(bus.memory[0xC100], 0x08);
}

#[test]
fn interrupt_entry_pushes_pc_and_clears_request() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x00]);
    cpu.ime = true;
    cpu.regs.sp = 0xDFFE;
    bus.memory[0xFFFF] = 0x05;
    bus.memory[0xFF0F] = 0x04;

    assert_eq!(cpu.step(&mut bus).unwrap(), 5);
    assert_eq!(cpu.regs.pc, 0x0050);
    assert!(!cpu.ime);
    assert_eq!(bus.memory[0xFF0F], 0x00);
    assert_eq!(bus.memory[0xDFFC], 0x00);
    assert_eq!(bus.memory[0xDFFD], 0xC0);
}

#[test]
fn interrupt_priority_prefers_lowest_bit() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x00]);
    cpu.ime = true;
    bus.memory[0xFFFF] = 0x1F;
    bus.memory[0xFF0F] = 0x12;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0048);
    assert_eq!(bus.memory[0xFF0F], 0x10);
}

#[test]
fn ei_takes_effect_after_next_instruction() {
    // EI ; NOP ; NOP
    let (mut cpu, mut bus) = cpu_with_program(&[0xFB, 0x00, 0x00]);
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.ime);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, PROGRAM_START + 2);
    assert!(cpu.ime);

    assert_eq!(cpu.step(&mut bus).unwrap(), 5);
    assert_eq!(cpu.regs.pc, 0x0040);
}

#[test]
fn di_cancels_pending_ei() {
    // EI ; DI ; NOP
    let (mut cpu, mut bus) = cpu_with_program(&[0xFB, 0xF3, 0x00]);
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;
    for _ in 0..3 {
        cpu.step(&mut bus).unwrap();
    }
    assert!(!cpu.ime);
    assert_eq!(cpu.regs.pc, PROGRAM_START + 3);
}

#[test]
fn reti_enables_interrupts_immediately() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xD9]);
    cpu.regs.sp = 0xDFFC;
    bus.memory[0xDFFC] = 0x00;
    bus.memory[0xDFFD] = 0xC1;
    cpu.step(&mut bus).unwrap();
    assert!(cpu.ime);
    assert_eq!(cpu.regs.pc, 0xC100);
}

#[test]
fn halt_waits_for_request_and_resumes_without_ime() {
    // HALT ; INC A
    let (mut cpu, mut bus) = cpu_with_program(&[0x76, 0x3C]);
    bus.memory[0xFFFF] = 0x04;
    cpu.regs.a = 0;

    cpu.step(&mut bus).unwrap();
    assert!(cpu.is_halted());
    for _ in 0..10 {
        assert_eq!(cpu.step(&mut bus).unwrap(), 1);
    }
    assert_eq!(cpu.regs.pc, PROGRAM_START + 1);

    bus.memory[0xFF0F] = 0x04;
    cpu.step(&mut bus).unwrap();
    assert!(!cpu.is_halted());
    assert_eq!(cpu.regs.a, 1);
    // IME was clear, so the request stays pending.
    assert_eq!(bus.memory[0xFF0F], 0x04);
}

#[test]
fn halt_with_ime_services_interrupt_on_wake() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x76, 0x00]);
    cpu.ime = true;
    bus.memory[0xFFFF] = 0x01;

    cpu.step(&mut bus).unwrap();
    assert!(cpu.is_halted());
    bus.memory[0xFF0F] = 0x01;
    assert_eq!(cpu.step(&mut bus).unwrap(), 5);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(cpu.state, CpuState::Fetching);
}

#[test]
fn halt_bug_repeats_next_byte() {
    // HALT ; INC A ; NOP
    let (mut cpu, mut bus) = cpu_with_program(&[0x76, 0x3C, 0x00]);
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;
    cpu.regs.a = 0;

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.is_halted());
    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 2);
    assert_eq!(cpu.regs.pc, PROGRAM_START + 2);
}

#[test]
fn ei_halt_returns_to_halt_after_interrupt() {
    // EI ; HALT ; NOP, handler at 0x40: INC A ; JR -2
    let (mut cpu, mut bus) = cpu_with_program(&[0xFB, 0x76, 0x00]);
    bus.memory[0x40..0x43].copy_from_slice(&[0x3C, 0x18, 0xFE]);
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;
    cpu.regs.sp = 0xDFFE;
    cpu.regs.a = 0;

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert!(cpu.ime);

    assert_eq!(cpu.step(&mut bus).unwrap(), 5);
    assert_eq!(cpu.regs.pc, 0x0040);
    // Return address is the HALT itself.
    assert_eq!(bus.memory[0xDFFC], 0x01);
    assert_eq!(bus.memory[0xDFFD], 0xC0);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 1);
    assert_eq!(cpu.regs.pc, 0x0041);
}

#[test]
fn stop_waits_for_joypad_line() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x10, 0x00, 0x00]);
    bus.memory[0xFF00] = 0xCF;
    bus.memory[0xFF04] = 0x77;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.state, CpuState::Stopped);
    assert_eq!(cpu.regs.pc, PROGRAM_START + 2);
    assert_eq!(bus.memory[0xFF04], 0x00);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.state, CpuState::Stopped);

    bus.memory[0xFF00] = 0xCE;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.state, CpuState::Fetching);
}

#[test]
fn bus_fault_surfaces_after_instruction() {
    // LD (0x0010),A
    let (mut cpu, mut bus) = cpu_with_program(&[0xEA, 0x10, 0x00]);
    bus.unmapped = Some(0x0010);
    let err = cpu.step(&mut bus).unwrap_err();
    assert_eq!(err, GbError::UnmappedAddress { addr: 0x0010 });
    // The instruction itself completed.
    assert_eq!(cpu.regs.pc, PROGRAM_START + 3);
}

#[test]
fn increment_and_decrement_wrap_with_half_carry() {
    // INC A ; DEC B
    let (mut cpu, mut bus) = cpu_with_program(&[0x3C, 0x05]);
    cpu.regs.a = 0xFF;
    cpu.regs.b = 0x00;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.flag(Flag::Z));
    assert!(!cpu.regs.flag(Flag::N));
    assert!(cpu.regs.flag(Flag::H));

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0xFF);
    assert!(!cpu.regs.flag(Flag::Z));
    assert!(cpu.regs.flag(Flag::N));
    assert!(cpu.regs.flag(Flag::H));
}

#[test]
fn add_half_carry_edge_cases() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xC6, 0x0F]);
    cpu.regs.a = 0xE1;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0xF0);
    assert!(cpu.regs.flag(Flag::H));
    assert!(!cpu.regs.flag(Flag::C));

    let (mut cpu, mut bus) = cpu_with_program(&[0xC6, 0x1F]);
    cpu.regs.a = 0xE1;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.flag(Flag::Z));
    assert!(cpu.regs.flag(Flag::H));
    assert!(cpu.regs.flag(Flag::C));
}

#[test]
fn daa_fixes_non_bcd_low_nibble() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x27]);
    cpu.regs.a = 0x0A;
    cpu.regs.f = 0x00;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x10);
    assert!(!cpu.regs.flag(Flag::Z));
    assert!(!cpu.regs.flag(Flag::H));
    assert!(!cpu.regs.flag(Flag::C));
}

#[test]
fn call_pushes_return_address_high_byte_first() {
    let mut bus = TestBus::default();
    bus.memory[0x5675..0x5678].copy_from_slice(&[0xCD, 0x34, 0x12]);
    bus.memory[0x1234] = 0xC9;
    let mut cpu = Cpu::new();
    cpu.regs.pc = 0x5675;
    cpu.regs.sp = 0xFFFE;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x1234);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFD], 0x56);
    assert_eq!(bus.memory[0xFFFC], 0x78);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x5678);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn jr_displacement_is_relative_to_next_instruction() {
    for (disp, target) in [(0xFEu8, 0x00FFu16), (0x10, 0x0111)] {
        let mut bus = TestBus::default();
        bus.memory[0x00FF] = 0x18;
        bus.memory[0x0100] = disp;
        let mut cpu = Cpu::new();
        cpu.regs.pc = 0x00FF;
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.regs.pc, target);
    }
}
