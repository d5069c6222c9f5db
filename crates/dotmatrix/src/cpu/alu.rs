use super::{Cpu, Flag};

impl Cpu {
    /// 8-bit ADD/ADC into A. `use_carry` selects ADC.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = u8::from(use_carry && self.regs.flag(Flag::C));

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = a as u16 + value as u16 + carry_in as u16;
        let result = full as u8;

        self.regs.a = result;
        self.regs.set_flags(result == 0, false, half > 0x0F, full > 0xFF);
    }

    /// 8-bit SUB/SBC from A. `use_carry` selects SBC.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let result = self.alu_compare(value, use_carry);
        self.regs.a = result;
    }

    /// Flags of `A - value`, leaving A untouched.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.alu_compare(value, false);
    }

    fn alu_compare(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry_in = i16::from(use_carry && self.regs.flag(Flag::C));

        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry_in;
        let full = a as i16 - value as i16 - carry_in;
        let result = full as u8;

        self.regs.set_flags(result == 0, true, half < 0, full < 0);
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;
        self.regs.set_flags(result == 0, false, true, false);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;
        self.regs.set_flags(result == 0, false, false, false);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;
        self.regs.set_flags(result == 0, false, false, false);
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// Uses C, H, N and A to compute a correction; updates A, Z, H, C and
    /// leaves N unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.regs.flag(Flag::C) { 0x60 } else { 0x00 };
        if self.regs.flag(Flag::H) {
            adjust |= 0x06;
        }

        if !self.regs.flag(Flag::N) {
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.regs.set_flag(Flag::C, adjust >= 0x60);
        self.regs.set_flag(Flag::H, false);
        self.regs.set_flag(Flag::Z, a == 0);
        self.regs.a = a;
    }

    /// INC r / INC (HL). C is unchanged.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.regs.set_flag(Flag::Z, result == 0);
        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, (value & 0x0F) == 0x0F);
        result
    }

    /// DEC r / DEC (HL). C is unchanged.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.regs.set_flag(Flag::Z, result == 0);
        self.regs.set_flag(Flag::N, true);
        self.regs.set_flag(Flag::H, (value & 0x0F) == 0);
        result
    }

    /// `ADD HL,rr`: Z unaffected, N cleared, H from bit 11, C from bit 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let result = hl.wrapping_add(value);

        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.regs.set_flag(Flag::C, hl as u32 + value as u32 > 0xFFFF);

        self.regs.set_hl(result);
    }

    /// Signed 8-bit offset added to a 16-bit base, as in `ADD SP,r8` and
    /// `LD HL,SP+r8`. Z and N are cleared; H and C come from the low byte.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        self.regs.set_flags(
            false,
            false,
            (base & 0x000F) + (offset & 0x000F) > 0x000F,
            (base & 0x00FF) + (offset & 0x00FF) > 0x00FF,
        );
        base.wrapping_add(offset)
    }

    pub(super) fn alu_rlc(&mut self, value: u8) -> u8 {
        let result = value.rotate_left(1);
        self.regs.set_flags(result == 0, false, false, value & 0x80 != 0);
        result
    }

    pub(super) fn alu_rrc(&mut self, value: u8) -> u8 {
        let result = value.rotate_right(1);
        self.regs.set_flags(result == 0, false, false, value & 0x01 != 0);
        result
    }

    pub(super) fn alu_rl(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.regs.flag(Flag::C));
        let result = (value << 1) | carry_in;
        self.regs.set_flags(result == 0, false, false, value & 0x80 != 0);
        result
    }

    pub(super) fn alu_rr(&mut self, value: u8) -> u8 {
        let carry_in = if self.regs.flag(Flag::C) { 0x80 } else { 0 };
        let result = (value >> 1) | carry_in;
        self.regs.set_flags(result == 0, false, false, value & 0x01 != 0);
        result
    }

    pub(super) fn alu_sla(&mut self, value: u8) -> u8 {
        let result = value << 1;
        self.regs.set_flags(result == 0, false, false, value & 0x80 != 0);
        result
    }

    /// Arithmetic shift right: bit 7 is preserved.
    pub(super) fn alu_sra(&mut self, value: u8) -> u8 {
        let result = (value >> 1) | (value & 0x80);
        self.regs.set_flags(result == 0, false, false, value & 0x01 != 0);
        result
    }

    pub(super) fn alu_swap(&mut self, value: u8) -> u8 {
        let result = value.rotate_left(4);
        self.regs.set_flags(result == 0, false, false, false);
        result
    }

    pub(super) fn alu_srl(&mut self, value: u8) -> u8 {
        let result = value >> 1;
        self.regs.set_flags(result == 0, false, false, value & 0x01 != 0);
        result
    }
}
