use crate::cpu::decode::{Alu, Target};
use crate::cpu::{Bus6809, Cpu};

use super::Instr;

impl Cpu {
    fn accumulator(&self, target: Target) -> u8 {
        match target {
            Target::B => self.regs.b,
            _ => self.regs.a,
        }
    }

    fn set_accumulator(&mut self, target: Target, value: u8) {
        match target {
            Target::B => self.regs.b = value,
            _ => self.regs.a = value,
        }
    }

    pub(super) fn exec_alu<B: Bus6809>(&mut self, bus: &mut B, instr: &Instr, op: Alu, target: Target) {
        let operand = self.read_operand8(bus, instr);
        let acc = self.accumulator(target);
        let carry = self.cc.c();

        let result = match op {
            Alu::Sub => self.cc.sub8(acc, operand, false),
            Alu::Sbc => self.cc.sub8(acc, operand, carry),
            Alu::Add => self.cc.add8(acc, operand, false),
            Alu::Adc => self.cc.add8(acc, operand, carry),
            Alu::Cmp => {
                self.cc.sub8(acc, operand, false);
                return;
            }
            Alu::Bit => {
                self.cc.logic8(acc & operand);
                return;
            }
            Alu::And => acc & operand,
            Alu::Or => acc | operand,
            Alu::Eor => acc ^ operand,
            Alu::Ld => operand,
        };

        if matches!(op, Alu::And | Alu::Or | Alu::Eor | Alu::Ld) {
            self.cc.logic8(result);
        }
        self.set_accumulator(target, result);
    }

    pub(super) fn exec_store8<B: Bus6809>(&mut self, bus: &mut B, instr: &Instr, target: Target) {
        let value = self.accumulator(target);
        self.cc.logic8(value);
        bus.store_byte(instr.addr(), value);
    }

    /// Decimal-adjust A after adding two packed BCD bytes.
    ///
    /// Uses the half-carry and carry left behind by the ADDA/ADCA. Carry is
    /// only ever set here, never cleared.
    pub(super) fn exec_daa(&mut self) {
        let a = self.regs.a;
        let low = a & 0x0F;
        let high = a & 0xF0;

        let mut correction = 0u8;
        if self.cc.h() || low > 0x09 {
            correction |= 0x06;
        }
        if self.cc.c() || high > 0x90 || (high > 0x80 && low > 0x09) {
            correction |= 0x60;
        }

        let sum = u16::from(a) + u16::from(correction);
        let carry = self.cc.c() || sum > 0xFF;
        self.regs.a = sum as u8;
        self.cc.set_nz8(sum as u8);
        self.cc.set_c(carry);
    }

    /// D = A * B, unsigned. Z from D, C from bit 7 of the result.
    pub(super) fn exec_mul(&mut self) {
        let product = u16::from(self.regs.a) * u16::from(self.regs.b);
        self.regs.set_d(product);
        self.cc.set_z16(product);
        self.cc.set_c(product & 0x80 != 0);
    }
}
