use crate::cpu::decode::{Target, Unary};
use crate::cpu::{Bus6809, Cpu};

use super::Instr;

impl Cpu {
    pub(super) fn exec_unary<B: Bus6809>(
        &mut self,
        bus: &mut B,
        instr: &Instr,
        op: Unary,
        target: Target,
    ) {
        match target {
            Target::A => self.regs.a = self.unary(op, self.regs.a),
            Target::B => self.regs.b = self.unary(op, self.regs.b),
            Target::Memory => {
                let addr = instr.addr();
                let value = bus.load_byte(addr);
                let result = self.unary(op, value);
                if op != Unary::Tst {
                    bus.store_byte(addr, result);
                }
            }
        }
    }

    /// Apply a read-modify-write operation and update the flags it defines.
    fn unary(&mut self, op: Unary, value: u8) -> u8 {
        match op {
            Unary::Neg => self.cc.sub8(0, value, false),
            Unary::Com => {
                let result = !value;
                self.cc.logic8(result);
                self.cc.set_c(true);
                result
            }
            Unary::Lsr => {
                let result = value >> 1;
                self.cc.set_c(value & 0x01 != 0);
                self.cc.set_nz8(result);
                result
            }
            Unary::Ror => {
                let carry_in = if self.cc.c() { 0x80 } else { 0x00 };
                let result = carry_in | (value >> 1);
                self.cc.set_c(value & 0x01 != 0);
                self.cc.set_nz8(result);
                result
            }
            Unary::Asr => {
                let result = (value & 0x80) | (value >> 1);
                self.cc.set_c(value & 0x01 != 0);
                self.cc.set_nz8(result);
                result
            }
            // Shifting left is adding the value to itself; that yields the
            // data sheet's V = b7 ^ b6 for free.
            Unary::Asl => self.cc.add8(value, value, false),
            Unary::Rol => {
                let carry = self.cc.c();
                self.cc.add8(value, value, carry)
            }
            Unary::Dec => {
                let result = value.wrapping_sub(1);
                self.cc.set_nz8(result);
                self.cc.set_v(value == 0x80);
                result
            }
            Unary::Inc => {
                let result = value.wrapping_add(1);
                self.cc.set_nz8(result);
                self.cc.set_v(value == 0x7F);
                result
            }
            Unary::Tst => {
                self.cc.logic8(value);
                value
            }
            Unary::Clr => {
                self.cc.logic8(0);
                self.cc.set_c(false);
                0
            }
        }
    }
}
