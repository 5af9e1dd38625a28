use crate::cpu::decode::{Cond, Stack};
use crate::cpu::{Bus6809, Cpu};

use super::Instr;

impl Cpu {
    /// Evaluate a branch predicate against the current flags.
    pub(in crate::cpu) fn condition(&self, cond: Cond) -> bool {
        let cc = &self.cc;
        match cond {
            Cond::Always => true,
            Cond::Never => false,
            Cond::Hi => !(cc.c() || cc.z()),
            Cond::Ls => cc.c() || cc.z(),
            Cond::Cc => !cc.c(),
            Cond::Cs => cc.c(),
            Cond::Ne => !cc.z(),
            Cond::Eq => cc.z(),
            Cond::Vc => !cc.v(),
            Cond::Vs => cc.v(),
            Cond::Pl => !cc.n(),
            Cond::Mi => cc.n(),
            Cond::Ge => cc.n() == cc.v(),
            Cond::Lt => cc.n() != cc.v(),
            Cond::Gt => !cc.z() && cc.n() == cc.v(),
            Cond::Le => cc.z() || cc.n() != cc.v(),
        }
    }

    pub(super) fn exec_branch(&mut self, instr: &Instr, cond: Cond) {
        if self.condition(cond) {
            self.regs.pc = instr.addr();
        }
    }

    /// Long branches always consume their 16-bit offset. Conditional forms
    /// cost one more cycle when taken; LBRA does not.
    pub(super) fn exec_long_branch(&mut self, instr: &Instr, cond: Cond) -> u32 {
        if !self.condition(cond) {
            return 0;
        }
        self.regs.pc = instr.addr();
        u32::from(cond != Cond::Always)
    }

    /// BSR, LBSR and JSR.
    pub(super) fn exec_call<B: Bus6809>(&mut self, bus: &mut B, instr: &Instr) {
        let target = instr.addr();
        let ret = self.regs.pc;
        self.push16(bus, Stack::S, ret);
        self.regs.pc = target;
    }
}
