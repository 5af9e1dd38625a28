use crate::cpu::regs::RegisterId;
use crate::cpu::{Bus6809, Cpu};

use super::Instr;

impl Cpu {
    pub(super) fn exec_load16<B: Bus6809>(&mut self, bus: &mut B, instr: &Instr, reg: RegisterId) {
        let value = self.read_operand16(bus, instr);
        self.cc.logic16(value);
        self.write_register(reg, value);
    }

    pub(super) fn exec_store16<B: Bus6809>(&mut self, bus: &mut B, instr: &Instr, reg: RegisterId) {
        let value = self.read_register(reg);
        self.cc.logic16(value);
        bus.store_word(instr.addr(), value);
    }

    /// LEAX/LEAY set Z; LEAS/LEAU leave the flags alone.
    pub(super) fn exec_lea(&mut self, instr: &Instr, reg: RegisterId) {
        let addr = instr.addr();
        if matches!(reg, RegisterId::X | RegisterId::Y) {
            self.cc.set_z16(addr);
        }
        self.write_register(reg, addr);
    }

    pub(super) fn exec_tfr(&mut self, postbyte: u8) {
        let value = self.transfer_source(postbyte >> 4);
        self.transfer_write(postbyte & 0x0F, value);
    }

    pub(super) fn exec_exg(&mut self, postbyte: u8) {
        let first = self.transfer_source(postbyte >> 4);
        let second = self.transfer_source(postbyte & 0x0F);
        self.transfer_write(postbyte >> 4, second);
        self.transfer_write(postbyte & 0x0F, first);
    }

    /// Undefined register codes read as all ones.
    fn transfer_source(&self, nibble: u8) -> u16 {
        match RegisterId::from_nibble(nibble) {
            Some(id) => self.read_register(id),
            None => 0xFFFF,
        }
    }

    fn transfer_write(&mut self, nibble: u8, value: u16) {
        if let Some(id) = RegisterId::from_nibble(nibble) {
            self.write_register(id, value);
        }
    }
}
