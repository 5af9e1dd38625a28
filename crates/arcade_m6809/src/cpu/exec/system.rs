use crate::cpu::decode::Stack;
use crate::cpu::{
    Bus6809, CcFlags, Cpu, SnapshotFields, WaitState, VECTOR_SWI, VECTOR_SWI2, VECTOR_SWI3,
};
use crate::FETCH_LEN;

use super::stack::mask;

impl Cpu {
    /// Record an undefined opcode or indexed post-byte. Only the first hit
    /// after a reset or [`Cpu::clear_illegal`] is logged.
    pub(in crate::cpu) fn flag_illegal(&mut self, opcode: u8) {
        if !self.illegal {
            log::warn!(
                "M6809 illegal opcode 0x{:02X} near PC=0x{:04X} {:?} CC=0x{:02X}",
                opcode,
                self.regs.pc,
                self.regs,
                self.cc.pack()
            );
        }
        self.illegal = true;
    }

    /// Host trap. The bus sees and may edit every register, then the opcode
    /// it hands back runs as if it had been fetched in place of the trap.
    pub(super) fn exec_trap<B: Bus6809>(&mut self, bus: &mut B, start: u16) -> u32 {
        self.regs.pc = start.wrapping_add(1);
        let mut snapshot = self.snapshot();
        let opcode = bus.trap(&mut snapshot);
        self.apply_snapshot(&snapshot, SnapshotFields::REGISTERS);
        log::trace!(
            "M6809 trap at 0x{:04X} -> opcode 0x{:02X}, PC=0x{:04X}",
            start,
            opcode,
            self.regs.pc
        );

        if self.config.trap_opcode == Some(opcode) {
            self.flag_illegal(opcode);
            return 1;
        }

        let at = self.regs.pc.wrapping_sub(1);
        let tail = bus.fetch_instruction(self.regs.pc);
        let mut buf = [0u8; FETCH_LEN];
        buf[0] = opcode;
        buf[1..].copy_from_slice(&tail[..FETCH_LEN - 1]);
        self.execute_buffer(bus, at, buf)
    }

    pub(super) fn exec_sync(&mut self) -> u32 {
        self.wait = WaitState::Sync;
        0
    }

    pub(super) fn exec_cwai<B: Bus6809>(&mut self, bus: &mut B, imm: u8) -> u32 {
        let packed = self.cc.pack() & imm;
        self.cc.unpack(packed);
        self.cc.set_mask(CcFlags::E, true);
        self.push_entire_state(bus);
        self.wait = WaitState::Cwai;
        0
    }

    /// RTI. A set E bit in the stacked CC means the whole frame was saved.
    pub(super) fn exec_rti<B: Bus6809>(&mut self, bus: &mut B) -> u32 {
        let cc = self.pull8(bus, Stack::S);
        self.cc.unpack(cc);
        if self.cc.mask().contains(CcFlags::E) {
            self.pull_registers(bus, Stack::S, mask::ALL & !mask::CC);
            9
        } else {
            self.regs.pc = self.pull16(bus, Stack::S);
            0
        }
    }

    /// SWI, SWI2 and SWI3. Only SWI masks IRQ and FIRQ.
    pub(super) fn exec_swi<B: Bus6809>(&mut self, bus: &mut B, level: u8) -> u32 {
        self.cc.set_mask(CcFlags::E, true);
        self.push_entire_state(bus);
        let vector = match level {
            1 => {
                self.cc.set_mask(CcFlags::I | CcFlags::F, true);
                VECTOR_SWI
            }
            2 => VECTOR_SWI2,
            _ => VECTOR_SWI3,
        };
        self.regs.pc = bus.load_word(vector);
        0
    }
}
