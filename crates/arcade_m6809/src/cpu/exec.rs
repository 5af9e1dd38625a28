mod alu;
mod branch;
mod stack;
mod system;
mod transfer;
mod unary;

pub(super) use stack::mask;

use crate::FETCH_LEN;

use super::decode::{self, AddressingMode, DecodeEntry, Op};
use super::{Bus6809, Cpu, EffectiveAddress};

/// A decoded instruction with its operand location resolved.
pub(super) struct Instr {
    pub entry: &'static DecodeEntry,
    pub buf: [u8; FETCH_LEN],
    /// Index in `buf` of the first byte after the opcode.
    pub operand: usize,
    pub ea: EffectiveAddress,
}

impl Instr {
    /// First operand byte as fetched, for post-byte and immediate forms.
    #[inline]
    pub fn byte(&self) -> u8 {
        self.buf[self.operand]
    }

    #[inline]
    fn addr(&self) -> u16 {
        debug_assert!(
            matches!(self.ea, EffectiveAddress::Memory(_)),
            "{:?} has no memory operand",
            self.entry.op
        );
        self.ea.address().unwrap_or_default()
    }
}

impl Cpu {
    /// Fetch, decode and execute the instruction at PC.
    ///
    /// Returns the cycles consumed: table cost, addressing penalty and any
    /// data-dependent extra (stacked registers, taken long branches).
    pub(super) fn execute_instruction<B: Bus6809>(&mut self, bus: &mut B) -> u32 {
        let start = self.regs.pc;
        let buf = bus.fetch_instruction(start);
        self.instructions += 1;
        self.execute_buffer(bus, start, buf)
    }

    /// Execute the instruction held in `buf` as if it had been fetched at
    /// `start`.
    pub(super) fn execute_buffer<B: Bus6809>(
        &mut self,
        bus: &mut B,
        start: u16,
        buf: [u8; FETCH_LEN],
    ) -> u32 {
        let index = decode::table_index(&buf);
        let paged = index >= 0x100;

        if !paged && self.config.trap_opcode == Some(buf[0]) {
            return self.exec_trap(bus, start);
        }

        let entry = decode::lookup(index);
        // An undefined escape-page opcode still consumes its prefix.
        let length = if paged && entry.op == Op::Illegal {
            2
        } else {
            entry.length
        };
        self.regs.pc = start.wrapping_add(u16::from(length));

        let operand = if paged { 2 } else { 1 };
        let (ea, penalty) = self.resolve(bus, entry, &buf, operand);
        let instr = Instr {
            entry,
            buf,
            operand,
            ea,
        };
        let extra = self.dispatch(bus, &instr, buf[operand - 1]);
        u32::from(entry.cycles) + penalty + extra
    }

    fn dispatch<B: Bus6809>(&mut self, bus: &mut B, instr: &Instr, opcode: u8) -> u32 {
        match instr.entry.op {
            Op::Illegal => {
                self.flag_illegal(opcode);
                0
            }
            Op::Nop => 0,
            Op::Sync => self.exec_sync(),
            Op::Unary(op, target) => {
                self.exec_unary(bus, instr, op, target);
                0
            }
            Op::Jmp => {
                self.regs.pc = instr.addr();
                0
            }
            Op::Alu(op, target) => {
                self.exec_alu(bus, instr, op, target);
                0
            }
            Op::St(target) => {
                self.exec_store8(bus, instr, target);
                0
            }
            Op::AddD => {
                let value = self.read_operand16(bus, instr);
                let d = self.regs.d();
                let d = self.cc.add16(d, value);
                self.regs.set_d(d);
                0
            }
            Op::SubD => {
                let value = self.read_operand16(bus, instr);
                let d = self.regs.d();
                let d = self.cc.sub16(d, value);
                self.regs.set_d(d);
                0
            }
            Op::Cmp16(reg) => {
                let value = self.read_operand16(bus, instr);
                let current = self.read_register(reg);
                self.cc.sub16(current, value);
                0
            }
            Op::Ld16(reg) => {
                self.exec_load16(bus, instr, reg);
                0
            }
            Op::St16(reg) => {
                self.exec_store16(bus, instr, reg);
                0
            }
            Op::Branch(cond) => {
                self.exec_branch(instr, cond);
                0
            }
            Op::LongBranch(cond) => self.exec_long_branch(instr, cond),
            Op::Bsr | Op::Jsr => {
                self.exec_call(bus, instr);
                0
            }
            Op::Rts => {
                self.regs.pc = self.pull16(bus, decode::Stack::S);
                0
            }
            Op::Lea(reg) => {
                self.exec_lea(instr, reg);
                0
            }
            Op::Abx => {
                self.regs.x = self.regs.x.wrapping_add(u16::from(self.regs.b));
                0
            }
            Op::Push(stack) => self.push_registers(bus, stack, instr.byte()),
            Op::Pull(stack) => self.pull_registers(bus, stack, instr.byte()),
            Op::Tfr => {
                self.exec_tfr(instr.byte());
                0
            }
            Op::Exg => {
                self.exec_exg(instr.byte());
                0
            }
            Op::Daa => {
                self.exec_daa();
                0
            }
            Op::Mul => {
                self.exec_mul();
                0
            }
            Op::Sex => {
                self.regs.a = if self.regs.b & 0x80 != 0 { 0xFF } else { 0x00 };
                let d = self.regs.d();
                self.cc.set_nz16(d);
                0
            }
            Op::Andcc => {
                let packed = self.cc.pack() & instr.byte();
                self.cc.unpack(packed);
                0
            }
            Op::Orcc => {
                let packed = self.cc.pack() | instr.byte();
                self.cc.unpack(packed);
                0
            }
            Op::Cwai => self.exec_cwai(bus, instr.byte()),
            Op::Rti => self.exec_rti(bus),
            Op::Swi => self.exec_swi(bus, 1),
            Op::Swi2 => self.exec_swi(bus, 2),
            Op::Swi3 => self.exec_swi(bus, 3),
        }
    }

    /// 8-bit operand: immediates come from the fetch buffer, everything else
    /// from the bus.
    pub(super) fn read_operand8<B: Bus6809>(&mut self, bus: &mut B, instr: &Instr) -> u8 {
        match instr.entry.mode {
            AddressingMode::Immediate8 => instr.byte(),
            _ => bus.load_byte(instr.addr()),
        }
    }

    pub(super) fn read_operand16<B: Bus6809>(&mut self, bus: &mut B, instr: &Instr) -> u16 {
        match instr.entry.mode {
            AddressingMode::Immediate16 => {
                u16::from_be_bytes([instr.buf[instr.operand], instr.buf[instr.operand + 1]])
            }
            _ => bus.load_word(instr.addr()),
        }
    }
}
