use crate::cpu::decode::Stack;
use crate::cpu::{Bus6809, Cpu};

/// PSH/PUL post-byte bits.
pub(in crate::cpu) mod mask {
    pub const CC: u8 = 0x01;
    pub const A: u8 = 0x02;
    pub const B: u8 = 0x04;
    pub const DP: u8 = 0x08;
    pub const X: u8 = 0x10;
    pub const Y: u8 = 0x20;
    /// U when pushing onto S, S when pushing onto U.
    pub const OTHER: u8 = 0x40;
    pub const PC: u8 = 0x80;
    pub const ALL: u8 = 0xFF;
}

impl Cpu {
    fn stack_pointer(&mut self, stack: Stack) -> &mut u16 {
        match stack {
            Stack::S => &mut self.regs.s,
            Stack::U => &mut self.regs.u,
        }
    }

    pub(in crate::cpu) fn push8<B: Bus6809>(&mut self, bus: &mut B, stack: Stack, value: u8) {
        let sp = self.stack_pointer(stack);
        *sp = sp.wrapping_sub(1);
        let addr = *sp;
        bus.store_byte(addr, value);
    }

    pub(in crate::cpu) fn push16<B: Bus6809>(&mut self, bus: &mut B, stack: Stack, value: u16) {
        let sp = self.stack_pointer(stack);
        *sp = sp.wrapping_sub(2);
        let addr = *sp;
        bus.store_word(addr, value);
    }

    pub(in crate::cpu) fn pull8<B: Bus6809>(&mut self, bus: &mut B, stack: Stack) -> u8 {
        let sp = self.stack_pointer(stack);
        let addr = *sp;
        *sp = sp.wrapping_add(1);
        bus.load_byte(addr)
    }

    pub(in crate::cpu) fn pull16<B: Bus6809>(&mut self, bus: &mut B, stack: Stack) -> u16 {
        let sp = self.stack_pointer(stack);
        let addr = *sp;
        *sp = sp.wrapping_add(2);
        bus.load_word(addr)
    }

    /// PSHS/PSHU. Registers go out PC first and CC last, so CC ends up at the
    /// lowest address. Returns one cycle per byte transferred.
    pub(in crate::cpu) fn push_registers<B: Bus6809>(
        &mut self,
        bus: &mut B,
        stack: Stack,
        postbyte: u8,
    ) -> u32 {
        let mut cycles = 0;
        if postbyte & mask::PC != 0 {
            self.push16(bus, stack, self.regs.pc);
            cycles += 2;
        }
        if postbyte & mask::OTHER != 0 {
            let other = match stack {
                Stack::S => self.regs.u,
                Stack::U => self.regs.s,
            };
            self.push16(bus, stack, other);
            cycles += 2;
        }
        if postbyte & mask::Y != 0 {
            self.push16(bus, stack, self.regs.y);
            cycles += 2;
        }
        if postbyte & mask::X != 0 {
            self.push16(bus, stack, self.regs.x);
            cycles += 2;
        }
        if postbyte & mask::DP != 0 {
            self.push8(bus, stack, self.regs.dp);
            cycles += 1;
        }
        if postbyte & mask::B != 0 {
            self.push8(bus, stack, self.regs.b);
            cycles += 1;
        }
        if postbyte & mask::A != 0 {
            self.push8(bus, stack, self.regs.a);
            cycles += 1;
        }
        if postbyte & mask::CC != 0 {
            let cc = self.cc.pack();
            self.push8(bus, stack, cc);
            cycles += 1;
        }
        cycles
    }

    /// PULS/PULU, the mirror image of [`Cpu::push_registers`].
    pub(in crate::cpu) fn pull_registers<B: Bus6809>(
        &mut self,
        bus: &mut B,
        stack: Stack,
        postbyte: u8,
    ) -> u32 {
        let mut cycles = 0;
        if postbyte & mask::CC != 0 {
            let cc = self.pull8(bus, stack);
            self.cc.unpack(cc);
            cycles += 1;
        }
        if postbyte & mask::A != 0 {
            self.regs.a = self.pull8(bus, stack);
            cycles += 1;
        }
        if postbyte & mask::B != 0 {
            self.regs.b = self.pull8(bus, stack);
            cycles += 1;
        }
        if postbyte & mask::DP != 0 {
            self.regs.dp = self.pull8(bus, stack);
            cycles += 1;
        }
        if postbyte & mask::X != 0 {
            self.regs.x = self.pull16(bus, stack);
            cycles += 2;
        }
        if postbyte & mask::Y != 0 {
            self.regs.y = self.pull16(bus, stack);
            cycles += 2;
        }
        if postbyte & mask::OTHER != 0 {
            let value = self.pull16(bus, stack);
            match stack {
                Stack::S => self.regs.u = value,
                Stack::U => self.regs.s = value,
            }
            cycles += 2;
        }
        if postbyte & mask::PC != 0 {
            self.regs.pc = self.pull16(bus, stack);
            cycles += 2;
        }
        cycles
    }

    /// Stack every register on S, as interrupt entry and SWI do. The caller
    /// sets E beforehand so the stacked CC records a full frame.
    pub(in crate::cpu) fn push_entire_state<B: Bus6809>(&mut self, bus: &mut B) {
        self.push_registers(bus, Stack::S, mask::ALL);
    }
}
