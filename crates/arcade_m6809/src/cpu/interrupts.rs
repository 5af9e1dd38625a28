use super::decode::Stack;
use super::exec::mask;
use super::{Bus6809, CcFlags, Cpu, WaitState, VECTOR_FIRQ, VECTOR_IRQ, VECTOR_NMI};

/// The three hardware interrupt inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InterruptLine {
    Nmi,
    Firq,
    Irq,
}

/// Pending state of the interrupt inputs.
///
/// The host raises a line; the CPU clears it as soon as the line's entry
/// sequence begins. A masked line stays pending until it is taken or the host
/// clears it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterruptLines {
    nmi: bool,
    firq: bool,
    irq: bool,
}

impl InterruptLines {
    fn slot(&mut self, line: InterruptLine) -> &mut bool {
        match line {
            InterruptLine::Nmi => &mut self.nmi,
            InterruptLine::Firq => &mut self.firq,
            InterruptLine::Irq => &mut self.irq,
        }
    }

    #[inline]
    pub fn raise(&mut self, line: InterruptLine) {
        *self.slot(line) = true;
    }

    #[inline]
    pub fn clear(&mut self, line: InterruptLine) {
        *self.slot(line) = false;
    }

    #[inline]
    pub fn is_pending(&self, line: InterruptLine) -> bool {
        match line {
            InterruptLine::Nmi => self.nmi,
            InterruptLine::Firq => self.firq,
            InterruptLine::Irq => self.irq,
        }
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.nmi || self.firq || self.irq
    }
}

const NMI_CYCLES: u32 = 19;
const FIRQ_CYCLES: u32 = 10;
const IRQ_CYCLES: u32 = 19;
/// Entry cost when CWAI has already stacked the machine state.
const CWAI_ENTRY_CYCLES: u32 = 7;

impl Cpu {
    pub fn raise_interrupt(&mut self, line: InterruptLine) {
        self.lines.raise(line);
    }

    pub fn clear_interrupt(&mut self, line: InterruptLine) {
        self.lines.clear(line);
    }

    pub fn interrupt_pending(&self, line: InterruptLine) -> bool {
        self.lines.is_pending(line)
    }

    /// Take the highest-priority unmasked interrupt, if any.
    ///
    /// Called at instruction boundaries. Returns the entry cost when an
    /// interrupt was taken. A SYNC wait ends on any asserted line, masked or
    /// not; a masked one simply lets execution continue.
    pub(super) fn service_interrupts<B: Bus6809>(&mut self, bus: &mut B) -> Option<u32> {
        let masks = self.cc.mask();
        let line = if self.lines.nmi {
            InterruptLine::Nmi
        } else if self.lines.firq && !masks.contains(CcFlags::F) {
            InterruptLine::Firq
        } else if self.lines.irq && !masks.contains(CcFlags::I) {
            InterruptLine::Irq
        } else {
            if self.wait == WaitState::Sync && self.lines.any() {
                self.wait = WaitState::Running;
            }
            return None;
        };

        let stacked = self.wait == WaitState::Cwai;
        self.wait = WaitState::Running;

        let (vector, cycles) = match line {
            InterruptLine::Nmi => {
                self.lines.nmi = false;
                if !stacked {
                    self.cc.set_mask(CcFlags::E, true);
                    self.push_entire_state(bus);
                }
                self.cc.set_mask(CcFlags::I | CcFlags::F, true);
                (VECTOR_NMI, NMI_CYCLES)
            }
            InterruptLine::Firq => {
                self.lines.firq = false;
                if !stacked {
                    self.cc.set_mask(CcFlags::E, false);
                    self.push_registers(bus, Stack::S, mask::PC | mask::CC);
                }
                self.cc.set_mask(CcFlags::I | CcFlags::F, true);
                (VECTOR_FIRQ, FIRQ_CYCLES)
            }
            InterruptLine::Irq => {
                self.lines.irq = false;
                if !stacked {
                    self.cc.set_mask(CcFlags::E, true);
                    self.push_entire_state(bus);
                }
                self.cc.set_mask(CcFlags::I, true);
                (VECTOR_IRQ, IRQ_CYCLES)
            }
        };

        self.regs.pc = bus.load_word(vector);
        log::debug!(
            "M6809 {:?} taken: vector=0x{:04X} PC=0x{:04X} S=0x{:04X}",
            line,
            vector,
            self.regs.pc,
            self.regs.s
        );
        Some(if stacked { CWAI_ENTRY_CYCLES } else { cycles })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_raise_and_clear_independently() {
        let mut lines = InterruptLines::default();
        assert!(!lines.any());
        lines.raise(InterruptLine::Irq);
        lines.raise(InterruptLine::Nmi);
        assert!(lines.is_pending(InterruptLine::Irq));
        assert!(!lines.is_pending(InterruptLine::Firq));
        lines.clear(InterruptLine::Irq);
        assert!(!lines.is_pending(InterruptLine::Irq));
        assert!(lines.any());
    }
}
