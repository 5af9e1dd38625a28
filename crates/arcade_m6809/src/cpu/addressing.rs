use super::decode::{AddressingMode, DecodeEntry};
use super::{Bus6809, Cpu, RegisterId};

/// Where an instruction's operand lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectiveAddress {
    Memory(u16),
    /// Inherent operand: the opcode names the register(s) itself.
    Register,
}

impl EffectiveAddress {
    pub fn address(self) -> Option<u16> {
        match self {
            Self::Memory(addr) => Some(addr),
            Self::Register => None,
        }
    }
}

#[inline]
fn word(buf: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([buf[at], buf[at + 1]])
}

#[inline]
fn sext8(value: u8) -> u16 {
    value as i8 as i16 as u16
}

/// Sign-extend the low five bits of an indexed post-byte.
///
/// Bit 4 is the sign; `0b1_0000` is the lone −16 encoding.
#[inline]
fn offset5(postbyte: u8) -> u16 {
    match postbyte & 0x1F {
        0x10 => (-16i16) as u16,
        n if n & 0x10 != 0 => (i16::from(n) - 0x20) as u16,
        n => u16::from(n),
    }
}

/// Indexed post-bytes with no defined addressing mode: sub-modes 7, A and E,
/// a non-indirect `n16` (0x8F), and indirect single auto-increment or
/// decrement (`[,R+]`, `[,-R]`).
fn undefined_postbyte(postbyte: u8) -> bool {
    let indirect = postbyte & 0x10 != 0;
    match postbyte & 0x0F {
        0x7 | 0xA | 0xE => true,
        0x0 | 0x2 => indirect,
        0xF => !indirect,
        _ => false,
    }
}

impl Cpu {
    /// Compute the effective address for `entry`.
    ///
    /// `buf` is the fetched instruction and `operand` the index of the first
    /// byte after the opcode. PC must already point past the `entry.length`
    /// bytes; indexed modes with trailing offset bytes advance it further.
    /// Returns the address and the cycles charged on top of the table cost.
    pub(super) fn resolve<B: Bus6809>(
        &mut self,
        bus: &mut B,
        entry: &DecodeEntry,
        buf: &[u8],
        operand: usize,
    ) -> (EffectiveAddress, u32) {
        let pc = self.regs.pc;
        match entry.mode {
            AddressingMode::Inherent => (EffectiveAddress::Register, 0),
            AddressingMode::Immediate8 => (EffectiveAddress::Memory(pc.wrapping_sub(1)), 0),
            AddressingMode::Immediate16 => (EffectiveAddress::Memory(pc.wrapping_sub(2)), 0),
            AddressingMode::Direct => {
                let addr = u16::from_be_bytes([self.regs.dp, buf[operand]]);
                (EffectiveAddress::Memory(addr), 0)
            }
            AddressingMode::Extended => (EffectiveAddress::Memory(word(buf, operand)), 0),
            AddressingMode::Relative8 => {
                let target = pc.wrapping_add(sext8(buf[operand]));
                (EffectiveAddress::Memory(target), 0)
            }
            AddressingMode::Relative16 => {
                let target = pc.wrapping_add(word(buf, operand));
                (EffectiveAddress::Memory(target), 0)
            }
            AddressingMode::Indexed => {
                let (addr, cycles) = self.indexed(bus, buf, operand);
                (EffectiveAddress::Memory(addr), cycles)
            }
        }
    }

    fn indexed<B: Bus6809>(&mut self, bus: &mut B, buf: &[u8], at: usize) -> (u16, u32) {
        let postbyte = buf[at];
        let reg = RegisterId::from_index_bits(postbyte);
        let base = self.read_register(reg);

        if postbyte & 0x80 == 0 {
            return (base.wrapping_add(offset5(postbyte)), 1);
        }
        if undefined_postbyte(postbyte) {
            self.flag_illegal(postbyte);
            return (base, 0);
        }

        let (addr, mut cycles) = match postbyte & 0x0F {
            // ,R+
            0x0 => {
                self.write_register(reg, base.wrapping_add(1));
                (base, 2)
            }
            // ,R++
            0x1 => {
                self.write_register(reg, base.wrapping_add(2));
                (base, 3)
            }
            // ,-R
            0x2 => {
                let addr = base.wrapping_sub(1);
                self.write_register(reg, addr);
                (addr, 2)
            }
            // ,--R
            0x3 => {
                let addr = base.wrapping_sub(2);
                self.write_register(reg, addr);
                (addr, 3)
            }
            // ,R
            0x4 => (base, 0),
            0x5 => (base.wrapping_add(sext8(self.regs.b)), 1),
            0x6 => (base.wrapping_add(sext8(self.regs.a)), 1),
            // n8,R
            0x8 => {
                self.regs.pc = self.regs.pc.wrapping_add(1);
                (base.wrapping_add(sext8(buf[at + 1])), 1)
            }
            // n16,R
            0x9 => {
                self.regs.pc = self.regs.pc.wrapping_add(2);
                (base.wrapping_add(word(buf, at + 1)), 4)
            }
            0xB => (base.wrapping_add(self.regs.d()), 4),
            // n8,PCR
            0xC => {
                self.regs.pc = self.regs.pc.wrapping_add(1);
                (self.regs.pc.wrapping_add(sext8(buf[at + 1])), 1)
            }
            // n16,PCR
            0xD => {
                self.regs.pc = self.regs.pc.wrapping_add(2);
                (self.regs.pc.wrapping_add(word(buf, at + 1)), 5)
            }
            // [n16]
            0xF => {
                self.regs.pc = self.regs.pc.wrapping_add(2);
                (word(buf, at + 1), 2)
            }
            _ => (base, 0),
        };

        if postbyte & 0x10 != 0 {
            cycles += 3;
            return (bus.load_word(addr), cycles);
        }
        (addr, cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_bit_offsets() {
        assert_eq!(offset5(0x01), 1);
        assert_eq!(offset5(0x0F), 15);
        assert_eq!(offset5(0x1F), 0xFFFF);
        assert_eq!(offset5(0x10), 0xFFF0);
        // Register select bits are ignored.
        assert_eq!(offset5(0x70), 0xFFF0);
    }

    #[test]
    fn undefined_indexed_forms() {
        for postbyte in [0x87, 0x97, 0x8A, 0xAE, 0x8F, 0x90, 0x92, 0xD2] {
            assert!(undefined_postbyte(postbyte), "{postbyte:02X}");
        }
        for postbyte in [0x80, 0x82, 0x91, 0x93, 0x9F, 0x84, 0x94, 0x8D] {
            assert!(!undefined_postbyte(postbyte), "{postbyte:02X}");
        }
    }

    #[test]
    fn sign_extension() {
        assert_eq!(sext8(0x7F), 0x007F);
        assert_eq!(sext8(0x80), 0xFF80);
    }
}
