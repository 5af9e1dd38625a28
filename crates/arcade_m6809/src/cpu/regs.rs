/// Programmer-visible registers of the 6809, minus the condition codes.
///
/// Condition codes live in [`ConditionCodes`](super::ConditionCodes) because
/// most instructions update them lazily rather than as a packed byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub pc: u16,
    pub a: u8,
    pub b: u8,
    pub x: u16,
    pub y: u16,
    /// Hardware stack pointer, used by interrupts and subroutine calls.
    pub s: u16,
    /// User stack pointer.
    pub u: u16,
    pub dp: u8,
}

impl Registers {
    #[inline]
    pub fn d(&self) -> u16 {
        u16::from_be_bytes([self.a, self.b])
    }

    #[inline]
    pub fn set_d(&mut self, value: u16) {
        let [a, b] = value.to_be_bytes();
        self.a = a;
        self.b = b;
    }
}

/// Register selected by a TFR/EXG post-byte nibble or an indexed post-byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterId {
    D,
    X,
    Y,
    U,
    S,
    Pc,
    A,
    B,
    Cc,
    Dp,
}

impl RegisterId {
    /// Decode a TFR/EXG nibble. Codes 6, 7 and 0xC–0xF select nothing.
    pub fn from_nibble(nibble: u8) -> Option<Self> {
        match nibble & 0x0F {
            0x0 => Some(Self::D),
            0x1 => Some(Self::X),
            0x2 => Some(Self::Y),
            0x3 => Some(Self::U),
            0x4 => Some(Self::S),
            0x5 => Some(Self::Pc),
            0x8 => Some(Self::A),
            0x9 => Some(Self::B),
            0xA => Some(Self::Cc),
            0xB => Some(Self::Dp),
            _ => None,
        }
    }

    /// Pointer register named by bits 5–6 of an indexed post-byte.
    pub fn from_index_bits(postbyte: u8) -> Self {
        match (postbyte >> 5) & 0x03 {
            0 => Self::X,
            1 => Self::Y,
            2 => Self::U,
            _ => Self::S,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn d_is_a_high_b_low() {
        let mut regs = Registers::default();
        regs.set_d(0x12AB);
        assert_eq!(regs.a, 0x12);
        assert_eq!(regs.b, 0xAB);
        regs.b = 0x01;
        assert_eq!(regs.d(), 0x1201);
    }

    #[test]
    fn nibble_decoding_skips_holes() {
        assert_eq!(RegisterId::from_nibble(0x5), Some(RegisterId::Pc));
        assert_eq!(RegisterId::from_nibble(0xB), Some(RegisterId::Dp));
        assert_eq!(RegisterId::from_nibble(0x6), None);
        assert_eq!(RegisterId::from_nibble(0xF), None);
    }

    #[test]
    fn index_bits_select_pointer_register() {
        assert_eq!(RegisterId::from_index_bits(0x84), RegisterId::X);
        assert_eq!(RegisterId::from_index_bits(0xA4), RegisterId::Y);
        assert_eq!(RegisterId::from_index_bits(0xC4), RegisterId::U);
        assert_eq!(RegisterId::from_index_bits(0xE4), RegisterId::S);
    }
}
