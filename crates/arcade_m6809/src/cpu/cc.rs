use bitflags::bitflags;

bitflags! {
    /// Bits of the packed condition-code register.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CcFlags: u8 {
        const C = 0x01;
        const V = 0x02;
        const Z = 0x04;
        const N = 0x08;
        const I = 0x10;
        const H = 0x20;
        const F = 0x40;
        const E = 0x80;
    }
}

impl CcFlags {
    /// Bits stored verbatim instead of being derived from ALU results.
    pub const MASKS: CcFlags = CcFlags::E.union(CcFlags::F).union(CcFlags::I);
}

/// Lazily evaluated condition codes.
///
/// Instructions record the operands and result they produced; the
/// architectural flags are derived on demand:
///
/// - C: bit 8 of `result`
/// - Z: low byte of `result` is zero
/// - N: bit 7 of `sign`
/// - V: bit 7 of `minuend ^ subtrahend ^ overflow ^ (overflow >> 1)`,
///   i.e. carry into bit 7 xor carry out of bit 7
/// - H: bit 4 of `half_lhs ^ half_rhs`
///
/// 16-bit operations fold their high byte (plus a "low byte non-zero" bit
/// for Z) into the same fields so the formulas above stay valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConditionCodes {
    result: u16,
    minuend: u16,
    subtrahend: u16,
    sign: u16,
    overflow: u16,
    half_lhs: u8,
    half_rhs: u8,
    mask: CcFlags,
}

impl Default for ConditionCodes {
    fn default() -> Self {
        Self::from_packed(0)
    }
}

impl ConditionCodes {
    pub fn from_packed(byte: u8) -> Self {
        let mut cc = Self {
            result: 0,
            minuend: 0,
            subtrahend: 0,
            sign: 0,
            overflow: 0,
            half_lhs: 0,
            half_rhs: 0,
            mask: CcFlags::empty(),
        };
        cc.unpack(byte);
        cc
    }

    /// Architectural condition-code byte.
    pub fn pack(&self) -> u8 {
        let mut flags = self.mask;
        flags.set(CcFlags::C, self.c());
        flags.set(CcFlags::V, self.v());
        flags.set(CcFlags::Z, self.z());
        flags.set(CcFlags::N, self.n());
        flags.set(CcFlags::H, self.h());
        flags.bits()
    }

    /// Rebuild a working set that packs back to `byte`.
    pub fn unpack(&mut self, byte: u8) {
        let flags = CcFlags::from_bits_retain(byte);
        self.mask = flags & CcFlags::MASKS;
        self.result = if flags.contains(CcFlags::C) { 0x100 } else { 0 }
            | if flags.contains(CcFlags::Z) { 0 } else { 1 };
        self.sign = if flags.contains(CcFlags::N) { 0x80 } else { 0 };
        self.minuend = if flags.contains(CcFlags::V) { 0x80 } else { 0 };
        self.subtrahend = 0;
        self.overflow = 0;
        self.half_lhs = if flags.contains(CcFlags::H) { 0x10 } else { 0 };
        self.half_rhs = 0;
    }

    #[inline]
    pub fn c(&self) -> bool {
        self.result & 0x100 != 0
    }

    #[inline]
    pub fn z(&self) -> bool {
        self.result & 0xFF == 0
    }

    #[inline]
    pub fn n(&self) -> bool {
        self.sign & 0x80 != 0
    }

    #[inline]
    pub fn v(&self) -> bool {
        (self.minuend ^ self.subtrahend ^ self.overflow ^ (self.overflow >> 1)) & 0x80 != 0
    }

    #[inline]
    pub fn h(&self) -> bool {
        (self.half_lhs ^ self.half_rhs) & 0x10 != 0
    }

    #[inline]
    pub fn mask(&self) -> CcFlags {
        self.mask
    }

    /// Set or clear any of E, F and I. Other bits are ignored.
    #[inline]
    pub fn set_mask(&mut self, flags: CcFlags, on: bool) {
        self.mask.set(flags & CcFlags::MASKS, on);
    }

    #[inline]
    pub fn set_c(&mut self, on: bool) {
        self.result = (self.result & 0xFF) | if on { 0x100 } else { 0 };
    }

    #[inline]
    pub fn set_v(&mut self, on: bool) {
        self.minuend = if on { 0x80 } else { 0 };
        self.subtrahend = 0;
        self.overflow = 0;
    }

    /// N and Z from an 8-bit value; C, V and H untouched.
    #[inline]
    pub fn set_nz8(&mut self, value: u8) {
        self.result = (self.result & 0x100) | u16::from(value);
        self.sign = u16::from(value);
    }

    /// N and Z from a 16-bit value; C, V and H untouched.
    #[inline]
    pub fn set_nz16(&mut self, value: u16) {
        self.set_z16(value);
        self.sign = value >> 8;
    }

    /// Z only, from a 16-bit value.
    #[inline]
    pub fn set_z16(&mut self, value: u16) {
        self.result = (self.result & 0x100) | u16::from(value != 0);
    }

    /// Flags for loads, stores and logical ops: N, Z from `value`, V cleared.
    #[inline]
    pub fn logic8(&mut self, value: u8) {
        self.set_nz8(value);
        self.set_v(false);
    }

    #[inline]
    pub fn logic16(&mut self, value: u16) {
        self.set_nz16(value);
        self.set_v(false);
    }

    /// `a + b + carry` with H, N, Z, V and C recorded.
    pub fn add8(&mut self, a: u8, b: u8, carry: bool) -> u8 {
        let r = u16::from(a) + u16::from(b) + u16::from(carry);
        self.result = r;
        self.sign = r;
        self.minuend = u16::from(a);
        self.subtrahend = u16::from(b);
        self.overflow = r;
        self.half_lhs = a ^ b;
        self.half_rhs = r as u8;
        r as u8
    }

    /// `a - b - borrow` with N, Z, V and C recorded. H is left alone.
    pub fn sub8(&mut self, a: u8, b: u8, borrow: bool) -> u8 {
        let r = u16::from(a)
            .wrapping_sub(u16::from(b))
            .wrapping_sub(u16::from(borrow))
            & 0x1FF;
        self.result = r;
        self.sign = r;
        self.minuend = u16::from(a);
        self.subtrahend = u16::from(b);
        self.overflow = r;
        r as u8
    }

    pub fn add16(&mut self, a: u16, b: u16) -> u16 {
        let r = u32::from(a) + u32::from(b);
        self.record16(a, b, r);
        r as u16
    }

    pub fn sub16(&mut self, a: u16, b: u16) -> u16 {
        let r = u32::from(a).wrapping_sub(u32::from(b)) & 0x1_FFFF;
        self.record16(a, b, r);
        r as u16
    }

    fn record16(&mut self, a: u16, b: u16, r: u32) {
        let high = ((r >> 8) & 0x1FF) as u16;
        self.result = (high & 0x100) | u16::from(r & 0xFFFF != 0);
        self.sign = high & 0xFF;
        self.minuend = a >> 8;
        self.subtrahend = b >> 8;
        self.overflow = high;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_byte_round_trips() {
        for byte in 0..=0xFFu8 {
            let mut cc = ConditionCodes::default();
            cc.unpack(byte);
            assert_eq!(cc.pack(), byte, "byte {byte:02X}");
            let packed = cc.pack();
            cc.unpack(packed);
            assert_eq!(cc.pack(), byte);
        }
    }

    #[test]
    fn add8_signed_overflow_and_half_carry() {
        let mut cc = ConditionCodes::default();
        assert_eq!(cc.add8(0x7F, 0x01, false), 0x80);
        assert!(cc.v());
        assert!(cc.n());
        assert!(cc.h());
        assert!(!cc.c());
        assert!(!cc.z());

        assert_eq!(cc.add8(0xFF, 0x01, false), 0x00);
        assert!(cc.c());
        assert!(cc.z());
        assert!(!cc.v());
    }

    #[test]
    fn sub8_borrow_and_overflow() {
        let mut cc = ConditionCodes::default();
        assert_eq!(cc.sub8(0x00, 0x01, false), 0xFF);
        assert!(cc.c());
        assert!(cc.n());
        assert!(!cc.v());

        assert_eq!(cc.sub8(0x80, 0x01, false), 0x7F);
        assert!(cc.v());
        assert!(!cc.c());
    }

    #[test]
    fn sub8_keeps_half_carry_history() {
        let mut cc = ConditionCodes::default();
        cc.add8(0x08, 0x08, false);
        assert!(cc.h());
        cc.sub8(0x10, 0x01, false);
        assert!(cc.h());
    }

    #[test]
    fn add16_folds_into_byte_flags() {
        let mut cc = ConditionCodes::default();
        assert_eq!(cc.add16(0x7FFF, 0x0001), 0x8000);
        assert!(cc.v());
        assert!(cc.n());
        assert!(!cc.z());
        assert!(!cc.c());

        assert_eq!(cc.add16(0xFF00, 0x0100), 0x0000);
        assert!(cc.z());
        assert!(cc.c());

        // Low byte alone must keep Z clear.
        assert_eq!(cc.sub16(0x0105, 0x0100), 0x0005);
        assert!(!cc.z());
        assert!(!cc.n());
    }

    #[test]
    fn nz_updates_preserve_carry_and_overflow() {
        let mut cc = ConditionCodes::default();
        cc.add8(0x7F, 0x81, false);
        assert!(cc.c());
        cc.set_v(true);
        cc.set_nz8(0x00);
        assert!(cc.c());
        assert!(cc.v());
        assert!(cc.z());
    }

    #[test]
    fn masks_are_verbatim() {
        let mut cc = ConditionCodes::default();
        cc.set_mask(CcFlags::E | CcFlags::I | CcFlags::C, true);
        assert_eq!(cc.mask(), CcFlags::E | CcFlags::I);
        assert!(!cc.c());
        assert_eq!(cc.pack() & 0xD0, 0x90);
    }
}
