use crate::FETCH_LEN;

use super::Snapshot;

/// Host side of the 6809 address space.
///
/// The core never owns memory. Every opcode fetch, operand access and stack
/// transfer goes through this trait, so memory-mapped devices see exactly the
/// accesses the real CPU would make. Implementations must not call back into
/// the `Cpu` run loops.
pub trait Bus6809 {
    fn load_byte(&mut self, addr: u16) -> u8;
    fn store_byte(&mut self, addr: u16, value: u8);

    /// Fill the lookahead buffer used for decoding, starting at `addr`.
    ///
    /// The default reads `FETCH_LEN` bytes through `load_byte`, wrapping at
    /// the top of the address space. Hosts with side-effecting device
    /// registers in ROM space can override this with a plain copy.
    fn fetch_instruction(&mut self, addr: u16) -> [u8; FETCH_LEN] {
        let mut buf = [0u8; FETCH_LEN];
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.load_byte(addr.wrapping_add(i as u16));
        }
        buf
    }

    /// Big-endian 16-bit load.
    fn load_word(&mut self, addr: u16) -> u16 {
        let hi = self.load_byte(addr);
        let lo = self.load_byte(addr.wrapping_add(1));
        u16::from_be_bytes([hi, lo])
    }

    /// Big-endian 16-bit store. Each byte address wraps independently.
    fn store_word(&mut self, addr: u16, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.store_byte(addr, hi);
        self.store_byte(addr.wrapping_add(1), lo);
    }

    /// Called when the CPU decodes the configured trap opcode.
    ///
    /// The snapshot carries every register; changes made to it are written
    /// back before the returned opcode is executed in place of the trap.
    /// The default does nothing and returns NOP.
    fn trap(&mut self, _snapshot: &mut Snapshot) -> u8 {
        0x12
    }
}
