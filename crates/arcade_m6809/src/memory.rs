use anyhow::{ensure, Result};

use crate::cpu::Bus6809;
use crate::{ADDRESS_SPACE, FETCH_LEN};

/// 64 KiB of plain RAM covering the whole address space.
///
/// Useful on its own for tests and tooling, and as the backing store of a
/// board's own bus before its memory-mapped devices are layered on top.
#[derive(Clone)]
pub struct FlatBus {
    memory: Vec<u8>,
}

impl Default for FlatBus {
    fn default() -> Self {
        Self::new()
    }
}

impl FlatBus {
    pub fn new() -> Self {
        Self {
            memory: vec![0; ADDRESS_SPACE],
        }
    }

    /// Copy `image` into memory starting at `addr`.
    pub fn load(&mut self, addr: u16, image: &[u8]) -> Result<()> {
        let start = addr as usize;
        let end = start + image.len();
        ensure!(
            end <= ADDRESS_SPACE,
            "image of {} bytes at 0x{:04X} runs past the end of the address space",
            image.len(),
            addr
        );
        self.memory[start..end].copy_from_slice(image);
        Ok(())
    }

    /// Store a big-endian word, e.g. to plant an interrupt vector.
    pub fn set_word(&mut self, addr: u16, value: u16) {
        self.store_word(addr, value);
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut [u8] {
        &mut self.memory
    }
}

impl Bus6809 for FlatBus {
    #[inline]
    fn load_byte(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    #[inline]
    fn store_byte(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    fn fetch_instruction(&mut self, addr: u16) -> [u8; FETCH_LEN] {
        let start = addr as usize;
        let mut buf = [0u8; FETCH_LEN];
        if start + FETCH_LEN <= ADDRESS_SPACE {
            buf.copy_from_slice(&self.memory[start..start + FETCH_LEN]);
        } else {
            for (i, byte) in buf.iter_mut().enumerate() {
                *byte = self.memory[(start + i) % ADDRESS_SPACE];
            }
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_rejects_images_past_the_top() {
        let mut bus = FlatBus::new();
        assert!(bus.load(0xFFFE, &[1, 2]).is_ok());
        assert!(bus.load(0xFFFE, &[1, 2, 3]).is_err());
        assert_eq!(bus.memory()[0xFFFF], 2);
    }

    #[test]
    fn words_are_big_endian_and_wrap() {
        let mut bus = FlatBus::new();
        bus.set_word(0x1000, 0xBEEF);
        assert_eq!(bus.memory()[0x1000], 0xBE);
        assert_eq!(bus.memory()[0x1001], 0xEF);

        bus.store_word(0xFFFF, 0x1234);
        assert_eq!(bus.memory()[0xFFFF], 0x12);
        assert_eq!(bus.memory()[0x0000], 0x34);
        assert_eq!(bus.load_word(0xFFFF), 0x1234);
    }

    #[test]
    fn fetch_wraps_at_the_top() {
        let mut bus = FlatBus::new();
        bus.load(0xFFFD, &[1, 2, 3]).unwrap();
        bus.load(0x0000, &[4, 5]).unwrap();
        assert_eq!(bus.fetch_instruction(0xFFFD), [1, 2, 3, 4, 5]);
    }
}
