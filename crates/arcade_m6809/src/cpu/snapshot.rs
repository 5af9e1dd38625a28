use bitflags::bitflags;

use super::{ConditionCodes, Cpu};

/// Flat copy of the programmer-visible state.
///
/// `cc` is the packed condition-code byte. `clock` and `timer_at` mirror the
/// scheduler counters so a host can inspect or rewind timing as well.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub pc: u16,
    pub a: u8,
    pub b: u8,
    pub x: u16,
    pub y: u16,
    pub s: u16,
    pub u: u16,
    pub dp: u8,
    pub cc: u8,
    pub clock: u64,
    pub timer_at: u64,
}

bitflags! {
    /// Selects which [`Snapshot`] fields a read or write touches.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SnapshotFields: u16 {
        const PC = 1 << 0;
        const A = 1 << 1;
        const B = 1 << 2;
        const X = 1 << 3;
        const Y = 1 << 4;
        const S = 1 << 5;
        const U = 1 << 6;
        const DP = 1 << 7;
        const CC = 1 << 8;
        const CLOCK = 1 << 9;
        const TIMER = 1 << 10;

        const D = Self::A.bits() | Self::B.bits();
        const REGISTERS = Self::PC.bits()
            | Self::D.bits()
            | Self::X.bits()
            | Self::Y.bits()
            | Self::S.bits()
            | Self::U.bits()
            | Self::DP.bits()
            | Self::CC.bits();
    }
}

impl Cpu {
    /// Copy out every field.
    pub fn snapshot(&self) -> Snapshot {
        let mut snap = Snapshot::default();
        self.read_snapshot(&mut snap, SnapshotFields::all());
        snap
    }

    /// Refresh only the selected fields of `snap`.
    pub fn read_snapshot(&self, snap: &mut Snapshot, fields: SnapshotFields) {
        if fields.contains(SnapshotFields::PC) {
            snap.pc = self.regs.pc;
        }
        if fields.contains(SnapshotFields::A) {
            snap.a = self.regs.a;
        }
        if fields.contains(SnapshotFields::B) {
            snap.b = self.regs.b;
        }
        if fields.contains(SnapshotFields::X) {
            snap.x = self.regs.x;
        }
        if fields.contains(SnapshotFields::Y) {
            snap.y = self.regs.y;
        }
        if fields.contains(SnapshotFields::S) {
            snap.s = self.regs.s;
        }
        if fields.contains(SnapshotFields::U) {
            snap.u = self.regs.u;
        }
        if fields.contains(SnapshotFields::DP) {
            snap.dp = self.regs.dp;
        }
        if fields.contains(SnapshotFields::CC) {
            snap.cc = self.cc.pack();
        }
        if fields.contains(SnapshotFields::CLOCK) {
            snap.clock = self.clock;
        }
        if fields.contains(SnapshotFields::TIMER) {
            snap.timer_at = self.timer_at;
        }
    }

    /// Write the selected fields of `snap` back into the CPU.
    pub fn apply_snapshot(&mut self, snap: &Snapshot, fields: SnapshotFields) {
        if fields.contains(SnapshotFields::PC) {
            self.regs.pc = snap.pc;
        }
        if fields.contains(SnapshotFields::A) {
            self.regs.a = snap.a;
        }
        if fields.contains(SnapshotFields::B) {
            self.regs.b = snap.b;
        }
        if fields.contains(SnapshotFields::X) {
            self.regs.x = snap.x;
        }
        if fields.contains(SnapshotFields::Y) {
            self.regs.y = snap.y;
        }
        if fields.contains(SnapshotFields::S) {
            self.regs.s = snap.s;
        }
        if fields.contains(SnapshotFields::U) {
            self.regs.u = snap.u;
        }
        if fields.contains(SnapshotFields::DP) {
            self.regs.dp = snap.dp;
        }
        if fields.contains(SnapshotFields::CC) {
            self.cc = ConditionCodes::from_packed(snap.cc);
        }
        if fields.contains(SnapshotFields::CLOCK) {
            self.clock = snap.clock;
        }
        if fields.contains(SnapshotFields::TIMER) {
            self.timer_at = snap.timer_at;
        }
    }
}
