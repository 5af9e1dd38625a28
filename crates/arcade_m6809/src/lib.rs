pub mod cpu;
pub mod memory;

pub use cpu::{
    Bus6809, CcFlags, ConditionCodes, Cpu, CpuConfig, InterruptLine, InterruptLines, RegisterId,
    Registers, Snapshot, SnapshotFields, TimerContext, TIMER_DISABLED,
};
pub use memory::FlatBus;

/// Size of the 6809 address space.
pub const ADDRESS_SPACE: usize = 0x10000;

/// Number of bytes handed to the core by one `fetch_instruction` call.
///
/// Covers the longest encoding: page escape, opcode, indexed post-byte and a
/// 16-bit offset.
pub const FETCH_LEN: usize = 5;
