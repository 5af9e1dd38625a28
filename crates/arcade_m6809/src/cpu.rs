mod addressing;
mod bus;
mod cc;
mod decode;
mod exec;
mod init;
mod interrupts;
mod regs;
mod schedule;
mod snapshot;


use std::fmt;

use typed_builder::TypedBuilder;

pub use addressing::EffectiveAddress;
pub use bus::Bus6809;
pub use cc::{CcFlags, ConditionCodes};
pub use interrupts::{InterruptLine, InterruptLines};
pub use regs::{RegisterId, Registers};
pub use schedule::{TimerCallback, TimerContext, TIMER_DISABLED};
pub use snapshot::{Snapshot, SnapshotFields};

pub const VECTOR_SWI3: u16 = 0xFFF2;
pub const VECTOR_SWI2: u16 = 0xFFF4;
pub const VECTOR_FIRQ: u16 = 0xFFF6;
pub const VECTOR_IRQ: u16 = 0xFFF8;
pub const VECTOR_SWI: u16 = 0xFFFA;
pub const VECTOR_NMI: u16 = 0xFFFC;
pub const VECTOR_RESET: u16 = 0xFFFE;

/// Undefined base-page opcode used as the host trap by default.
pub const DEFAULT_TRAP_OPCODE: u8 = 0x3E;

/// Host-selectable behaviour of the core.
///
/// ```
/// use arcade_m6809::CpuConfig;
///
/// let config = CpuConfig::builder().stop_on_illegal(true).build();
/// assert_eq!(config.trap_opcode, Some(0x3E));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, TypedBuilder)]
pub struct CpuConfig {
    /// Base-page opcode that calls [`Bus6809::trap`]. Must be one of the
    /// undefined base-page slots; `None` leaves every hole illegal.
    #[builder(default = Some(DEFAULT_TRAP_OPCODE))]
    pub trap_opcode: Option<u8>,
    /// Return from `run_cycles`/`run_until` as soon as the illegal flag is
    /// set. The flag stays set until [`Cpu::clear_illegal`].
    #[builder(default = false)]
    pub stop_on_illegal: bool,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// What the CPU is doing between instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WaitState {
    Running,
    /// CWAI executed: entire state already stacked, waiting for an interrupt.
    Cwai,
    /// SYNC executed: waiting for any interrupt line.
    Sync,
}

/// Motorola 6809 core.
///
/// One value owns the whole CPU state; boards with several 6809s run one
/// `Cpu` per chip.
pub struct Cpu {
    pub regs: Registers,
    pub cc: ConditionCodes,
    lines: InterruptLines,
    clock: u64,
    timer_at: u64,
    timer: Option<TimerCallback>,
    wait: WaitState,
    illegal: bool,
    instructions: u64,
    config: CpuConfig,
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("regs", &self.regs)
            .field("cc", &format_args!("{:02X}", self.cc.pack()))
            .field("lines", &self.lines)
            .field("clock", &self.clock)
            .field("timer_at", &self.timer_at)
            .field("wait", &self.wait)
            .field("illegal", &self.illegal)
            .finish_non_exhaustive()
    }
}

impl Cpu {
    #[inline]
    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// True once an undefined opcode or post-byte has been executed.
    #[inline]
    pub fn illegal_encountered(&self) -> bool {
        self.illegal
    }

    #[inline]
    pub fn clear_illegal(&mut self) {
        self.illegal = false;
    }

    /// Instructions executed since construction. Interrupt entries and
    /// wait-state idling are not counted.
    #[inline]
    pub fn instructions_executed(&self) -> u64 {
        self.instructions
    }

    /// True while parked in CWAI or SYNC.
    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.wait != WaitState::Running
    }

    /// Read any register as 16 bits.
    ///
    /// 8-bit registers read as `0xFF00 | value`, which is what a TFR or EXG
    /// into a 16-bit register produces on the real chip.
    pub fn read_register(&self, id: RegisterId) -> u16 {
        match id {
            RegisterId::D => self.regs.d(),
            RegisterId::X => self.regs.x,
            RegisterId::Y => self.regs.y,
            RegisterId::U => self.regs.u,
            RegisterId::S => self.regs.s,
            RegisterId::Pc => self.regs.pc,
            RegisterId::A => 0xFF00 | u16::from(self.regs.a),
            RegisterId::B => 0xFF00 | u16::from(self.regs.b),
            RegisterId::Cc => 0xFF00 | u16::from(self.cc.pack()),
            RegisterId::Dp => 0xFF00 | u16::from(self.regs.dp),
        }
    }

    /// Write any register from 16 bits; 8-bit registers keep the low byte.
    pub fn write_register(&mut self, id: RegisterId, value: u16) {
        match id {
            RegisterId::D => self.regs.set_d(value),
            RegisterId::X => self.regs.x = value,
            RegisterId::Y => self.regs.y = value,
            RegisterId::U => self.regs.u = value,
            RegisterId::S => self.regs.s = value,
            RegisterId::Pc => self.regs.pc = value,
            RegisterId::A => self.regs.a = value as u8,
            RegisterId::B => self.regs.b = value as u8,
            RegisterId::Cc => self.cc.unpack(value as u8),
            RegisterId::Dp => self.regs.dp = value as u8,
        }
    }
}
