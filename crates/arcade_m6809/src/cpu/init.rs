use super::{
    Bus6809, CcFlags, ConditionCodes, Cpu, CpuConfig, InterruptLines, Registers, WaitState,
    TIMER_DISABLED, VECTOR_RESET,
};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        let mut cc = ConditionCodes::default();
        cc.set_mask(CcFlags::I | CcFlags::F, true);
        Self {
            regs: Registers::default(),
            cc,
            lines: InterruptLines::default(),
            clock: 0,
            timer_at: TIMER_DISABLED,
            timer: None,
            wait: WaitState::Running,
            illegal: false,
            instructions: 0,
            config,
        }
    }

    /// Hardware reset.
    ///
    /// Clears DP, masks both IRQ and FIRQ, drops pending interrupt lines and
    /// any CWAI/SYNC wait, then loads PC from the reset vector. The cycle
    /// counter and the registered timer are left alone.
    pub fn reset<B: Bus6809>(&mut self, bus: &mut B) {
        self.regs.dp = 0;
        self.cc.set_mask(CcFlags::I | CcFlags::F, true);
        self.lines = InterruptLines::default();
        self.wait = WaitState::Running;
        self.illegal = false;
        self.regs.pc = bus.load_word(VECTOR_RESET);
        log::debug!("M6809 reset: PC=0x{:04X}", self.regs.pc);
    }
}
