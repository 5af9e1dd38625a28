use super::{Bus6809, Cpu, InterruptLine, InterruptLines, WaitState};

/// Timer threshold meaning "no timer armed".
pub const TIMER_DISABLED: u64 = u64::MAX;

pub type TimerCallback = Box<dyn FnMut(&mut TimerContext<'_>)>;

/// What a timer callback may touch while it runs.
///
/// The callback is one-shot unless it calls [`TimerContext::rearm`].
pub struct TimerContext<'a> {
    clock: u64,
    lines: &'a mut InterruptLines,
    next: u64,
}

impl TimerContext<'_> {
    /// Cycle count at the moment the timer fired.
    #[inline]
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Fire again once the clock reaches `at`.
    #[inline]
    pub fn rearm(&mut self, at: u64) {
        self.next = at;
    }

    /// Assert an interrupt line. It is seen at the next instruction boundary.
    #[inline]
    pub fn raise(&mut self, line: InterruptLine) {
        self.lines.raise(line);
    }

    #[inline]
    pub fn clear(&mut self, line: InterruptLine) {
        self.lines.clear(line);
    }
}

impl Cpu {
    /// Total cycles run since construction.
    #[inline]
    pub fn clock(&self) -> u64 {
        self.clock
    }

    #[inline]
    pub fn timer_threshold(&self) -> u64 {
        self.timer_at
    }

    /// Register `callback` to run once the clock reaches `threshold`,
    /// replacing any previous timer. [`TIMER_DISABLED`] keeps it dormant.
    pub fn set_timer<F>(&mut self, threshold: u64, callback: F)
    where
        F: FnMut(&mut TimerContext<'_>) + 'static,
    {
        self.timer = Some(Box::new(callback));
        self.timer_at = threshold;
    }

    pub fn clear_timer(&mut self) {
        self.timer = None;
        self.timer_at = TIMER_DISABLED;
    }

    /// Run the timer callback if its threshold has been reached.
    fn poll_timer(&mut self) -> bool {
        if self.timer_at == TIMER_DISABLED || self.clock < self.timer_at {
            return false;
        }
        let Some(mut callback) = self.timer.take() else {
            self.timer_at = TIMER_DISABLED;
            return false;
        };

        log::trace!(
            "M6809 timer fired at clock {} (threshold {})",
            self.clock,
            self.timer_at
        );
        let mut ctx = TimerContext {
            clock: self.clock,
            lines: &mut self.lines,
            next: TIMER_DISABLED,
        };
        callback(&mut ctx);
        self.timer_at = ctx.next;
        self.timer = Some(callback);
        true
    }

    /// One scheduler iteration: interrupt check, timer check, then one
    /// instruction. Returns the cycles it took.
    pub fn step<B: Bus6809>(&mut self, bus: &mut B) -> u32 {
        let horizon = self.clock.saturating_add(1);
        self.step_bounded(bus, horizon)
    }

    /// `horizon` caps how far a CWAI/SYNC wait may skip the clock ahead.
    fn step_bounded<B: Bus6809>(&mut self, bus: &mut B, horizon: u64) -> u32 {
        let mut cycles = self.service_interrupts(bus).unwrap_or(0);
        self.poll_timer();

        cycles += if self.wait == WaitState::Running {
            self.execute_instruction(bus)
        } else {
            let until = horizon.min(self.timer_at);
            let idle = until.saturating_sub(self.clock + u64::from(cycles));
            idle.clamp(1, u64::from(u32::MAX)) as u32
        };

        self.clock += u64::from(cycles);
        cycles
    }

    fn should_stop(&self) -> bool {
        self.config.stop_on_illegal && self.illegal
    }

    /// Run at least one iteration and keep going until `cycles` have elapsed.
    ///
    /// Returns the cycles actually consumed, which overshoots the budget by
    /// at most the cost of the last iteration.
    pub fn run_cycles<B: Bus6809>(&mut self, bus: &mut B, cycles: u64) -> u64 {
        let start = self.clock;
        let horizon = start.saturating_add(cycles);
        loop {
            self.step_bounded(bus, horizon);
            if self.clock - start >= cycles || self.should_stop() {
                break;
            }
        }
        self.clock - start
    }

    /// Run until the clock reaches `target`. Returns the number of
    /// instructions executed.
    pub fn run_until<B: Bus6809>(&mut self, bus: &mut B, target: u64) -> u64 {
        let before = self.instructions;
        while self.clock < target {
            self.step_bounded(bus, target);
            if self.should_stop() {
                break;
            }
        }
        self.instructions - before
    }
}
