/// Identifies the countdown a tick belongs to. Ticks from an earlier turn carry a stale
/// generation and are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Ignored,
    Running(u32),
    Expired,
}

/// Countdown for the active turn, driven by an external one-second tick.
#[derive(Debug, Clone)]
pub struct TurnTimer {
    duration: u32,
    remaining: u32,
    running: bool,
    generation: u64,
}

impl TurnTimer {
    pub fn new(duration: u32) -> Self {
        TurnTimer {
            duration,
            remaining: duration,
            running: false,
            generation: 0,
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn token(&self) -> TimerToken {
        TimerToken {
            generation: self.generation,
        }
    }

    pub fn start(&mut self) -> TimerToken {
        self.running = self.remaining > 0;
        self.token()
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stops the countdown, restores the full duration and invalidates outstanding tokens.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.duration;
        self.generation += 1;
    }

    pub fn tick(&mut self, token: TimerToken) -> TickOutcome {
        if !self.running || token != self.token() {
            return TickOutcome::Ignored;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.remaining)
        }
    }
}
