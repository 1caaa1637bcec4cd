use crate::matching::Metrics;

/// Everything a single typing test mutates. Created on mount, returned to
/// `Default` on reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestState {
    pub user_input: String,
    pub timer_started: bool,
    pub elapsed_seconds: u64,
    pub is_finished: bool,
    pub metrics: Metrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

impl TestState {
    pub fn phase(&self) -> Phase {
        if self.is_finished {
            Phase::Finished
        } else if self.timer_started {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    /// True while the one-second tick should be armed.
    pub fn timer_active(&self) -> bool {
        self.timer_started && !self.is_finished
    }
}
