use crate::matching::{self, CharClass};
use crate::sample::SampleText;
use crate::session::{Phase, TestState};
use tracing::{debug, info};

/// Something that happened to the test widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Mount,
    InputChanged(String),
    Tick,
    Stop,
    Reset,
    Unmount,
}

/// Work the host has to carry out after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StartTimer,
    StopTimer,
    FocusInput,
}

pub type Effects = Vec<Effect>;

/// Computes the state following `action`, together with the effects the host
/// must run. Never mutates `state`.
pub fn transition(state: &TestState, sample: &SampleText, action: Action) -> (TestState, Effects) {
    let mut next = state.clone();
    let mut effects = Effects::new();

    match action {
        Action::Mount => effects.push(Effect::FocusInput),
        Action::InputChanged(input) => {
            if next.is_finished {
                return (next, effects);
            }

            let first_input = !next.timer_started && !input.is_empty();
            next.user_input = input;

            if sample.matches(&next.user_input) {
                if next.timer_active() {
                    effects.push(Effect::StopTimer);
                }
                next.timer_started = true;
                finish(&mut next, sample);
            } else {
                if first_input {
                    next.timer_started = true;
                    effects.push(Effect::StartTimer);
                }
                if next.timer_started {
                    next.metrics =
                        matching::live_metrics(&next.user_input, next.elapsed_seconds, sample);
                }
            }
        }
        Action::Tick => {
            if next.timer_active() {
                next.elapsed_seconds += 1;
                next.metrics =
                    matching::live_metrics(&next.user_input, next.elapsed_seconds, sample);
            }
        }
        Action::Stop => {
            if !next.is_finished {
                if next.timer_active() {
                    effects.push(Effect::StopTimer);
                }
                finish(&mut next, sample);
            }
        }
        Action::Reset => {
            if state.timer_active() {
                effects.push(Effect::StopTimer);
            }
            next = TestState::default();
            effects.push(Effect::FocusInput);
        }
        Action::Unmount => {
            if state.timer_active() {
                effects.push(Effect::StopTimer);
            }
        }
    }

    (next, effects)
}

fn finish(state: &mut TestState, sample: &SampleText) {
    state.is_finished = true;
    state.metrics = matching::final_metrics(&state.user_input, state.elapsed_seconds, sample);
}

/// The typing test widget: owns the reference text and the state of the
/// current attempt, and advances it one action at a time.
#[derive(Debug, Clone)]
pub struct Engine {
    sample: SampleText,
    state: TestState,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_sample(SampleText::default())
    }

    pub fn with_sample(sample: SampleText) -> Self {
        Self {
            sample,
            state: TestState::default(),
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Effects {
        let before = self.state.phase();
        let (next, effects) = transition(&self.state, &self.sample, action);
        self.state = next;

        let after = self.state.phase();
        if before != after {
            info!(
                from = %before,
                to = %after,
                elapsed = self.state.elapsed_seconds,
                wpm = self.state.metrics.wpm,
                accuracy = self.state.metrics.accuracy,
                errors = self.state.metrics.errors,
                "phase changed"
            );
        }
        if !effects.is_empty() {
            debug!(?effects, "transition effects");
        }
        effects
    }

    pub fn mount(&mut self) -> Effects {
        self.dispatch(Action::Mount)
    }

    pub fn input_changed(&mut self, input: impl Into<String>) -> Effects {
        self.dispatch(Action::InputChanged(input.into()))
    }

    pub fn tick(&mut self) -> Effects {
        self.dispatch(Action::Tick)
    }

    pub fn stop(&mut self) -> Effects {
        self.dispatch(Action::Stop)
    }

    pub fn reset(&mut self) -> Effects {
        self.dispatch(Action::Reset)
    }

    pub fn unmount(&mut self) -> Effects {
        self.dispatch(Action::Unmount)
    }

    pub fn state(&self) -> &TestState {
        &self.state
    }

    pub fn sample(&self) -> &SampleText {
        &self.sample
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn has_finished(&self) -> bool {
        self.state.is_finished
    }

    pub fn input(&self) -> &str {
        &self.state.user_input
    }

    pub fn highlights(&self) -> Vec<(char, CharClass)> {
        matching::classify(&self.state.user_input, &self.sample)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
