use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use tracing::debug;

use crate::engine::{Effect, Effects, Engine};
use crate::runtime::{AppEvent, IntervalTimer};
use crate::typing_policy::{command_for_key, edit_input, Command};

pub const TITLE: &str = "Typing Speed Calculator";
pub const SUBTITLE: &str = "Test your typing speed and accuracy!";

/// Period of the elapsed-time tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Button,
}

/// The one button on screen at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Button {
    #[strum(to_string = "Stop Test")]
    StopTest,
    #[strum(to_string = "Reset")]
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Page root: mounts the typing test and hosts its side effects (the tick
/// timer and input focus).
#[derive(Debug)]
pub struct Shell {
    pub engine: Engine,
    pub focus: Focus,
    pub show_key_hints: bool,
    timer: Option<IntervalTimer>,
}

impl Shell {
    pub fn new(engine: Engine, show_key_hints: bool) -> Self {
        Self {
            engine,
            focus: Focus::Button,
            show_key_hints,
            timer: None,
        }
    }

    pub fn mount(&mut self, now: Instant) {
        let effects = self.engine.mount();
        self.run_effects(effects, now);
    }

    pub fn unmount(&mut self, now: Instant) {
        let effects = self.engine.unmount();
        self.run_effects(effects, now);
    }

    pub fn visible_button(&self) -> Button {
        if self.engine.has_finished() {
            Button::Reset
        } else {
            Button::StopTest
        }
    }

    pub fn input_enabled(&self) -> bool {
        !self.engine.has_finished()
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Runs one event from the loop. The tick timer is polled first on every
    /// event, so elapsed time stays current even when keys arrive faster than
    /// the frame interval.
    pub fn handle_event(&mut self, event: AppEvent, now: Instant) -> Flow {
        self.on_tick(now);
        match event {
            AppEvent::Key(key) => self.handle_key(key, now),
            AppEvent::Tick | AppEvent::Resize => Flow::Continue,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        let command = command_for_key(key);
        match command {
            Command::Quit => return Flow::Quit,
            Command::Stop => self.press(Button::StopTest, now),
            Command::Reset => self.press(Button::Reset, now),
            Command::FocusNext | Command::FocusPrev => self.cycle_focus(),
            Command::Submit if self.focus == Focus::Button => {
                self.press(self.visible_button(), now)
            }
            Command::Insert(_) | Command::Backspace | Command::Submit => {
                if self.focus == Focus::Input && self.input_enabled() {
                    if let Some(next) = edit_input(self.engine.input(), command) {
                        let effects = self.engine.input_changed(next);
                        self.run_effects(effects, now);
                    }
                }
            }
            Command::Ignore => {}
        }
        Flow::Continue
    }

    /// Delivers one engine tick per timer period that came due.
    pub fn on_tick(&mut self, now: Instant) {
        let due = match self.timer.as_mut() {
            Some(timer) => timer.poll(now),
            None => 0,
        };
        for _ in 0..due {
            let effects = self.engine.tick();
            self.run_effects(effects, now);
        }
    }

    fn press(&mut self, button: Button, now: Instant) {
        if button != self.visible_button() {
            return;
        }
        let effects = match button {
            Button::StopTest => self.engine.stop(),
            Button::Reset => self.engine.reset(),
        };
        self.run_effects(effects, now);
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Button,
            Focus::Button if self.input_enabled() => Focus::Input,
            Focus::Button => Focus::Button,
        };
    }

    fn run_effects(&mut self, effects: Effects, now: Instant) {
        for effect in effects {
            debug!(?effect, "running effect");
            match effect {
                Effect::StartTimer => self.timer = Some(IntervalTimer::start(TICK_PERIOD, now)),
                Effect::StopTimer => self.timer = None,
                Effect::FocusInput => self.focus = Focus::Input,
            }
        }
        // a disabled input cannot keep focus
        if !self.input_enabled() {
            self.focus = Focus::Button;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SampleText;
    use crate::session::{Phase, TestState};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn mounted(sample: &str, now: Instant) -> Shell {
        let mut shell = Shell::new(Engine::with_sample(SampleText::new(sample)), true);
        shell.mount(now);
        shell
    }

    fn type_str(shell: &mut Shell, text: &str, now: Instant) {
        for c in text.chars() {
            shell.handle_key(key(KeyCode::Char(c)), now);
        }
    }

    #[test]
    fn test_mount_focuses_input_without_timer() {
        let shell = mounted("abc", Instant::now());
        assert_eq!(shell.focus, Focus::Input);
        assert!(!shell.timer_armed());
        assert_eq!(shell.visible_button(), Button::StopTest);
    }

    #[test]
    fn test_first_key_arms_timer() {
        let t0 = Instant::now();
        let mut shell = mounted("abc", t0);
        type_str(&mut shell, "a", t0);
        assert!(shell.timer_armed());
        assert_eq!(shell.engine.phase(), Phase::Running);
    }

    #[test]
    fn test_timer_ticks_elapsed_seconds() {
        let t0 = Instant::now();
        let mut shell = mounted("abc", t0);
        type_str(&mut shell, "a", t0);

        shell.on_tick(t0 + Duration::from_millis(500));
        assert_eq!(shell.engine.state().elapsed_seconds, 0);
        shell.on_tick(t0 + Duration::from_millis(1000));
        assert_eq!(shell.engine.state().elapsed_seconds, 1);
        shell.on_tick(t0 + Duration::from_millis(3100));
        assert_eq!(shell.engine.state().elapsed_seconds, 3);
    }

    #[test]
    fn test_completion_disarms_timer_and_freezes() {
        let t0 = Instant::now();
        let mut shell = mounted("ab", t0);
        type_str(&mut shell, "a", t0);
        shell.on_tick(t0 + Duration::from_secs(2));
        type_str(&mut shell, "B", t0 + Duration::from_secs(2));

        assert!(!shell.timer_armed());
        assert_eq!(shell.engine.phase(), Phase::Finished);
        assert_eq!(shell.focus, Focus::Button);
        assert_eq!(shell.visible_button(), Button::Reset);

        let frozen = shell.engine.state().clone();
        shell.on_tick(t0 + Duration::from_secs(10));
        type_str(&mut shell, "zz", t0 + Duration::from_secs(10));
        shell.handle_key(key(KeyCode::Backspace), t0 + Duration::from_secs(10));
        assert_eq!(shell.engine.state(), &frozen);
        assert_eq!(frozen.elapsed_seconds, 2);
    }

    #[test]
    fn test_stop_chord_disarms_timer() {
        let t0 = Instant::now();
        let mut shell = mounted("abc", t0);
        type_str(&mut shell, "a", t0);
        shell.handle_key(ctrl('s'), t0);
        assert!(!shell.timer_armed());
        assert!(shell.engine.has_finished());
    }

    #[test]
    fn test_reset_restores_mount_state() {
        let t0 = Instant::now();
        let mut shell = mounted("abc", t0);
        type_str(&mut shell, "ax", t0);
        shell.on_tick(t0 + Duration::from_secs(1));
        shell.handle_key(ctrl('s'), t0 + Duration::from_secs(1));

        shell.handle_key(ctrl('r'), t0 + Duration::from_secs(2));
        assert_eq!(shell.engine.state(), &TestState::default());
        assert!(!shell.timer_armed());
        assert_eq!(shell.focus, Focus::Input);
        assert_eq!(shell.visible_button(), Button::StopTest);
    }

    #[test]
    fn test_reset_chord_ignored_while_running() {
        let t0 = Instant::now();
        let mut shell = mounted("abc", t0);
        type_str(&mut shell, "a", t0);
        shell.handle_key(ctrl('r'), t0);
        assert_eq!(shell.engine.input(), "a");
        assert!(shell.timer_armed());
    }

    #[test]
    fn test_enter_on_focused_button_presses_it() {
        let t0 = Instant::now();
        let mut shell = mounted("abc", t0);
        type_str(&mut shell, "a", t0);
        shell.handle_key(key(KeyCode::Tab), t0);
        assert_eq!(shell.focus, Focus::Button);
        shell.handle_key(key(KeyCode::Enter), t0);
        assert!(shell.engine.has_finished());

        // Reset is now the visible button and already focused
        shell.handle_key(key(KeyCode::Enter), t0);
        assert_eq!(shell.engine.phase(), Phase::Idle);
        assert_eq!(shell.focus, Focus::Input);
    }

    #[test]
    fn test_enter_in_input_inserts_newline() {
        let t0 = Instant::now();
        let mut shell = mounted("abc", t0);
        type_str(&mut shell, "a", t0);
        shell.handle_key(key(KeyCode::Enter), t0);
        assert_eq!(shell.engine.input(), "a\n");
    }

    #[test]
    fn test_typing_with_button_focused_is_ignored() {
        let t0 = Instant::now();
        let mut shell = mounted("abc", t0);
        shell.handle_key(key(KeyCode::Tab), t0);
        type_str(&mut shell, "a", t0);
        assert_eq!(shell.engine.input(), "");
        assert!(!shell.timer_armed());
    }

    #[test]
    fn test_focus_cannot_return_to_disabled_input() {
        let t0 = Instant::now();
        let mut shell = mounted("abc", t0);
        shell.handle_key(ctrl('s'), t0);
        shell.handle_key(key(KeyCode::Tab), t0);
        assert_eq!(shell.focus, Focus::Button);
    }

    #[test]
    fn test_unmount_disarms_timer() {
        let t0 = Instant::now();
        let mut shell = mounted("abc", t0);
        type_str(&mut shell, "a", t0);
        shell.unmount(t0);
        assert!(!shell.timer_armed());
    }

    #[test]
    fn test_quit_keys() {
        let t0 = Instant::now();
        let mut shell = mounted("abc", t0);
        assert_eq!(shell.handle_key(key(KeyCode::Esc), t0), Flow::Quit);
        assert_eq!(shell.handle_key(ctrl('c'), t0), Flow::Quit);
        assert_eq!(shell.handle_key(key(KeyCode::Char('q')), t0), Flow::Continue);
    }

    #[test]
    fn test_button_labels() {
        assert_eq!(Button::StopTest.to_string(), "Stop Test");
        assert_eq!(Button::Reset.to_string(), "Reset");
    }
}
