use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::model::ValueParseError;
use crate::model::config::PomodoroConfig;
use crate::model::store::TaskStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PomodoroMode {
    #[default]
    Focus,
    ShortBreak,
    LongBreak,
}

impl PomodoroMode {
    pub const ALL: [PomodoroMode; 3] = [
        PomodoroMode::Focus,
        PomodoroMode::ShortBreak,
        PomodoroMode::LongBreak,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PomodoroMode::Focus => "Focus",
            PomodoroMode::ShortBreak => "Short Break",
            PomodoroMode::LongBreak => "Long Break",
        }
    }

    pub fn duration_secs(self, config: &PomodoroConfig) -> u32 {
        let minutes = match self {
            PomodoroMode::Focus => config.focus_minutes,
            PomodoroMode::ShortBreak => config.short_break_minutes,
            PomodoroMode::LongBreak => config.long_break_minutes,
        };
        minutes.saturating_mul(60)
    }
}

impl fmt::Display for PomodoroMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PomodoroMode::Focus => write!(f, "focus"),
            PomodoroMode::ShortBreak => write!(f, "short-break"),
            PomodoroMode::LongBreak => write!(f, "long-break"),
        }
    }
}

impl FromStr for PomodoroMode {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "focus" => Ok(PomodoroMode::Focus),
            "shortbreak" | "short" => Ok(PomodoroMode::ShortBreak),
            "longbreak" | "long" => Ok(PomodoroMode::LongBreak),
            _ => Err(ValueParseError::new("pomodoro mode", s)),
        }
    }
}

/// Countdown state for one session. Driven by `tick` from whatever clock the
/// caller has; it never sleeps itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    pub mode: PomodoroMode,
    pub total_secs: u32,
    pub remaining_secs: u32,
    pub running: bool,
}

impl Timer {
    pub fn new(mode: PomodoroMode, config: &PomodoroConfig) -> Self {
        let total = mode.duration_secs(config);
        Timer {
            mode,
            total_secs: total,
            remaining_secs: total,
            running: false,
        }
    }

    pub fn start(&mut self) {
        if self.remaining_secs > 0 {
            self.running = true;
        }
    }

    /// Advance by `secs`. Returns `true` when this tick finished the session.
    pub fn tick(&mut self, secs: u32) -> bool {
        if !self.running {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(secs);
        if self.remaining_secs == 0 {
            self.running = false;
            return true;
        }
        false
    }

    pub fn status_text(&self) -> String {
        if self.running {
            format!("{} - Running", self.mode.label())
        } else if self.remaining_secs == 0 {
            format!("{} session finished!", self.mode.label())
        } else if self.mode == PomodoroMode::Focus {
            "Ready to focus".into()
        } else {
            "Ready to take a break".into()
        }
    }
}

/// Record a finished session; only focus sessions count. Returns the new count.
pub fn complete_session(store: &mut TaskStore, mode: PomodoroMode) -> u32 {
    if mode == PomodoroMode::Focus {
        store.completed_pomodoros = store.completed_pomodoros.saturating_add(1);
        debug!(count = store.completed_pomodoros, "focus session completed");
    }
    store.completed_pomodoros
}

/// `mm:ss`
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
