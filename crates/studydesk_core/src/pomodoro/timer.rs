//! Pomodoro countdown state machine.
//!
//! # Invariants
//! - `remaining_seconds` stays within `[0, max(work, break) * 60]`.
//! - `tick` only decrements while running and never goes below zero.
//! - Reaching zero completes the session exactly once: the timer pauses,
//!   flips phase and reloads the new phase's full duration.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const WORK_MINUTES_RANGE: (u32, u32) = (1, 60);
pub const BREAK_MINUTES_RANGE: (u32, u32) = (1, 30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    InvalidDuration {
        phase: Phase,
        minutes: u32,
        min: u32,
        max: u32,
    },
}

impl Display for TimerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDuration {
                phase,
                minutes,
                min,
                max,
            } => write!(
                f,
                "{} duration {minutes} minutes is outside {min}..={max}",
                phase.as_str()
            ),
        }
    }
}

impl Error for TimerError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
        }
    }

    /// Label shown under the countdown.
    pub fn label(self) -> &'static str {
        match self {
            Self::Work => "Focus Time",
            Self::Break => "Break Time",
        }
    }

    fn flipped(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Paused,
    Running,
}

/// Validated work/break durations in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    work_minutes: u32,
    break_minutes: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl TimerSettings {
    pub fn new(work_minutes: u32, break_minutes: u32) -> Result<Self, TimerError> {
        check_range(Phase::Work, work_minutes, WORK_MINUTES_RANGE)?;
        check_range(Phase::Break, break_minutes, BREAK_MINUTES_RANGE)?;
        Ok(Self {
            work_minutes,
            break_minutes,
        })
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    pub fn minutes_for(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work_minutes,
            Phase::Break => self.break_minutes,
        }
    }

    pub fn seconds_for(&self, phase: Phase) -> u32 {
        self.minutes_for(phase) * 60
    }
}

fn check_range(phase: Phase, minutes: u32, (min, max): (u32, u32)) -> Result<(), TimerError> {
    if (min..=max).contains(&minutes) {
        Ok(())
    } else {
        Err(TimerError::InvalidDuration {
            phase,
            minutes,
            min,
            max,
        })
    }
}

/// User-facing notification emitted when a session completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseNotice {
    /// Phase the timer just entered.
    pub entered: Phase,
    pub title: String,
    pub body: String,
}

impl PhaseNotice {
    fn entering(phase: Phase, settings: &TimerSettings) -> Self {
        match phase {
            Phase::Break => Self {
                entered: phase,
                title: "Time for a break!".to_string(),
                body: format!("Take a {} minute break", settings.break_minutes),
            },
            Phase::Work => Self {
                entered: phase,
                title: "Back to work!".to_string(),
                body: format!(
                    "Start your {} minute focus session",
                    settings.work_minutes
                ),
            },
        }
    }
}

/// Read-only view of the timer for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub state: RunState,
    pub remaining_seconds: u32,
    pub settings: TimerSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomodoroTimer {
    settings: TimerSettings,
    phase: Phase,
    state: RunState,
    remaining_seconds: u32,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

impl PomodoroTimer {
    /// Creates a paused timer at the start of a work phase.
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            settings,
            phase: Phase::Work,
            state: RunState::Paused,
            remaining_seconds: settings.seconds_for(Phase::Work),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            state: self.state,
            remaining_seconds: self.remaining_seconds,
            settings: self.settings,
        }
    }

    /// Paused -> Running. Returns `false` when already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = RunState::Running;
        true
    }

    /// Running -> Paused. Returns `false` when already paused.
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = RunState::Paused;
        true
    }

    /// Start/pause button semantics.
    pub fn toggle(&mut self) -> RunState {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
        self.state
    }

    /// Advances one elapsed second. Returns a notice when this tick completes the session.
    pub fn tick(&mut self) -> Option<PhaseNotice> {
        if !self.is_running() || self.remaining_seconds == 0 {
            return None;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            return Some(self.complete_session());
        }
        None
    }

    /// Pauses and reloads the current phase's full duration. Phase is unchanged.
    pub fn reset(&mut self) {
        self.state = RunState::Paused;
        self.remaining_seconds = self.settings.seconds_for(self.phase);
    }

    /// Installs new durations and restarts from a paused work phase.
    pub fn apply_settings(&mut self, settings: TimerSettings) {
        self.settings = settings;
        self.state = RunState::Paused;
        self.phase = Phase::Work;
        self.remaining_seconds = settings.seconds_for(Phase::Work);
    }

    /// Elapsed share of the current phase, `0.0..=100.0`.
    pub fn progress_percent(&self) -> f64 {
        let total = f64::from(self.settings.seconds_for(self.phase));
        if total == 0.0 {
            return 0.0;
        }
        let elapsed = total - f64::from(self.remaining_seconds);
        (elapsed / total * 100.0).clamp(0.0, 100.0)
    }

    fn complete_session(&mut self) -> PhaseNotice {
        self.state = RunState::Paused;
        self.phase = self.phase.flipped();
        self.remaining_seconds = self.settings.seconds_for(self.phase);
        PhaseNotice::entering(self.phase, &self.settings)
    }
}

/// Formats seconds as zero-padded `MM:SS`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
