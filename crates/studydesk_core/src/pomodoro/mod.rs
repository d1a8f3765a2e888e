//! Pomodoro focus timer.
//!
//! # Responsibility
//! - `timer`: synchronous work/break countdown with no I/O.
//! - `runner`: tokio ticker that drives a timer once per second.
//!
//! Nothing in this module persists state.

mod runner;
mod timer;

pub use runner::{FocusRunner, LogNotifier, Notifier};
pub use timer::{
    format_clock, Phase, PhaseNotice, PomodoroTimer, RunState, TimerError, TimerSettings,
    TimerSnapshot, BREAK_MINUTES_RANGE, DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES,
    WORK_MINUTES_RANGE,
};
