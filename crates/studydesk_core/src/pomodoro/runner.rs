//! Async driver for `PomodoroTimer`.
//!
//! # Responsibility
//! - Feed one `tick` per elapsed second while the timer is running.
//! - Hand completion notices to a `Notifier`.
//!
//! # Invariants
//! - At most one ticker task exists per runner.
//! - The ticker is released on pause, reset, settings change, session
//!   completion and drop. No path leaves an orphaned ticker behind.

use crate::pomodoro::timer::{PhaseNotice, PomodoroTimer, RunState, TimerSettings, TimerSnapshot};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Receiver for session-complete notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &PhaseNotice);
}

/// Writes notices to the core log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &PhaseNotice) {
        info!(
            "event=focus_phase_complete module=pomodoro status=ok entered={} title=\"{}\"",
            notice.entered.as_str(),
            notice.title
        );
    }
}

/// Owns a timer and the ticker task that drives it.
///
/// `start` only succeeds from inside a tokio runtime.
pub struct FocusRunner {
    timer: Arc<Mutex<PomodoroTimer>>,
    notifier: Arc<dyn Notifier>,
    ticker: Option<JoinHandle<()>>,
}

impl FocusRunner {
    pub fn new(settings: TimerSettings) -> Self {
        Self::with_notifier(settings, Arc::new(LogNotifier))
    }

    pub fn with_notifier(settings: TimerSettings, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            timer: Arc::new(Mutex::new(PomodoroTimer::new(settings))),
            notifier,
            ticker: None,
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        lock(&self.timer).snapshot()
    }

    /// Whether a ticker task is currently alive.
    pub fn is_ticking(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Starts the countdown.
    ///
    /// Returns `false` when it is already running or when no tokio runtime
    /// is available; the timer stays paused in the latter case.
    pub fn start(&mut self) -> bool {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                warn!(
                    "event=focus_start module=pomodoro status=error error_code=no_runtime error={err}"
                );
                return false;
            }
        };
        if !lock(&self.timer).start() {
            return false;
        }

        self.release_ticker();
        let timer = Arc::clone(&self.timer);
        let notifier = Arc::clone(&self.notifier);
        self.ticker = Some(runtime.spawn(drive(timer, notifier)));
        debug!("event=focus_start module=pomodoro status=ok");
        true
    }

    /// Pauses the countdown. Returns `false` when it is already paused.
    pub fn pause(&mut self) -> bool {
        let paused = lock(&self.timer).pause();
        self.release_ticker();
        if paused {
            debug!("event=focus_pause module=pomodoro status=ok");
        }
        paused
    }

    pub fn toggle(&mut self) -> RunState {
        if lock(&self.timer).is_running() {
            self.pause();
        } else {
            self.start();
        }
        lock(&self.timer).state()
    }

    pub fn reset(&mut self) {
        self.release_ticker();
        lock(&self.timer).reset();
    }

    pub fn apply_settings(&mut self, settings: TimerSettings) {
        self.release_ticker();
        lock(&self.timer).apply_settings(settings);
        info!(
            "event=focus_settings module=pomodoro status=ok work_minutes={} break_minutes={}",
            settings.work_minutes(),
            settings.break_minutes()
        );
    }

    fn release_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

impl Drop for FocusRunner {
    fn drop(&mut self) {
        self.release_ticker();
    }
}

async fn drive(timer: Arc<Mutex<PomodoroTimer>>, notifier: Arc<dyn Notifier>) {
    let mut ticks = interval(TICK_PERIOD);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticks.tick().await;

    loop {
        ticks.tick().await;
        let notice = {
            let mut timer = lock(&timer);
            if !timer.is_running() {
                break;
            }
            timer.tick()
        };
        if let Some(notice) = notice {
            notifier.notify(&notice);
            break;
        }
    }
}

fn lock(timer: &Mutex<PomodoroTimer>) -> MutexGuard<'_, PomodoroTimer> {
    timer.lock().unwrap_or_else(PoisonError::into_inner)
}
