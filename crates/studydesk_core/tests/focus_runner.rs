use std::sync::{Arc, Mutex};
use std::time::Duration;
use studydesk_core::pomodoro::{
    FocusRunner, Notifier, Phase, PhaseNotice, RunState, TimerSettings,
};

#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<PhaseNotice>>,
}

impl RecordingNotifier {
    fn notices(&self) -> Vec<PhaseNotice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &PhaseNotice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

fn runner(work: u32, rest: u32) -> (FocusRunner, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let runner = FocusRunner::with_notifier(
        TimerSettings::new(work, rest).unwrap(),
        notifier.clone(),
    );
    (runner, notifier)
}

#[tokio::test(start_paused = true)]
async fn completes_work_session_once_and_stops_ticking() {
    let (mut runner, notifier) = runner(1, 5);
    assert!(runner.start());
    assert!(runner.is_ticking());

    tokio::time::sleep(Duration::from_secs(61)).await;

    let notices = notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].entered, Phase::Break);
    assert_eq!(notices[0].body, "Take a 5 minute break");

    let snapshot = runner.snapshot();
    assert_eq!(snapshot.phase, Phase::Break);
    assert_eq!(snapshot.state, RunState::Paused);
    assert_eq!(snapshot.remaining_seconds, 300);
    assert!(!runner.is_ticking());

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(runner.snapshot().remaining_seconds, 300);
}

#[tokio::test(start_paused = true)]
async fn pause_releases_the_ticker() {
    let (mut runner, notifier) = runner(1, 5);
    runner.start();

    tokio::time::sleep(Duration::from_millis(10_500)).await;
    assert!(runner.pause());
    assert!(!runner.is_ticking());
    assert_eq!(runner.snapshot().remaining_seconds, 50);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(runner.snapshot().remaining_seconds, 50);
    assert!(notifier.notices().is_empty());

    assert_eq!(runner.toggle(), RunState::Running);
    tokio::time::sleep(Duration::from_millis(5_500)).await;
    assert_eq!(runner.snapshot().remaining_seconds, 45);
}

#[tokio::test(start_paused = true)]
async fn start_while_running_does_not_double_tick() {
    let (mut runner, _notifier) = runner(1, 5);
    assert!(runner.start());
    assert!(!runner.start());

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    assert_eq!(runner.snapshot().remaining_seconds, 57);
}

#[tokio::test(start_paused = true)]
async fn reset_and_apply_settings_stop_the_countdown() {
    let (mut runner, _notifier) = runner(2, 1);
    runner.start();
    tokio::time::sleep(Duration::from_millis(4_500)).await;

    runner.reset();
    assert_eq!(runner.snapshot().state, RunState::Paused);
    assert_eq!(runner.snapshot().remaining_seconds, 120);
    assert!(!runner.is_ticking());

    runner.start();
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    runner.apply_settings(TimerSettings::new(30, 10).unwrap());
    tokio::time::sleep(Duration::from_secs(5)).await;

    let snapshot = runner.snapshot();
    assert_eq!(snapshot.phase, Phase::Work);
    assert_eq!(snapshot.state, RunState::Paused);
    assert_eq!(snapshot.remaining_seconds, 30 * 60);
}

#[test]
fn start_without_runtime_keeps_timer_paused() {
    let (mut runner, notifier) = runner(25, 5);

    assert!(!runner.start());
    assert!(!runner.is_ticking());
    assert_eq!(runner.snapshot().state, RunState::Paused);
    assert_eq!(runner.snapshot().remaining_seconds, 25 * 60);
    assert!(notifier.notices().is_empty());
}
