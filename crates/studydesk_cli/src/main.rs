//! CLI entry point.
//!
//! # Responsibility
//! - Verify `studydesk_core` linkage and print the session dashboard.
//! - Run one focus session with the configured timer lengths.
//!
//! Logging, the database path and timer lengths all come from `AppConfig`.

use chrono::Local;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;
use studydesk_core::pomodoro::{format_clock, Notifier, PhaseNotice};
use studydesk_core::projection::{deadline_label, upcoming_deadlines, UPCOMING_DEADLINE_LIMIT};
use studydesk_core::{
    init_logging, open_db, AppConfig, FocusRunner, KvAuthRepository, SqliteKeyValueStore,
    TimerSettings, WorkspaceService,
};
use tokio::sync::Notify;

type CliResult<T> = Result<T, Box<dyn Error>>;

/// StudyDesk command line
#[derive(Debug, Parser)]
#[clap(version, about = "StudyDesk dashboard and focus timer")]
struct Cli {
    /// Defaults to `dashboard`
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the signed-in user's task counters and upcoming deadlines
    Dashboard,
    /// Count down one work session, then announce the break
    Focus {
        /// Work length in minutes; overrides the configured value
        #[clap(short, long)]
        work: Option<u32>,

        /// Break length in minutes; overrides the configured value
        #[clap(short = 'b', long = "break")]
        rest: Option<u32>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    println!("studydesk_core ping={}", studydesk_core::ping());
    println!("studydesk_core version={}", studydesk_core::core_version());

    match run(cli.command.unwrap_or(Command::Dashboard)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> CliResult<()> {
    let config = AppConfig::resolve()?;
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    match command {
        Command::Dashboard => print_dashboard(&config),
        Command::Focus { work, rest } => run_focus(focus_settings(&config, work, rest)?),
    }
}

fn print_dashboard(config: &AppConfig) -> CliResult<()> {
    println!("db_path={}", config.db_path.display());

    let conn = open_db(&config.db_path)?;
    let store = SqliteKeyValueStore::new(&conn);
    let Some(user) = KvAuthRepository::new(store).current_user()? else {
        println!("no active session");
        return Ok(());
    };
    println!("user={} role={}", user.email, user.role.as_str());

    let today = Local::now().date_naive();
    let workspace = WorkspaceService::from_store(store);
    let stats = workspace.stats(&user, today)?;
    println!(
        "tasks total={} in_progress={} completed={} overdue={}",
        stats.total, stats.in_progress, stats.completed, stats.overdue
    );

    let tasks = workspace.list_tasks(&user)?;
    for task in upcoming_deadlines(&tasks, UPCOMING_DEADLINE_LIMIT) {
        if let Some(due) = task.due_date {
            println!("  {} [{}]", task.title, deadline_label(due, today).text);
        }
    }
    Ok(())
}

/// Configured lengths with command-line overrides applied.
fn focus_settings(
    config: &AppConfig,
    work: Option<u32>,
    rest: Option<u32>,
) -> CliResult<TimerSettings> {
    let configured = config.timer_settings()?;
    Ok(TimerSettings::new(
        work.unwrap_or(configured.work_minutes()),
        rest.unwrap_or(configured.break_minutes()),
    )?)
}

/// Prints each notice and wakes the waiting session.
#[derive(Default)]
struct PrintNotifier {
    done: Notify,
}

impl Notifier for PrintNotifier {
    fn notify(&self, notice: &PhaseNotice) {
        println!("{}", notice.title);
        println!("{}", notice.body);
        self.done.notify_one();
    }
}

fn run_focus(settings: TimerSettings) -> CliResult<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let notifier = Arc::new(PrintNotifier::default());

    runtime.block_on(async {
        let mut runner = FocusRunner::with_notifier(settings, notifier.clone());
        println!(
            "focus work={} break={}",
            format_clock(settings.work_minutes() * 60),
            format_clock(settings.break_minutes() * 60)
        );
        if runner.start() {
            notifier.done.notified().await;
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{focus_settings, Cli, Command};
    use clap::Parser;
    use studydesk_core::AppConfig;

    #[test]
    fn focus_takes_lengths_from_config() {
        let config = AppConfig {
            work_minutes: 40,
            break_minutes: 10,
            ..AppConfig::default()
        };

        let settings = focus_settings(&config, None, None).unwrap();
        assert_eq!(settings.work_minutes(), 40);
        assert_eq!(settings.break_minutes(), 10);

        let overridden = focus_settings(&config, Some(15), None).unwrap();
        assert_eq!(overridden.work_minutes(), 15);
        assert_eq!(overridden.break_minutes(), 10);
    }

    #[test]
    fn focus_override_out_of_range_is_rejected() {
        let config = AppConfig::default();
        assert!(focus_settings(&config, Some(0), None).is_err());
        assert!(focus_settings(&config, None, Some(31)).is_err());
    }

    #[test]
    fn dashboard_is_the_default_command() {
        assert!(Cli::try_parse_from(["studydesk"]).unwrap().command.is_none());

        let cli = Cli::try_parse_from(["studydesk", "focus", "--work", "30", "-b", "10"]).unwrap();
        match cli.command {
            Some(Command::Focus { work, rest }) => {
                assert_eq!(work, Some(30));
                assert_eq!(rest, Some(10));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
