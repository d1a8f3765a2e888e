//! Core domain logic for StudyDesk.
//! This crate is the single source of truth for business invariants.

pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod pomodoro;
pub mod projection;
pub mod repo;
pub mod service;
pub mod store;

pub use auth::{AuthError, AuthResult, KvAuthRepository, PasswordPolicy, PlaintextPasswords};
pub use clock::{Clock, SteppingClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{NewNote, Note, NotePatch};
pub use model::quick_note::{NewQuickNote, QuickNote};
pub use model::task::{NewTask, Task, TaskCategory, TaskPatch, TaskPriority, TaskStatus};
pub use model::user::{Role, User};
pub use pomodoro::{FocusRunner, Phase, PhaseNotice, PomodoroTimer, TimerError, TimerSettings};
pub use repo::note_repo::{KvNoteRepository, NoteRepository};
pub use repo::quick_note_repo::{KvQuickNoteRepository, QuickNoteRepository};
pub use repo::task_repo::{KvTaskRepository, TaskRepository};
pub use service::workspace_service::{
    Scope, WorkspaceError, WorkspaceResult, WorkspaceService, WorkspaceSnapshot,
};
pub use store::{
    KeyValueStore, MemoryKeyValueStore, RecordStore, RepoError, RepoResult, SqliteKeyValueStore,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
