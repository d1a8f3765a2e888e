//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Resolve the signed-in user from the persisted session for every
//!   record operation.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every failure is reported inside the returned envelope.
//! - Passwords never appear in responses or log lines.

use chrono::{Local, NaiveDate};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use studydesk_core::model::{parse_due_date, parse_tags};
use studydesk_core::projection::{
    deadline_label, search_notes, upcoming_deadlines, UPCOMING_DEADLINE_LIMIT,
};
use studydesk_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_db,
    ping as ping_inner, AppConfig, AuthError, KvAuthRepository, KvNoteRepository,
    KvQuickNoteRepository, KvTaskRepository, NewNote, NewTask, Note, QuickNote, Role,
    SqliteKeyValueStore, Task, TaskCategory, TaskPatch, TaskPriority, TaskStatus, User,
    WorkspaceService,
};

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type Workspace<'conn> = WorkspaceService<
    KvTaskRepository<SqliteKeyValueStore<'conn>>,
    KvNoteRepository<SqliteKeyValueStore<'conn>>,
    KvQuickNoteRepository<SqliteKeyValueStore<'conn>>,
>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.trim()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the database file used by every later call.
///
/// Must run before the first data call to take effect. Repeating the same
/// path is accepted; switching to another path is rejected.
///
/// # FFI contract
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(path: String) -> String {
    let wanted = PathBuf::from(path.trim());
    if wanted.as_os_str().is_empty() {
        return "db path cannot be empty".to_string();
    }

    let active = DB_PATH.get_or_init(|| wanted.clone());
    if *active == wanted {
        String::new()
    } else {
        format!(
            "db path already set to `{}`; refusing to switch to `{}`",
            active.display(),
            wanted.display()
        )
    }
}

/// Password-free account view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserItem {
    pub id: String,
    pub email: String,
    pub name: String,
    /// `admin|user`.
    pub role: String,
}

/// Auth response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub ok: bool,
    /// Present on success; `None` also when no session is active.
    pub user: Option<UserItem>,
    /// Stable failure code: `duplicate_email|invalid_credentials|invalid_input|internal`.
    pub error_code: Option<String>,
    pub message: String,
}

impl UserResponse {
    fn success(message: impl Into<String>, user: Option<&User>) -> Self {
        Self {
            ok: true,
            user: user.map(to_user_item),
            error_code: None,
            message: message.into(),
        }
    }

    fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            user: None,
            error_code: Some(code.to_string()),
            message: message.into(),
        }
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Id of the created or edited record, when there is one.
    pub id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub priority: String,
    /// `YYYY-MM-DD`, or empty when unset.
    pub due_date: String,
    /// RFC 3339 UTC timestamp.
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub ok: bool,
    pub items: Vec<TaskItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub course: String,
    pub tags: Vec<String>,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListResponse {
    pub ok: bool,
    pub items: Vec<NoteItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickNoteItem {
    pub id: String,
    pub content: String,
    pub color: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickNoteListResponse {
    pub ok: bool,
    pub items: Vec<QuickNoteItem>,
    pub message: String,
}

/// One row of the upcoming-deadlines card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineItem {
    pub task_id: String,
    pub title: String,
    pub category: String,
    pub priority: String,
    pub label: String,
    pub urgent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardResponse {
    pub ok: bool,
    pub total: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub overdue: u32,
    pub upcoming: Vec<DeadlineItem>,
    pub message: String,
}

impl DashboardResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            total: 0,
            in_progress: 0,
            completed: 0,
            overdue: 0,
            upcoming: Vec::new(),
            message: message.into(),
        }
    }
}

/// Registers an account and signs it in.
///
/// `role` defaults to `user` when `None`.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_register(
    email: String,
    password: String,
    name: String,
    role: Option<String>,
) -> UserResponse {
    let role = match role.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Role::User,
        Some(raw) => match Role::parse(raw) {
            Some(role) => role,
            None => {
                return UserResponse::failure("invalid_input", format!("unknown role `{raw}`"))
            }
        },
    };

    with_auth(|auth| auth.register(email.trim(), &password, name.trim(), role))
        .map_or_else(auth_failure, |user| {
            UserResponse::success("Account created.", Some(&user))
        })
}

#[flutter_rust_bridge::frb(sync)]
pub fn auth_login(email: String, password: String) -> UserResponse {
    with_auth(|auth| auth.login(email.trim(), &password)).map_or_else(auth_failure, |user| {
        UserResponse::success("Signed in.", Some(&user))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn auth_logout() -> ActionResponse {
    match with_auth(|auth| auth.logout()) {
        Ok(()) => ActionResponse::success("Signed out.", None),
        Err(err) => ActionResponse::failure(format!("auth_logout failed: {err}")),
    }
}

/// Returns the session user; `ok` with `user: None` when nobody is signed in.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_current_user() -> UserResponse {
    match with_auth(|auth| auth.current_user()) {
        Ok(Some(user)) => UserResponse::success("Session active.", Some(&user)),
        Ok(None) => UserResponse::success("No active session.", None),
        Err(err) => auth_failure(err),
    }
}

/// Adds a task owned by the session user.
///
/// `category` is required; `priority` defaults to `Medium`, `status` to
/// `Todo`, and a blank `due_date` means no due date.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(
    title: String,
    description: String,
    category: String,
    priority: Option<String>,
    status: Option<String>,
    due_date: Option<String>,
) -> ActionResponse {
    let outcome = with_workspace(|user, workspace| {
        let input = NewTask {
            user_id: user.id.clone(),
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            category: parse_choice("category", &category, TaskCategory::parse)?,
            status: parse_optional("status", status.as_deref(), TaskStatus::parse)?
                .unwrap_or_default(),
            priority: parse_optional("priority", priority.as_deref(), TaskPriority::parse)?
                .unwrap_or_default(),
            due_date: parse_optional("due_date", due_date.as_deref(), |raw| {
                parse_due_date(raw).ok()
            })?,
        };
        workspace.add_task(input).map_err(|err| err.to_string())
    });
    match outcome {
        Ok(task) => ActionResponse::success("Task created.", Some(task.id)),
        Err(err) => ActionResponse::failure(format!("task_add failed: {err}")),
    }
}

/// Lists the tasks visible to the session user.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list() -> TaskListResponse {
    match with_workspace(|user, workspace| {
        workspace.list_tasks(user).map_err(|err| err.to_string())
    }) {
        Ok(tasks) => TaskListResponse {
            ok: true,
            message: format!("{} task(s).", tasks.len()),
            items: tasks.iter().map(to_task_item).collect(),
        },
        Err(err) => TaskListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("task_list failed: {err}"),
        },
    }
}

/// Kanban move. Unknown task ids succeed without effect.
#[flutter_rust_bridge::frb(sync)]
pub fn task_set_status(task_id: String, status: String) -> ActionResponse {
    let outcome = with_workspace(|_, workspace| {
        let status = parse_choice("status", &status, TaskStatus::parse)?;
        workspace
            .move_task(task_id.trim(), status)
            .map_err(|err| err.to_string())
    });
    match outcome {
        Ok(()) => ActionResponse::success("Task moved.", Some(task_id)),
        Err(err) => ActionResponse::failure(format!("task_set_status failed: {err}")),
    }
}

/// Saves the task edit dialog: every field is replaced.
///
/// A blank `due_date` clears it. Unknown task ids succeed without effect.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update(
    task_id: String,
    title: String,
    description: String,
    category: String,
    priority: String,
    status: String,
    due_date: Option<String>,
) -> ActionResponse {
    let outcome = with_workspace(|_, workspace| {
        let patch = TaskPatch {
            title: Some(title.trim().to_string()),
            description: Some(description.trim().to_string()),
            category: Some(parse_choice("category", &category, TaskCategory::parse)?),
            status: Some(parse_choice("status", &status, TaskStatus::parse)?),
            priority: Some(parse_choice("priority", &priority, TaskPriority::parse)?),
            due_date: Some(parse_optional("due_date", due_date.as_deref(), |raw| {
                parse_due_date(raw).ok()
            })?),
        };
        workspace
            .update_task(task_id.trim(), patch)
            .map_err(|err| err.to_string())
    });
    match outcome {
        Ok(()) => ActionResponse::success("Task updated.", Some(task_id)),
        Err(err) => ActionResponse::failure(format!("task_update failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(task_id: String) -> ActionResponse {
    let outcome = with_workspace(|_, workspace| {
        workspace
            .delete_task(task_id.trim())
            .map_err(|err| err.to_string())
    });
    match outcome {
        Ok(()) => ActionResponse::success("Task deleted.", Some(task_id)),
        Err(err) => ActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

/// Creates (`note_id = None`) or updates a note owned by the session user.
///
/// `tags` is comma-separated input.
#[flutter_rust_bridge::frb(sync)]
pub fn note_save(
    note_id: Option<String>,
    title: String,
    course: String,
    tags: String,
    content: String,
) -> ActionResponse {
    let outcome = with_workspace(|user, workspace| {
        let input = NewNote {
            user_id: user.id.clone(),
            title: title.trim().to_string(),
            course: course.trim().to_string(),
            tags: parse_tags(&tags),
            content,
        };
        let target = note_id.as_deref().map(str::trim).filter(|id| !id.is_empty());
        workspace
            .save_note(target, input)
            .map_err(|err| err.to_string())
    });
    match outcome {
        Ok(Some(note)) => ActionResponse::success("Note saved.", Some(note.id)),
        Ok(None) => ActionResponse::success("Note not found; nothing saved.", None),
        Err(err) => ActionResponse::failure(format!("note_save failed: {err}")),
    }
}

/// Lists visible notes, filtered by `query` when it is non-blank.
#[flutter_rust_bridge::frb(sync)]
pub fn note_list(query: Option<String>) -> NoteListResponse {
    match with_workspace(|user, workspace| {
        workspace.list_notes(user).map_err(|err| err.to_string())
    }) {
        Ok(notes) => {
            let items = search_notes(&notes, query.as_deref().unwrap_or_default())
                .into_iter()
                .map(to_note_item)
                .collect::<Vec<_>>();
            NoteListResponse {
                ok: true,
                message: format!("{} note(s).", items.len()),
                items,
            }
        }
        Err(err) => NoteListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("note_list failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: String) -> ActionResponse {
    let outcome = with_workspace(|_, workspace| {
        workspace
            .delete_note(note_id.trim())
            .map_err(|err| err.to_string())
    });
    match outcome {
        Ok(()) => ActionResponse::success("Note deleted.", Some(note_id)),
        Err(err) => ActionResponse::failure(format!("note_delete failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn quick_note_add(content: String) -> ActionResponse {
    let outcome = with_workspace(|user, workspace| {
        workspace
            .add_quick_note(&user.id, &content)
            .map_err(|err| err.to_string())
    });
    match outcome {
        Ok(quick_note) => ActionResponse::success("Quick note added.", Some(quick_note.id)),
        Err(err) => ActionResponse::failure(format!("quick_note_add failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn quick_note_list() -> QuickNoteListResponse {
    match with_workspace(|user, workspace| {
        workspace
            .list_quick_notes(user)
            .map_err(|err| err.to_string())
    }) {
        Ok(quick_notes) => QuickNoteListResponse {
            ok: true,
            message: format!("{} quick note(s).", quick_notes.len()),
            items: quick_notes.iter().map(to_quick_note_item).collect(),
        },
        Err(err) => QuickNoteListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("quick_note_list failed: {err}"),
        },
    }
}

/// Replaces a quick note's text. Blank content is rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn quick_note_edit(quick_note_id: String, content: String) -> ActionResponse {
    let outcome = with_workspace(|_, workspace| {
        workspace
            .edit_quick_note(quick_note_id.trim(), &content)
            .map_err(|err| err.to_string())
    });
    match outcome {
        Ok(()) => ActionResponse::success("Quick note updated.", Some(quick_note_id)),
        Err(err) => ActionResponse::failure(format!("quick_note_edit failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn quick_note_delete(quick_note_id: String) -> ActionResponse {
    let outcome = with_workspace(|_, workspace| {
        workspace
            .delete_quick_note(quick_note_id.trim())
            .map_err(|err| err.to_string())
    });
    match outcome {
        Ok(()) => ActionResponse::success("Quick note deleted.", Some(quick_note_id)),
        Err(err) => ActionResponse::failure(format!("quick_note_delete failed: {err}")),
    }
}

/// Dashboard counters and the upcoming-deadlines card.
///
/// `today` is `YYYY-MM-DD`; `None` uses the local calendar date.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_summary(today: Option<String>) -> DashboardResponse {
    let outcome = with_workspace(|user, workspace| {
        let today = parse_optional("today", today.as_deref(), |raw| parse_due_date(raw).ok())?
            .unwrap_or_else(local_today);
        let tasks = workspace.list_tasks(user).map_err(|err| err.to_string())?;
        let stats = workspace.stats(user, today).map_err(|err| err.to_string())?;
        let upcoming = upcoming_deadlines(&tasks, UPCOMING_DEADLINE_LIMIT)
            .into_iter()
            .filter_map(|task| to_deadline_item(task, today))
            .collect::<Vec<_>>();
        Ok((stats, upcoming))
    });

    match outcome {
        Ok((stats, upcoming)) => DashboardResponse {
            ok: true,
            total: count(stats.total),
            in_progress: count(stats.in_progress),
            completed: count(stats.completed),
            overdue: count(stats.overdue),
            upcoming,
            message: "Dashboard ready.".to_string(),
        },
        Err(err) => DashboardResponse::failure(format!("dashboard_summary failed: {err}")),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| match AppConfig::resolve() {
            Ok(config) => config.db_path,
            Err(err) => {
                warn!("event=ffi_config module=ffi status=error error={err}");
                AppConfig::default().db_path
            }
        })
        .clone()
}

fn with_auth<T>(
    f: impl FnOnce(&KvAuthRepository<SqliteKeyValueStore<'_>>) -> Result<T, AuthError>,
) -> Result<T, AuthFailure> {
    let conn = open_db(resolve_db_path())
        .map_err(|err| AuthFailure::Internal(format!("db open failed: {err}")))?;
    let auth = KvAuthRepository::new(SqliteKeyValueStore::new(&conn));
    f(&auth).map_err(AuthFailure::from)
}

fn with_workspace<T>(
    f: impl FnOnce(&User, &Workspace<'_>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("db open failed: {err}"))?;
    let store = SqliteKeyValueStore::new(&conn);
    let user = KvAuthRepository::new(store)
        .current_user()
        .map_err(|err| err.to_string())?
        .ok_or_else(|| "no active session".to_string())?;
    f(&user, &WorkspaceService::from_store(store))
}

/// Auth failures keep their kind so the UI can branch on `error_code`.
#[derive(Debug)]
enum AuthFailure {
    Known(AuthError),
    Internal(String),
}

impl From<AuthError> for AuthFailure {
    fn from(value: AuthError) -> Self {
        Self::Known(value)
    }
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(err) => write!(f, "{err}"),
            Self::Internal(message) => write!(f, "{message}"),
        }
    }
}

fn auth_failure(failure: AuthFailure) -> UserResponse {
    let code = match &failure {
        AuthFailure::Known(AuthError::DuplicateEmail(_)) => "duplicate_email",
        AuthFailure::Known(AuthError::InvalidCredentials) => "invalid_credentials",
        AuthFailure::Known(AuthError::Repo(_)) | AuthFailure::Internal(_) => "internal",
    };
    UserResponse::failure(code, failure.to_string())
}

fn parse_choice<T>(
    field: &str,
    raw: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T, String> {
    parse(raw).ok_or_else(|| format!("invalid {field} `{}`", raw.trim()))
}

/// Blank or missing input yields `None`; anything else must parse.
fn parse_optional<T>(
    field: &str,
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<Option<T>, String> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => parse_choice(field, value, parse).map(Some),
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn count(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn to_user_item(user: &User) -> UserItem {
    UserItem {
        id: user.id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role.as_str().to_string(),
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.clone(),
        user_id: task.user_id.clone(),
        title: task.title.clone(),
        description: task.description.clone(),
        category: task.category.as_str().to_string(),
        status: task.status.as_str().to_string(),
        priority: task.priority.as_str().to_string(),
        due_date: task
            .due_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        created_at: rfc3339(&task.created_at),
    }
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        id: note.id.clone(),
        user_id: note.user_id.clone(),
        title: note.title.clone(),
        course: note.course.clone(),
        tags: note.tags.clone(),
        content: note.content.clone(),
        created_at: rfc3339(&note.created_at),
        updated_at: rfc3339(&note.updated_at),
    }
}

fn to_quick_note_item(quick_note: &QuickNote) -> QuickNoteItem {
    QuickNoteItem {
        id: quick_note.id.clone(),
        content: quick_note.content.clone(),
        color: quick_note.color.clone(),
        created_at: rfc3339(&quick_note.created_at),
    }
}

fn to_deadline_item(task: &Task, today: NaiveDate) -> Option<DeadlineItem> {
    let label = deadline_label(task.due_date?, today);
    Some(DeadlineItem {
        task_id: task.id.clone(),
        title: task.title.clone(),
        category: task.category.as_str().to_string(),
        priority: task.priority.as_str().to_string(),
        label: label.text,
        urgent: label.urgent,
    })
}

fn rfc3339(instant: &chrono::DateTime<chrono::Utc>) -> String {
    instant.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
