//! Workspace use-case service.
//!
//! # Responsibility
//! - Resolve which records a signed-in user may see.
//! - Provide dashboard, kanban, notes and quick-note operations on top of
//!   the entity repositories.
//! - Reject blank form input before it reaches storage.
//!
//! # Invariants
//! - Admin users see every record; everyone else sees only their own.
//! - Unknown ids on update/delete stay silent no-ops, as in the repositories.

use crate::model::note::{NewNote, Note, NotePatch};
use crate::model::quick_note::{NewQuickNote, QuickNote};
use crate::model::task::{NewTask, Task, TaskPatch, TaskStatus};
use crate::model::user::User;
use crate::projection::{pick_color, DashboardStats};
use crate::repo::note_repo::{KvNoteRepository, NoteRepository};
use crate::repo::quick_note_repo::{KvQuickNoteRepository, QuickNoteRepository};
use crate::repo::task_repo::{KvTaskRepository, TaskRepository};
use crate::store::{KeyValueStore, RepoError};
use chrono::NaiveDate;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

#[derive(Debug)]
pub enum WorkspaceError {
    /// A required text field was empty after trimming.
    BlankField(&'static str),
    Repo(RepoError),
}

impl Display for WorkspaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} cannot be blank"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WorkspaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::BlankField(_) => None,
        }
    }
}

impl From<RepoError> for WorkspaceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Record visibility for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    All,
    Owner(String),
}

impl Scope {
    pub fn for_user(user: &User) -> Self {
        if user.is_admin() {
            Self::All
        } else {
            Self::Owner(user.id.clone())
        }
    }

    /// Owner filter to hand to repository `list_*` calls.
    pub fn owner_id(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Owner(id) => Some(id.as_str()),
        }
    }
}

/// Everything the dashboard loads at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceSnapshot {
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub quick_notes: Vec<QuickNote>,
}

pub struct WorkspaceService<T: TaskRepository, N: NoteRepository, Q: QuickNoteRepository> {
    tasks: T,
    notes: N,
    quick_notes: Q,
}

impl<S: KeyValueStore + Copy>
    WorkspaceService<KvTaskRepository<S>, KvNoteRepository<S>, KvQuickNoteRepository<S>>
{
    /// Builds all three repositories over one backing store.
    pub fn from_store(backend: S) -> Self {
        Self::new(
            KvTaskRepository::new(backend),
            KvNoteRepository::new(backend),
            KvQuickNoteRepository::new(backend),
        )
    }
}

impl<T: TaskRepository, N: NoteRepository, Q: QuickNoteRepository> WorkspaceService<T, N, Q> {
    pub fn new(tasks: T, notes: N, quick_notes: Q) -> Self {
        Self {
            tasks,
            notes,
            quick_notes,
        }
    }

    pub fn load(&self, user: &User) -> WorkspaceResult<WorkspaceSnapshot> {
        let scope = Scope::for_user(user);
        let owner_id = scope.owner_id();
        let snapshot = WorkspaceSnapshot {
            tasks: self.tasks.list_tasks(owner_id)?,
            notes: self.notes.list_notes(owner_id)?,
            quick_notes: self.quick_notes.list_quick_notes(owner_id)?,
        };
        debug!(
            "event=workspace_load module=service status=ok admin={} tasks={} notes={} quick_notes={}",
            user.is_admin(),
            snapshot.tasks.len(),
            snapshot.notes.len(),
            snapshot.quick_notes.len()
        );
        Ok(snapshot)
    }

    pub fn list_tasks(&self, user: &User) -> WorkspaceResult<Vec<Task>> {
        Ok(self.tasks.list_tasks(Scope::for_user(user).owner_id())?)
    }

    pub fn list_notes(&self, user: &User) -> WorkspaceResult<Vec<Note>> {
        Ok(self.notes.list_notes(Scope::for_user(user).owner_id())?)
    }

    pub fn list_quick_notes(&self, user: &User) -> WorkspaceResult<Vec<QuickNote>> {
        Ok(self
            .quick_notes
            .list_quick_notes(Scope::for_user(user).owner_id())?)
    }

    pub fn stats(&self, user: &User, today: NaiveDate) -> WorkspaceResult<DashboardStats> {
        let tasks = self.list_tasks(user)?;
        Ok(DashboardStats::from_tasks(&tasks, today))
    }

    pub fn add_task(&self, input: NewTask) -> WorkspaceResult<Task> {
        require_text("title", &input.title)?;
        Ok(self.tasks.add_task(input)?)
    }

    pub fn update_task(&self, id: &str, patch: TaskPatch) -> WorkspaceResult<()> {
        if let Some(title) = patch.title.as_deref() {
            require_text("title", title)?;
        }
        Ok(self.tasks.update_task(id, patch)?)
    }

    /// Kanban drop: only the status changes.
    pub fn move_task(&self, id: &str, status: TaskStatus) -> WorkspaceResult<()> {
        Ok(self.tasks.update_task(id, TaskPatch::status(status))?)
    }

    pub fn delete_task(&self, id: &str) -> WorkspaceResult<()> {
        Ok(self.tasks.delete_task(id)?)
    }

    /// Creates a note when `id` is `None`, otherwise updates that note.
    ///
    /// Returns the saved note, or `None` when `id` names no note.
    pub fn save_note(&self, id: Option<&str>, input: NewNote) -> WorkspaceResult<Option<Note>> {
        require_text("title", &input.title)?;
        require_text("content", &input.content)?;

        let Some(id) = id else {
            return Ok(Some(self.notes.add_note(input)?));
        };

        self.notes.update_note(
            id,
            NotePatch {
                title: Some(input.title),
                course: Some(input.course),
                tags: Some(input.tags),
                content: Some(input.content),
            },
        )?;
        Ok(self
            .notes
            .list_notes(None)?
            .into_iter()
            .find(|note| note.id == id))
    }

    pub fn delete_note(&self, id: &str) -> WorkspaceResult<()> {
        Ok(self.notes.delete_note(id)?)
    }

    /// Adds a quick note with a palette color chosen from the owner's note count.
    pub fn add_quick_note(&self, user_id: &str, content: &str) -> WorkspaceResult<QuickNote> {
        require_text("content", content)?;
        let existing = self.quick_notes.list_quick_notes(Some(user_id))?.len();
        Ok(self.quick_notes.add_quick_note(NewQuickNote {
            user_id: user_id.to_string(),
            content: content.to_string(),
            color: pick_color(existing as u64).to_string(),
        })?)
    }

    pub fn edit_quick_note(&self, id: &str, content: &str) -> WorkspaceResult<()> {
        require_text("content", content)?;
        Ok(self.quick_notes.update_quick_note(id, content)?)
    }

    pub fn delete_quick_note(&self, id: &str) -> WorkspaceResult<()> {
        Ok(self.quick_notes.delete_quick_note(id)?)
    }
}

/// Rejects blank input; accepted text is stored as given.
fn require_text(field: &'static str, value: &str) -> WorkspaceResult<()> {
    if value.trim().is_empty() {
        return Err(WorkspaceError::BlankField(field));
    }
    Ok(())
}
