//! Task repository contract and key-value implementation.

use crate::clock::{id_from, Clock, SystemClock};
use crate::model::task::{NewTask, Task, TaskPatch};
use crate::store::{KeyValueStore, RecordStore, RepoResult};
use log::info;

/// Repository interface for task CRUD.
pub trait TaskRepository {
    /// Lists tasks for `owner_id`, or every task when `None`.
    fn list_tasks(&self, owner_id: Option<&str>) -> RepoResult<Vec<Task>>;
    /// Persists a new task and returns it with generated id and `created_at`.
    fn add_task(&self, input: NewTask) -> RepoResult<Task>;
    /// Merges `patch` into the task with `id`. Unknown ids are ignored.
    fn update_task(&self, id: &str, patch: TaskPatch) -> RepoResult<()>;
    /// Removes the task with `id`. Unknown ids are ignored.
    fn delete_task(&self, id: &str) -> RepoResult<()>;
}

/// Task repository persisted in the `tasks` collection.
pub struct KvTaskRepository<S: KeyValueStore, C: Clock = SystemClock> {
    records: RecordStore<S>,
    clock: C,
}

impl<S: KeyValueStore> KvTaskRepository<S> {
    pub fn new(backend: S) -> Self {
        Self::with_clock(backend, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> KvTaskRepository<S, C> {
    pub fn with_clock(backend: S, clock: C) -> Self {
        Self {
            records: RecordStore::new(backend),
            clock,
        }
    }
}

impl<S: KeyValueStore, C: Clock> TaskRepository for KvTaskRepository<S, C> {
    fn list_tasks(&self, owner_id: Option<&str>) -> RepoResult<Vec<Task>> {
        self.records.list(owner_id)
    }

    fn add_task(&self, input: NewTask) -> RepoResult<Task> {
        let now = self.clock.now();
        let task = self.records.append(input.into_task(id_from(now), now))?;
        info!(
            "event=task_add module=repo status=ok task_id={} category={} status={}",
            task.id,
            task.category.as_str(),
            task.status.as_str()
        );
        Ok(task)
    }

    fn update_task(&self, id: &str, patch: TaskPatch) -> RepoResult<()> {
        let applied = self.records.modify::<Task>(id, |task| patch.apply_to(task))?;
        info!("event=task_update module=repo status=ok task_id={id} applied={applied}");
        Ok(())
    }

    fn delete_task(&self, id: &str) -> RepoResult<()> {
        let removed = self.records.remove::<Task>(id)?;
        info!("event=task_delete module=repo status=ok task_id={id} removed={removed}");
        Ok(())
    }
}
