//! Application session: owns the task collection for one user.
//!
//! Mutations validate, apply, then flush the whole collection to the store.
//! If the flush fails the in-memory change is rolled back so the session
//! never drifts from what was persisted.

use crate::clock::Clock;
use crate::engine::{self, RankedTask, SuggestMode};
use crate::error::{Error, InputError, Result};
use crate::models::{NewTask, Task, TaskEdit, TaskId};
use crate::store::TaskStore;
use chrono::{DateTime, Utc};

pub struct TaskSession<S, C> {
    store: S,
    clock: C,
    tasks: Vec<Task>,
}

impl<S: TaskStore, C: Clock> TaskSession<S, C> {
    /// Load the full task set from `store`
    pub fn open(store: S, clock: C) -> Result<Self> {
        let tasks = store.load_all()?;
        log::debug!("session opened with {} tasks", tasks.len());
        Ok(Self { store, clock, tasks })
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Find the task whose id equals or starts with `prefix`
    pub fn resolve_id(&self, prefix: &str) -> Result<TaskId> {
        let prefix = prefix.trim().to_ascii_lowercase();
        if prefix.is_empty() {
            return Err(Error::NotFound(prefix));
        }
        if let Some(task) = self.tasks.iter().find(|t| t.id.as_str() == prefix) {
            return Ok(task.id.clone());
        }

        let mut matches = self.tasks.iter().filter(|t| t.id.as_str().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Ok(task.id.clone()),
            (Some(_), Some(_)) => Err(InputError::AmbiguousId(prefix).into()),
            (None, _) => Err(Error::NotFound(prefix)),
        }
    }

    pub fn add_task(&mut self, new: NewTask) -> Result<&Task> {
        let name = validate_name(&new.name)?;
        let remaining_minutes = validate_minutes(new.remaining_minutes)?;

        let mut task = Task::new(name, remaining_minutes, self.clock.now());
        task.user_priority = new.user_priority;
        task.deadline = new.deadline;

        self.tasks.push(task);
        if let Err(e) = self.flush() {
            self.tasks.pop();
            return Err(e);
        }

        let task = &self.tasks[self.tasks.len() - 1];
        log::info!("added task {} '{}'", task.id, task.name);
        Ok(task)
    }

    pub fn edit_task(&mut self, id: &TaskId, edit: TaskEdit) -> Result<&Task> {
        let index = self.index_of(id)?;

        // Validate everything before touching the task
        let name = edit.name.as_deref().map(validate_name).transpose()?;
        let minutes = edit.remaining_minutes.map(validate_minutes).transpose()?;

        let previous = self.tasks[index].clone();
        {
            let task = &mut self.tasks[index];
            if let Some(name) = name {
                task.name = name;
            }
            if let Some(minutes) = minutes {
                task.remaining_minutes = minutes;
            }
            if let Some(user_priority) = edit.user_priority {
                task.user_priority = user_priority;
            }
            if let Some(deadline) = edit.deadline {
                task.deadline = deadline;
            }
        }

        if let Err(e) = self.flush() {
            self.tasks[index] = previous;
            return Err(e);
        }

        log::info!("edited task {}", id);
        Ok(&self.tasks[index])
    }

    /// Remove a task; a missing id is `NotFound`
    pub fn delete_task(&mut self, id: &TaskId) -> Result<Task> {
        let index = self.index_of(id)?;
        let removed = self.tasks.remove(index);

        if let Err(e) = self.flush() {
            self.tasks.insert(index, removed);
            return Err(e);
        }

        log::info!("deleted task {} '{}'", removed.id, removed.name);
        Ok(removed)
    }

    /// Ranked view at the clock's current time
    pub fn list_ranked(&self) -> Vec<RankedTask<'_>> {
        self.list_ranked_at(self.clock.now())
    }

    pub fn list_ranked_at(&self, now: DateTime<Utc>) -> Vec<RankedTask<'_>> {
        engine::rank(&self.tasks, now)
    }

    /// Suggestion at the clock's current time
    pub fn suggest(&self, available_minutes: i64, mode: SuggestMode) -> Result<Option<RankedTask<'_>>> {
        self.suggest_at(self.clock.now(), available_minutes, mode)
    }

    pub fn suggest_at(
        &self,
        now: DateTime<Utc>,
        available_minutes: i64,
        mode: SuggestMode,
    ) -> Result<Option<RankedTask<'_>>> {
        engine::suggest(&self.tasks, now, available_minutes, mode)
    }

    fn index_of(&self, id: &TaskId) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn flush(&mut self) -> Result<()> {
        self.store.save_all(&self.tasks)?;
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InputError::EmptyName.into());
    }
    Ok(name.to_string())
}

fn validate_minutes(minutes: i64) -> Result<u32> {
    if minutes <= 0 {
        return Err(InputError::NonPositiveDuration(minutes).into());
    }
    u32::try_from(minutes).map_err(|_| InputError::MalformedDuration(minutes.to_string()).into())
}
