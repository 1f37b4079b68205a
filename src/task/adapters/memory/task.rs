//! Thread-safe in-memory implementation of [`TaskRepository`].

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Comment, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::team::{
    domain::{TeamId, UserId},
    ports::{TaskCountError, TaskCounter},
};

/// Thread-safe in-memory task repository.
///
/// Also implements the [`TaskCounter`] port so the limit guard can read
/// active task counts without depending on the full repository contract.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    comments: HashMap<TaskId, Vec<Comment>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn sorted_by_deadline(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by_key(|task| (task.deadline(), task.id()));
    tasks
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        state.comments.remove(&id);
        Ok(())
    }

    async fn find_by_team(&self, team: TeamId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let tasks = state
            .tasks
            .values()
            .filter(|task| task.team() == team)
            .cloned()
            .collect();
        Ok(sorted_by_deadline(tasks))
    }

    async fn find_by_assignee(
        &self,
        team: TeamId,
        assignee: UserId,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let tasks = state
            .tasks
            .values()
            .filter(|task| task.team() == team && task.assignee() == Some(assignee))
            .cloned()
            .collect();
        Ok(sorted_by_deadline(tasks))
    }

    async fn find_in_deadline_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let tasks = state
            .tasks
            .values()
            .filter(|task| {
                !task.status().is_terminal()
                    && task
                        .deadline()
                        .is_some_and(|deadline| deadline >= start && deadline <= end)
            })
            .cloned()
            .collect();
        Ok(sorted_by_deadline(tasks))
    }

    async fn find_due_on(&self, team: TeamId, day: NaiveDate) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let tasks = state
            .tasks
            .values()
            .filter(|task| {
                task.team() == team
                    && !task.status().is_terminal()
                    && task
                        .deadline()
                        .is_some_and(|deadline| deadline.date_naive() == day)
            })
            .cloned()
            .collect();
        Ok(sorted_by_deadline(tasks))
    }

    async fn find_overdue(&self, now: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let tasks = state
            .tasks
            .values()
            .filter(|task| {
                !task.status().is_terminal()
                    && task.deadline().is_some_and(|deadline| deadline < now)
            })
            .cloned()
            .collect();
        Ok(sorted_by_deadline(tasks))
    }

    async fn add_comment(&self, comment: &Comment) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.tasks.contains_key(&comment.task()) {
            return Err(TaskRepositoryError::NotFound(comment.task()));
        }
        state
            .comments
            .entry(comment.task())
            .or_default()
            .push(comment.clone());
        Ok(())
    }

    async fn comments(&self, task: TaskId) -> TaskRepositoryResult<Vec<Comment>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.comments.get(&task).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl TaskCounter for InMemoryTaskRepository {
    async fn active_task_count(&self, team: TeamId) -> Result<u32, TaskCountError> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskCountError::persistence(std::io::Error::other(err.to_string())))?;
        let count = state
            .tasks
            .values()
            .filter(|task| task.team() == team && !task.status().is_terminal())
            .count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }
}
