//! The task board: four columns of tasks stored under `tasks/{status}/{id}`
//!
//! Every operation maps to a few direct requests to the store. Nothing is cached, so callers are expected to reload what they display after a change (see [`sync::BoardSync`], which does that automatically).

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use serde_json::Value;

use crate::key::{keyed_children, Key};
use crate::resource::join_path;
use crate::status::Status;
use crate::task::{Task, TaskDraft};
use crate::traits::DocumentStore;

pub mod view;
pub mod search;
pub mod sync;

/// The store path of the board
pub const TASKS_PATH: &str = "tasks";

/// The question asked before a task is deleted
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this task?";

/// Read the tasks of a column, as returned by the store. Entries that cannot be read are skipped (and logged)
pub(crate) fn tasks_from_value(status: Status, column: Value) -> Vec<Task> {
    keyed_children(column)
        .into_iter()
        .filter_map(|(id, document)| match Task::from_document(id.clone(), status, document) {
            Ok(task) => Some(task),
            Err(err) => {
                log::warn!("Ignoring invalid task {}/{}: {}", status.path(), id, err);
                None
            },
        })
        .collect()
}


/// The tasks of every column of the board
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Columns {
    columns: BTreeMap<Status, Vec<Task>>,
}

impl Columns {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tasks of a column (empty if this column has not been loaded)
    pub fn get(&self, status: Status) -> &[Task] {
        self.columns.get(&status).map(|tasks| tasks.as_slice()).unwrap_or(&[])
    }

    pub fn set(&mut self, status: Status, tasks: Vec<Task>) {
        self.columns.insert(status, tasks);
    }

    /// Every column, in board order
    pub fn iter(&self) -> impl Iterator<Item = (Status, &[Task])> + '_ {
        Status::ALL.iter().map(move |status| (*status, self.get(*status)))
    }

    /// Every task of the board
    pub fn tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.iter().flat_map(|(_, tasks)| tasks.iter())
    }

    pub fn find(&self, id: &Key) -> Option<&Task> {
        self.tasks().find(|task| task.id() == id)
    }

    pub fn count(&self, status: Status) -> usize {
        self.get(status).len()
    }

    pub fn len(&self) -> usize {
        self.columns.values().map(|tasks| tasks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}


/// A move that stopped halfway: the task has been removed from its old column, but could not be written to its new one.
///
/// The task document is kept here, so that it is not lost. See [`Board::resume_move`]
#[derive(Clone, Debug, PartialEq)]
pub struct MoveInterrupted {
    pub id: Key,
    pub from: Status,
    pub to: Status,
    /// The task, exactly as it was read before the move
    pub document: Value,
    pub reason: String,
}

impl MoveInterrupted {
    /// The task that is being moved, as it should end up
    pub fn task(&self) -> Result<Task, serde_json::Error> {
        Task::from_document(self.id.clone(), self.to, self.document.clone())
    }
}

impl Display for MoveInterrupted {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task {} has been removed from {} but could not be written to {}: {}", self.id, self.from, self.to, self.reason)
    }
}

impl Error for MoveInterrupted {}


/// The task board
pub struct Board<S> {
    store: S,
}

impl<S> Board<S>
where
    S: DocumentStore + Sync,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch the tasks of a column
    pub async fn load_column(&self, status: Status) -> Result<Vec<Task>, Box<dyn Error>> {
        let column = self.store.get(&status.path()).await?;
        Ok(tasks_from_value(status, column))
    }

    /// Fetch every column, one after the other
    pub async fn load_all(&self) -> Result<Columns, Box<dyn Error>> {
        let mut columns = Columns::new();
        for status in Status::ALL.iter() {
            let tasks = self.load_column(*status).await?;
            log::debug!("Loaded {} task(s) in {}", tasks.len(), status);
            columns.set(*status, tasks);
        }
        Ok(columns)
    }

    /// Fetch a task, or `None` if there is no such task in this column
    pub async fn get_task(&self, status: Status, id: &Key) -> Result<Option<Task>, Box<dyn Error>> {
        let document = self.store.get(&task_path(status, id)).await?;
        if document.is_null() {
            return Ok(None);
        }
        Ok(Some(Task::from_document(id.clone(), status, document)?))
    }

    /// Create a task from a valid form. New tasks always start in the "to do" column
    pub async fn create_task(&self, draft: TaskDraft) -> Result<Key, Box<dyn Error>> {
        draft.validate()?;

        let task = Task::from_draft(Key::from(""), Status::ToDo, draft);
        let key = self.store.post(&Status::ToDo.path(), &task.to_document()).await?;
        log::info!("Created task {:?} ({})", task.title(), key);
        Ok(key)
    }

    /// Replace a task with the content of a valid form. The task stays in its column
    pub async fn edit_task(&self, status: Status, id: &Key, draft: TaskDraft) -> Result<Task, Box<dyn Error>> {
        draft.validate()?;

        let task = Task::from_draft(id.clone(), status, draft);
        self.store.put(&task.path(), &task.to_document()).await?;
        log::info!("Edited task {}", task.path());
        Ok(task)
    }

    /// Delete a task, if `confirm` (which is given a question to ask the user) says so.
    ///
    /// Returns whether the task has been deleted
    pub async fn delete_task<F>(&self, status: Status, id: &Key, confirm: F) -> Result<bool, Box<dyn Error>>
    where
        F: FnOnce(&str) -> bool,
    {
        if confirm(DELETE_CONFIRMATION) == false {
            log::debug!("Deletion of task {} has been cancelled", id);
            return Ok(false);
        }
        self.store.delete(&task_path(status, id)).await?;
        log::info!("Deleted task {}", task_path(status, id));
        Ok(true)
    }

    /// Move a task to another column.
    ///
    /// This is not atomic: the task is read, deleted from its column, then written to the new one, and nothing is rolled back.
    /// In case the last step fails, the returned error is a [`MoveInterrupted`] that holds the task.
    ///
    /// Returns `false` if nothing was moved (the task does not exist, or it already is in `to`)
    pub async fn move_task(&self, id: &Key, from: Status, to: Status) -> Result<bool, Box<dyn Error>> {
        if from == to {
            return Ok(false);
        }

        let document = self.store.get(&task_path(from, id)).await?;
        if document.is_null() {
            log::warn!("Unable to move task {}: it is not in {}", id, from);
            return Ok(false);
        }

        self.store.delete(&task_path(from, id)).await?;

        let written = self.store.put(&task_path(to, id), &document).await;
        if let Err(err) = written {
            let interrupted = MoveInterrupted { id: id.clone(), from, to, document, reason: err.to_string() };
            log::error!("{}", interrupted);
            return Err(Box::new(interrupted));
        }
        log::info!("Moved task {} from {} to {}", id, from, to);
        Ok(true)
    }

    /// Write a task whose move has been interrupted to its destination column
    pub async fn resume_move(&self, interrupted: &MoveInterrupted) -> Result<(), Box<dyn Error>> {
        self.store.put(&task_path(interrupted.to, &interrupted.id), &interrupted.document).await?;
        log::info!("Moved task {} from {} to {} (resumed)", interrupted.id, interrupted.from, interrupted.to);
        Ok(())
    }

    /// Check or uncheck a subtask, and save it.
    ///
    /// Returns its new state, or `None` if there is no such subtask.
    /// `task` is only changed once the store has accepted the new state
    pub async fn toggle_subtask(&self, task: &mut Task, index: usize) -> Result<Option<bool>, Box<dyn Error>> {
        let mut subtask = match task.subtasks().get(index) {
            None => return Ok(None),
            Some(subtask) => subtask.clone(),
        };
        subtask.checked = !subtask.checked;

        let path = join_path(&[task.path(), "subtasks".to_string(), index.to_string()]);
        self.store.put(&path, &serde_json::to_value(&subtask)?).await?;
        task.toggle_subtask(index);
        log::debug!("Subtask {} is now {}", path, if subtask.checked { "checked" } else { "unchecked" });
        Ok(Some(subtask.checked))
    }

    /// Save the whole subtask list of a task
    pub async fn save_subtasks(&self, task: &Task) -> Result<(), Box<dyn Error>> {
        let path = format!("{}/subtasks", task.path());
        self.store.put(&path, &serde_json::to_value(task.subtasks())?).await?;
        log::debug!("Saved {} subtask(s) of {}", task.subtasks().len(), task.path());
        Ok(())
    }
}

/// The store path of a task
pub fn task_path(status: Status, id: &Key) -> String {
    format!("{}/{}", status.path(), id)
}
