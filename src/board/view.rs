//! What the board displays: cards built from the tasks and the user list

use std::collections::HashMap;
use std::error::Error;

use crate::board::{Board, Columns};
use crate::contact::{Contact, UNKNOWN_COLOR};
use crate::contacts::fetch_contacts;
use crate::key::Key;
use crate::status::Status;
use crate::task::{Category, Priority, Subtask, Task};
use crate::traits::DocumentStore;

/// How many avatars a card shows before it displays a `+N` bubble
pub const MAX_VISIBLE_ASSIGNEES: usize = 3;

/// A contact a task is assigned to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignee {
    pub id: Key,
    /// Empty if this contact does not exist (any more)
    pub name: String,
    pub initials: String,
    /// `#rrggbb`
    pub color: String,
}

impl Assignee {
    fn new(id: &Key, contact: Option<&Contact>) -> Self {
        match contact {
            Some(contact) => Self {
                id: id.clone(),
                name: contact.name().to_string(),
                initials: contact.initials(),
                color: contact.color_hex(),
            },
            None => Self {
                id: id.clone(),
                name: String::new(),
                initials: String::new(),
                color: UNKNOWN_COLOR.to_string(),
            },
        }
    }
}


/// A task, as shown on the board (and in its detail overlay)
#[derive(Clone, Debug, PartialEq)]
pub struct TaskCard {
    pub id: Key,
    pub status: Status,
    pub title: String,
    pub description: String,
    pub date: String,
    pub category: Category,
    pub category_color: String,
    pub priority: Priority,
    pub subtasks: Vec<Subtask>,
    /// Checked subtasks, out of how many. `None` when the task has no subtask, and no progress bar is shown
    pub progress: Option<(usize, usize)>,
    /// Every assignee, in assignment order
    pub assignees: Vec<Assignee>,
}

impl TaskCard {
    pub fn new(task: &Task, contacts: &HashMap<&Key, &Contact>) -> Self {
        Self {
            id: task.id().clone(),
            status: task.status(),
            title: task.title().to_string(),
            description: task.description().to_string(),
            date: task.date().to_string(),
            category: task.category().clone(),
            category_color: task.category().color().to_string(),
            priority: task.priority(),
            subtasks: task.subtasks().to_vec(),
            progress: task.subtask_progress(),
            assignees: task.contacts().iter()
                .map(|id| Assignee::new(id, contacts.get(id).copied()))
                .collect(),
        }
    }

    /// The avatars that fit on the card
    pub fn visible_assignees(&self) -> &[Assignee] {
        let n = self.assignees.len().min(MAX_VISIBLE_ASSIGNEES);
        &self.assignees[..n]
    }

    /// How many assignees do not fit on the card
    pub fn hidden_assignees(&self) -> usize {
        self.assignees.len().saturating_sub(MAX_VISIBLE_ASSIGNEES)
    }

    /// The `+N` bubble, if some assignees do not fit on the card
    pub fn hidden_assignees_label(&self) -> Option<String> {
        match self.hidden_assignees() {
            0 => None,
            n => Some(format!("+{}", n)),
        }
    }

    /// The width of the progress bar, in percent
    pub fn progress_percent(&self) -> Option<u32> {
        self.progress.map(|(done, total)| (done * 100 / total.max(1)) as u32)
    }
}


/// A column of the board
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnView {
    pub status: Status,
    pub cards: Vec<TaskCard>,
}

impl ColumnView {
    /// The text shown instead of the cards, when this column is empty
    pub fn placeholder(&self) -> Option<String> {
        if self.cards.is_empty() {
            Some(placeholder(self.status))
        } else {
            None
        }
    }
}

/// `"No tasks To do"`, `"No tasks In progress"`, etc.
pub fn placeholder(status: Status) -> String {
    format!("No tasks {}", status.title())
}


/// The whole board, ready to be displayed
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    /// Build the board from its tasks, and the contacts they may be assigned to
    pub fn build(columns: &Columns, contacts: &[Contact]) -> Self {
        let by_id: HashMap<&Key, &Contact> = contacts.iter().map(|c| (c.id(), c)).collect();

        let columns = columns.iter()
            .map(|(status, tasks)| ColumnView {
                status,
                cards: tasks.iter().map(|task| TaskCard::new(task, &by_id)).collect(),
            })
            .collect();
        Self { columns }
    }

    /// Fetch the tasks and the user list, and build the board
    pub async fn load<S>(board: &Board<S>) -> Result<Self, Box<dyn Error>>
    where
        S: DocumentStore + Sync,
    {
        let columns = board.load_all().await?;
        let contacts = fetch_contacts(board.store()).await?;
        Ok(Self::build(&columns, &contacts))
    }

    pub fn column(&self, status: Status) -> Option<&ColumnView> {
        self.columns.iter().find(|column| column.status == status)
    }

    pub fn cards(&self) -> impl Iterator<Item = &TaskCard> + '_ {
        self.columns.iter().flat_map(|column| column.cards.iter())
    }

    pub fn card(&self, id: &Key) -> Option<&TaskCard> {
        self.cards().find(|card| &card.id == id)
    }
}
