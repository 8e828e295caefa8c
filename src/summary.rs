//! The summary page: task counters, the most urgent deadline, and a greeting

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;

use crate::board::{Board, Columns};
use crate::session::Session;
use crate::status::Status;
use crate::task::{Priority, Task};
use crate::traits::DocumentStore;

/// Shown instead of a date when no task is pending
pub const NO_DEADLINE: &str = "No upcoming Deadline";

/// The most urgent pending tasks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrgentFigure {
    /// The highest priority among the tasks that are not done
    pub priority: Priority,
    /// How many pending tasks have this priority
    pub count: usize,
    /// The earliest due date of these tasks (`None` if none of them has a valid date)
    pub earliest_date: Option<NaiveDate>,
}

impl UrgentFigure {
    /// Find the most urgent tasks, or `None` if there is no task
    pub fn compute<'a, I>(pending_tasks: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let tasks: Vec<&Task> = pending_tasks.into_iter().collect();
        let priority = tasks.iter().map(|task| task.priority()).min()?;
        let most_urgent: Vec<&&Task> = tasks.iter().filter(|task| task.priority() == priority).collect();

        Some(Self {
            priority,
            count: most_urgent.len(),
            earliest_date: most_urgent.iter().filter_map(|task| task.due_date()).min(),
        })
    }

    /// The deadline, e.g. `"October 16, 2025"`
    pub fn deadline_label(&self) -> String {
        match self.earliest_date {
            None => "None".to_string(),
            Some(date) => date.format("%B %-d, %Y").to_string(),
        }
    }
}


/// The greeting at the top of the summary
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Greeting {
    pub salutation: String,
    /// Empty for the guest
    pub name: String,
}

impl Greeting {
    pub fn new(user: &str) -> Self {
        if user == crate::config::get(&crate::config::GUEST_NAME) {
            Self { salutation: "Good morning!".to_string(), name: String::new() }
        } else {
            Self { salutation: "Good morning,".to_string(), name: user.to_string() }
        }
    }
}

impl Display for Greeting {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.name.is_empty() {
            true => write!(f, "{}", self.salutation),
            false => write!(f, "{} {}", self.salutation, self.name),
        }
    }
}

/// Shortcut for [`Greeting::new`]
pub fn greeting(user: &str) -> Greeting {
    Greeting::new(user)
}


/// The figures of the summary page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub to_do: Option<usize>,
    pub in_progress: Option<usize>,
    pub awaiting_feedback: Option<usize>,
    pub done: Option<usize>,
    /// `None` if there is no pending task
    pub urgent: Option<UrgentFigure>,
    pub greeting: Option<Greeting>,
}

impl Summary {
    /// Compute the figures for columns that have all been loaded
    pub fn compute(columns: &Columns) -> Self {
        Self::compute_partial(columns, &Status::ALL)
    }

    /// Compute the figures, knowing only some columns could be loaded. Counters of the other columns are `None`
    fn compute_partial(columns: &Columns, loaded: &[Status]) -> Self {
        let count = |status: Status| match loaded.contains(&status) {
            true => Some(columns.count(status)),
            false => None,
        };
        let pending = columns.iter()
            .filter(|(status, _)| *status != Status::Done)
            .flat_map(|(_, tasks)| tasks.iter());

        Self {
            to_do: count(Status::ToDo),
            in_progress: count(Status::Progress),
            awaiting_feedback: count(Status::Feedback),
            done: count(Status::Done),
            urgent: UrgentFigure::compute(pending),
            greeting: None,
        }
    }

    /// Tasks that are on the board, i.e. not done. `None` if a column is missing
    pub fn on_board(&self) -> Option<usize> {
        Some(self.to_do? + self.in_progress? + self.awaiting_feedback?)
    }

    /// The text of the deadline tile
    pub fn deadline_label(&self) -> String {
        match &self.urgent {
            None => NO_DEADLINE.to_string(),
            Some(urgent) => urgent.deadline_label(),
        }
    }

    /// Fetch the board and the session, and compute the figures.
    ///
    /// Columns that cannot be fetched are logged and left out, just like a missing session record
    pub async fn load<S>(store: &S) -> Self
    where
        S: DocumentStore + Sync,
    {
        let board = Board::new(store);
        let mut columns = Columns::new();
        let mut loaded = Vec::new();
        for status in Status::ALL.iter() {
            match board.load_column(*status).await {
                Ok(tasks) => {
                    columns.set(*status, tasks);
                    loaded.push(*status);
                },
                Err(err) => log::warn!("Unable to count the tasks in {}: {}", status, err),
            }
        }

        let mut summary = Self::compute_partial(&columns, &loaded);
        summary.greeting = match Session::new(store).current_user().await {
            Ok(user) => user.map(|name| Greeting::new(&name)),
            Err(err) => {
                log::warn!("Unable to know who is logged in: {}", err);
                None
            },
        };
        summary
    }
}
