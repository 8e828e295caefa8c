//! Tasks of the board, and their subtasks

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use serde::de::{DeserializeOwned, Error as DeError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use chrono::NaiveDate;

use crate::key::Key;
use crate::status::Status;
use crate::validation::{self, InvalidForm, TaskFormError};

/// The format of due dates, as typed in the date picker
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// How urgent a task is.
///
/// The store keeps it as the strings `"1"`, `"2"` and `"3"`. Variants are ordered from the most to the least urgent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    Urgent,
    Medium,
    Low,
}

impl Priority {
    /// The numeric level used by the store (1 is the most urgent)
    pub fn level(&self) -> u8 {
        match self {
            Priority::Urgent => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    /// Read a level. Anything unexpected is considered as a medium priority
    pub fn from_level(level: i64) -> Self {
        match level {
            1 => Priority::Urgent,
            3 => Priority::Low,
            _ => Priority::Medium,
        }
    }

    /// A lowercase label, e.g. to pick an icon
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Priority::Urgent => "Urgent",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl Serialize for Priority {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.level().to_string())
    }
}
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Priority, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64().unwrap_or(2),
            Value::String(s) => s.trim().parse().unwrap_or(2),
            _ => 2,
        };
        Ok(Priority::from_level(level))
    }
}


/// The kind of work a task is about
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    UserStory,
    TechnicalTask,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::UserStory => "User Story",
            Category::TechnicalTask => "Technical Task",
            Category::Other(s) => s,
        }
    }

    /// The colour of the category badge on task cards
    pub fn color(&self) -> &'static str {
        match self {
            Category::UserStory => "#0038FF",
            Category::TechnicalTask => "#1FD7C1",
            Category::Other(_) => "#000000",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other(String::new())
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s {
            "User Story" => Category::UserStory,
            "Technical Task" => Category::TechnicalTask,
            other => Category::Other(other.to_string()),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Category, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Category::from(s.as_str()))
    }
}


/// A checklist item of a task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub task: String,
    #[serde(default)]
    pub checked: bool,
}

impl Subtask {
    pub fn new<S: ToString>(task: S) -> Self {
        Self { task: task.to_string(), checked: false }
    }
}


/// The body of a task, as it is stored under `tasks/{status}/{id}`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct TaskDocument {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    prio: Priority,
    #[serde(default)]
    category: Category,
    #[serde(default, deserialize_with = "list_or_map")]
    contacts: Vec<Key>,
    #[serde(default, deserialize_with = "list_or_map")]
    subtasks: Vec<Subtask>,
}

/// A task of the board
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    /// The key of this task in its column
    id: Key,
    /// The column this task is in
    status: Status,

    title: String,
    description: String,
    /// The due date, as typed by the user (`DD/MM/YYYY`)
    date: String,
    priority: Priority,
    category: Category,
    /// Keys of the assigned contacts
    contacts: Vec<Key>,
    subtasks: Vec<Subtask>,
}

impl Task {
    /// Build a task from the content of a form
    pub fn from_draft(id: Key, status: Status, draft: TaskDraft) -> Self {
        Self {
            id,
            status,
            title: draft.title,
            description: draft.description,
            date: draft.date,
            priority: draft.priority,
            category: draft.category.unwrap_or_default(),
            contacts: draft.contacts,
            subtasks: draft.subtasks,
        }
    }

    /// Read a task from a document of the store
    pub fn from_document(id: Key, status: Status, document: Value) -> Result<Self, serde_json::Error> {
        let doc: TaskDocument = serde_json::from_value(document)?;
        Ok(Self {
            id,
            status,
            title: doc.title,
            description: doc.description,
            date: doc.date,
            priority: doc.prio,
            category: doc.category,
            contacts: doc.contacts,
            subtasks: doc.subtasks,
        })
    }

    /// The document to store for this task (its key and column are not part of it)
    pub fn to_document(&self) -> Value {
        let doc = TaskDocument {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            prio: self.priority,
            category: self.category.clone(),
            contacts: self.contacts.clone(),
            subtasks: self.subtasks.clone(),
        };
        serde_json::to_value(doc).unwrap_or(Value::Null)
    }

    pub fn id(&self) -> &Key             { &self.id          }
    pub fn status(&self) -> Status        { self.status        }
    pub fn title(&self) -> &str           { &self.title       }
    pub fn description(&self) -> &str     { &self.description }
    pub fn date(&self) -> &str            { &self.date        }
    pub fn priority(&self) -> Priority    { self.priority      }
    pub fn category(&self) -> &Category   { &self.category    }
    pub fn contacts(&self) -> &[Key]      { &self.contacts    }
    pub fn subtasks(&self) -> &[Subtask]  { &self.subtasks    }

    /// The store path of this task
    pub fn path(&self) -> String {
        format!("{}/{}", self.status.path(), self.id)
    }

    /// The due date, if it is a valid `DD/MM/YYYY` date
    pub fn due_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// How many subtasks are checked, out of how many (`None` if this task has no subtask)
    pub fn subtask_progress(&self) -> Option<(usize, usize)> {
        if self.subtasks.is_empty() {
            return None;
        }
        let done = self.subtasks.iter().filter(|s| s.checked).count();
        Some((done, self.subtasks.len()))
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Unassign a contact. Returns whether it was assigned
    pub fn remove_contact(&mut self, contact: &Key) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|c| c != contact);
        self.contacts.len() != before
    }

    /// Check or uncheck a subtask. Returns its new state, or `None` if there is no such subtask
    pub fn toggle_subtask(&mut self, index: usize) -> Option<bool> {
        let subtask = self.subtasks.get_mut(index)?;
        subtask.checked = !subtask.checked;
        Some(subtask.checked)
    }

    pub fn set_subtasks(&mut self, subtasks: Vec<Subtask>) {
        self.subtasks = subtasks;
    }

    /// A form pre-filled with the content of this task, e.g. to edit it
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            priority: self.priority,
            category: Some(self.category.clone()),
            contacts: self.contacts.clone(),
            subtasks: self.subtasks.clone(),
        }
    }
}


/// The content of the "add task" (or "edit task") form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    /// `DD/MM/YYYY`
    pub date: String,
    pub priority: Priority,
    /// `None` until a category has been selected
    pub category: Option<Category>,
    pub contacts: Vec<Key>,
    pub subtasks: Vec<Subtask>,
}

impl TaskDraft {
    /// Check this form can be submitted
    pub fn validate(&self) -> Result<(), InvalidForm<TaskFormError>> {
        validation::validate_task_form(self)
    }

    /// Add a subtask, unless its text is empty
    pub fn add_subtask(&mut self, text: &str) {
        if text.is_empty() == false {
            self.subtasks.push(Subtask::new(text));
        }
    }

    /// Select or unselect a contact
    pub fn toggle_contact(&mut self, contact: &Key) {
        if self.contacts.contains(contact) {
            self.contacts.retain(|c| c != contact);
        } else {
            self.contacts.push(contact.clone());
        }
    }
}


/// The store turns sparse arrays into objects with numeric keys. This reads both forms (and `null`) as a list
fn list_or_map<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
            entries.into_iter().map(|(_, v)| v).collect()
        },
        other => return Err(D::Error::custom(format!("expected a list, got {}", other))),
    };

    values.into_iter()
        .filter(|v| v.is_null() == false)
        .map(|v| serde_json::from_value(v).map_err(D::Error::custom))
        .collect()
}

fn compare_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn read_task_document() {
        let doc = json!({
            "title": "Kochwelt Page & Recipe Recommender",
            "description": "Build start page with recipe recommendation.",
            "date": "10/05/2025",
            "prio": "1",
            "category": "User Story",
            "contacts": ["-c1", "-c2"],
            "subtasks": {
                "10": {"task": "Deploy", "checked": false},
                "2": {"task": "Implement recipe recommendation", "checked": true},
                "0": {"task": "Start page layout", "checked": true}
            }
        });

        let task = Task::from_document(Key::from("-t1"), Status::Progress, doc).unwrap();
        assert_eq!(task.priority(), Priority::Urgent);
        assert_eq!(task.category(), &Category::UserStory);
        assert_eq!(task.contacts(), &[Key::from("-c1"), Key::from("-c2")]);
        let names: Vec<&str> = task.subtasks().iter().map(|s| s.task.as_str()).collect();
        assert_eq!(names, vec!["Start page layout", "Implement recipe recommendation", "Deploy"]);
        assert_eq!(task.subtask_progress(), Some((2, 3)));
        assert_eq!(task.due_date(), NaiveDate::from_ymd_opt(2025, 5, 10));
        assert_eq!(task.path(), "tasks/progress/-t1");
    }

    #[test]
    fn lenient_reads() {
        let task = Task::from_document(Key::from("-t2"), Status::ToDo, json!({"title": "CSS architecture", "prio": 3, "contacts": null})).unwrap();
        assert_eq!(task.priority(), Priority::Low);
        assert!(task.contacts().is_empty());
        assert_eq!(task.subtask_progress(), None);
        assert_eq!(task.due_date(), None);

        let odd = Task::from_document(Key::from("-t3"), Status::ToDo, json!({"prio": "urgent!"})).unwrap();
        assert_eq!(odd.priority(), Priority::Medium);
    }

    #[test]
    fn document_does_not_contain_location() {
        let mut draft = TaskDraft { title: "HTML base template".into(), category: Some(Category::TechnicalTask), ..TaskDraft::default() };
        draft.add_subtask("");
        draft.add_subtask("Header");
        let task = Task::from_draft(Key::from("-t4"), Status::Done, draft);
        let doc = task.to_document();
        assert_eq!(doc["prio"], json!("2"));
        assert_eq!(doc["category"], json!("Technical Task"));
        assert_eq!(doc["subtasks"], json!([{"task": "Header", "checked": false}]));
        assert!(doc.get("id").is_none());
        assert!(doc.get("path").is_none());
    }

    #[test]
    fn contacts_and_subtasks() {
        let mut draft = TaskDraft::default();
        draft.toggle_contact(&Key::from("-a"));
        draft.toggle_contact(&Key::from("-b"));
        draft.toggle_contact(&Key::from("-a"));
        draft.subtasks = vec![Subtask::new("one"), Subtask::new("two")];

        let mut task = Task::from_draft(Key::from("-t5"), Status::ToDo, draft);
        assert_eq!(task.contacts(), &[Key::from("-b")]);
        assert!(task.remove_contact(&Key::from("-b")));
        assert!(task.remove_contact(&Key::from("-b")) == false);

        assert_eq!(task.toggle_subtask(1), Some(true));
        assert_eq!(task.toggle_subtask(1), Some(false));
        assert_eq!(task.toggle_subtask(7), None);
    }
}
