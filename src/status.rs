//! The four columns of the board

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a task sits on the board.
///
/// Tasks can move freely between any two columns, there is no transition rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "toDo")]
    ToDo,
    #[serde(rename = "progress")]
    Progress,
    #[serde(rename = "feedback")]
    Feedback,
    #[serde(rename = "done")]
    Done,
}

impl Status {
    /// Every column, in board order
    pub const ALL: [Status; 4] = [Status::ToDo, Status::Progress, Status::Feedback, Status::Done];

    /// The name of this column in the store paths (`tasks/{name}/...`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::ToDo => "toDo",
            Status::Progress => "progress",
            Status::Feedback => "feedback",
            Status::Done => "done",
        }
    }

    /// The column title, as displayed on the board
    pub fn title(&self) -> &'static str {
        match self {
            Status::ToDo => "To do",
            Status::Progress => "In progress",
            Status::Feedback => "Await feedback",
            Status::Done => "Done",
        }
    }

    /// The store path of this column
    pub fn path(&self) -> String {
        format!("tasks/{}", self.as_str())
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::ToDo
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL.iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown board column {:?}", s))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status() {
        assert_eq!("toDo".parse::<Status>(), Ok(Status::ToDo));
        assert_eq!("todo".parse::<Status>(), Ok(Status::ToDo));
        assert_eq!("feedback".parse::<Status>(), Ok(Status::Feedback));
        assert!("archived".parse::<Status>().is_err());
    }

    #[test]
    fn serde_status() {
        assert_eq!(serde_json::to_string(&Status::Progress).unwrap(), "\"progress\"");
        let s: Status = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(s, Status::Done);
        assert_eq!(Status::ToDo.path(), "tasks/toDo");
    }
}
