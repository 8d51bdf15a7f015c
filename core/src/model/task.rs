use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Todo,
    Done,
}

impl Default for TaskState {
    fn default() -> Self {
        TaskState::Todo
    }
}

/// The three lists a task can live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum List {
    NextActions,
    WaitingOn,
    SomedayMaybe,
}

impl List {
    pub const ALL: [List; 3] = [List::NextActions, List::WaitingOn, List::SomedayMaybe];

    pub fn title(&self) -> &'static str {
        match self {
            List::NextActions => "Next Actions",
            List::WaitingOn => "Waiting On",
            List::SomedayMaybe => "Someday Maybe",
        }
    }

    /// Editable fields, in display order. Next Actions carries a schedule,
    /// Waiting On tracks a follow-up date, Someday Maybe is text only.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            List::NextActions => &[Field::Date, Field::Text, Field::Time, Field::Project],
            List::WaitingOn => &[Field::Date, Field::Text, Field::Notes],
            List::SomedayMaybe => &[Field::Text, Field::Notes],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Text,
    Time,
    Project,
    Notes,
}

/// One row on the board. Absent fields hold the empty string rather than
/// None so every cell can render and be edited in place.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub state: TaskState,
    pub text: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub notes: String,
}

impl Task {
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: TaskState::default(),
            text,
            date: String::new(),
            time: String::new(),
            project: String::new(),
            notes: String::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Board {
    #[serde(rename = "next-actions", default)]
    pub next_actions: Vec<Task>,
    #[serde(rename = "waiting-on", default)]
    pub waiting_on: Vec<Task>,
    #[serde(rename = "someday-maybe", default)]
    pub someday_maybe: Vec<Task>,
}

impl Board {
    pub fn tasks(&self, list: List) -> &Vec<Task> {
        match list {
            List::NextActions => &self.next_actions,
            List::WaitingOn => &self.waiting_on,
            List::SomedayMaybe => &self.someday_maybe,
        }
    }

    pub fn tasks_mut(&mut self, list: List) -> &mut Vec<Task> {
        match list {
            List::NextActions => &mut self.next_actions,
            List::WaitingOn => &mut self.waiting_on,
            List::SomedayMaybe => &mut self.someday_maybe,
        }
    }
}
