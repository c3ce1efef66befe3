use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const STATUS_NOT_DONE: &str = "Not Done";
pub const STATUS_DOING: &str = "Doing";
pub const STATUS_DONE: &str = "Done";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    #[serde(rename = "Not Done")]
    NotDone,
    Doing,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::NotDone, Status::Doing, Status::Done];

    pub fn label(self) -> &'static str {
        match self {
            Status::NotDone => STATUS_NOT_DONE,
            Status::Doing => STATUS_DOING,
            Status::Done => STATUS_DONE,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Person {
    Bby,
    Bbu,
}

impl Person {
    pub const ALL: [Person; 2] = [Person::Bby, Person::Bbu];

    pub fn label(self) -> &'static str {
        match self {
            Person::Bby => "BBY",
            Person::Bbu => "BBU",
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One tracked task inside a daily log.
///
/// Statuses are kept as the raw stored strings so that a value this build does
/// not recognise survives a round trip through the store untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub name: String,
    #[serde(default = "not_done_label")]
    pub bby_status: String,
    #[serde(default = "not_done_label")]
    pub bbu_status: String,
}

fn not_done_label() -> String {
    STATUS_NOT_DONE.to_string()
}

impl TaskEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bby_status: not_done_label(),
            bbu_status: not_done_label(),
        }
    }

    pub fn raw_status(&self, person: Person) -> &str {
        match person {
            Person::Bby => &self.bby_status,
            Person::Bbu => &self.bbu_status,
        }
    }

    /// Parsed status for display; unknown stored values read as `NotDone`.
    pub fn status(&self, person: Person) -> Status {
        let raw = self.raw_status(person);
        Status::from_label(raw).unwrap_or_else(|| {
            tracing::debug!(task = %self.name, %person, value = raw, "unknown stored status, showing as Not Done");
            Status::NotDone
        })
    }

    pub fn is_done(&self, person: Person) -> bool {
        self.raw_status(person) == STATUS_DONE
    }

    pub fn set_status(&mut self, person: Person, status: Status) {
        self.set_raw_status(person, status.label().to_string());
    }

    pub fn set_raw_status(&mut self, person: Person, raw: String) {
        match person {
            Person::Bby => self.bby_status = raw,
            Person::Bbu => self.bbu_status = raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLog {
    #[serde(rename = "_id")]
    pub date: String,
    #[serde(default)]
    pub tasks: Vec<TaskEntry>,
}

impl DailyLog {
    pub fn task(&self, name: &str) -> Option<&TaskEntry> {
        self.tasks.iter().find(|task| task.name == name)
    }
}

/// The whole persisted document: one collection of daily logs keyed by ISO date.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreData {
    #[serde(default)]
    pub daily_logs: BTreeMap<String, DailyLog>,
}

/// Addresses a single status field: one person, one task, one day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatusKey {
    pub date: NaiveDate,
    pub task: String,
    pub person: Person,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: bool,
    pub previous: Option<Status>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub date: String,
    pub task: String,
    pub person: Person,
    pub status: Status,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub matched: bool,
    pub date: String,
    pub task: String,
    pub person: Person,
    pub previous: Option<Status>,
    pub status: Status,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayTask {
    pub name: String,
    pub bby: Status,
    pub bbu: Status,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayView {
    pub date: String,
    pub weekday: String,
    pub rest_day: bool,
    pub tasks: Vec<TodayTask>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRow {
    pub slot: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleResponse {
    pub weekdays: Vec<String>,
    pub rows: Vec<ScheduleRow>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub month: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCompletion {
    pub task: String,
    pub bby: u64,
    pub bbu: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCompletion {
    pub day: u32,
    pub bby: u64,
    pub bbu: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub day: u32,
    pub person: Person,
    pub tasks_done: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub month: String,
    pub has_data: bool,
    pub bby_total: u64,
    pub bbu_total: u64,
    pub task_completions: Vec<TaskCompletion>,
    pub daily_completions: Vec<DayCompletion>,
    pub cumulative: Vec<ProgressPoint>,
}
