use crate::models::{ScheduleResponse, ScheduleRow};
use chrono::Weekday;

pub const SENTINEL_TASKS: [&str; 2] = ["—", "BREAK"];

pub fn is_sentinel(name: &str) -> bool {
    SENTINEL_TASKS.contains(&name)
}

/// Fixed weekly timetable: every scheduled weekday has one task per slot.
#[derive(Debug, Clone)]
pub struct ScheduleTemplate {
    slots: Vec<String>,
    days: Vec<(Weekday, Vec<String>)>,
}

impl ScheduleTemplate {
    pub fn new(slots: Vec<String>, days: Vec<(Weekday, Vec<String>)>) -> Self {
        Self { slots, days }
    }

    pub fn weekdays(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.days.iter().map(|(weekday, _)| *weekday)
    }

    pub fn tasks_for(&self, weekday: Weekday) -> Option<&[String]> {
        self.days
            .iter()
            .find(|(day, _)| *day == weekday)
            .map(|(_, tasks)| tasks.as_slice())
    }

    /// Tasks that get logged for `weekday`: the scheduled slots minus sentinels.
    pub fn trackable_tasks(&self, weekday: Weekday) -> Vec<String> {
        self.tasks_for(weekday)
            .map(|tasks| trackable(tasks))
            .unwrap_or_default()
    }

    pub fn rows(&self) -> Vec<ScheduleRow> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| ScheduleRow {
                slot: slot.clone(),
                cells: self
                    .days
                    .iter()
                    .map(|(_, tasks)| tasks.get(index).cloned().unwrap_or_else(|| "—".to_string()))
                    .collect(),
            })
            .collect()
    }

    pub fn to_response(&self) -> ScheduleResponse {
        ScheduleResponse {
            weekdays: self.weekdays().map(weekday_name).map(str::to_string).collect(),
            rows: self.rows(),
        }
    }
}

impl Default for ScheduleTemplate {
    fn default() -> Self {
        let slots = [
            "📚 5 videos/day",
            "💻 Programming Language",
            "🧠 1 chapter/day",
            "🚀 Internship / Projects",
            "☕ JAVA/DBMS",
            "💪 IMP",
        ];
        let days: [(Weekday, [&str; 6]); 6] = [
            (Weekday::Mon, ["DSA", "React Js", "Aptitude", "Projects", "LEET", "GYM"]),
            (Weekday::Tue, ["DAA", "React Js", "Aptitude", "Projects", "LEET", "GYM"]),
            (Weekday::Wed, ["DBMS", "React Js", "Aptitude", "Projects", "LEET", "BREAK"]),
            (Weekday::Thu, ["DSA", "BREAK", "BREAK", "DN/NPN", "LEET", "GYM"]),
            (Weekday::Fri, ["DAA", "BREAK", "BREAK", "DN/NPN", "LEET", "GYM"]),
            (Weekday::Sat, ["DBMS", "React Js", "Aptitude", "Projects", "LEET", "BREAK"]),
        ];

        Self::new(
            slots.iter().map(|slot| slot.to_string()).collect(),
            days.iter()
                .map(|(weekday, tasks)| (*weekday, tasks.iter().map(|task| task.to_string()).collect()))
                .collect(),
        )
    }
}

pub fn trackable<S: AsRef<str>>(tasks: &[S]) -> Vec<String> {
    tasks
        .iter()
        .map(AsRef::as_ref)
        .filter(|task| !is_sentinel(task))
        .map(str::to_string)
        .collect()
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
