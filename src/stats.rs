use crate::models::{DailyLog, DayCompletion, MonthlyReport, Person, ProgressPoint, TaskCompletion};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

static MONTH_KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}$").expect("valid month regex"));

/// A `YYYY-MM` month, the grouping key for analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

#[derive(Debug, thiserror::Error)]
#[error("month must look like YYYY-MM, got {0:?}")]
pub struct InvalidMonth(pub String);

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|next| (next - self.first_day()).num_days() as u32)
            .unwrap_or(31)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = InvalidMonth;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if !MONTH_KEY_RE.is_match(value) {
            return Err(InvalidMonth(value.to_string()));
        }
        let invalid = || InvalidMonth(value.to_string());
        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

/// Distinct `YYYY-MM` prefixes among stored date keys, most recent first.
pub fn available_months<I, S>(date_keys: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let months: BTreeSet<String> = date_keys
        .into_iter()
        .map(|key| key.as_ref().chars().take(7).collect::<String>())
        .filter(|prefix| MONTH_KEY_RE.is_match(prefix))
        .collect();
    months.into_iter().rev().collect()
}

/// Done counts per task name across the given logs, ordered by task name.
///
/// Every task that appears in a log gets a row, even when nobody finished it.
pub fn task_completions(logs: &[DailyLog]) -> Vec<TaskCompletion> {
    let mut grouped: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for task in logs.iter().flat_map(|log| log.tasks.iter()) {
        let counts = grouped.entry(task.name.as_str()).or_default();
        counts.0 += u64::from(task.is_done(Person::Bby));
        counts.1 += u64::from(task.is_done(Person::Bbu));
    }

    grouped
        .into_iter()
        .map(|(task, (bby, bbu))| TaskCompletion {
            task: task.to_string(),
            bby,
            bbu,
        })
        .collect()
}

/// Done counts per day of month, one row per logged day, ordered by day.
pub fn daily_completions(logs: &[DailyLog]) -> Vec<DayCompletion> {
    let mut grouped: BTreeMap<u32, (u64, u64)> = BTreeMap::new();
    for log in logs {
        let Some(day) = day_of_month(&log.date) else {
            continue;
        };
        let counts = grouped.entry(day).or_default();
        for task in &log.tasks {
            counts.0 += u64::from(task.is_done(Person::Bby));
            counts.1 += u64::from(task.is_done(Person::Bbu));
        }
    }

    grouped
        .into_iter()
        .map(|(day, (bby, bbu))| DayCompletion { day, bby, bbu })
        .collect()
}

/// Running Done totals for every day of `month`, in long form.
///
/// Days without a row in `daily` count as zero, so the series always has
/// `days_in_month` points per person.
pub fn cumulative_series(month: MonthKey, daily: &[DayCompletion]) -> Vec<ProgressPoint> {
    let days = month.days_in_month();
    let mut bby_series = Vec::with_capacity(days as usize);
    let mut bbu_series = Vec::with_capacity(days as usize);
    let (mut bby_sum, mut bbu_sum) = (0u64, 0u64);

    for day in 1..=days {
        if let Some(row) = daily.iter().find(|row| row.day == day) {
            bby_sum = bby_sum.saturating_add(row.bby);
            bbu_sum = bbu_sum.saturating_add(row.bbu);
        }
        bby_series.push(ProgressPoint {
            day,
            person: Person::Bby,
            tasks_done: bby_sum,
        });
        bbu_series.push(ProgressPoint {
            day,
            person: Person::Bbu,
            tasks_done: bbu_sum,
        });
    }

    bby_series.extend(bbu_series);
    bby_series
}

/// Everything the analytics panel shows for one month.
pub fn build_monthly_report(month: MonthKey, logs: &[DailyLog]) -> MonthlyReport {
    let prefix = month.to_string();
    let logs: Vec<DailyLog> = logs
        .iter()
        .filter(|log| log.date.starts_with(&prefix))
        .cloned()
        .collect();

    let task_completions = task_completions(&logs);
    let daily_completions = daily_completions(&logs);
    let has_data = !logs.is_empty();
    let cumulative = if has_data {
        cumulative_series(month, &daily_completions)
    } else {
        Vec::new()
    };

    MonthlyReport {
        month: prefix,
        has_data,
        bby_total: task_completions.iter().map(|row| row.bby).sum(),
        bbu_total: task_completions.iter().map(|row| row.bbu).sum(),
        task_completions,
        daily_completions,
        cumulative,
    }
}

fn day_of_month(date_key: &str) -> Option<u32> {
    date_key.get(8..10)?.parse().ok()
}
