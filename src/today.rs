use crate::errors::StoreError;
use crate::models::{DailyLog, Person, Status, TodayTask, TodayView};
use crate::schedule::{ScheduleTemplate, is_sentinel, weekday_name};
use crate::storage::LogStore;
use chrono::{Datelike, NaiveDate};

/// Resolves the checklist for `date`, creating the day's log on first view.
///
/// Weekdays without a schedule are rest days and never get a log.
pub async fn today_view(
    store: &LogStore,
    schedule: &ScheduleTemplate,
    date: NaiveDate,
) -> Result<TodayView, StoreError> {
    let weekday = date.weekday();
    let Some(scheduled) = schedule.tasks_for(weekday) else {
        return Ok(TodayView {
            date: date.to_string(),
            weekday: weekday_name(weekday).to_string(),
            rest_day: true,
            tasks: Vec::new(),
        });
    };

    let log = store.get_or_create(date, scheduled).await?;

    Ok(TodayView {
        date: date.to_string(),
        weekday: weekday_name(weekday).to_string(),
        rest_day: false,
        tasks: merge_statuses(scheduled, &log),
    })
}

/// Pairs each scheduled task with its logged statuses. A task the log does
/// not know about (the schedule changed after the log was made) shows as
/// Not Done.
pub fn merge_statuses<S: AsRef<str>>(scheduled: &[S], log: &DailyLog) -> Vec<TodayTask> {
    scheduled
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !is_sentinel(name))
        .map(|name| {
            let (bby, bbu) = log
                .task(name)
                .map(|entry| (entry.status(Person::Bby), entry.status(Person::Bbu)))
                .unwrap_or((Status::NotDone, Status::NotDone));
            TodayTask {
                name: name.to_string(),
                bby,
                bbu,
            }
        })
        .collect()
}
