use crate::errors::StoreError;
use crate::models::{DailyLog, Status, StatusKey, StoreData, TaskEntry, UpdateOutcome};
use crate::schedule::trackable;
use crate::stats::MonthKey;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::{fs, sync::Mutex};
use tracing::{error, info, warn};

/// JSON document store holding one `DailyLog` per calendar date.
///
/// Opened once at startup and shared through `AppState`. Every mutation is
/// written through to disk before the lock is released; a failed write is
/// rolled back in memory and reported to the caller.
pub struct LogStore {
    path: PathBuf,
    data: Mutex<StoreData>,
}

impl LogStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = load_data(&path).await?;
        info!(path = %path.display(), logs = data.daily_logs.len(), "opened log store");
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Returns the log for `date`, seeding it from `scheduled_tasks` when absent.
    ///
    /// An existing log is returned untouched; `scheduled_tasks` only matters the
    /// first time a date is seen.
    pub async fn get_or_create<S: AsRef<str>>(
        &self,
        date: NaiveDate,
        scheduled_tasks: &[S],
    ) -> Result<DailyLog, StoreError> {
        let key = date.to_string();
        let mut data = self.data.lock().await;
        if let Some(log) = data.daily_logs.get(&key) {
            return Ok(log.clone());
        }

        let log = DailyLog {
            date: key.clone(),
            tasks: trackable(scheduled_tasks).into_iter().map(TaskEntry::new).collect(),
        };
        data.daily_logs.insert(key.clone(), log.clone());

        if let Err(err) = persist_data(&self.path, &data).await {
            data.daily_logs.remove(&key);
            return Err(err);
        }

        info!(date = %key, tasks = log.tasks.len(), "created daily log");
        Ok(log)
    }

    pub async fn get(&self, date: NaiveDate) -> Option<DailyLog> {
        self.data.lock().await.daily_logs.get(&date.to_string()).cloned()
    }

    /// Sets one status field. Matches nothing, and writes nothing, when the
    /// date has no log or the log has no task called `key.task`.
    pub async fn set_status(&self, key: &StatusKey, status: Status) -> Result<UpdateOutcome, StoreError> {
        let date = key.date.to_string();
        let mut data = self.data.lock().await;

        let Some(entry) = data
            .daily_logs
            .get_mut(&date)
            .and_then(|log| log.tasks.iter_mut().find(|task| task.name == key.task))
        else {
            warn!(date = %date, task = %key.task, person = %key.person, "status update matched no task");
            return Ok(UpdateOutcome {
                matched: false,
                previous: None,
            });
        };

        let previous_raw = entry.raw_status(key.person).to_string();
        let previous = entry.status(key.person);
        entry.set_status(key.person, status);

        if let Err(err) = persist_data(&self.path, &data).await {
            if let Some(entry) = data
                .daily_logs
                .get_mut(&date)
                .and_then(|log| log.tasks.iter_mut().find(|task| task.name == key.task))
            {
                entry.set_raw_status(key.person, previous_raw);
            }
            return Err(err);
        }

        info!(
            date = %date,
            task = %key.task,
            person = %key.person,
            from = %previous,
            to = %status,
            "status updated"
        );
        Ok(UpdateOutcome {
            matched: true,
            previous: Some(previous),
        })
    }

    pub async fn date_keys(&self) -> Vec<String> {
        self.data.lock().await.daily_logs.keys().cloned().collect()
    }

    pub async fn logs_in_month(&self, month: &MonthKey) -> Vec<DailyLog> {
        let prefix = month.to_string();
        self.data
            .lock()
            .await
            .daily_logs
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, log)| log.clone())
            .collect()
    }
}

pub async fn load_data(path: &Path) -> Result<StoreData, StoreError> {
    match fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| {
            error!("failed to parse store file: {source}");
            StoreError::Corrupt {
                path: path.to_path_buf(),
                source,
            }
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(StoreData::default()),
        Err(source) => {
            error!("failed to read store file: {source}");
            Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

pub async fn persist_data(path: &Path, data: &StoreData) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await.map_err(|source| {
        error!("failed to write store file: {source}");
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;
    use crate::schedule::ScheduleTemplate;
    use crate::test_support::TempDataPath;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key(date: NaiveDate, task: &str, person: Person) -> StatusKey {
        StatusKey {
            date,
            task: task.to_string(),
            person,
        }
    }

    #[tokio::test]
    async fn get_or_create_seeds_trackable_tasks_once() {
        let temp = TempDataPath::new("seed");
        let path = temp.path();
        let store = LogStore::open(path).await.unwrap();
        let schedule = ScheduleTemplate::default();
        // 2024-03-07 is a Thursday.
        let day = date(2024, 3, 7);
        let tasks = schedule.tasks_for(day.weekday()).unwrap();

        let first = store.get_or_create(day, tasks).await.unwrap();
        let names: Vec<&str> = first.tasks.iter().map(|task| task.name.as_str()).collect();
        assert_eq!(names, vec!["DSA", "DN/NPN", "LEET", "GYM"]);
        assert!(first.tasks.iter().all(|task| task.status(Person::Bby) == Status::NotDone
            && task.status(Person::Bbu) == Status::NotDone));

        store
            .set_status(&key(day, "LEET", Person::Bbu), Status::Doing)
            .await
            .unwrap();

        let second = store.get_or_create(day, tasks).await.unwrap();
        assert_eq!(second.task("LEET").unwrap().status(Person::Bbu), Status::Doing);
        assert_eq!(second.tasks.len(), first.tasks.len());
    }

    #[tokio::test]
    async fn existing_log_ignores_changed_schedule() {
        let temp = TempDataPath::new("stale");
        let path = temp.path();
        let store = LogStore::open(path).await.unwrap();
        let day = date(2024, 3, 4);

        store.get_or_create(day, &["DSA", "GYM"]).await.unwrap();
        let again = store.get_or_create(day, &["DSA", "Swim", "BREAK"]).await.unwrap();
        let names: Vec<&str> = again.tasks.iter().map(|task| task.name.as_str()).collect();
        assert_eq!(names, vec!["DSA", "GYM"]);
    }

    #[tokio::test]
    async fn set_status_touches_exactly_one_field_and_persists() {
        let temp = TempDataPath::new("update");
        let path = temp.path();
        let store = LogStore::open(path).await.unwrap();
        let day = date(2024, 3, 4);
        store
            .get_or_create(day, &["DSA", "React Js", "Projects"])
            .await
            .unwrap();

        let outcome = store
            .set_status(&key(day, "Projects", Person::Bby), Status::Done)
            .await
            .unwrap();
        assert!(outcome.matched);
        assert_eq!(outcome.previous, Some(Status::NotDone));

        let reopened = LogStore::open(path).await.unwrap();
        let log = reopened.get(day).await.unwrap();
        for task in &log.tasks {
            for person in Person::ALL {
                let expected = if task.name == "Projects" && person == Person::Bby {
                    Status::Done
                } else {
                    Status::NotDone
                };
                assert_eq!(task.status(person), expected, "{} / {person}", task.name);
            }
        }
    }

    #[tokio::test]
    async fn update_for_missing_task_leaves_store_unchanged() {
        let temp = TempDataPath::new("nomatch");
        let path = temp.path();
        let store = LogStore::open(path).await.unwrap();
        let schedule = ScheduleTemplate::default();
        let thursday = date(2024, 3, 7);
        store
            .get_or_create(thursday, schedule.tasks_for(thursday.weekday()).unwrap())
            .await
            .unwrap();
        let before = std::fs::read(&path).unwrap();

        let outcome = store
            .set_status(&key(thursday, "Projects", Person::Bby), Status::Done)
            .await
            .unwrap();
        assert!(!outcome.matched);
        assert_eq!(outcome.previous, None);
        assert_eq!(std::fs::read(&path).unwrap(), before);

        let no_log = store
            .set_status(&key(date(2024, 3, 8), "DSA", Person::Bby), Status::Done)
            .await
            .unwrap();
        assert!(!no_log.matched);
        assert!(store.get(date(2024, 3, 8)).await.is_none());
    }

    #[tokio::test]
    async fn unknown_stored_status_reads_as_not_done_without_rewrite() {
        let temp = TempDataPath::new("unknown");
        let path = temp.path();
        std::fs::write(
            &path,
            r#"{"daily_logs":{"2024-03-04":{"_id":"2024-03-04","tasks":[
                {"name":"DSA","bby_status":"Maybe","bbu_status":"Done"},
                {"name":"GYM","bby_status":"Done","bbu_status":"Doing"}]}}}"#,
        )
        .unwrap();
        let store = LogStore::open(path).await.unwrap();
        let day = date(2024, 3, 4);

        let log = store.get(day).await.unwrap();
        let dsa = log.task("DSA").unwrap();
        assert_eq!(dsa.status(Person::Bby), Status::NotDone);
        assert_eq!(dsa.raw_status(Person::Bby), "Maybe");

        store
            .set_status(&key(day, "GYM", Person::Bbu), Status::Done)
            .await
            .unwrap();
        let reopened = LogStore::open(path).await.unwrap();
        let log = reopened.get(day).await.unwrap();
        assert_eq!(log.task("DSA").unwrap().raw_status(Person::Bby), "Maybe");
        assert_eq!(log.task("GYM").unwrap().status(Person::Bbu), Status::Done);
    }

    #[tokio::test]
    async fn corrupt_store_fails_to_open() {
        let temp = TempDataPath::new("corrupt");
        let path = temp.path();
        std::fs::write(&path, b"{ not json").unwrap();
        let result = LogStore::open(path).await;
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn unwritable_store_fails_loudly_and_rolls_back() {
        let temp = TempDataPath::new("missing_dir");
        let path = temp.path().join("nested.json");
        let store = LogStore::open(&path).await.unwrap();
        let day = date(2024, 3, 4);

        let result = store.get_or_create(day, &["DSA"]).await;
        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert!(store.get(day).await.is_none());
    }

    #[tokio::test]
    async fn logs_in_month_filters_by_prefix() {
        let temp = TempDataPath::new("month");
        let path = temp.path();
        let store = LogStore::open(path).await.unwrap();
        store.get_or_create(date(2024, 3, 5), &["DSA"]).await.unwrap();
        store.get_or_create(date(2024, 3, 20), &["DSA"]).await.unwrap();
        store.get_or_create(date(2024, 4, 1), &["DSA"]).await.unwrap();

        let march: MonthKey = "2024-03".parse().unwrap();
        let logs = store.logs_in_month(&march).await;
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|log| log.date.starts_with("2024-03")));
        assert_eq!(store.date_keys().await.len(), 3);
    }
}
