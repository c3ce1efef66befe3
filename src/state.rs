use crate::cache::StatsCache;
use crate::models::MonthlyReport;
use crate::schedule::ScheduleTemplate;
use crate::stats::MonthKey;
use crate::storage::LogStore;
use std::{sync::Arc, time::Duration};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LogStore>,
    pub schedule: Arc<ScheduleTemplate>,
    pub months_cache: Arc<StatsCache<(), Vec<String>>>,
    pub reports_cache: Arc<StatsCache<MonthKey, MonthlyReport>>,
}

impl AppState {
    pub fn new(store: LogStore, schedule: ScheduleTemplate, stats_ttl: Duration) -> Self {
        Self {
            store: Arc::new(store),
            schedule: Arc::new(schedule),
            months_cache: Arc::new(StatsCache::new(stats_ttl)),
            reports_cache: Arc::new(StatsCache::new(stats_ttl)),
        }
    }
}
