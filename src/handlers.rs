use crate::errors::AppError;
use crate::models::{
    AnalyticsQuery, MonthlyReport, ScheduleResponse, Status, StatusKey, StatusRequest, StatusResponse,
    TodayView,
};
use crate::state::AppState;
use crate::stats::{MonthKey, available_months, build_monthly_report};
use crate::today::today_view;
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Query, State},
    response::{Html, Redirect},
};
use chrono::{Local, NaiveDate};
use tracing::debug;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.schedule, &today_string()))
}

pub async fn get_schedule(State(state): State<AppState>) -> Json<ScheduleResponse> {
    Json(state.schedule.to_response())
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayView>, AppError> {
    let view = today_view(&state.store, &state.schedule, today()).await?;
    Ok(Json(view))
}

pub async fn set_status(
    State(state): State<AppState>,
    Json(payload): Json<StatusRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let response = apply_status(&state, payload).await?;
    Ok(Json(response))
}

pub async fn set_status_form(
    State(state): State<AppState>,
    Form(payload): Form<StatusRequest>,
) -> Result<Redirect, AppError> {
    apply_status(&state, payload).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_months(State(state): State<AppState>) -> Json<Vec<String>> {
    let months = state
        .months_cache
        .get_with((), async {
            debug!("months cache miss");
            available_months(state.store.date_keys().await)
        })
        .await;
    Json(months)
}

pub async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<MonthlyReport>, AppError> {
    let month: MonthKey = query
        .month
        .parse()
        .map_err(|err: crate::stats::InvalidMonth| AppError::bad_request(err.to_string()))?;

    let report = state
        .reports_cache
        .get_with(month, async {
            debug!(%month, "analytics cache miss");
            let logs = state.store.logs_in_month(&month).await;
            build_monthly_report(month, &logs)
        })
        .await;
    Ok(Json(report))
}

async fn apply_status(state: &AppState, payload: StatusRequest) -> Result<StatusResponse, AppError> {
    let date = parse_date(&payload.date)?;
    let key = StatusKey {
        date,
        task: payload.task.trim().to_string(),
        person: payload.person,
    };

    let outcome = state.store.set_status(&key, payload.status).await?;
    let message = if outcome.matched {
        transition_message(&key, outcome.previous.unwrap_or_default(), payload.status)
    } else {
        format!("No task '{}' logged for {}, nothing changed.", key.task, key.date)
    };

    Ok(StatusResponse {
        matched: outcome.matched,
        date: key.date.to_string(),
        task: key.task,
        person: key.person,
        previous: outcome.previous,
        status: payload.status,
        message,
    })
}

fn transition_message(key: &StatusKey, previous: Status, next: Status) -> String {
    format!(
        "Set '{}' from '{}' to '{}' for {}!",
        key.task, previous, next, key.person
    )
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("date must be an ISO date (YYYY-MM-DD)"))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn today_string() -> String {
    today().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;

    #[test]
    fn transition_message_names_both_states() {
        let key = StatusKey {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            task: "DSA".into(),
            person: Person::Bbu,
        };
        assert_eq!(
            transition_message(&key, Status::Doing, Status::Done),
            "Set 'DSA' from 'Doing' to 'Done' for BBU!"
        );
    }

    #[test]
    fn parse_date_rejects_non_iso_values() {
        assert!(parse_date("2024-03-04").is_ok());
        assert!(parse_date("04/03/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }
}
