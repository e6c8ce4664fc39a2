use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::models::{
    AdjustCountRequest, AvailableTimesQuery, CopySettingsRequest, DateKey, DayOffRequest,
    ServiceTimeRequest, SetCountRequest, WeekAnchor,
};
use crate::services::{calendar, propagation, summary};
use crate::state::ScheduleState;

fn parse_key(raw: &str) -> Result<DateKey, AppError> {
    raw.parse::<DateKey>().map_err(AppError::from)
}

// ==============================================================================
// GRID READS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_time_labels(
    State(state): State<Arc<ScheduleState>>,
) -> Result<Json<Value>, AppError> {
    let store = state.store.read().await;
    let labels: Vec<&str> = store.time_labels().iter().collect();

    Ok(Json(json!({
        "time_labels": labels,
        "total": labels.len()
    })))
}

#[axum::debug_handler]
pub async fn get_week(
    State(state): State<Arc<ScheduleState>>,
    Path(date): Path<String>,
) -> Result<Json<Value>, AppError> {
    let anchor = WeekAnchor::containing(calendar::parse_date(&date)?)?;
    let store = state.store.read().await;
    let view = summary::week_view(&store, anchor)?;

    Ok(Json(json!(view)))
}

#[axum::debug_handler]
pub async fn get_month(
    State(state): State<Arc<ScheduleState>>,
    Path(date): Path<String>,
) -> Result<Json<Value>, AppError> {
    let date = calendar::parse_date(&date)?;
    let store = state.store.read().await;
    let view = summary::month_view(&store, date)?;

    Ok(Json(json!(view)))
}

#[axum::debug_handler]
pub async fn get_day(
    State(state): State<Arc<ScheduleState>>,
    Path(date): Path<String>,
) -> Result<Json<Value>, AppError> {
    let key = parse_key(&date)?;
    let store = state.store.read().await;

    Ok(Json(json!({
        "summary": summary::day_summary(&store, key.date(), true),
        "slots": store.slot_counts(key),
        "edit_allowed": store.is_edit_allowed(key)
    })))
}

#[axum::debug_handler]
pub async fn get_day_availability(
    State(state): State<Arc<ScheduleState>>,
    Path(date): Path<String>,
) -> Result<Json<Value>, AppError> {
    let key = parse_key(&date)?;
    let store = state.store.read().await;

    Ok(Json(json!({
        "date": key,
        "available_slots": store.available_times(key),
        "total_slots": store.available_total(key)
    })))
}

// ==============================================================================
// SLOT EDITS
// ==============================================================================

#[axum::debug_handler]
pub async fn set_slot_count(
    State(state): State<Arc<ScheduleState>>,
    Path(date): Path<String>,
    Json(request): Json<SetCountRequest>,
) -> Result<Json<Value>, AppError> {
    let key = parse_key(&date)?;
    let mut store = state.store.write().await;
    let count = store.set_count(key, &request.time, request.count)?;

    Ok(Json(json!({
        "date": key,
        "time": request.time,
        "count": count,
        "day_total": store.day_total(key)
    })))
}

#[axum::debug_handler]
pub async fn adjust_slot_count(
    State(state): State<Arc<ScheduleState>>,
    Path(date): Path<String>,
    Json(request): Json<AdjustCountRequest>,
) -> Result<Json<Value>, AppError> {
    let key = parse_key(&date)?;
    let mut store = state.store.write().await;
    let count = store.adjust_count(key, &request.time, request.delta)?;

    Ok(Json(json!({
        "date": key,
        "time": request.time,
        "count": count,
        "day_total": store.day_total(key)
    })))
}

#[axum::debug_handler]
pub async fn toggle_day_off(
    State(state): State<Arc<ScheduleState>>,
    Path(date): Path<String>,
) -> Result<Json<Value>, AppError> {
    let key = parse_key(&date)?;
    let mut store = state.store.write().await;
    let day_off = store.toggle_day_off(key);

    Ok(Json(json!({
        "date": key,
        "day_off": day_off
    })))
}

#[axum::debug_handler]
pub async fn set_day_off(
    State(state): State<Arc<ScheduleState>>,
    Path(date): Path<String>,
    Json(request): Json<DayOffRequest>,
) -> Result<Json<Value>, AppError> {
    let key = parse_key(&date)?;
    let mut store = state.store.write().await;
    store.set_day_off(key, request.day_off);

    Ok(Json(json!({
        "date": key,
        "day_off": request.day_off
    })))
}

#[axum::debug_handler]
pub async fn set_service_time(
    State(state): State<Arc<ScheduleState>>,
    Path(date): Path<String>,
    Json(request): Json<ServiceTimeRequest>,
) -> Result<Json<Value>, AppError> {
    let key = parse_key(&date)?;
    let label = request.label.filter(|l| !l.trim().is_empty());
    let mut store = state.store.write().await;
    store.set_service_time(key, label.clone());

    Ok(Json(json!({
        "date": key,
        "service_time": label
    })))
}

#[axum::debug_handler]
pub async fn copy_day_settings(
    State(state): State<Arc<ScheduleState>>,
    Path(date): Path<String>,
    Json(request): Json<CopySettingsRequest>,
) -> Result<Json<Value>, AppError> {
    let source = parse_key(&date)?;

    let mut targets: BTreeSet<DateKey> = request.targets.into_iter().collect();
    if !request.weekdays.is_empty() {
        let anchor = WeekAnchor::containing(source.date())?;
        targets.extend(propagation::week_targets(anchor, &request.weekdays)?);
    }
    if request.whole_month {
        targets.extend(propagation::month_targets(source)?);
    }
    targets.remove(&source);
    debug!("Copying {} onto {} candidate dates", source, targets.len());

    let mut store = state.store.write().await;
    let copied = propagation::copy_settings(&mut store, source, &targets);

    Ok(Json(json!({
        "source": source,
        "targets": targets,
        "copied": copied
    })))
}

// ==============================================================================
// PROVIDERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_providers(
    State(state): State<Arc<ScheduleState>>,
) -> Result<Json<Value>, AppError> {
    let providers: Vec<Value> = state
        .providers
        .list()
        .map(|p| {
            json!({
                "id": p.id,
                "name": p.name,
                "specialty": p.specialty,
                "declared_dates": p.available_slots.len()
            })
        })
        .collect();

    Ok(Json(json!({
        "providers": providers,
        "total": providers.len()
    })))
}

#[axum::debug_handler]
pub async fn get_provider_available_times(
    State(state): State<Arc<ScheduleState>>,
    Path(provider_id): Path<String>,
    Query(query): Query<AvailableTimesQuery>,
) -> Result<Json<Value>, AppError> {
    let key = parse_key(&query.date)?;
    let times = state.providers.available_times(&provider_id, key)?;

    Ok(Json(json!({
        "provider_id": provider_id,
        "date": key,
        "available_times": times,
        "total": times.len()
    })))
}
