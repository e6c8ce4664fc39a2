use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::ScheduleState;

pub fn schedule_routes(state: Arc<ScheduleState>) -> Router {
    // Clinic slot grid
    let grid_routes = Router::new()
        .route("/time-labels", get(handlers::get_time_labels))
        .route("/weeks/{date}", get(handlers::get_week))
        .route("/months/{date}", get(handlers::get_month))
        .route("/days/{date}", get(handlers::get_day))
        .route("/days/{date}/available", get(handlers::get_day_availability))
        .route("/days/{date}/slots", put(handlers::set_slot_count))
        .route("/days/{date}/slots/adjust", post(handlers::adjust_slot_count))
        .route("/days/{date}/day-off", put(handlers::set_day_off))
        .route("/days/{date}/day-off/toggle", post(handlers::toggle_day_off))
        .route("/days/{date}/service-time", put(handlers::set_service_time))
        .route("/days/{date}/copy", post(handlers::copy_day_settings));

    // Booking form lookups
    let provider_routes = Router::new()
        .route("/providers", get(handlers::list_providers))
        .route("/providers/{provider_id}/available-times", get(handlers::get_provider_available_times));

    Router::new()
        .merge(grid_routes)
        .merge(provider_routes)
        .with_state(state)
}
