//! Appointment routes.
//! `/appointments/:key` serves both list-by-date (GET, key is a date) and delete
//! (DELETE, key is an id); the router needs one parameter name per position.
//! The static `history` segment wins over `:key`, so PUT on the history route
//! completes the appointment whose id is `history`.

use crate::handlers::appointment::{
    complete_appointment, complete_history_appointment, create_appointment, delete_appointment,
    get_appointment, list_by_date, patient_history,
};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn appointment_routes(state: AppState) -> Router {
    Router::new()
        .route("/appointments", post(create_appointment))
        .route(
            "/appointments/:key",
            get(list_by_date).delete(delete_appointment),
        )
        .route("/appointments/:key/complete", put(complete_appointment))
        .route(
            "/appointments/history/:mobile",
            get(patient_history).put(complete_history_appointment),
        )
        .route("/appointment/:id", get(get_appointment))
        .with_state(state)
}
