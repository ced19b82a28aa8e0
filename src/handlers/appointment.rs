//! Appointment handlers: list by date, get, create, complete, delete, history.

use crate::error::AppError;
use crate::model::{Appointment, NewAppointment};
use crate::response::{self, CompletedBody, MessageBody};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Malformed(format!("invalid date '{}', expected YYYY-MM-DD", raw)))
}

/// GET /appointments/:date
#[utoipa::path(
    get,
    path = "/appointments/{date}",
    tag = "appointments",
    params(("date" = String, Path, description = "Calendar date, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Appointments on the date, slot ascending", body = Vec<Appointment>),
        (status = 500, description = "Server Error, including a malformed date")
    )
)]
pub async fn list_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let date = parse_date(&date)?;
    let rows = state.store.list_by_date(date).await?;
    Ok(Json(rows))
}

/// GET /appointment/:id
#[utoipa::path(
    get,
    path = "/appointment/{id}",
    tag = "appointments",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "The appointment", body = Appointment),
        (status = 404, description = "Appointment not found", body = MessageBody),
        (status = 500, description = "Server Error")
    )
)]
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let row = state.store.get(&id).await?;
    let row = row.ok_or(AppError::NotFound(id))?;
    Ok(Json(row))
}

/// POST /appointments
#[utoipa::path(
    post,
    path = "/appointments",
    tag = "appointments",
    request_body = NewAppointment,
    responses(
        (status = 201, description = "Created, status Scheduled", body = Appointment),
        (status = 500, description = "Server Error, e.g. duplicate id or undecodable body")
    )
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    payload: Result<Json<NewAppointment>, JsonRejection>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let Json(new) = payload.map_err(|e| AppError::Malformed(e.body_text()))?;
    let row = state.store.create(new).await?;
    tracing::info!(
        appointment_id = %row.appointment_id,
        date = %row.appointment_date,
        slot = row.slot,
        "appointment scheduled"
    );
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /appointments/:id/complete
#[utoipa::path(
    put,
    path = "/appointments/{id}/complete",
    tag = "appointments",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Status set to Completed", body = CompletedBody),
        (status = 404, description = "Appointment not found", body = MessageBody),
        (status = 500, description = "Server Error")
    )
)]
pub async fn complete_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CompletedBody>, AppError> {
    let row = state.store.complete(&id).await?;
    let row = row.ok_or(AppError::NotFound(id))?;
    tracing::info!(appointment_id = %row.appointment_id, "appointment completed");
    Ok(Json(response::completed(row)))
}

/// PUT /appointments/history/:tail
///
/// The history route shadows `PUT /appointments/history/complete`, so an
/// appointment whose id is `history` is completed from here.
pub async fn complete_history_appointment(
    state: State<AppState>,
    Path(tail): Path<String>,
) -> Result<Response, AppError> {
    if tail != "complete" {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }
    let body = complete_appointment(state, Path("history".to_string())).await?;
    Ok(body.into_response())
}

/// DELETE /appointments/:id
#[utoipa::path(
    delete,
    path = "/appointments/{id}",
    tag = "appointments",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Deleted", body = MessageBody),
        (status = 404, description = "Appointment not found", body = MessageBody),
        (status = 500, description = "Server Error")
    )
)]
pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    if !state.store.delete(&id).await? {
        return Err(AppError::NotFound(id));
    }
    tracing::info!(appointment_id = %id, "appointment deleted");
    Ok(Json(response::deleted()))
}

/// GET /appointments/history/:mobile
#[utoipa::path(
    get,
    path = "/appointments/history/{mobile}",
    tag = "appointments",
    params(("mobile" = String, Path, description = "Patient mobile number")),
    responses(
        (status = 200, description = "Appointments for the number, newest date first", body = Vec<Appointment>),
        (status = 500, description = "Server Error")
    )
)]
pub async fn patient_history(
    State(state): State<AppState>,
    Path(mobile): Path<String>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let rows = state.store.history_by_mobile(&mobile).await?;
    Ok(Json(rows))
}
