//! OpenAPI document for the appointment routes, served at `/openapi.json`.

use crate::model::{Appointment, AppointmentStatus, NewAppointment};
use crate::response::{CompletedBody, MessageBody};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Dental clinic appointments"),
    paths(
        crate::handlers::appointment::list_by_date,
        crate::handlers::appointment::get_appointment,
        crate::handlers::appointment::create_appointment,
        crate::handlers::appointment::complete_appointment,
        crate::handlers::appointment::delete_appointment,
        crate::handlers::appointment::patient_history,
    ),
    components(schemas(Appointment, AppointmentStatus, NewAppointment, CompletedBody, MessageBody)),
    tags((name = "appointments", description = "Appointment booking and history"))
)]
pub struct ApiDoc;
