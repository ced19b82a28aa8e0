//! Response bodies shared by the appointment handlers.

use crate::model::Appointment;
use serde::Serialize;
use utoipa::ToSchema;

/// `{ "msg": "..." }`, used for confirmations and 404s.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    pub msg: String,
}

impl MessageBody {
    pub fn new(msg: impl Into<String>) -> Self {
        MessageBody { msg: msg.into() }
    }
}

/// Returned by the complete operation.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompletedBody {
    pub msg: String,
    pub appointment: Appointment,
}

pub const UPDATED_MSG: &str = "Appointment updated successfully";
pub const DELETED_MSG: &str = "Appointment deleted successfully";

pub fn completed(appointment: Appointment) -> CompletedBody {
    CompletedBody {
        msg: UPDATED_MSG.to_string(),
        appointment,
    }
}

pub fn deleted() -> MessageBody {
    MessageBody::new(DELETED_MSG)
}
