//! Appointment entity and the create payload.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Lifecycle marker. Cancellation is a delete, not a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown appointment status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for AppointmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Scheduled" => Ok(AppointmentStatus::Scheduled),
            "Completed" => Ok(AppointmentStatus::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// One row of the `appointments` table, serialized with its column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Appointment {
    pub appointment_id: String,
    pub service_id: Option<String>,
    pub appointment_date: NaiveDate,
    pub doctor_id: Option<String>,
    pub slot: i32,
    pub patient_name: Option<String>,
    pub patient_email: Option<String>,
    pub patient_mobile: Option<String>,
    pub status: AppointmentStatus,
}

/// POST /appointments body. The caller chooses the id; status is not accepted.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub id: String,
    #[serde(default, deserialize_with = "opaque_ref")]
    #[schema(value_type = Option<String>)]
    pub service_id: Option<String>,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "opaque_ref")]
    #[schema(value_type = Option<String>)]
    pub doctor_id: Option<String>,
    #[serde(deserialize_with = "slot_number")]
    #[schema(value_type = i32)]
    pub slot: i32,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub patient_email: Option<String>,
    #[serde(default)]
    pub patient_mobile: Option<String>,
}

impl NewAppointment {
    /// The row as it is stored: every new appointment starts out `Scheduled`.
    pub fn into_scheduled(self) -> Appointment {
        Appointment {
            appointment_id: self.id,
            service_id: self.service_id,
            appointment_date: self.date,
            doctor_id: self.doctor_id,
            slot: self.slot,
            patient_name: self.patient_name,
            patient_email: self.patient_email,
            patient_mobile: self.patient_mobile,
            status: AppointmentStatus::Scheduled,
        }
    }
}

/// Service and doctor references are opaque; clients send them as strings or numbers.
fn opaque_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}

/// Slots arrive as numbers or as numeric strings (form-style clients). Anything
/// that does not fit the integer column is rejected.
fn slot_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    let n = match Raw::deserialize(deserializer)? {
        Raw::Int(n) => n,
        Raw::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("slot '{}' is not an integer", s)))?,
    };
    i32::try_from(n).map_err(|_| serde::de::Error::custom(format!("slot {} out of range", n)))
}
