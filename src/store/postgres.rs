//! PostgreSQL-backed store. Every operation is one parameterized statement.

use super::AppointmentStore;
use crate::error::AppError;
use crate::model::{Appointment, AppointmentStatus, NewAppointment};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

const SELECT_BY_DATE: &str = "SELECT appointment_id, service_id, appointment_date, doctor_id, slot, \
     patient_name, patient_email, patient_mobile, status \
     FROM appointments WHERE appointment_date = $1 ORDER BY slot ASC";

const SELECT_BY_ID: &str = "SELECT appointment_id, service_id, appointment_date, doctor_id, slot, \
     patient_name, patient_email, patient_mobile, status \
     FROM appointments WHERE appointment_id = $1";

const INSERT: &str = "INSERT INTO appointments (appointment_id, service_id, appointment_date, doctor_id, slot, \
     patient_name, patient_email, patient_mobile, status) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
     RETURNING appointment_id, service_id, appointment_date, doctor_id, slot, \
     patient_name, patient_email, patient_mobile, status";

const COMPLETE: &str = "UPDATE appointments SET status = $2 WHERE appointment_id = $1 \
     RETURNING appointment_id, service_id, appointment_date, doctor_id, slot, \
     patient_name, patient_email, patient_mobile, status";

const DELETE: &str = "DELETE FROM appointments WHERE appointment_id = $1";

const SELECT_BY_MOBILE: &str = "SELECT appointment_id, service_id, appointment_date, doctor_id, slot, \
     patient_name, patient_email, patient_mobile, status \
     FROM appointments WHERE patient_mobile = $1 ORDER BY appointment_date DESC";

#[derive(Clone)]
pub struct PgAppointmentStore {
    pool: PgPool,
}

impl PgAppointmentStore {
    pub fn new(pool: PgPool) -> Self {
        PgAppointmentStore { pool }
    }
}

impl<'r> FromRow<'r, PgRow> for Appointment {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<AppointmentStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".into(),
                source: Box::new(e),
            })?;
        Ok(Appointment {
            appointment_id: row.try_get("appointment_id")?,
            service_id: row.try_get("service_id")?,
            appointment_date: row.try_get("appointment_date")?,
            doctor_id: row.try_get("doctor_id")?,
            slot: row.try_get("slot")?,
            patient_name: row.try_get("patient_name")?,
            patient_email: row.try_get("patient_email")?,
            patient_mobile: row.try_get("patient_mobile")?,
            status,
        })
    }
}

#[async_trait]
impl AppointmentStore for PgAppointmentStore {
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, AppError> {
        tracing::debug!(sql = %SELECT_BY_DATE, %date, "query");
        let rows = sqlx::query_as::<_, Appointment>(SELECT_BY_DATE)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: &str) -> Result<Option<Appointment>, AppError> {
        tracing::debug!(sql = %SELECT_BY_ID, id, "query");
        let row = sqlx::query_as::<_, Appointment>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, new: NewAppointment) -> Result<Appointment, AppError> {
        let row = new.into_scheduled();
        tracing::debug!(sql = %INSERT, params = ?row, "query");
        let created = sqlx::query_as::<_, Appointment>(INSERT)
            .bind(&row.appointment_id)
            .bind(&row.service_id)
            .bind(row.appointment_date)
            .bind(&row.doctor_id)
            .bind(row.slot)
            .bind(&row.patient_name)
            .bind(&row.patient_email)
            .bind(&row.patient_mobile)
            .bind(row.status.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn complete(&self, id: &str) -> Result<Option<Appointment>, AppError> {
        tracing::debug!(sql = %COMPLETE, id, "query");
        let row = sqlx::query_as::<_, Appointment>(COMPLETE)
            .bind(id)
            .bind(AppointmentStatus::Completed.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        tracing::debug!(sql = %DELETE, id, "query");
        let result = sqlx::query(DELETE).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn history_by_mobile(&self, mobile: &str) -> Result<Vec<Appointment>, AppError> {
        tracing::debug!(sql = %SELECT_BY_MOBILE, mobile, "query");
        let rows = sqlx::query_as::<_, Appointment>(SELECT_BY_MOBILE)
            .bind(mobile)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
