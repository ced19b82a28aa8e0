//! Appointment storage: the trait the handlers talk to, plus database bootstrap.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgAppointmentStore;

use crate::error::AppError;
use crate::model::{Appointment, NewAppointment};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;

/// One method per HTTP operation. Each is a single statement against the
/// backing store; there is no cross-call coordination.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Appointments on `date`, ordered by slot ascending. Empty when none.
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, AppError>;

    async fn get(&self, id: &str) -> Result<Option<Appointment>, AppError>;

    /// Insert with status forced to `Scheduled`. A duplicate id is a storage failure.
    async fn create(&self, new: NewAppointment) -> Result<Appointment, AppError>;

    /// Set status to `Completed`. Returns `None` when the id does not exist;
    /// completing twice simply returns the completed row again.
    async fn complete(&self, id: &str) -> Result<Option<Appointment>, AppError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    /// Appointments for a patient mobile number, newest date first.
    async fn history_by_mobile(&self, mobile: &str) -> Result<Vec<Appointment>, AppError>;

    /// Readiness check.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Create the target database if it does not exist, connecting through the
/// `postgres` maintenance database. No-op when the target is `postgres` itself.
pub async fn ensure_database_exists(options: &PgConnectOptions) -> Result<(), AppError> {
    let db_name = match options.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(()),
    };
    let mut conn = options.clone().database("postgres").connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
