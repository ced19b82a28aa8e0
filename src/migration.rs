//! Idempotent bootstrap DDL for the `appointments` table and its lookup indexes.

use crate::error::AppError;
use sqlx::PgPool;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS appointments (
        appointment_id TEXT PRIMARY KEY,
        service_id TEXT,
        appointment_date DATE NOT NULL,
        doctor_id TEXT,
        slot INTEGER NOT NULL,
        patient_name TEXT,
        patient_email TEXT,
        patient_mobile TEXT,
        status TEXT NOT NULL DEFAULT 'Scheduled',
        CONSTRAINT appointments_status_check CHECK (status IN ('Scheduled', 'Completed'))
    )
"#;

/// Backs list-by-date (ordered by slot) and history-by-mobile (ordered by date).
const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS appointments_date_slot_idx ON appointments (appointment_date, slot)",
    "CREATE INDEX IF NOT EXISTS appointments_mobile_date_idx ON appointments (patient_mobile, appointment_date DESC)",
];

/// Create the table and indexes if missing. Safe to run on every startup;
/// an existing table is left as is.
pub async fn ensure_appointments_table(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(CREATE_TABLE).execute(pool).await?;
    for ddl in INDEXES {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!("appointments table ready");
    Ok(())
}
