//! In-process store with the same ordering and not-found semantics as the
//! PostgreSQL store. Used by the router tests and for running without a database.

use super::AppointmentStore;
use crate::error::AppError;
use crate::model::{Appointment, AppointmentStatus, NewAppointment};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone, Default)]
pub struct MemoryStore {
    rows: Arc<RwLock<BTreeMap<String, Appointment>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Appointment>>, AppError> {
        self.rows
            .read()
            .map_err(|_| AppError::Internal("appointment store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Appointment>>, AppError> {
        self.rows
            .write()
            .map_err(|_| AppError::Internal("appointment store lock poisoned".into()))
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, AppError> {
        let mut rows: Vec<Appointment> = self
            .read()?
            .values()
            .filter(|a| a.appointment_date == date)
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.slot);
        Ok(rows)
    }

    async fn get(&self, id: &str) -> Result<Option<Appointment>, AppError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn create(&self, new: NewAppointment) -> Result<Appointment, AppError> {
        let row = new.into_scheduled();
        let mut rows = self.write()?;
        if rows.contains_key(&row.appointment_id) {
            return Err(AppError::Internal(format!(
                "duplicate appointment_id '{}'",
                row.appointment_id
            )));
        }
        rows.insert(row.appointment_id.clone(), row.clone());
        Ok(row)
    }

    async fn complete(&self, id: &str) -> Result<Option<Appointment>, AppError> {
        let mut rows = self.write()?;
        Ok(rows.get_mut(id).map(|a| {
            a.status = AppointmentStatus::Completed;
            a.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.write()?.remove(id).is_some())
    }

    async fn history_by_mobile(&self, mobile: &str) -> Result<Vec<Appointment>, AppError> {
        let mut rows: Vec<Appointment> = self
            .read()?
            .values()
            .filter(|a| a.patient_mobile.as_deref() == Some(mobile))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.appointment_date.cmp(&a.appointment_date));
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
