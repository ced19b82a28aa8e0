//! Appointment-booking backend for a dental clinic: six JSON endpoints over
//! one PostgreSQL table.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use migration::ensure_appointments_table;
pub use model::{Appointment, AppointmentStatus, NewAppointment};
pub use routes::{app, appointment_routes, common_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, AppointmentStore, MemoryStore, PgAppointmentStore};
