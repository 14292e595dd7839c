use crate::{
    error::StoreError,
    types::{Appointment, AppointmentTime},
};
use async_trait::async_trait;

/// Persistence behind the scheduler. Appointments are keyed by their time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentBackend: Send + Sync + 'static {
    async fn list_all(&self) -> Result<Vec<Appointment>, StoreError>;
    /// Returns the stored record, which is the canonical form of the new entry.
    async fn create(&self, time: AppointmentTime, name: String)
        -> Result<Appointment, StoreError>;
    async fn remove(&self, time: AppointmentTime) -> Result<(), StoreError>;
}
