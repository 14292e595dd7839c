use crate::types::{AppointmentTime, Slot};
use thiserror::Error;

/// Failure of a call against an appointment store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Appointment store unreachable: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid appointment store URL {0}")]
    InvalidUrl(String),
    #[error("Appointment store answered with status {0}")]
    Status(u16),
    #[error("An appointment at {0} already exists")]
    Conflict(AppointmentTime),
    #[error("No appointment at {0}")]
    NotFound(AppointmentTime),
}

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("No time slot selected")]
    NoSlotSelected,
    #[error("A name is required to book an appointment")]
    MissingName,
    #[error("Slot {0} is not available")]
    SlotUnavailable(Slot),
    #[error("Slot {0} is already booked")]
    SlotTaken(AppointmentTime),
    #[error("There is no appointment at {0}")]
    UnknownAppointment(AppointmentTime),
}
