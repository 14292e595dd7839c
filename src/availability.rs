//! Derivation of the bookable slots of a day from the appointment list.
//!
//! The available slots are always a pure function of the appointments and the
//! selected date. The patch helpers keep a slot list sorted so that patching
//! yields exactly what a full recompute would.

use crate::types::{Appointment, Slot};
use chrono::NaiveDate;

/// Slots of `date` that no appointment occupies, ascending by hour.
pub fn available_slots(appointments: &[Appointment], date: NaiveDate) -> Vec<Slot> {
    Slot::all()
        .filter(|slot| {
            !appointments
                .iter()
                .any(|appointment| appointment.time.date == date && appointment.time.slot == *slot)
        })
        .collect()
}

pub fn consume_slot(slots: &mut Vec<Slot>, slot: Slot) {
    if let Ok(index) = slots.binary_search(&slot) {
        slots.remove(index);
    }
}

pub fn release_slot(slots: &mut Vec<Slot>, slot: Slot) {
    if let Err(index) = slots.binary_search(&slot) {
        slots.insert(index, slot);
    }
}
