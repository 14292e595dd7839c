use crate::{
    availability::{available_slots, consume_slot, release_slot},
    backend::AppointmentBackend,
    error::SchedulerError,
    types::{Appointment, AppointmentTime, Slot},
};
use chrono::NaiveDate;
use tokio::sync::watch::{self, Sender};
use tokio_stream::wrappers::WatchStream;
use tracing::{error, info, warn};

/// Client-side state of the appointment calendar.
///
/// Owns the appointment list as last seen from the store, the selected date,
/// the slots still bookable on that date and the booking form. The available
/// slots always equal [`crate::availability::available_slots`] of the current
/// appointments and date: changing the date recomputes them, booking and
/// cancelling patch them.
pub struct Scheduler<B: AppointmentBackend> {
    backend: B,
    appointments: Vec<Appointment>,
    selected_date: NaiveDate,
    available_slots: Vec<Slot>,
    selected_time: Option<Slot>,
    user_name: String,
    last_error: Option<String>,
    sender: Sender<Vec<Slot>>,
}

impl<B: AppointmentBackend> Scheduler<B> {
    pub fn new(backend: B, selected_date: NaiveDate) -> Self {
        let available_slots = available_slots(&[], selected_date);
        let (sender, _) = watch::channel(available_slots.clone());
        Self {
            backend,
            appointments: Vec::new(),
            selected_date,
            available_slots,
            selected_time: None,
            user_name: String::new(),
            last_error: None,
            sender,
        }
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn available_slots(&self) -> &[Slot] {
        &self.available_slots
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<Slot> {
        self.selected_time
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Message of the last failed store operation, until one succeeds again.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Appointments on the selected date, ordered by slot.
    pub fn day_appointments(&self) -> Vec<&Appointment> {
        let mut day: Vec<&Appointment> = self
            .appointments
            .iter()
            .filter(|appointment| appointment.time.date == self.selected_date)
            .collect();
        day.sort_by_key(|appointment| appointment.time.slot);
        day
    }

    /// Yields the available slots now and after every change.
    pub fn slot_stream(&self) -> WatchStream<Vec<Slot>> {
        WatchStream::new(self.sender.subscribe())
    }

    pub async fn load(&mut self) -> Result<(), SchedulerError> {
        match self.backend.list_all().await {
            Ok(appointments) => {
                info!(count = appointments.len(), "Loaded appointments");
                self.appointments = appointments;
                self.last_error = None;
                self.recompute();
                Ok(())
            }
            Err(err) => {
                error!(%err, "Error fetching appointments");
                self.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.recompute();
        if self
            .selected_time
            .is_some_and(|slot| !self.is_available(slot))
        {
            self.selected_time = None;
        }
    }

    pub fn select_time(&mut self, slot: Slot) -> Result<(), SchedulerError> {
        if !self.is_available(slot) {
            return Err(SchedulerError::SlotUnavailable(slot));
        }
        self.selected_time = Some(slot);
        Ok(())
    }

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        self.user_name = name.into();
    }

    pub fn can_book(&self) -> bool {
        self.selected_time.is_some() && !self.user_name.trim().is_empty()
    }

    /// Books the selected slot on the selected date for the entered name and
    /// clears the form on success. A failed booking keeps the form for a retry.
    pub async fn book(&mut self) -> Result<Appointment, SchedulerError> {
        let slot = self.selected_time.ok_or(SchedulerError::NoSlotSelected)?;
        if self.user_name.trim().is_empty() {
            return Err(SchedulerError::MissingName);
        }

        let time = AppointmentTime::new(self.selected_date, slot);
        let appointment = self.book_at(time, self.user_name.clone()).await?;
        self.selected_time = None;
        self.user_name.clear();
        Ok(appointment)
    }

    /// Books `time` for `name`.
    ///
    /// The appointment and the freed slot are applied locally before the store
    /// confirms and are rolled back if the store rejects the booking.
    pub async fn book_at(
        &mut self,
        time: AppointmentTime,
        name: String,
    ) -> Result<Appointment, SchedulerError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(SchedulerError::MissingName);
        }
        if self.appointments.iter().any(|appointment| appointment.time == time) {
            return Err(SchedulerError::SlotTaken(time));
        }

        self.appointments.push(Appointment {
            time,
            name: name.clone(),
        });
        if time.date == self.selected_date {
            consume_slot(&mut self.available_slots, time.slot);
            self.publish();
        }

        match self.backend.create(time, name).await {
            Ok(confirmed) => {
                info!(%time, "Appointment scheduled");
                self.confirm_booking(time, confirmed.clone());
                self.last_error = None;
                Ok(confirmed)
            }
            Err(err) => {
                error!(%err, %time, "Error scheduling appointment");
                self.appointments.retain(|appointment| appointment.time != time);
                if time.date == self.selected_date {
                    release_slot(&mut self.available_slots, time.slot);
                    self.publish();
                }
                self.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Cancels the appointment at `time`. Local state changes only once the
    /// store confirmed the removal.
    pub async fn cancel(&mut self, time: AppointmentTime) -> Result<(), SchedulerError> {
        if !self.appointments.iter().any(|appointment| appointment.time == time) {
            return Err(SchedulerError::UnknownAppointment(time));
        }

        if let Err(err) = self.backend.remove(time).await {
            error!(%err, %time, "Error cancelling appointment");
            self.last_error = Some(err.to_string());
            return Err(err.into());
        }

        info!(%time, "Appointment cancelled");
        self.appointments.retain(|appointment| appointment.time != time);
        if time.date == self.selected_date {
            release_slot(&mut self.available_slots, time.slot);
            self.publish();
        }
        self.last_error = None;
        Ok(())
    }

    fn is_available(&self, slot: Slot) -> bool {
        self.available_slots.binary_search(&slot).is_ok()
    }

    /// Replaces the optimistic entry with the record echoed by the store.
    fn confirm_booking(&mut self, requested: AppointmentTime, confirmed: Appointment) {
        let normalized = confirmed.time != requested;
        if let Some(entry) = self
            .appointments
            .iter_mut()
            .find(|appointment| appointment.time == requested)
        {
            *entry = confirmed;
        }
        if normalized {
            warn!(%requested, "Store normalized the appointment time");
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        self.available_slots = available_slots(&self.appointments, self.selected_date);
        self.publish();
    }

    fn publish(&self) {
        self.sender.send_replace(self.available_slots.clone());
    }
}
