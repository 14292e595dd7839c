use crate::types::{parse_date, AppointmentTime, Slot};
use chrono::NaiveDate;
use clap::Subcommand;
use reqwest::Url;
use std::time::Duration;

pub trait Configuration {
    fn store_url(&self) -> Url;
    fn request_timeout(&self) -> Duration;
    fn command(&self) -> &Command;
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the available slots and appointments of a day
    Day {
        /// Day to show, defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Book an hour slot
    Book {
        /// Day of the appointment, defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Hour slot such as "9:00"
        #[arg(long)]
        slot: Slot,
        /// Name of the person booking
        #[arg(long)]
        name: String,
    },
    /// Cancel an appointment
    Cancel {
        /// Appointment time such as "2024-01-01 9:00"
        #[arg(long)]
        time: AppointmentTime,
    },
    /// Run an in-memory appointment store
    Serve {
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
}
