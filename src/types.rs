use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
pub const SLOTS_PER_DAY: u8 = 24;

/// One bookable hour of a day, rendered as `"H:00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u8);

impl Slot {
    pub fn new(hour: u8) -> Option<Slot> {
        (hour < SLOTS_PER_DAY).then_some(Slot(hour))
    }

    pub fn hour(&self) -> u8 {
        self.0
    }

    /// Every slot of a day in ascending order.
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..SLOTS_PER_DAY).map(Slot)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:00", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTimeError {
    #[error("expected \"YYYY-MM-DD H:00\", got {0:?}")]
    MissingSeparator(String),
    #[error("invalid date {0:?}")]
    InvalidDate(String),
    #[error("invalid slot {0:?}, expected an hour between 0:00 and 23:00")]
    InvalidSlot(String),
}

impl FromStr for Slot {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseTimeError::InvalidSlot(s.to_string());
        let hour = s.strip_suffix(":00").ok_or_else(invalid)?;

        // Hours are not zero padded, so "05:00" is a different key than "5:00".
        let canonical = !hour.is_empty()
            && hour.chars().all(|c| c.is_ascii_digit())
            && (hour == "0" || !hour.starts_with('0'));
        if !canonical {
            return Err(invalid());
        }

        hour.parse::<u8>()
            .ok()
            .and_then(Slot::new)
            .ok_or_else(invalid)
    }
}

/// Parses a zero padded `"YYYY-MM-DD"` date. Unpadded or signed forms are
/// rejected so that every date has exactly one string form.
pub fn parse_date(s: &str) -> Result<NaiveDate, ParseTimeError> {
    let invalid = || ParseTimeError::InvalidDate(s.into());
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| invalid())?;
    if date.format(DATE_FORMAT).to_string() != s {
        return Err(invalid());
    }
    Ok(date)
}

/// Composite key of an appointment: the date and the booked hour.
///
/// The store only ever sees the string form `"YYYY-MM-DD H:00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AppointmentTime {
    pub date: NaiveDate,
    pub slot: Slot,
}

impl AppointmentTime {
    pub fn new(date: NaiveDate, slot: Slot) -> Self {
        Self { date, slot }
    }
}

impl fmt::Display for AppointmentTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format(DATE_FORMAT), self.slot)
    }
}

impl FromStr for AppointmentTime {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (date, slot) = s
            .split_once(' ')
            .ok_or_else(|| ParseTimeError::MissingSeparator(s.into()))?;
        Ok(Self {
            date: parse_date(date)?,
            slot: slot.parse()?,
        })
    }
}

impl Serialize for AppointmentTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AppointmentTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let time = String::deserialize(deserializer)?;
        time.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub time: AppointmentTime,
    pub name: String,
}
