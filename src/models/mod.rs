pub mod appointment;
pub mod client;
pub mod employee;
pub mod enums;
pub mod sale;
pub mod service;

pub use appointment::{Appointment, HistoricalAppointment};

/// Deserializer for times that accepts both `HH:MM` and `HH:MM:SS`
/// (booking forms send the former, chrono's default expects the latter).
pub mod timefmt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
pub use client::Client;
pub use employee::Employee;
pub use sale::Sale;
pub use service::Service;
