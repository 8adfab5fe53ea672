use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::HistoryStatus;

/// An active (booked, not yet performed) appointment. The end time is
/// derived from the service's duration, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
}

/// Terminal record created when an appointment is finalized. The source
/// appointment row is deleted at that point — finalization is a move,
/// not a copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalAppointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub status: HistoryStatus,
}
