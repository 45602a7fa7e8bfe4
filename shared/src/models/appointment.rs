//! Appointment models
//!
//! 预约聚合：预约记录 + 预约条目 + 状态生命周期。
//! Status lifecycle: `scheduled → {completed, cancelled, no_show}` (terminal).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Appointment status
///
/// `Scheduled` is the only non-terminal state. An appointment moves to
/// exactly one terminal state and never leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Canonical string form (matches DB storage and serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    /// Whether this status is terminal
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Scheduled)
    }

    /// Whether the transition `self → next` is allowed
    ///
    /// Only `scheduled` may move, and only to a terminal state.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        matches!(self, Self::Scheduled) && next.is_terminal()
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognized status string
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown appointment status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for AppointmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no_show" => Ok(Self::NoShow),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Appointment entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Appointment {
    pub id: i64,
    /// Calendar date, `YYYY-MM-DD`
    pub appointment_date: String,
    /// Slot start, `HH:MM`
    pub start_time: String,
    /// Stored as text; parse via [`AppointmentStatus`]
    pub status: String,
    pub client_id: i64,
    /// Derived: sum of item quantities
    pub total_items: i64,
    pub cancellation_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Appointment row joined with minimal client info (admin list view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AppointmentWithClient {
    pub id: i64,
    pub appointment_date: String,
    pub start_time: String,
    pub status: String,
    pub client_id: i64,
    pub client_name: String,
    pub client_phone: String,
    pub total_items: i64,
    pub cancellation_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Appointment item joined with its subcategory (detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AppointmentItemDetail {
    pub subcategory_id: i64,
    pub subcategory_name: String,
    pub is_clothing: bool,
    pub quantity: i64,
    pub is_excellent_quality: bool,
}

/// Full appointment projection: record + client + items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDetail {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub client: super::client::Client,
    pub items: Vec<AppointmentItemDetail>,
}

/// One cart line in a booking submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentItemInput {
    pub subcategory_id: i64,
    pub quantity: i64,
    pub is_excellent_quality: bool,
}

/// Booking submission payload (client-facing wizard)
///
/// Either `client_id` references an existing client, or
/// `client_name`/`client_phone` (+ optional `client_email`) describe a new
/// one created inline at booking time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub client_id: Option<i64>,
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub appointment_date: String,
    pub start_time: String,
    pub items: Vec<AppointmentItemInput>,
}

/// Cancel payload (admin moderation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCancel {
    pub reason: String,
}

/// Status update payload (admin moderation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentStatusUpdate {
    pub status: AppointmentStatus,
}

/// Aggregate counters for the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentStats {
    pub today: i64,
    pub this_week: i64,
    pub scheduled: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub no_show: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_may_reach_every_terminal_state() {
        let s = AppointmentStatus::Scheduled;
        assert!(s.can_transition_to(AppointmentStatus::Completed));
        assert!(s.can_transition_to(AppointmentStatus::Cancelled));
        assert!(s.can_transition_to(AppointmentStatus::NoShow));
        assert!(!s.can_transition_to(AppointmentStatus::Scheduled));
    }

    #[test]
    fn terminal_states_never_transition() {
        for s in [
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NoShow,
        ] {
            assert!(s.is_terminal());
            assert!(!s.can_transition_to(AppointmentStatus::Scheduled));
            assert!(!s.can_transition_to(AppointmentStatus::Cancelled));
        }
    }

    #[test]
    fn status_string_roundtrip() {
        for s in [
            AppointmentStatus::Scheduled,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NoShow,
        ] {
            assert_eq!(s.as_str().parse::<AppointmentStatus>().unwrap(), s);
        }
        assert!("paused".parse::<AppointmentStatus>().is_err());
    }
}
