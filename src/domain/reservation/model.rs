//! Reservation domain entity

use chrono::{DateTime, Utc};

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Spot is held; no leaving time or cost yet
    Active,
    /// Closed with a computed cost
    Completed,
    /// Voided without billing
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            "completed" => Self::Completed,
            _ => Self::Cancelled,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Binding of a user to a spot for a time interval
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: i32,
    pub spot_id: i32,
    pub user_id: String,
    pub parking_timestamp: DateTime<Utc>,
    /// Set when the reservation completes
    pub leaving_timestamp: Option<DateTime<Utc>>,
    /// Set when the reservation completes
    pub parking_cost: Option<f64>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    /// Elapsed seconds from parking until `leaving`
    pub fn duration_until(&self, leaving: DateTime<Utc>) -> i64 {
        (leaving - self.parking_timestamp).num_seconds()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_reservation() -> Reservation {
        Reservation {
            id: 1,
            spot_id: 7,
            user_id: "u-1".into(),
            parking_timestamp: Utc::now(),
            leaving_timestamp: None,
            parking_cost: None,
            status: ReservationStatus::Active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn new_reservation_is_active() {
        let r = sample_reservation();
        assert!(r.is_active());
        assert!(r.leaving_timestamp.is_none());
        assert!(r.parking_cost.is_none());
    }

    #[test]
    fn completed_reservation_is_not_active() {
        let mut r = sample_reservation();
        r.status = ReservationStatus::Completed;
        assert!(!r.is_active());
    }

    #[test]
    fn duration_until_counts_seconds() {
        let r = sample_reservation();
        let leaving = r.parking_timestamp + Duration::minutes(150);
        assert_eq!(r.duration_until(leaving), 9000);
    }

    #[test]
    fn status_display_roundtrip() {
        for status in &[
            ReservationStatus::Active,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
        ] {
            let parsed = ReservationStatus::from_str(status.as_str());
            assert_eq!(&parsed, status);
        }
    }

    #[test]
    fn unknown_status_defaults_to_cancelled() {
        assert_eq!(
            ReservationStatus::from_str("paused"),
            ReservationStatus::Cancelled
        );
    }
}
