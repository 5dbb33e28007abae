//! Parking lot domain entity

use chrono::{DateTime, Utc};

/// Parking facility with a fixed spot capacity and an hourly price
#[derive(Debug, Clone)]
pub struct ParkingLot {
    pub id: i32,
    /// Display name of the location
    pub prime_location_name: String,
    /// Price per started hour
    pub price_per_hour: f64,
    pub address: String,
    pub pin_code: String,
    /// Spot capacity fixed at creation
    pub number_of_spots: i32,
    pub created_at: DateTime<Utc>,
}

impl ParkingLot {
    /// Parking fee for a stay of `duration_seconds`.
    ///
    /// Every started hour is billed in full and a stay never bills
    /// below one hour. The result is rounded to two decimal places.
    pub fn cost_for(&self, duration_seconds: i64) -> f64 {
        let hours = billable_hours(duration_seconds);
        round_to_cents(hours as f64 * self.price_per_hour)
    }
}

/// Number of billable hours for a stay of `duration_seconds`.
///
/// Minimum is one hour; any fraction of a started hour counts as
/// a full hour.
pub fn billable_hours(duration_seconds: i64) -> i64 {
    if duration_seconds <= 3600 {
        return 1;
    }
    (duration_seconds + 3599) / 3600
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// ── Tests ──────────────────────────────────────────────────────
