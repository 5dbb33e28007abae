//! Parking spot domain entity

use chrono::{DateTime, Utc};

/// Spot occupancy status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotStatus {
    Available,
    Occupied,
}

impl SpotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Available" => Self::Available,
            "Occupied" => Self::Occupied,
            // Unknown values must never be handed to the allocator
            _ => Self::Occupied,
        }
    }
}

impl std::fmt::Display for SpotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One allocatable space within a lot
#[derive(Debug, Clone)]
pub struct ParkingSpot {
    pub id: i32,
    pub lot_id: i32,
    pub status: SpotStatus,
    pub created_at: DateTime<Utc>,
}

impl ParkingSpot {
    pub fn is_available(&self) -> bool {
        self.status == SpotStatus::Available
    }
}

// ── Tests ──────────────────────────────────────────────────────
