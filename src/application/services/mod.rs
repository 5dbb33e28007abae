//! Application services

mod allocator;
mod identity;
mod lot_admin;
mod reservation;
mod stats;

#[cfg(test)]
mod test_support;

pub use allocator::SpotAllocator;
pub use identity::IdentityService;
pub use lot_admin::LotService;
pub use reservation::ReservationService;
pub use stats::{LotOverview, StatsService, UserActivity};
