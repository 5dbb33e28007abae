pub mod services;

pub use services::{
    IdentityService, LotOverview, LotService, ReservationService, SpotAllocator, StatsService,
    UserActivity,
};
