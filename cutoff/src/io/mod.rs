//! Host-boundary concerns: catalog files, the system clock, geolocation,
//! and the refresh timer. Isolated from `core` to enable mocking in tests.

pub mod clock;
pub mod config;
pub mod location;
pub mod ticker;
