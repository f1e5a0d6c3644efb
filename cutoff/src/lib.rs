//! Warehouse shipping-cutoff board core.
//!
//! This crate computes the display values behind a shipping-cutoff board:
//! nearest-warehouse resolution from a device coordinate, time-zone-aware
//! cutoff status classification, localized wall clocks, and note
//! annotation. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (distance, status, annotation,
//!   catalog). No I/O, no ambient clock, fully testable in isolation.
//! - **[`io`]**: Host-boundary concerns (catalog files, the system clock,
//!   one-shot geolocation, the refresh ticker). Isolated to enable mocking
//!   in tests.
//!
//! [`board`] coordinates core logic with host inputs into the view model a
//! presentation layer renders.

pub mod board;
pub mod core;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
