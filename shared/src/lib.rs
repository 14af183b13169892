//! Shared types for the Gasthaus reservation system
//!
//! Domain models, wire DTOs, slot arithmetic and the booking rule machine
//! used by the client crates.

pub mod booking;
pub mod client;
pub mod models;
pub mod schedule;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use booking::{BookingInput, Rejection};
pub use models::{Reservation, RestaurantTable, Role};
pub use schedule::TimeWindow;
