//! Gasthaus Client - HTTP client core for the reservation service
//!
//! Slot availability with stale-response suppression, booking submission,
//! the single-reservation session cache and the session-gated access
//! protocol for a single-location restaurant reservation service.

pub mod availability;
pub mod config;
pub mod error;
pub mod gate;
pub mod http;
pub mod session;

pub use availability::{AvailabilityQuery, FetchTicket, Issue};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use gate::{AccessGate, AdminGate, AuthDecision, GuestGate, MemberGate, NavChrome, SessionProbe};
pub use http::HttpClient;
pub use session::{ReservationSession, SessionState};

// Re-export shared types for convenience
pub use shared::booking::{self, BookingInput, Rejection};
pub use shared::client::{
    LoginRequest, RegisterRequest, RegisterResponse, ReservationRequest, SessionInfo,
};
pub use shared::models::{Reservation, RestaurantTable, Role};
