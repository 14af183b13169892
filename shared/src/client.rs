//! Client-related types shared with the remote service
//!
//! Request/response shapes of the reservation and authentication API. The
//! session cookie is opaque and lives in the HTTP layer; none of these types
//! carry credentials beyond the login/register payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::Role;
use crate::schedule::local_datetime;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Session identity, answered by login and the session check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub username: String,
    pub role: Role,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Registration response data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

// =============================================================================
// Reservation API DTOs
// =============================================================================

/// Canonical outbound booking payload.
///
/// Constructed only by [`crate::booking::validate`] after every rule has
/// passed; both timestamps travel in the service's local format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub table_number: i32,
    #[serde(with = "local_datetime")]
    pub start_time: NaiveDateTime,
    #[serde(with = "local_datetime")]
    pub end_time: NaiveDateTime,
}
