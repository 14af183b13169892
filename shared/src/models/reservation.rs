//! Reservation Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::schedule::local_datetime;

/// Authoritative reservation record as returned by the service.
///
/// A guest holds at most one of these at a time: a newly created reservation
/// supersedes any prior local copy, deletion clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    /// Present in admin listings; omitted on the guest's own record fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub table_number: i32,
    #[serde(with = "local_datetime")]
    pub start_time: NaiveDateTime,
    #[serde(with = "local_datetime")]
    pub end_time: NaiveDateTime,
}
