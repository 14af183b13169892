//! Restaurant Table Model

use serde::{Deserialize, Serialize};

/// Restaurant table entity as returned by the availability query.
///
/// Read-only reference data, immutable for the lifetime of a query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantTable {
    pub id: i64,
    pub table_number: i32,
    pub number_of_seats: i32,
}
