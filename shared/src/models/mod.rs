//! Data models
//!
//! Wire entities of the remote reservation service. All IDs are `i64`,
//! assigned by the service; the client never invents them.

pub mod reservation;
pub mod role;
pub mod table;

// Re-exports
pub use reservation::Reservation;
pub use role::Role;
pub use table::RestaurantTable;
