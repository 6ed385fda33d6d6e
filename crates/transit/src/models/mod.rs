//! Search-result models, types, and traits.

pub mod legs;
pub mod result;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use legs::{Station, TrainLeg, TripConnections, WalkLeg};
pub use result::{lowest_connection_id, SearchResult};
pub use traits::Leg;
pub use types::{ExternTrip, TransitError, Result};
