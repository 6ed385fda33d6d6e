//! # railviz-transit
//!
//! Search-result data model shared by the map overlays.
//!
//! ## Features
//!
//! - **Typed legs**: train legs (ridden on one or more trips) and walk legs
//! - **Connection membership**: every leg knows which itineraries traverse it
//! - **Spatial helpers**: R-tree nodes and haversine distances for hit-testing
//! - **Wire input**: JSON search results (`serde` feature)
//!
//! ## Example
//!
//! ```
//! use railviz_transit::prelude::*;
//! use geo::{coord, LineString};
//!
//! let walk = WalkLeg {
//!     polyline: LineString::new(vec![coord! { x: 8.663, y: 50.107 }, coord! { x: 8.665, y: 50.108 }]),
//!     color: 1,
//!     connection_ids: vec![ConnectionId::new(7), ConnectionId::new(8)],
//!     error: None,
//! };
//!
//! let result = SearchResult::new(vec![], vec![walk]);
//! assert_eq!(result.lowest_connection_id, ConnectionId::new(7));
//! assert!(result.walk_legs[0].is_renderable());
//! ```

pub mod identifiers;
pub mod models;
pub mod spatial;
#[cfg(feature = "serde")]
pub mod wire;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::{legs::*, result::*, traits::*, types::*};
}

pub use prelude::*;
