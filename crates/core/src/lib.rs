//! Map overlays for railway search results.
//!
//! ```
//! use railviz_core::map::memory::MemorySurface;
//! use railviz_core::{ConnectionId, ConnectionsOverlay};
//!
//! let mut overlay = ConnectionsOverlay::default();
//! overlay.attach(MemorySurface::new(), None);
//! overlay.set_data(Vec::new(), Vec::new(), ConnectionId(0));
//! overlay.highlight(&[ConnectionId(0)]);
//!
//! assert!(overlay.segments().is_empty());
//! ```

pub mod connections;
pub mod map;

pub use connections::config::OverlayConfig;
pub use connections::pick::PickedLeg;
pub use connections::ConnectionsOverlay;
pub use map::{MapError, MapSurface};

// Re-export the data model from the transit crate
pub use railviz_transit as transit;
pub use railviz_transit::ConnectionId;
