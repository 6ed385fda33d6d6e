//! Core traits for search-result entities.
//!
//! Train and walk legs are different shapes upstream but are drawn the same
//! way, so overlays only see them through [`Leg`].

use geo::LineString;

use crate::identifiers::*;

// ============================================================================
// Leg Trait
// ============================================================================

/// One edge of the journey graph, shared by one or more connections
pub trait Leg {
    /// Path of the leg, in (lng, lat) order. May be empty if no geometry is known.
    fn geometry(&self) -> &LineString;

    /// Palette slot assigned by the upstream coloring stage
    fn color_index(&self) -> usize;

    /// Connections traversing this leg, without duplicates
    fn connection_ids(&self) -> Vec<ConnectionId>;

    /// Whether the leg should be drawn at all
    fn is_renderable(&self) -> bool {
        !self.geometry().0.is_empty()
    }
}
