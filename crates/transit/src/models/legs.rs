//! Train legs, walk legs and the stations they touch.

use std::collections::HashSet;
use std::sync::Arc;

use geo::{LineString, Point};

use crate::identifiers::*;
use crate::models::traits::Leg;
use crate::models::types::ExternTrip;

/// A trip running over a train leg, and the connections riding it there
#[derive(Clone, Debug, PartialEq)]
pub struct TripConnections {
    pub trip: ExternTrip,
    pub connection_ids: Vec<ConnectionId>,
}

/// A leg ridden on one or more trips
#[derive(Clone, Debug, PartialEq)]
pub struct TrainLeg {
    pub geometry: LineString,
    pub color: usize,
    pub trips: Vec<TripConnections>,
}

impl Leg for TrainLeg {
    fn geometry(&self) -> &LineString {
        &self.geometry
    }

    fn color_index(&self) -> usize {
        self.color
    }

    fn connection_ids(&self) -> Vec<ConnectionId> {
        dedup(self.trips.iter().flat_map(|t| t.connection_ids.iter().copied()))
    }
}

/// A footpath between two stops or between a stop and the start/destination
#[derive(Clone, Debug, PartialEq)]
pub struct WalkLeg {
    pub polyline: LineString,
    pub color: usize,
    pub connection_ids: Vec<ConnectionId>,

    /// Set when the footpath could not be routed
    pub error: Option<Arc<str>>,
}

impl WalkLeg {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

impl Leg for WalkLeg {
    fn geometry(&self) -> &LineString {
        &self.polyline
    }

    fn color_index(&self) -> usize {
        self.color
    }

    fn connection_ids(&self) -> Vec<ConnectionId> {
        dedup(self.connection_ids.iter().copied())
    }

    fn is_renderable(&self) -> bool {
        !self.has_error() && !self.polyline.0.is_empty()
    }
}

/// A stop touched by the result, drawn as a dot
#[derive(Clone, Debug, PartialEq)]
pub struct Station {
    pub id: StationIdentifier,
    pub name: Arc<str>,
    pub location: Point,
}

/// Keep the first occurrence of every id
fn dedup(ids: impl Iterator<Item = ConnectionId>) -> Vec<ConnectionId> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}
