//! A complete search result as handed to map overlays.

use crate::identifiers::ConnectionId;
use crate::models::legs::{Station, TrainLeg, WalkLeg};
use crate::models::traits::Leg;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResult {
    pub train_legs: Vec<TrainLeg>,
    pub walk_legs: Vec<WalkLeg>,
    pub stations: Vec<Station>,
    pub lowest_connection_id: ConnectionId,
}

impl SearchResult {
    pub fn new(train_legs: Vec<TrainLeg>, walk_legs: Vec<WalkLeg>) -> Self {
        let lowest_connection_id = lowest_connection_id(&train_legs, &walk_legs).unwrap_or_default();
        Self {
            train_legs,
            walk_legs,
            stations: Vec::new(),
            lowest_connection_id,
        }
    }

    pub fn with_stations(mut self, stations: Vec<Station>) -> Self {
        self.stations = stations;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.train_legs.is_empty() && self.walk_legs.is_empty()
    }
}

/// Lowest connection id referenced by any leg
pub fn lowest_connection_id(train_legs: &[TrainLeg], walk_legs: &[WalkLeg]) -> Option<ConnectionId> {
    train_legs
        .iter()
        .flat_map(|l| l.connection_ids())
        .chain(walk_legs.iter().flat_map(|l| l.connection_ids()))
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::LineString;

    #[test]
    fn test_lowest_connection_id_spans_both_kinds() {
        let walk = WalkLeg {
            polyline: LineString::new(vec![]),
            color: 0,
            connection_ids: vec![ConnectionId(12), ConnectionId(4)],
            error: None,
        };

        let result = SearchResult::new(vec![], vec![walk]);
        assert_eq!(result.lowest_connection_id, ConnectionId(4));
        assert!(!result.is_empty());
    }

    #[test]
    fn test_empty_result() {
        let result = SearchResult::new(vec![], vec![]);
        assert!(result.is_empty());
        assert_eq!(result.lowest_connection_id, ConnectionId(0));
    }
}
