//! Search-result builders shared by the overlay tests.

use geo::{LineString, coord};
use railviz_transit::{
    ConnectionId, ExternTrip, LineIdentifier, StationIdentifier, TrainLeg, TripConnections,
    WalkLeg,
};

/// Frankfurt to Cologne, two points
pub(crate) fn path() -> LineString {
    LineString::new(vec![coord! { x: 8.663, y: 50.107 }, coord! { x: 6.958, y: 50.943 }])
}

pub(crate) fn ids(ids: &[u32]) -> Vec<ConnectionId> {
    ids.iter().copied().map(ConnectionId).collect()
}

pub(crate) fn train(color: usize, connections: &[u32], geometry: LineString) -> TrainLeg {
    TrainLeg {
        geometry,
        color,
        trips: vec![TripConnections {
            trip: ExternTrip::from_unix(
                StationIdentifier::new("8000105"),
                27,
                1_700_000_000,
                StationIdentifier::new("8000207"),
                1_700_004_000,
                LineIdentifier::new("ICE"),
            )
            .unwrap(),
            connection_ids: ids(connections),
        }],
    }
}

pub(crate) fn walk(color: usize, connections: &[u32], error: bool) -> WalkLeg {
    WalkLeg {
        polyline: path(),
        color,
        connection_ids: ids(connections),
        error: error.then(|| "no footpath".into()),
    }
}
