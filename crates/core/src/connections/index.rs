//! Bidirectional connection ↔ segment lookup.
//!
//! Two flat tables rebuilt together from the segment memberships. Segments are
//! addressed by index and connections by id; no table holds references into
//! the other.

use std::collections::HashMap;

use railviz_transit::ConnectionId;

use crate::connections::segments::SegmentIndex;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionIndex {
    forward: HashMap<ConnectionId, Vec<SegmentIndex>>,
    reverse: Vec<Vec<ConnectionId>>,
}

impl ConnectionIndex {
    /// Invert the per-segment memberships. Segment `i` is `memberships[i]`.
    pub fn build(memberships: &[Vec<ConnectionId>]) -> Self {
        let mut forward: HashMap<ConnectionId, Vec<SegmentIndex>> = HashMap::new();

        for (segment, connections) in memberships.iter().enumerate() {
            for &connection in connections {
                let segments = forward.entry(connection).or_default();
                if segments.last() != Some(&segment) {
                    segments.push(segment);
                }
            }
        }

        Self {
            forward,
            reverse: memberships.to_vec(),
        }
    }

    /// Segments traversed by `connection`, ascending
    pub fn segments_of(&self, connection: ConnectionId) -> &[SegmentIndex] {
        self.forward.get(&connection).map(Vec::as_slice).unwrap_or_default()
    }

    /// Connections traversing `segment`
    pub fn connections_of(&self, segment: SegmentIndex) -> &[ConnectionId] {
        self.reverse.get(segment).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn segment_count(&self) -> usize {
        self.reverse.len()
    }

    pub fn connection_count(&self) -> usize {
        self.forward.len()
    }

    pub fn connections(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.forward.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }
}
