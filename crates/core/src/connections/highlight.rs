use std::collections::{BTreeMap, HashSet};

use palette::Srgb;
use railviz_transit::ConnectionId;

use crate::connections::index::ConnectionIndex;
use crate::connections::segments::SegmentIndex;
use crate::map::style::palette_slot;

/// Highlight color of every segment used by an active connection.
///
/// A segment shared by several active connections takes the color of the lowest
/// active id among the connections traversing it, so the result does not depend
/// on the order of `active`. Each segment is resolved once per call.
pub fn resolve_highlight_colors(
    index: &ConnectionIndex,
    active: &[ConnectionId],
    lowest: ConnectionId,
) -> BTreeMap<SegmentIndex, Srgb<u8>> {
    let active_set: HashSet<ConnectionId> = active.iter().copied().collect();
    let mut colors = BTreeMap::new();

    for &connection in active {
        for &segment in index.segments_of(connection) {
            colors.entry(segment).or_insert_with(|| {
                let owner = index
                    .connections_of(segment)
                    .iter()
                    .copied()
                    .filter(|c| active_set.contains(c))
                    .fold(connection, ConnectionId::min);
                palette_slot(owner.offset_from(lowest))
            });
        }
    }

    colors
}
