use railviz_transit::{TrainLeg, WalkLeg};

use crate::connections::segments::{SegmentIndex, SegmentSet};
use crate::map::RenderedFeature;

/// The leg behind a picked segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickedLeg<'a> {
    Train(&'a TrainLeg),
    Walk(&'a WalkLeg),
}

/// First hit on `line_layer`, if it carries a feature id
pub fn find_segment(hits: &[RenderedFeature], line_layer: &str) -> Option<SegmentIndex> {
    let hit = hits.iter().find(|f| f.layer_id == line_layer)?;
    usize::try_from(hit.id?).ok()
}

/// Map a segment index back to the leg it was built from.
///
/// Train segments occupy `0..train_count`, walk segments
/// `train_count..train_count + walk_count`. Anything past that is stale.
pub fn leg_for_segment<'a>(
    segment: SegmentIndex,
    segments: &SegmentSet,
    train_legs: &'a [TrainLeg],
    walk_legs: &'a [WalkLeg],
) -> Option<PickedLeg<'a>> {
    let train_count = segments.train_count();

    if segment < train_count {
        train_legs.get(segments.train_legs[segment]).map(PickedLeg::Train)
    } else if segment < train_count + segments.walk_count() {
        walk_legs
            .get(segments.walk_legs[segment - train_count])
            .map(PickedLeg::Walk)
    } else {
        None
    }
}
