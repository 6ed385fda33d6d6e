//! Turning legs into drawable segments.
//!
//! Segment indices are handed out over emitted segments only: train legs first,
//! then walk legs, each in input order. Legs without geometry and walk legs that
//! failed to route are dropped without taking an index.

use geo::LineString;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value, feature::Id};
use palette::Srgb;
use railviz_transit::{ConnectionId, Leg, TrainLeg, WalkLeg};

use crate::map::empty_collection;
use crate::map::style::{hex, palette_color};

/// Position of a segment in the emitted sequence, also its feature id
pub type SegmentIndex = usize;

/// The drawable part of a search result
#[derive(Clone, Debug)]
pub struct SegmentSet {
    pub collection: FeatureCollection,

    /// Connections traversing each segment, by segment index
    pub memberships: Vec<Vec<ConnectionId>>,

    /// Base color of each segment, by segment index
    pub colors: Vec<Srgb<u8>>,

    /// Input position of the train leg behind segment `i`
    pub train_legs: Vec<usize>,

    /// Input position of the walk leg behind segment `train_legs.len() + j`
    pub walk_legs: Vec<usize>,
}

impl Default for SegmentSet {
    fn default() -> Self {
        Self {
            collection: empty_collection(),
            memberships: Vec::new(),
            colors: Vec::new(),
            train_legs: Vec::new(),
            walk_legs: Vec::new(),
        }
    }
}

impl SegmentSet {
    pub fn len(&self) -> usize {
        self.memberships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memberships.is_empty()
    }

    pub fn train_count(&self) -> usize {
        self.train_legs.len()
    }

    pub fn walk_count(&self) -> usize {
        self.walk_legs.len()
    }

    fn push(&mut self, leg: &impl Leg) {
        let index = self.len();
        let color = palette_color(leg.color_index());

        self.collection.features.push(line_feature(index, leg.geometry(), color));
        self.memberships.push(leg.connection_ids());
        self.colors.push(color);
    }
}

/// Build the segment set for one search result
pub fn ingest(train_legs: &[TrainLeg], walk_legs: &[WalkLeg]) -> SegmentSet {
    let mut set = SegmentSet::default();

    for (i, leg) in train_legs.iter().enumerate() {
        if leg.is_renderable() {
            set.push(leg);
            set.train_legs.push(i);
        }
    }

    for (i, leg) in walk_legs.iter().enumerate() {
        if leg.is_renderable() {
            set.push(leg);
            set.walk_legs.push(i);
        }
    }

    set
}

fn line_feature(index: SegmentIndex, geometry: &LineString, color: Srgb<u8>) -> Feature {
    let path: Vec<Vec<f64>> = geometry.0.iter().map(|c| vec![c.x, c.y]).collect();

    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), serde_json::json!(index));
    properties.insert("color".to_string(), serde_json::json!(hex(color)));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(path))),
        id: Some(Id::Number(index.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connections::fixtures::{path, train, walk};
    use crate::map::style::PALETTE;

    #[test]
    fn test_errored_walk_is_omitted() {
        let set = ingest(&[train(0, &[5, 6], path())], &[walk(1, &[5], true)]);

        assert_eq!(set.len(), 1);
        assert_eq!(set.train_count(), 1);
        assert_eq!(set.walk_count(), 0);
        assert_eq!(set.memberships[0], vec![ConnectionId(5), ConnectionId(6)]);
        assert_eq!(set.collection.features.len(), 1);
    }

    #[test]
    fn test_empty_geometry_takes_no_index() {
        let set = ingest(
            &[train(0, &[1], LineString::new(vec![])), train(1, &[2], path())],
            &[walk(2, &[3], false)],
        );

        assert_eq!(set.len(), 2);
        assert_eq!(set.train_legs, vec![1]);
        assert_eq!(set.walk_legs, vec![0]);

        let ids: Vec<_> = set
            .collection
            .features
            .iter()
            .map(|f| f.properties.as_ref().unwrap()["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_train_segments_come_first() {
        let set = ingest(
            &[train(0, &[1], path()), train(0, &[2], path())],
            &[walk(0, &[1], false), walk(0, &[2], false)],
        );

        assert_eq!(set.train_legs, vec![0, 1]);
        assert_eq!(set.walk_legs, vec![0, 1]);
        assert_eq!(set.memberships[2], vec![ConnectionId(1)]);
        assert_eq!(set.memberships[3], vec![ConnectionId(2)]);
    }

    #[test]
    fn test_color_index_wraps() {
        let set = ingest(&[train(13, &[1], path()), train(1, &[1], path())], &[]);

        assert_eq!(set.colors[0], set.colors[1]);
        assert_eq!(set.colors[0], PALETTE[1]);

        let color = &set.collection.features[0].properties.as_ref().unwrap()["color"];
        assert_eq!(color, &serde_json::json!("#33a02c"));
    }

    #[test]
    fn test_feature_geometry_is_lng_lat() {
        let set = ingest(&[train(0, &[1], path())], &[]);

        let geometry = set.collection.features[0].geometry.as_ref().unwrap();
        match &geometry.value {
            Value::LineString(coords) => {
                assert_eq!(coords.len(), 2);
                assert_eq!(coords[0], vec![8.663, 50.107]);
            }
            _ => panic!("Expected LineString value"),
        }
    }
}
