//! A headless surface that keeps everything in memory.
//!
//! Behaves like a GL map for the parts overlays rely on: layer ordering with
//! `before` insertion, per-source feature state and visibility. Hit-testing
//! works on geographic distance instead of screen pixels.

use std::collections::{BTreeMap, HashMap};

use geo::{Coord, Line, Point};
use geojson::{Feature, FeatureCollection, Value};
use itertools::Itertools;
use railviz_transit::spatial::{
    PointNode, SegmentNode, haversine_distance, haversine_distance_to_line,
    prefilter_radius_degrees,
};
use rstar::RTree;

use crate::map::{
    FeatureId, FeatureState, LayerKind, LayerSpec, MapError, MapSurface, RenderedFeature,
    Visibility, empty_collection, promoted_id,
};

struct Source {
    data: FeatureCollection,
    state: BTreeMap<FeatureId, FeatureState>,
    // rebuilt whenever `data` changes
    lines: RTree<SegmentNode<FeatureId>>,
    points: RTree<PointNode<FeatureId>>,
}

impl Source {
    fn new(data: FeatureCollection) -> Self {
        let mut source = Self {
            data: empty_collection(),
            state: BTreeMap::new(),
            lines: RTree::new(),
            points: RTree::new(),
        };
        source.replace_data(data);
        source
    }

    fn replace_data(&mut self, data: FeatureCollection) {
        let features = || data.features.iter().filter_map(|f| Some((promoted_id(f)?, f)));

        self.lines = RTree::bulk_load(
            features()
                .flat_map(|(id, f)| lines(f).into_iter().map(move |l| SegmentNode::new(l, id)))
                .collect(),
        );
        self.points = RTree::bulk_load(
            features()
                .flat_map(|(id, f)| points(f).into_iter().map(move |p| PointNode::new(p, id)))
                .collect(),
        );
        self.data = data;
    }
}

struct Layer {
    spec: LayerSpec,
    visibility: Visibility,
}

#[derive(Default)]
pub struct MemorySurface {
    sources: HashMap<String, Source>,
    // bottom to top
    layers: Vec<Layer>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_data(&self, id: &str) -> Option<&FeatureCollection> {
        self.sources.get(id).map(|s| &s.data)
    }

    pub fn feature_state(&self, source: &str, id: FeatureId) -> Option<FeatureState> {
        self.sources.get(source)?.state.get(&id).copied()
    }

    /// All features of `source` that currently carry state, ordered by id
    pub fn feature_states(&self, source: &str) -> Vec<(FeatureId, FeatureState)> {
        self.sources
            .get(source)
            .map(|s| s.state.iter().map(|(id, state)| (*id, *state)).collect())
            .unwrap_or_default()
    }

    /// Layer ids from bottom to top
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.spec.id.as_str()).collect()
    }

    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.find_layer(id).map(|i| &self.layers[i].spec)
    }

    pub fn layer_visibility(&self, id: &str) -> Option<Visibility> {
        self.find_layer(id).map(|i| self.layers[i].visibility)
    }

    fn find_layer(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.spec.id == id)
    }

    fn source_mut(&mut self, id: &str) -> Result<&mut Source, MapError> {
        self.sources
            .get_mut(id)
            .ok_or_else(|| MapError::SourceNotFound(id.to_owned()))
    }

    fn hits_in_layer(&self, layer: &Layer, point: Point, radius_m: f64) -> Vec<RenderedFeature> {
        let Some(source) = self.sources.get(&layer.spec.source) else {
            return Vec::new();
        };

        let query = [point.x(), point.y()];
        let prefilter = prefilter_radius_degrees(point.y(), radius_m);

        let hits: Vec<(FeatureId, f64)> = match layer.spec.kind {
            LayerKind::Line => source
                .lines
                .locate_within_distance(query, prefilter * prefilter)
                .map(|node| (node.key, haversine_distance_to_line(point, node.segment)))
                .collect(),
            LayerKind::Circle => source
                .points
                .locate_within_distance(query, prefilter * prefilter)
                .map(|node| (node.key, haversine_distance(point, node.location)))
                .collect(),
        };

        hits.into_iter()
            .filter(|(_, distance)| *distance <= radius_m)
            .sorted_by(|a, b| a.1.total_cmp(&b.1))
            .unique_by(|(id, _)| *id)
            .map(|(id, _)| RenderedFeature {
                layer_id: layer.spec.id.clone(),
                source_id: layer.spec.source.clone(),
                id: Some(id),
            })
            .collect()
    }
}

impl MapSurface for MemorySurface {
    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_source(&mut self, id: &str, data: FeatureCollection) -> Result<(), MapError> {
        if self.has_source(id) {
            return Err(MapError::DuplicateId(id.to_owned()));
        }

        self.sources.insert(id.to_owned(), Source::new(data));
        Ok(())
    }

    fn set_source_data(&mut self, id: &str, data: FeatureCollection) -> Result<(), MapError> {
        self.source_mut(id)?.replace_data(data);
        Ok(())
    }

    fn has_layer(&self, id: &str) -> bool {
        self.find_layer(id).is_some()
    }

    fn add_layer(&mut self, layer: LayerSpec, before: Option<&str>) -> Result<(), MapError> {
        if self.has_layer(&layer.id) {
            return Err(MapError::DuplicateId(layer.id));
        }
        if !self.has_source(&layer.source) {
            return Err(MapError::SourceNotFound(layer.source));
        }

        let position = match before {
            Some(before) => self
                .find_layer(before)
                .ok_or_else(|| MapError::LayerNotFound(before.to_owned()))?,
            None => self.layers.len(),
        };

        self.layers.insert(
            position,
            Layer {
                spec: layer,
                visibility: Visibility::Visible,
            },
        );
        Ok(())
    }

    fn set_layer_visibility(&mut self, id: &str, visibility: Visibility) -> Result<(), MapError> {
        let index = self
            .find_layer(id)
            .ok_or_else(|| MapError::LayerNotFound(id.to_owned()))?;
        self.layers[index].visibility = visibility;
        Ok(())
    }

    fn set_feature_state(
        &mut self,
        source: &str,
        id: FeatureId,
        state: FeatureState,
    ) -> Result<(), MapError> {
        self.source_mut(source)?.state.insert(id, state);
        Ok(())
    }

    fn remove_feature_state(&mut self, source: &str) -> Result<(), MapError> {
        self.source_mut(source)?.state.clear();
        Ok(())
    }

    fn query_rendered_features(&self, point: Point, radius_m: f64) -> Vec<RenderedFeature> {
        if radius_m < 0.0 || !radius_m.is_finite() {
            return Vec::new();
        }

        self.layers
            .iter()
            .rev()
            .filter(|l| l.visibility == Visibility::Visible)
            .flat_map(|l| self.hits_in_layer(l, point, radius_m))
            .collect()
    }
}

fn coord(position: &[f64]) -> Option<Coord> {
    match position {
        [x, y, ..] => Some(Coord { x: *x, y: *y }),
        _ => None,
    }
}

fn path_lines(path: &[Vec<f64>]) -> impl Iterator<Item = Line> + '_ {
    let coords: Vec<Coord> = path.iter().filter_map(|p| coord(p)).collect();
    let single = (coords.len() == 1).then(|| Line::new(coords[0], coords[0]));
    let pairs: Vec<Line> = coords.windows(2).map(|w| Line::new(w[0], w[1])).collect();
    pairs.into_iter().chain(single)
}

fn lines(feature: &Feature) -> Vec<Line> {
    match feature.geometry.as_ref().map(|g| &g.value) {
        Some(Value::LineString(path)) => path_lines(path).collect(),
        Some(Value::MultiLineString(paths)) => paths.iter().flat_map(|p| path_lines(p)).collect(),
        _ => Vec::new(),
    }
}

fn points(feature: &Feature) -> Vec<Point> {
    match feature.geometry.as_ref().map(|g| &g.value) {
        Some(Value::Point(position)) => coord(position).map(Point::from).into_iter().collect(),
        Some(Value::MultiPoint(positions)) => positions
            .iter()
            .filter_map(|p| coord(p))
            .map(Point::from)
            .collect(),
        _ => Vec::new(),
    }
}
