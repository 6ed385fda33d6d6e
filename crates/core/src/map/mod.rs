//! The rendering surface overlays draw onto.
//!
//! A surface is owned by the map view, not by the overlays. Overlays only use
//! the primitive capabilities below: GeoJSON sources, line/circle layers,
//! transient per-feature state, layer visibility and pointer hit-testing.

pub mod memory;
pub mod style;

use std::cell::RefCell;
use std::rc::Rc;

use geo::Point;
use geojson::{Feature, FeatureCollection, feature::Id};
use palette::Srgb;
use serde_json::Value;

/// Numeric id of a feature inside one source
pub type FeatureId = u64;

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Layer not found: {0}")]
    LayerNotFound(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    None,
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Self {
        if visible { Visibility::Visible } else { Visibility::None }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Line,
    Circle,
}

/// Declarative description of a layer, mirroring a style-spec layer object
#[derive(Clone, Debug, PartialEq)]
pub struct LayerSpec {
    pub id: String,
    pub kind: LayerKind,
    pub source: String,
    pub layout: Value,
    pub paint: Value,
}

/// Transient state attached to a rendered feature, read by paint expressions
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FeatureState {
    pub highlight: bool,
    pub color: Option<Srgb<u8>>,
}

impl FeatureState {
    pub fn highlighted(color: Srgb<u8>) -> Self {
        Self {
            highlight: true,
            color: Some(color),
        }
    }
}

/// A feature found under the pointer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedFeature {
    pub layer_id: String,
    pub source_id: String,
    pub id: Option<FeatureId>,
}

pub trait MapSurface {
    fn has_source(&self, id: &str) -> bool;

    fn add_source(&mut self, id: &str, data: FeatureCollection) -> Result<(), MapError>;

    /// Replace the features of an existing source. Feature state is kept.
    fn set_source_data(&mut self, id: &str, data: FeatureCollection) -> Result<(), MapError>;

    fn has_layer(&self, id: &str) -> bool;

    /// Add a layer directly below `before`, or on top if `before` is `None`
    fn add_layer(&mut self, layer: LayerSpec, before: Option<&str>) -> Result<(), MapError>;

    fn set_layer_visibility(&mut self, id: &str, visibility: Visibility) -> Result<(), MapError>;

    fn set_feature_state(
        &mut self,
        source: &str,
        id: FeatureId,
        state: FeatureState,
    ) -> Result<(), MapError>;

    /// Clear the state of every feature in `source`
    fn remove_feature_state(&mut self, source: &str) -> Result<(), MapError>;

    /// Features of visible layers within `radius_m` of `point`, top-most layer first
    fn query_rendered_features(&self, point: Point, radius_m: f64) -> Vec<RenderedFeature>;
}

impl<T: MapSurface> MapSurface for Rc<RefCell<T>> {
    fn has_source(&self, id: &str) -> bool {
        self.borrow().has_source(id)
    }

    fn add_source(&mut self, id: &str, data: FeatureCollection) -> Result<(), MapError> {
        self.borrow_mut().add_source(id, data)
    }

    fn set_source_data(&mut self, id: &str, data: FeatureCollection) -> Result<(), MapError> {
        self.borrow_mut().set_source_data(id, data)
    }

    fn has_layer(&self, id: &str) -> bool {
        self.borrow().has_layer(id)
    }

    fn add_layer(&mut self, layer: LayerSpec, before: Option<&str>) -> Result<(), MapError> {
        self.borrow_mut().add_layer(layer, before)
    }

    fn set_layer_visibility(&mut self, id: &str, visibility: Visibility) -> Result<(), MapError> {
        self.borrow_mut().set_layer_visibility(id, visibility)
    }

    fn set_feature_state(
        &mut self,
        source: &str,
        id: FeatureId,
        state: FeatureState,
    ) -> Result<(), MapError> {
        self.borrow_mut().set_feature_state(source, id, state)
    }

    fn remove_feature_state(&mut self, source: &str) -> Result<(), MapError> {
        self.borrow_mut().remove_feature_state(source)
    }

    fn query_rendered_features(&self, point: Point, radius_m: f64) -> Vec<RenderedFeature> {
        self.borrow().query_rendered_features(point, radius_m)
    }
}

pub fn empty_collection() -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: Vec::new(),
        foreign_members: None,
    }
}

/// The id a surface keys feature state by: the `id` property, else the feature id
pub fn promoted_id(feature: &Feature) -> Option<FeatureId> {
    feature
        .properties
        .as_ref()
        .and_then(|p| p.get("id"))
        .and_then(Value::as_u64)
        .or_else(|| match &feature.id {
            Some(Id::Number(n)) => n.as_u64(),
            _ => None,
        })
}
