//! Overlay for the connections of a search result.
//!
//! Every leg with geometry becomes one line segment colored by the upstream
//! color index. Hovering or selecting connections highlights the segments they
//! use; a segment shared by several highlighted connections takes the color of
//! the lowest of them.
//!
//! The overlay keeps its last data while no surface is attached and pushes it
//! when one is. Surface failures are logged and otherwise ignored.

pub mod config;
pub mod highlight;
pub mod index;
pub mod pick;
pub mod segments;
pub mod stations;

#[cfg(test)]
pub(crate) mod fixtures;

use geojson::FeatureCollection;
use railviz_transit::{ConnectionId, SearchResult, Station, TrainLeg, WalkLeg};
use tracing::{debug, warn};

use crate::connections::config::{OverlayConfig, OverlayIds};
use crate::connections::highlight::resolve_highlight_colors;
use crate::connections::index::ConnectionIndex;
use crate::connections::pick::{PickedLeg, find_segment, leg_for_segment};
use crate::connections::segments::{SegmentSet, ingest};
use crate::connections::stations::station_collection;
use crate::map::{
    FeatureId, FeatureState, MapError, MapSurface, RenderedFeature, Visibility, empty_collection,
};

/// Everything derived from one search result. Replaced as a whole.
#[derive(Default)]
struct Loaded {
    train_legs: Vec<TrainLeg>,
    walk_legs: Vec<WalkLeg>,
    segments: SegmentSet,
    index: ConnectionIndex,
    lowest: ConnectionId,
}

pub struct ConnectionsOverlay<S> {
    config: OverlayConfig,
    ids: OverlayIds,
    surface: Option<S>,
    visible: bool,
    loaded: Loaded,
    stations: FeatureCollection,
}

impl<S: MapSurface> Default for ConnectionsOverlay<S> {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

impl<S: MapSurface> ConnectionsOverlay<S> {
    pub fn new(config: OverlayConfig) -> Self {
        let ids = config.ids();
        Self {
            config,
            ids,
            surface: None,
            visible: true,
            loaded: Loaded::default(),
            stations: empty_collection(),
        }
    }

    pub fn ids(&self) -> &OverlayIds {
        &self.ids
    }

    /// Attach to `surface`, placing the segment lines directly below
    /// `before_layer_id`. Data set while detached is pushed now.
    pub fn attach(&mut self, surface: S, before_layer_id: Option<&str>) {
        self.surface = Some(surface);
        self.install(before_layer_id);
    }

    /// Stop drawing into the current surface and hand it back. Sources and
    /// layers stay on the surface; the overlay keeps its data.
    pub fn detach(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Replace the drawn result. Empty leg lists clear the overlay.
    ///
    /// Indices handed out for the previous result are invalid afterwards,
    /// including any highlight applied to them.
    pub fn set_data(
        &mut self,
        train_legs: Vec<TrainLeg>,
        walk_legs: Vec<WalkLeg>,
        lowest_connection_id: ConnectionId,
    ) {
        let segments = ingest(&train_legs, &walk_legs);
        let index = ConnectionIndex::build(&segments.memberships);

        debug!(
            "connections overlay: {} train legs, {} walk legs -> {} segments ({} train, {} walk), {} connections",
            train_legs.len(),
            walk_legs.len(),
            segments.len(),
            segments.train_count(),
            segments.walk_count(),
            index.connection_count(),
        );

        self.loaded = Loaded {
            train_legs,
            walk_legs,
            segments,
            index,
            lowest: lowest_connection_id,
        };

        if let Some(surface) = self.surface.as_mut() {
            log_failure(
                surface.remove_feature_state(&self.ids.source),
                "clear highlight",
            );
            log_failure(
                surface.set_source_data(&self.ids.source, self.loaded.segments.collection.clone()),
                "push segments",
            );
        }
    }

    /// Replace segments and stations with those of `result`
    pub fn set_result(&mut self, result: SearchResult) {
        self.set_stations(&result.stations);
        self.set_data(result.train_legs, result.walk_legs, result.lowest_connection_id);
    }

    pub fn clear(&mut self) {
        self.set_stations(&[]);
        self.set_data(Vec::new(), Vec::new(), ConnectionId::default());
    }

    pub fn set_stations(&mut self, stations: &[Station]) {
        self.stations = station_collection(stations);

        if let Some(surface) = self.surface.as_mut() {
            log_failure(
                surface.set_source_data(&self.ids.station_source, self.stations.clone()),
                "push stations",
            );
        }
    }

    /// Show or hide the segment lines. Highlight state is kept while hidden.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;

        if let Some(surface) = self.surface.as_mut() {
            log_failure(
                surface.set_layer_visibility(&self.ids.line_layer, visible.into()),
                "toggle visibility",
            );
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Highlight the segments of `active`. An empty slice removes all highlights.
    pub fn highlight(&mut self, active: &[ConnectionId]) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        log_failure(
            surface.remove_feature_state(&self.ids.source),
            "clear highlight",
        );
        if active.is_empty() {
            return;
        }

        let colors = resolve_highlight_colors(&self.loaded.index, active, self.loaded.lowest);
        debug!(
            "connections overlay: highlighting {} segments for {} connections",
            colors.len(),
            active.len()
        );

        for (segment, color) in colors {
            log_failure(
                surface.set_feature_state(
                    &self.ids.source,
                    segment as FeatureId,
                    FeatureState::highlighted(color),
                ),
                "set highlight",
            );
        }
    }

    /// The leg behind the first of `hits` that lies on this overlay's lines
    pub fn resolve_picked_leg(&self, hits: &[RenderedFeature]) -> Option<PickedLeg<'_>> {
        let segment = find_segment(hits, &self.ids.line_layer)?;
        let leg = leg_for_segment(
            segment,
            &self.loaded.segments,
            &self.loaded.train_legs,
            &self.loaded.walk_legs,
        );

        if leg.is_none() {
            debug!("connections overlay: picked segment {segment} is not part of the current result");
        }
        leg
    }

    pub fn index(&self) -> &ConnectionIndex {
        &self.loaded.index
    }

    pub fn segments(&self) -> &SegmentSet {
        &self.loaded.segments
    }

    pub fn lowest_connection_id(&self) -> ConnectionId {
        self.loaded.lowest
    }

    pub fn train_legs(&self) -> &[TrainLeg] {
        &self.loaded.train_legs
    }

    pub fn walk_legs(&self) -> &[WalkLeg] {
        &self.loaded.walk_legs
    }

    fn install(&mut self, before: Option<&str>) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let ids = &self.ids;
        let style = &self.config.style;

        // State left on an existing source may belong to an earlier result
        if surface.has_source(&ids.source) {
            log_failure(surface.remove_feature_state(&ids.source), "clear highlight");
        }
        log_failure(
            upsert_source(surface, &ids.source, self.loaded.segments.collection.clone()),
            "add segment source",
        );
        if !surface.has_layer(&ids.line_layer) {
            let layer = style.line_layer(&ids.line_layer, &ids.source);
            if let Err(e) = surface.add_layer(layer.clone(), before) {
                warn!("connections overlay: failed to insert line layer before {before:?}: {e}");
                log_failure(surface.add_layer(layer, None), "add line layer");
            }
        }

        log_failure(
            upsert_source(surface, &ids.station_source, self.stations.clone()),
            "add station source",
        );
        if !surface.has_layer(&ids.station_layer) {
            log_failure(
                surface.add_layer(style.station_layer(&ids.station_layer, &ids.station_source), None),
                "add station layer",
            );
        }

        log_failure(
            surface.set_layer_visibility(&ids.line_layer, Visibility::from(self.visible)),
            "toggle visibility",
        );
    }
}

fn upsert_source<S: MapSurface>(
    surface: &mut S,
    id: &str,
    data: FeatureCollection,
) -> Result<(), MapError> {
    if surface.has_source(id) {
        surface.set_source_data(id, data)
    } else {
        surface.add_source(id, data)
    }
}

fn log_failure(result: Result<(), MapError>, action: &str) {
    if let Err(e) = result {
        warn!("connections overlay: failed to {action}: {e}");
    }
}
