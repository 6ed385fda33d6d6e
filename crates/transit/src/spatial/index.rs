//! R-tree nodes for hit-testing drawn features.
//!
//! Each node carries an opaque key (for example a layer/feature pair) so the
//! tree can be reused by anything that draws points or lines.
//!
//! ## Two-Stage Filtering
//!
//! Queries are expected to filter in two stages:
//! 1. **R-tree filter**: Euclidean distance in degrees, using a conservative radius
//! 2. **Haversine filter**: geodesic distance in meters on the survivors

use geo::{Line, Point};
use rstar::{PointDistance, RTreeObject, AABB};

// ============================================================================
// Point Node
// ============================================================================

#[derive(Clone, Debug)]
pub struct PointNode<K> {
    pub key: K,
    pub location: Point,
    point: [f64; 2],
}

impl<K> PointNode<K> {
    pub fn new(location: Point, key: K) -> Self {
        Self {
            key,
            location,
            point: [location.x(), location.y()],
        }
    }
}

impl<K> RTreeObject for PointNode<K> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl<K> PointDistance for PointNode<K> {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ============================================================================
// Line Segment Node
// ============================================================================

#[derive(Clone, Debug)]
pub struct SegmentNode<K> {
    pub key: K,
    pub segment: Line,
    aabb: AABB<[f64; 2]>,
}

impl<K> SegmentNode<K> {
    pub fn new(segment: Line, key: K) -> Self {
        let start = [segment.start.x, segment.start.y];
        let end = [segment.end.x, segment.end.y];

        Self {
            key,
            segment,
            aabb: AABB::from_corners(start, end),
        }
    }
}

impl<K> RTreeObject for SegmentNode<K> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

impl<K> PointDistance for SegmentNode<K> {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        // Squared Euclidean distance from point to segment
        let p = [point[0], point[1]];
        let a = [self.segment.start.x, self.segment.start.y];
        let b = [self.segment.end.x, self.segment.end.y];

        let ab = [b[0] - a[0], b[1] - a[1]];
        let ap = [p[0] - a[0], p[1] - a[1]];

        let ab_ab = ab[0] * ab[0] + ab[1] * ab[1];

        if ab_ab == 0.0 {
            // Segment is actually a point
            return ap[0] * ap[0] + ap[1] * ap[1];
        }

        let ab_ap = ab[0] * ap[0] + ab[1] * ap[1];
        let t = (ab_ap / ab_ab).clamp(0.0, 1.0);

        let closest = [a[0] + t * ab[0], a[1] + t * ab[1]];
        let dx = p[0] - closest[0];
        let dy = p[1] - closest[1];

        dx * dx + dy * dy
    }
}
