//! Spatial query utilities for distance calculations.
//!
//! Uses Haversine formula for accurate distances on Earth's surface.

use geo::{ClosestPoint, HaversineDistance, Line, LineString, Point};

/// Calculate Haversine distance between two points in meters
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    p1.haversine_distance(&p2)
}

/// Calculate distance from point to line segment in meters
pub fn haversine_distance_to_line(point: Point, line: Line) -> f64 {
    // Convert line to LineString for ClosestPoint trait
    let line_string = LineString::from(vec![line.start, line.end]);

    match line_string.closest_point(&point) {
        geo::Closest::Intersection(p) | geo::Closest::SinglePoint(p) => {
            haversine_distance(point, p)
        }
        geo::Closest::Indeterminate => f64::INFINITY,
    }
}

/// Mean Earth radius in meters, the radius haversine distances are measured on
pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

/// Length of one degree of latitude on the haversine sphere
pub const METERS_PER_DEGREE: f64 = MEAN_EARTH_RADIUS * std::f64::consts::PI / 180.0;

// Prefilter slack over the exact haversine check
const PREFILTER_MARGIN: f64 = 1.01;

/// Convert meters to degrees of latitude (for bounding box queries)
pub fn meters_to_degrees_approx(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Euclidean radius in degrees that contains every point within `meters` of
/// a location at `latitude`.
///
/// A degree of longitude shrinks towards the poles, so the radius is widened by
/// the latitude's cosine. Clamped near the poles. Slightly generous; callers
/// filter the candidates by haversine distance.
pub fn prefilter_radius_degrees(latitude: f64, meters: f64) -> f64 {
    let shrink = latitude.to_radians().cos().abs().max(0.01);
    meters_to_degrees_approx(meters) * PREFILTER_MARGIN / shrink
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Frankfurt to Cologne is approximately 152 km
        let frankfurt = Point::new(8.663, 50.107);
        let cologne = Point::new(6.958, 50.943);

        let dist = haversine_distance(frankfurt, cologne);
        assert!((dist - 152_000.0).abs() < 10_000.0); // Within 10km
    }

    #[test]
    fn test_distance_to_line() {
        let point = Point::new(8.6, 50.1);
        let line = Line::new(
            geo::Coord { x: 8.6, y: 50.0 },
            geo::Coord { x: 8.6, y: 50.2 },
        );

        // Point is on the line, distance should be near 0
        let dist = haversine_distance_to_line(point, line);
        assert!(dist < 100.0); // Within 100 meters
    }

    #[test]
    fn test_prefilter_radius_widens_with_latitude() {
        let equator = prefilter_radius_degrees(0.0, 1_000.0);
        let north = prefilter_radius_degrees(60.0, 1_000.0);

        assert!((north - 2.0 * equator).abs() < 1e-9);
        assert!(prefilter_radius_degrees(90.0, 1_000.0).is_finite());
    }

    #[test]
    fn test_prefilter_covers_haversine_radius_at_equator() {
        let station = Point::new(8.0, 0.0);
        let north = Point::new(8.0, 999.5 / METERS_PER_DEGREE);

        let distance = haversine_distance(station, north);
        assert!(distance < 1_000.0);
        assert!(north.y() - station.y() < prefilter_radius_degrees(0.0, 1_000.0));
    }

    #[test]
    fn test_degree_length_matches_haversine() {
        let one_degree = haversine_distance(Point::new(0.0, 0.0), Point::new(0.0, 1.0));
        assert!((one_degree - METERS_PER_DEGREE).abs() < 1.0);
    }
}
