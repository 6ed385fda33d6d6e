//! JSON shape of a search result as produced by the search/coloring stage.
//!
//! Coordinates arrive as flat `[lat, lng, lat, lng, ...]` arrays and are turned
//! into (lng, lat) line strings here. Timestamps are unix seconds.

use std::sync::Arc;

use geo::{Coord, LineString, Point};
use serde::Deserialize;

use crate::identifiers::*;
use crate::models::{
    lowest_connection_id, ExternTrip, Result, SearchResult, Station, TrainLeg, TransitError,
    TripConnections, WalkLeg,
};

#[derive(Debug, Deserialize)]
pub struct SearchResultDto {
    #[serde(default)]
    pub train_legs: Vec<TrainLegDto>,
    #[serde(default)]
    pub walk_legs: Vec<WalkLegDto>,
    #[serde(default)]
    pub stations: Vec<StationDto>,
    #[serde(default)]
    pub lowest_connection_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TrainLegDto {
    pub coordinates: Vec<f64>,
    pub color: usize,
    #[serde(default)]
    pub trips: Vec<TripConnectionsDto>,
}

#[derive(Debug, Deserialize)]
pub struct TripConnectionsDto {
    pub trip: ExternTripDto,
    pub connection_ids: Vec<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ExternTripDto {
    pub station_id: String,
    pub train_nr: u32,
    pub time: i64,
    pub target_station_id: String,
    pub target_time: i64,
    #[serde(default)]
    pub line_id: String,
}

#[derive(Debug, Deserialize)]
pub struct WalkLegDto {
    pub polyline: Vec<f64>,
    pub color: usize,
    pub connection_ids: Vec<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StationDto {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Parse a search result from its JSON representation
pub fn from_json(json: &str) -> Result<SearchResult> {
    let dto: SearchResultDto =
        serde_json::from_str(json).map_err(|e| TransitError::SerializationError(e.to_string()))?;
    SearchResult::try_from(dto)
}

/// Convert a flat `[lat, lng, ...]` array into a (lng, lat) line string
pub fn lat_lng_line(flat: &[f64]) -> Result<LineString> {
    if flat.len() % 2 != 0 {
        return Err(TransitError::InvalidData(format!(
            "Coordinate array has odd length {}",
            flat.len()
        )));
    }

    Ok(LineString::new(
        flat.chunks_exact(2)
            .map(|c| Coord { x: c[1], y: c[0] })
            .collect(),
    ))
}

fn connection_ids(ids: Vec<u32>) -> Vec<ConnectionId> {
    ids.into_iter().map(ConnectionId::from).collect()
}

impl TryFrom<ExternTripDto> for ExternTrip {
    type Error = TransitError;

    fn try_from(dto: ExternTripDto) -> Result<Self> {
        ExternTrip::from_unix(
            dto.station_id.into(),
            dto.train_nr,
            dto.time,
            dto.target_station_id.into(),
            dto.target_time,
            dto.line_id.into(),
        )
    }
}

impl TryFrom<TrainLegDto> for TrainLeg {
    type Error = TransitError;

    fn try_from(dto: TrainLegDto) -> Result<Self> {
        let trips = dto
            .trips
            .into_iter()
            .map(|t| {
                Ok(TripConnections {
                    trip: t.trip.try_into()?,
                    connection_ids: connection_ids(t.connection_ids),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TrainLeg {
            geometry: lat_lng_line(&dto.coordinates)?,
            color: dto.color,
            trips,
        })
    }
}

impl TryFrom<WalkLegDto> for WalkLeg {
    type Error = TransitError;

    fn try_from(dto: WalkLegDto) -> Result<Self> {
        Ok(WalkLeg {
            polyline: lat_lng_line(&dto.polyline)?,
            color: dto.color,
            connection_ids: connection_ids(dto.connection_ids),
            error: dto.error.map(Arc::from),
        })
    }
}

impl From<StationDto> for Station {
    fn from(dto: StationDto) -> Self {
        Station {
            id: StationIdentifier::new(dto.id),
            name: dto.name.into(),
            location: Point::new(dto.lng, dto.lat),
        }
    }
}

impl TryFrom<SearchResultDto> for SearchResult {
    type Error = TransitError;

    fn try_from(dto: SearchResultDto) -> Result<Self> {
        let train_legs = dto
            .train_legs
            .into_iter()
            .map(TrainLeg::try_from)
            .collect::<Result<Vec<_>>>()?;
        let walk_legs = dto
            .walk_legs
            .into_iter()
            .map(WalkLeg::try_from)
            .collect::<Result<Vec<_>>>()?;

        let lowest_connection_id = match dto.lowest_connection_id {
            Some(id) => ConnectionId(id),
            None => lowest_connection_id(&train_legs, &walk_legs).unwrap_or_default(),
        };

        Ok(SearchResult {
            train_legs,
            walk_legs,
            stations: dto.stations.into_iter().map(Station::from).collect(),
            lowest_connection_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: &str = r#"{
        "train_legs": [{
            "coordinates": [50.107, 8.663, 50.943, 6.958],
            "color": 0,
            "trips": [{
                "trip": {
                    "station_id": "8000105",
                    "train_nr": 27,
                    "time": 1700000000,
                    "target_station_id": "8000207",
                    "target_time": 1700004000,
                    "line_id": "ICE"
                },
                "connection_ids": [5, 6]
            }]
        }],
        "walk_legs": [{
            "polyline": [50.943, 6.958, 50.941, 6.957],
            "color": 3,
            "connection_ids": [6],
            "error": "no footpath"
        }],
        "stations": [{ "id": "8000105", "name": "Frankfurt Hbf", "lat": 50.107, "lng": 8.663 }]
    }"#;

    #[test]
    fn test_parse_sample() {
        let result = from_json(SAMPLE).unwrap();

        assert_eq!(result.train_legs.len(), 1);
        assert_eq!(result.walk_legs.len(), 1);
        assert!(result.walk_legs[0].has_error());
        assert_eq!(result.lowest_connection_id, ConnectionId(5));
        assert_eq!(result.stations[0].name.as_ref(), "Frankfurt Hbf");

        let first = result.train_legs[0].geometry.0[0];
        assert_relative_eq!(first.x, 8.663);
        assert_relative_eq!(first.y, 50.107);
    }

    #[test]
    fn test_explicit_lowest_connection_id_wins() {
        let result = from_json(r#"{ "lowest_connection_id": 2 }"#).unwrap();
        assert_eq!(result.lowest_connection_id, ConnectionId(2));
        assert!(result.is_empty());
    }

    #[test]
    fn test_odd_coordinate_array() {
        assert!(matches!(
            lat_lng_line(&[50.0, 8.0, 51.0]),
            Err(TransitError::InvalidData(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            from_json("{ not json"),
            Err(TransitError::SerializationError(_))
        ));
    }
}
