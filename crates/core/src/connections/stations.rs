use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value, feature::Id};
use railviz_transit::Station;

/// One point feature per station, ids in input order
pub fn station_collection(stations: &[Station]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: stations.iter().enumerate().map(|(i, s)| station_feature(i, s)).collect(),
        foreign_members: None,
    }
}

fn station_feature(index: usize, station: &Station) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), serde_json::json!(index));
    properties.insert("station_id".to_string(), serde_json::json!(station.id.as_str()));
    properties.insert("name".to_string(), serde_json::json!(station.name.as_ref()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            station.location.x(),
            station.location.y(),
        ]))),
        id: Some(Id::Number(index.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}
