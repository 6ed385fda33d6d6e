use anyhow::{Context, Result};
use geojson::{FeatureCollection, GeoJson};
use railviz_core::map::memory::MemorySurface;
use railviz_core::map::promoted_id;
use railviz_core::map::style::hex;
use std::path::Path;

/// Features of `source` with their current feature state merged into the properties
pub fn rendered_collection(surface: &MemorySurface, source: &str) -> FeatureCollection {
    let mut collection = surface
        .source_data(source)
        .cloned()
        .unwrap_or_else(railviz_core::map::empty_collection);

    for feature in &mut collection.features {
        let state = promoted_id(feature)
            .and_then(|id| surface.feature_state(source, id))
            .unwrap_or_default();

        let properties = feature.properties.get_or_insert_with(Default::default);
        properties.insert("highlight".to_string(), serde_json::json!(state.highlight));
        if let Some(color) = state.color {
            properties.insert("highlight_color".to_string(), serde_json::json!(hex(color)));
        }
    }

    collection
}

/// Write a feature collection as pretty-printed GeoJSON
pub fn write_geojson(collection: FeatureCollection, output_path: &Path) -> Result<()> {
    log::info!(
        "Writing {} features to {}",
        collection.features.len(),
        output_path.display()
    );

    let geojson = GeoJson::from(collection);
    let json_string =
        serde_json::to_string_pretty(&geojson).context("Failed to serialize GeoJSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))?;

    Ok(())
}
