use anyhow::{bail, Context, Result};
use clap::Parser;
use geo::Point;
use railviz_core::map::memory::MemorySurface;
use railviz_core::{ConnectionId, ConnectionsOverlay, MapSurface, PickedLeg};
use railviz_transit::Leg;
use std::path::PathBuf;

mod output;

use output::{rendered_collection, write_geojson};

#[derive(Parser, Debug)]
#[command(
    name = "railviz-inspect",
    author,
    version,
    about = "Render a railway search result into connection overlay GeoJSON",
    long_about = "Loads a search result (train legs, walk legs, stations) from JSON, draws it \
                  the way the map overlay does and writes the segment lines as GeoJSON.\n\n\
                  Connections passed with --highlight are highlighted first; their color is \
                  written to the `highlight_color` property of every segment they use."
)]
struct Args {
    /// Input search result JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Output GeoJSON file for the segment lines
    #[arg(short, long)]
    output: PathBuf,

    /// Also output the station points to this file
    #[arg(long)]
    stations_output: Option<PathBuf>,

    /// Connection ids to highlight, comma separated
    #[arg(long, value_delimiter = ',')]
    highlight: Vec<u32>,

    /// Report the leg under this position, given as `lng,lat`
    #[arg(long, value_parser = parse_position, allow_hyphen_values = true)]
    pick: Option<Point>,

    /// Pick radius in meters
    #[arg(long, default_value = "20")]
    pick_radius: f64,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_position(s: &str) -> Result<Point, String> {
    let (lng, lat) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `lng,lat`, got `{s}`"))?;
    let lng: f64 = lng.trim().parse().map_err(|e| format!("invalid longitude: {e}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("invalid latitude: {e}"))?;

    if !(-180.0..=180.0).contains(&lng) || !(-90.0..=90.0).contains(&lat) {
        return Err(format!("position out of range: {lng},{lat}"));
    }
    Ok(Point::new(lng, lat))
}

fn describe(leg: PickedLeg<'_>) -> String {
    match leg {
        PickedLeg::Train(leg) => {
            let trains = leg
                .trips
                .iter()
                .map(|t| format!("{} {}", t.trip.line_id, t.trip.train_nr))
                .collect::<Vec<_>>()
                .join(", ");
            format!("train leg ({trains}) used by connections {:?}", leg.connection_ids())
        }
        PickedLeg::Walk(leg) => {
            format!("walk leg used by connections {:?}", leg.connection_ids())
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    log::info!("=== Railviz Inspect ===");
    log::info!("Input: {}", args.input.display());
    log::info!("Output: {}", args.output.display());

    if !args.input.exists() {
        bail!("Input file does not exist: {}", args.input.display());
    }
    if args.pick_radius < 0.0 || !args.pick_radius.is_finite() {
        bail!("Pick radius must be a non-negative number, got {}", args.pick_radius);
    }

    let json = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let result = railviz_transit::wire::from_json(&json).context("Failed to parse search result")?;
    log::info!(
        "Loaded {} train legs, {} walk legs, {} stations",
        result.train_legs.len(),
        result.walk_legs.len(),
        result.stations.len()
    );

    let mut overlay = ConnectionsOverlay::default();
    overlay.attach(MemorySurface::new(), None);
    overlay.set_result(result);
    log::info!(
        "Drew {} segments for {} connections",
        overlay.segments().len(),
        overlay.index().connection_count()
    );

    if !args.highlight.is_empty() {
        let active: Vec<ConnectionId> = args.highlight.iter().copied().map(ConnectionId).collect();
        let unknown: Vec<u32> = args
            .highlight
            .iter()
            .copied()
            .filter(|id| overlay.index().segments_of(ConnectionId(*id)).is_empty())
            .collect();
        if !unknown.is_empty() {
            log::warn!("Connections without segments: {:?}", unknown);
        }

        overlay.highlight(&active);
    }

    if let Some(position) = args.pick {
        let surface = overlay.surface().context("Overlay lost its surface")?;
        let hits = surface.query_rendered_features(position, args.pick_radius);

        match overlay.resolve_picked_leg(&hits) {
            Some(leg) => log::info!("Picked {}", describe(leg)),
            None => log::info!(
                "Nothing within {} m of {},{}",
                args.pick_radius,
                position.x(),
                position.y()
            ),
        }
    }

    let surface = overlay.surface().context("Overlay lost its surface")?;
    write_geojson(rendered_collection(surface, &overlay.ids().source), &args.output)?;

    if let Some(path) = &args.stations_output {
        write_geojson(rendered_collection(surface, &overlay.ids().station_source), path)?;
    }

    log::info!("Done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        let point = parse_position("8.663, 50.107").unwrap();
        assert_eq!(point.x(), 8.663);
        assert_eq!(point.y(), 50.107);

        assert!(parse_position("-73.98,40.75").is_ok());
    }

    #[test]
    fn test_parse_position_rejects_garbage() {
        assert!(parse_position("8.663").is_err());
        assert!(parse_position("east,50").is_err());
        assert!(parse_position("50.107,181").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "railviz-inspect",
            "-i",
            "in.json",
            "-o",
            "out.geojson",
            "--highlight",
            "5,6",
            "--pick",
            "8.663,50.107",
        ])
        .unwrap();

        assert_eq!(args.highlight, vec![5, 6]);
        assert_eq!(args.pick, Some(Point::new(8.663, 50.107)));
        assert_eq!(args.pick_radius, 20.0);
    }
}
