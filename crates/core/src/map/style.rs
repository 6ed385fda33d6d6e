use palette::Srgb;
use serde_json::json;

use crate::map::{LayerKind, LayerSpec};

/// Qualitative "Paired" scheme from colorbrewer2.org, 12 classes
pub const PALETTE: [Srgb<u8>; 12] = [
    Srgb::new(0x1f, 0x78, 0xb4),
    Srgb::new(0x33, 0xa0, 0x2c),
    Srgb::new(0xe3, 0x1a, 0x1c),
    Srgb::new(0xff, 0x7f, 0x00),
    Srgb::new(0x6a, 0x3d, 0x9a),
    Srgb::new(0xb1, 0x59, 0x28),
    Srgb::new(0xa6, 0xce, 0xe3),
    Srgb::new(0xb2, 0xdf, 0x8a),
    Srgb::new(0xfb, 0x9a, 0x99),
    Srgb::new(0xfd, 0xbf, 0x6f),
    Srgb::new(0xca, 0xb2, 0xd6),
    Srgb::new(0xff, 0xff, 0x99),
];

/// Base color for an upstream color index. Indices past the palette wrap around.
pub fn palette_color(index: usize) -> Srgb<u8> {
    PALETTE[index % PALETTE.len()]
}

/// Color for a signed slot offset, e.g. a connection id relative to the lowest id
pub fn palette_slot(offset: i64) -> Srgb<u8> {
    PALETTE[offset.rem_euclid(PALETTE.len() as i64) as usize]
}

/// `#rrggbb`, the form paint expressions and GeoJSON properties expect
pub fn hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Paint settings for the connection overlay's layers
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionsStyle {
    pub line_width: f64,
    pub highlight_line_width: f64,
    pub station_radius: f64,
    pub station_color: Srgb<u8>,
    pub station_stroke_color: Srgb<u8>,
    pub station_stroke_width: f64,
}

impl Default for ConnectionsStyle {
    fn default() -> Self {
        Self {
            line_width: 5.0,
            highlight_line_width: 10.0,
            station_radius: 2.25,
            station_color: Srgb::new(0xff, 0x00, 0xff),
            station_stroke_color: Srgb::new(0x33, 0x33, 0x33),
            station_stroke_width: 2.0,
        }
    }
}

impl ConnectionsStyle {
    /// Segment lines. Feature state overrides the base color and widens the line.
    pub fn line_layer(&self, id: &str, source: &str) -> LayerSpec {
        LayerSpec {
            id: id.to_owned(),
            kind: LayerKind::Line,
            source: source.to_owned(),
            layout: json!({
                "line-join": "round",
                "line-cap": "round",
            }),
            paint: json!({
                "line-color": ["string", ["feature-state", "color"], ["get", "color"]],
                "line-width": [
                    "case",
                    ["boolean", ["feature-state", "highlight"], false],
                    self.highlight_line_width,
                    self.line_width,
                ],
            }),
        }
    }

    pub fn station_layer(&self, id: &str, source: &str) -> LayerSpec {
        LayerSpec {
            id: id.to_owned(),
            kind: LayerKind::Circle,
            source: source.to_owned(),
            layout: json!({}),
            paint: json!({
                "circle-color": hex(self.station_color),
                "circle-radius": self.station_radius,
                "circle-stroke-color": hex(self.station_stroke_color),
                "circle-stroke-width": self.station_stroke_width,
            }),
        }
    }
}
