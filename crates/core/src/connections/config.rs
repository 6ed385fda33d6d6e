use crate::map::style::ConnectionsStyle;

pub const DEFAULT_ID_PREFIX: &str = "railviz-connections";

/// Settings for one connection overlay instance.
///
/// Every source and layer id is derived from `id_prefix`, so two overlays on
/// the same surface need different prefixes.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    pub id_prefix: String,
    pub style: ConnectionsStyle,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_owned(),
            style: ConnectionsStyle::default(),
        }
    }
}

impl OverlayConfig {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            id_prefix: prefix.into(),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: ConnectionsStyle) -> Self {
        self.style = style;
        self
    }

    pub(crate) fn ids(&self) -> OverlayIds {
        OverlayIds {
            source: self.id_prefix.clone(),
            line_layer: format!("{}-line", self.id_prefix),
            station_source: format!("{}-stations", self.id_prefix),
            station_layer: format!("{}-stations", self.id_prefix),
        }
    }
}

/// Source and layer ids owned by an overlay
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayIds {
    pub source: String,
    pub line_layer: String,
    pub station_source: String,
    pub station_layer: String,
}
