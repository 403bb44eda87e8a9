// Configuration for layout geometry and the terminal viewer

use serde::Serialize;

/// Default values, in abstract layout units
pub mod defaults {
    /// Horizontal band reserved for a node without nested children
    pub const UNIT_WIDTH: f64 = 64.0;
    /// Vertical distance between a node's row and its nested children's row
    pub const LEVEL_HEIGHT: f64 = 64.0;
    /// Space between a node's footprint and its chained sibling
    pub const CHAIN_GAP: f64 = 32.0;

    pub const NODE_WIDTH: f64 = 52.0;
    pub const NODE_HEIGHT: f64 = 28.0;

    /// Padding around the whole drawing in exported documents
    pub const MARGIN: f64 = 16.0;

    /// Viewer zoom limits and step factor
    pub const MIN_ZOOM: f64 = 0.1;
    pub const MAX_ZOOM: f64 = 8.0;
    pub const ZOOM_STEP: f64 = 1.25;
    /// Fraction of the visible extent moved per pan keystroke
    pub const PAN_FRACTION: f64 = 0.1;
}

/// Spacing parameters of the tree layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutConfig {
    pub unit_width: f64,
    pub level_height: f64,
    pub chain_gap: f64,
    pub node_width: f64,
    pub node_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            unit_width: defaults::UNIT_WIDTH,
            level_height: defaults::LEVEL_HEIGHT,
            chain_gap: defaults::CHAIN_GAP,
            node_width: defaults::NODE_WIDTH,
            node_height: defaults::NODE_HEIGHT,
        }
    }
}

impl LayoutConfig {
    /// Keep boxes inside their bands and rows.
    ///
    /// Node boxes are clamped to the unit band and the level height so that
    /// sibling boxes never overlap however the spacing was overridden.
    pub fn normalized(mut self) -> Self {
        self.unit_width = self.unit_width.max(1.0);
        self.level_height = self.level_height.max(1.0);
        self.chain_gap = self.chain_gap.max(0.0);
        self.node_width = self.node_width.clamp(1.0, self.unit_width);
        self.node_height = self.node_height.clamp(1.0, self.level_height);
        self
    }
}

/// Settings of the interactive viewer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub zoom_step: f64,
    pub pan_fraction: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            zoom_step: defaults::ZOOM_STEP,
            pan_fraction: defaults::PAN_FRACTION,
            min_zoom: defaults::MIN_ZOOM,
            max_zoom: defaults::MAX_ZOOM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_boxes_fit_their_band() {
        let config = LayoutConfig::default();
        assert!(config.node_width <= config.unit_width);
        assert!(config.node_height <= config.level_height);
        assert_eq!(config.normalized(), config);
    }

    #[test]
    fn test_normalized_clamps_node_size() {
        let config = LayoutConfig {
            unit_width: 20.0,
            level_height: 10.0,
            chain_gap: -5.0,
            ..LayoutConfig::default()
        }
        .normalized();

        assert_eq!(config.node_width, 20.0);
        assert_eq!(config.node_height, 10.0);
        assert_eq!(config.chain_gap, 0.0);
    }
}
