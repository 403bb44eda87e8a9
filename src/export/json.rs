// JSON export of layout geometry

use crate::config::LayoutConfig;
use crate::layout::Geometry;
use serde::Serialize;

/// Geometry together with the spacing it was computed with
#[derive(Debug, Serialize)]
pub struct LayoutDocument<'a> {
    pub config: &'a LayoutConfig,
    pub geometry: &'a Geometry,
}

/// Pretty-printed JSON of `geometry`
pub fn to_json(geometry: &Geometry) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(geometry)
}

/// Pretty-printed JSON of `geometry`, with `config` alongside
pub fn to_json_document(
    geometry: &Geometry,
    config: &LayoutConfig,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&LayoutDocument { config, geometry })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout_default;
    use crate::parser::parse_source;
    use serde_json::Value;

    #[test]
    fn test_json_lists_boxes_and_edges() {
        let geometry = layout_default(&parse_source("read x; write x").unwrap());
        let value: Value = serde_json::from_str(&to_json(&geometry).unwrap()).unwrap();

        let boxes = value["boxes"].as_array().unwrap();
        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0]["label"], "read (x)");
        assert_eq!(boxes[0]["kind"], "Read");
        assert_eq!(boxes[0]["shape"], "rectangle");
        assert_eq!(boxes[2]["shape"], "ellipse");

        let edges = value["edges"].as_array().unwrap();
        assert_eq!(edges[0]["kind"], "chain");
        assert_eq!(edges[1]["kind"], "nesting");
        assert!(value.get("index").is_none());
    }

    #[test]
    fn test_document_embeds_config() {
        let config = LayoutConfig::default();
        let geometry = layout_default(&parse_source("read x").unwrap());
        let value: Value =
            serde_json::from_str(&to_json_document(&geometry, &config).unwrap()).unwrap();

        assert_eq!(value["config"]["unit_width"], config.unit_width);
        assert_eq!(value["geometry"]["width"], config.unit_width);
    }
}
