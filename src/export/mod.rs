//! Writers that turn layout [`Geometry`](crate::layout::Geometry) into files
//!
//! - [`json`]: the geometry as pretty JSON, for external renderers
//! - [`svg`]: a standalone SVG drawing

pub mod json;
pub mod svg;

pub use json::{to_json, to_json_document, LayoutDocument};
pub use svg::to_svg;
