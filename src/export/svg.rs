// SVG export of layout geometry

use crate::config::{defaults, LayoutConfig};
use crate::layout::{DrawBox, EdgeKind, Geometry, Shape};

const STROKE: &str = "#2f3542";
const STATEMENT_FILL: &str = "#dfe6f0";
const EXPRESSION_FILL: &str = "#f4ead5";
const CHAIN_DASH: &str = "6 4";

/// Render `geometry` as a standalone SVG document.
///
/// The drawing is offset by a fixed margin; the label font is sized from the
/// configured node height.
pub fn to_svg(geometry: &Geometry, config: &LayoutConfig) -> String {
    let margin = defaults::MARGIN;
    let width = geometry.width + 2.0 * margin;
    let height = geometry.height + 2.0 * margin;
    let font_size = (config.normalized().node_height * 0.45).max(6.0);

    let mut out = String::new();
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        num(width),
        num(height),
        num(width),
        num(height)
    ));
    out.push('\n');
    out.push_str(&format!(
        r#"<g transform="translate({},{})" stroke="{}" fill="none" font-family="monospace" font-size="{}">"#,
        num(margin),
        num(margin),
        STROKE,
        num(font_size)
    ));
    out.push('\n');

    for edge in &geometry.edges {
        let dash = match edge.kind {
            EdgeKind::Nesting => String::new(),
            EdgeKind::Chain => format!(r#" stroke-dasharray="{}""#, CHAIN_DASH),
        };
        out.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            num(edge.from.x),
            num(edge.from.y),
            num(edge.to.x),
            num(edge.to.y),
            dash
        ));
        out.push('\n');
    }

    for draw_box in &geometry.boxes {
        write_box(&mut out, draw_box);
    }

    out.push_str("</g>\n</svg>\n");
    out
}

fn write_box(out: &mut String, b: &DrawBox) {
    let center = b.center();
    match b.shape {
        Shape::Rectangle => {
            out.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                num(b.x),
                num(b.y),
                num(b.width),
                num(b.height),
                STATEMENT_FILL
            ));
            out.push('\n');
        }
        Shape::Ellipse => {
            out.push_str(&format!(
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{}"/>"#,
                num(center.x),
                num(center.y),
                num(b.width / 2.0),
                num(b.height / 2.0),
                EXPRESSION_FILL
            ));
            out.push('\n');
        }
    }
    out.push_str(&format!(
        r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="central" stroke="none" fill="{}">{}</text>"#,
        num(center.x),
        num(center.y),
        STROKE,
        escape(&b.label)
    ));
    out.push('\n');
}

/// Coordinates with at most two decimals and no trailing zeros
fn num(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
