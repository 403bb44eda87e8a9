//! Syntax tree pane
//!
//! Draws layout [`Geometry`] on a ratatui [`Canvas`]. Layout coordinates
//! grow downwards while canvas coordinates grow upwards, so every y value is
//! flipped against the geometry height before drawing. Statements are
//! rectangles, expressions ellipses; chain edges are dashed.

use crate::config::{defaults, ViewerConfig};
use crate::layout::{DrawBox, EdgeKind, Geometry, Point, Shape};
use crate::parser::ast::NodeId;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points, Rectangle},
        Block, Borders, Paragraph, Wrap,
    },
    Frame,
};

const ELLIPSE_SEGMENTS: usize = 48;
const DASH_LENGTH: f64 = 6.0;
const DASH_GAP: f64 = 4.0;

/// Camera over the geometry: the point shown in the middle and a zoom factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeView {
    pub center: Point,
    pub zoom: f64,
}

impl TreeView {
    /// Whole drawing in view
    pub fn fit(geometry: &Geometry) -> Self {
        Self {
            center: Point::new(geometry.width / 2.0, geometry.height / 2.0),
            zoom: 1.0,
        }
    }

    /// Visible width and height in layout units, before aspect correction
    pub fn extent(&self, geometry: &Geometry) -> (f64, f64) {
        let margin = 2.0 * defaults::MARGIN;
        (
            (geometry.width + margin) / self.zoom,
            (geometry.height + margin) / self.zoom,
        )
    }

    /// Move by a number of pan steps along each axis.
    pub fn pan(&mut self, steps_x: f64, steps_y: f64, geometry: &Geometry, config: &ViewerConfig) {
        let (width, height) = self.extent(geometry);
        self.center.x += steps_x * config.pan_fraction * width;
        self.center.y += steps_y * config.pan_fraction * height;
    }

    pub fn zoom_in(&mut self, config: &ViewerConfig) {
        self.zoom = (self.zoom * config.zoom_step).clamp(config.min_zoom, config.max_zoom);
    }

    pub fn zoom_out(&mut self, config: &ViewerConfig) {
        self.zoom = (self.zoom / config.zoom_step).clamp(config.min_zoom, config.max_zoom);
    }

    pub fn focus(&mut self, draw_box: &DrawBox) {
        self.center = draw_box.center();
    }

    /// Canvas x and y bounds for a pane whose width is `aspect` times its
    /// height (in layout units).
    pub fn bounds(&self, geometry: &Geometry, aspect: f64) -> ([f64; 2], [f64; 2]) {
        let (width, height) = self.extent(geometry);
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        let (width, height) = if width / height > aspect {
            (width, width / aspect)
        } else {
            (height * aspect, height)
        };
        let top = self.center.y - height / 2.0;
        (
            [self.center.x - width / 2.0, self.center.x + width / 2.0],
            [flip(geometry, top + height), flip(geometry, top)],
        )
    }
}

fn flip(geometry: &Geometry, y: f64) -> f64 {
    geometry.height - y
}

/// Split the segment `from`-`to` into dashes.
fn dashes(from: Point, to: Point, dash: f64, gap: f64) -> Vec<(Point, Point)> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length <= dash || dash <= 0.0 {
        return vec![(from, to)];
    }

    let (ux, uy) = (dx / length, dy / length);
    let mut segments = Vec::new();
    let mut start = 0.0;
    while start < length {
        let end = (start + dash).min(length);
        segments.push((
            Point::new(from.x + ux * start, from.y + uy * start),
            Point::new(from.x + ux * end, from.y + uy * end),
        ));
        start = end + gap;
    }
    segments
}

fn ellipse_points(draw_box: &DrawBox, geometry: &Geometry) -> Vec<(f64, f64)> {
    let center = draw_box.center();
    let (rx, ry) = (draw_box.width / 2.0, draw_box.height / 2.0);
    (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let angle = i as f64 / ELLIPSE_SEGMENTS as f64 * std::f64::consts::TAU;
            (
                center.x + rx * angle.cos(),
                flip(geometry, center.y + ry * angle.sin()),
            )
        })
        .collect()
}

fn draw_line(ctx: &mut Context, geometry: &Geometry, from: Point, to: Point, color: Color) {
    ctx.draw(&CanvasLine {
        x1: from.x,
        y1: flip(geometry, from.y),
        x2: to.x,
        y2: flip(geometry, to.y),
        color,
    });
}

/// Render the tree pane, or `error` when there is no tree to draw.
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    geometry: Option<&Geometry>,
    error: Option<&str>,
    view: &TreeView,
    selected: Option<NodeId>,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Syntax Tree ({:.0}%) ", view.zoom * 100.0))
        .borders(Borders::ALL)
        .border_style(border_style);

    let geometry = match (geometry, error) {
        (Some(geometry), None) => geometry,
        _ => {
            let message = error.unwrap_or("Nothing to draw");
            let paragraph = Paragraph::new(Line::from(Span::styled(
                message.to_string(),
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            )))
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let inner_width = area.width.saturating_sub(2).max(1) as f64;
    let inner_height = area.height.saturating_sub(2).max(1) as f64;
    // Terminal cells are about twice as tall as they are wide
    let aspect = inner_width / (2.0 * inner_height);
    let (x_bounds, y_bounds) = view.bounds(geometry, aspect);
    let cell_width = (x_bounds[1] - x_bounds[0]) / inner_width;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            for edge in &geometry.edges {
                match edge.kind {
                    EdgeKind::Nesting => {
                        draw_line(ctx, geometry, edge.from, edge.to, DEFAULT_THEME.nesting_edge)
                    }
                    EdgeKind::Chain => {
                        for (from, to) in dashes(edge.from, edge.to, DASH_LENGTH, DASH_GAP) {
                            draw_line(ctx, geometry, from, to, DEFAULT_THEME.chain_edge);
                        }
                    }
                }
            }

            for draw_box in &geometry.boxes {
                let is_selected = selected == Some(draw_box.node);
                let color = match (is_selected, draw_box.shape) {
                    (true, _) => DEFAULT_THEME.selected,
                    (false, Shape::Rectangle) => DEFAULT_THEME.statement,
                    (false, Shape::Ellipse) => DEFAULT_THEME.expression,
                };
                match draw_box.shape {
                    Shape::Rectangle => ctx.draw(&Rectangle {
                        x: draw_box.x,
                        y: flip(geometry, draw_box.bottom()),
                        width: draw_box.width,
                        height: draw_box.height,
                        color,
                    }),
                    Shape::Ellipse => ctx.draw(&Points {
                        coords: &ellipse_points(draw_box, geometry),
                        color,
                    }),
                }
            }

            ctx.layer();
            for draw_box in &geometry.boxes {
                let center = draw_box.center();
                let half_label = draw_box.label.chars().count() as f64 * cell_width / 2.0;
                let mut style = Style::default().fg(DEFAULT_THEME.fg);
                if selected == Some(draw_box.node) {
                    style = style.fg(DEFAULT_THEME.selected).add_modifier(Modifier::BOLD);
                }
                ctx.print(
                    center.x - half_label,
                    flip(geometry, center.y),
                    Span::styled(draw_box.label.clone(), style),
                );
            }
        });

    frame.render_widget(canvas, area);
}
