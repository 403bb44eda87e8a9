//! Main TUI application state and logic

use crate::config::{LayoutConfig, ViewerConfig};
use crate::layout::{layout, Geometry, Point};
use crate::parser::{parse, scan, FrontendError, Token};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use super::panes::{
    render_source_pane, render_status_bar, render_tokens_pane, render_tree_pane, TreeView,
};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> tokens -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Tree => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// The program being viewed
    pub source_code: String,

    /// Scanner output; empty when scanning failed
    pub tokens: Vec<Token>,

    /// Laid out tree, or the first scan/parse error
    pub tree: Result<Geometry, FrontendError>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tokens_scroll: usize,

    /// Camera over the tree drawing
    pub view: TreeView,

    /// Node highlighted in the tree pane
    pub selected: Option<usize>,

    pub viewer_config: ViewerConfig,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Scan, parse and lay out `source_code`, keeping whatever phase failed
    /// as the tree result.
    pub fn new(source_code: String, layout_config: &LayoutConfig, viewer_config: ViewerConfig) -> Self {
        let (tokens, tree) = match scan(&source_code) {
            Ok(tokens) => {
                let tree = parse(&tokens)
                    .map(|root| layout(&root, layout_config))
                    .map_err(FrontendError::from);
                (tokens, tree)
            }
            Err(err) => (Vec::new(), Err(FrontendError::from(err))),
        };

        let (view, status_message) = match &tree {
            Ok(geometry) => (TreeView::fit(geometry), String::from("Ready!")),
            Err(err) => (
                TreeView {
                    center: Point::new(0.0, 0.0),
                    zoom: 1.0,
                },
                format!("Failed at {}", err.location()),
            ),
        };

        App {
            source_code,
            tokens,
            tree,
            focused_pane: FocusedPane::Tree,
            source_scroll: 0,
            tokens_scroll: 0,
            view,
            selected: None,
            viewer_config,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes above, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Left column: Source (top) | Tokens (bottom); right: Tree
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(main_chunks[0]);

        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[0]);

        let error = self.tree.as_ref().err();
        let error_text = error.map(|err| err.to_string());
        let scan_error = match error {
            Some(FrontendError::Lex(err)) => Some(err.to_string()),
            _ => None,
        };

        render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            error.map(|err| err.location().line),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_tokens_pane(
            frame,
            left_rows[1],
            &self.tokens,
            scan_error.as_deref(),
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        render_tree_pane(
            frame,
            columns[1],
            self.tree.as_ref().ok(),
            error_text.as_deref(),
            &self.view,
            self.selected,
            self.focused_pane == FocusedPane::Tree,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.tree.as_ref().ok().map(|geometry| geometry.boxes.len()),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => self.scroll_or_pan(0.0, -1.0),
            KeyCode::Down => self.scroll_or_pan(0.0, 1.0),
            KeyCode::Left => self.scroll_or_pan(-1.0, 0.0),
            KeyCode::Right => self.scroll_or_pan(1.0, 0.0),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.view.zoom_in(&self.viewer_config);
                self.status_message = format!("Zoom {:.0}%", self.view.zoom * 100.0);
            }
            KeyCode::Char('-') => {
                self.view.zoom_out(&self.viewer_config);
                self.status_message = format!("Zoom {:.0}%", self.view.zoom * 100.0);
            }
            KeyCode::Char('0') => {
                if let Ok(geometry) = &self.tree {
                    self.view = TreeView::fit(geometry);
                    self.selected = None;
                    self.status_message = "View reset".to_string();
                }
            }
            KeyCode::Char('n') => self.select_node(1),
            KeyCode::Char('p') => self.select_node(-1),
            _ => {}
        }
    }

    fn scroll_or_pan(&mut self, dx: f64, dy: f64) {
        match self.focused_pane {
            FocusedPane::Tree => {
                if let Ok(geometry) = &self.tree {
                    self.view.pan(dx, dy, geometry, &self.viewer_config);
                }
            }
            FocusedPane::Source => {
                self.source_scroll = step(self.source_scroll, dy);
            }
            FocusedPane::Tokens => {
                self.tokens_scroll = step(self.tokens_scroll, dy);
            }
        }
    }

    /// Move the selection forward or backward in pre-order, wrapping around,
    /// and center the view on it.
    fn select_node(&mut self, delta: isize) {
        let Ok(geometry) = &self.tree else {
            return;
        };
        let count = geometry.boxes.len();
        if count == 0 {
            return;
        }

        let next = match self.selected {
            Some(current) => (current as isize + delta).rem_euclid(count as isize) as usize,
            None if delta >= 0 => 0,
            None => count - 1,
        };
        self.selected = Some(next);

        if let Some(draw_box) = geometry.find(next) {
            self.view.focus(draw_box);
            self.status_message = format!(
                "#{} {} at ({:.0}, {:.0})",
                next, draw_box.label, draw_box.x, draw_box.y
            );
        }
    }
}

fn step(offset: usize, direction: f64) -> usize {
    if direction < 0.0 {
        offset.saturating_sub(1)
    } else if direction > 0.0 {
        offset.saturating_add(1)
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app(source: &str) -> App {
        App::new(source.to_string(), &LayoutConfig::default(), ViewerConfig::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app("read x");
        assert_eq!(app.focused_pane, FocusedPane::Tree);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
    }

    #[test]
    fn test_node_selection_wraps() {
        let mut app = app("read x; write x");
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.selected, Some(2));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.selected, Some(0));
        assert!(app.status_message.contains("read (x)"));

        let center = app.tree.as_ref().unwrap().find(0).unwrap().center();
        assert_eq!(app.view.center, center);
    }

    #[test]
    fn test_arrows_scroll_text_panes() {
        let mut app = app("read x");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.source_scroll, 1);
    }

    #[test]
    fn test_reset_restores_fit() {
        let mut app = app("read x; write x");
        let fit = app.view;
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('+'));
        assert_ne!(app.view, fit);
        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.view, fit);
    }

    #[test]
    fn test_parse_error_is_kept() {
        let mut app = app("read x; write");
        assert!(matches!(app.tree, Err(FrontendError::Parse(_))));
        assert_eq!(app.tokens.len(), 5);
        assert!(app.status_message.starts_with("Failed at"));

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.selected, None);
    }

    #[test]
    fn test_scan_error_leaves_no_tokens() {
        let app = app("x := 1 ! 2");
        assert!(matches!(app.tree, Err(FrontendError::Lex(_))));
        assert!(app.tokens.is_empty());
    }

    #[test]
    fn test_quit() {
        let mut app = app("read x");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
