//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and error line marker
//! - [`tokens`]: Scanner output, one token per line
//! - [`tree`]: Canvas drawing of the laid out syntax tree, and the view camera
//! - [`status`]: Status bar with keybindings and tree state
//!
//! Each pane module exports a primary `render_*` function. Panes hold no
//! state of their own; scroll offsets and the tree camera live in
//! [`App`](crate::ui::App).

pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

// Re-export render functions for convenience
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use tree::{render_tree_pane, TreeView};
