//! # Introduction
//!
//! tinyview scans and parses programs in TINY, a small teaching language,
//! and lays the resulting syntax tree out for drawing. Control-flow nesting
//! is drawn top to bottom while statement sequences run left to right, so
//! the shape of the picture follows the shape of the program.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → Tokens → Parser → Syntax tree → Layout → Geometry → JSON | SVG | TUI
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds the syntax tree, where
//!    each statement carries its successor as a trailing child.
//! 2. [`layout`] — separates nested from chained children and computes a
//!    box per node and an edge per link.
//! 3. [`export`] — JSON and SVG writers over the geometry.
//! 4. [`config`] — layout spacing and viewer settings.
//! 5. [`ui`] — ratatui-based viewer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use tinyview::{layout::layout_default, parser::parse_source};
//!
//! let root = parse_source("read x; write x * 2").unwrap();
//! let geometry = layout_default(&root);
//! assert_eq!(geometry.boxes.len(), 4);
//! ```

pub mod config;
pub mod export;
pub mod layout;
pub mod parser;
pub mod ui;
