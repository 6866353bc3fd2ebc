//! Terminal presentation layer for the glide engine.
//!
//! Implements the engine's `ViewAdapter` over a shared glyph store,
//! renders it with ratatui, and provides the interactive demo loop.

pub mod adapter;
pub mod render;
pub mod runtime;
pub mod store;
pub mod terminal;

pub use adapter::TuiViewAdapter;
pub use runtime::{DemoOptions, run_demo};
pub use store::VisualStore;
