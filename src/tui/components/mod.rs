//! TUI Components - shared styling

pub mod style_manager;

pub use style_manager::StyleManager;
