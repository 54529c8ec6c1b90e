//! State shared between components that is not dashboard data

pub mod ui;

pub use ui::*;
