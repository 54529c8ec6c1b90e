//! marks-ui - View components for the bookmarks app
//!
//! Components here are props-driven: they render state they are handed and
//! report intents through callbacks. Talking to the backend is the web
//! app's job.

pub mod components;
pub mod stores;
pub mod utils;
pub mod wasm_utils;

pub use components::*;
