//! Turns strokes into vertex data for a renderer.

mod ribbon;
pub use ribbon::*;
