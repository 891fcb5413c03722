//! Cursor, viewport, and edit operations over a document.
//!
//! [`EditorBuffer`] is the editing session object: it owns the document
//! and keeps cursor and scroll state consistent through every mutation.

mod buffer;
mod viewport;

pub use buffer::{Cursor, Direction, EditorBuffer};
pub use viewport::Viewport;
