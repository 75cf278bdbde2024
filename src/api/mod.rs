//! Session-level API driven by map and form events
//!
//! [`MapSession`] is the single entry point a UI shell calls from its event
//! callbacks: long-press, pin drag, form submission and list deletion. It
//! owns the store and the rendered layer and produces every render pass.

pub mod types;
pub mod formatting;
pub mod session;

pub use types::{ApiError, ApiResult};
pub use formatting::{list_rows, ListRow};
pub use crate::render::annotation_title;
pub use session::{DragTarget, MapSession};
