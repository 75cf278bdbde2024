//! Text entry for new and edited waypoints

pub mod parser;
pub mod validation;
pub mod form;
pub mod error;

pub use parser::parse_decimal;
pub use validation::{CoordinateValidator, ValidationPolicy};
pub use form::{WaypointDraft, WaypointForm};
pub use error::{InputError, InputResult};
