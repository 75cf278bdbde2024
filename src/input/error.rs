//! Input rejection reasons

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field}: '{text}' is not a number")]
    Unparsable { field: String, text: String },
    #[error("{field}: value must be finite")]
    NonFinite { field: String },
    #[error("{field}: {value} is outside {min}..={max}")]
    OutOfRange { field: String, value: f64, min: f64, max: f64 },
    #[error("depth {depth} m is above the surface")]
    NegativeDepth { depth: f64 },
}

pub type InputResult<T> = Result<T, InputError>;
