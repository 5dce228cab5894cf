use thiserror::Error;

/// Errors raised by tabulated functions and the operators built on them.
///
/// Every variant is reported at the call site that detects it; nothing in
/// the crate retries or recovers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    /// Fewer than two samples were supplied, or a removal would leave fewer than two.
    #[error("a tabulated function needs at least 2 points, got {count}")]
    NotEnoughPoints { count: usize },

    #[error("x and y arrays differ in length ({x_len} vs {y_len})")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("x values are not strictly increasing at index {index}")]
    NotStrictlyIncreasing { index: usize },

    #[error("index {index} is out of range for {count} points")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("x = {x} lies below the left bound {left_bound}")]
    BelowLeftBound { x: f64, left_bound: f64 },

    /// Step of a stepped differential operator is zero, negative, NaN or infinite.
    #[error("invalid differential step {0}")]
    InvalidStep(f64),

    #[error("inconsistent functions: point counts differ ({left} vs {right})")]
    InconsistentCount { left: usize, right: usize },

    #[error("inconsistent functions: x values differ at index {index} ({left_x} vs {right_x})")]
    InconsistentGrid { index: usize, left_x: f64, right_x: f64 },

    #[error("division by a value near zero at index {index} (x = {x})")]
    DivisionByZero { index: usize, x: f64 },

    #[error("x must not be NaN")]
    NotANumber,

    #[error("x = {0} is not finite")]
    NotFinite(f64),

    /// Sampling bounds, or the distance between them, are not finite.
    #[error("cannot sample over [{from}, {to}]")]
    InvalidRange { from: f64, to: f64 },

    #[error("function is read-only")]
    Unmodifiable,
}
