use thiserror::Error;

/// Errors raised while building paint sources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaintError {
    /// Colors and stop positions are not parallel non-empty sequences.
    #[error("invalid gradient spec: {colors} color(s) for {positions} position(s)")]
    InvalidGradientSpec { colors: usize, positions: usize },
}
