//! Input validation failures for the generic reverse search

use thiserror::Error;

/// Invalid-argument failures, all raised before any search work begins.
///
/// The three transition/acceptance callbacks cannot be absent: they are
/// non-optional parameters of [`crate::reverse::reverse_hash`], so the
/// remaining representable failures are the ones below.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The alphabet contained no symbols.
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,
    /// The terminal state equals the state type's default value, which is
    /// indistinguishable from an absent terminal state.
    #[error("terminal state must differ from the state type's default value")]
    DefaultTerminalState,
    /// The depth bound was zero.
    #[error("maximum string length must be positive")]
    ZeroMaxStringLength,
}
