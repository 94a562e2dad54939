use thiserror::Error;

use crate::Action;

/// Errors raised by the rules engine.
///
/// `InsufficientTiles` and `ConservationViolation` mean the engine itself is
/// broken; callers should abort the game rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("action {0:?} is not legal in the current state")]
    IllegalAction(Action),

    #[error("the game is already over")]
    GameOver,

    #[error("bag and discard hold {available} tiles but {requested} were requested")]
    InsufficientTiles { requested: usize, available: usize },

    #[error("tile conservation violated: counted {found} colored tiles, expected {expected}")]
    ConservationViolation { found: usize, expected: usize },
}
