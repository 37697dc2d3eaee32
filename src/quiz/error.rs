use thiserror::Error;

use super::session::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("multiplication factor {0} is outside of 2..=12")]
    FactorOutOfRange(u32),
    #[error("{0} is not one of the offered question counts")]
    UnsupportedQuestionCount(usize),
}

/// An operation was invoked in a phase that has no such edge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("the game can only be started from setup (currently {0:?})")]
    NotInSetup(Phase),
    #[error("no question is waiting for an answer (currently {0:?})")]
    NotAwaitingAnswer(Phase),
    #[error("there is no result to acknowledge (currently {0:?})")]
    NoResultShown(Phase),
}
