use thiserror::Error;

use crate::{Card, Phase};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// The bet cannot be wagered. Recoverable: the message is meant for the player.
    #[error("{0}")]
    InvalidBet(BetRejection),

    /// A card was requested from an exhausted deck.
    #[error("the deck is empty")]
    EmptyDeck,

    #[error("{operation} is only allowed in {expected:?} phase, current phase is {actual:?}")]
    WrongPhase {
        operation: &'static str,
        expected: Phase,
        actual: Phase,
    },

    #[error("card {0} appears more than once in the stacked cards")]
    InvalidStack(Card),

    #[error("card index {0} is out of range")]
    InvalidCardIndex(u8),

    #[error("invalid rule: {0}")]
    InvalidRule(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetRejection {
    #[error("Place a bet before starting the round")]
    NoBet,

    #[error("Insufficient funds: bet {bet} exceeds balance {balance}")]
    ExceedsBalance { bet: u32, balance: u32 },
}
