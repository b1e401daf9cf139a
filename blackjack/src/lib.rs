mod error;
pub mod strategy;
pub mod table;

pub use error::{BetRejection, GameError};
pub use table::card::{Card, Rank, Suit};
pub use table::deck::Deck;
pub use table::hand::{hand_value, is_natural, is_soft, Hand};
pub use table::settlement::{determine_winner, Outcome};
pub use table::{DealerStep, Phase, RoundState, Table, MAX_CARDS_PER_ROUND};

/// Table rules. Everything the round state machine needs to know about the house.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub starting_balance: u32,
    /// A fresh deck is shuffled in when fewer cards than this remain between rounds.
    pub reshuffle_threshold: usize,
    pub dealer_stand_value: u16,
    /// Profit paid on a natural, as a multiple of the bet. The stake is returned on top.
    pub payout_blackjack: f64,
}

impl Default for Rule {
    fn default() -> Self {
        Rule {
            starting_balance: 1000,
            reshuffle_threshold: 10,
            dealer_stand_value: 17,
            payout_blackjack: 1.5,
        }
    }
}

impl Rule {
    /// The initial deal takes four cards, so the threshold must cover at least that.
    pub fn validate(&self) -> Result<(), GameError> {
        if !(4..=Deck::SIZE).contains(&self.reshuffle_threshold) {
            return Err(GameError::InvalidRule(format!(
                "reshuffle_threshold must be in [4, {}], got {}",
                Deck::SIZE,
                self.reshuffle_threshold
            )));
        }
        if !(2..=21).contains(&self.dealer_stand_value) {
            return Err(GameError::InvalidRule(format!(
                "dealer_stand_value must be in [2, 21], got {}",
                self.dealer_stand_value
            )));
        }
        if !self.payout_blackjack.is_finite() || self.payout_blackjack < 0.0 {
            return Err(GameError::InvalidRule(format!(
                "payout_blackjack must be a non-negative number, got {}",
                self.payout_blackjack
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Hit,
    Stand,
}
