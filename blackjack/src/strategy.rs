use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};

use crate::{Card, Decision, Hand};

/// Decides the player's next move while it is their turn.
pub trait Strategy {
    fn make_decision(&mut self, player_hand: &Hand, dealer_up_card: Card) -> Decision;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize_enum_str, Deserialize_enum_str)]
pub enum StrategyKind {
    Threshold,
    Basic,
}

impl StrategyKind {
    /// `stand_at` is only used by `Threshold`.
    pub fn build(self, stand_at: u16) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Threshold => Box::new(ThresholdStrategy::new(stand_at)),
            StrategyKind::Basic => Box::new(BasicStrategy::new()),
        }
    }
}

/// Hits until the hand reaches `stand_at`, like a dealer would.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdStrategy {
    stand_at: u16,
}

impl ThresholdStrategy {
    pub fn new(stand_at: u16) -> Self {
        ThresholdStrategy { stand_at }
    }
}

impl Strategy for ThresholdStrategy {
    fn make_decision(&mut self, player_hand: &Hand, _: Card) -> Decision {
        if player_hand.value() < self.stand_at {
            Decision::Hit
        } else {
            Decision::Stand
        }
    }
}

/// Hit/stand part of the basic strategy chart. Doubling and splitting are not
/// offered at this table.
pub struct BasicStrategy {
    hard_charts: [[Decision; 10]; 5],
    soft_charts: [[Decision; 10]; 6],
}

impl BasicStrategy {
    pub fn new() -> BasicStrategy {
        const H: Decision = Decision::Hit;
        const S: Decision = Decision::Stand;

        // Columns are the dealer up card: A, 2, 3, ..., 10.
        BasicStrategy {
            hard_charts: [
                [H, H, H, S, S, S, H, H, H, H], // 12
                [H, S, S, S, S, S, H, H, H, H],
                [H, S, S, S, S, S, H, H, H, H],
                [H, S, S, S, S, S, H, H, H, H],
                [H, S, S, S, S, S, H, H, H, H], // 16
            ],
            soft_charts: [
                [H, H, H, H, H, H, H, H, H, H], // Ace + 2
                [H, H, H, H, H, H, H, H, H, H],
                [H, H, H, H, H, H, H, H, H, H],
                [H, H, H, H, H, H, H, H, H, H],
                [H, H, H, H, H, H, H, H, H, H],
                [H, S, S, S, S, S, S, S, H, H], // Ace + 7
            ],
        }
    }
}

impl Default for BasicStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for BasicStrategy {
    fn make_decision(&mut self, player_hand: &Hand, dealer_up_card: Card) -> Decision {
        let col = if dealer_up_card.is_ace() {
            0
        } else {
            (dealer_up_card.value() - 1) as usize
        };
        let value = player_hand.value();

        if player_hand.is_soft() {
            match value {
                0..=12 => Decision::Hit,
                13..=18 => self.soft_charts[(value - 13) as usize][col],
                _ => Decision::Stand,
            }
        } else {
            match value {
                0..=11 => Decision::Hit,
                12..=16 => self.hard_charts[(value - 12) as usize][col],
                _ => Decision::Stand,
            }
        }
    }
}
