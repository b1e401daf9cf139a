use serde::{Deserialize, Serialize};

use super::card::Card;

/// Returns the best total and how many Aces are still counted as 11 in it.
fn best_total(cards: &[Card]) -> (u16, u16) {
    let mut total = 0;
    let mut aces = 0;
    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += card.value();
    }

    // Count an Ace as 1 instead of 11 until the hand stops busting.
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    (total, aces)
}

/// Best blackjack value of the cards. An empty hand is worth 0.
pub fn hand_value(cards: &[Card]) -> u16 {
    best_total(cards).0
}

/// Check if a hand is soft (has an Ace counted as 11).
pub fn is_soft(cards: &[Card]) -> bool {
    best_total(cards).1 > 0
}

/// Two cards worth 21.
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards) == 21
}

/// Cards held by the player or the dealer. Grows by one card at a time and is
/// only cleared between rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(5),
        }
    }

    pub fn receive_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn get_cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn value(&self) -> u16 {
        hand_value(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    pub fn is_natural(&self) -> bool {
        is_natural(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, card) in self.cards.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}
