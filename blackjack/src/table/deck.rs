use rand::Rng;
use strum::IntoEnumIterator;

use super::card::{Card, Rank, Suit};
use crate::GameError;

/// Represents a single 52-card deck, consumed from the front.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    current_index: usize,
}

impl Deck {
    pub const SIZE: usize = 52;

    /// Creates a new deck in suit-major, rank-minor order. Not shuffled.
    pub fn ordered() -> Deck {
        let mut cards = Vec::with_capacity(Self::SIZE);
        for suit in Suit::iter() {
            for rank in Rank::iter() {
                cards.push(Card { rank, suit });
            }
        }
        Deck {
            cards,
            current_index: 0,
        }
    }

    /// Creates a new deck and shuffles it.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Deck {
        let mut deck = Self::ordered();
        deck.shuffle(rng);
        deck
    }

    /// Creates a full deck whose first cards are exactly `firsts`, in order.
    /// The rest of the deck is shuffled below them.
    pub fn with_top_cards<R: Rng + ?Sized>(firsts: &[Card], rng: &mut R) -> Result<Deck, GameError> {
        let mut taken = [false; Self::SIZE];
        for card in firsts {
            let index = u8::from(*card) as usize;
            if taken[index] {
                return Err(GameError::InvalidStack(*card));
            }
            taken[index] = true;
        }

        let mut rest: Vec<Card> = Self::ordered()
            .cards
            .into_iter()
            .filter(|card| !taken[u8::from(*card) as usize])
            .collect();
        fisher_yates(&mut rest, rng);

        let mut cards = firsts.to_vec();
        cards.append(&mut rest);
        Ok(Deck {
            cards,
            current_index: 0,
        })
    }

    /// Shuffles the cards not dealt yet.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        fisher_yates(&mut self.cards[self.current_index..], rng);
    }

    /// Deals the front card. Fails with `EmptyDeck` if nothing is left.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        let card = *self
            .cards
            .get(self.current_index)
            .ok_or(GameError::EmptyDeck)?;
        self.current_index += 1;
        Ok(card)
    }

    pub fn get_remaining(&self) -> usize {
        self.cards.len() - self.current_index
    }

    pub fn is_empty(&self) -> bool {
        self.get_remaining() == 0
    }

    /// The next `number` cards (fewer if the deck runs short), without dealing them.
    pub fn preview(&self, number: usize) -> &[Card] {
        let end = (self.current_index + number).min(self.cards.len());
        &self.cards[self.current_index..end]
    }
}

/// Uniform in-place shuffle: walk from the last index down, swapping each
/// position with a uniformly chosen index in `[0, i]`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
