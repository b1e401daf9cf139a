pub mod card;
pub mod deck;
pub mod hand;
pub mod settlement;

use blackjack_macros::allowed_phase;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};

use self::{card::Card, deck::Deck, hand::Hand, settlement::Outcome};
use crate::{BetRejection, GameError, Rule};

const WELCOME_MESSAGE: &str = "Welcome to Blackjack! Place your bet";
const BETTING_MESSAGE: &str = "Place your bet";
const PLAYER_TURN_MESSAGE: &str = "Your turn";
const DEALER_TURN_MESSAGE: &str = "Dealer's turn";

/// Most cards one round can use. Every card but the last in a hand is drawn
/// while its hard total is at most 20, so both hands together hold at most 40
/// points of non-final cards. The 16 lowest cards (four each of A, 2, 3 and 4)
/// add up to exactly 40, which leaves 16 + 2 cards.
pub const MAX_CARDS_PER_ROUND: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_enum_str, Deserialize_enum_str)]
pub enum Phase {
    Betting,
    PlayerTurn,
    DealerTurn,
    Settled,
}

/// Result of one dealer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerStep {
    Drew(Card),
    Settled(Outcome),
}

/// Read-only view of a table, handed to whatever presents the game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundState {
    pub phase: Phase,
    pub balance: u32,
    pub bet: u32,
    pub stake: u32,
    pub message: String,
    pub player_hand: Vec<Card>,
    pub dealer_hand: Vec<Card>,
    pub dealer_hole_card_hidden: bool,
    pub outcome: Option<Outcome>,
    pub player_value: u16,
    /// Only the up card counts while the hole card is hidden.
    pub dealer_visible_value: u16,
    pub cards_remaining: usize,
}

/// A single-player blackjack table. Owns the deck, both hands and the
/// player's money, and moves a round through
/// `Betting -> PlayerTurn -> DealerTurn -> Settled -> Betting`.
///
/// Every operation is allowed in exactly one phase. Calling it in another
/// phase returns `GameError::WrongPhase` and changes nothing.
pub struct Table {
    rule: Rule,
    rng: StdRng,
    deck: Deck,

    // Round state
    phase: Phase,
    balance: u32,
    /// Adjustable while betting, always within `[0, balance]`.
    bet: u32,
    /// Amount taken from the balance at `start_round`, paid out on at settlement.
    stake: u32,
    message: String,
    player_hand: Hand,
    dealer_hand: Hand,
    dealer_hole_card_hidden: bool,
    outcome: Option<Outcome>,
}

impl Table {
    pub fn new(rule: Rule) -> Result<Self, GameError> {
        Self::with_rng(rule, StdRng::from_entropy())
    }

    /// Same seed, same sequence of decks.
    pub fn with_seed(rule: Rule, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(rule, StdRng::seed_from_u64(seed))
    }

    /// Starts with the given deck. Later reshuffles draw from `seed`.
    pub fn with_deck(rule: Rule, deck: Deck, seed: u64) -> Result<Self, GameError> {
        rule.validate()?;
        Ok(Self::build(rule, StdRng::seed_from_u64(seed), deck))
    }

    fn with_rng(rule: Rule, mut rng: StdRng) -> Result<Self, GameError> {
        rule.validate()?;
        let deck = Deck::new(&mut rng);
        Ok(Self::build(rule, rng, deck))
    }

    fn build(rule: Rule, rng: StdRng, deck: Deck) -> Self {
        Table {
            rule,
            rng,
            deck,
            phase: Phase::Betting,
            balance: rule.starting_balance,
            bet: 0,
            stake: 0,
            message: String::from(WELCOME_MESSAGE),
            player_hand: Hand::new(),
            dealer_hand: Hand::new(),
            dealer_hole_card_hidden: false,
            outcome: None,
        }
    }

    /// Can be called at Betting phase.
    /// Changes the bet by `delta`, clamped to `[0, balance]`. Returns the new bet.
    #[allowed_phase(Betting)]
    pub fn adjust_bet(&mut self, delta: i64) -> Result<u32, GameError> {
        let bet = i64::from(self.bet)
            .saturating_add(delta)
            .clamp(0, i64::from(self.balance));
        // The clamp keeps the bet within the u32 balance.
        self.bet = u32::try_from(bet).unwrap_or(self.balance);
        Ok(self.bet)
    }

    /// Can be called at Betting phase.
    #[allowed_phase(Betting)]
    pub fn reset_bet(&mut self) -> Result<(), GameError> {
        self.bet = 0;
        Ok(())
    }

    /// Can be called at Betting phase.
    /// Moves the bet from the balance into the stake and deals two cards each,
    /// alternating player and dealer. A natural skips the player's turn.
    ///
    /// Besides the reshuffle threshold, a fresh deck is shuffled in whenever
    /// fewer than `MAX_CARDS_PER_ROUND` cards remain, so no round can run the
    /// deck dry.
    #[allowed_phase(Betting)]
    pub fn start_round(&mut self) -> Result<(), GameError> {
        if self.bet == 0 {
            return Err(self.reject_bet(BetRejection::NoBet));
        }
        if self.bet > self.balance {
            return Err(self.reject_bet(BetRejection::ExceedsBalance {
                bet: self.bet,
                balance: self.balance,
            }));
        }

        self.reshuffle_if_necessary(MAX_CARDS_PER_ROUND);
        for _ in 0..2 {
            let card = self.draw_card()?;
            self.player_hand.receive_card(card);
            let card = self.draw_card()?;
            self.dealer_hand.receive_card(card);
        }
        self.stake = self.bet;
        self.balance -= self.stake;
        self.bet = 0;
        self.dealer_hole_card_hidden = true;
        debug!(
            "Round started with stake {}: player {}, dealer shows {}",
            self.stake,
            self.player_hand,
            self.get_dealer_up_card().map(|card| card.to_string()).unwrap_or_default()
        );

        if self.player_hand.value() == 21 {
            self.start_dealer_turn();
        } else {
            self.phase = Phase::PlayerTurn;
            self.message = String::from(PLAYER_TURN_MESSAGE);
        }
        Ok(())
    }

    /// Can be called at PlayerTurn phase.
    /// Deals one card to the player. A bust settles the round at once, without
    /// the dealer drawing. Reaching 21 hands the turn to the dealer.
    #[allowed_phase(PlayerTurn)]
    pub fn hit(&mut self) -> Result<Card, GameError> {
        let card = self.draw_card()?;
        self.player_hand.receive_card(card);
        let value = self.player_hand.value();
        debug!("Player hits {}, hand is now {} ({})", card, self.player_hand, value);

        if value > 21 {
            self.dealer_hole_card_hidden = false;
            self.settle();
        } else if value == 21 {
            self.start_dealer_turn();
        }
        Ok(card)
    }

    /// Can be called at PlayerTurn phase.
    #[allowed_phase(PlayerTurn)]
    pub fn stand(&mut self) -> Result<(), GameError> {
        debug!("Player stands on {}", self.player_hand.value());
        self.start_dealer_turn();
        Ok(())
    }

    /// Can be called at DealerTurn phase.
    /// Performs one dealer step: draws a card while the dealer is below the
    /// stand value, otherwise settles the round. Callers pace these steps
    /// however they like.
    #[allowed_phase(DealerTurn)]
    pub fn advance_dealer(&mut self) -> Result<DealerStep, GameError> {
        if self.dealer_hand.value() < self.rule.dealer_stand_value {
            let card = self.draw_card()?;
            self.dealer_hand.receive_card(card);
            debug!("Dealer draws {}, hand is now {}", card, self.dealer_hand);
            return Ok(DealerStep::Drew(card));
        }
        Ok(DealerStep::Settled(self.settle()))
    }

    /// Runs the dealer's turn to the end with no pause between draws.
    pub fn run_dealer(&mut self) -> Result<Outcome, GameError> {
        loop {
            if let DealerStep::Settled(outcome) = self.advance_dealer()? {
                return Ok(outcome);
            }
        }
    }

    /// Can be called at Settled phase.
    /// Clears the table for the next bet. Balance and deck carry over.
    #[allowed_phase(Settled)]
    pub fn new_round(&mut self) -> Result<(), GameError> {
        self.player_hand.clear();
        self.dealer_hand.clear();
        self.bet = 0;
        self.stake = 0;
        self.outcome = None;
        self.dealer_hole_card_hidden = false;
        self.phase = Phase::Betting;
        self.message = String::from(BETTING_MESSAGE);
        self.reshuffle_if_necessary(0);
        Ok(())
    }

    /// Whether `start_round` would accept the current bet.
    pub fn can_start_round(&self) -> bool {
        self.phase == Phase::Betting && self.bet > 0 && self.bet <= self.balance
    }

    pub fn snapshot(&self) -> RoundState {
        RoundState {
            phase: self.phase,
            balance: self.balance,
            bet: self.bet,
            stake: self.stake,
            message: self.message.clone(),
            player_hand: self.player_hand.get_cards().to_vec(),
            dealer_hand: self.dealer_hand.get_cards().to_vec(),
            dealer_hole_card_hidden: self.dealer_hole_card_hidden,
            outcome: self.outcome,
            player_value: self.player_hand.value(),
            dealer_visible_value: self.get_dealer_visible_value(),
            cards_remaining: self.deck.get_remaining(),
        }
    }

    pub fn get_phase(&self) -> Phase {
        self.phase
    }

    pub fn get_balance(&self) -> u32 {
        self.balance
    }

    pub fn get_bet(&self) -> u32 {
        self.bet
    }

    pub fn get_stake(&self) -> u32 {
        self.stake
    }

    pub fn get_message(&self) -> &str {
        &self.message
    }

    pub fn get_player_hand(&self) -> &Hand {
        &self.player_hand
    }

    pub fn get_dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    pub fn get_dealer_up_card(&self) -> Option<Card> {
        self.dealer_hand.get_cards().first().copied()
    }

    pub fn get_dealer_hole_card_hidden(&self) -> bool {
        self.dealer_hole_card_hidden
    }

    pub fn get_dealer_visible_value(&self) -> u16 {
        if self.dealer_hole_card_hidden {
            self.get_dealer_up_card().map(|card| card.value()).unwrap_or(0)
        } else {
            self.dealer_hand.value()
        }
    }

    pub fn get_outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn get_cards_remaining(&self) -> usize {
        self.deck.get_remaining()
    }

    pub fn get_rule(&self) -> &Rule {
        &self.rule
    }

    fn start_dealer_turn(&mut self) {
        self.dealer_hole_card_hidden = false;
        self.phase = Phase::DealerTurn;
        self.message = String::from(DEALER_TURN_MESSAGE);
        debug!("Dealer reveals {}", self.dealer_hand);
    }

    /// Pays out on the stake recorded at `start_round` and closes the round.
    fn settle(&mut self) -> Outcome {
        let outcome = settlement::determine_winner(&self.player_hand, &self.dealer_hand);
        let credit = outcome.credit(self.stake, &self.rule);
        self.balance = self.balance.saturating_add(credit);
        self.outcome = Some(outcome);
        self.message = String::from(outcome.message());
        self.phase = Phase::Settled;
        info!(
            "Round settled as {:?}: player {} ({}), dealer {} ({}), stake {}, credit {}, balance {}",
            outcome,
            self.player_hand,
            self.player_hand.value(),
            self.dealer_hand,
            self.dealer_hand.value(),
            self.stake,
            credit,
            self.balance
        );
        outcome
    }

    fn reject_bet(&self, rejection: BetRejection) -> GameError {
        warn!("Bet rejected: {}", rejection);
        GameError::InvalidBet(rejection)
    }

    fn draw_card(&mut self) -> Result<Card, GameError> {
        self.deck.draw().map_err(|err| {
            error!("Deck exhausted during {:?} phase", self.phase);
            err
        })
    }

    /// Shuffles in a fresh deck when fewer than the reshuffle threshold, or
    /// than `reserve`, cards remain.
    fn reshuffle_if_necessary(&mut self, reserve: usize) {
        let threshold = self.rule.reshuffle_threshold.max(reserve);
        if self.deck.get_remaining() < threshold {
            info!(
                "{} cards left, shuffling a new deck",
                self.deck.get_remaining()
            );
            self.deck = Deck::new(&mut self.rng);
        }
    }
}
