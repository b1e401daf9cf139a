use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};

use super::hand::Hand;
use crate::Rule;

/// How a round ended for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_enum_str, Deserialize_enum_str)]
pub enum Outcome {
    PlayerBust,
    DealerBust,
    Push,
    Blackjack,
    PlayerWin,
    DealerWin,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::PlayerBust => "Bust! You lose",
            Outcome::DealerBust => "Dealer busts! You win",
            Outcome::Push => "Push!",
            Outcome::Blackjack => "Blackjack! You win",
            Outcome::PlayerWin => "You win!",
            Outcome::DealerWin => "Dealer wins",
        }
    }

    /// Money credited back to the balance. The stake was already debited when
    /// the round started, so a win credits twice the bet and a push returns it.
    pub fn credit(&self, bet: u32, rule: &Rule) -> u32 {
        match self {
            Outcome::PlayerBust | Outcome::DealerWin => 0,
            Outcome::Push => bet,
            Outcome::DealerBust | Outcome::PlayerWin => bet.saturating_mul(2),
            Outcome::Blackjack => {
                let profit = (bet as f64 * rule.payout_blackjack) as u32;
                bet.saturating_add(profit)
            }
        }
    }

    pub fn is_player_win(&self) -> bool {
        matches!(
            self,
            Outcome::DealerBust | Outcome::Blackjack | Outcome::PlayerWin
        )
    }
}

/// Decides the round from the final hands. The checks run in a fixed order:
/// a busted player loses even if the dealer busts too, and equal totals push
/// before a natural is considered.
pub fn determine_winner(player_hand: &Hand, dealer_hand: &Hand) -> Outcome {
    let player_value = player_hand.value();
    let dealer_value = dealer_hand.value();

    if player_value > 21 {
        Outcome::PlayerBust
    } else if dealer_value > 21 {
        Outcome::DealerBust
    } else if player_value == dealer_value {
        Outcome::Push
    } else if player_hand.is_natural() {
        Outcome::Blackjack
    } else if player_value > dealer_value {
        Outcome::PlayerWin
    } else {
        Outcome::DealerWin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::card::{Card, Rank, Suit};

    fn hand(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for rank in ranks {
            hand.receive_card(Card::new(*rank, Suit::Clubs));
        }
        hand
    }

    #[test]
    fn player_bust_beats_dealer_bust() {
        let player = hand(&[Rank::Ten, Rank::Nine, Rank::Five]);
        let dealer = hand(&[Rank::Ten, Rank::Six, Rank::King]);
        assert_eq!(determine_winner(&player, &dealer), Outcome::PlayerBust);
    }

    #[test]
    fn dealer_bust() {
        let player = hand(&[Rank::Ten, Rank::Two]);
        let dealer = hand(&[Rank::Ten, Rank::Six, Rank::King]);
        assert_eq!(determine_winner(&player, &dealer), Outcome::DealerBust);
    }

    #[test]
    fn push_is_checked_before_natural() {
        let player = hand(&[Rank::Ace, Rank::King]);
        let dealer = hand(&[Rank::Six, Rank::Five, Rank::Queen]);
        assert_eq!(determine_winner(&player, &dealer), Outcome::Push);

        let player = hand(&[Rank::Ten, Rank::Eight]);
        let dealer = hand(&[Rank::Nine, Rank::Nine]);
        assert_eq!(determine_winner(&player, &dealer), Outcome::Push);
    }

    #[test]
    fn natural_wins_as_blackjack() {
        let player = hand(&[Rank::Ace, Rank::King]);
        let dealer = hand(&[Rank::Nine, Rank::Eight]);
        assert_eq!(determine_winner(&player, &dealer), Outcome::Blackjack);
    }

    #[test]
    fn three_card_twenty_one_is_a_plain_win() {
        let player = hand(&[Rank::Five, Rank::Six, Rank::King]);
        let dealer = hand(&[Rank::Ten, Rank::Seven]);
        assert_eq!(determine_winner(&player, &dealer), Outcome::PlayerWin);
    }

    #[test]
    fn higher_total_wins() {
        let player = hand(&[Rank::Ten, Rank::Seven]);
        let dealer = hand(&[Rank::Ten, Rank::Nine]);
        assert_eq!(determine_winner(&player, &dealer), Outcome::DealerWin);
        assert_eq!(determine_winner(&dealer, &player), Outcome::PlayerWin);
    }

    #[test]
    fn test_credit() {
        let rule = Rule::default();
        assert_eq!(Outcome::PlayerBust.credit(100, &rule), 0);
        assert_eq!(Outcome::DealerWin.credit(100, &rule), 0);
        assert_eq!(Outcome::Push.credit(100, &rule), 100);
        assert_eq!(Outcome::DealerBust.credit(100, &rule), 200);
        assert_eq!(Outcome::PlayerWin.credit(100, &rule), 200);
        assert_eq!(Outcome::Blackjack.credit(100, &rule), 250);
        // Fractional chips are dropped.
        assert_eq!(Outcome::Blackjack.credit(25, &rule), 62);
    }

    #[test]
    fn outcome_parses_from_its_name() {
        assert_eq!("Blackjack".parse::<Outcome>().unwrap(), Outcome::Blackjack);
        assert_eq!(Outcome::DealerBust.to_string(), "DealerBust");
    }
}
