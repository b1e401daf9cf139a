use std::thread;
use std::time::Duration;

use self::private::Statistics;
use blackjack::strategy::Strategy;
use blackjack::{DealerStep, Decision, GameError, Phase, Table};
use blackjack_drivers::ConfigAutoplay;
use log::{debug, info};

mod private {
    use blackjack::Outcome;

    #[derive(Debug, Clone, Copy, Default)]
    pub struct Statistics {
        rounds: u32,
        wins: u32,
        blackjacks: u32,
        pushes: u32,
        losses: u32,
        total_bet: u64,

        starting_balance: u32,
        current_balance: u32,
        min_balance: u32,
    }

    impl Statistics {
        pub fn new(starting_balance: u32) -> Self {
            Statistics {
                starting_balance,
                current_balance: starting_balance,
                min_balance: starting_balance,
                ..Default::default()
            }
        }

        pub fn record_round(&mut self, bet: u32, outcome: Outcome, balance: u32) {
            self.rounds += 1;
            self.total_bet += u64::from(bet);
            match outcome {
                Outcome::Blackjack => {
                    self.wins += 1;
                    self.blackjacks += 1;
                }
                Outcome::DealerBust | Outcome::PlayerWin => self.wins += 1,
                Outcome::Push => self.pushes += 1,
                Outcome::PlayerBust | Outcome::DealerWin => self.losses += 1,
            }
            self.current_balance = balance;
            if self.min_balance > balance {
                self.min_balance = balance;
            }
        }

        pub fn get_rounds(&self) -> u32 {
            self.rounds
        }

        pub fn get_total_bet(&self) -> u64 {
            self.total_bet
        }

        pub fn get_net(&self) -> i64 {
            i64::from(self.current_balance) - i64::from(self.starting_balance)
        }

        /// Net result per unit wagered.
        pub fn get_rate(&self) -> f64 {
            if self.total_bet == 0 {
                0.0
            } else {
                self.get_net() as f64 / self.total_bet as f64
            }
        }
    }

    impl std::fmt::Display for Statistics {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            writeln!(
                f,
                "Rounds: {}. Wins: {} (blackjacks: {}). Pushes: {}. Losses: {}.",
                self.rounds, self.wins, self.blackjacks, self.pushes, self.losses
            )?;
            write!(
                f,
                "Balance: {}({:+}). Total bet: {}. Rate: {:.2}%. Min balance: {}.",
                self.current_balance,
                self.get_net(),
                self.total_bet,
                self.get_rate() * 100.0,
                self.min_balance
            )
        }
    }
}

/// Plays up to `config.rounds` rounds, stopping early once the balance cannot
/// cover a bet. The dealer's draws are paced by `dealer_draw_delay_ms`.
pub fn play_rounds(
    mut table: Table,
    mut strategy: Box<dyn Strategy>,
    config: &ConfigAutoplay,
) -> Result<Statistics, GameError> {
    let delay = Duration::from_millis(config.dealer_draw_delay_ms);
    let mut statistics = Statistics::new(table.get_balance());

    for round in 1..=config.rounds {
        let bet = table.adjust_bet(i64::from(config.bet))?;
        if bet < config.bet || !table.can_start_round() {
            info!(
                "Balance {} cannot cover a bet of {}, stopping",
                table.get_balance(),
                config.bet
            );
            break;
        }
        table.start_round()?;
        debug!("Round #{}: {}", round, table.get_message());

        while table.get_phase() == Phase::PlayerTurn {
            let Some(up_card) = table.get_dealer_up_card() else {
                break;
            };
            match strategy.make_decision(table.get_player_hand(), up_card) {
                Decision::Hit => {
                    table.hit()?;
                }
                Decision::Stand => table.stand()?,
            }
        }

        while table.get_phase() == Phase::DealerTurn {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            if let DealerStep::Drew(card) = table.advance_dealer()? {
                debug!("Dealer drew {}", card);
            }
        }

        if let Some(outcome) = table.get_outcome() {
            statistics.record_round(bet, outcome, table.get_balance());
            info!(
                "Round #{}: {} | player {} | dealer {} | balance {}",
                round,
                table.get_message(),
                table.get_player_hand(),
                table.get_dealer_hand(),
                table.get_balance()
            );
        }
        table.new_round()?;
    }

    debug!("Played {} rounds", statistics.get_rounds());
    Ok(statistics)
}
