use blackjack::strategy::StrategyKind;
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unknown strategy: {0}")]
    Strategy(#[from] serde::de::value::Error),
    #[error(transparent)]
    Rule(#[from] blackjack::GameError),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rule: ConfigRule,
    pub autoplay: ConfigAutoplay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRule {
    pub starting_balance: u32,
    pub reshuffle_threshold: usize,
    pub dealer_stand_value: u16,
    pub payout_blackjack: f64,
}

impl Default for ConfigRule {
    fn default() -> Self {
        let rule = blackjack::Rule::default();
        ConfigRule {
            starting_balance: rule.starting_balance,
            reshuffle_threshold: rule.reshuffle_threshold,
            dealer_stand_value: rule.dealer_stand_value,
            payout_blackjack: rule.payout_blackjack,
        }
    }
}

impl TryFrom<ConfigRule> for blackjack::Rule {
    type Error = ConfigError;

    fn try_from(config: ConfigRule) -> Result<Self, Self::Error> {
        let blackjack_rule = blackjack::Rule {
            starting_balance: config.starting_balance,
            reshuffle_threshold: config.reshuffle_threshold,
            dealer_stand_value: config.dealer_stand_value,
            payout_blackjack: config.payout_blackjack,
        };
        blackjack_rule.validate()?;

        Ok(blackjack_rule)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigAutoplay {
    pub rounds: u32,
    pub bet: u32,
    pub strategy: String,
    /// Used by the `Threshold` strategy.
    pub stand_at: u16,
    /// Pause before each dealer step, for watching the dealer play.
    pub dealer_draw_delay_ms: u64,
    pub seed: Option<u64>,
}

impl Default for ConfigAutoplay {
    fn default() -> Self {
        ConfigAutoplay {
            rounds: 100,
            bet: 10,
            strategy: String::from("Basic"),
            stand_at: 17,
            dealer_draw_delay_ms: 0,
            seed: None,
        }
    }
}

impl ConfigAutoplay {
    pub fn strategy_kind(&self) -> Result<StrategyKind, ConfigError> {
        Ok(self.strategy.parse()?)
    }
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: &str) -> Result<Config, ConfigError> {
    let file_content = fs::read_to_string(filename).map_err(|source| ConfigError::Io {
        path: String::from(filename),
        source,
    })?;
    parse_config(&file_content)
}

/// Missing sections and fields fall back to their defaults.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}
