mod autoplay;

use std::process::ExitCode;

use blackjack_drivers::{parse_config_from_file, Config, ConfigError};
use clap::Parser;
use log::{error, info};

const DEFAULT_CONFIG_PATH: &str = "~/.blackjack.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Number of rounds to play, overrides the config file
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Seed for the deck shuffles, overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,
}

fn load_config(args: &CommandLineArgs) -> Result<Config, ConfigError> {
    if args.config != DEFAULT_CONFIG_PATH {
        return parse_config_from_file(&args.config);
    }

    let config_file_path = match home::home_dir() {
        Some(home_dir) => home_dir.join(".blackjack.yml"),
        None => {
            info!("Cannot find home directory, using default config");
            return Ok(Config::default());
        }
    };
    if !config_file_path.is_file() {
        info!(
            "{} not found, using default config",
            config_file_path.display()
        );
        return Ok(Config::default());
    }
    parse_config_from_file(&config_file_path.to_string_lossy())
}

fn run(args: CommandLineArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&args)?;
    if let Some(rounds) = args.rounds {
        config.autoplay.rounds = rounds;
    }
    if args.seed.is_some() {
        config.autoplay.seed = args.seed;
    }

    let rule: blackjack::Rule = config.rule.clone().try_into()?;
    let strategy = config.autoplay.strategy_kind()?.build(config.autoplay.stand_at);
    let table = match config.autoplay.seed {
        Some(seed) => blackjack::Table::with_seed(rule, seed)?,
        None => blackjack::Table::new(rule)?,
    };

    let statistics = autoplay::play_rounds(table, strategy, &config.autoplay)?;
    println!("{}", statistics);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(CommandLineArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
