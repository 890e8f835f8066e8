//! steamy CLI - query the Steam Web API from the command line

use clap::Parser;
use colored::Colorize;
use log::LevelFilter;

mod cli;
mod output;

use cli::{
    Cli, Commands, FamilyCommands, GamesCommands, GlobalOptions, MarketCommands, PlayerCommands,
    StatsCommands, TokenCommands,
};
use steamy::{ErrorKind, Result};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), err);
        if err.kind() == ErrorKind::Configuration {
            eprintln!("  → Run 'steamy status' to check your credentials");
        }
        std::process::exit(1);
    }
}

/// `--debug` forces debug output for this crate; otherwise `RUST_LOG` decides.
fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    );
    if debug {
        builder.filter_module("steamy", LevelFilter::Debug);
    }
    builder.init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Status => cli::status::run(&opts).await,
        Commands::Player(cmd) => match cmd {
            PlayerCommands::Summary { steam_ids } => cli::player::summary(&opts, &steam_ids).await,
            PlayerCommands::Friends { steam_id } => cli::player::friends(&opts, &steam_id).await,
            PlayerCommands::Bans { steam_ids } => cli::player::bans(&opts, &steam_ids).await,
            PlayerCommands::Resolve { vanity } => cli::player::resolve(&opts, &vanity).await,
        },
        Commands::Games(cmd) => match cmd {
            GamesCommands::Owned {
                steam_id,
                include_free,
                by_playtime,
                limit,
            } => cli::games::owned(&opts, &steam_id, include_free, by_playtime, limit).await,
            GamesCommands::Apps { query, limit } => cli::games::apps(&opts, &query, limit).await,
            GamesCommands::Achievements {
                steam_id,
                app_id,
                language,
            } => cli::games::achievements(&opts, &steam_id, app_id, &language).await,
            GamesCommands::Details {
                app_id,
                country,
                language,
            } => cli::games::details(&opts, app_id, &country, &language).await,
        },
        Commands::Stats(cmd) => match cmd {
            StatsCommands::Players { app_id } => cli::stats::players(&opts, app_id).await,
            StatsCommands::News {
                app_id,
                count,
                max_length,
            } => cli::stats::news(&opts, app_id, count, max_length).await,
        },
        Commands::Market(cmd) => match cmd {
            MarketCommands::Price {
                market_hash_name,
                app_id,
                currency,
            } => cli::market::price(&opts, &market_hash_name, app_id, currency).await,
            MarketCommands::History {
                market_hash_name,
                app_id,
                last,
            } => cli::market::history(&opts, &market_hash_name, app_id, last).await,
        },
        Commands::Family(cmd) => match cmd {
            FamilyCommands::Group => cli::family::group(&opts).await,
            FamilyCommands::Playtime { family_group_id } => {
                cli::family::playtime(&opts, family_group_id).await
            }
        },
        Commands::Token(TokenCommands::Inspect { token }) => cli::token::inspect(&opts, &token),
    }
}
