//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod family;
pub mod games;
pub mod market;
pub mod player;
pub mod stats;
pub mod status;
pub mod token;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// steamy - query the Steam Web API from the command line
#[derive(Parser, Debug)]
#[command(name = "steamy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "STEAMY_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "STEAMY_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "STEAMY_DEBUG", hide_env = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show configured credentials and settings
    Status,

    /// Player profiles, friends and bans
    #[command(subcommand)]
    Player(PlayerCommands),

    /// Game libraries, the app list and store details
    #[command(subcommand)]
    Games(GamesCommands),

    /// Player counts and news
    #[command(subcommand)]
    Stats(StatsCommands),

    /// Community market prices
    #[command(subcommand)]
    Market(MarketCommands),

    /// Steam Families (requires an access token)
    #[command(subcommand)]
    Family(FamilyCommands),

    /// Access token utilities
    #[command(subcommand)]
    Token(TokenCommands),
}

#[derive(Subcommand, Debug)]
pub enum PlayerCommands {
    /// Profile summaries for one or more players
    Summary {
        /// Steam IDs (64-bit)
        #[arg(required = true, num_args = 1..)]
        steam_ids: Vec<String>,
    },

    /// Friend list of a player
    Friends {
        steam_id: String,
    },

    /// Ban records for one or more players
    Bans {
        #[arg(required = true, num_args = 1..)]
        steam_ids: Vec<String>,
    },

    /// Resolve a vanity name or profile URL to a Steam ID
    Resolve {
        vanity: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum GamesCommands {
    /// Games owned by a player
    Owned {
        steam_id: String,

        /// Include free games the player has launched
        #[arg(long)]
        include_free: bool,

        /// Sort by total playtime, most played first
        #[arg(long)]
        by_playtime: bool,

        /// Maximum number of games to show
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search the full app list by name
    Apps {
        /// Case-insensitive substring to match
        query: String,

        #[arg(long, default_value = "25")]
        limit: usize,
    },

    /// A player's achievements in one game
    Achievements {
        steam_id: String,
        app_id: u32,

        #[arg(long, default_value = "english")]
        language: String,
    },

    /// Store page details of an app
    Details {
        app_id: u32,

        /// Two-letter country code for pricing
        #[arg(long, default_value = "us")]
        country: String,

        #[arg(long, default_value = "english")]
        language: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum StatsCommands {
    /// Current number of players in a game
    Players {
        app_id: u32,
    },

    /// Latest news for a game
    News {
        app_id: u32,

        #[arg(long, default_value = "5")]
        count: u32,

        /// Truncate contents to this many characters
        #[arg(long)]
        max_length: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MarketCommands {
    /// Lowest and median price of an item
    Price {
        market_hash_name: String,

        #[arg(long, default_value = "730")]
        app_id: u32,

        /// Steam currency code (1 = USD)
        #[arg(long, default_value = "1")]
        currency: u32,
    },

    /// Price history of an item
    History {
        market_hash_name: String,

        #[arg(long, default_value = "730")]
        app_id: u32,

        /// Show only the most recent N points
        #[arg(long)]
        last: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FamilyCommands {
    /// Family group of the token owner
    Group,

    /// Playtime of family members
    Playtime {
        family_group_id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum TokenCommands {
    /// Decode a token and show its claims
    Inspect {
        /// Raw token, the store async-config JSON, or the quoted loyalty attribute
        token: String,
    },
}
