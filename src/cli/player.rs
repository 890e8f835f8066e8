//! Player command implementations

use colored::Colorize;
use log::debug;

use crate::cli::context::parse_steam_ids;
use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::output::Formattable;
use crate::output::display::{BanDisplay, FriendDisplay, PlayerDisplay};
use crate::output::json;
use steamy::{Result, SteamId};

/// Run the player summary command
pub async fn summary(opts: &GlobalOptions, steam_ids: &[String]) -> Result<()> {
    let ids = parse_steam_ids(steam_ids)?;
    let ctx = CommandContext::new(opts)?;

    let players = ctx.session.player().get_player_summaries_all(&ids).await?;
    debug!("Fetched {} of {} requested profiles", players.len(), ids.len());

    let rows: Vec<PlayerDisplay> = players.into_iter().map(PlayerDisplay::from).collect();
    rows.print(ctx.format)
}

/// Run the player friends command
pub async fn friends(opts: &GlobalOptions, steam_id: &str) -> Result<()> {
    let steam_id: SteamId = steam_id.parse()?;
    let ctx = CommandContext::new(opts)?;

    let friends = ctx.session.player().get_friends_list(steam_id).await?;

    let rows: Vec<FriendDisplay> = friends.into_iter().map(FriendDisplay::from).collect();
    rows.print(ctx.format)
}

/// Run the player bans command
pub async fn bans(opts: &GlobalOptions, steam_ids: &[String]) -> Result<()> {
    let ids = parse_steam_ids(steam_ids)?;
    let ctx = CommandContext::new(opts)?;

    let bans = ctx.session.player().get_player_bans(&ids).await?;

    let rows: Vec<BanDisplay> = bans.into_iter().map(BanDisplay::from).collect();
    rows.print(ctx.format)
}

/// Run the player resolve command
pub async fn resolve(opts: &GlobalOptions, vanity: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let resolved = ctx.session.player().resolve_vanity_url(vanity).await?;

    match ctx.format {
        OutputFormat::Json => {
            let data = serde_json::json!({
                "vanity": vanity,
                "steamid": resolved,
            });
            println!("{}", json::format_json(&data)?);
        }
        OutputFormat::Table => match resolved {
            Some(id) => println!("{} {} → {}", "✓".green(), vanity, id.to_string().cyan()),
            None => println!("{} No profile matches '{}'", "✗".red(), vanity),
        },
    }

    Ok(())
}
