//! Games command implementations

use colored::Colorize;
use log::debug;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::output::Formattable;
use crate::output::display::{AchievementDisplay, AppDisplay, FieldDisplay, OwnedGameDisplay};
use crate::output::json;
use steamy::models::{AppDetails, OwnedGamesOptions};
use steamy::{ApiError, Result, SteamId};

/// Run the games owned command
pub async fn owned(
    opts: &GlobalOptions,
    steam_id: &str,
    include_free: bool,
    by_playtime: bool,
    limit: Option<usize>,
) -> Result<()> {
    let steam_id: SteamId = steam_id.parse()?;
    let ctx = CommandContext::new(opts)?;

    let options = OwnedGamesOptions {
        include_played_free_games: include_free,
        ..OwnedGamesOptions::default()
    };
    let mut games = ctx.session.games().get_owned_games(steam_id, &options).await?;
    debug!("{} owns {} games", steam_id, games.len());

    if by_playtime {
        games.sort_by(|a, b| b.playtime_forever.cmp(&a.playtime_forever));
    }
    if let Some(limit) = limit {
        games.truncate(limit);
    }

    let rows: Vec<OwnedGameDisplay> = games.into_iter().map(OwnedGameDisplay::from).collect();
    rows.print(ctx.format)
}

/// Run the games apps command
pub async fn apps(opts: &GlobalOptions, query: &str, limit: usize) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let mut matches = ctx.session.games().search_games(query, None).await?;
    debug!("{} apps match '{}'", matches.len(), query);
    matches.truncate(limit);

    let rows: Vec<AppDisplay> = matches.into_iter().map(AppDisplay::from).collect();
    rows.print(ctx.format)
}

/// Run the games achievements command
pub async fn achievements(
    opts: &GlobalOptions,
    steam_id: &str,
    app_id: u32,
    language: &str,
) -> Result<()> {
    let steam_id: SteamId = steam_id.parse()?;
    let ctx = CommandContext::new(opts)?;

    let achievements = ctx
        .session
        .games()
        .get_player_achievements(steam_id, app_id, language)
        .await?;

    if ctx.format == OutputFormat::Table {
        println!(
            "{} - {:.1}% complete\n",
            achievements.game_name.bold(),
            achievements.completion_percent()
        );
    }

    AchievementDisplay::rows(achievements).print(ctx.format)
}

/// Run the games details command
pub async fn details(opts: &GlobalOptions, app_id: u32, country: &str, language: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let details = ctx
        .session
        .games()
        .get_app_details(app_id, country, language)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Store page for app {}", app_id)))?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&details)?),
        OutputFormat::Table => detail_rows(&details).print(ctx.format)?,
    }

    Ok(())
}

fn detail_rows(details: &AppDetails) -> Vec<FieldDisplay> {
    let price = match (&details.price_overview, details.is_free) {
        (_, true) => "Free".to_string(),
        (Some(price), false) if price.discount_percent > 0 => format!(
            "{} (-{}%)",
            price.final_formatted, price.discount_percent
        ),
        (Some(price), false) => price.final_formatted.clone(),
        (None, false) => "N/A".to_string(),
    };

    vec![
        FieldDisplay::new("Name", &details.name),
        FieldDisplay::new("App ID", details.steam_appid),
        FieldDisplay::new("Type", &details.app_type),
        FieldDisplay::new("Price", price),
        FieldDisplay::new(
            "Release date",
            details
                .release_date
                .as_ref()
                .map(|d| d.date.as_str())
                .unwrap_or("N/A"),
        ),
        FieldDisplay::new("Developers", details.developers.join(", ")),
        FieldDisplay::new("Publishers", details.publishers.join(", ")),
        FieldDisplay::new("Platforms", details.platform_list().join(", ")),
        FieldDisplay::new(
            "Genres",
            details
                .genres
                .iter()
                .map(|g| g.description.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        ),
    ]
}
