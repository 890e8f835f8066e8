//! Stats command implementations

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::output::Formattable;
use crate::output::display::NewsDisplay;
use crate::output::json;
use steamy::Result;

/// Run the stats players command
pub async fn players(opts: &GlobalOptions, app_id: u32) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let count = ctx.session.stats().get_current_players(app_id).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&count)?),
        OutputFormat::Table => println!(
            "{} players in app {}",
            count.player_count.to_string().bold(),
            app_id
        ),
    }

    Ok(())
}

/// Run the stats news command
pub async fn news(opts: &GlobalOptions, app_id: u32, count: u32, max_length: Option<u32>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let items = ctx
        .session
        .stats()
        .get_news_for_app(app_id, count, max_length)
        .await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&items)?),
        OutputFormat::Table => {
            let rows: Vec<NewsDisplay> = items.into_iter().map(NewsDisplay::from).collect();
            rows.print(ctx.format)?;
        }
    }

    Ok(())
}
