//! Family command implementations

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::output::Formattable;
use crate::output::display::{FieldDisplay, PlaytimeDisplay};
use crate::output::formatters::format_unix_time;
use crate::output::json;
use steamy::Result;

/// Run the family group command
pub async fn group(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let status = ctx.session.family().get_family_group_for_user(None).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&status)?),
        OutputFormat::Table if !status.is_member() => {
            println!("{} Not a member of any family group", "○".dimmed());
        }
        OutputFormat::Table => {
            vec![
                FieldDisplay::new("Family group", &status.family_groupid),
                FieldDisplay::new("Role", format!("{:?}", status.role())),
                FieldDisplay::new("Joined", format_unix_time(status.latest_time_joined)),
                FieldDisplay::new("Cooldown (s)", status.cooldown_seconds_remaining),
            ]
            .print(ctx.format)?;
        }
    }

    Ok(())
}

/// Run the family playtime command
pub async fn playtime(opts: &GlobalOptions, family_group_id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let summary = ctx.session.family().get_playtime_summary(family_group_id).await?;

    let mut entries = summary.entries;
    entries.sort_by(|a, b| b.seconds_played.cmp(&a.seconds_played));

    let rows: Vec<PlaytimeDisplay> = entries.into_iter().map(PlaytimeDisplay::from).collect();
    rows.print(ctx.format)
}
