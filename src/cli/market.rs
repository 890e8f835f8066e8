//! Market command implementations

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::output::Formattable;
use crate::output::display::{FieldDisplay, PriceHistoryDisplay};
use crate::output::json;
use steamy::{ApiError, Result};

/// Run the market price command
pub async fn price(opts: &GlobalOptions, market_hash_name: &str, app_id: u32, currency: u32) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let price = ctx
        .session
        .market()
        .get_item_price(market_hash_name, app_id, currency)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Market price for '{}'", market_hash_name)))?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&price)?),
        OutputFormat::Table => {
            let na = || "N/A".to_string();
            vec![
                FieldDisplay::new("Item", market_hash_name),
                FieldDisplay::new("Lowest", price.lowest_price.clone().unwrap_or_else(na)),
                FieldDisplay::new("Median", price.median_price.clone().unwrap_or_else(na)),
                FieldDisplay::new("Volume (24h)", price.volume.clone().unwrap_or_else(na)),
            ]
            .print(ctx.format)?;
        }
    }

    Ok(())
}

/// Run the market history command
pub async fn history(
    opts: &GlobalOptions,
    market_hash_name: &str,
    app_id: u32,
    last: Option<usize>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let mut entries = ctx
        .session
        .market()
        .get_price_history(market_hash_name, app_id)
        .await?;

    if let Some(n) = last {
        let skip = entries.len().saturating_sub(n);
        entries.drain(..skip);
    }

    let rows: Vec<PriceHistoryDisplay> = entries.into_iter().map(PriceHistoryDisplay::from).collect();
    rows.print(ctx.format)
}
