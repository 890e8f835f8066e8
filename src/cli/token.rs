//! Token command implementations

use colored::Colorize;
use serde::Serialize;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::output::Formattable;
use crate::output::display::FieldDisplay;
use crate::output::json;
use steamy::auth::redact;
use steamy::{AccessToken, Result};

#[derive(Serialize)]
struct TokenReport {
    token: String,
    subject: Option<String>,
    audience: Vec<String>,
    expires_at: Option<String>,
    expired: bool,
}

/// Parse any of the accepted token shapes.
///
/// `{...}` is read as the store async-config payload, a quoted string as the
/// community loyalty attribute, anything else as the bare token.
pub fn parse_token(input: &str) -> Result<AccessToken> {
    let trimmed = input.trim();
    if trimmed.starts_with('{') {
        AccessToken::from_async_config(trimmed)
    } else if trimmed.starts_with('"') {
        AccessToken::from_loyalty_config(trimmed)
    } else {
        Ok(AccessToken::new(trimmed))
    }
}

/// Run the token inspect command
pub fn inspect(opts: &GlobalOptions, input: &str) -> Result<()> {
    let token = parse_token(input)?;
    let claims = token.claims();

    let report = TokenReport {
        token: redact(token.as_str()),
        subject: claims.as_ref().and_then(|c| c.sub.clone()),
        audience: claims.map(|c| c.aud).unwrap_or_default(),
        expires_at: token.expires_at().map(|t| t.to_rfc3339()),
        expired: token.is_expired(),
    };

    match opts.format {
        OutputFormat::Json => println!("{}", json::format_json(&report)?),
        OutputFormat::Table => {
            if report.subject.is_none() && report.audience.is_empty() {
                println!("{} Token is not a readable JWT", "⚠".yellow());
            }
            let status = if report.expired {
                "expired".red().to_string()
            } else {
                "valid".green().to_string()
            };
            vec![
                FieldDisplay::new("Token", &report.token),
                FieldDisplay::new("Steam ID", report.subject.as_deref().unwrap_or("N/A")),
                FieldDisplay::new("Audience", report.audience.join(", ")),
                FieldDisplay::new("Expires", report.expires_at.as_deref().unwrap_or("N/A")),
                FieldDisplay::new("Status", status),
            ]
            .print(opts.format)?;
        }
    }

    Ok(())
}
