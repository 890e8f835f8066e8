//! Status command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::cli::context::load_config;
use steamy::auth::redact;
use steamy::{AccessToken, Result, SteamConfig};

fn token_line(label: &str, token: Option<&AccessToken>) {
    match token {
        None => println!("{} {} not configured", "○".dimmed(), label),
        Some(token) if token.is_expired() => {
            println!("{} {} expired", "⚠".yellow(), label);
        }
        Some(token) => match token.expires_at() {
            Some(expires) => {
                let remaining = expires.signed_duration_since(chrono::Utc::now());
                println!(
                    "{} {} valid (expires in {}h {}m)",
                    "✓".green(),
                    label,
                    remaining.num_hours(),
                    remaining.num_minutes() % 60
                );
            }
            None => println!("{} {} configured (expiry unknown)", "✓".green(), label),
        },
    }
}

/// Run the status command to display configuration status
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "steamy configuration status".bold());

    let path = match opts.config_ref() {
        Some(p) => std::path::PathBuf::from(p),
        None => SteamConfig::default_path()?,
    };
    if path.exists() {
        println!("Config file: {}", path.display().to_string().cyan());
    } else {
        println!("Config file: {} {}", path.display(), "(not found)".dimmed());
    }
    println!();

    let config = load_config(opts)?;
    let credentials = config.credentials();

    match credentials.api_key() {
        Some(key) => println!("{} API key configured ({})", "✓".green(), redact(key)),
        None => println!("{} API key not configured", "○".dimmed()),
    }
    token_line("Store token", credentials.store_token());
    token_line("Community token", credentials.community_token());

    if credentials.is_empty() {
        println!();
        println!(
            "  → Set {} or add api_key to the config file",
            "STEAM_API_KEY".cyan()
        );
    }

    let settings = &config.settings;
    if settings.api_base_url != steamy::config::DEFAULT_API_BASE_URL {
        println!("{} Custom API host: {}", "○".dimmed(), settings.api_base_url.cyan());
    }

    println!();
    if credentials.is_empty() {
        return Ok(());
    }

    let reachable = steamy::Steam::with_session(config, async |session| {
        Ok(session.test_connection().await)
    })
    .await?;
    if reachable {
        println!("{} Steam Web API reachable", "✓".green());
    } else {
        println!("{} Steam Web API rejected the request or is unreachable", "✗".red());
        println!("  → Re-run with --debug for details");
    }
    println!();

    Ok(())
}
