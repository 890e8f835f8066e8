//! Command execution context
//!
//! Loads configuration, overlays the environment and opens the session every
//! network command needs.

use log::debug;

use crate::cli::{GlobalOptions, OutputFormat};
use steamy::{Result, Session, Steam, SteamConfig, SteamId};

pub struct CommandContext {
    /// Open session; released when the context is dropped
    pub session: Session,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load configuration and open a session.
    ///
    /// A missing config file is not an error here: credentials may come
    /// entirely from the environment, and endpoints that need none still work.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = load_config(opts)?;
        debug!("Opening session with {:?}", config.credentials());
        let session = Steam::connect(config)?;

        Ok(Self {
            session,
            format: opts.format,
        })
    }
}

/// Config file (if any) with `STEAM_*` environment variables applied on top.
pub fn load_config(opts: &GlobalOptions) -> Result<SteamConfig> {
    let mut config = SteamConfig::load_or_default(opts.config_ref())?;
    config.apply_env(|name| std::env::var(name).ok());
    Ok(config)
}

pub fn parse_steam_ids(raw: &[String]) -> Result<Vec<SteamId>> {
    raw.iter().map(|s| s.parse()).collect()
}
