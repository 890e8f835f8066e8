//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One row per entry (default)
    #[default]
    Table,
    /// Structured output wrapped in a `data`/`meta` envelope
    Json,
}
