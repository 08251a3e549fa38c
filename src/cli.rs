use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sceneseek")]
#[command(author, version, about = "Search indexers for movie releases")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search every enabled indexer for a movie
    Search {
        /// Catalog id of the movie
        #[arg(required = true)]
        movie_id: i64,

        /// Use the indexers enabled for interactive search
        #[arg(long)]
        interactive: bool,

        /// Mark the search as explicitly requested by a user
        #[arg(long)]
        user_invoked: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List indexers enabled for a search mode
    Indexers {
        /// List interactive-search indexers instead of automatic ones
        #[arg(long)]
        interactive: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
