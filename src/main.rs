mod cli;

use sceneseek::{
    config,
    decision::{Decision, QualityDecisionMaker},
    indexers::{IndexerRegistry, IndexerSource},
    search::{IndexerDispatcher, SearchService},
};
use sceneseek_common::{MovieId, SearchMode};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;

async fn search_movie(
    config_path: Option<&Path>,
    movie_id: MovieId,
    user_invoked: bool,
    interactive: bool,
    json: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let profiles = Arc::new(config.profile_store());
    let registry = IndexerRegistry::from_config(&config.indexers)?;
    tracing::debug!("Loaded {} indexers", registry.len());

    let dispatcher = IndexerDispatcher::new(
        Arc::new(registry),
        Arc::new(QualityDecisionMaker::new(profiles.clone())),
    );
    let service = SearchService::new(Arc::new(config.catalog()), profiles, dispatcher);

    let decisions = service
        .search_by_movie_id(movie_id, user_invoked, interactive)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&decisions)?);
    } else {
        print_decisions(&decisions);
    }

    Ok(())
}

fn print_decisions(decisions: &[Decision]) {
    if decisions.is_empty() {
        println!("No releases found");
        return;
    }

    let approved = decisions.iter().filter(|d| d.approved()).count();
    println!("{} releases, {} approved", decisions.len(), approved);

    for decision in decisions {
        let mark = if decision.approved() { "✓" } else { "✗" };
        println!(
            "{} [{}] {} ({}, {} bytes)",
            mark,
            decision.release.indexer,
            decision.release.title,
            decision.quality,
            decision.release.size
        );
        for rejection in &decision.rejections {
            println!("    {}", rejection.reason);
        }
    }
}

fn list_indexers(config_path: Option<&Path>, interactive: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let mode = SearchMode::from_interactive(interactive);

    let registry = IndexerRegistry::from_config(&config.indexers)?;
    let enabled = registry.enabled_for(mode)?;

    println!("{} indexers enabled for {:?} search", enabled.len(), mode);
    for indexer in enabled {
        match config.indexer(indexer.name()) {
            Some(entry) => println!("  {} ({}) {}", entry.name, entry.kind, entry.url),
            None => println!("  {}", indexer.name()),
        }
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Indexers: {}", config.indexers.len());
            println!(
                "    Automatic: {}",
                config
                    .indexers
                    .iter()
                    .filter(|i| i.enable_automatic_search)
                    .count()
            );
            println!(
                "    Interactive: {}",
                config
                    .indexers
                    .iter()
                    .filter(|i| i.enable_interactive_search)
                    .count()
            );
            println!("  Profiles: {}", config.profiles.len());
            println!("  Movies: {}", config.movies.len());
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Indexers: {}", config.indexers.len());
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "sceneseek=trace,sceneseek_common=debug,reqwest=debug".to_string()
        } else {
            "sceneseek=info,reqwest=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search {
            movie_id,
            interactive,
            user_invoked,
            json,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(search_movie(
                cli.config.as_deref(),
                MovieId::new(movie_id),
                user_invoked,
                interactive,
                json,
            ))
        }
        Commands::Indexers { interactive } => list_indexers(cli.config.as_deref(), interactive),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("sceneseek {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
