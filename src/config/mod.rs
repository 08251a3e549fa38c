mod types;

pub use types::*;

use anyhow::{Context, Result};
use sceneseek_common::Error;
use std::collections::HashSet;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./sceneseek.toml",
        "~/.config/sceneseek/config.toml",
        "/etc/sceneseek/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let mut names = HashSet::new();
    for indexer in &config.indexers {
        if !names.insert(indexer.name.as_str()) {
            return Err(
                Error::validation(format!("Duplicate indexer name '{}'", indexer.name)).into(),
            );
        }
        if indexer.is_enabled() && indexer.url.trim().is_empty() {
            return Err(Error::validation(format!(
                "Indexer '{}' is enabled but has no URL",
                indexer.name
            ))
            .into());
        }
    }

    for profile in &config.profiles {
        profile
            .last_allowed_quality()
            .with_context(|| format!("Profile '{}' is unusable", profile.name))?;
    }

    // Searches for these movies fail later with NotFound
    let profile_ids: HashSet<_> = config.profiles.iter().map(|p| p.id).collect();
    for movie in &config.movies {
        if !profile_ids.contains(&movie.profile_id) {
            tracing::warn!(
                movie = %movie.title,
                profile_id = %movie.profile_id,
                "Movie references unknown profile"
            );
        }
    }

    Ok(())
}
