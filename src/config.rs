/// Configuration resolution module
///
/// This module handles:
/// - Building a LeaderboardConfig from CLI arguments
/// - Resolving the data source (flags first, then environment)
/// - Parsing rank mode, null policy and column selection
/// - Resolving the cache settings
use crate::cache::CacheConfig;
use crate::cli::CliArgs;
use crate::columns::{Column, parse_column_list};
use crate::source::{DataSource, SourceError};
use crate::types::*;
use log::debug;
use std::env;
use std::time::Duration;

/// Environment variable naming a URL to fetch when no source flag is given
pub const ENV_URL: &str = "LEADERBOARD_URL";

/// Environment variable naming a Google Sheet ID when no source flag is given
pub const ENV_SHEET_ID: &str = "LEADERBOARD_SHEET_ID";

/// Build a complete LeaderboardConfig from CLI arguments
///
/// This resolves all configuration upfront, ensuring the pipeline receives
/// a fully validated, immutable set of run settings.
pub fn build_leaderboard_config(args: &CliArgs) -> Result<LeaderboardConfig, String> {
    build_leaderboard_config_with_env(args, |key| env::var(key).ok())
}

/// Same as `build_leaderboard_config`, with environment lookup injected (for tests)
pub fn build_leaderboard_config_with_env<E>(args: &CliArgs, lookup_env: E) -> Result<LeaderboardConfig, String>
where
    E: Fn(&str) -> Option<String>,
{
    debug!("Building leaderboard config from CLI args");

    let source = resolve_source(args, &lookup_env)?;
    debug!("Data source: {}", source);

    let rank_mode: RankMode = args.rank_mode.parse()?;
    let null_policy: NullPolicy = args.null_policy.parse()?;
    debug!("Ranking: {} / nulls: {}", rank_mode, null_policy);

    let columns = match args.columns {
        Some(ref list) => parse_column_list(list)?,
        None => Column::default_set(),
    };

    let cache = CacheConfig { dir: args.get_cache_dir(), ttl: Duration::from_secs(args.ttl), enabled: !args.no_cache };
    debug!("Cache: {:?} (ttl {}s, enabled: {})", cache.dir, args.ttl, cache.enabled);

    Ok(LeaderboardConfig {
        source,
        rank_mode,
        null_policy,
        columns,
        filter_enabled: !args.no_filter,
        min_ratio: args.min_ratio,
        top: args.top,
        chart: !args.no_chart,
        cache,
    })
}

/// Pick the data source: explicit flags win, then LEADERBOARD_URL, then LEADERBOARD_SHEET_ID
fn resolve_source<E>(args: &CliArgs, lookup_env: &E) -> Result<DataSource, String>
where
    E: Fn(&str) -> Option<String>,
{
    if let Some(ref path) = args.input {
        return Ok(DataSource::File(path.clone()));
    }
    if let Some(ref url) = args.url {
        return Ok(DataSource::Url(url.clone()));
    }
    if let Some(ref id) = args.sheet_id {
        return Ok(DataSource::GoogleSheet { id: id.clone(), gid: args.gid });
    }

    let non_blank = |key: &str| lookup_env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(url) = non_blank(ENV_URL) {
        debug!("Using {} from environment", ENV_URL);
        return Ok(DataSource::Url(url));
    }
    if let Some(id) = non_blank(ENV_SHEET_ID) {
        debug!("Using {} from environment", ENV_SHEET_ID);
        return Ok(DataSource::GoogleSheet { id, gid: args.gid });
    }

    Err(format!(
        "{}: specify --input <PATH>, --url <URL>, or --sheet-id <ID> (or set {} / {})",
        SourceError::NotConfigured,
        ENV_URL,
        ENV_SHEET_ID
    ))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
