use clap::Parser;
use std::path::PathBuf;

/// Get the default cache directory for sheet-leaderboard
/// Uses platform-specific cache directories:
/// - Linux: ~/.cache/sheet-leaderboard
/// - macOS: ~/Library/Caches/sheet-leaderboard
/// - Windows: %LOCALAPPDATA%/sheet-leaderboard
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir().map(|p| p.join("sheet-leaderboard")).unwrap_or_else(|| PathBuf::from(".leaderboard"))
}

#[derive(Parser, Debug, Clone)]
#[command(name = "leaderboard")]
#[command(about = "Rank a spreadsheet leaderboard by return on spend and render it in the terminal")]
#[command(version)]
pub struct CliArgs {
    /// Read the table from a local CSV or JSON export
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Fetch the table from a URL serving CSV or JSON
    /// Falls back to the LEADERBOARD_URL environment variable
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Google Sheet ID (the sheet must be shared as "anyone with the link")
    /// Falls back to the LEADERBOARD_SHEET_ID environment variable
    #[arg(long, value_name = "ID")]
    pub sheet_id: Option<String>,

    /// Tab (gid) of the Google Sheet
    #[arg(long, default_value = "0", requires = "sheet_id")]
    pub gid: u64,

    /// Ranking of tied ratios: dense (ties share a rank) or ordinal (unique ranks)
    #[arg(long, default_value = "dense", value_name = "MODE")]
    pub rank_mode: String,

    /// Records with a missing ratio: trail (keep unranked at the end) or drop
    #[arg(long, default_value = "trail", value_name = "POLICY")]
    pub null_policy: String,

    /// Columns to display, comma-separated (see --list-columns)
    /// Example: --columns rank,username,roi,contests
    #[arg(long, value_name = "COLUMNS")]
    pub columns: Option<String>,

    /// Minimum ROI for the filtered table (clamped to the observed range)
    #[arg(long, value_name = "RATIO", allow_negative_numbers = true)]
    pub min_ratio: Option<f64>,

    /// Don't show the filtered table
    #[arg(long)]
    pub no_filter: bool,

    /// Number of rows in the main table
    #[arg(long, default_value = "10")]
    pub top: usize,

    /// Don't show the ROI bar chart
    #[arg(long)]
    pub no_chart: bool,

    /// Print the report as JSON instead of tables
    #[arg(long)]
    pub json: bool,

    /// Also write the report as Markdown to this path
    #[arg(long, value_name = "PATH")]
    pub output_md: Option<PathBuf>,

    /// Also write the report as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub output_json: Option<PathBuf>,

    /// Directory for the snapshot cache
    /// Default: ~/.cache/sheet-leaderboard (Linux), ~/Library/Caches/sheet-leaderboard (macOS)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Seconds a cached snapshot stays fresh
    #[arg(long, default_value = "600", value_name = "SECONDS")]
    pub ttl: u64,

    /// Always fetch, never read or write the snapshot cache
    #[arg(long)]
    pub no_cache: bool,

    /// Clean the cache directory before running (forces a fresh fetch)
    #[arg(long)]
    pub clean: bool,

    /// Override console width for testing (default: auto-detect)
    #[arg(long, value_name = "COLUMNS")]
    pub console_width: Option<usize>,

    /// List the available columns and exit
    #[arg(long)]
    pub list_columns: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        let mut args = CliArgs::parse();

        // Treat blank values as absent
        args.url = args.url.filter(|u| !u.trim().is_empty());
        args.sheet_id = args.sheet_id.filter(|s| !s.trim().is_empty());

        args
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        let sources = [self.input.is_some(), self.url.is_some(), self.sheet_id.is_some()];
        if sources.iter().filter(|s| **s).count() > 1 {
            return Err("Specify only one of --input, --url, or --sheet-id".to_string());
        }

        if self.top == 0 {
            return Err("--top must be at least 1".to_string());
        }

        if let Some(ratio) = self.min_ratio {
            if !ratio.is_finite() {
                return Err(format!("--min-ratio must be a finite number, got {}", ratio));
            }
            if self.no_filter {
                return Err("Cannot specify both --min-ratio and --no-filter".to_string());
            }
        }

        if let Some(ref columns) = self.columns
            && columns.split(',').all(|c| c.trim().is_empty())
        {
            return Err("--columns needs at least one column (see --list-columns)".to_string());
        }

        if self.ttl == 0 && !self.no_cache {
            return Err("--ttl must be at least 1 second (use --no-cache to disable caching)".to_string());
        }

        Ok(())
    }

    /// Get the cache directory, using the default cache location if not specified
    pub fn get_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(default_cache_dir)
    }
}
