/// Data source module - fetching the raw leaderboard table
///
/// This module handles:
/// - HTTP requests to published spreadsheets and arbitrary URLs
/// - Reading local CSV/JSON exports
/// - Parsing CSV, JSON record arrays, and Sheets-style value grids into rows
///
/// Every failure is reported as a `SourceError`; callers decide whether to
/// surface it and continue with an empty table.
use crate::types::RawRow;
use log::debug;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

const USER_AGENT: &str = concat!("sheet-leaderboard/", env!("CARGO_PKG_VERSION"));

/// Where the leaderboard table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Local `.json` or CSV export
    File(PathBuf),
    /// Any URL serving CSV or JSON
    Url(String),
    /// A Google Sheet shared as "anyone with the link", exported as CSV
    GoogleSheet { id: String, gid: u64 },
}

impl DataSource {
    /// Stable identifier used to key the snapshot cache
    pub fn cache_key(&self) -> String {
        match self {
            DataSource::File(path) => format!("file:{}", path.display()),
            DataSource::Url(url) => format!("url:{}", url),
            DataSource::GoogleSheet { id, gid } => format!("sheet:{}:{}", id, gid),
        }
    }

    pub fn is_remote(&self) -> bool {
        !matches!(self, DataSource::File(_))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{}", url),
            DataSource::GoogleSheet { id, gid } => write!(f, "Google Sheet {} (gid {})", id, gid),
        }
    }
}

/// Why the table could not be loaded
#[derive(Error, Debug)]
pub enum SourceError {
    /// No source flag or environment variable was given
    #[error("no data source configured")]
    NotConfigured,

    /// The sheet is private or the link requires signing in
    #[error("access denied for '{url}' (is the sheet shared with \"anyone with the link\"?)")]
    Unauthorized { url: String },

    /// The sheet or tab does not exist
    #[error("table not found at '{url}'")]
    NotFound { url: String },

    /// Any other HTTP or transport failure
    #[error("failed to fetch '{url}': {message}")]
    Http { url: String, message: String },

    /// Failed to read a local export
    #[error("failed to read '{path}': {source}")]
    Io { path: PathBuf, source: std::io::Error },

    /// The payload is not a table we understand
    #[error("failed to parse table: {0}")]
    Parse(String),
}

/// Build the CSV export URL for a Google Sheet tab
pub fn google_sheet_csv_url(id: &str, gid: u64) -> String {
    format!("https://docs.google.com/spreadsheets/d/{}/export?format=csv&gid={}", id, gid)
}

/// Fetch all records from the configured source
pub fn fetch_leaderboard_data(source: &DataSource) -> Result<Vec<RawRow>, SourceError> {
    debug!("fetching leaderboard data from {}", source);

    let rows = match source {
        DataSource::File(path) => read_file(path)?,
        DataSource::Url(url) => fetch_remote(url)?,
        DataSource::GoogleSheet { id, gid } => fetch_remote(&google_sheet_csv_url(id, *gid))?,
    };

    debug!("fetched {} rows from {}", rows.len(), source);
    Ok(rows)
}

/// Download and parse a remote table; an HTML page means a sign-in wall
fn fetch_remote(url: &str) -> Result<Vec<RawRow>, SourceError> {
    let body = http_get_bytes(url)?;
    parse_payload(&body).map_err(|e| match e {
        SourceError::Parse(msg) if looks_like_html(&body) => {
            debug!("got HTML instead of data ({}), treating as sign-in page", msg);
            SourceError::Unauthorized { url: url.to_string() }
        }
        other => other,
    })
}

/// Download data from a URL using HTTP GET
pub fn http_get_bytes(url: &str) -> Result<Vec<u8>, SourceError> {
    let resp = match ureq::get(url).set("User-Agent", USER_AGENT).call() {
        Ok(resp) => resp,
        Err(ureq::Error::Status(401 | 403, _)) => return Err(SourceError::Unauthorized { url: url.to_string() }),
        Err(ureq::Error::Status(404, _)) => return Err(SourceError::NotFound { url: url.to_string() }),
        Err(ureq::Error::Status(code, resp)) => {
            return Err(SourceError::Http {
                url: url.to_string(),
                message: format!("HTTP {} {}", code, resp.status_text()),
            });
        }
        Err(e) => return Err(SourceError::Http { url: url.to_string(), message: e.to_string() }),
    };

    let len = resp.header("Content-Length").and_then(|s| s.parse::<usize>().ok()).unwrap_or(0);
    let mut data: Vec<u8> = Vec::with_capacity(len);
    resp.into_reader()
        .read_to_end(&mut data)
        .map_err(|e| SourceError::Http { url: url.to_string(), message: e.to_string() })?;
    Ok(data)
}

fn read_file(path: &Path) -> Result<Vec<RawRow>, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Io { path: path.to_path_buf(), source })?;

    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json { parse_json(&bytes) } else { parse_payload(&bytes) }
}

/// Parse a payload as JSON when it looks like JSON, else as CSV with a header row
pub fn parse_payload(bytes: &[u8]) -> Result<Vec<RawRow>, SourceError> {
    match first_non_whitespace(bytes) {
        None => Ok(Vec::new()),
        Some(b'[') | Some(b'{') => parse_json(bytes),
        Some(b'<') => Err(SourceError::Parse("expected CSV or JSON, got markup".to_string())),
        Some(_) => parse_csv(bytes),
    }
}

fn first_non_whitespace(bytes: &[u8]) -> Option<u8> {
    // Skip a UTF-8 BOM, which spreadsheet exports like to add
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    bytes.iter().copied().find(|b| !b.is_ascii_whitespace())
}

fn looks_like_html(bytes: &[u8]) -> bool {
    first_non_whitespace(bytes) == Some(b'<')
}

/// Parse CSV with a header row; every cell becomes a string value
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<RawRow>, SourceError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| SourceError::Parse(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| SourceError::Parse(e.to_string()))?;
        let mut row = RawRow::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            if header.is_empty() {
                continue;
            }
            row.insert(header.clone(), Value::String(cell.to_string()));
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Parse JSON: either an array of record objects, or a Sheets-style
/// `{"values": [[header...], [cell...], ...]}` grid
pub fn parse_json(bytes: &[u8]) -> Result<Vec<RawRow>, SourceError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| SourceError::Parse(e.to_string()))?;

    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(map),
                other => Err(SourceError::Parse(format!("record {} is not an object: {}", i, other))),
            })
            .collect(),
        Value::Object(mut map) => match map.remove("values") {
            Some(Value::Array(grid)) => rows_from_grid(grid),
            _ => Err(SourceError::Parse("expected an array of records or a \"values\" grid".to_string())),
        },
        other => Err(SourceError::Parse(format!("unexpected JSON document: {}", other))),
    }
}

/// First grid row is the header; short rows leave trailing columns absent
fn rows_from_grid(grid: Vec<Value>) -> Result<Vec<RawRow>, SourceError> {
    let mut lines = grid.into_iter();
    let headers: Vec<String> = match lines.next() {
        None => return Ok(Vec::new()),
        Some(Value::Array(cells)) => cells.iter().map(cell_text).collect(),
        Some(other) => return Err(SourceError::Parse(format!("header row is not an array: {}", other))),
    };

    lines
        .map(|line| match line {
            Value::Array(cells) => Ok(headers
                .iter()
                .zip(cells)
                .filter(|(h, _)| !h.is_empty())
                .map(|(h, cell)| (h.clone(), cell))
                .collect::<RawRow>()),
            other => Err(SourceError::Parse(format!("row is not an array: {}", other))),
        })
        .collect()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
