// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod cache;
mod cli;
mod columns;
mod config;
mod console_format;
mod filter;
mod report;
mod source;
mod transform;
mod types;
mod ui;

use log::{debug, info};
use types::*;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    if args.list_columns {
        print_column_list();
        return;
    }

    // Clean cache directory if requested
    if args.clean {
        let cache_dir = args.get_cache_dir();
        match cache::clean(&cache_dir) {
            Ok(()) => ui::status(&format!("cleaned cache directory: {}", cache_dir.display())),
            Err(e) => ui::print_warning(&format!("failed to clean cache directory: {}", e)),
        }
    }

    // Set console width override if specified (for testing)
    if let Some(width) = args.console_width {
        console_format::set_console_width(width);
    }

    // Build run configuration
    let config = match config::build_leaderboard_config(&args) {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    let (snapshot, notice) = load_snapshot(&config, args.json);
    if snapshot.is_empty() && notice.is_none() && !args.json {
        ui::status("the source table has no rows");
    }
    let report = report::LeaderboardReport::build(&snapshot, &config.report_options(), notice);

    if args.json {
        match serde_json::to_string_pretty(&report::report_json(&report)) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                ui::print_error(&format!("Failed to serialize report: {}", e));
                std::process::exit(1);
            }
        }
    } else if let Err(e) = report::print_report(&report, config.chart) {
        debug!("stdout closed while printing report: {}", e);
    }

    generate_file_reports(&report, &args, config.chart);
}

/// Fetch (or reuse) the rows and run the transform
///
/// A source failure becomes a notice and an empty snapshot; the run goes on.
fn load_snapshot(config: &LeaderboardConfig, quiet: bool) -> (LeaderboardSnapshot, Option<String>) {
    let description = config.source.to_string();

    if !quiet && config.source.is_remote() {
        ui::status(&format!("fetching {}", description));
    }

    match cache::load_rows(&config.source, &config.cache) {
        Ok(loaded) => {
            let records = transform::transform(&loaded.rows, config.rank_mode, config.null_policy);
            info!(
                "{} rows -> {} records ({}{})",
                loaded.rows.len(),
                records.len(),
                config.rank_mode,
                if loaded.from_cache { ", cached" } else { "" }
            );
            (LeaderboardSnapshot::new(description, loaded.fetched_at, records), None)
        }
        Err(e) => {
            let notice = ui::source_notice(&e);
            ui::print_notice(&notice);
            (LeaderboardSnapshot::new(description, chrono::Local::now(), Vec::new()), Some(notice))
        }
    }
}

/// Write the optional Markdown and JSON exports; failures are warnings only
fn generate_file_reports(report: &report::LeaderboardReport, args: &cli::CliArgs, show_chart: bool) {
    if let Some(ref path) = args.output_md {
        match report::export_markdown_report(report, path, show_chart) {
            Ok(()) => ui::status(&format!("Markdown report saved to: {}", path.display())),
            Err(e) => ui::print_warning(&format!("Failed to save Markdown report: {}", e)),
        }
    }

    if let Some(ref path) = args.output_json {
        match report::export_json_report(report, path) {
            Ok(()) => ui::status(&format!("JSON report saved to: {}", path.display())),
            Err(e) => ui::print_warning(&format!("Failed to save JSON report: {}", e)),
        }
    }
}

/// Print the selectable columns with their labels and help text
fn print_column_list() {
    let defaults = columns::Column::default_set();
    println!("Available columns (default marked with *):\n");
    for column in columns::Column::ALL {
        let spec = column.spec();
        let marker = if defaults.contains(&column) { "*" } else { " " };
        println!("  {} {:<24} {:<16} {}", marker, spec.key, spec.label, spec.help);
    }
}
