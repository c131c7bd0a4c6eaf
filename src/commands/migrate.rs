//! Migrate command implementation
//!
//! Runs the full migration pipeline against the host filesystem and prints
//! the report.

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::time::Instant;

use super::ConfigArgs;
use theme_migration::filesystem::DiskFS;
use theme_migration::output::{emoji, render_report, render_report_json, OutputConfig};
use theme_migration::phases::execute_migration;

/// Report formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// List every copied, skipped and removed file
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Execute the migrate command
pub fn execute(args: MigrateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let start_time = Instant::now();
    let config = args.config.load()?;

    if !args.quiet && args.format == ReportFormat::Text {
        println!(
            "{} Migrating theme {} from {} bundles",
            emoji(&out, "🔍", "[SCAN]"),
            config.theme,
            config.bundles.len()
        );
    }

    let (_, report) = execute_migration(DiskFS::new(), &config)?;

    match args.format {
        ReportFormat::Json => println!("{}", render_report_json(&report)?),
        ReportFormat::Text if !args.quiet => {
            print!("{}", render_report(&report, &out, args.verbose));
            println!(
                "{} Done in {:.2}s. Clear the application cache and reinstall assets to publish the new bundle.",
                emoji(&out, "🎉", "[DONE]"),
                start_time.elapsed().as_secs_f64()
            );
        }
        ReportFormat::Text => {}
    }

    Ok(())
}
