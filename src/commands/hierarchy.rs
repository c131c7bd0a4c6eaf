//! Hierarchy command implementation
//!
//! Prints the parent chain of the configured theme together with the ids the
//! themes receive once migrated, without touching the filesystem.

use anyhow::Result;
use clap::Args;

use super::ConfigArgs;
use theme_migration::filesystem::DiskFS;
use theme_migration::output::{emoji, OutputConfig};
use theme_migration::phases::hierarchy;
use theme_migration::resolver::PathResolver;

/// Arguments for the hierarchy command
#[derive(Args, Debug)]
pub struct HierarchyArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Execute the hierarchy command
pub fn execute(args: HierarchyArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config = args.config.load()?;
    let registry = config.registry();

    let chain = hierarchy::execute(&DiskFS::new(), &registry, &config.theme)?;
    let resolver = PathResolver::new(&config.app_root_path(), &config.app_version, &chain)?;

    println!(
        "{} Theme {} has {} ancestors",
        emoji(&out, "🌳", "[TREE]"),
        config.theme,
        chain.len() - 1
    );
    for (depth, theme) in chain.iter().enumerate() {
        println!(
            "{}{} -> {}",
            "  ".repeat(depth + 1),
            theme,
            resolver.new_theme_id(theme)
        );
    }
    println!("Target bundle: {}", resolver.new_bundle_path());

    Ok(())
}
