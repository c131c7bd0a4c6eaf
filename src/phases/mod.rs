//! Implementation of the phases of a theme migration.
//!
//! ## Overview
//!
//! A migration follows 6 phases:
//! 1. Hierarchy - Walk the `parent` declarations of the theme
//! 2. Scaffold - Generate the new bundle class and registration
//! 3. Clean - Remove views and assets left by a previous run
//! 4. Assets - Mirror every bundle's published assets
//! 5. Datagrids - Merge the selected datagrids of the theme
//! 6. Extraction - Move the theme and each ancestor into the new bundle
//!
//! Each phase works on the filesystem owned by the run's
//! [`MigrationEngine`](crate::migration::MigrationEngine) and borrows the
//! registry and the resolver; none of them keeps state between runs.

pub mod assets;
pub mod datagrids;
pub mod extract;
pub mod hierarchy;
pub mod orchestrator;
pub mod scaffold;

pub use orchestrator::{execute_migration, MigrationReport};
