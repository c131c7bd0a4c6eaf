//! Generation of the new bundle skeleton
//!
//! The bundle class and its `bundles.yml` registration are rendered from
//! embedded templates. Previously migrated views and assets are removed so
//! the run starts from a clean bundle.

use log::info;

use crate::error::Result;
use crate::filesystem::FileSystem;
use crate::migration::LoggedFs;
use crate::resolver::{PathResolver, PUBLIC_FOLDER, VIEWS_FOLDER};

const BUNDLE_CLASS_TEMPLATE: &str = include_str!("../templates/bundle_class.php");
const BUNDLES_YML_TEMPLATE: &str = include_str!("../templates/bundles.yml");

/// Placeholder replaced with the versioned bundle folder name
const TEMPLATE_PLACEHOLDER: &str = "ThemeDefaultBundle";

/// Write the bundle class and `Resources/config/oro/bundles.yml`.
///
/// Returns the paths written.
pub fn generate_bundle<F: FileSystem>(
    files: &mut LoggedFs<F>,
    resolver: &PathResolver,
) -> Result<Vec<String>> {
    let folder = resolver.bundle_folder_name();
    let class_path = resolver.with_bundle_path(&format!("{}.php", resolver.bundle_class_name()));
    let bundles_yml_path = resolver.with_bundle_path("Resources/config/oro/bundles.yml");

    files.write(&class_path, &BUNDLE_CLASS_TEMPLATE.replace(TEMPLATE_PLACEHOLDER, &folder))?;
    files.write(&bundles_yml_path, &BUNDLES_YML_TEMPLATE.replace(TEMPLATE_PLACEHOLDER, &folder))?;
    info!("Generated bundle {} at {}", resolver.bundle_class_name(), resolver.new_bundle_path());

    Ok(vec![class_path, bundles_yml_path])
}

/// Remove the views and public assets of a previous run
pub fn clean_bundle<F: FileSystem>(files: &mut LoggedFs<F>, resolver: &PathResolver) -> Result<()> {
    files.remove(&resolver.with_bundle_path(PUBLIC_FOLDER))?;
    files.remove(&resolver.with_bundle_path(VIEWS_FOLDER))?;
    Ok(())
}
