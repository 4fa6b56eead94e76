//! Conventional storage paths derived from resource fields. Keys double as
//! both primary records and denormalized indexes: a date index for builds,
//! a per-environment "latest" pointer and per-build release history for
//! releases.

use chrono::{DateTime, Utc};

use crate::model::{slugify, Build, Release};
use crate::store::traits::StoreError;

/// Folder where build records are stored by ID.
pub const BUILDS_FOLDER: &str = "builds";
/// Folder where build records are indexed by date.
pub const DATES_FOLDER: &str = "dates";
/// Folder where release records are stored per environment.
pub const ENVIRONMENTS_FOLDER: &str = "environments";

/// 24-hour timestamp so that lexicographic order of index entries is
/// chronological order.
fn timestamp(date: DateTime<Utc>) -> String {
    date.format("%Y%m%d%H%M%S").to_string()
}

/// Path holding the canonical JSON record for a build.
pub fn build_data_path(product_id: &str, build_version: &str) -> String {
    format!(
        "/{}/{}/{}/build.json",
        slugify(product_id),
        BUILDS_FOLDER,
        build_version
    )
}

/// Chronological index entry for a build. Alpha sort of version strings does
/// not give chronological order (1.100.3 sorts before 1.25.1), so builds get
/// a second path keyed by completion time.
pub fn build_date_path(product_id: &str, build: &Build) -> String {
    format!(
        "/{}/{}/{}-{}",
        slugify(product_id),
        DATES_FOLDER,
        timestamp(build.build_date_utc),
        build.version
    )
}

fn representative_build(release: &Release) -> Result<&Build, StoreError> {
    release.representative_build().ok_or_else(|| {
        StoreError::Validation("release must contain at least one build".to_string())
    })
}

/// Path holding the most recent release for a product and environment.
pub fn release_latest_path(release: &Release) -> Result<String, StoreError> {
    // A release with no builds has no representative build and is invalid
    // even though this particular path does not name one.
    representative_build(release)?;

    Ok(format!(
        "/{}/{}/{}/latest.json",
        slugify(&release.product.id),
        ENVIRONMENTS_FOLDER,
        slugify(&release.environment_id)
    ))
}

/// Per-environment release history entry, named after the representative
/// build and its completion time.
pub fn release_history_path(release: &Release) -> Result<String, StoreError> {
    let build = representative_build(release)?;

    Ok(format!(
        "/{}/{}/{}/{}-{}.json",
        slugify(&release.product.id),
        ENVIRONMENTS_FOLDER,
        slugify(&release.environment_id),
        timestamp(build.build_date_utc),
        slugify(&build.version)
    ))
}

/// Release history entry seen from the build's perspective, named after the
/// deployment time and target environment.
pub fn build_release_history_path(release: &Release) -> Result<String, StoreError> {
    let build = representative_build(release)?;

    Ok(format!(
        "/{}/{}/{}/releases/{}-{}.json",
        slugify(&release.product.id),
        BUILDS_FOLDER,
        slugify(&build.version),
        timestamp(release.deployment.deploy_date),
        slugify(&release.environment_id)
    ))
}
