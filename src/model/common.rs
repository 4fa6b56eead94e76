use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};

pub type Id = String;

/// Pattern that every build version must match: lowercase alphanumeric runs
/// separated by dots or dashes, e.g. "1.25.3" or "2024.1-rc1".
static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:[.-][a-z0-9]+)*$").expect("version pattern compiles"));

pub fn is_valid_version(version: &str) -> bool {
    VERSION_PATTERN.is_match(version)
}

/// Converts a string to a slug which is safe for use as a filename or URL:
/// lowercase, with runs of whitespace and punctuation collapsed to single
/// hyphens and no leading or trailing hyphen. Characters that are neither
/// letters, digits, whitespace nor punctuation are dropped.
///
/// Idempotent: `slugify(slugify(x)) == slugify(x)`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut last_was_separator = true;

    for c in value.chars() {
        if c.is_whitespace() || c.is_ascii_punctuation() {
            if !last_was_separator {
                slug.push('-');
            }
            last_was_separator = true;
        } else if c.is_alphanumeric() {
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
            last_was_separator = false;
        }
    }

    // Slugs shouldn't end in a hyphen.
    if slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Serde helper so identifier fields are normalized on the way in and no
/// non-slug value ever enters the system.
pub fn deserialize_slug<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(slugify(&raw))
}
