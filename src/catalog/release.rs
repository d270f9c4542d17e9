use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One downloadable version entry from the catalog page.
///
/// Immutable once constructed; a fresh set is built on every catalog fetch.
/// The derived download operations live in [`crate::mirror`],
/// [`crate::download`] and [`crate::install`] and take the record (or its
/// `file_name`) as an explicit argument.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Release {
    /// Self-reported version label, raw column text.
    pub optifine_version: String,
    /// Opaque token from the mirror link; the only stable key for resolving
    /// a direct download URL later.
    pub file_name: String,
    /// Companion Forge build label, raw column text (e.g. "N/A").
    pub forge_version: String,
    /// Minecraft version sliced out of `file_name`.
    pub minecraft_version: String,
    /// Publication date of the release. A calendar date, no time of day.
    pub published: NaiveDate,
    /// Absolute changelog URL, when the row carries a changelog link.
    pub changelog_url: Option<String>,
}

/// Partial-record predicate over [`Release`].
///
/// A release matches when every `Some` field is exactly equal to the
/// same-named release field. No substring, case-insensitive or range
/// matching; the date compares by value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseFilter {
    pub optifine_version: Option<String>,
    pub file_name: Option<String>,
    pub forge_version: Option<String>,
    pub minecraft_version: Option<String>,
    pub published: Option<NaiveDate>,
    pub changelog_url: Option<String>,
}

impl ReleaseFilter {
    pub fn matches(&self, release: &Release) -> bool {
        if let Some(ref v) = self.optifine_version {
            if v != &release.optifine_version {
                return false;
            }
        }
        if let Some(ref v) = self.file_name {
            if v != &release.file_name {
                return false;
            }
        }
        if let Some(ref v) = self.forge_version {
            if v != &release.forge_version {
                return false;
            }
        }
        if let Some(ref v) = self.minecraft_version {
            if v != &release.minecraft_version {
                return false;
            }
        }
        if let Some(v) = self.published {
            if v != release.published {
                return false;
            }
        }
        if let Some(ref v) = self.changelog_url {
            if release.changelog_url.as_ref() != Some(v) {
                return false;
            }
        }
        true
    }
}
