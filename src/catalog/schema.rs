use scraper::Selector;

/// Versioned selector set binding the pipeline to the site's markup.
///
/// Every structural assumption about the pages lives here: the catalog row
/// marker, the per-column sub-selectors, the mirror page's download anchor,
/// and the literal markers used to slice derived fields out of attribute
/// values. A markup change on the site is absorbed by a new schema version
/// instead of edits across the extraction code.
pub struct SelectorSchema {
    pub(crate) row: Selector,
    pub(crate) file_cell: Selector,
    pub(crate) mirror_anchor: Selector,
    pub(crate) forge_cell: Selector,
    pub(crate) date_cell: Selector,
    pub(crate) changelog_anchor: Selector,
    pub(crate) download_anchor: Selector,
    /// Marker preceding the file identifier in the mirror link's query.
    pub(crate) file_marker: &'static str,
    /// Marker preceding the Minecraft version inside the file identifier.
    pub(crate) version_marker: &'static str,
}

impl SelectorSchema {
    /// Selectors for the page layout the site has served since the catalog
    /// moved to the `downloadLine` table rows.
    pub fn v1() -> Self {
        Self {
            row: selector("tr.downloadLine"),
            file_cell: selector("td.colFile"),
            mirror_anchor: selector("td.colMirror a"),
            forge_cell: selector("td.colForge"),
            date_cell: selector("td.colDate"),
            changelog_anchor: selector("td.colChangelog a"),
            download_anchor: selector("#Download > a"),
            file_marker: "f=",
            version_marker: "OptiFine_",
        }
    }
}

impl Default for SelectorSchema {
    fn default() -> Self {
        Self::v1()
    }
}

/// Parses a selector that is part of the schema itself; these are fixed
/// strings, so a parse failure is a bug in the schema, not a runtime
/// condition.
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("Invalid selector {:?}: {:?}", css, e))
}
