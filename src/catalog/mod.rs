//! Catalog of releases scraped from the download site.

mod extract;
mod release;
mod schema;

use anyhow::Result;

use crate::site::FetchMarkup;

pub use extract::extract_releases;
pub use release::{Release, ReleaseFilter};
pub use schema::SelectorSchema;

/// Fetches the catalog page and returns the releases matching `filter`, in
/// document order. `None` matches every release. Records are built fresh on
/// every call; nothing is cached across calls.
#[tracing::instrument(skip(site, schema, filter))]
pub async fn fetch_releases<S: FetchMarkup + ?Sized>(
    site: &S,
    schema: &SelectorSchema,
    filter: Option<&ReleaseFilter>,
) -> Result<Vec<Release>> {
    let markup = site.catalog_markup().await?;
    let releases = extract_releases(&markup, site.base_url(), schema);

    Ok(releases
        .into_iter()
        .filter(|release| filter.map_or(true, |f| f.matches(release)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::MockFetchMarkup;

    const CATALOG: &str = r#"
        <table>
            <tr class="downloadLine">
                <td class="colFile">OptiFine HD U H9</td>
                <td class="colMirror"><a href="/adloadx?f=OptiFine_1.19.2_HD_U_H9.jar">mirror</a></td>
                <td class="colForge">20</td>
                <td class="colDate">05.11.22</td>
                <td class="colChangelog"><a href="changelog?f=OptiFine_1.19.2_HD_U_H9.jar">changelog</a></td>
            </tr>
            <tr class="downloadLine">
                <td class="colFile">OptiFine HD U H8</td>
                <td class="colMirror"><a href="/adloadx?f=OptiFine_1.19.1_HD_U_H8.jar">mirror</a></td>
                <td class="colForge">N/A</td>
                <td class="colDate">20.09.22</td>
                <td class="colChangelog"><a href="changelog?f=OptiFine_1.19.1_HD_U_H8.jar">changelog</a></td>
            </tr>
        </table>
    "#;

    #[test_log::test(tokio::test)]
    async fn test_fetch_releases_no_filter_returns_all() {
        let mut site = MockFetchMarkup::new();
        site.expect_catalog_markup()
            .returning(|| Ok(CATALOG.to_string()));
        site.expect_base_url().return_const("https://optifine.net".to_string());

        let releases = fetch_releases(&site, &SelectorSchema::v1(), None)
            .await
            .unwrap();

        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].minecraft_version, "1.19.2");
        assert_eq!(releases[1].minecraft_version, "1.19.1");
    }

    #[tokio::test]
    async fn test_fetch_releases_filter_preserves_order() {
        let mut site = MockFetchMarkup::new();
        site.expect_catalog_markup()
            .returning(|| Ok(CATALOG.to_string()));
        site.expect_base_url().return_const("https://optifine.net".to_string());

        let filter = ReleaseFilter {
            minecraft_version: Some("1.19.1".to_string()),
            ..Default::default()
        };
        let releases = fetch_releases(&site, &SelectorSchema::v1(), Some(&filter))
            .await
            .unwrap();

        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].file_name, "OptiFine_1.19.1_HD_U_H8.jar");
    }

    #[tokio::test]
    async fn test_fetch_releases_fetch_failure_propagates() {
        let mut site = MockFetchMarkup::new();
        site.expect_catalog_markup()
            .returning(|| Err(anyhow::anyhow!("fetch failed")));

        let result = fetch_releases(&site, &SelectorSchema::v1(), None).await;
        assert!(result.is_err());
    }
}
