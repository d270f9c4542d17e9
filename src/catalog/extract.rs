//! Extraction of [`Release`] records from catalog page markup.

use chrono::NaiveDate;
use log::warn;
use scraper::{ElementRef, Html, Selector};

use super::release::Release;
use super::schema::SelectorSchema;
use crate::error::ExtractionError;

/// Parses the catalog markup into releases, in document row order.
///
/// Pure function of its inputs: identical markup yields identical records in
/// identical order. A row whose load-bearing fields cannot be extracted
/// (mirror link, version marker, date) is skipped with a diagnostic instead
/// of failing the whole catalog; an absent changelog link only degrades that
/// one field to `None`.
pub fn extract_releases(markup: &str, base_url: &str, schema: &SelectorSchema) -> Vec<Release> {
    let document = Html::parse_document(markup);
    let mut releases = Vec::new();

    for (index, row) in document.select(&schema.row).enumerate() {
        match extract_release(&row, index, base_url, schema) {
            Ok(release) => releases.push(release),
            Err(e) => warn!("Skipping catalog row {}: {}", index, e),
        }
    }

    releases
}

fn extract_release(
    row: &ElementRef<'_>,
    index: usize,
    base_url: &str,
    schema: &SelectorSchema,
) -> Result<Release, ExtractionError> {
    let optifine_version =
        cell_text(row, &schema.file_cell).ok_or(ExtractionError::MissingField {
            row: index,
            field: "file",
        })?;

    let mirror_href = anchor_href(row, &schema.mirror_anchor)
        .ok_or(ExtractionError::MissingMirrorLink { row: index })?;
    let file_name = file_name_from_href(mirror_href, schema.file_marker)
        .ok_or(ExtractionError::MissingMirrorLink { row: index })?;

    let forge_version =
        cell_text(row, &schema.forge_cell).ok_or(ExtractionError::MissingField {
            row: index,
            field: "forge",
        })?;

    let minecraft_version = minecraft_version(&file_name, schema.version_marker)?;

    let date_text = cell_text(row, &schema.date_cell).ok_or(ExtractionError::MissingField {
        row: index,
        field: "date",
    })?;
    let published = parse_release_date(&date_text).ok_or_else(|| ExtractionError::InvalidDate {
        row: index,
        text: date_text.clone(),
    })?;

    // Best-effort: a row without a changelog link is still a usable release.
    let changelog_url =
        anchor_href(row, &schema.changelog_anchor).map(|href| join_url(base_url, href));

    Ok(Release {
        optifine_version,
        file_name,
        forge_version,
        minecraft_version,
        published,
        changelog_url,
    })
}

fn cell_text(row: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    row.select(selector)
        .next()
        .map(|cell| cell.text().collect::<String>().trim().to_string())
}

fn anchor_href<'a>(row: &'a ElementRef<'_>, selector: &Selector) -> Option<&'a str> {
    row.select(selector).next().and_then(|a| a.value().attr("href"))
}

/// Slices the file identifier out of a mirror link, e.g.
/// `/adloadx?f=OptiFine_1.19.2_HD_U_H9.jar` -> `OptiFine_1.19.2_HD_U_H9.jar`.
fn file_name_from_href(href: &str, marker: &str) -> Option<String> {
    href.split_once(marker)
        .map(|(_, file)| file.to_string())
        .filter(|file| !file.is_empty())
}

/// Slices the Minecraft version out of a file identifier: the text between
/// the version marker and the next underscore. Both must be present; an
/// identifier without them is a malformed record, never an empty version.
pub(crate) fn minecraft_version(
    file_name: &str,
    marker: &str,
) -> Result<String, ExtractionError> {
    let missing = || ExtractionError::MissingVersionMarker {
        file_name: file_name.to_string(),
    };

    let (_, after) = file_name.split_once(marker).ok_or_else(missing)?;
    let (version, _) = after.split_once('_').ok_or_else(missing)?;
    Ok(version.to_string())
}

/// Parses a `day.month.year` date cell. Two-digit years are in the 2000s.
fn parse_release_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('.');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let year = if year < 100 { year + 2000 } else { year };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn join_url(base_url: &str, href: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "https://optifine.net";

    fn row(file: &str, mirror: &str, forge: &str, date: &str, changelog: &str) -> String {
        format!(
            r#"<tr class="downloadLine">
                <td class="colFile">{file}</td>
                <td class="colMirror">{mirror}</td>
                <td class="colForge">{forge}</td>
                <td class="colDate">{date}</td>
                <td class="colChangelog">{changelog}</td>
            </tr>"#
        )
    }

    fn catalog(rows: &[String]) -> String {
        format!("<html><body><table>{}</table></body></html>", rows.join("\n"))
    }

    fn complete_row() -> String {
        row(
            "OptiFine HD U H9",
            r#"<a href="/adloadx?f=OptiFine_1.19.2_HD_U_H9.jar">mirror</a>"#,
            "20",
            "05.11.22",
            r#"<a href="changelog?f=OptiFine_1.19.2_HD_U_H9.jar">changelog</a>"#,
        )
    }

    #[test]
    fn test_extracts_all_fields_from_complete_row() {
        let markup = catalog(&[complete_row()]);
        let releases = extract_releases(&markup, BASE_URL, &SelectorSchema::v1());

        assert_eq!(releases.len(), 1);
        let release = &releases[0];
        assert_eq!(release.optifine_version, "OptiFine HD U H9");
        assert_eq!(release.file_name, "OptiFine_1.19.2_HD_U_H9.jar");
        assert_eq!(release.forge_version, "20");
        assert_eq!(release.minecraft_version, "1.19.2");
        assert_eq!(release.published, NaiveDate::from_ymd_opt(2022, 11, 5).unwrap());
        assert_eq!(
            release.changelog_url.as_deref(),
            Some("https://optifine.net/changelog?f=OptiFine_1.19.2_HD_U_H9.jar")
        );
    }

    #[test]
    fn test_extraction_is_deterministic_and_ordered() {
        let rows = [
            complete_row(),
            row(
                "OptiFine HD U H8",
                r#"<a href="/adloadx?f=OptiFine_1.19.1_HD_U_H8.jar">mirror</a>"#,
                "N/A",
                "20.09.22",
                r#"<a href="changelog?f=OptiFine_1.19.1_HD_U_H8.jar">changelog</a>"#,
            ),
        ];
        let markup = catalog(&rows);
        let schema = SelectorSchema::v1();

        let first = extract_releases(&markup, BASE_URL, &schema);
        let second = extract_releases(&markup, BASE_URL, &schema);

        assert_eq!(first.len(), 2);
        assert_eq!(first[0].file_name, "OptiFine_1.19.2_HD_U_H9.jar");
        assert_eq!(first[1].file_name, "OptiFine_1.19.1_HD_U_H8.jar");
        assert_eq!(first, second);
    }

    #[test]
    fn test_row_without_mirror_anchor_is_skipped() {
        let rows = [
            row("OptiFine HD U I1", "", "N/A", "01.01.23", ""),
            complete_row(),
        ];
        let markup = catalog(&rows);
        let releases = extract_releases(&markup, BASE_URL, &SelectorSchema::v1());

        // The broken row is dropped; the rest of the catalog survives.
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].file_name, "OptiFine_1.19.2_HD_U_H9.jar");
    }

    #[test]
    fn test_row_without_version_marker_is_skipped() {
        let rows = [row(
            "Something else",
            r#"<a href="/adloadx?f=Other_1.0.jar">mirror</a>"#,
            "N/A",
            "01.01.23",
            "",
        )];
        let markup = catalog(&rows);
        let releases = extract_releases(&markup, BASE_URL, &SelectorSchema::v1());

        assert!(releases.is_empty());
    }

    #[test]
    fn test_row_with_unparsable_date_is_skipped() {
        let rows = [row(
            "OptiFine HD U H9",
            r#"<a href="/adloadx?f=OptiFine_1.19.2_HD_U_H9.jar">mirror</a>"#,
            "20",
            "yesterday",
            "",
        )];
        let markup = catalog(&rows);
        let releases = extract_releases(&markup, BASE_URL, &SelectorSchema::v1());

        assert!(releases.is_empty());
    }

    #[test]
    fn test_missing_changelog_degrades_to_none() {
        let rows = [row(
            "OptiFine HD U H9",
            r#"<a href="/adloadx?f=OptiFine_1.19.2_HD_U_H9.jar">mirror</a>"#,
            "20",
            "05.11.22",
            "",
        )];
        let markup = catalog(&rows);
        let releases = extract_releases(&markup, BASE_URL, &SelectorSchema::v1());

        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].changelog_url, None);
    }

    #[test]
    fn test_no_rows_yields_empty_catalog() {
        let releases = extract_releases(
            "<html><body></body></html>",
            BASE_URL,
            &SelectorSchema::v1(),
        );
        assert!(releases.is_empty());
    }

    #[test]
    fn test_minecraft_version_slicing() {
        assert_eq!(
            minecraft_version("OptiFine_1.19.2_HD_U_H9.jar", "OptiFine_").unwrap(),
            "1.19.2"
        );
        // Preview builds carry a prefix before the marker.
        assert_eq!(
            minecraft_version("preview_OptiFine_1.14.4_HD_U_F4_pre5.jar", "OptiFine_").unwrap(),
            "1.14.4"
        );
    }

    #[test]
    fn test_minecraft_version_requires_marker_and_separator() {
        assert!(matches!(
            minecraft_version("Other_1.0.jar", "OptiFine_"),
            Err(ExtractionError::MissingVersionMarker { .. })
        ));
        // Marker present but no separator after the version.
        assert!(matches!(
            minecraft_version("OptiFine_1.19.2", "OptiFine_"),
            Err(ExtractionError::MissingVersionMarker { .. })
        ));
    }

    #[test]
    fn test_parse_release_date_two_digit_year() {
        assert_eq!(
            parse_release_date("05.11.22"),
            NaiveDate::from_ymd_opt(2022, 11, 5)
        );
    }

    #[test]
    fn test_parse_release_date_four_digit_year() {
        assert_eq!(
            parse_release_date("24.08.2019"),
            NaiveDate::from_ymd_opt(2019, 8, 24)
        );
    }

    #[test]
    fn test_parse_release_date_rejects_garbage() {
        assert_eq!(parse_release_date("2022-11-05"), None);
        assert_eq!(parse_release_date("05.11"), None);
        assert_eq!(parse_release_date("05.11.22.01"), None);
        assert_eq!(parse_release_date("32.13.22"), None);
    }

    #[test]
    fn test_file_name_from_href() {
        assert_eq!(
            file_name_from_href("/adloadx?f=OptiFine_1.19.2_HD_U_H9.jar", "f="),
            Some("OptiFine_1.19.2_HD_U_H9.jar".to_string())
        );
        assert_eq!(file_name_from_href("/adloadx", "f="), None);
        assert_eq!(file_name_from_href("/adloadx?f=", "f="), None);
    }
}
