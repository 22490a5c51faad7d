//! Listing page extraction: result rows into release records.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};

use super::magnet::{extract_info_hash, MalformedMagnetUri};
use super::publish_time::{resolve_publish_time, PublishTimeError};
use super::schema::{column_index, ColumnRole, RESULT_COLUMNS};
use super::size::{parse_size_cell, SizeParseError};
use super::{MINIMUM_RATIO, MINIMUM_SEED_TIME_SECS};
use crate::indexer::{ReleaseRecord, SearchOutcome, SkippedRow};

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#searchResult > tbody > tr").expect("static selector"));
static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("static selector"));
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("static selector"));
static MAGNET_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href^='magnet:']").expect("static selector"));

/// Why a single result row failed to map.
#[derive(Debug, Error)]
pub enum RowParseError {
    #[error("Row has {found} columns, expected {expected}")]
    ShortRow { found: usize, expected: usize },

    #[error("Missing {0} column")]
    MissingColumn(&'static str),

    #[error("Missing {0} link")]
    MissingLink(&'static str),

    #[error("Link target {target:?} does not resolve: {reason}")]
    BadLinkTarget { target: String, reason: String },

    #[error("Unparseable {field} count: {value:?}")]
    BadCount { field: &'static str, value: String },

    #[error(transparent)]
    Magnet(#[from] MalformedMagnetUri),

    #[error(transparent)]
    PublishTime(#[from] PublishTimeError),

    #[error(transparent)]
    Size(#[from] SizeParseError),
}

/// Extract every mappable result row from a fetched listing document.
///
/// A malformed row is skipped with a diagnostic; the rows that did
/// parse are always returned. `now` anchors relative timestamps.
pub fn extract_releases(html: &str, base_url: &Url, now: DateTime<Utc>) -> SearchOutcome {
    let document = Html::parse_document(html);
    let mut outcome = SearchOutcome::default();

    for (index, row) in document.select(&ROW_SELECTOR).enumerate() {
        match map_row(row, base_url, now) {
            Ok(record) => outcome.records.push(record),
            Err(e) => {
                warn!(row = index, error = %e, "skipping unmappable result row");
                outcome.skipped_rows.push(SkippedRow {
                    row: index,
                    reason: e.to_string(),
                });
            }
        }
    }

    debug!(
        records = outcome.records.len(),
        skipped = outcome.skipped_rows.len(),
        "extraction complete"
    );
    outcome
}

/// Map one result row into a release record, per the column schema.
fn map_row(
    row: ElementRef,
    base_url: &Url,
    now: DateTime<Utc>,
) -> Result<ReleaseRecord, RowParseError> {
    let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
    if cells.len() < RESULT_COLUMNS.len() {
        // Pagination and spacer rows fall through here as well.
        return Err(RowParseError::ShortRow {
            found: cells.len(),
            expected: RESULT_COLUMNS.len(),
        });
    }

    let title_link = cell(&cells, ColumnRole::Title)?
        .select(&LINK_SELECTOR)
        .next()
        .ok_or(RowParseError::MissingLink("title"))?;
    let title = text_of(title_link);
    let href = title_link
        .value()
        .attr("href")
        .ok_or(RowParseError::MissingLink("title"))?;
    let details_url = base_url
        .join(href)
        .map_err(|e| RowParseError::BadLinkTarget {
            target: href.to_string(),
            reason: e.to_string(),
        })?
        .to_string();

    let publish_date =
        resolve_publish_time(&text_of(cell(&cells, ColumnRole::PublishTime)?), now)?;

    let magnet_uri = cell(&cells, ColumnRole::Magnet)?
        .select(&MAGNET_SELECTOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .ok_or(RowParseError::MissingLink("magnet"))?;
    let info_hash = extract_info_hash(magnet_uri)?;

    let size_bytes = parse_size_cell(&text_of(cell(&cells, ColumnRole::Size)?))?;

    let seeders = parse_count(&cells, ColumnRole::Seeders)?;
    let leechers = parse_count(&cells, ColumnRole::Leechers)?;

    Ok(ReleaseRecord {
        description: title.clone(),
        guid: details_url.clone(),
        title,
        details_url,
        publish_date,
        magnet_uri: magnet_uri.to_string(),
        info_hash,
        size_bytes,
        seeders,
        peers: leechers.saturating_add(seeders),
        minimum_ratio: MINIMUM_RATIO,
        minimum_seed_time_secs: MINIMUM_SEED_TIME_SECS,
    })
}

fn cell<'a>(cells: &[ElementRef<'a>], role: ColumnRole) -> Result<ElementRef<'a>, RowParseError> {
    column_index(role)
        .and_then(|i| cells.get(i).copied())
        .ok_or(RowParseError::MissingColumn(role.label()))
}

fn parse_count(cells: &[ElementRef], role: ColumnRole) -> Result<u32, RowParseError> {
    let text = text_of(cell(cells, role)?);
    text.parse().map_err(|_| RowParseError::BadCount {
        field: role.label(),
        value: text,
    })
}

/// Concatenated text of an element, trimmed, non-breaking spaces folded.
fn text_of(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .replace('\u{a0}', " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base_url() -> Url {
        Url::parse("https://thepiratebay.se/").unwrap()
    }

    fn pinned_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap()
    }

    fn listing(rows: &str) -> String {
        format!(
            r#"<html><body><table id="searchResult"><tbody>{}</tbody></table></body></html>"#,
            rows
        )
    }

    const GOOD_ROW: &str = r#"<tr>
        <td><a href="/browse/200">Video</a></td>
        <td><a href="/torrent/1/Example.Show.S05E01" class="detLink">Example Show S05E01</a></td>
        <td>Today 10:00</td>
        <td><a href="magnet:?xt=urn:btih:ABCDEF1234&amp;dn=x">M</a></td>
        <td>1.5 GiB</td>
        <td>154</td>
        <td>21</td>
    </tr>"#;

    #[test]
    fn test_maps_a_well_formed_row() {
        let outcome = extract_releases(&listing(GOOD_ROW), &base_url(), pinned_now());
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.skipped_rows.is_empty());

        let record = &outcome.records[0];
        assert_eq!(record.title, "Example Show S05E01");
        assert_eq!(record.description, record.title);
        assert_eq!(
            record.details_url,
            "https://thepiratebay.se/torrent/1/Example.Show.S05E01"
        );
        assert_eq!(record.guid, record.details_url);
        assert_eq!(record.info_hash, "ABCDEF1234");
        assert_eq!(record.size_bytes, 1_610_612_736);
        assert_eq!(record.seeders, 154);
        assert_eq!(record.peers, 175);
    }

    #[test]
    fn test_skips_row_with_short_column_set() {
        let rows = format!("{}<tr><td>only one cell</td></tr>", GOOD_ROW);
        let outcome = extract_releases(&listing(&rows), &base_url(), pinned_now());
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.skipped_rows.len(), 1);
        assert_eq!(outcome.skipped_rows[0].row, 1);
    }

    #[test]
    fn test_skips_row_without_magnet_link() {
        let row = GOOD_ROW.replace("magnet:?xt=urn:btih:ABCDEF1234&amp;dn=x", "/torrent/1");
        let outcome = extract_releases(&listing(&row), &base_url(), pinned_now());
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.skipped_rows.len(), 1);
        assert!(outcome.skipped_rows[0].reason.contains("magnet"));
    }

    #[test]
    fn test_skips_row_with_bad_seeder_count() {
        let row = GOOD_ROW.replace("<td>154</td>", "<td>many</td>");
        let outcome = extract_releases(&listing(&row), &base_url(), pinned_now());
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.skipped_rows.len(), 1);
        assert!(outcome.skipped_rows[0].reason.contains("seeders"));
    }

    #[test]
    fn test_empty_document_yields_empty_outcome() {
        let outcome = extract_releases("<html><body></body></html>", &base_url(), pinned_now());
        assert!(outcome.records.is_empty());
        assert!(outcome.skipped_rows.is_empty());
    }
}
