//! Catalog listings: locations and images
//!
//! The API returns one entry per location and OS; these commands print only
//! the distinct identifiers, sorted.

use std::collections::BTreeSet;

use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::output::{OutputFormat, print_output};

/// Sorted, deduplicated identifiers
fn distinct_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    ids.into_iter()
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub async fn handle_locations(
    conn_mgr: &ConnectionManager,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    let locations = conn_mgr.create_client()?.locations().list().await?;
    let ids = distinct_ids(locations.iter().map(|l| l.id.as_str()));
    print_output(ids, output_format, query)?;
    Ok(())
}

pub async fn handle_images(
    conn_mgr: &ConnectionManager,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    let images = conn_mgr.create_client()?.images().list().await?;
    let ids = distinct_ids(images.iter().map(|i| i.id.as_str()));
    print_output(ids, output_format, query)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_ids_sorted_and_unique() {
        let ids = distinct_ids(["Ubuntu-22.04-X64", "Debian-12-X64", "Ubuntu-22.04-X64"]);
        assert_eq!(ids, vec!["Debian-12-X64", "Ubuntu-22.04-X64"]);
    }

    #[test]
    fn test_distinct_ids_empty() {
        assert!(distinct_ids(Vec::<&str>::new()).is_empty());
    }
}
