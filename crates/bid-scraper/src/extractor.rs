use std::collections::HashSet;

use scraper::Html;

use crate::bid::{Attachment, BidItem};
use crate::config::ExtractorConfig;
use crate::identifier::bid_identifier;
use crate::page::{Dom, Element};

/// Extracts every bid listed in `dom`.
///
/// A container that fails to parse, or whose title carries no bid number, is
/// left out; the same goes for single attachments. The result is deduplicated
/// and keeps the document order.
pub fn extract_bids<D>(dom: &D, config: &ExtractorConfig) -> Vec<BidItem>
where
    D: Dom + ?Sized,
{
    let containers = match dom.select(&config.container_selector) {
        Ok(containers) => containers,
        Err(e) => {
            log::error!("Couldn't locate bid containers got: {e}");
            return vec![];
        }
    };

    let mut bids = Vec::with_capacity(containers.len());
    for (i, container) in containers.iter().enumerate() {
        match parse_container(container, config) {
            Ok(Some(bid)) => bids.push(bid),
            Ok(None) => (),
            Err(e) => log::error!("Skipping bid container #{i} got: {e}"),
        }
    }

    dedup_bids(bids)
}

/// Parses an HTML snapshot and extracts its bids.
pub fn parse_bids(page: &str, config: &ExtractorConfig) -> Vec<BidItem> {
    let html = Html::parse_document(page);
    extract_bids(&html, config)
}

fn parse_container<E: Element>(
    container: &E,
    config: &ExtractorConfig,
) -> anyhow::Result<Option<BidItem>> {
    let mut links = container.select(&config.title_selector)?;
    let link = match links.len() {
        0 => return Ok(None),
        1 => links.swap_remove(0),
        n => anyhow::bail!(
            "Ambiguous title, {n} elements match {:?}",
            config.title_selector
        ),
    };

    let title = strip_boilerplate(&link.text()?, &config.title_boilerplate);

    let details_url_for_item = link
        .attr("href")?
        .filter(|href| !href.is_empty())
        .map(|href| format!("{}{}", config.details_base_url, href));

    let signal_source_unique_id = match bid_identifier(&title) {
        Some(id) => id,
        None => {
            log::debug!("No bid number in {title:?}");
            return Ok(None);
        }
    };

    let attachments = container
        .select(&config.attachment_selector)?
        .iter()
        .enumerate()
        .filter_map(|(i, elem)| match elem.attr("href") {
            Ok(Some(href)) if !href.is_empty() => Some(Attachment::from_url(&href)),
            Ok(_) => None,
            Err(e) => {
                log::warn!("Skipping attachment #{i} of {signal_source_unique_id} got: {e}");
                None
            }
        })
        .collect();

    Ok(Some(BidItem {
        title,
        signal_source_unique_id,
        due_date: None,
        details_url_for_item,
        attachments,
        source_url: None,
    }))
}

fn strip_boilerplate(text: &str, boilerplate: &str) -> String {
    if boilerplate.is_empty() {
        return text.trim().to_string();
    }
    text.replacen(boilerplate, "", 1).trim().to_string()
}

#[derive(PartialEq, Eq, Hash)]
struct BidKey<'a> {
    title: &'a str,
    id: &'a str,
    due_date: Option<&'a str>,
    details_url: Option<&'a str>,
    attachments: Vec<(&'a str, &'a str)>,
}

impl<'a> From<&'a BidItem> for BidKey<'a> {
    fn from(bid: &'a BidItem) -> Self {
        Self {
            title: &bid.title,
            id: &bid.signal_source_unique_id,
            due_date: bid.due_date.as_deref(),
            details_url: bid.details_url_for_item.as_deref(),
            attachments: bid
                .attachments
                .iter()
                .map(|att| {
                    (
                        att.filename.as_str(),
                        att.suggested_filename.as_deref().unwrap_or(""),
                    )
                })
                .collect(),
        }
    }
}

/// Drops later duplicates, first occurrence wins.
pub fn dedup_bids(bids: Vec<BidItem>) -> Vec<BidItem> {
    let mut seen = HashSet::with_capacity(bids.len());
    let keep: Vec<bool> = bids
        .iter()
        .map(|bid| seen.insert(BidKey::from(bid)))
        .collect();
    drop(seen);

    bids.into_iter()
        .zip(keep)
        .filter_map(|(bid, keep)| keep.then_some(bid))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::strip_boilerplate;

    #[test]
    fn strips_first_boilerplate_and_whitespace() {
        assert_eq!(
            strip_boilerplate("\n  BID NO FY 2025-11 Read More \n", "Read More"),
            "BID NO FY 2025-11"
        );
        assert_eq!(
            strip_boilerplate("Read More Read More", "Read More"),
            "Read More"
        );
        assert_eq!(strip_boilerplate("  FY 2023-08 ", ""), "FY 2023-08");
    }
}
