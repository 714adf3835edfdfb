use crate::bid::BidItem;
use crate::config::HandlerConfig;
use crate::extractor::parse_bids;
use crate::page::Page;
use crate::scheduler::{TaskRequest, TaskScheduler};

/// Scrapes the bids listing and schedules a details task per linked bid.
///
/// Only the initial navigation can fail the run; past that point every
/// problem is logged and the bids found so far are returned.
pub async fn scrap_bids<P, S>(
    page: &mut P,
    scheduler: &S,
    config: &HandlerConfig,
) -> anyhow::Result<Vec<BidItem>>
where
    P: Page + ?Sized,
    S: TaskScheduler + Sync + ?Sized,
{
    page.goto(&config.listing_url).await?;

    if let Err(e) = open_listing(page, &config.bids_link_selector).await {
        log::warn!("Couldn't open bids listing, scraping current page got: {e}");
    }

    let bids = match page.content().await {
        Ok(content) => parse_bids(&content, &config.extractor),
        Err(e) => {
            log::error!("Couldn't read page content got: {e}");
            vec![]
        }
    };

    let mut scheduled = 0;
    for task in bids
        .iter()
        .filter_map(|bid| TaskRequest::for_bid(&config.task_name, bid))
    {
        scheduler.enqueue(task);
        scheduled += 1;
    }
    log::info!(
        "Found {} bids on {}, scheduled {scheduled} details tasks",
        bids.len(),
        page.url().unwrap_or(config.listing_url.as_str())
    );

    Ok(bids)
}

async fn open_listing<P>(page: &mut P, selector: &str) -> anyhow::Result<()>
where
    P: Page + ?Sized,
{
    page.click(selector).await?;
    page.wait_for_network_idle().await
}
