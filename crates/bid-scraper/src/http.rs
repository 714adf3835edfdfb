use std::io::prelude::*;

use anyhow::anyhow;
use async_trait::async_trait;
use flate2::read::GzDecoder;
use reqwest::header::CONTENT_TYPE;
use scraper::Html;
use url::Url;

use crate::page::{Dom, Element, Page};

/// A `Page` over plain HTTP: no scripts run, so what is downloaded is what
/// gets scraped.
#[derive(Debug, Clone)]
pub struct HttpPage {
    client: reqwest::Client,
    current: Option<Loaded>,
}

#[derive(Debug, Clone)]
struct Loaded {
    url: String,
    body: String,
}

impl HttpPage {
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(user_agent)
            .gzip(true)
            .deflate(true)
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            current: None,
        }
    }

    fn loaded(&self) -> anyhow::Result<&Loaded> {
        self.current
            .as_ref()
            .ok_or_else(|| anyhow!("No page loaded yet"))
    }
}

async fn download(client: &reqwest::Client, url: &str) -> anyhow::Result<String> {
    let resp = client.get(url).send().await?.error_for_status()?;

    let page = match resp.headers().get(CONTENT_TYPE) {
        Some(c) if c == "application/x-gzip" || c == "application/gzip" => {
            let compressed = resp.bytes().await?;
            let mut gz = GzDecoder::new(&compressed[..]);
            let mut page = String::new();
            gz.read_to_string(&mut page)?;
            page
        }
        _ => resp.text().await?,
    };

    Ok(page)
}

/// Resolves the `href` of the first element matching `selector`.
fn link_target(loaded: &Loaded, selector: &str) -> anyhow::Result<Url> {
    let html = Html::parse_document(&loaded.body);
    let link = Dom::select(&html, selector)?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("Nothing matches {selector:?} on {}", loaded.url))?;
    let href = Element::attr(&link, "href")?
        .ok_or_else(|| anyhow!("Element {selector:?} on {} has no href", loaded.url))?;
    Ok(Url::parse(&loaded.url)?.join(&href)?)
}

#[async_trait]
impl Page for HttpPage {
    async fn goto(&mut self, url: &str) -> anyhow::Result<()> {
        let body = download(&self.client, url).await?;
        self.current = Some(Loaded {
            url: url.to_string(),
            body,
        });
        Ok(())
    }

    async fn click(&mut self, selector: &str) -> anyhow::Result<()> {
        let target = link_target(self.loaded()?, selector)?;
        log::debug!("Following {selector:?} to {target}");
        self.goto(target.as_str()).await
    }

    async fn wait_for_network_idle(&mut self) -> anyhow::Result<()> {
        self.loaded().map(|_| ())
    }

    async fn content(&self) -> anyhow::Result<String> {
        self.loaded().map(|loaded| loaded.body.clone())
    }

    fn url(&self) -> Option<&str> {
        self.current.as_ref().map(|loaded| loaded.url.as_str())
    }
}
