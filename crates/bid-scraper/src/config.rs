use serde::{Deserialize, Serialize};

pub const PURCHASING_URL: &str = "https://etowahcounty.org/department/purchasing/";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractorConfig {
    #[serde(default = "default_container_selector")]
    pub container_selector: String,

    #[serde(default = "default_title_selector")]
    pub title_selector: String,

    #[serde(default = "default_attachment_selector")]
    pub attachment_selector: String,

    /// Prefix concatenated as-is with the scraped title href
    #[serde(default = "default_details_base_url")]
    pub details_base_url: String,

    #[serde(default = "default_title_boilerplate")]
    pub title_boilerplate: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            container_selector: default_container_selector(),
            title_selector: default_title_selector(),
            attachment_selector: default_attachment_selector(),
            details_base_url: default_details_base_url(),
            title_boilerplate: default_title_boilerplate(),
        }
    }
}

fn default_container_selector() -> String {
    String::from("div.post-wrapper")
}

fn default_title_selector() -> String {
    String::from("h3.title a")
}

fn default_attachment_selector() -> String {
    String::from("div.attachments div.attachment-title a")
}

fn default_details_base_url() -> String {
    String::from(PURCHASING_URL)
}

fn default_title_boilerplate() -> String {
    String::from("Read More")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerConfig {
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Navigational link leading to the bids listing, clicked best-effort
    #[serde(default = "default_bids_link_selector")]
    pub bids_link_selector: String,

    #[serde(default = "default_task_name")]
    pub task_name: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            bids_link_selector: default_bids_link_selector(),
            task_name: default_task_name(),
            user_agent: default_user_agent(),
            extractor: ExtractorConfig::default(),
        }
    }
}

fn default_listing_url() -> String {
    String::from(PURCHASING_URL)
}

fn default_bids_link_selector() -> String {
    String::from("html body main section div div div article div div div div div a")
}

fn default_task_name() -> String {
    String::from("bid-details")
}

fn default_user_agent() -> String {
    String::from("BidScraperBot")
}
