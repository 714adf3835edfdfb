mod bid;
mod config;
mod extractor;
mod handler;
mod html;
mod http;
mod identifier;
mod page;
mod scheduler;
mod writer;

pub use bid::{Attachment, BidItem, UNKNOWN_FILENAME};
pub use config::{ExtractorConfig, HandlerConfig, PURCHASING_URL};
pub use extractor::{dedup_bids, extract_bids, parse_bids};
pub use handler::scrap_bids;
pub use http::HttpPage;
pub use identifier::bid_identifier;
pub use page::{Dom, Element, Page, PageLocation};
pub use scheduler::{BidDetailsParams, LogScheduler, TaskRequest, TaskScheduler, TaskSender, TaskWriter};
pub use writer::{FileMode, RecordWriter};

pub use anyhow;
pub use async_trait::async_trait;
pub use scraper::Html;
