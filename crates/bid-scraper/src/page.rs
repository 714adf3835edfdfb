use std::path::PathBuf;

use async_trait::async_trait;

/// A handle on a rendered element that can be queried further.
pub trait Element: Sized {
    /// Descendant elements matching a CSS selector, in document order.
    fn select(&self, selector: &str) -> anyhow::Result<Vec<Self>>;

    /// Concatenated text of all descendant text nodes.
    fn text(&self) -> anyhow::Result<String>;

    fn attr(&self, name: &str) -> anyhow::Result<Option<String>>;
}

/// A DOM snapshot that can be queried from its root.
pub trait Dom {
    type Element<'a>: Element
    where
        Self: 'a;

    fn select(&self, selector: &str) -> anyhow::Result<Vec<Self::Element<'_>>>;
}

/// The browser-like collaborator driven by the handler.
#[async_trait]
pub trait Page: Send + Sync {
    async fn goto(&mut self, url: &str) -> anyhow::Result<()>;

    async fn click(&mut self, selector: &str) -> anyhow::Result<()>;

    async fn wait_for_network_idle(&mut self) -> anyhow::Result<()>;

    /// Serialized HTML of the page as currently rendered.
    async fn content(&self) -> anyhow::Result<String>;

    fn url(&self) -> Option<&str>;
}

#[derive(Debug, Clone)]
pub enum PageLocation {
    Url(String),
    Path(PathBuf),
}

impl std::fmt::Display for PageLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
