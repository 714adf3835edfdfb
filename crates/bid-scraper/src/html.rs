//! `scraper` backed implementation of the DOM traits.

use anyhow::anyhow;
use scraper::{ElementRef, Html, Selector};

use crate::page::{Dom, Element};

fn parse_selector(css_selector: &str) -> anyhow::Result<Selector> {
    Selector::parse(css_selector).map_err(|e| anyhow!("Invalid selector {css_selector:?} got: {e:?}"))
}

impl Dom for Html {
    type Element<'a> = ElementRef<'a>;

    fn select(&self, selector: &str) -> anyhow::Result<Vec<ElementRef<'_>>> {
        let selector = parse_selector(selector)?;
        Ok(Html::select(self, &selector).collect())
    }
}

impl<'a> Element for ElementRef<'a> {
    fn select(&self, selector: &str) -> anyhow::Result<Vec<Self>> {
        let selector = parse_selector(selector)?;
        Ok(ElementRef::select(self, &selector).collect())
    }

    fn text(&self) -> anyhow::Result<String> {
        Ok(ElementRef::text(self).collect())
    }

    fn attr(&self, name: &str) -> anyhow::Result<Option<String>> {
        Ok(self.value().attr(name).map(String::from))
    }
}
