//! Record locator.
//!
//! Tries selector strategies in priority order (article table rows, article
//! divs, news-list items, known container combinations, link rows) and
//! returns the fragments of the first strategy that finds any. Results from
//! different tiers are never combined.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

static ARTICLE_TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table.articleh"));
static TABLE_ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static ARTICLE_DIV: LazyLock<Selector> = LazyLock::new(|| selector("div.articleh"));
static NEWS_LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| selector("ul.newlist > li"));
static KNOWN_CONTAINERS: LazyLock<Selector> = LazyLock::new(|| {
    selector(".listcont .articleh, .articleh_list .articleh, #mainlist .articleh")
});
static ROW_OR_DIV: LazyLock<Selector> = LazyLock::new(|| selector("tr, div"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static TITLE_SPAN_ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("span.l3 > a"));

/// Which strategy produced a set of fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatedTier {
    /// Rows of the first `table.articleh`.
    ArticleTable,
    /// `div.articleh` elements.
    ArticleDivs,
    /// `ul.newlist > li` items.
    NewsList,
    /// `.articleh` inside one of the known list containers.
    KnownContainers,
    /// Table rows holding a link, unioned with divs holding a `span.l3 > a`.
    LinkRows,
}

impl std::fmt::Display for LocatedTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocatedTier::ArticleTable => write!(f, "article_table"),
            LocatedTier::ArticleDivs => write!(f, "article_divs"),
            LocatedTier::NewsList => write!(f, "news_list"),
            LocatedTier::KnownContainers => write!(f, "known_containers"),
            LocatedTier::LinkRows => write!(f, "link_rows"),
        }
    }
}

/// One locator strategy: a tier label plus the function that searches for it.
#[derive(Clone, Copy)]
pub struct Strategy {
    pub tier: LocatedTier,
    pub find: for<'a> fn(&'a Html) -> Vec<ElementRef<'a>>,
}

/// The production strategy order.
pub const DEFAULT_STRATEGIES: &[Strategy] = &[
    Strategy {
        tier: LocatedTier::ArticleTable,
        find: article_table_rows,
    },
    Strategy {
        tier: LocatedTier::ArticleDivs,
        find: article_divs,
    },
    Strategy {
        tier: LocatedTier::NewsList,
        find: news_list_items,
    },
    Strategy {
        tier: LocatedTier::KnownContainers,
        find: known_container_items,
    },
    Strategy {
        tier: LocatedTier::LinkRows,
        find: link_rows,
    },
];

/// Fragments found in one document, borrowed from it.
pub struct Located<'a> {
    pub tier: LocatedTier,
    pub fragments: Vec<ElementRef<'a>>,
}

/// Locate candidate record fragments using [`DEFAULT_STRATEGIES`].
///
/// Returns `None` when no strategy finds anything.
#[must_use]
pub fn locate(document: &Html) -> Option<Located<'_>> {
    locate_with(document, DEFAULT_STRATEGIES)
}

/// Run `strategies` in order and return the first non-empty result. Later
/// strategies are not evaluated once one succeeds.
#[must_use]
pub fn locate_with<'a>(document: &'a Html, strategies: &[Strategy]) -> Option<Located<'a>> {
    strategies.iter().find_map(|strategy| {
        let fragments = (strategy.find)(document);
        if fragments.is_empty() {
            None
        } else {
            Some(Located {
                tier: strategy.tier,
                fragments,
            })
        }
    })
}

fn article_table_rows(document: &Html) -> Vec<ElementRef<'_>> {
    document
        .select(&ARTICLE_TABLE)
        .next()
        .map(|table| table.select(&TABLE_ROW).collect())
        .unwrap_or_default()
}

fn article_divs(document: &Html) -> Vec<ElementRef<'_>> {
    document.select(&ARTICLE_DIV).collect()
}

fn news_list_items(document: &Html) -> Vec<ElementRef<'_>> {
    document.select(&NEWS_LIST_ITEM).collect()
}

fn known_container_items(document: &Html) -> Vec<ElementRef<'_>> {
    document.select(&KNOWN_CONTAINERS).collect()
}

fn link_rows(document: &Html) -> Vec<ElementRef<'_>> {
    document
        .select(&ROW_OR_DIV)
        .filter(|el| match el.value().name() {
            "tr" => el.select(&ANCHOR).next().is_some(),
            "div" => el.select(&TITLE_SPAN_ANCHOR).next().is_some(),
            _ => false,
        })
        .collect()
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod tests;
