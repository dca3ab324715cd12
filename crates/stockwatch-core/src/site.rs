//! Forum origin and the article-URL rule shared by the extractor and the store.

pub const DEFAULT_ORIGIN: &str = "https://guba.eastmoney.com";
pub const DEFAULT_ARTICLE_PATH: &str = "/news";
pub const DEFAULT_URL_TEMPLATE: &str = "https://guba.eastmoney.com/list,{code},1,f.html";

/// The forum site a watchlist points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    origin: String,
    article_prefix: String,
}

impl Default for Site {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN, None)
    }
}

impl Site {
    /// `article_prefix` defaults to `{origin}/news` when not given.
    #[must_use]
    pub fn new(origin: &str, article_prefix: Option<&str>) -> Self {
        let origin = origin.trim().trim_end_matches('/').to_string();
        let article_prefix = article_prefix.map_or_else(
            || format!("{origin}{DEFAULT_ARTICLE_PATH}"),
            |p| p.trim().to_string(),
        );
        Self {
            origin,
            article_prefix,
        }
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[must_use]
    pub fn article_prefix(&self) -> &str {
        &self.article_prefix
    }

    /// Resolve an `href` against the site origin.
    ///
    /// Links already starting with `http` are returned as-is. Returns `None`
    /// for an empty or whitespace-only link.
    #[must_use]
    pub fn absolutize(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        if href.starts_with("http") {
            return Some(href.to_string());
        }
        if let Some(rest) = href.strip_prefix("//") {
            return Some(format!("https://{rest}"));
        }
        if href.starts_with('/') {
            Some(format!("{}{href}", self.origin))
        } else {
            Some(format!("{}/{href}", self.origin))
        }
    }

    /// Whether `url` points at a forum article. Both the extractor and the
    /// partitioner apply this rule.
    #[must_use]
    pub fn is_article_url(&self, url: &str) -> bool {
        url.starts_with(&self.article_prefix)
    }
}
