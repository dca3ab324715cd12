//! Field extraction: located fragments → [`NewsRecord`]s for one target.

use scraper::{ElementRef, Html};
use stockwatch_core::{compute_id, NewsRecord, Site, Target, TitleFilter};

use crate::clean::strip_price_moves;
use crate::error::ParseError;
use crate::fields;
use crate::locator::{locate, LocatedTier};

/// Number of located fragments echoed at `debug` to help diagnose layout changes.
const SAMPLE_FRAGMENTS: usize = 3;

/// Everything extraction needs besides the markup and the target.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions<'a> {
    pub site: &'a Site,
    pub filter: &'a TitleFilter,
    pub strip_price_moves: bool,
    /// Stamped onto every record produced by this call.
    pub fetch_time: &'a str,
}

/// The fields of one fragment, before target metadata and identity are added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub title: String,
    pub url: String,
    pub pub_time: String,
    pub read_count: String,
    pub comment_count: String,
    pub author: String,
}

/// Result of extracting one target's page.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<NewsRecord>,
    /// `None` when no locator strategy found any fragment.
    pub tier: Option<LocatedTier>,
    pub fragments: usize,
    pub skipped: usize,
    pub filtered: usize,
}

/// Extract every valid record from `html` for `target`.
///
/// Never fails. Unparseable fragments are logged and skipped; a page with
/// no locatable fragments yields an empty [`Extraction`].
#[must_use]
pub fn extract_records(html: &str, target: &Target, opts: &ExtractOptions<'_>) -> Extraction {
    let document = Html::parse_document(html);

    let Some(located) = locate(&document) else {
        tracing::warn!(
            target = %target.code,
            url = %target.source_url,
            "no news fragments found on page"
        );
        return Extraction::default();
    };

    tracing::info!(
        target = %target.code,
        tier = %located.tier,
        count = located.fragments.len(),
        "located news fragments"
    );
    for (index, fragment) in located.fragments.iter().take(SAMPLE_FRAGMENTS).enumerate() {
        tracing::debug!(target = %target.code, index, html = %fragment.html(), "fragment sample");
    }

    let mut extraction = Extraction {
        tier: Some(located.tier),
        fragments: located.fragments.len(),
        ..Extraction::default()
    };

    for (index, fragment) in located.fragments.into_iter().enumerate() {
        let fields = match extract_fields(fragment, opts.site, opts.strip_price_moves) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::debug!(target = %target.code, index, reason = %e, "skipping fragment");
                extraction.skipped += 1;
                continue;
            }
        };

        if let Some(rule) = opts.filter.matched_rule(&fields.title) {
            tracing::debug!(
                target = %target.code,
                title = %fields.title,
                rule,
                "title filtered"
            );
            extraction.filtered += 1;
            continue;
        }

        tracing::debug!(
            target = %target.code,
            title = %fields.title,
            pub_time = %fields.pub_time,
            read_count = %fields.read_count,
            comment_count = %fields.comment_count,
            "parsed news record"
        );
        extraction
            .records
            .push(into_record(fields, target, opts.fetch_time));
    }

    tracing::info!(
        target = %target.code,
        records = extraction.records.len(),
        skipped = extraction.skipped,
        filtered = extraction.filtered,
        "extraction finished"
    );
    extraction
}

/// Resolve all fields of one fragment.
///
/// # Errors
///
/// Returns a [`ParseError`] when the fragment has no usable title anchor, no
/// link, a link outside the article prefix, or no publish time.
pub fn extract_fields(
    fragment: ElementRef<'_>,
    site: &Site,
    strip_moves: bool,
) -> Result<ExtractedFields, ParseError> {
    let link = fields::resolve_title_link(fragment).ok_or(ParseError::MissingTitle)?;

    let title = if strip_moves {
        let cleaned = strip_price_moves(&link.title);
        if cleaned.is_empty() {
            return Err(ParseError::EmptyAfterCleaning);
        }
        cleaned
    } else {
        link.title
    };

    let url = link
        .href
        .as_deref()
        .and_then(|href| site.absolutize(href))
        .ok_or_else(|| ParseError::MissingUrl {
            title: title.clone(),
        })?;
    if !site.is_article_url(&url) {
        return Err(ParseError::NotArticle { url });
    }

    let pub_time = fields::resolve_pub_time(fragment, &title).ok_or_else(|| {
        ParseError::MissingPubTime {
            title: title.clone(),
        }
    })?;

    Ok(ExtractedFields {
        read_count: fields::read_count(fragment),
        comment_count: fields::comment_count(fragment),
        author: fields::author(fragment),
        title,
        url,
        pub_time,
    })
}

fn into_record(fields: ExtractedFields, target: &Target, fetch_time: &str) -> NewsRecord {
    NewsRecord {
        id: compute_id(&fields.title, &fields.url),
        title: fields.title,
        url: fields.url,
        pub_time: fields.pub_time,
        read_count: fields.read_count,
        comment_count: fields.comment_count,
        author: fields.author,
        target_code: target.code.clone(),
        target_name: target.name.clone(),
        fetch_time: fetch_time.to_string(),
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
