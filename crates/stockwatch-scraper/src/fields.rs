//! Per-field fallback chains.
//!
//! Each field is resolved by walking an ordered slice of rules. The first
//! rule whose selector matches anything picks the element, and later rules
//! are not consulted even if that element's text is empty. An empty title is
//! then unusable; an empty time falls back to a date found in the title.
//! Site layout variants are handled by appending a rule to the relevant chain.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

static TITLE_SPAN_ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("span.l3 > a"));
static TITLED_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| selector("a.title, a.news_title, a[title]"));
static ANY_ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));

static TIME_SPAN: LazyLock<Selector> = LazyLock::new(|| selector("span.l6"));
static ALT_TIME: LazyLock<Selector> =
    LazyLock::new(|| selector("span.time, span.date, td:last-child"));

static READ_SPAN: LazyLock<Selector> = LazyLock::new(|| selector("span.l1"));
static COMMENT_SPAN: LazyLock<Selector> = LazyLock::new(|| selector("span.l2"));
static AUTHOR_SPAN: LazyLock<Selector> = LazyLock::new(|| selector("span.l4"));

/// Full dates first so `2024-07-01` is not cut down to `24-07`.
static DATE_IN_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2}|\d{2}-\d{2}|\d{2}/\d{2})").expect("valid date regex")
});

/// Title text and raw `href` of the anchor chosen for a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TitleLink {
    pub title: String,
    pub href: Option<String>,
}

pub(crate) type TitleRule = fn(ElementRef<'_>) -> Option<TitleLink>;
pub(crate) type TimeRule = fn(ElementRef<'_>) -> Option<String>;

pub(crate) const TITLE_RULES: &[TitleRule] = &[title_span_anchor, titled_anchor, first_anchor];

pub(crate) const PUB_TIME_RULES: &[TimeRule] = &[time_span, alternate_time];

pub(crate) fn resolve_title_link(fragment: ElementRef<'_>) -> Option<TitleLink> {
    TITLE_RULES
        .iter()
        .find_map(|rule| rule(fragment))
        .filter(|link| !link.title.is_empty())
}

pub(crate) fn resolve_pub_time(fragment: ElementRef<'_>, title: &str) -> Option<String> {
    PUB_TIME_RULES
        .iter()
        .find_map(|rule| rule(fragment))
        .filter(|time| !time.is_empty())
        .or_else(|| date_in_title(title))
}

pub(crate) fn read_count(fragment: ElementRef<'_>) -> String {
    first_text(fragment, &READ_SPAN).unwrap_or_else(|| "0".to_string())
}

pub(crate) fn comment_count(fragment: ElementRef<'_>) -> String {
    first_text(fragment, &COMMENT_SPAN).unwrap_or_else(|| "0".to_string())
}

pub(crate) fn author(fragment: ElementRef<'_>) -> String {
    first_text(fragment, &AUTHOR_SPAN).unwrap_or_default()
}

fn title_span_anchor(fragment: ElementRef<'_>) -> Option<TitleLink> {
    anchor_from(fragment, &TITLE_SPAN_ANCHOR)
}

fn titled_anchor(fragment: ElementRef<'_>) -> Option<TitleLink> {
    anchor_from(fragment, &TITLED_ANCHOR)
}

fn first_anchor(fragment: ElementRef<'_>) -> Option<TitleLink> {
    anchor_from(fragment, &ANY_ANCHOR)
}

fn time_span(fragment: ElementRef<'_>) -> Option<String> {
    fragment.select(&TIME_SPAN).next().map(element_text)
}

fn alternate_time(fragment: ElementRef<'_>) -> Option<String> {
    fragment.select(&ALT_TIME).next().map(element_text)
}

fn date_in_title(title: &str) -> Option<String> {
    DATE_IN_TEXT
        .captures(title)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// The first anchor matching `sel`, with its trimmed text (possibly empty).
fn anchor_from(fragment: ElementRef<'_>, sel: &Selector) -> Option<TitleLink> {
    fragment.select(sel).next().map(|anchor| TitleLink {
        title: element_text(anchor),
        href: anchor.value().attr("href").map(str::to_string),
    })
}

fn first_text(fragment: ElementRef<'_>, sel: &Selector) -> Option<String> {
    fragment
        .select(sel)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
#[path = "fields_test.rs"]
mod tests;
