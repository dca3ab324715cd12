//! The persisted news record and its content-addressed identity.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One forum post as extracted from a target's list page.
///
/// Counters and timestamps are stored exactly as the site rendered them and
/// are frozen at first sighting; only `title` and `url` feed [`compute_id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub pub_time: String,
    #[serde(default = "zero_count")]
    pub read_count: String,
    #[serde(default = "zero_count")]
    pub comment_count: String,
    #[serde(default)]
    pub author: String,
    #[serde(alias = "stock_code")]
    pub target_code: String,
    #[serde(alias = "stock_name")]
    pub target_name: String,
    /// Local wall-clock time of the fetch, `YYYY-MM-DD HH:MM:SS`.
    #[serde(alias = "crawl_time")]
    pub fetch_time: String,
}

fn zero_count() -> String {
    "0".to_string()
}

/// Stable dedup key for a record.
///
/// SHA-256 over the UTF-8 bytes of `title + "_" + url`, lowercase hex.
/// Independent of target, fetch time and counters, so the same post seen on
/// two targets' pages collapses to one id.
#[must_use]
pub fn compute_id(title: &str, url: &str) -> String {
    let input = format!("{title}_{url}");
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

/// Format used for [`NewsRecord::fetch_time`].
pub const FETCH_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in [`FETCH_TIME_FORMAT`].
#[must_use]
pub fn now_fetch_time() -> String {
    chrono::Local::now().format(FETCH_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_id_is_stable_across_runs() {
        // Pinned digests: a change here orphans every persisted corpus.
        assert_eq!(
            compute_id("a", "b"),
            "648fa9b31bc7ff7eb914e7a7180f07e0df0f8467839b1af8902da1d0bead03a2"
        );
        assert_eq!(
            compute_id(
                "贵州茅台发布2023年年报",
                "https://guba.eastmoney.com/news,600519,1.html"
            ),
            "5a18593cc2330aaf2825226339540352431fbc8c3a7fee0d2a765ed6543237a8"
        );
    }

    #[test]
    fn compute_id_depends_only_on_title_and_url() {
        let first = compute_id("茅台发布年报", "https://guba.eastmoney.com/news,600519,1.html");
        let again = compute_id("茅台发布年报", "https://guba.eastmoney.com/news,600519,1.html");
        let other_url = compute_id("茅台发布年报", "https://guba.eastmoney.com/news,600519,2.html");
        assert_eq!(first, again);
        assert_ne!(first, other_url);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn separator_position_is_not_recoverable() {
        // Only the concatenation is hashed, so a title ending in "_b" and a
        // url starting with "b_" collide. Harmless for forum titles and urls.
        assert_eq!(compute_id("a_b", "c"), compute_id("a", "b_c"));
    }

    #[test]
    fn legacy_field_names_deserialize() {
        let raw = r#"{
            "id": "x",
            "title": "t",
            "url": "https://guba.eastmoney.com/news,1,1.html",
            "pub_time": "07-01 10:00",
            "stock_name": "贵州茅台",
            "stock_code": "600519",
            "crawl_time": "2024-07-01 10:05:00"
        }"#;
        let record: NewsRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.target_code, "600519");
        assert_eq!(record.target_name, "贵州茅台");
        assert_eq!(record.fetch_time, "2024-07-01 10:05:00");
        assert_eq!(record.read_count, "0");
        assert_eq!(record.comment_count, "0");
        assert_eq!(record.author, "");
    }

    #[test]
    fn serializes_with_current_field_names() {
        let record = NewsRecord {
            id: "x".to_string(),
            title: "t".to_string(),
            url: "u".to_string(),
            pub_time: "p".to_string(),
            read_count: "1".to_string(),
            comment_count: "2".to_string(),
            author: "a".to_string(),
            target_code: "600519".to_string(),
            target_name: "n".to_string(),
            fetch_time: "f".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["target_code"], "600519");
        assert!(json.get("stock_code").is_none());
    }
}
