//! Price-movement phrase removal for titles.
//!
//! Forum titles often carry the day's move ("大涨5%", "涨停"). Removing it
//! before identity lets reposts of the same event share an id.

use std::sync::LazyLock;

use regex::Regex;

/// Longer phrases come before their suffixes so "大涨5%" is removed whole.
static PRICE_MOVE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"大涨\s*\d+(\.\d+)?%",
        r"大跌\s*\d+(\.\d+)?%",
        r"上涨\s*\d+(\.\d+)?%",
        r"下跌\s*\d+(\.\d+)?%",
        r"收盘\s*[+-]?\s*\d+(\.\d+)?%",
        r"报\s*[+-]?\s*\d+(\.\d+)?%",
        r"涨\s*\d+(\.\d+)?%",
        r"跌\s*\d+(\.\d+)?%",
        r"[+-]\s*\d+(\.\d+)?%",
        r"涨停",
        r"跌停",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid price move regex"))
    .collect()
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Remove price-movement phrases and collapse the whitespace left behind.
#[must_use]
pub fn strip_price_moves(title: &str) -> String {
    let mut cleaned = title.to_string();
    for pattern in PRICE_MOVE_PATTERNS.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }
    WHITESPACE_RUN.replace_all(&cleaned, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_percentage_moves() {
        assert_eq!(strip_price_moves("贵州茅台上涨 3.5%，创新高"), "贵州茅台，创新高");
        assert_eq!(strip_price_moves("五粮液下跌2%"), "五粮液");
        assert_eq!(strip_price_moves("收盘 -1.25% 成交放量"), "成交放量");
        assert_eq!(strip_price_moves("早盘报+0.8%"), "早盘");
    }

    #[test]
    fn removes_long_form_before_short_form() {
        assert_eq!(strip_price_moves("白酒板块大涨5% 茅台领涨"), "白酒板块 茅台领涨");
    }

    #[test]
    fn removes_limit_up_and_down() {
        assert_eq!(strip_price_moves("今日涨停 原因分析"), "今日 原因分析");
        assert_eq!(strip_price_moves("跌停"), "");
    }

    #[test]
    fn leaves_plain_titles_alone() {
        assert_eq!(strip_price_moves("  年报 点评  "), "年报 点评");
        assert_eq!(strip_price_moves("分红10派25元"), "分红10派25元");
    }
}
