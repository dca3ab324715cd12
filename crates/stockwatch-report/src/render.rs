//! Report markup.
//!
//! The page is a single self-contained document: a sidebar of targets grouped
//! by industry and one section per target with its records split into pages.
//! Only the first target's section and each section's first page are shown
//! initially; a small inline script switches between them.

use stockwatch_core::{NewsRecord, Target, Watchlist};
use stockwatch_store::Shards;

use crate::escape::escape_html;

/// Records per page within one target's section.
pub const ITEMS_PER_PAGE: usize = 10;

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>股票资讯</title>
<style>
body { margin: 0; font-family: "PingFang SC", "Microsoft YaHei", sans-serif; color: #333; background: #f5f5f5; }
.container { display: flex; min-height: 100vh; }
.sidebar { width: 260px; background: #1f2d3d; color: #fff; overflow-y: auto; }
.sidebar h2 { text-align: center; }
.industry-title { padding: 10px 20px; font-weight: bold; background: #2c3e50; }
.industry-stocks { list-style: none; margin: 0; padding: 0; }
.stock-item { padding: 8px 20px; cursor: pointer; }
.stock-item.active, .stock-item:hover { background: #3a4f66; }
.stock-item .count { float: right; }
.content { flex: 1; padding: 20px; }
.stock-section { display: none; background: #fff; border-radius: 4px; }
.stock-section.active { display: block; }
.stock-header { padding: 16px 20px; border-bottom: 1px solid #eee; }
.news-list { list-style: none; margin: 0; padding: 0; }
.news-item { padding: 12px 20px; border-bottom: 1px solid #f0f0f0; }
.news-title { margin: 0 0 6px; font-size: 16px; }
.news-title a { color: #1a5fb4; text-decoration: none; }
.news-meta .stats { margin-right: 16px; font-size: 12px; color: #888; }
.pagination { list-style: none; display: flex; gap: 6px; padding: 10px 20px; margin: 0; }
.pagination li { padding: 4px 10px; border: 1px solid #ddd; cursor: pointer; }
.pagination li.active { background: #1a5fb4; color: #fff; }
.no-news { padding: 20px; color: #999; }
.update-time { font-size: 12px; color: #aaa; }
</style>
<script>
function showStock(code) {
  document.querySelectorAll('.stock-section').forEach(function (el) {
    el.classList.toggle('active', el.dataset.code === code);
  });
  document.querySelectorAll('.stock-item').forEach(function (el) {
    el.classList.toggle('active', el.dataset.code === code);
  });
}
function showPage(code, page) {
  document.querySelectorAll('.page').forEach(function (el) {
    if (el.dataset.code === code) {
      el.style.display = el.dataset.page === page ? 'block' : 'none';
    }
  });
  document.querySelectorAll('.pagination li').forEach(function (el) {
    if (el.dataset.code === code) {
      el.classList.toggle('active', el.dataset.page === page);
    }
  });
}
</script>
</head>
"#;

/// Render the full report document.
///
/// `shards` is keyed by target code; a target without an entry renders the
/// "no news" placeholder. When the watchlist sets `max_news_per_stock`, only
/// that many records (the newest, given shard order) are shown per target.
#[must_use]
pub fn render_report(watchlist: &Watchlist, shards: &Shards, generated_at: &str) -> String {
    let generated_at = escape_html(generated_at);
    let mut html = String::with_capacity(16 * 1024);
    html.push_str(HEAD);
    html.push_str("<body>\n<div class=\"container\">\n");

    html.push_str("<div class=\"sidebar\">\n<h2>股票资讯</h2>\n");
    html.push_str(&format!(
        "<p class=\"update-time\" style=\"text-align: center;\">更新: {generated_at}</p>\n"
    ));
    for (industry, targets) in group_by_industry(&watchlist.targets) {
        html.push_str(&format!(
            "<div class=\"industry-section\">\n<div class=\"industry-title\">{}</div>\n<ul class=\"industry-stocks\">\n",
            escape_html(industry)
        ));
        for target in targets {
            let shown = visible_records(shards, target, watchlist.max_news_per_stock).len();
            html.push_str(&sidebar_item(target, shown, is_first(watchlist, target)));
        }
        html.push_str("</ul>\n</div>\n");
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"content\">\n");
    html.push_str(&format!(
        "<div class=\"header\">\n<h1>股票最新资讯</h1>\n<p class=\"update-time\">最后更新时间: {generated_at}</p>\n</div>\n"
    ));
    for target in &watchlist.targets {
        let records = visible_records(shards, target, watchlist.max_news_per_stock);
        html.push_str(&target_section(target, records, is_first(watchlist, target)));
    }
    html.push_str("<div class=\"footer\"><p>数据来源: 东方财富网股吧</p></div>\n");
    html.push_str("</div>\n</div>\n</body>\n</html>\n");
    html
}

/// Industries in the order they first appear in the watchlist, each with its
/// targets in watchlist order.
fn group_by_industry(targets: &[Target]) -> Vec<(&str, Vec<&Target>)> {
    let mut groups: Vec<(&str, Vec<&Target>)> = Vec::new();
    for target in targets {
        match groups.iter_mut().find(|(name, _)| *name == target.industry) {
            Some((_, members)) => members.push(target),
            None => groups.push((target.industry.as_str(), vec![target])),
        }
    }
    groups
}

fn visible_records<'a>(shards: &'a Shards, target: &Target, cap: Option<usize>) -> &'a [NewsRecord] {
    let records = shards.get(&target.code).map_or(&[][..], Vec::as_slice);
    match cap {
        Some(cap) => &records[..records.len().min(cap)],
        None => records,
    }
}

fn is_first(watchlist: &Watchlist, target: &Target) -> bool {
    watchlist
        .targets
        .first()
        .is_some_and(|first| first.code == target.code)
}

fn active_class(active: bool) -> &'static str {
    if active {
        " active"
    } else {
        ""
    }
}

fn sidebar_item(target: &Target, shown: usize, active: bool) -> String {
    let code = escape_html(&target.code);
    format!(
        "<li class=\"stock-item{}\" data-code=\"{code}\" onclick=\"showStock(this.dataset.code)\">{} ({code}) <span class=\"count\">{shown}</span></li>\n",
        active_class(active),
        escape_html(&target.name),
    )
}

fn target_section(target: &Target, records: &[NewsRecord], active: bool) -> String {
    let code = escape_html(&target.code);
    let name = escape_html(&target.name);
    let source = escape_html(&target.source_url);

    let mut html = format!(
        "<div id=\"stock-{code}\" class=\"stock-section{}\" data-code=\"{code}\">\n<div class=\"stock-header\">\n<h2>{name} ({code})</h2>\n<div class=\"stock-link\"><a href=\"{source}\" target=\"_blank\">前往股吧查看 {name} 的更多讨论 »</a></div>\n",
        active_class(active),
    );

    if records.is_empty() {
        html.push_str("<span>暂无资讯</span>\n</div>\n");
        html.push_str(&format!(
            "<div class=\"no-news\"><p>暂无 {name} 的相关资讯</p></div>\n</div>\n"
        ));
        return html;
    }

    html.push_str(&format!("<span>共 {} 条资讯</span>\n</div>\n", records.len()));

    let pages: Vec<&[NewsRecord]> = records.chunks(ITEMS_PER_PAGE).collect();
    for (index, page) in pages.iter().enumerate() {
        let number = index + 1;
        let display = if index == 0 { "block" } else { "none" };
        html.push_str(&format!(
            "<div id=\"page-{code}-{number}\" class=\"page\" data-code=\"{code}\" data-page=\"{number}\" style=\"display: {display}\">\n<ul class=\"news-list\">\n"
        ));
        for record in *page {
            html.push_str(&news_item(record));
        }
        html.push_str("</ul>\n</div>\n");
    }

    if pages.len() > 1 {
        html.push_str("<ul class=\"pagination\">\n");
        for number in 1..=pages.len() {
            html.push_str(&format!(
                "<li class=\"{}\" data-code=\"{code}\" data-page=\"{number}\" onclick=\"showPage(this.dataset.code, this.dataset.page)\">{number}</li>\n",
                active_class(number == 1).trim_start(),
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</div>\n");
    html
}

fn news_item(record: &NewsRecord) -> String {
    let author = if record.author.is_empty() {
        "未知"
    } else {
        record.author.as_str()
    };
    format!(
        "<li class=\"news-item\">\n<h3 class=\"news-title\"><a href=\"{}\" target=\"_blank\">{}</a></h3>\n<div class=\"news-meta\"><span class=\"stats\">阅读: {}</span><span class=\"stats\">评论: {}</span><span class=\"stats\">作者: {}</span><span class=\"stats\">发布时间: {}</span><span class=\"stats\">抓取时间: {}</span></div>\n</li>\n",
        escape_html(&record.url),
        escape_html(&record.title),
        escape_html(&record.read_count),
        escape_html(&record.comment_count),
        escape_html(author),
        escape_html(&record.pub_time),
        escape_html(&record.fetch_time),
    )
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
