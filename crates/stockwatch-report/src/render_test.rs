use std::path::PathBuf;

use stockwatch_core::Site;

use super::*;

fn target(code: &str, name: &str, industry: &str) -> Target {
    Target {
        code: code.to_string(),
        name: name.to_string(),
        industry: industry.to_string(),
        source_url: format!("https://guba.eastmoney.com/list,{code},1,f.html"),
    }
}

fn watchlist(targets: Vec<Target>, cap: Option<usize>) -> Watchlist {
    Watchlist {
        targets,
        update_interval_minutes: 60,
        output_file: PathBuf::from("stock_news.html"),
        max_news_per_stock: cap,
        site: Site::default(),
        strip_price_moves: false,
    }
}

fn records(code: &str, count: usize) -> Vec<NewsRecord> {
    (0..count)
        .map(|n| NewsRecord {
            id: format!("{code}-{n}"),
            title: format!("标题{n}"),
            url: format!("https://guba.eastmoney.com/news,{code},{n}.html"),
            pub_time: "07-01 09:30".to_string(),
            read_count: "10".to_string(),
            comment_count: "2".to_string(),
            author: String::new(),
            target_code: code.to_string(),
            target_name: String::new(),
            fetch_time: "2024-07-01 10:00:00".to_string(),
        })
        .collect()
}

#[test]
fn sidebar_groups_industries_in_first_seen_order() {
    let list = watchlist(
        vec![
            target("600519", "贵州茅台", "白酒"),
            target("601318", "中国平安", "保险"),
            target("000858", "五粮液", "白酒"),
        ],
        None,
    );

    let html = render_report(&list, &Shards::new(), "2024-07-01 10:00:00");

    let baijiu = html.find(">白酒<").unwrap();
    let baoxian = html.find(">保险<").unwrap();
    let wuliangye = html.find("五粮液 (000858)").unwrap();
    assert!(baijiu < wuliangye);
    assert!(wuliangye < baoxian);
    assert_eq!(html.matches("class=\"industry-title\"").count(), 2);
}

#[test]
fn sidebar_shows_per_target_counts_and_first_is_active() {
    let list = watchlist(
        vec![target("600519", "贵州茅台", "白酒"), target("000858", "五粮液", "白酒")],
        None,
    );
    let mut shards = Shards::new();
    shards.insert("600519".to_string(), records("600519", 3));

    let html = render_report(&list, &shards, "now");

    assert!(html.contains(
        "<li class=\"stock-item active\" data-code=\"600519\" onclick=\"showStock(this.dataset.code)\">贵州茅台 (600519) <span class=\"count\">3</span></li>"
    ));
    assert!(html.contains("五粮液 (000858) <span class=\"count\">0</span>"));
    assert!(html.contains("class=\"stock-section active\" data-code=\"600519\""));
    assert!(html.contains("class=\"stock-section\" data-code=\"000858\""));
}

#[test]
fn records_are_paginated_ten_per_page() {
    let list = watchlist(vec![target("600519", "贵州茅台", "白酒")], None);
    let mut shards = Shards::new();
    shards.insert("600519".to_string(), records("600519", 23));

    let html = render_report(&list, &shards, "now");

    assert!(html.contains("id=\"page-600519-1\""));
    assert!(html.contains("id=\"page-600519-3\""));
    assert!(!html.contains("id=\"page-600519-4\""));
    assert_eq!(html.matches("class=\"news-item\"").count(), 23);
    assert!(html.contains("data-page=\"3\" onclick=\"showPage"));
    assert!(html.contains("共 23 条资讯"));
}

#[test]
fn single_page_has_no_pagination_bar() {
    let list = watchlist(vec![target("600519", "贵州茅台", "白酒")], None);
    let mut shards = Shards::new();
    shards.insert("600519".to_string(), records("600519", ITEMS_PER_PAGE));

    let html = render_report(&list, &shards, "now");

    assert!(!html.contains("<ul class=\"pagination\">"));
}

#[test]
fn cap_limits_records_shown() {
    let list = watchlist(vec![target("600519", "贵州茅台", "白酒")], Some(5));
    let mut shards = Shards::new();
    shards.insert("600519".to_string(), records("600519", 12));

    let html = render_report(&list, &shards, "now");

    assert_eq!(html.matches("class=\"news-item\"").count(), 5);
    assert!(html.contains("标题4"));
    assert!(!html.contains("标题5"));
    assert!(html.contains("<span class=\"count\">5</span>"));
}

#[test]
fn empty_target_gets_placeholder_and_source_link() {
    let list = watchlist(vec![target("600519", "贵州茅台", "白酒")], None);

    let html = render_report(&list, &Shards::new(), "now");

    assert!(html.contains("暂无 贵州茅台 的相关资讯"));
    assert!(html.contains("href=\"https://guba.eastmoney.com/list,600519,1,f.html\""));
}

#[test]
fn record_text_is_escaped() {
    let list = watchlist(vec![target("600519", "贵州茅台", "白酒")], None);
    let mut shard = records("600519", 1);
    shard[0].title = "<script>alert('x')</script>".to_string();
    shard[0].url = "https://guba.eastmoney.com/news,1,1.html?a=1&b=\"2\"".to_string();
    shard[0].author = "A&B".to_string();
    let mut shards = Shards::new();
    shards.insert("600519".to_string(), shard);

    let html = render_report(&list, &shards, "now");

    assert!(!html.contains("<script>alert"));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    assert!(html.contains("?a=1&amp;b=&quot;2&quot;"));
    assert!(html.contains("作者: A&amp;B"));
}

#[test]
fn missing_author_renders_as_unknown() {
    let list = watchlist(vec![target("600519", "贵州茅台", "白酒")], None);
    let mut shards = Shards::new();
    shards.insert("600519".to_string(), records("600519", 1));

    let html = render_report(&list, &shards, "now");

    assert!(html.contains("作者: 未知"));
}
