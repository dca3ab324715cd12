//! Fixtures shared by the command, cycle and scheduler tests.

use stockwatch_core::AppConfig;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub(crate) fn row(title: &str, href: Option<&str>, time: &str) -> String {
    let href = href.map_or_else(String::new, |h| format!(r#" href="{h}""#));
    format!(
        r#"<div class="articleh normal_post">
             <span class="l1 a1">100</span><span class="l2 a2">4</span>
             <span class="l3 a3"><a{href}>{title}</a></span>
             <span class="l4 a4"><a href="/user/1">股友</a></span>
             <span class="l6 a6">{time}</span>
           </div>"#
    )
}

pub(crate) fn list_page(rows: &[String]) -> String {
    format!(
        r#"<html><body><div id="articlelistnew">{}</div></body></html>"#,
        rows.concat()
    )
}

/// Settings with every file inside `dir` and no pause between fetches.
pub(crate) fn app_config(dir: &TempDir) -> AppConfig {
    AppConfig {
        config_path: dir.path().join("config.yaml"),
        filter_path: dir.path().join("filter_keywords.yaml"),
        data_file: dir.path().join("news_data.json"),
        shard_dir: dir.path().join("stock_data"),
        log_level: "debug".to_string(),
        request_timeout_secs: 5,
        request_delay_secs: 0,
        user_agent: "stockwatch-test/0.1".to_string(),
        debug_page_path: None,
    }
}

/// Write a one-target watchlist (Moutai) whose pages are served by `origin`.
pub(crate) fn write_watchlist(dir: &TempDir, origin: &str) {
    let yaml = format!(
        "update_interval_minutes: 60\n\
         output_file: \"{}\"\n\
         url_template: \"{origin}/list,{{code}},1,f.html\"\n\
         site_origin: \"{origin}\"\n\
         targets:\n  - code: \"600519\"\n    name: 贵州茅台\n    industry: 白酒\n",
        dir.path().join("stock_news.html").display()
    );
    std::fs::write(dir.path().join("config.yaml"), yaml).unwrap();
}

pub(crate) async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Moutai's page with a single valid post.
pub(crate) async fn mount_moutai(server: &MockServer) {
    mount_page(
        server,
        "/list,600519,1,f.html",
        list_page(&[row("茅台发布年报", Some("/news,600519,1.html"), "07-01 09:30")]),
    )
    .await;
}
