//! Integration tests for profile scraping
//!
//! These tests use wiremock to serve directory listing and profile pages and
//! drive the real HTTP page through full collect and enrich runs.

use async_trait::async_trait;
use partner_scout::browser::{ChromiumPage, ElementSnapshot, HttpPage, Page};
use partner_scout::config::{Config, ListingConfig};
use partner_scout::records::{read_table, write_table, ProfileRecord};
use partner_scout::scrape::{BatchRunner, ListingCollector, ProfileFetcher};
use partner_scout::{Result, ScoutError};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Configuration with all waits removed
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.browser.navigation_timeout_ms = 2_000;
    config.browser.settle_delay_ms = 0;
    config.pacing.request_delay_ms = 0;
    config.pacing.retry_delay_ms = 0;
    config
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_profile(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

const ACME_PROFILE: &str = r#"
    <nav><a href="/partners/">Back to partners</a></nav>
    <h1>Acme Sync</h1>
    <a href="https://www.linkedin.com/company/acme">LinkedIn</a>
    <a href="https://docs.acme.com/guide.pdf">Visit our guide</a>
    <a href="https://status.acme.com">Status</a>
    <a href="https://acme.com/?utm_source=dir">Visit Website</a>
    <p>Contact: <a href="mailto:partners@acme.com">partners@acme.com</a></p>
    <img src="https://secure.gravatar.com/avatar/abc@2x.png">
"#;

#[tokio::test]
async fn test_profile_fetch_over_http() {
    let server = MockServer::start().await;
    mount_profile(&server, "/partners/acme/", ACME_PROFILE).await;

    let config = create_test_config();
    let mut page = HttpPage::from_config(&config.browser).expect("Failed to build page");
    let fetcher = ProfileFetcher::from_config(&config);

    let pair = fetcher
        .try_fetch(&mut page, &format!("{}/partners/acme/", server.uri()))
        .await
        .expect("Profile fetch failed");

    assert_eq!(pair.website.as_deref(), Some("https://acme.com/?utm_source=dir"));
    assert_eq!(pair.email.as_deref(), Some("partners@acme.com"));
}

#[tokio::test]
async fn test_email_only_in_markup() {
    let server = MockServer::start().await;
    mount_profile(
        &server,
        "/partners/beta/",
        r#"<a href="mailto:hello@beta.io" aria-label="Email"><svg></svg></a>
           <a href="https://beta.io">beta.io</a>"#,
    )
    .await;

    let config = create_test_config();
    let mut page = HttpPage::from_config(&config.browser).unwrap();
    let mut failures = Vec::new();

    let pair = ProfileFetcher::from_config(&config)
        .fetch(
            &mut page,
            &format!("{}/partners/beta/", server.uri()),
            &mut failures,
        )
        .await;

    assert_eq!(pair.email.as_deref(), Some("hello@beta.io"));
    assert_eq!(pair.website.as_deref(), Some("https://beta.io"));
    assert!(failures.is_empty());
}

#[tokio::test]
async fn test_slow_profile_times_out_softly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/partners/slow/"))
        .respond_with(html(ACME_PROFILE).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let mut config = create_test_config();
    config.browser.navigation_timeout_ms = 200;
    let mut page = HttpPage::from_config(&config.browser).unwrap();
    let mut failures = Vec::new();

    let url = format!("{}/partners/slow/", server.uri());
    let pair = ProfileFetcher::from_config(&config)
        .fetch(&mut page, &url, &mut failures)
        .await;

    assert!(pair.is_empty());
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].url, url);
}

#[tokio::test]
async fn test_listing_collects_unique_partners_across_pages() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/partners/"))
        .and(query_param("_paged", "1"))
        .respond_with(html(
            r#"<a class="search-teaser-integration" href="/integrations/acme-sync/"
                  aria-title="view integration: Acme Sync">Acme</a>
               <a class="search-teaser-integration" href="/integrations/beta-ship/">Beta</a>
               <a class="unrelated" href="/integrations/not-a-card/">Other</a>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/partners/"))
        .and(query_param("_paged", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/partners/"))
        .and(query_param("_paged", "3"))
        .respond_with(html(
            r#"<a class="search-teaser-integration" href="/integrations/beta-ship/"
                  aria-title="view integration: Beta Shipping">Beta</a>
               <a class="search-teaser-integration" href="/integrations/gamma/"
                  aria-title="view integration: Gamma">Gamma</a>"#,
        ))
        .mount(&server)
        .await;

    let collector = ListingCollector::new(ListingConfig {
        url_template: format!("{}/partners/?_paged={{page}}", base_url),
        first_page: 1,
        last_page: 3,
        card_selector: "a.search-teaser-integration".to_string(),
        name_attribute: "aria-title".to_string(),
        name_prefix: "view integration:".to_string(),
        navigation_timeout_ms: 2_000,
        settle_delay_ms: 0,
    });

    let config = create_test_config();
    let mut page = HttpPage::from_config(&config.browser).unwrap();
    let mut failures = Vec::new();

    let entries = collector.collect(&mut page, &mut failures).await;

    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Acme Sync", "Beta Ship", "Gamma"]);
    assert_eq!(
        entries[1].url,
        format!("{}/integrations/beta-ship/", base_url)
    );

    // Page 2 failed but page 3 was still collected
    assert_eq!(failures.len(), 1);
    assert!(failures[0].url.ends_with("_paged=2"));
}

/// A listing whose cards only exist after its script runs
const SCRIPTED_LISTING: &str = r#"
    <div id="cards"></div>
    <script>
        document.getElementById("cards").innerHTML =
            '<a class="search-teaser-integration" href="/integrations/acme/" ' +
            'aria-title="view integration: Acme Sync">Acme</a>';
    </script>
"#;

fn scripted_listing_collector(base_url: &str) -> ListingCollector {
    ListingCollector::new(ListingConfig {
        url_template: format!("{}/partners/?_paged={{page}}", base_url),
        first_page: 1,
        last_page: 1,
        card_selector: "a.search-teaser-integration".to_string(),
        name_attribute: "aria-title".to_string(),
        name_prefix: "view integration:".to_string(),
        navigation_timeout_ms: 10_000,
        settle_delay_ms: 500,
    })
}

#[tokio::test]
async fn test_http_page_misses_script_rendered_cards() {
    let server = MockServer::start().await;
    mount_profile(&server, "/partners/", SCRIPTED_LISTING).await;

    let collector = scripted_listing_collector(&server.uri());
    let mut page = HttpPage::from_config(&create_test_config().browser).unwrap();

    let entries = collector
        .collect_page(&mut page, &format!("{}/partners/?_paged=1", server.uri()))
        .await
        .unwrap();

    assert!(entries.is_empty());
}

#[tokio::test]
#[ignore = "needs a local Chrome or Chromium"]
async fn test_chromium_page_reads_script_rendered_cards() {
    let server = MockServer::start().await;
    mount_profile(&server, "/partners/", SCRIPTED_LISTING).await;
    mount_profile(&server, "/integrations/acme/", ACME_PROFILE).await;

    let config = create_test_config();
    let mut page = ChromiumPage::launch(&config.browser)
        .await
        .expect("Failed to launch Chromium");

    let entries = scripted_listing_collector(&server.uri())
        .collect_page(&mut page, &format!("{}/partners/?_paged=1", server.uri()))
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "Acme Sync");

    let pair = ProfileFetcher::from_config(&config)
        .try_fetch(&mut page, &entries[0].url)
        .await
        .unwrap();
    assert_eq!(pair.email.as_deref(), Some("partners@acme.com"));
    assert_eq!(pair.website.as_deref(), Some("https://acme.com/?utm_source=dir"));

    page.close().await.unwrap();
}

#[tokio::test]
async fn test_collect_then_scrape_continues_after_failure() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_profile(&server, "/integrations/acme/", ACME_PROFILE).await;
    Mock::given(method("GET"))
        .and(path("/integrations/broken/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_profile(
        &server,
        "/integrations/gamma/",
        r#"<p>Reach us: team@gamma.dev</p><a href="https://gamma.dev">Get started</a>"#,
    )
    .await;

    let entries = vec![
        partner_scout::scrape::ListingEntry {
            name: "Acme".to_string(),
            url: format!("{}/integrations/acme/", base_url),
        },
        partner_scout::scrape::ListingEntry {
            name: "Broken".to_string(),
            url: format!("{}/integrations/broken/", base_url),
        },
        partner_scout::scrape::ListingEntry {
            name: "Gamma".to_string(),
            url: format!("{}/integrations/gamma/", base_url),
        },
    ];

    let config = create_test_config();
    let mut page = HttpPage::from_config(&config.browser).unwrap();
    let outcome = BatchRunner::from_config(&config)
        .scrape_all(&mut page, entries)
        .await;

    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.records[0].email.as_deref(), Some("partners@acme.com"));

    assert_eq!(outcome.records[1].name, "Broken");
    assert_eq!(outcome.records[1].website, None);
    assert_eq!(outcome.records[1].email, None);

    assert_eq!(outcome.records[2].website.as_deref(), Some("https://gamma.dev"));
    assert_eq!(outcome.records[2].email.as_deref(), Some("team@gamma.dev"));

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.stats.visited, 3);
    assert_eq!(outcome.stats.failures, 1);
    assert_eq!(outcome.stats.websites_found, 2);
    assert_eq!(outcome.stats.emails_found, 2);
}

#[tokio::test]
async fn test_enrich_csv_end_to_end() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_profile(&server, "/partners/acme", ACME_PROFILE).await;
    mount_profile(
        &server,
        "/partners/delta",
        r#"<p>support@delta.io</p><a href="https://delta.io">Company site</a>"#,
    )
    .await;

    // Complete rows must not be visited
    Mock::given(method("GET"))
        .and(path("/partners/complete"))
        .respond_with(html(""))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("partners.csv");
    let output = dir.path().join("partners_updated.csv");

    std::fs::write(
        &input,
        format!(
            "Partner,Profile,,,Region\n\
             Acme,{0}/partners/acme,,,US\n\
             No Link,,,,EU\n\
             Complete,{0}/partners/complete,https://complete.com,sales@complete.com,UK\n\
             Delta,{0}/partners/delta,https://inventory.dearsystems.com/Login,keep@delta.io,AU\n",
            base_url
        ),
    )
    .unwrap();

    let table = read_table(&input).expect("Failed to read input");
    let config = create_test_config();
    let mut page = HttpPage::from_config(&config.browser).unwrap();

    let outcome = BatchRunner::from_config(&config)
        .enrich(&mut page, table.records)
        .await;

    write_table(
        &output,
        &partner_scout::RecordTable {
            header: table.header,
            records: outcome.records,
        },
    )
    .expect("Failed to write output");

    let written = read_table(&output).unwrap();
    assert_eq!(
        written.header,
        vec!["Partner", "Profile", "Website", "Email", "Region"]
    );

    let rows = &written.records;
    assert_eq!(rows.len(), 4);

    assert_eq!(rows[0].website.as_deref(), Some("https://acme.com/?utm_source=dir"));
    assert_eq!(rows[0].email.as_deref(), Some("partners@acme.com"));
    assert_eq!(rows[0].extra, vec!["US".to_string()]);

    assert_eq!(rows[1], ProfileRecord::from_fields(["No Link", "", "", "", "EU"]));

    assert_eq!(rows[2].website.as_deref(), Some("https://complete.com"));
    assert_eq!(rows[2].email.as_deref(), Some("sales@complete.com"));

    // Bad website replaced, good email kept
    assert_eq!(rows[3].website.as_deref(), Some("https://delta.io"));
    assert_eq!(rows[3].email.as_deref(), Some("keep@delta.io"));

    assert_eq!(outcome.stats.visited, 2);
    assert_eq!(outcome.stats.skipped, 2);
    assert!(outcome.failures.is_empty());
}

/// A page that fails navigation for URLs containing "down" and records
/// every URL it was asked to load
#[derive(Default)]
struct ScriptedPage {
    visited: Vec<String>,
    markup: Option<String>,
}

#[async_trait]
impl Page for ScriptedPage {
    async fn navigate(&mut self, url: &str, _timeout: Duration) -> Result<()> {
        self.visited.push(url.to_string());
        if url.contains("down") {
            self.markup = None;
            return Err(ScoutError::Navigation {
                url: url.to_string(),
                message: "net::ERR_CONNECTION_RESET".to_string(),
            });
        }
        self.markup = Some(format!(
            r#"<body><a href="https://{0}.example.org">Visit</a> ops@{0}.org</body>"#,
            url.rsplit('/').next().unwrap_or_default()
        ));
        Ok(())
    }

    fn current_url(&self) -> Option<&str> {
        None
    }

    async fn visible_text(&self) -> Result<String> {
        Ok(partner_scout::browser::visible_text(
            self.markup.as_deref().unwrap_or_default(),
        ))
    }

    async fn rendered_markup(&self) -> Result<String> {
        Ok(self.markup.clone().unwrap_or_default())
    }

    async fn query(&self, selector: &str) -> Result<Vec<ElementSnapshot>> {
        partner_scout::browser::query_elements(self.markup.as_deref().unwrap_or_default(), selector)
    }
}

#[tokio::test]
async fn test_batch_keeps_order_and_runs_past_failures() {
    let records = vec![
        ProfileRecord::new("One", "https://dir.test/one"),
        ProfileRecord::new("Down", "https://dir.test/down"),
        ProfileRecord::new("Three", "https://dir.test/three"),
    ];

    let mut page = ScriptedPage::default();
    let outcome = BatchRunner::from_config(&create_test_config())
        .enrich(&mut page, records)
        .await;

    assert_eq!(
        page.visited,
        vec![
            "https://dir.test/one",
            "https://dir.test/down",
            "https://dir.test/three"
        ]
    );

    let names: Vec<_> = outcome.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["One", "Down", "Three"]);

    assert_eq!(outcome.records[0].website.as_deref(), Some("https://one.example.org"));
    assert_eq!(outcome.records[0].email.as_deref(), Some("ops@one.org"));
    assert_eq!(outcome.records[1].website, None);
    assert_eq!(outcome.records[1].email, None);
    assert_eq!(outcome.records[2].email.as_deref(), Some("ops@three.org"));

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].url, "https://dir.test/down");
}
