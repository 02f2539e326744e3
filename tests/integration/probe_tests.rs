//! Integration tests for the probe engine
//!
//! These tests use wiremock to stand up a mock catalog and PURL resolver and
//! run full probes end-to-end.

use database360::config::{load_settings, ProbeSettings, SheetLoader};
use database360::model::{InstitutionConfig, ResourceRecord};
use database360::probe::{run_probes, ProbeRunner, DEFAULT_USER_AGENT};
use std::time::{Duration, Instant};
use wiremock::matchers::{headers, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PAGE: &str = r#"
    <html>
        <body>
            <a href="/other/link">Art &amp; Architecture Source</a>
            <a href="/catalog/12345">Art &amp; Architecture Source</a>
        </body>
    </html>
"#;

/// Settings with no courtesy delay and short timeouts
fn test_settings() -> ProbeSettings {
    ProbeSettings {
        delay_ms: 0,
        catalog_timeout_secs: 5,
        purl_timeout_secs: 5,
        ..ProbeSettings::default()
    }
}

fn institution(search_base: &str, pattern: Option<&str>) -> InstitutionConfig {
    let mut pairs = vec![("catalog_search_url".to_string(), search_base.to_string())];
    if let Some(pattern) = pattern {
        pairs.push(("valid_catalog_links_match".to_string(), pattern.to_string()));
    }
    pairs.into_iter().collect()
}

/// The User-Agent as wiremock sees it: one value per comma-separated part
fn user_agent_values() -> Vec<&'static str> {
    DEFAULT_USER_AGENT.split(',').map(str::trim).collect()
}

fn search_base(server: &MockServer) -> String {
    format!("{}/catalog?search_field=title&q=", server.uri())
}

fn record_page(purl: &str) -> String {
    format!(
        r#"<html><body>
            <a href="{}/">Wrong: trailing slash</a>
            <a href="{}">
                Click here for Art &amp; Architecture Source
            </a>
        </body></html>"#,
        purl, purl
    )
}

async fn mount_search(server: &MockServer, name: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path("/catalog"))
        .and(query_param("q", name))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page_path: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_probe_with_link_pattern() {
    let server = MockServer::start().await;
    let purl = format!("{}/purl/8910", server.uri());

    mount_search(&server, "Art & Architecture Source", SEARCH_PAGE).await;
    mount_page(&server, "/catalog/12345", 200, &record_page(&purl)).await;
    mount_page(
        &server,
        "/purl/8910",
        200,
        "<html><body>Welcome to Art &amp; Architecture Source (EBSCOhost)</body></html>",
    )
    .await;

    let config = institution(&search_base(&server), Some("/catalog/"));
    let runner = ProbeRunner::new(&config, &test_settings()).expect("Failed to build runner");

    let resource = ResourceRecord::named("Art & Architecture Source")
        .with_purl(purl.clone())
        .with_expected_text("architecture source");
    let results = runner.run(&[resource]).await;

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.database_name.as_deref(), Some("Art & Architecture Source"));
    assert_eq!(
        result.catalog_probe.catalog_url_link.as_deref(),
        Some(format!("{}/catalog/12345", server.uri()).as_str())
    );
    assert_eq!(
        result.catalog_probe.purl_link_text.as_deref(),
        Some("Click here for Art & Architecture Source")
    );
    assert_eq!(result.catalog_probe.error, None);
    assert_eq!(result.purl_probe.purl_led_to_database, Some(true));
}

#[tokio::test]
async fn test_without_pattern_first_anchor_wins() {
    let server = MockServer::start().await;
    let purl = format!("{}/purl/8910", server.uri());

    mount_search(&server, "Art & Architecture Source", SEARCH_PAGE).await;
    mount_page(&server, "/other/link", 200, &record_page(&purl)).await;

    Mock::given(method("GET"))
        .and(path("/catalog/12345"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = institution(&search_base(&server), None);
    let runner = ProbeRunner::new(&config, &test_settings()).expect("Failed to build runner");

    let resource = ResourceRecord::named("Art & Architecture Source").with_purl(purl);
    let results = runner.run(&[resource]).await;

    assert_eq!(
        results[0].catalog_probe.catalog_url_link.as_deref(),
        Some(format!("{}/other/link", server.uri()).as_str())
    );
    assert_eq!(
        results[0].catalog_probe.purl_link_text.as_deref(),
        Some("Click here for Art & Architecture Source")
    );
    // No expected text, so the PURL is not checked
    assert!(results[0].purl_probe.is_empty());
}

#[tokio::test]
async fn test_requests_carry_browser_user_agent() {
    let server = MockServer::start().await;
    let purl = format!("{}/purl/1", server.uri());

    Mock::given(method("GET"))
        .and(path("/catalog"))
        .and(headers("user-agent", user_agent_values()))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"<a href="/catalog/1">JSTOR</a>"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/catalog/1"))
        .and(headers("user-agent", user_agent_values()))
        .respond_with(ResponseTemplate::new(200).set_body_string(record_page(&purl)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/purl/1"))
        .and(headers("user-agent", user_agent_values()))
        .respond_with(ResponseTemplate::new(200).set_body_string("JSTOR home"))
        .expect(1)
        .mount(&server)
        .await;

    let config = institution(&search_base(&server), None);
    let runner = ProbeRunner::new(&config, &test_settings()).expect("Failed to build runner");
    let resource = ResourceRecord::named("JSTOR")
        .with_purl(purl)
        .with_expected_text("JSTOR");
    let results = runner.run(&[resource]).await;

    assert!(results[0].catalog_probe.catalog_url_link.is_some());
    assert_eq!(results[0].purl_probe.purl_led_to_database, Some(true));

    let requests = server.received_requests().await.expect("Request recording enabled");
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_failure_isolation() {
    let server = MockServer::start().await;

    mount_search(&server, "Scopus", r#"<a href="/catalog/1">Scopus</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/catalog"))
        .and(query_param("q", "Broken DB"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_search(&server, "JSTOR", r#"<a href="/catalog/3">JSTOR</a>"#).await;

    let config = institution(&search_base(&server), None);
    let runner = ProbeRunner::new(&config, &test_settings()).expect("Failed to build runner");

    let resources = vec![
        ResourceRecord::named("Scopus"),
        ResourceRecord::named("Broken DB"),
        ResourceRecord::named("JSTOR"),
    ];
    let results = runner.run(&resources).await;

    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0].catalog_probe.catalog_url_link.as_deref(),
        Some(format!("{}/catalog/1", server.uri()).as_str())
    );
    assert!(results[1].catalog_probe.is_empty());
    assert_eq!(results[1].database_name.as_deref(), Some("Broken DB"));
    assert_eq!(
        results[2].catalog_probe.catalog_url_link.as_deref(),
        Some(format!("{}/catalog/3", server.uri()).as_str())
    );
}

#[tokio::test]
async fn test_order_preserved_and_missing_names_skipped() {
    let server = MockServer::start().await;

    for name in ["Test DB 1", "Test DB 2"] {
        mount_search(&server, name, "<html><body>No results</body></html>").await;
    }

    let config = institution(&search_base(&server), None);
    let runner = ProbeRunner::new(&config, &test_settings()).expect("Failed to build runner");

    let resources = vec![
        ResourceRecord::named("Test DB 1"),
        ResourceRecord::default().with_purl("http://resolver.example.edu/misc/0"),
        ResourceRecord::named("Test DB 2"),
    ];
    let results = runner.run(&resources).await;

    assert_eq!(results.len(), resources.len());
    for (result, resource) in results.iter().zip(&resources) {
        assert_eq!(result.database_name, resource.database_name);
        assert!(result.catalog_probe.is_empty());
    }
    assert_eq!(results[1].catalog_probe.error, None);

    // Only the two named resources reached the catalog
    let requests = server.received_requests().await.expect("Request recording enabled");
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_record_page_failure_keeps_catalog_link() {
    let server = MockServer::start().await;
    let purl = format!("{}/purl/5", server.uri());

    mount_search(&server, "Scopus", r#"<a href="/catalog/5">Scopus</a>"#).await;
    mount_page(&server, "/catalog/5", 503, "unavailable").await;

    let config = institution(&search_base(&server), None);
    let runner = ProbeRunner::new(&config, &test_settings()).expect("Failed to build runner");
    let results = runner
        .run(&[ResourceRecord::named("Scopus").with_purl(purl)])
        .await;

    let catalog = &results[0].catalog_probe;
    assert_eq!(
        catalog.catalog_url_link.as_deref(),
        Some(format!("{}/catalog/5", server.uri()).as_str())
    );
    assert_eq!(catalog.purl_link_text, None);
    assert_eq!(catalog.error, None);
}

#[tokio::test]
async fn test_purl_not_linked_exactly() {
    let server = MockServer::start().await;
    let purl = format!("{}/purl/6", server.uri());

    mount_search(&server, "Scopus", r#"<a href="/catalog/6">Scopus</a>"#).await;
    mount_page(
        &server,
        "/catalog/6",
        200,
        &format!(r#"<a href="{}/">Scopus (trailing slash)</a>"#, purl),
    )
    .await;

    let config = institution(&search_base(&server), None);
    let runner = ProbeRunner::new(&config, &test_settings()).expect("Failed to build runner");
    let results = runner
        .run(&[ResourceRecord::named("Scopus").with_purl(purl)])
        .await;

    assert!(results[0].catalog_probe.catalog_url_link.is_some());
    assert_eq!(results[0].catalog_probe.purl_link_text, None);
}

#[tokio::test]
async fn test_purl_probe_outcomes() {
    let server = MockServer::start().await;

    mount_page(&server, "/purl/match", 200, "Welcome to Test Database").await;
    mount_page(&server, "/purl/nomatch", 200, "Different content").await;
    mount_page(&server, "/purl/gone", 404, "Not found").await;
    Mock::given(method("GET"))
        .and(path("/purl/redirect"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}/home", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/home", 200, "<h1>TEST DATABASE</h1>").await;

    let config = institution(&search_base(&server), None);
    let runner = ProbeRunner::new(&config, &test_settings()).expect("Failed to build runner");

    let resource = |purl_path: &str| ResourceRecord {
        purl: Some(format!("{}{}", server.uri(), purl_path)),
        database_home_page_should_contain_text: Some("test database".to_string()),
        ..ResourceRecord::default()
    };
    let resources = vec![
        resource("/purl/match"),
        resource("/purl/nomatch"),
        resource("/purl/gone"),
        resource("/purl/redirect"),
    ];
    let results = runner.run(&resources).await;

    assert_eq!(results[0].purl_probe.purl_led_to_database, Some(true));
    assert_eq!(results[1].purl_probe.purl_led_to_database, Some(false));
    assert_eq!(results[2].purl_probe.purl_led_to_database, None);
    assert_eq!(results[3].purl_probe.purl_led_to_database, Some(true));
}

#[tokio::test]
async fn test_invalid_search_url_becomes_error_field() {
    let server = MockServer::start().await;
    mount_page(&server, "/purl/7", 200, "Scopus home").await;

    let config = institution("not a url?q=", None);
    let runner = ProbeRunner::new(&config, &test_settings()).expect("Failed to build runner");

    let resources = vec![
        ResourceRecord::named("Scopus")
            .with_purl(format!("{}/purl/7", server.uri()))
            .with_expected_text("scopus"),
        ResourceRecord::named("JSTOR"),
    ];
    let results = runner.run(&resources).await;

    assert_eq!(results.len(), 2);
    let error = results[0].catalog_probe.error.as_deref().expect("error recorded");
    assert!(error.contains("Invalid URL"));
    assert_eq!(results[0].catalog_probe.catalog_url_link, None);
    // The PURL probe still runs for the failed resource
    assert_eq!(results[0].purl_probe.purl_led_to_database, Some(true));
    assert!(results[1].catalog_probe.error.is_some());
}

#[tokio::test]
async fn test_delay_applies_once_per_named_resource() {
    let server = MockServer::start().await;
    mount_search(&server, "A", "none").await;
    mount_search(&server, "B", "none").await;

    let settings = ProbeSettings {
        delay_ms: 60,
        ..test_settings()
    };
    let config = institution(&search_base(&server), None);
    let runner = ProbeRunner::new(&config, &settings).expect("Failed to build runner");

    let start = Instant::now();
    let results = runner
        .run(&[
            ResourceRecord::named("A"),
            ResourceRecord::default(),
            ResourceRecord::named("B"),
        ])
        .await;

    assert_eq!(results.len(), 3);
    assert!(start.elapsed() >= Duration::from_millis(120));
}

#[tokio::test]
async fn test_load_sheets_then_probe() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "ARTbibliographies Modern",
        r#"<a href="/catalog/42">ARTbibliographies Modern</a>"#,
    )
    .await;

    let resources_csv = "Database Name,PURL,Database Home Page Should Contain Text,Vendor\n\
                         ARTbibliographies Modern,,,ProQuest\n";
    Mock::given(method("GET"))
        .and(path("/sheets/resources.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(resources_csv))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(
        dir.path().join("institution.csv"),
        format!(
            "Setting,Value\nCatalog Search URL,{}\nValid Catalog Links Match,/catalog/\\d+\n",
            search_base(&server)
        ),
    )
    .expect("Failed to write institution sheet");

    let settings_path = dir.path().join("database360.toml");
    std::fs::write(
        &settings_path,
        format!(
            "[sources]\ninstitution = \"institution.csv\"\nresources = \"{}/sheets/resources.csv\"\n\n[probe]\ndelay-ms = 0\n",
            server.uri()
        ),
    )
    .expect("Failed to write settings");

    let settings = load_settings(&settings_path).expect("Failed to load settings");
    let loader = SheetLoader::new(&settings).expect("Failed to build loader");
    let institution = loader
        .load_institution_config()
        .await
        .expect("Failed to load institution sheet");
    let resources = loader.load_resources().await.expect("Failed to load resources");

    assert_eq!(institution.valid_catalog_links_match(), Some(r"/catalog/\d+"));
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].extra.get("vendor").map(String::as_str), Some("ProQuest"));

    let runner = ProbeRunner::new(&institution, &settings.probe).expect("Failed to build runner");
    let results = runner.run(&resources).await;

    assert_eq!(
        results[0].catalog_probe.catalog_url_link.as_deref(),
        Some(format!("{}/catalog/42", server.uri()).as_str())
    );
}

#[tokio::test]
async fn test_unreachable_remote_sheet() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheets/missing.csv"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let settings_path = dir.path().join("database360.toml");
    std::fs::write(
        &settings_path,
        format!(
            "[sources]\ninstitution = \"{0}/sheets/missing.csv\"\nresources = \"{0}/sheets/missing.csv\"\n",
            server.uri()
        ),
    )
    .expect("Failed to write settings");

    let settings = load_settings(&settings_path).expect("Failed to load settings");
    let result = database360::load_sources(&settings).await;
    assert!(matches!(
        result,
        Err(database360::Db360Error::Config(
            database360::ConfigError::Remote { .. }
        ))
    ));
}

#[tokio::test]
async fn test_slow_catalog_and_purl_time_out() {
    let server = MockServer::start().await;
    let slow = || ResponseTemplate::new(200).set_delay(Duration::from_secs(5));

    Mock::given(method("GET"))
        .and(path("/catalog"))
        .respond_with(slow().set_body_string(r#"<a href="/catalog/1">Scopus</a>"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/purl/slow"))
        .respond_with(slow().set_body_string("Scopus home"))
        .mount(&server)
        .await;

    let settings = ProbeSettings {
        catalog_timeout_secs: 1,
        purl_timeout_secs: 1,
        ..test_settings()
    };
    let config = institution(&search_base(&server), None);
    let runner = ProbeRunner::new(&config, &settings).expect("Failed to build runner");

    let resource = ResourceRecord::named("Scopus")
        .with_purl(format!("{}/purl/slow", server.uri()))
        .with_expected_text("scopus");

    let start = Instant::now();
    let results = runner.run(&[resource]).await;

    // Each request gives up at its timeout, well before the mock delay
    assert!(start.elapsed() < Duration::from_secs(4));
    assert_eq!(results.len(), 1);
    assert!(results[0].catalog_probe.is_empty());
    assert!(results[0].purl_probe.is_empty());
}

#[tokio::test]
async fn test_run_probes_entry_point() {
    let server = MockServer::start().await;
    mount_search(&server, "A/B Index", r#"<a href="/catalog/8">A/B Index</a>"#).await;

    let config = institution(&search_base(&server), Some("/catalog/"));
    let resources = vec![ResourceRecord::named("A/B Index"), ResourceRecord::default()];
    let results = run_probes(&config, &resources, &test_settings())
        .await
        .expect("Failed to run probes");

    assert_eq!(results.len(), 2);
    assert_eq!(
        results[0].catalog_probe.catalog_url_link.as_deref(),
        Some(format!("{}/catalog/8", server.uri()).as_str())
    );
    assert!(results[1].catalog_probe.is_empty());

    // The slash in the name is sent unencoded
    let requests = server.received_requests().await.expect("Request recording enabled");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("search_field=title&q=A/B%20Index"));
}

#[tokio::test]
async fn test_run_probes_rejects_missing_search_url() {
    let result = run_probes(&InstitutionConfig::default(), &[], &test_settings()).await;
    assert!(matches!(
        result,
        Err(database360::Db360Error::Config(
            database360::ConfigError::Missing(_)
        ))
    ));
}
