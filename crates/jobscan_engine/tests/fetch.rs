use std::sync::Arc;
use std::time::Duration;

use jobscan_engine::{
    run_extraction, AddressPolicy, BrowserTabs, ContentExtractor, FailureKind, FetchSettings,
    PageLoader, ReqwestFetcher, TabHost, DEFAULT_CONTENT_SELECTOR,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetcher_returns_body_and_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/job"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).expect("client");
    let url = format!("{}/job", server.uri());

    let output = fetcher.fetch(&url).await.expect("fetch ok");
    assert_eq!(output.metadata.original_url, url);
    assert_eq!(output.metadata.final_url, output.metadata.original_url);
    assert_eq!(output.metadata.redirect_count, 0);
    assert!(output
        .metadata
        .content_type
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(output.bytes, b"<html>ok</html>");
}

#[tokio::test]
async fn loader_decodes_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latin1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"<p>caf\xe9</p>".to_vec(),
            "text/html; charset=ISO-8859-1",
        ))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).expect("client");
    let page = fetcher
        .load(&format!("{}/latin1", server.uri()))
        .await
        .unwrap();
    assert_eq!(page.html, "<p>café</p>");
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).expect("client");
    let url = format!("{}/missing", server.uri());

    let err = fetcher.fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings).expect("client");
    let url = format!("{}/slow", server.uri());

    let err = fetcher.fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_non_html() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).expect("client");
    let err = fetcher
        .fetch(&format!("{}/data", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "application/json".to_string()
        }
    );
}

#[tokio::test]
async fn browser_tabs_check_a_served_job_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/view/42"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<html><body><div class="jobs-description-content__text--stretch">
                 <p>Relocation package available.</p></div></body></html>"#,
            "text/html",
        ))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).expect("client");
    let tabs = BrowserTabs::new(Arc::new(fetcher));
    let tab = tabs.open(format!("{}/jobs/view/42", server.uri()));
    assert_eq!(tabs.active_tab().await.unwrap(), Some(tab));

    let extractor = ContentExtractor::new(DEFAULT_CONTENT_SELECTOR).unwrap();
    let text = run_extraction(&tabs, &extractor, &AddressPolicy::default())
        .await
        .unwrap();
    assert_eq!(text, "Relocation package available.");
}

#[tokio::test]
async fn fetcher_counts_redirects_per_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/new"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>moved</p>", "text/html"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).expect("client");
    let redirected = fetcher
        .fetch(&format!("{}/old", server.uri()))
        .await
        .expect("fetch ok");
    assert_eq!(redirected.metadata.redirect_count, 1);
    assert_eq!(redirected.metadata.final_url, format!("{}/new", server.uri()));
    assert_eq!(redirected.bytes, b"<p>moved</p>");

    // Same fetcher, same client: the count starts over.
    let direct = fetcher
        .fetch(&format!("{}/new", server.uri()))
        .await
        .expect("fetch ok");
    assert_eq!(direct.metadata.redirect_count, 0);
}

#[tokio::test]
async fn fetcher_stops_at_redirect_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/loop"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        redirect_limit: 2,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings).expect("client");
    let err = fetcher
        .fetch(&format!("{}/loop", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::RedirectLimitExceeded);
    assert_eq!(server.received_requests().await.map(|r| r.len()), Some(3));
}

#[tokio::test]
async fn stray_byte_does_not_hide_the_job_text() {
    let server = MockServer::start().await;
    let mut body = br#"<html><body>
        <div class="jobs-description-content__text--stretch">Remote role, visa ok</div>
        <footer>caf"#
        .to_vec();
    body.extend_from_slice(b"\xE9</footer></body></html>");
    Mock::given(method("GET"))
        .and(path("/jobs/view/7"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).expect("client");
    let tabs = BrowserTabs::new(Arc::new(fetcher));
    tabs.open(format!("{}/jobs/view/7", server.uri()));

    let extractor = ContentExtractor::new(DEFAULT_CONTENT_SELECTOR).unwrap();
    let text = run_extraction(&tabs, &extractor, &AddressPolicy::default())
        .await
        .expect("job text despite the malformed footer");
    assert_eq!(text, "Remote role, visa ok");
}
