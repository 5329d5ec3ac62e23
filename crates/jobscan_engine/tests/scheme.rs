use jobscan_engine::AddressPolicy;

#[test]
fn browser_internal_pages_are_restricted() {
    let policy = AddressPolicy::default();
    for address in [
        "chrome://settings",
        "chrome-extension://abcdef/index.html",
        "edge://newtab",
        "about:blank",
        "moz-extension://1234/panel.html",
        "CHROME://history",
    ] {
        assert!(policy.is_restricted(address), "{address} should be restricted");
    }
}

#[test]
fn non_web_schemes_and_garbage_are_restricted() {
    let policy = AddressPolicy::default();
    assert!(policy.is_restricted("file:///etc/passwd"));
    assert!(policy.is_restricted("ftp://example.com/jobs"));
    assert!(policy.is_restricted("not a url"));
}

#[test]
fn web_pages_are_allowed() {
    let policy = AddressPolicy::default();
    assert!(!policy.is_restricted("https://www.linkedin.com/jobs/view/123"));
    assert!(!policy.is_restricted("http://localhost:8080/job"));
}

#[test]
fn extra_prefixes_extend_the_defaults() {
    let policy = AddressPolicy::new(["https://intranet.", "about:"]);
    assert!(policy.is_restricted("https://intranet.example.com/jobs"));
    assert!(!policy.is_restricted("https://example.com/jobs"));
    let about_count = policy
        .restricted_prefixes()
        .iter()
        .filter(|p| p.as_str() == "about:")
        .count();
    assert_eq!(about_count, 1);
}
