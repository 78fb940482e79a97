use super::*;

const NAV_HTML: &str = r#"
    <nav class="sidebar">
      <a class="nav-link" id="home" href="index.html">Home</a>
      <a class="nav-link" id="setup" href="setup.html">Setup</a>
      <a class="nav-link" id="api" href="api.html">API</a>
      <a class="nav-link" id="abs" href="/docs/setup.html">Setup (absolute)</a>
    </nav>
    "#;

#[test]
fn link_matching_last_path_segment_is_marked_active() -> Result<()> {
    let page = Page::from_html_with_url("https://docs.example.com/docs/setup.html", NAV_HTML)?;
    assert!(page.has_class("#setup", "active")?);
    page.assert_count(".nav-link.active", 1)?;
    assert_eq!(page.location().page_identifier(), "setup.html");

    let report = page
        .install_report()
        .ok_or_else(|| Error::Runtime("behaviors not installed".into()))?;
    assert_eq!(report.page_identifier, "setup.html");
    assert_eq!(report.active_links, 1);
    Ok(())
}

#[test]
fn site_root_resolves_to_index_html() -> Result<()> {
    let page = Page::from_html_with_url("https://docs.example.com/", NAV_HTML)?;
    assert!(page.has_class("#home", "active")?);
    page.assert_count(".nav-link.active", 1)?;
    Ok(())
}

#[test]
fn directory_path_resolves_to_index_html() -> Result<()> {
    let page = Page::from_html_with_url("https://docs.example.com/docs/", NAV_HTML)?;
    assert!(page.has_class("#home", "active")?);
    assert!(!page.has_class("#setup", "active")?);
    Ok(())
}

#[test]
fn query_and_fragment_do_not_affect_the_identifier() -> Result<()> {
    let page =
        Page::from_html_with_url("https://docs.example.com/api.html?v=2#errors", NAV_HTML)?;
    assert!(page.has_class("#api", "active")?);
    page.assert_count(".nav-link.active", 1)?;
    Ok(())
}

#[test]
fn unknown_page_marks_nothing() -> Result<()> {
    let page = Page::from_html_with_url("https://docs.example.com/changelog.html", NAV_HTML)?;
    page.assert_count(".nav-link.active", 0)?;
    Ok(())
}

#[test]
fn every_link_with_the_identifier_is_marked() -> Result<()> {
    let html = r#"
        <a class="nav-link" id="top" href="setup.html">Setup</a>
        <a class="nav-link" id="bottom" href="setup.html">Setup again</a>
        "#;
    let page = Page::from_html_with_url("https://docs.example.com/setup.html", html)?;
    assert!(page.has_class("#top", "active")?);
    assert!(page.has_class("#bottom", "active")?);
    Ok(())
}

#[test]
fn page_identifier_from_path_handles_edge_paths() {
    assert_eq!(page_identifier_from_path("/docs/setup.html"), "setup.html");
    assert_eq!(page_identifier_from_path("/"), "index.html");
    assert_eq!(page_identifier_from_path(""), "index.html");
    assert_eq!(page_identifier_from_path("/docs/"), "index.html");
    assert_eq!(page_identifier_from_path("guide"), "guide");
}

#[test]
fn invalid_page_url_is_reported() {
    match Page::from_html_with_url("not a url", NAV_HTML) {
        Err(Error::InvalidUrl(message)) => assert!(message.starts_with("not a url")),
        other => panic!("expected invalid url, got {other:?}"),
    }
}
