use super::*;

const ANCHOR_HTML: &str = r##"
    <nav>
      <a id="to-install" href="#install">Install</a>
      <a id="to-missing" href="#missing">Missing</a>
      <a id="bare" href="#">Top</a>
      <a id="external" href="https://example.com/guide.html">Guide</a>
    </nav>
    <h2 id="install">Installation</h2>
    "##;

#[test]
fn anchor_click_requests_smooth_scroll_to_target_top() -> Result<()> {
    let mut page = Page::from_html(ANCHOR_HTML)?;
    page.click("#to-install")?;

    assert_eq!(
        page.take_scroll_requests(),
        vec![ScrollRequest {
            target: ScrollTarget::Element("h2#install".into()),
            behavior: ScrollBehavior::Smooth,
            block: Some(ScrollBlock::Start),
        }]
    );
    assert!(page.take_navigations().is_empty());
    assert!(page.take_scroll_requests().is_empty());
    Ok(())
}

#[test]
fn anchor_without_target_only_suppresses_navigation() -> Result<()> {
    let mut page = Page::from_html(ANCHOR_HTML)?;
    page.click("#to-missing")?;
    assert!(page.take_scroll_requests().is_empty());
    assert!(page.take_navigations().is_empty());
    Ok(())
}

#[test]
fn bare_hash_href_is_a_quiet_no_op() -> Result<()> {
    let mut page = Page::from_html(ANCHOR_HTML)?;
    page.click("#bare")?;
    assert!(page.take_scroll_requests().is_empty());
    assert!(page.take_navigations().is_empty());
    Ok(())
}

#[test]
fn regular_links_still_navigate() -> Result<()> {
    let mut page = Page::from_html(ANCHOR_HTML)?;
    page.click("#external")?;
    assert_eq!(
        page.take_navigations(),
        vec!["https://example.com/guide.html".to_string()]
    );
    assert!(page.take_scroll_requests().is_empty());
    Ok(())
}

#[test]
fn clicking_inside_an_anchor_uses_the_anchor_href() -> Result<()> {
    let html = r##"
        <a id="link" href="#target"><span id="inner">Jump</span></a>
        <section id="target" class="section">Target</section>
        "##;
    let mut page = Page::from_html(html)?;
    page.click("#inner")?;

    let requests = page.take_scroll_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].target,
        ScrollTarget::Element("section#target.section".into())
    );
    assert!(page.take_navigations().is_empty());
    Ok(())
}

#[test]
fn anchor_scroll_does_not_move_the_viewport_offset() -> Result<()> {
    let mut page = Page::from_html(ANCHOR_HTML)?;
    page.scroll_to(120)?;
    page.click("#to-install")?;
    assert_eq!(page.scroll_y(), 120);
    Ok(())
}
