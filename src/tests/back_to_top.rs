use super::*;

const PAGE_HTML: &str = r#"<main><h1 id="title">Docs</h1></main>"#;

#[test]
fn one_hidden_back_to_top_button_is_appended_to_body() -> Result<()> {
    let page = Page::from_html(PAGE_HTML)?;
    page.assert_count(".back-to-top", 1)?;
    page.assert_count("body > button.back-to-top", 1)?;
    page.assert_count("main + .back-to-top", 1)?;
    page.assert_text(".back-to-top", "\u{2191}")?;
    assert!(!page.is_displayed(".back-to-top")?);

    assert_eq!(page.style_property(".back-to-top", "position")?.as_deref(), Some("fixed"));
    assert_eq!(page.style_property(".back-to-top", "bottom")?.as_deref(), Some("2rem"));
    assert_eq!(page.style_property(".back-to-top", "right")?.as_deref(), Some("2rem"));
    assert_eq!(page.style_property(".back-to-top", "z-index")?.as_deref(), Some("1000"));
    assert_eq!(
        page.style_property(".back-to-top", "box-shadow")?.as_deref(),
        Some("0 4px 6px var(--shadow)")
    );
    assert!(page.install_report().is_some_and(|report| report.back_to_top));
    Ok(())
}

#[test]
fn button_shows_strictly_above_the_threshold() -> Result<()> {
    let mut page = Page::from_html(PAGE_HTML)?;

    page.scroll_to(301)?;
    assert!(page.is_displayed(".back-to-top")?);

    page.scroll_to(300)?;
    assert!(!page.is_displayed(".back-to-top")?);

    page.scroll_to(1200)?;
    assert!(page.is_displayed(".back-to-top")?);

    page.scroll_to(0)?;
    assert!(!page.is_displayed(".back-to-top")?);
    Ok(())
}

#[test]
fn activation_smooth_scrolls_to_the_top_and_hides_the_button() -> Result<()> {
    let mut page = Page::from_html(PAGE_HTML)?;
    page.scroll_to(900)?;
    assert!(page.is_displayed(".back-to-top")?);

    page.click(".back-to-top")?;
    assert_eq!(page.scroll_y(), 0);
    assert_eq!(
        page.take_scroll_requests(),
        vec![ScrollRequest {
            target: ScrollTarget::Offset(0),
            behavior: ScrollBehavior::Smooth,
            block: None,
        }]
    );
    assert!(!page.is_displayed(".back-to-top")?);
    Ok(())
}

#[test]
fn negative_scroll_offsets_clamp_to_zero() -> Result<()> {
    let mut page = Page::from_html(PAGE_HTML)?;
    page.scroll_to(-40)?;
    assert_eq!(page.scroll_y(), 0);
    assert!(!page.is_displayed(".back-to-top")?);
    Ok(())
}

#[test]
fn scroll_events_fire_only_when_the_offset_changes() -> Result<()> {
    let mut page = Page::from_html(PAGE_HTML)?;
    page.enable_trace(true);
    page.set_trace_events(false);
    page.set_trace_timers(false);

    page.scroll_to(500)?;
    page.scroll_to(500)?;
    let logs = page.take_trace_logs();
    let syncs = logs
        .iter()
        .filter(|line| line.starts_with("[behavior] back-to-top"))
        .count();
    assert_eq!(syncs, 1, "unexpected trace: {logs:?}");
    Ok(())
}

#[test]
fn custom_threshold_is_honored() -> Result<()> {
    let options = PageOptions::new()
        .with_behaviors(BehaviorConfig::default().with_back_to_top_threshold(100));
    let mut page = Page::from_html_with_options(PAGE_HTML, options)?;
    page.scroll_to(150)?;
    assert!(page.is_displayed(".back-to-top")?);
    Ok(())
}
