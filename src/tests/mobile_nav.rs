use super::*;

const NAV_HTML: &str = r#"
    <button id="mobile-menu-btn" type="button">Menu</button>
    <aside class="sidebar">
      <nav>
        <a class="nav-link" href="index.html">Home</a>
        <a class="nav-link" href="setup.html">Setup</a>
      </nav>
    </aside>
    "#;

#[test]
fn menu_button_toggles_sidebar_active_class() -> Result<()> {
    let mut page = Page::from_html(NAV_HTML)?;
    assert!(!page.has_class(".sidebar", "active")?);

    page.click("#mobile-menu-btn")?;
    assert!(page.has_class(".sidebar", "active")?);

    page.click("#mobile-menu-btn")?;
    assert!(!page.has_class(".sidebar", "active")?);
    Ok(())
}

#[test]
fn nav_link_click_closes_sidebar_at_the_breakpoint() -> Result<()> {
    let options = PageOptions::new().with_viewport_width(768);
    let mut page = Page::from_html_with_options(NAV_HTML, options)?;

    page.click("#mobile-menu-btn")?;
    assert!(page.has_class(".sidebar", "active")?);

    page.click(r#"a.nav-link[href="setup.html"]"#)?;
    assert!(!page.has_class(".sidebar", "active")?);
    assert_eq!(page.take_navigations(), vec!["setup.html".to_string()]);
    Ok(())
}

#[test]
fn nav_link_click_leaves_sidebar_alone_on_wide_viewports() -> Result<()> {
    let mut page = Page::from_html(NAV_HTML)?;
    assert_eq!(page.viewport().inner_width, 1024);

    page.click("#mobile-menu-btn")?;
    page.click(".nav-link")?;
    assert!(page.has_class(".sidebar", "active")?);

    page.set_viewport_width(769);
    page.click(".nav-link")?;
    assert!(page.has_class(".sidebar", "active")?);

    page.set_viewport_width(320);
    page.click(".nav-link")?;
    assert!(!page.has_class(".sidebar", "active")?);
    Ok(())
}

#[test]
fn nav_link_click_on_closed_sidebar_keeps_it_closed() -> Result<()> {
    let mut page = Page::from_html_with_options(NAV_HTML, PageOptions::new().with_viewport_width(400))?;
    page.click(".nav-link")?;
    assert!(!page.has_class(".sidebar", "active")?);
    page.assert_attr(".sidebar", "class", "sidebar")?;
    Ok(())
}

#[test]
fn menu_button_without_sidebar_is_harmless() -> Result<()> {
    let mut page = Page::from_html(r#"<button id="mobile-menu-btn">Menu</button>"#)?;
    page.click("#mobile-menu-btn")?;
    let report = page
        .install_report()
        .ok_or_else(|| Error::Runtime("behaviors not installed".into()))?;
    assert_eq!(report.attached("mobile-menu"), 1);
    assert_eq!(report.attached("nav-close"), 0);
    Ok(())
}

#[test]
fn custom_breakpoint_is_honored() -> Result<()> {
    let options = PageOptions::new()
        .with_viewport_width(900)
        .with_behaviors(BehaviorConfig::default().with_mobile_breakpoint(1000));
    let mut page = Page::from_html_with_options(NAV_HTML, options)?;
    page.click("#mobile-menu-btn")?;
    page.click(".nav-link")?;
    assert!(!page.has_class(".sidebar", "active")?);
    Ok(())
}
