use super::*;

const SEARCH_HTML: &str = r#"
    <input id="search-box" type="search" placeholder="Search docs">
    <div class="section" id="install"><h2>Installation</h2><p>Install the CLI.</p></div>
    <div class="section" id="config"><h2>Configuration</h2><p>Edit the YAML file.</p></div>
    <div class="section" id="faq"><h2>FAQ</h2><p>How to INSTALL offline</p></div>
    "#;

#[test]
fn sections_are_untouched_until_the_first_input() -> Result<()> {
    let page = Page::from_html(SEARCH_HTML)?;
    assert_eq!(page.style_property("#install", "display")?, None);
    assert!(page.is_displayed("#config")?);
    Ok(())
}

#[test]
fn query_hides_sections_that_do_not_contain_it() -> Result<()> {
    let mut page = Page::from_html(SEARCH_HTML)?;
    page.type_text("#search-box", "install")?;

    assert!(page.is_displayed("#install")?);
    assert!(!page.is_displayed("#config")?);
    assert!(page.is_displayed("#faq")?);
    assert_eq!(page.style_property("#install", "display")?.as_deref(), Some("block"));
    assert_eq!(page.style_property("#config", "display")?.as_deref(), Some("none"));
    Ok(())
}

#[test]
fn query_matching_is_case_insensitive() -> Result<()> {
    let mut page = Page::from_html(SEARCH_HTML)?;
    page.type_text("#search-box", "YaMl")?;
    assert!(!page.is_displayed("#install")?);
    assert!(page.is_displayed("#config")?);
    assert!(!page.is_displayed("#faq")?);
    Ok(())
}

#[test]
fn clearing_the_query_shows_every_section() -> Result<()> {
    let mut page = Page::from_html(SEARCH_HTML)?;
    page.type_text("#search-box", "nothing matches this")?;
    assert_eq!(
        page.dom
            .query_selector_all(".section")?
            .into_iter()
            .filter(|section| page.dom.style_property(*section, "display").as_deref() == Some("none"))
            .count(),
        3
    );

    page.type_text("#search-box", "")?;
    for section in ["#install", "#config", "#faq"] {
        assert_eq!(page.style_property(section, "display")?.as_deref(), Some("block"));
    }
    Ok(())
}

#[test]
fn query_may_span_child_elements() -> Result<()> {
    let mut page = Page::from_html(SEARCH_HTML)?;
    page.type_text("#search-box", "configurationedit")?;
    assert!(page.is_displayed("#config")?);
    assert!(!page.is_displayed("#install")?);
    Ok(())
}

#[test]
fn existing_inline_styles_are_preserved() -> Result<()> {
    let html = r#"
        <input id="search-box">
        <div class="section" id="s" style="color: red">Alpha</div>
        "#;
    let mut page = Page::from_html(html)?;
    page.type_text("#search-box", "beta")?;
    page.assert_attr("#s", "style", "color: red; display: none;")?;
    page.type_text("#search-box", "alp")?;
    page.assert_attr("#s", "style", "color: red; display: block;")?;
    Ok(())
}

#[test]
fn typing_into_non_input_elements_is_rejected() -> Result<()> {
    let mut page = Page::from_html(SEARCH_HTML)?;
    match page.type_text("#install", "x") {
        Err(Error::TypeMismatch { expected, actual, .. }) => {
            assert_eq!(expected, "input or textarea");
            assert_eq!(actual, "div");
        }
        other => panic!("expected type mismatch, got {other:?}"),
    }
    Ok(())
}

#[test]
fn search_without_sections_is_a_no_op() -> Result<()> {
    let mut page = Page::from_html(r#"<input id="search-box">"#)?;
    page.type_text("#search-box", "anything")?;
    page.assert_count(".section", 0)?;
    Ok(())
}

#[test]
fn injected_header_labels_do_not_run_together() -> Result<()> {
    let html = r#"
        <input id="search-box">
        <div class="section" id="with-code"><h2>Build</h2><pre><code>make</code></pre></div>
        <div class="section" id="prose"><h2>Notes</h2><p>Nothing to run.</p></div>
        "#;
    let mut page = Page::from_html(html)?;
    assert!(!page.text("#with-code")?.contains("CodeCopy"));

    page.type_text("#search-box", "ecop")?;
    assert!(!page.is_displayed("#with-code")?);
    assert!(!page.is_displayed("#prose")?);

    page.type_text("#search-box", "copy")?;
    assert!(page.is_displayed("#with-code")?);
    assert!(!page.is_displayed("#prose")?);
    Ok(())
}
