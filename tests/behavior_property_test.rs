use docsite_behaviors::{Page, Theme, page_identifier_from_path};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseError, TestCaseResult};

const BEHAVIOR_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/behavior_property_test.txt";
const DEFAULT_BEHAVIOR_PROPTEST_CASES: u32 = 96;

const SITE_ORIGIN: &str = "https://docs.example.com";

fn behavior_proptest_cases() -> u32 {
    std::env::var("DOCSITE_BEHAVIORS_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_BEHAVIOR_PROPTEST_CASES)
}

fn fail<E: std::fmt::Debug>(err: E) -> TestCaseError {
    TestCaseError::fail(format!("{err:?}"))
}

fn theme_strategy() -> BoxedStrategy<Theme> {
    prop_oneof![Just(Theme::Light), Just(Theme::Dark)].boxed()
}

fn text_strategy(max_len: usize) -> BoxedStrategy<String> {
    vec(
        prop_oneof![
            Just('a'),
            Just('b'),
            Just('c'),
            Just('A'),
            Just('B'),
            Just('C'),
            Just('x'),
            Just(' '),
            Just('-'),
        ],
        0..=max_len,
    )
    .prop_map(|chars| chars.into_iter().collect())
    .boxed()
}

fn segment_strategy() -> BoxedStrategy<String> {
    "[a-z0-9][a-z0-9-]{0,7}".boxed()
}

#[derive(Clone, Debug)]
struct CodeBlock {
    wrapped: bool,
    code: String,
}

fn code_block_strategy() -> BoxedStrategy<CodeBlock> {
    (any::<bool>(), text_strategy(12))
        .prop_map(|(wrapped, code)| CodeBlock { wrapped, code })
        .boxed()
}

fn assert_double_toggle_restores(initial: Option<Theme>, extra_toggles: usize) -> TestCaseResult {
    let html = r#"<button id="theme-toggle"></button>"#;
    let stored = initial.map(|theme| [("theme", theme.as_str())]);
    let mut page = match &stored {
        Some(entries) => Page::from_html_with_url_and_local_storage(SITE_ORIGIN, html, entries),
        None => Page::from_html(html),
    }
    .map_err(fail)?;

    let start = initial.unwrap_or(Theme::Light);
    prop_assert_eq!(page.root_theme(), Some(start.as_str().to_string()));

    for _ in 0..extra_toggles {
        page.click("#theme-toggle").map_err(fail)?;
    }
    let before = page.root_theme();
    let stored_before = page.preference("theme");

    page.click("#theme-toggle").map_err(fail)?;
    page.click("#theme-toggle").map_err(fail)?;

    prop_assert_eq!(page.root_theme(), before);
    if extra_toggles > 0 || initial.is_some() {
        prop_assert_eq!(page.preference("theme"), stored_before);
    }
    let expected_icon = if page.root_theme().as_deref() == Some("dark") {
        Theme::Dark.icon()
    } else {
        Theme::Light.icon()
    };
    prop_assert_eq!(page.text("#theme-toggle").map_err(fail)?, expected_icon);
    Ok(())
}

fn assert_search_visibility(sections: &[String], query: &str) -> TestCaseResult {
    let mut html = String::from(r#"<input id="search-box">"#);
    for (idx, text) in sections.iter().enumerate() {
        html.push_str(&format!(r#"<div class="section" id="s{idx}">{text}</div>"#));
    }
    let mut page = Page::from_html(&html).map_err(fail)?;
    page.type_text("#search-box", query).map_err(fail)?;

    let needle = query.to_lowercase();
    for (idx, text) in sections.iter().enumerate() {
        let expected = needle.is_empty() || text.to_lowercase().contains(&needle);
        let shown = page.is_displayed(&format!("#s{idx}")).map_err(fail)?;
        prop_assert_eq!(
            shown,
            expected,
            "section {:?} with query {:?}",
            text,
            query
        );
    }
    Ok(())
}

fn assert_active_nav(
    dirs: &[String],
    file: Option<&str>,
    other_links: &[String],
) -> TestCaseResult {
    let mut path = String::from("/");
    for dir in dirs {
        path.push_str(dir);
        path.push('/');
    }
    if let Some(file) = file {
        path.push_str(file);
    }
    let expected = file.unwrap_or("index.html");
    prop_assert_eq!(page_identifier_from_path(&path), expected);

    let mut hrefs = other_links.to_vec();
    hrefs.push(expected.to_string());
    hrefs.push("index.html".to_string());
    let mut html = String::from("<nav>");
    for href in &hrefs {
        html.push_str(&format!(r#"<a class="nav-link" href="{href}">{href}</a>"#));
    }
    html.push_str("</nav>");

    let page = Page::from_html_with_url(&format!("{SITE_ORIGIN}{path}"), &html).map_err(fail)?;
    let matching = hrefs.iter().filter(|href| href.as_str() == expected).count();
    prop_assert_eq!(page.count(".nav-link.active").map_err(fail)?, matching);
    prop_assert_eq!(
        page.count(&format!(r#".nav-link.active[href="{expected}"]"#))
            .map_err(fail)?,
        matching
    );
    Ok(())
}

fn assert_code_blocks_wrapped_once(blocks: &[CodeBlock]) -> TestCaseResult {
    let mut html = String::from("<main>");
    for (idx, block) in blocks.iter().enumerate() {
        let pre = format!(r#"<pre id="b{idx}"><code>{}</code></pre>"#, block.code);
        if block.wrapped {
            html.push_str(&format!(r#"<div class="code-wrapper">{pre}</div>"#));
        } else {
            html.push_str(&pre);
        }
    }
    html.push_str("</main>");

    let page = Page::from_html(&html).map_err(fail)?;
    let bare = blocks.iter().filter(|block| !block.wrapped).count();

    prop_assert_eq!(page.count(".code-wrapper").map_err(fail)?, blocks.len());
    prop_assert_eq!(page.count(".code-header").map_err(fail)?, bare);
    prop_assert_eq!(page.count(".code-header > .copy-btn").map_err(fail)?, bare);
    prop_assert_eq!(page.count(".code-wrapper .code-wrapper").map_err(fail)?, 0);
    for (idx, block) in blocks.iter().enumerate() {
        let id = format!("b{idx}");
        prop_assert_eq!(page.text(&format!("#{id}")).map_err(fail)?, block.code.clone());
        let headers = page
            .count(&format!(".code-wrapper > .code-header + #{id}"))
            .map_err(fail)?;
        prop_assert_eq!(headers, usize::from(!block.wrapped), "block {}", id);
        prop_assert_eq!(
            page.count(&format!("main > .code-wrapper > #{id}")).map_err(fail)?,
            1
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: behavior_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(BEHAVIOR_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn toggling_theme_twice_is_identity(
        initial in proptest::option::of(theme_strategy()),
        extra_toggles in 0usize..4,
    ) {
        assert_double_toggle_restores(initial, extra_toggles)?;
    }

    #[test]
    fn search_shows_exactly_matching_sections(
        sections in vec(text_strategy(16), 0..6),
        query in text_strategy(3),
    ) {
        assert_search_visibility(&sections, &query)?;
    }

    #[test]
    fn active_nav_follows_last_path_segment(
        dirs in vec(segment_strategy(), 0..3),
        file in proptest::option::of(segment_strategy().prop_map(|name| format!("{name}.html"))),
        other_links in vec(segment_strategy().prop_map(|name| format!("{name}.html")), 0..4),
    ) {
        assert_active_nav(&dirs, file.as_deref(), &other_links)?;
    }

    #[test]
    fn every_unwrapped_block_gets_one_header(blocks in vec(code_block_strategy(), 0..6)) {
        assert_code_blocks_wrapped_once(&blocks)?;
    }
}
