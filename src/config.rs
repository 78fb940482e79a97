use crate::platform::{Clipboard, MemoryClipboard, MemoryStore, PreferenceStore, Viewport};
use crate::selector::validate_selector;
use crate::{Error, Result};

/// Selectors for the page elements the behaviors attach to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelectors {
    pub theme_toggle: String,
    pub menu_toggle: String,
    pub sidebar: String,
    pub nav_links: String,
    pub copy_buttons: String,
    pub search_input: String,
    pub sections: String,
    pub code_blocks: String,
    pub anchor_links: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            theme_toggle: "#theme-toggle".into(),
            menu_toggle: "#mobile-menu-btn".into(),
            sidebar: ".sidebar".into(),
            nav_links: ".nav-link".into(),
            copy_buttons: ".copy-btn".into(),
            search_input: "#search-box".into(),
            sections: ".section".into(),
            code_blocks: "pre".into(),
            anchor_links: "a[href^=\"#\"]".into(),
        }
    }
}

impl PageSelectors {
    fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("theme_toggle", self.theme_toggle.as_str()),
            ("menu_toggle", self.menu_toggle.as_str()),
            ("sidebar", self.sidebar.as_str()),
            ("nav_links", self.nav_links.as_str()),
            ("copy_buttons", self.copy_buttons.as_str()),
            ("search_input", self.search_input.as_str()),
            ("sections", self.sections.as_str()),
            ("code_blocks", self.code_blocks.as_str()),
            ("anchor_links", self.anchor_links.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorConfig {
    pub storage_key: String,
    pub theme_attribute: String,
    pub active_class: String,
    pub mobile_breakpoint_px: u32,
    pub back_to_top_threshold_px: i64,
    pub copy_revert_ms: i64,
    pub copy_label: String,
    pub copied_label: String,
    pub copy_failed_label: String,
    pub code_language_label: String,
    pub selectors: PageSelectors,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".into(),
            theme_attribute: "data-theme".into(),
            active_class: "active".into(),
            mobile_breakpoint_px: 768,
            back_to_top_threshold_px: 300,
            copy_revert_ms: 2000,
            copy_label: "Copy".into(),
            copied_label: "Copied!".into(),
            copy_failed_label: "Failed".into(),
            code_language_label: "Code".into(),
            selectors: PageSelectors::default(),
        }
    }
}

impl BehaviorConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_mobile_breakpoint(mut self, px: u32) -> Self {
        self.mobile_breakpoint_px = px;
        self
    }

    pub fn with_back_to_top_threshold(mut self, px: i64) -> Self {
        self.back_to_top_threshold_px = px;
        self
    }

    pub fn with_copy_revert_ms(mut self, delay_ms: i64) -> Self {
        self.copy_revert_ms = delay_ms;
        self
    }

    pub fn with_selectors(mut self, selectors: PageSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.is_empty() {
            return Err(Error::InvalidConfig("storage_key must not be empty".into()));
        }
        if self.theme_attribute.is_empty() || self.active_class.is_empty() {
            return Err(Error::InvalidConfig(
                "theme_attribute and active_class must not be empty".into(),
            ));
        }
        if self.active_class.chars().any(char::is_whitespace) {
            return Err(Error::InvalidConfig(format!(
                "active_class must be a single class token: {:?}",
                self.active_class
            )));
        }
        if self.copy_revert_ms <= 0 {
            return Err(Error::InvalidConfig(format!(
                "copy_revert_ms must be positive (got {})",
                self.copy_revert_ms
            )));
        }
        if self.back_to_top_threshold_px < 0 {
            return Err(Error::InvalidConfig(format!(
                "back_to_top_threshold_px must be non-negative (got {})",
                self.back_to_top_threshold_px
            )));
        }
        for (name, selector) in self.selectors.entries() {
            validate_selector(selector).map_err(|err| {
                Error::InvalidConfig(format!("selectors.{name} is not usable: {err}"))
            })?;
        }
        Ok(())
    }
}

/// Everything a [`crate::Page`] needs besides its markup.
#[derive(Debug)]
pub struct PageOptions {
    pub url: String,
    pub viewport: Viewport,
    pub store: Box<dyn PreferenceStore>,
    pub clipboard: Box<dyn Clipboard>,
    pub behaviors: BehaviorConfig,
    pub auto_install: bool,
    pub trace: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            url: "about:blank".into(),
            viewport: Viewport::default(),
            store: Box::new(MemoryStore::new()),
            clipboard: Box::new(MemoryClipboard::new()),
            behaviors: BehaviorConfig::default(),
            auto_install: true,
            trace: false,
        }
    }
}

impl PageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_viewport_width(mut self, px: u32) -> Self {
        self.viewport.inner_width = px;
        self
    }

    pub fn with_store(mut self, store: impl PreferenceStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn with_behaviors(mut self, behaviors: BehaviorConfig) -> Self {
        self.behaviors = behaviors;
        self
    }

    /// Leaves the page bare so callers can install [`crate::PageBehaviors`]
    /// themselves.
    pub fn without_behaviors(mut self) -> Self {
        self.auto_install = false;
        self
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }
}
