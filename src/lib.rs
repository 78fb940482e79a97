//! Page behaviors for static documentation sites.
//!
//! The behaviors (theme toggle, mobile navigation, copy buttons, search
//! filter, active navigation, smooth anchors, back-to-top) run against a
//! deterministic in-memory browser host, so every reaction to a user event
//! can be driven and asserted from Rust.
//!
//! ```no_run
//! use docsite_behaviors::Page;
//!
//! let html = r#"
//!   <button id="theme-toggle"></button>
//!   <input id="search-box">
//!   <div class="section">Installation</div>
//!   <div class="section">Configuration</div>
//! "#;
//!
//! let mut page = Page::from_html(html)?;
//! page.click("#theme-toggle")?;
//! assert_eq!(page.root_theme().as_deref(), Some("dark"));
//!
//! page.type_text("#search-box", "install")?;
//! assert!(page.is_displayed(".section")?);
//! # Ok::<(), docsite_behaviors::Error>(())
//! ```

use std::error::Error as StdError;
use std::fmt;

mod behaviors;
mod config;
mod dom;
mod events;
mod html;
mod page;
mod platform;
mod scheduler;
mod selector;
mod theme;
mod trace;

pub use behaviors::{BindingReport, InstallReport, PageBehaviors};
pub use config::{BehaviorConfig, PageOptions, PageSelectors};
pub use page::Page;
pub use platform::{
    Clipboard, ClipboardError, Location, MemoryClipboard, MemoryStore, PreferenceStore,
    ScrollBehavior, ScrollBlock, ScrollRequest, ScrollTarget, StorageError, Viewport,
    page_identifier_from_path,
};
pub use scheduler::PendingTimer;
pub use theme::{Theme, ThemePreference};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    InvalidUrl(String),
    InvalidConfig(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    Runtime(String),
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::InvalidUrl(msg) => write!(f, "invalid page url: {msg}"),
            Self::InvalidConfig(msg) => write!(f, "invalid behavior config: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::Runtime(msg) => write!(f, "runtime error: {msg}"),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
        }
    }
}

impl StdError for Error {}

#[cfg(test)]
mod tests;
