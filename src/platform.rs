use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

use url::Url;

use crate::{Error, Result};

/// Persistent per-origin key-value storage, the role `localStorage` plays
/// in a browser.
pub trait PreferenceStore: fmt::Debug {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StorageError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    QuotaExceeded,
    Unavailable,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuotaExceeded => f.write_str("storage quota exceeded"),
            Self::Unavailable => f.write_str("storage unavailable"),
        }
    }
}

impl StdError for StorageError {}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    write_error: Option<StorageError>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                .collect(),
            write_error: None,
        }
    }

    /// Every later `set` fails with `error`; reads keep working.
    pub fn failing_writes(mut self, error: StorageError) -> Self {
        self.write_error = Some(error);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        if let Some(error) = self.write_error {
            return Err(error);
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// System clipboard. Writes are requested synchronously; the host settles
/// the outcome on the next microtask checkpoint.
pub trait Clipboard: fmt::Debug {
    fn write_text(&mut self, text: &str) -> std::result::Result<(), ClipboardError>;
    fn read_text(&self) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardError {
    PermissionDenied,
    Unsupported,
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => f.write_str("clipboard permission denied"),
            Self::Unsupported => f.write_str("clipboard unsupported in this context"),
        }
    }
}

impl StdError for ClipboardError {}

#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
    failure: Option<ClipboardError>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: ClipboardError) -> Self {
        Self {
            text: None,
            failure: Some(error),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> std::result::Result<(), ClipboardError> {
        if let Some(error) = self.failure {
            return Err(error);
        }
        self.text = Some(text.to_string());
        Ok(())
    }

    fn read_text(&self) -> Option<String> {
        self.text.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub inner_width: u32,
    pub scroll_y: i64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            inner_width: 1024,
            scroll_y: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
    Center,
    End,
    Nearest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Viewport offset in pixels.
    Offset(i64),
    /// Element label in `tag#id.class` form.
    Element(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: ScrollTarget,
    pub behavior: ScrollBehavior,
    pub block: Option<ScrollBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input.trim())
            .map_err(|err| Error::InvalidUrl(format!("{input}: {err}")))?;
        Ok(Self { url })
    }

    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    pub fn pathname(&self) -> &str {
        self.url.path()
    }

    /// Last path segment of the current URL, `index.html` for directories.
    pub fn page_identifier(&self) -> &str {
        page_identifier_from_path(self.pathname())
    }
}

pub fn page_identifier_from_path(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => "index.html",
    }
}
