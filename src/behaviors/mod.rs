use std::collections::HashMap;

use crate::config::BehaviorConfig;
use crate::dom::NodeId;
use crate::events::{EventState, EventTarget, Listener};
use crate::page::Page;
use crate::theme::{Theme, ThemePreference};
use crate::{Error, Result};

mod active_nav;
mod back_to_top;
mod copy_code;
mod mobile_nav;
mod search_filter;
mod smooth_scroll;
mod theme_toggle;

/// What a listener does when its event reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    ToggleTheme,
    ToggleMenu,
    CloseMenuOnNarrowViewport,
    /// Copy the first `code` inside the button's `.code-wrapper`.
    CopyFromWrapper,
    /// Copy the first `code` inside this `<pre>`.
    CopyFromBlock(NodeId),
    FilterSections,
    ScrollToAnchor,
    SyncBackToTop,
    ScrollToTop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindScope {
    First,
    All,
}

#[derive(Debug, Clone)]
struct Binding {
    name: &'static str,
    selector: String,
    event: &'static str,
    scope: BindScope,
    action: Action,
}

// Pre-existing copy buttons are bound here, before header injection, so an
// injected button only ever carries its own block listener.
fn binding_table(config: &BehaviorConfig) -> Vec<Binding> {
    let selectors = &config.selectors;
    vec![
        Binding {
            name: "theme-toggle",
            selector: selectors.theme_toggle.clone(),
            event: "click",
            scope: BindScope::First,
            action: Action::ToggleTheme,
        },
        Binding {
            name: "mobile-menu",
            selector: selectors.menu_toggle.clone(),
            event: "click",
            scope: BindScope::First,
            action: Action::ToggleMenu,
        },
        Binding {
            name: "nav-close",
            selector: selectors.nav_links.clone(),
            event: "click",
            scope: BindScope::All,
            action: Action::CloseMenuOnNarrowViewport,
        },
        Binding {
            name: "copy-buttons",
            selector: selectors.copy_buttons.clone(),
            event: "click",
            scope: BindScope::All,
            action: Action::CopyFromWrapper,
        },
        Binding {
            name: "search",
            selector: selectors.search_input.clone(),
            event: "input",
            scope: BindScope::First,
            action: Action::FilterSections,
        },
        Binding {
            name: "anchors",
            selector: selectors.anchor_links.clone(),
            event: "click",
            scope: BindScope::All,
            action: Action::ScrollToAnchor,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingReport {
    pub name: &'static str,
    pub attached: usize,
}

/// What installation found and wired on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub theme: Theme,
    pub page_identifier: String,
    pub bindings: Vec<BindingReport>,
    pub active_links: usize,
    pub injected_headers: usize,
    pub back_to_top: bool,
}

impl InstallReport {
    /// Number of elements the named binding attached to, 0 for unknown names.
    pub fn attached(&self, name: &str) -> usize {
        self.bindings
            .iter()
            .find(|binding| binding.name == name)
            .map_or(0, |binding| binding.attached)
    }
}

#[derive(Debug)]
pub(crate) struct BehaviorState {
    pub(crate) config: BehaviorConfig,
    pub(crate) preference: ThemePreference,
    pub(crate) sidebar: Option<NodeId>,
    pub(crate) theme_toggle: Option<NodeId>,
    pub(crate) back_to_top: Option<NodeId>,
    pub(crate) copy_reverts: HashMap<NodeId, i64>,
    pub(crate) report: InstallReport,
}

/// Installs the documentation page behaviors onto a [`Page`].
#[derive(Debug, Clone, Default)]
pub struct PageBehaviors {
    config: BehaviorConfig,
}

impl PageBehaviors {
    pub fn new(config: BehaviorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    /// Wires every behavior whose elements are present. Runs once per page.
    pub fn install(&self, page: &mut Page, preference: ThemePreference) -> Result<InstallReport> {
        if page.behaviors.is_some() {
            return Err(Error::Runtime(
                "page behaviors are already installed".into(),
            ));
        }
        self.config.validate()?;

        let selectors = &self.config.selectors;
        let sidebar = page.dom.query_selector(&selectors.sidebar)?;
        let theme_toggle = page.dom.query_selector(&selectors.theme_toggle)?;
        let theme = preference.theme();
        let page_identifier = page.location.page_identifier().to_string();

        page.behaviors = Some(BehaviorState {
            config: self.config.clone(),
            preference,
            sidebar,
            theme_toggle,
            back_to_top: None,
            copy_reverts: HashMap::new(),
            report: InstallReport {
                theme,
                page_identifier: page_identifier.clone(),
                bindings: Vec::new(),
                active_links: 0,
                injected_headers: 0,
                back_to_top: false,
            },
        });

        page.apply_theme(theme)?;

        let mut bindings = Vec::new();
        for binding in binding_table(&self.config) {
            let attached = page.bind_if_present(&binding)?;
            bindings.push(BindingReport {
                name: binding.name,
                attached,
            });
        }

        let active_links = page.mark_active_nav(&page_identifier)?;
        let injected_headers = page.inject_code_headers()?;
        let back_to_top = page.create_back_to_top()?;
        page.listeners.add(
            EventTarget::Window,
            "scroll",
            Listener {
                capture: false,
                action: Action::SyncBackToTop,
            },
        );

        let report = InstallReport {
            theme,
            page_identifier,
            bindings,
            active_links,
            injected_headers,
            back_to_top: page.dom.is_connected(back_to_top),
        };

        tracing::info!(
            theme = %report.theme,
            page = %report.page_identifier,
            injected_headers = report.injected_headers,
            active_links = report.active_links,
            "documentation page behaviors installed"
        );
        page.trace_behavior_line(format!(
            "[behavior] install theme={} page={} injected_headers={}",
            report.theme, report.page_identifier, report.injected_headers
        ));

        let state = page.behavior_state_mut()?;
        state.back_to_top = Some(back_to_top);
        state.report = report.clone();
        Ok(report)
    }
}

impl Page {
    pub(crate) fn behavior_state(&self) -> Result<&BehaviorState> {
        self.behaviors
            .as_ref()
            .ok_or_else(|| Error::Runtime("page behaviors are not installed".into()))
    }

    pub(crate) fn behavior_state_mut(&mut self) -> Result<&mut BehaviorState> {
        self.behaviors
            .as_mut()
            .ok_or_else(|| Error::Runtime("page behaviors are not installed".into()))
    }

    /// Attaches `binding` to whatever its selector finds; nothing found means
    /// nothing attached.
    fn bind_if_present(&mut self, binding: &Binding) -> Result<usize> {
        let targets = match binding.scope {
            BindScope::First => self
                .dom
                .query_selector(&binding.selector)?
                .into_iter()
                .collect::<Vec<_>>(),
            BindScope::All => self.dom.query_selector_all(&binding.selector)?,
        };
        for node in &targets {
            self.listeners.add(
                EventTarget::Node(*node),
                binding.event,
                Listener {
                    capture: false,
                    action: binding.action,
                },
            );
        }
        self.trace_behavior_line(format!(
            "[behavior] bind {} selector={} event={} attached={}",
            binding.name,
            binding.selector,
            binding.event,
            targets.len()
        ));
        Ok(targets.len())
    }

    pub(crate) fn run_action(&mut self, action: Action, event: &mut EventState) -> Result<()> {
        match action {
            Action::ToggleTheme => self.toggle_theme(),
            Action::ToggleMenu => self.toggle_menu(),
            Action::CloseMenuOnNarrowViewport => self.close_menu_on_narrow_viewport(),
            Action::CopyFromWrapper => match event.current_node() {
                Some(button) => self.copy_from_wrapper(button),
                None => Ok(()),
            },
            Action::CopyFromBlock(block) => match event.current_node() {
                Some(button) => self.copy_from_block(button, block),
                None => Ok(()),
            },
            Action::FilterSections => match event.current_node() {
                Some(input) => self.filter_sections(input),
                None => Ok(()),
            },
            Action::ScrollToAnchor => self.scroll_to_anchor(event),
            Action::SyncBackToTop => self.sync_back_to_top(),
            Action::ScrollToTop => self.scroll_back_to_top(),
        }
    }
}
