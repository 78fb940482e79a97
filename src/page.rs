use crate::behaviors::{BehaviorState, InstallReport, PageBehaviors};
use crate::config::PageOptions;
use crate::dom::{Dom, NodeId, truncate_chars};
use crate::events::{EventState, EventTarget, ListenerStore};
use crate::html::parse_html;
use crate::platform::{
    Clipboard, Location, PreferenceStore, ScrollRequest, ScrollTarget, Viewport,
};
use crate::scheduler::{Microtask, PendingTimer, ScheduledTask, SchedulerState, TimerTask};
use crate::theme::ThemePreference;
use crate::trace::TraceState;
use crate::{Error, Result};

const ACTION_STACK_SIZE: usize = 32 * 1024 * 1024;

/// A loaded documentation page: DOM, window state, platform mocks, and the
/// behaviors wired onto them.
#[derive(Debug)]
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) scheduler: SchedulerState,
    pub(crate) location: Location,
    pub(crate) viewport: Viewport,
    pub(crate) store: Box<dyn PreferenceStore>,
    pub(crate) clipboard: Box<dyn Clipboard>,
    pub(crate) clipboard_writes: Vec<String>,
    pub(crate) scroll_requests: Vec<ScrollRequest>,
    pub(crate) navigations: Vec<String>,
    pub(crate) behaviors: Option<BehaviorState>,
    pub(crate) trace_state: TraceState,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_options(html, PageOptions::default())
    }

    pub fn from_html_with_url(url: &str, html: &str) -> Result<Self> {
        Self::from_html_with_options(html, PageOptions::default().with_url(url))
    }

    pub fn from_html_with_url_and_local_storage(
        url: &str,
        html: &str,
        initial_local_storage: &[(&str, &str)],
    ) -> Result<Self> {
        let options = PageOptions::default()
            .with_url(url)
            .with_store(crate::platform::MemoryStore::with_entries(initial_local_storage));
        Self::from_html_with_options(html, options)
    }

    pub fn from_html_with_options(html: &str, options: PageOptions) -> Result<Self> {
        stacker::grow(ACTION_STACK_SIZE, || Self::from_html_impl(html, options))
    }

    fn from_html_impl(html: &str, options: PageOptions) -> Result<Self> {
        let PageOptions {
            url,
            viewport,
            store,
            clipboard,
            behaviors,
            auto_install,
            trace,
        } = options;

        let mut dom = parse_html(html)?;
        dom.ensure_document_structure()?;

        let mut page = Self {
            dom,
            listeners: ListenerStore::default(),
            scheduler: SchedulerState::default(),
            location: Location::parse(&url)?,
            viewport,
            store,
            clipboard,
            clipboard_writes: Vec::new(),
            scroll_requests: Vec::new(),
            navigations: Vec::new(),
            behaviors: None,
            trace_state: TraceState::default(),
        };
        page.enable_trace(trace);

        if auto_install {
            let preference = ThemePreference::load(page.store.as_ref(), &behaviors.storage_key);
            PageBehaviors::new(behaviors).install(&mut page, preference)?;
        }

        Ok(page)
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(ACTION_STACK_SIZE, || self.click_node(target))
    }

    fn click_node(&mut self, target: NodeId) -> Result<()> {
        let outcome = self.dispatch_event(EventTarget::Node(target), "click")?;
        if !outcome.default_prevented {
            if let Some(anchor) = self.dom.closest(target, "a[href]")? {
                let href = self.dom.attr(anchor, "href").unwrap_or_default().to_string();
                self.trace_event_line(format!("[event] navigate href={href}"));
                self.navigations.push(href);
            }
        }
        self.run_microtasks()
    }

    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let tag = self.dom.tag_name(target).unwrap_or_default().to_string();
        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }

        self.dom.set_value(target, text)?;
        stacker::grow(ACTION_STACK_SIZE, || {
            self.dispatch_event(EventTarget::Node(target), "input")?;
            self.run_microtasks()
        })
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(ACTION_STACK_SIZE, || {
            self.dispatch_event(EventTarget::Node(target), event)?;
            self.run_microtasks()
        })
    }

    /// Moves the viewport like a user scroll. Negative offsets clamp to 0,
    /// and a `scroll` event fires only when the offset actually changes.
    pub fn scroll_to(&mut self, y: i64) -> Result<()> {
        self.set_scroll_position(y)?;
        self.run_microtasks()
    }

    pub(crate) fn set_scroll_position(&mut self, y: i64) -> Result<()> {
        let next = y.max(0);
        if next == self.viewport.scroll_y {
            return Ok(());
        }
        self.viewport.scroll_y = next;
        self.dispatch_event(EventTarget::Window, "scroll")?;
        Ok(())
    }

    pub fn set_viewport_width(&mut self, px: u32) {
        self.viewport.inner_width = px;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_y(&self) -> i64 {
        self.viewport.scroll_y
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn clipboard_text(&self) -> Option<String> {
        self.clipboard.read_text()
    }

    /// Every text the clipboard accepted, oldest first.
    pub fn clipboard_writes(&self) -> &[String] {
        &self.clipboard_writes
    }

    pub fn preference(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    /// Theme attribute currently set on the document element.
    pub fn root_theme(&self) -> Option<String> {
        let attribute = self
            .behaviors
            .as_ref()
            .map(|state| state.config.theme_attribute.as_str())
            .unwrap_or("data-theme");
        let root = self.dom.document_element()?;
        self.dom.attr(root, attribute).map(str::to_owned)
    }

    pub fn install_report(&self) -> Option<&InstallReport> {
        self.behaviors.as_ref().map(|state| &state.report)
    }

    pub fn take_scroll_requests(&mut self) -> Vec<ScrollRequest> {
        std::mem::take(&mut self.scroll_requests)
    }

    pub fn take_navigations(&mut self) -> Vec<String> {
        std::mem::take(&mut self.navigations)
    }

    pub(crate) fn request_scroll(&mut self, request: ScrollRequest) -> Result<()> {
        self.trace_behavior_line(format!(
            "[behavior] scroll target={:?} behavior={:?} block={:?}",
            request.target, request.behavior, request.block
        ));
        // Element targets have no layout here, so only offsets move the viewport.
        let offset = match request.target {
            ScrollTarget::Offset(y) => Some(y),
            ScrollTarget::Element(_) => None,
        };
        self.scroll_requests.push(request);
        if let Some(y) = offset {
            self.set_scroll_position(y)?;
        }
        Ok(())
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.attr(target, name).map(str::to_owned))
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        self.dom.class_contains(target, class_name)
    }

    pub fn style_property(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.style_property(target, name))
    }

    /// False when the element or one of its ancestors has inline
    /// `display: none`.
    pub fn is_displayed(&self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            if self.dom.style_property(node, "display").as_deref() == Some("none") {
                return Ok(false);
            }
            cursor = self.dom.parent(node);
        }
        Ok(true)
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.dom.query_selector_all(selector)?.len())
    }

    /// Listeners registered directly on the first match for `event`, both
    /// phases.
    pub fn listener_count(&self, selector: &str, event: &str) -> Result<usize> {
        let target = self.select_one(selector)?;
        Ok(self.listeners.count(EventTarget::Node(target), event))
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_attr(&self, selector: &str, name: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.attr(target, name);
        if actual != Some(expected) {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: format!("{name}={expected:?}"),
                actual: format!("{name}={actual:?}"),
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        self.select_one(selector).map(|_| ())
    }

    pub fn assert_count(&self, selector: &str, expected: usize) -> Result<()> {
        let actual = self.count(selector)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
                dom_snippet: String::new(),
            });
        }
        Ok(())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), 200)
    }

    pub(crate) fn dispatch_event(
        &mut self,
        target: EventTarget,
        event_type: &str,
    ) -> Result<EventState> {
        let mut event = EventState::new(event_type, target);

        let EventTarget::Node(target_node) = target else {
            self.invoke_listeners(target, &mut event, false)?;
            self.trace_event_done(&event, "completed");
            return Ok(event);
        };

        let mut path = Vec::new();
        let mut cursor = self.dom.parent(target_node);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.dom.parent(node);
        }
        path.reverse();

        // Capture phase.
        for node in &path {
            self.invoke_listeners(EventTarget::Node(*node), &mut event, true)?;
            if event.propagation_stopped {
                self.trace_event_done(&event, "propagation_stopped");
                return Ok(event);
            }
        }

        // Target phase: capture listeners first.
        self.invoke_listeners(target, &mut event, true)?;
        if !event.propagation_stopped {
            self.invoke_listeners(target, &mut event, false)?;
        }
        if event.propagation_stopped {
            self.trace_event_done(&event, "propagation_stopped");
            return Ok(event);
        }

        // Bubble phase.
        for node in path.iter().rev() {
            self.invoke_listeners(EventTarget::Node(*node), &mut event, false)?;
            if event.propagation_stopped {
                self.trace_event_done(&event, "propagation_stopped");
                return Ok(event);
            }
        }

        self.trace_event_done(&event, "completed");
        Ok(event)
    }

    fn invoke_listeners(
        &mut self,
        current: EventTarget,
        event: &mut EventState,
        capture: bool,
    ) -> Result<()> {
        event.current_target = current;
        let listeners = self.listeners.get(current, &event.event_type, capture);
        for listener in listeners {
            if self.trace_state.enabled {
                let phase = if capture { "capture" } else { "bubble" };
                let target_label = self.trace_target_label(event.target);
                let current_label = self.trace_target_label(current);
                self.trace_event_line(format!(
                    "[event] {} target={} current={} phase={} action={:?}",
                    event.event_type, target_label, current_label, phase, listener.action
                ));
            }
            self.run_action(listener.action, event)?;
            if event.immediate_propagation_stopped {
                break;
            }
        }
        Ok(())
    }

    pub(crate) fn run_microtasks(&mut self) -> Result<()> {
        while let Some(task) = self.scheduler.microtasks.pop_front() {
            match task {
                Microtask::ClipboardSettled { button, outcome } => {
                    self.settle_copy(button, outcome)?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn set_timeout(&mut self, delay_ms: i64, task: TimerTask) -> i64 {
        let id = self.scheduler.schedule_timeout(delay_ms, task);
        self.trace_timer_line(format!(
            "[timer] schedule id={} delay_ms={} now_ms={}",
            id, delay_ms, self.scheduler.now_ms
        ));
        id
    }

    pub fn now_ms(&self) -> i64 {
        self.scheduler.now_ms
    }

    pub fn clear_timer(&mut self, timer_id: i64) -> bool {
        let existed = self.scheduler.clear_timeout(timer_id);
        self.trace_timer_line(format!("[timer] clear id={timer_id} existed={existed}"));
        existed
    }

    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.scheduler.task_queue.len();
        self.scheduler.task_queue.clear();
        self.trace_timer_line(format!("[timer] clear_all cleared={cleared}"));
        cleared
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.scheduler.pending()
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Runtime(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.scheduler.timer_step_limit = max_steps;
        Ok(())
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.scheduler.now_ms;
        let target = from.saturating_add(delta_ms);
        let ran = self.run_timers_until(target)?;
        self.trace_timer_line(format!(
            "[timer] advance delta_ms={} from={} to={} ran_due={}",
            delta_ms, from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.scheduler.now_ms {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.scheduler.now_ms
            )));
        }
        let from = self.scheduler.now_ms;
        let ran = self.run_timers_until(target_ms)?;
        self.trace_timer_line(format!(
            "[timer] advance_to from={} to={} ran_due={}",
            from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    /// Runs every pending timer, moving the clock forward as needed.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.scheduler.now_ms;
        let ran = self.run_timer_queue(None)?;
        self.trace_timer_line(format!(
            "[timer] flush from={} to={} ran={}",
            from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(next_idx) = self.scheduler.next_task_index(None) else {
            self.trace_timer_line("[timer] run_next none".into());
            return Ok(false);
        };

        let task = self.scheduler.task_queue.remove(next_idx);
        if task.due_at > self.scheduler.now_ms {
            self.scheduler.now_ms = task.due_at;
        }
        self.execute_timer_task(task)?;
        Ok(true)
    }

    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_timer_queue(Some(self.scheduler.now_ms))?;
        self.trace_timer_line(format!(
            "[timer] run_due now_ms={} ran={}",
            self.scheduler.now_ms, ran
        ));
        Ok(ran)
    }

    // Timers fire at their own due time, so the clock reads `due_at` inside
    // each callback before settling on `target_ms`.
    fn run_timers_until(&mut self, target_ms: i64) -> Result<usize> {
        let ran = self.run_timer_queue(Some(target_ms))?;
        self.scheduler.now_ms = target_ms;
        Ok(ran)
    }

    fn run_timer_queue(&mut self, due_limit: Option<i64>) -> Result<usize> {
        let mut steps = 0usize;
        while let Some(next_idx) = self.scheduler.next_task_index(due_limit) {
            steps += 1;
            if steps > self.scheduler.timer_step_limit {
                return Err(Error::Runtime(format!(
                    "timer queue exceeded max task steps: limit={}, now_ms={}, pending_tasks={}",
                    self.scheduler.timer_step_limit,
                    self.scheduler.now_ms,
                    self.scheduler.task_queue.len()
                )));
            }
            let task = self.scheduler.task_queue.remove(next_idx);
            if task.due_at > self.scheduler.now_ms {
                self.scheduler.now_ms = task.due_at;
            }
            self.execute_timer_task(task)?;
        }
        Ok(steps)
    }

    fn execute_timer_task(&mut self, task: ScheduledTask) -> Result<()> {
        self.trace_timer_line(format!(
            "[timer] run id={} due_at={} now_ms={}",
            task.id, task.due_at, self.scheduler.now_ms
        ));
        match task.task {
            TimerTask::RevertCopyLabel { button } => self.revert_copy_label(button, task.id)?,
        }
        self.run_microtasks()
    }
}
