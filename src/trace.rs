use std::collections::VecDeque;

use crate::events::{EventState, EventTarget};
use crate::page::Page;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) behaviors: bool,
    pub(crate) emit: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            behaviors: true,
            emit: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
        }
    }
}

impl Page {
    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace_state.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace_state.logs.drain(..).collect()
    }

    /// Forward trace lines to `tracing` at debug level as well as buffering
    /// them.
    pub fn set_trace_emit(&mut self, enabled: bool) {
        self.trace_state.emit = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace_state.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace_state.timers = enabled;
    }

    pub fn set_trace_behaviors(&mut self, enabled: bool) {
        self.trace_state.behaviors = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Runtime(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_state.log_limit = max_entries;
        while self.trace_state.logs.len() > self.trace_state.log_limit {
            self.trace_state.logs.pop_front();
        }
        Ok(())
    }

    pub(crate) fn trace_target_label(&self, target: EventTarget) -> String {
        match target {
            EventTarget::Window => "window".into(),
            EventTarget::Node(node) => self.dom.node_label(node),
        }
    }

    pub(crate) fn trace_event_done(&mut self, event: &EventState, outcome: &str) {
        if !(self.trace_state.enabled && self.trace_state.events) {
            return;
        }
        let target_label = self.trace_target_label(event.target);
        self.trace_line(format!(
            "[event] done {} target={} outcome={} default_prevented={}",
            event.event_type, target_label, outcome, event.default_prevented
        ));
    }

    pub(crate) fn trace_event_line(&mut self, line: String) {
        if self.trace_state.enabled && self.trace_state.events {
            self.trace_line(line);
        }
    }

    pub(crate) fn trace_timer_line(&mut self, line: String) {
        if self.trace_state.enabled && self.trace_state.timers {
            self.trace_line(line);
        }
    }

    pub(crate) fn trace_behavior_line(&mut self, line: String) {
        if self.trace_state.enabled && self.trace_state.behaviors {
            self.trace_line(line);
        }
    }

    fn trace_line(&mut self, line: String) {
        if self.trace_state.emit {
            tracing::debug!(target: "docsite_behaviors", "{line}");
        }
        if self.trace_state.logs.len() >= self.trace_state.log_limit {
            self.trace_state.logs.pop_front();
        }
        self.trace_state.logs.push_back(line);
    }
}
