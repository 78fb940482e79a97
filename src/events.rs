use std::collections::HashMap;

use crate::behaviors::Action;
use crate::dom::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum EventTarget {
    Window,
    Node(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Listener {
    pub(crate) capture: bool,
    pub(crate) action: Action,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<EventTarget, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, target: EventTarget, event: &str, listener: Listener) {
        let listeners = self
            .map
            .entry(target)
            .or_default()
            .entry(event.to_string())
            .or_default();
        // Re-adding an identical listener is a no-op, like addEventListener.
        if !listeners.contains(&listener) {
            listeners.push(listener);
        }
    }

    pub(crate) fn get(&self, target: EventTarget, event: &str, capture: bool) -> Vec<Listener> {
        self.map
            .get(&target)
            .and_then(|events| events.get(event))
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|listener| listener.capture == capture)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, target: EventTarget, event: &str) -> usize {
        self.map
            .get(&target)
            .and_then(|events| events.get(event))
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: EventTarget,
    pub(crate) current_target: EventTarget,
    pub(crate) default_prevented: bool,
    pub(crate) propagation_stopped: bool,
    pub(crate) immediate_propagation_stopped: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: EventTarget) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    pub(crate) fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub(crate) fn current_node(&self) -> Option<NodeId> {
        match self.current_target {
            EventTarget::Node(node) => Some(node),
            EventTarget::Window => None,
        }
    }
}
