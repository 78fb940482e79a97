use std::collections::VecDeque;

use crate::dom::NodeId;
use crate::platform::ClipboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerTask {
    RevertCopyLabel { button: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Microtask {
    ClipboardSettled {
        button: NodeId,
        outcome: Result<(), ClipboardError>,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    pub(crate) id: i64,
    pub(crate) due_at: i64,
    pub(crate) order: i64,
    pub(crate) task: TimerTask,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: i64,
    pub due_at: i64,
    pub order: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct SchedulerState {
    pub(crate) now_ms: i64,
    pub(crate) task_queue: Vec<ScheduledTask>,
    pub(crate) microtasks: VecDeque<Microtask>,
    pub(crate) timer_step_limit: usize,
    next_timer_id: i64,
    next_task_order: i64,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            now_ms: 0,
            task_queue: Vec::new(),
            microtasks: VecDeque::new(),
            timer_step_limit: 10_000,
            next_timer_id: 1,
            next_task_order: 0,
        }
    }
}

impl SchedulerState {
    pub(crate) fn schedule_timeout(&mut self, delay_ms: i64, task: TimerTask) -> i64 {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        let order = self.next_task_order;
        self.next_task_order += 1;
        self.task_queue.push(ScheduledTask {
            id,
            due_at: self.now_ms.saturating_add(delay_ms.max(0)),
            order,
            task,
        });
        id
    }

    pub(crate) fn clear_timeout(&mut self, timer_id: i64) -> bool {
        let before = self.task_queue.len();
        self.task_queue.retain(|task| task.id != timer_id);
        self.task_queue.len() != before
    }

    pub(crate) fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    pub(crate) fn pending(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }
}
