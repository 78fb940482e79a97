use crate::dom::NodeId;
use crate::events::{EventTarget, Listener};
use crate::html::escape_html;
use crate::page::Page;
use crate::platform::ClipboardError;
use crate::scheduler::{Microtask, TimerTask};
use crate::Result;

use super::Action;

pub(crate) const CODE_WRAPPER_CLASS: &str = "code-wrapper";
pub(crate) const CODE_HEADER_CLASS: &str = "code-header";
pub(crate) const CODE_LANG_CLASS: &str = "code-lang";
pub(crate) const COPY_BUTTON_CLASS: &str = "copy-btn";

impl Page {
    pub(super) fn copy_from_wrapper(&mut self, button: NodeId) -> Result<()> {
        let code = match self.dom.closest(button, &format!(".{CODE_WRAPPER_CLASS}"))? {
            Some(wrapper) => self.dom.query_selector_from(wrapper, "code")?,
            None => None,
        };
        self.copy_code_text(button, code)
    }

    pub(super) fn copy_from_block(&mut self, button: NodeId, block: NodeId) -> Result<()> {
        let code = self.dom.query_selector_from(block, "code")?;
        self.copy_code_text(button, code)
    }

    fn copy_code_text(&mut self, button: NodeId, code: Option<NodeId>) -> Result<()> {
        let Some(code) = code else {
            self.trace_behavior_line(format!(
                "[behavior] copy skipped button={} reason=no_code",
                self.dom.node_label(button)
            ));
            return Ok(());
        };

        let text = self.dom.text_content(code);
        let outcome = self.clipboard.write_text(&text);
        if outcome.is_ok() {
            self.clipboard_writes.push(text);
        }
        self.scheduler
            .microtasks
            .push_back(Microtask::ClipboardSettled { button, outcome });
        Ok(())
    }

    /// Shows the transient label for a settled clipboard write and schedules
    /// its revert, replacing any revert still pending for the same button.
    pub(crate) fn settle_copy(
        &mut self,
        button: NodeId,
        outcome: std::result::Result<(), ClipboardError>,
    ) -> Result<()> {
        let state = self.behavior_state()?;
        let label = match outcome {
            Ok(()) => state.config.copied_label.clone(),
            Err(_) => state.config.copy_failed_label.clone(),
        };
        let delay_ms = state.config.copy_revert_ms;
        let previous = state.copy_reverts.get(&button).copied();

        if let Err(err) = outcome {
            tracing::warn!(error = %err, "clipboard write failed");
        }
        self.dom.set_text_content(button, &label)?;

        if let Some(previous) = previous {
            self.clear_timer(previous);
        }
        let timer_id = self.set_timeout(delay_ms, TimerTask::RevertCopyLabel { button });
        self.behavior_state_mut()?
            .copy_reverts
            .insert(button, timer_id);

        self.trace_behavior_line(format!(
            "[behavior] copy button={} label={:?} revert_timer={}",
            self.dom.node_label(button),
            label,
            timer_id
        ));
        Ok(())
    }

    pub(crate) fn revert_copy_label(&mut self, button: NodeId, timer_id: i64) -> Result<()> {
        let state = self.behavior_state_mut()?;
        if state.copy_reverts.get(&button) == Some(&timer_id) {
            state.copy_reverts.remove(&button);
        }
        let label = state.config.copy_label.clone();
        self.dom.set_text_content(button, &label)
    }

    /// Wraps every code block that has no `.code-wrapper` yet and gives it a
    /// header with a language label and its own copy button.
    pub(super) fn inject_code_headers(&mut self) -> Result<usize> {
        let state = self.behavior_state()?;
        let blocks_selector = state.config.selectors.code_blocks.clone();
        let header_html = format!(
            "\n<span class=\"{CODE_LANG_CLASS}\">{}</span>\n<button class=\"{COPY_BUTTON_CLASS}\">{}</button>\n",
            escape_html(&state.config.code_language_label),
            escape_html(&state.config.copy_label),
        );

        let wrapper_selector = format!(".{CODE_WRAPPER_CLASS}");
        let mut injected = 0;
        for block in self.dom.query_selector_all(&blocks_selector)? {
            if self.dom.closest(block, &wrapper_selector)?.is_some() {
                continue;
            }
            let Some(parent) = self.dom.parent(block) else {
                continue;
            };

            let wrapper = self.dom.create_detached_element("div");
            self.dom.class_add(wrapper, CODE_WRAPPER_CLASS)?;
            self.dom.insert_before(parent, wrapper, block)?;
            self.dom.append_child(wrapper, block)?;

            let header = self.dom.create_detached_element("div");
            self.dom.class_add(header, CODE_HEADER_CLASS)?;
            self.dom.set_inner_html(header, &header_html)?;
            self.dom.insert_before(wrapper, header, block)?;

            if let Some(button) = self
                .dom
                .query_selector_from(header, &format!(".{COPY_BUTTON_CLASS}"))?
            {
                self.listeners.add(
                    EventTarget::Node(button),
                    "click",
                    Listener {
                        capture: false,
                        action: Action::CopyFromBlock(block),
                    },
                );
            }
            injected += 1;
        }

        self.trace_behavior_line(format!("[behavior] code headers injected={injected}"));
        Ok(injected)
    }
}
