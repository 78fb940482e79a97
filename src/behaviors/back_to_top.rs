use crate::dom::NodeId;
use crate::events::{EventTarget, Listener};
use crate::page::Page;
use crate::platform::{ScrollBehavior, ScrollRequest, ScrollTarget};
use crate::{Error, Result};

use super::Action;

pub(crate) const BACK_TO_TOP_CLASS: &str = "back-to-top";

const BACK_TO_TOP_LABEL: &str = "\u{2191}";

const BACK_TO_TOP_STYLE: &str = "
  position: fixed;
  bottom: 2rem;
  right: 2rem;
  background: var(--primary);
  color: white;
  border: none;
  width: 50px;
  height: 50px;
  border-radius: 50%;
  font-size: 1.5rem;
  cursor: pointer;
  display: none;
  z-index: 1000;
  box-shadow: 0 4px 6px var(--shadow);
  transition: all 0.3s;
";

impl Page {
    /// Appends the hidden floating button to `<body>` and wires its click.
    pub(super) fn create_back_to_top(&mut self) -> Result<NodeId> {
        let body = self
            .dom
            .body()
            .ok_or_else(|| Error::Runtime("document has no body".into()))?;

        let button = self.dom.create_detached_element("button");
        self.dom.set_text_content(button, BACK_TO_TOP_LABEL)?;
        self.dom.class_add(button, BACK_TO_TOP_CLASS)?;
        self.dom.set_style_text(button, BACK_TO_TOP_STYLE)?;
        self.dom.append_child(body, button)?;

        self.listeners.add(
            EventTarget::Node(button),
            "click",
            Listener {
                capture: false,
                action: Action::ScrollToTop,
            },
        );
        Ok(button)
    }

    // Plain threshold: offsets hovering around it flip visibility each time.
    pub(super) fn sync_back_to_top(&mut self) -> Result<()> {
        let state = self.behavior_state()?;
        let Some(button) = state.back_to_top else {
            return Ok(());
        };
        let visible = self.viewport.scroll_y > state.config.back_to_top_threshold_px;
        let display = if visible { "block" } else { "none" };
        self.dom.set_style_property(button, "display", display)?;
        self.trace_behavior_line(format!(
            "[behavior] back-to-top scroll_y={} display={display}",
            self.viewport.scroll_y
        ));
        Ok(())
    }

    pub(super) fn scroll_back_to_top(&mut self) -> Result<()> {
        self.request_scroll(ScrollRequest {
            target: ScrollTarget::Offset(0),
            behavior: ScrollBehavior::Smooth,
            block: None,
        })
    }
}
