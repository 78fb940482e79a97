use crate::events::EventState;
use crate::page::Page;
use crate::platform::{ScrollBehavior, ScrollBlock, ScrollRequest, ScrollTarget};
use crate::Result;

impl Page {
    /// In-page anchors never navigate. The href is resolved as a selector and
    /// its first match, if any, is scrolled to the top of the viewport.
    pub(super) fn scroll_to_anchor(&mut self, event: &mut EventState) -> Result<()> {
        event.prevent_default();
        let Some(anchor) = event.current_node() else {
            return Ok(());
        };
        let href = self.dom.attr(anchor, "href").unwrap_or_default().to_string();

        // A bare "#" or other unusable href is not an error, just no target.
        let target = self.dom.query_selector(&href).ok().flatten();
        let Some(target) = target else {
            self.trace_behavior_line(format!("[behavior] anchor href={href:?} target=none"));
            return Ok(());
        };

        self.request_scroll(ScrollRequest {
            target: ScrollTarget::Element(self.dom.node_label(target)),
            behavior: ScrollBehavior::Smooth,
            block: Some(ScrollBlock::Start),
        })
    }
}
